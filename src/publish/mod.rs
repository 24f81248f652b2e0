//! Message bus publication
//!
//! The analyzer hands every derived fact to a [`Publisher`], one topic per
//! fact. Delivery is the publisher's concern: a failed publish never changes
//! what was analyzed.
//!
//! Two publishers ship with the crate:
//! - [`RetainedStore`]: in-memory bus keeping the last value per topic
//! - [`JsonLinesPublisher`]: writes one JSON message per line for a bus bridge

pub mod payload;
pub mod retained;
pub mod json_lines;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AnalysisError, Result};

pub use payload::{parameter_topic, ParameterPayload, WaterTestSummary};
pub use retained::RetainedStore;
pub use json_lines::JsonLinesPublisher;

/// One publication as it goes out on the bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub topic: String,
    /// New subscribers receive the last retained value immediately
    pub retain: bool,
    pub payload: Value,
}

/// Sink for derived facts
pub trait Publisher {
    /// Deliver `payload` on `topic`
    fn publish(&mut self, message: Message) -> Result<()>;
}

impl<P: Publisher + ?Sized> Publisher for &mut P {
    fn publish(&mut self, message: Message) -> Result<()> {
        (**self).publish(message)
    }
}

/// Serialize `payload` and publish it as retained state on `topic`
pub fn publish_retained<P, T>(publisher: &mut P, topic: &str, payload: &T) -> Result<()>
where
    P: Publisher + ?Sized,
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_value(payload).map_err(|e| AnalysisError::PublishError {
        topic: topic.to_string(),
        message: format!("payload not serializable: {}", e),
    })?;
    publisher.publish(Message {
        topic: topic.to_string(),
        retain: true,
        payload,
    })
}
