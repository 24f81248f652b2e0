//! In-memory retained-state bus

use std::collections::BTreeMap;

use serde_json::Value;

use super::{Message, Publisher};
use crate::Result;

/// Keeps every publication and the last retained value per topic
///
/// Stands in for a broker: reading a topic returns what a new subscriber
/// would receive on connect.
#[derive(Debug, Default, Clone)]
pub struct RetainedStore {
    retained: BTreeMap<String, Value>,
    messages: Vec<Message>,
}

impl RetainedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last retained payload on `topic`
    pub fn retained(&self, topic: &str) -> Option<&Value> {
        self.retained.get(topic)
    }

    /// Topics holding a retained value
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.retained.keys().map(String::as_str)
    }

    /// Every publication, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of publications made on `topic`
    pub fn count(&self, topic: &str) -> usize {
        self.messages.iter().filter(|m| m.topic == topic).count()
    }

    pub fn clear(&mut self) {
        self.retained.clear();
        self.messages.clear();
    }
}

impl Publisher for RetainedStore {
    fn publish(&mut self, message: Message) -> Result<()> {
        if message.retain {
            self.retained
                .insert(message.topic.clone(), message.payload.clone());
        }
        self.messages.push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(topic: &str, payload: Value, retain: bool) -> Message {
        Message {
            topic: topic.to_string(),
            retain,
            payload,
        }
    }

    #[test]
    fn test_last_value_retained() {
        let mut store = RetainedStore::new();
        store.publish(message("t", json!(1), true)).unwrap();
        store.publish(message("t", json!(2), true)).unwrap();

        assert_eq!(store.retained("t"), Some(&json!(2)));
        assert_eq!(store.count("t"), 2);
    }

    #[test]
    fn test_unretained_not_kept() {
        let mut store = RetainedStore::new();
        store.publish(message("t", json!(1), true)).unwrap();
        store.publish(message("t", json!(5), false)).unwrap();

        assert_eq!(store.retained("t"), Some(&json!(1)));
        assert_eq!(store.messages().len(), 2);
    }

    #[test]
    fn test_topics_and_clear() {
        let mut store = RetainedStore::new();
        store.publish(message("b", json!(null), true)).unwrap();
        store.publish(message("a", json!(null), true)).unwrap();
        assert_eq!(store.topics().collect::<Vec<_>>(), vec!["a", "b"]);

        store.clear();
        assert_eq!(store.topics().count(), 0);
        assert!(store.messages().is_empty());
    }
}
