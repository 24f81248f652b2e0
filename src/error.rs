//! Error types for the aquarium_analyzer library

use std::path::PathBuf;
use thiserror::Error;

use crate::color::Region;

/// Result type alias for aquarium_analyzer operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Comprehensive error types for aquarium photo analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Request referenced a photo that does not exist
    #[error("Image not found: {}", path.display())]
    ImageNotFound { path: PathBuf },

    /// Image file could not be opened or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Calibration data is unusable for the requested reading
    #[error("Configuration error: {reason}")]
    ConfigurationError {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configured region does not fit inside the photo
    #[error("Region {region} lies outside the {width}x{height} image")]
    RegionOutOfBounds {
        region: Region,
        width: u32,
        height: u32,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Request named an analysis type nobody handles
    #[error("Unknown analysis type: {analysis_type}")]
    UnknownAnalysisType { analysis_type: String },

    /// Inbound request could not be parsed
    #[error("Malformed analysis request: {message}")]
    InvalidRequest {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Delivery to the message bus failed
    #[error("Failed to publish to {topic}: {message}")]
    PublishError { topic: String, message: String },
}

impl AnalysisError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error without an underlying cause
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
            source: None,
        }
    }

    /// Create a configuration error for a file that could not be read or parsed
    pub fn config_load<E>(reason: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigurationError {
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a malformed-request error from a JSON decoding failure
    pub fn invalid_request(source: serde_json::Error) -> Self {
        Self::InvalidRequest {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Check if this error only affects a single parameter of a water test
    /// and the rest of the request can still be published
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::RegionOutOfBounds { .. }
                | AnalysisError::ConfigurationError { .. }
                | AnalysisError::InvalidParameter { .. }
                | AnalysisError::PublishError { .. }
        )
    }

    /// Get user-friendly error description for dashboard display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::ImageNotFound { .. } => {
                "The photo could not be found. Check the camera upload folder.".to_string()
            }
            AnalysisError::ImageLoadError { .. } => {
                "Could not read the photo. Please check the file format and try again.".to_string()
            }
            AnalysisError::ConfigurationError { .. } | AnalysisError::RegionOutOfBounds { .. } => {
                "The test kit calibration does not match this photo. Please review the analyzer configuration.".to_string()
            }
            AnalysisError::UnknownAnalysisType { analysis_type } => {
                format!("'{}' is not a supported analysis.", analysis_type)
            }
            _ => "Analysis failed. Please try with a different photo.".to_string(),
        }
    }
}
