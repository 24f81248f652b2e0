//! Water chemistry parameters tracked by the supported test kits

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AnalysisError;

/// A chemistry reading a kit can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Ammonia,
    Nitrite,
    Nitrate,
    Ph,
    /// Carbonate hardness
    Kh,
    /// General hardness
    Gh,
}

impl Parameter {
    pub const ALL: [Parameter; 6] = [
        Parameter::Ammonia,
        Parameter::Nitrite,
        Parameter::Nitrate,
        Parameter::Ph,
        Parameter::Kh,
        Parameter::Gh,
    ];

    /// Key used in configuration files and topic names
    pub fn key(&self) -> &'static str {
        match self {
            Parameter::Ammonia => "ammonia",
            Parameter::Nitrite => "nitrite",
            Parameter::Nitrate => "nitrate",
            Parameter::Ph => "ph",
            Parameter::Kh => "kh",
            Parameter::Gh => "gh",
        }
    }

    /// Unit of the published value; pH is dimensionless
    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::Ph => "",
            _ => "ppm",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Parameter {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parameter::ALL
            .into_iter()
            .find(|p| p.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| AnalysisError::InvalidParameter {
                parameter: "parameter".into(),
                value: s.to_string(),
            })
    }
}
