//! Device categories the integration maps nodes to

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Target device category (host platform domain)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Sensor,
    Switch,
    Light,
    Cover,
    Climate,
    BinarySensor,
}

impl Category {
    /// Publication order for discovery batches.
    ///
    /// Downstream registration order depends on this staying fixed.
    pub const ALL: [Category; 6] = [
        Category::Sensor,
        Category::Switch,
        Category::Light,
        Category::Cover,
        Category::Climate,
        Category::BinarySensor,
    ];

    /// Host platform domain name
    pub fn domain(self) -> &'static str {
        match self {
            Category::Sensor => "sensor",
            Category::Switch => "switch",
            Category::Light => "light",
            Category::Cover => "cover",
            Category::Climate => "climate",
            Category::BinarySensor => "binary_sensor",
        }
    }

    /// Whether entities of this category only report state
    pub fn is_readonly(self) -> bool {
        matches!(self, Category::Sensor | Category::BinarySensor)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.domain())
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.domain() == s)
            .ok_or_else(|| ParseError::UnknownCategory(s.to_string()))
    }
}
