use serde::{Deserialize, Serialize};

use crate::domain::Position;
use crate::framework::{ClientError, RestEntity};

/// A named collection of [`Position`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Positions held in this portfolio (server-populated back-reference).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<Position>>,
}

impl Portfolio {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl RestEntity for Portfolio {
    type Id = i64;
    const RESOURCE: &'static str = "portfolios";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn relation_fields() -> &'static [&'static str] {
        &["positions"]
    }

    fn validate(&self) -> Result<(), ClientError> {
        if self.name.is_none() {
            return Err(ClientError::Validation { field: "name" });
        }
        Ok(())
    }
}
