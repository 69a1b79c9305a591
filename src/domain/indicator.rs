use serde::{Deserialize, Serialize};

use crate::domain::Analysis;
use crate::framework::{ClientError, RestEntity};

/// A named indicator belonging to an [`Analysis`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The owning analysis. Sent as an `{ "id": ... }` stub only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Box<Analysis>>,
}

impl Indicator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Attaches the parent analysis reference.
    pub fn for_analysis(mut self, analysis: Analysis) -> Self {
        self.analysis = Some(Box::new(analysis));
        self
    }
}

impl RestEntity for Indicator {
    type Id = i64;
    const RESOURCE: &'static str = "indicators";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn relation_fields() -> &'static [&'static str] {
        &["analysis"]
    }

    fn validate(&self) -> Result<(), ClientError> {
        if self.name.is_none() {
            return Err(ClientError::Validation { field: "name" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required() {
        assert_eq!(
            Indicator::default().validate(),
            Err(ClientError::Validation { field: "name" })
        );
        assert_eq!(Indicator::new("RSI").validate(), Ok(()));
    }
}
