use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Indicator, Stock};
use crate::framework::{ClientError, RestEntity};

/// One dated analysis of a [`Stock`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Indicators computed for this analysis (server-populated back-reference).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicators: Option<Vec<Indicator>>,
    /// The analyzed stock. Sent as an `{ "id": ... }` stub only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<Box<Stock>>,
}

impl Analysis {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    /// Attaches the parent stock reference.
    pub fn for_stock(mut self, stock: Stock) -> Self {
        self.stock = Some(Box::new(stock));
        self
    }
}

impl RestEntity for Analysis {
    type Id = i64;
    const RESOURCE: &'static str = "analyses";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn relation_fields() -> &'static [&'static str] {
        &["indicators", "stock"]
    }

    fn validate(&self) -> Result<(), ClientError> {
        if self.date.is_none() {
            return Err(ClientError::Validation { field: "date" });
        }
        Ok(())
    }
}
