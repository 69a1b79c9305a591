use serde::{Deserialize, Serialize};

use crate::domain::Portfolio;
use crate::framework::{ClientError, RestEntity};

/// A holding inside a [`Portfolio`]: an amount bought at a price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// The owning portfolio. Sent as an `{ "id": ... }` stub only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<Box<Portfolio>>,
}

impl Position {
    pub fn new(amount: f64, price: f64) -> Self {
        Self {
            amount: Some(amount),
            price: Some(price),
            ..Self::default()
        }
    }

    /// Attaches the parent portfolio reference.
    pub fn in_portfolio(mut self, portfolio: Portfolio) -> Self {
        self.portfolio = Some(Box::new(portfolio));
        self
    }
}

impl RestEntity for Position {
    type Id = i64;
    const RESOURCE: &'static str = "positions";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn relation_fields() -> &'static [&'static str] {
        &["portfolio"]
    }

    fn validate(&self) -> Result<(), ClientError> {
        if self.amount.is_none() {
            return Err(ClientError::Validation { field: "amount" });
        }
        if self.price.is_none() {
            return Err(ClientError::Validation { field: "price" });
        }
        Ok(())
    }
}
