use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Analysis;
use crate::framework::{ClientError, RestEntity};

/// A listed company tracked by the application.
///
/// All fields are optional: the [`Default`] value is the "empty record" shown
/// on a blank create form, and the server fills in `id` on creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fundation: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Income. The misspelling is the server's column name and therefore the
    /// wire format; renaming it here would break every request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icnome: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expenses: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capitalization: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<i32>,
    /// Analyses performed on this stock (server-populated back-reference).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyses: Option<Vec<Analysis>>,
}

impl Stock {
    /// A new, not-yet-created stock with the required fields set.
    pub fn new(name: impl Into<String>, sector: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            sector: Some(sector.into()),
            ..Self::default()
        }
    }
}

impl RestEntity for Stock {
    type Id = i64;
    const RESOURCE: &'static str = "stocks";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn relation_fields() -> &'static [&'static str] {
        &["analyses"]
    }

    fn validate(&self) -> Result<(), ClientError> {
        if self.name.is_none() {
            return Err(ClientError::Validation { field: "name" });
        }
        if self.sector.is_none() {
            return Err(ClientError::Validation { field: "sector" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_fields_are_enforced() {
        assert_eq!(
            Stock::default().validate(),
            Err(ClientError::Validation { field: "name" })
        );
        let missing_sector = Stock {
            name: Some("Acme".into()),
            ..Stock::default()
        };
        assert_eq!(
            missing_sector.validate(),
            Err(ClientError::Validation { field: "sector" })
        );
        assert_eq!(Stock::new("Acme", "Industrials").validate(), Ok(()));
    }

    #[test]
    fn wire_format_matches_the_server() {
        let stock = Stock {
            id: Some(1),
            fundation: Some(NaiveDate::from_ymd_opt(1995, 3, 1).unwrap()),
            icnome: Some(1250.5),
            ..Stock::new("Acme", "Industrials")
        };
        assert_eq!(
            serde_json::to_value(&stock).unwrap(),
            json!({
                "id": 1,
                "name": "Acme",
                "sector": "Industrials",
                "fundation": "1995-03-01",
                "icnome": 1250.5,
            })
        );

        let parsed: Stock = serde_json::from_value(json!({ "id": 2, "name": "Globex" })).unwrap();
        assert_eq!(parsed.id, Some(2));
        assert_eq!(parsed.sector, None);
    }
}
