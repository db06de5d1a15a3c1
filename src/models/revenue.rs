//! Revenue records, read for the client purchase history.

use serde::{Deserialize, Serialize};

use super::impl_entity;

/// Amount as stored upstream: either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Numeric value; unparseable text counts as zero.
    pub fn value(&self) -> f64 {
        match self {
            Amount::Number(n) => *n,
            Amount::Text(s) => s.trim().parse().unwrap_or(0.0),
        }
    }
}

/// A sale attributed to a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revenue {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub reference_number: String,
    #[serde(default)]
    pub revenue_date_string: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub total_amount: Option<Amount>,
    #[serde(default = "super::default_active")]
    pub active: bool,
    #[serde(default)]
    pub date_created: String,
}

impl_entity!(Revenue, "revenue", "Revenue");

impl Revenue {
    pub fn amount(&self) -> f64 {
        self.total_amount.as_ref().map(Amount::value).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_accepts_number_or_string() {
        let a: Revenue = serde_json::from_str(r#"{"totalAmount": 150.5}"#).unwrap();
        let b: Revenue = serde_json::from_str(r#"{"totalAmount": "99.50"}"#).unwrap();
        let c: Revenue = serde_json::from_str(r#"{"totalAmount": "n/a"}"#).unwrap();
        let d: Revenue = serde_json::from_str(r#"{}"#).unwrap();

        assert_eq!(a.amount(), 150.5);
        assert_eq!(b.amount(), 99.5);
        assert_eq!(c.amount(), 0.0);
        assert_eq!(d.amount(), 0.0);
    }
}
