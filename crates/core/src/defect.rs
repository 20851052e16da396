//! Defect records produced by a run.
//!
//! Two separate taxonomies live here: [`FieldDefect`]s describe a single rule
//! violation on one product and are never fatal, while [`TransportDefect`]s
//! describe a failure to obtain the catalog at all and always carry a
//! severity.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder used as the `actual` value of a missing field.
pub const FIELD_NOT_PRESENT: &str = "Field not present";

/// One violated rule against one field of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefect {
    pub field: String,
    pub issue: String,
    pub expected: String,
    pub actual: Value,
}

impl FieldDefect {
    pub fn new(field: &str, issue: &str, expected: &str, actual: Value) -> Self {
        Self {
            field: field.to_string(),
            issue: issue.to_string(),
            expected: expected.to_string(),
            actual,
        }
    }

    /// Defect for a field that is not present on the record.
    pub fn missing(field: &str, issue: &str, expected: &str) -> Self {
        Self::new(
            field,
            issue,
            expected,
            Value::String(FIELD_NOT_PRESENT.to_string()),
        )
    }
}

/// All field defects found on a single product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDefectGroup {
    pub product_id: Value,
    pub product_title: String,
    pub defects: Vec<FieldDefect>,
}

/// Severity of a transport-level defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Classification of a failure to obtain the product collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportDefectKind {
    #[serde(rename = "Response Code")]
    ResponseCode,
    #[serde(rename = "HTTP Error")]
    HttpError,
    #[serde(rename = "Network Error")]
    NetworkError,
    #[serde(rename = "Request Error")]
    RequestError,
    #[serde(rename = "Invalid Payload")]
    InvalidPayload,
}

impl fmt::Display for TransportDefectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransportDefectKind::ResponseCode => "Response Code",
            TransportDefectKind::HttpError => "HTTP Error",
            TransportDefectKind::NetworkError => "Network Error",
            TransportDefectKind::RequestError => "Request Error",
            TransportDefectKind::InvalidPayload => "Invalid Payload",
        };
        f.write_str(label)
    }
}

/// A failure to retrieve the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportDefect {
    #[serde(rename = "type")]
    pub kind: TransportDefectKind,
    pub description: String,
    pub severity: Severity,
}

impl TransportDefect {
    /// Transport defects are always critical.
    pub fn critical(kind: TransportDefectKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            severity: Severity::Critical,
        }
    }
}

/// Any entry of the report's defect list.
///
/// Serialized untagged so each entry keeps its own shape in the persisted
/// document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Defect {
    Product(ProductDefectGroup),
    Transport(TransportDefect),
}

impl Defect {
    pub fn severity(&self) -> Option<Severity> {
        match self {
            Defect::Product(_) => None,
            Defect::Transport(defect) => Some(defect.severity),
        }
    }

    pub fn is_product(&self) -> bool {
        matches!(self, Defect::Product(_))
    }
}

impl From<ProductDefectGroup> for Defect {
    fn from(group: ProductDefectGroup) -> Self {
        Defect::Product(group)
    }
}

impl From<TransportDefect> for Defect {
    fn from(defect: TransportDefect) -> Self {
        Defect::Transport(defect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_uses_placeholder() {
        let defect = FieldDefect::missing("title", "Missing title field", "Non-empty string");
        assert_eq!(defect.actual, json!("Field not present"));
    }

    #[test]
    fn test_transport_defect_serializes_with_type_key() {
        let defect = TransportDefect::critical(
            TransportDefectKind::ResponseCode,
            "Expected 200, got 503",
        );
        let value = serde_json::to_value(&defect).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "Response Code",
                "description": "Expected 200, got 503",
                "severity": "CRITICAL"
            })
        );
    }

    #[test]
    fn test_defect_untagged_shapes() {
        let group = Defect::from(ProductDefectGroup {
            product_id: json!(4),
            product_title: "Hat".to_string(),
            defects: vec![FieldDefect::new(
                "price",
                "Negative price",
                "Non-negative number",
                json!(-2),
            )],
        });
        let value = serde_json::to_value(&group).unwrap();

        assert_eq!(value["product_id"], json!(4));
        assert_eq!(value["defects"][0]["issue"], json!("Negative price"));
        assert!(value.get("severity").is_none());
    }

    #[test]
    fn test_defect_deserializes_both_shapes() {
        let transport: Defect = serde_json::from_value(json!({
            "type": "Network Error",
            "description": "No response received from server",
            "severity": "CRITICAL"
        }))
        .unwrap();
        let product: Defect = serde_json::from_value(json!({
            "product_id": "Product_0",
            "product_title": "Unknown",
            "defects": []
        }))
        .unwrap();

        assert_eq!(transport.severity(), Some(Severity::Critical));
        assert!(product.is_product());
        assert_eq!(product.severity(), None);
    }

    #[test]
    fn test_kind_display_matches_serialized_name() {
        for kind in [
            TransportDefectKind::ResponseCode,
            TransportDefectKind::HttpError,
            TransportDefectKind::NetworkError,
            TransportDefectKind::RequestError,
            TransportDefectKind::InvalidPayload,
        ] {
            let serialized = serde_json::to_value(kind).unwrap();
            assert_eq!(serialized, json!(kind.to_string()));
        }
    }
}
