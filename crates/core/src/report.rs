//! Report assembly.
//!
//! The builder only shapes and counts; every judgement has already been made
//! by the fetch classifier and the validator.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::defect::{Defect, ProductDefectGroup, Severity, TransportDefect};
use crate::product::RawProduct;

/// Summary block of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestInfo {
    pub date: String,
    pub endpoint: String,
    pub total_products: usize,
    pub products_with_defects: usize,
}

/// The full output document of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub test_info: TestInfo,
    pub defects: Vec<Defect>,
    pub all_products: Vec<Value>,
}

impl Report {
    /// Whether any defect carries critical severity.
    pub fn has_critical(&self) -> bool {
        self.defects
            .iter()
            .any(|defect| defect.severity() == Some(Severity::Critical))
    }

    pub fn products_without_defects(&self) -> usize {
        self.test_info
            .total_products
            .saturating_sub(self.test_info.products_with_defects)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Combines fetch-level and per-product defects into a report.
///
/// Transport defects come first, followed by product groups in the order
/// the validator produced them.
pub fn build_report(
    endpoint: &str,
    products: Vec<RawProduct>,
    transport_defects: Vec<TransportDefect>,
    groups: Vec<ProductDefectGroup>,
    date: DateTime<Utc>,
) -> Report {
    let products_with_defects = groups.len();
    let all_products: Vec<Value> = products.into_iter().map(RawProduct::into_value).collect();

    let defects = transport_defects
        .into_iter()
        .map(Defect::from)
        .chain(groups.into_iter().map(Defect::from))
        .collect();

    Report {
        test_info: TestInfo {
            date: format_date(date),
            endpoint: endpoint.to_string(),
            total_products: all_products.len(),
            products_with_defects,
        },
        defects,
        all_products,
    }
}

/// Report for a run that never obtained a product collection.
pub fn transport_failure_report(
    endpoint: &str,
    defect: TransportDefect,
    date: DateTime<Utc>,
) -> Report {
    build_report(endpoint, Vec::new(), vec![defect], Vec::new(), date)
}

/// RFC 3339 UTC timestamp with millisecond precision.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}
