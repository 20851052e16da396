//! Core library for catalogcheck
//!
//! This crate implements the **Functional Core** of the catalogcheck
//! application, following the Functional Core - Imperative Shell
//! architectural pattern.
//!
//! - **`catalogcheck_core`** (this crate): Pure transformation functions with zero I/O
//! - **`catalogcheck`**: HTTP transport, persistence, console output and orchestration
//!
//! Everything here can be exercised with fixture data: the shell hands over
//! what the transport observed and the current time, and gets back plain
//! values describing the run.
//!
//! # Module Organization
//!
//! - [`product`]: Untyped product records, presence checks and numeric coercion
//! - [`defect`]: Field and transport defect records
//! - [`validate`]: Per-record validation rules
//! - [`fetch`]: Classification of transport replies into fetch outcomes
//! - [`report`]: Report assembly and summary counts
//! - [`render`]: Human-readable report layout
//!
//! # Example Usage
//!
//! ```rust
//! use catalogcheck_core::fetch::{classify_reply, FetchOutcome, TransportReply};
//! use catalogcheck_core::report::build_report;
//! use catalogcheck_core::validate::validate;
//!
//! let outcome = classify_reply(TransportReply::Response {
//!     status: 200,
//!     body: r#"[{"title": "Shirt", "price": "19.99", "rating": {"rate": 4.2}}]"#.to_string(),
//! });
//!
//! let FetchOutcome::Success { products } = outcome else {
//!     panic!("fixture should classify as success");
//! };
//!
//! let groups = validate(&products);
//! let report = build_report("fixture", products, vec![], groups, chrono::Utc::now());
//!
//! assert_eq!(report.test_info.total_products, 1);
//! assert_eq!(report.test_info.products_with_defects, 0);
//! ```

pub mod defect;
pub mod fetch;
pub mod product;
pub mod render;
pub mod report;
pub mod validate;
