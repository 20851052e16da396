use chrono::Utc;

use catalogcheck_core::fetch::{classify_reply, FetchOutcome};
use catalogcheck_core::report::{build_report, transport_failure_report, Report};
use catalogcheck_core::validate::validate;

use crate::output::{self, OutputFormat};
use crate::persist::ReportSink;
use crate::prelude::*;
use crate::transport::Transport;

/// Settings for a single run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub endpoint: String,
    pub format: OutputFormat,
}

/// Outcome of a run.
#[derive(Debug)]
pub struct RunResult {
    /// `false` when a critical (transport) defect was recorded.
    pub ok: bool,
    pub report: Report,
    /// Whether the report reached its sink.
    pub persisted: bool,
}

/// Fetches, validates, reports and persists once.
///
/// Field defects are informative only: `ok` turns false solely on a
/// critical transport defect. A persistence failure is reported but leaves
/// `ok` untouched.
pub async fn run<T, S>(config: &RunConfig, transport: &T, sink: Option<&S>) -> Result<RunResult>
where
    T: Transport,
    S: ReportSink,
{
    let narrate = config.format == OutputFormat::Text;

    if narrate {
        output::banner("Starting API Tests for product catalog");
        output::step(&format!("Fetching data from: {}", config.endpoint));
    }

    log::info!("Fetching products from {}", config.endpoint);
    let reply = transport.get(&config.endpoint).await;

    let report = match classify_reply(reply) {
        FetchOutcome::Success { products } => {
            log::info!("Retrieved {} products", products.len());
            if narrate {
                output::passed("Response code validation: PASSED (200)");
                output::note(&format!("Retrieved {} products", products.len()));
                output::step("\nValidating product data...");
            }

            let groups = validate(&products);
            log::info!("{} products with defects", groups.len());
            if narrate {
                output::note(&format!(
                    "Data validation completed. Found {} products with defects.",
                    groups.len()
                ));
            }

            build_report(&config.endpoint, products, Vec::new(), groups, Utc::now())
        }
        FetchOutcome::Failure { defect } => {
            log::warn!("{}: {}", defect.kind, defect.description);
            if narrate {
                output::failed(&format!("{}: {}", defect.kind, defect.description));
            }

            transport_failure_report(&config.endpoint, defect, Utc::now())
        }
    };

    output::print_report(&report, config.format)?;

    let persisted = match sink {
        None => {
            log::debug!("Report persistence disabled");
            false
        }
        Some(sink) => match sink.persist(&report) {
            Ok(()) => {
                if narrate {
                    output::passed(&format!("Detailed report saved to: {}", sink.location()));
                }
                true
            }
            Err(e) => {
                log::error!("{e}");
                output::persistence_failed(&e);
                false
            }
        },
    };

    Ok(RunResult {
        ok: !report.has_critical(),
        report,
        persisted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use catalogcheck_core::defect::{Defect, TransportDefectKind};
    use catalogcheck_core::fetch::TransportReply;
    use catalogcheck_core::render::render;

    struct FakeTransport {
        reply: TransportReply,
    }

    impl FakeTransport {
        fn ok(body: &str) -> Self {
            Self {
                reply: TransportReply::Response {
                    status: 200,
                    body: body.to_string(),
                },
            }
        }
    }

    impl Transport for FakeTransport {
        async fn get(&self, _endpoint: &str) -> TransportReply {
            self.reply.clone()
        }
    }

    #[derive(Default)]
    struct MemorySink {
        saved: RefCell<Vec<Report>>,
        reject: bool,
    }

    impl ReportSink for MemorySink {
        fn persist(&self, report: &Report) -> Result<(), Error> {
            if self.reject {
                return Err(Error::Persistence {
                    path: self.location(),
                    reason: "read-only".to_string(),
                });
            }
            self.saved.borrow_mut().push(report.clone());
            Ok(())
        }

        fn location(&self) -> String {
            "memory".to_string()
        }
    }

    fn config() -> RunConfig {
        RunConfig {
            endpoint: "https://example.com/products".to_string(),
            format: OutputFormat::Text,
        }
    }

    #[tokio::test]
    async fn test_run_error_status_short_circuits() {
        let transport = FakeTransport {
            reply: TransportReply::Response {
                status: 503,
                body: "down".to_string(),
            },
        };
        let sink = MemorySink::default();

        let result = run(&config(), &transport, Some(&sink)).await.unwrap();

        assert!(!result.ok);
        assert!(result.persisted);
        assert_eq!(result.report.test_info.total_products, 0);
        assert_eq!(result.report.test_info.products_with_defects, 0);
        match &result.report.defects[..] {
            [Defect::Transport(defect)] => {
                assert_eq!(defect.kind, TransportDefectKind::ResponseCode);
                assert_eq!(defect.description, "Expected 200, got 503");
            }
            other => panic!("unexpected defects: {other:?}"),
        }
        assert_eq!(sink.saved.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_run_empty_collection_passes() {
        let sink = MemorySink::default();

        let result = run(&config(), &FakeTransport::ok("[]"), Some(&sink))
            .await
            .unwrap();

        assert!(result.ok);
        assert_eq!(result.report.test_info.total_products, 0);
        assert_eq!(result.report.test_info.products_with_defects, 0);
        assert!(render(&result.report).contains("NO DEFECTS FOUND"));
    }

    #[tokio::test]
    async fn test_run_field_defects_do_not_fail_the_run() {
        let body = r#"[
            {"id": 1, "title": "Shirt", "price": "19.99", "rating": {"rate": 4.2}},
            {"id": 2, "price": 5, "rating": {"rate": 3}},
            {"id": 3, "title": "Hat", "price": -2, "rating": {"rate": 7}}
        ]"#;
        let sink = MemorySink::default();

        let result = run(&config(), &FakeTransport::ok(body), Some(&sink))
            .await
            .unwrap();

        assert!(result.ok);
        assert_eq!(result.report.test_info.total_products, 3);
        assert_eq!(result.report.test_info.products_with_defects, 2);
        assert_eq!(sink.saved.borrow()[0], result.report);
    }

    #[tokio::test]
    async fn test_run_network_error_fails() {
        let transport = FakeTransport {
            reply: TransportReply::NoResponse {
                detail: "operation timed out".to_string(),
            },
        };

        let result = run(&config(), &transport, None::<&MemorySink>)
            .await
            .unwrap();

        assert!(!result.ok);
        assert!(!result.persisted);
        assert!(result.report.has_critical());
    }

    #[tokio::test]
    async fn test_run_persistence_failure_keeps_outcome() {
        let sink = MemorySink {
            reject: true,
            ..Default::default()
        };

        let result = run(&config(), &FakeTransport::ok("[]"), Some(&sink))
            .await
            .unwrap();

        assert!(result.ok);
        assert!(!result.persisted);
    }

    #[tokio::test]
    async fn test_run_json_format() {
        let config = RunConfig {
            format: OutputFormat::Json,
            ..config()
        };

        let result = run(&config, &FakeTransport::ok(r#"[{"title": " "}]"#), None::<&MemorySink>)
            .await
            .unwrap();

        assert!(result.ok);
        assert_eq!(result.report.test_info.products_with_defects, 1);
    }
}
