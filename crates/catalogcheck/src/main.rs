use std::path::PathBuf;
use std::process;
use std::time::Duration;

use crate::prelude::{eprintln, *};
use clap::Parser;

mod error;
mod output;
mod persist;
mod prelude;
mod run;
mod transport;

use crate::output::OutputFormat;
use crate::persist::{FileSink, DEFAULT_REPORT_PATH};
use crate::run::RunConfig;
use crate::transport::{HttpTransport, DEFAULT_TIMEOUT};

const DEFAULT_ENDPOINT: &str = "https://fakestoreapi.com/products";

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Fetches a product catalog, validates every record and reports the defects found"
)]
pub struct App {
    /// Product catalog endpoint (must return a JSON array of products)
    #[arg(default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Where to save the JSON report
    #[arg(short, long, default_value = DEFAULT_REPORT_PATH)]
    output: PathBuf,

    /// Request timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// Print the report as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Do not save the report to disk
    #[arg(long)]
    no_save: bool,

    /// Whether to display additional information.
    #[arg(long, default_value = "false")]
    verbose: bool,
}

impl App {
    fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Effective settings shown by `--verbose`.
    fn settings(&self) -> Vec<String> {
        let report_file = if self.no_save {
            "(disabled)".to_string()
        } else {
            self.output.display().to_string()
        };

        vec![
            format!("Endpoint: {}", self.endpoint),
            format!("Timeout: {}s", self.timeout),
            format!("Report file: {report_file}"),
        ]
    }
}

async fn execute(app: App) -> Result<bool> {
    // Settings go to stderr; stdout carries only the report under `--json`.
    if app.verbose {
        for line in app.settings() {
            eprintln!("{line}");
        }
        eprintln!();
    }

    let transport = HttpTransport::new(Duration::from_secs(app.timeout))?;
    let sink = FileSink::new(&app.output);
    let config = RunConfig {
        endpoint: app.endpoint.clone(),
        format: app.format(),
    };

    let result = run::run(&config, &transport, (!app.no_save).then_some(&sink)).await?;

    if config.format == OutputFormat::Text {
        output::outcome(result.ok);
    }

    Ok(result.ok)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match execute(app).await {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(err) => {
            output::unexpected(&err);
            process::exit(1);
        }
    }
}
