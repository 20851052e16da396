#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Failed to initialize HTTP client: {0}")]
    ClientSetup(String),

    #[error("Failed to save report to {path}: {reason}")]
    Persistence { path: String, reason: String },
}
