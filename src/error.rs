use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("bitFlyer API error (status {status}): {body}")]
    BitflyerApi { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("insufficient samples: {have} <= period {period}")]
    InsufficientSamples { have: usize, period: usize },

    #[error("order error: {0}")]
    Order(String),
}
