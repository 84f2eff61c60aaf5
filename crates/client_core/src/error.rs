use thiserror::Error;

/// Any failure of a single gateway round trip.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid inventory endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("inventory request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("inventory endpoint responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed inventory payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("{0}")]
    Validation(String),
    #[error("no unused item id is left in this session")]
    IdsExhausted,
    #[error(transparent)]
    Transport(#[from] TransportError),
}
