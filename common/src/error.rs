//! Error types shared by the TIP-712 signing and verification flow.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid TRON address `{input}`: {reason}")]
    InvalidAddress { input: String, reason: String },

    #[error("unknown network `{0}` (expected `mainnet` or `nile`)")]
    UnknownNetwork(String),

    #[error("signature must be {expected} bytes, got {actual}")]
    InvalidSignatureLength { expected: usize, actual: usize },

    #[error("invalid hex: {0}")]
    Hex(#[from] alloy_primitives::hex::FromHexError),

    #[error("malformed signature: {0}")]
    MalformedSignature(#[from] alloy_primitives::SignatureError),

    #[error("signing failed: {0}")]
    Signing(#[from] alloy_signer::Error),

    #[error("ABI encoding error: {0}")]
    Abi(#[from] alloy_dyn_abi::Error),

    #[error("failed to read contract artifact {path}: {source}")]
    ArtifactIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("contract ABI has no `{0}` function")]
    MissingFunction(String),

    #[error("unexpected contract output: {0}")]
    UnexpectedOutput(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid node URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid API key header: {0}")]
    ApiKey(#[from] reqwest::header::InvalidHeaderValue),

    #[error("node rejected call: {message}")]
    Node { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
