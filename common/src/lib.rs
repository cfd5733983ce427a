pub mod address;
pub mod chain;
pub mod client;
pub mod contract;
pub mod domain;
pub mod error;
pub mod mail;
pub mod signature;
pub mod signing;
pub mod typed_data;

pub use address::TronAddress;
pub use chain::Network;
pub use client::TronClient;
pub use contract::{Tip712Verifier, VerifierArtifact};
pub use domain::DomainConfig;
pub use error::{Error, Result};
pub use mail::{Mail, Person};
pub use signature::{normalize_recovery_id, normalize_signature_hex, RawSignature};
pub use signing::{verify_typed_data, Tip712Signer};
