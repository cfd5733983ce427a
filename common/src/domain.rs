//! Signing domain construction.
//!
//! The domain must match the values baked into the deployed verifier contract
//! (constructor `name`/`version`, the contract's own address and the chain it
//! runs on), otherwise on-chain verification fails.

use std::borrow::Cow;

use alloy_primitives::U256;
use alloy_sol_types::Eip712Domain;

use crate::address::TronAddress;
use crate::chain::Network;

pub const DEFAULT_NAME: &str = "TRON TIP-712 Demo";
pub const DEFAULT_VERSION: &str = "1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainConfig {
    pub name: String,
    pub version: String,
    pub network: Network,
    pub verifying_contract: TronAddress,
}

impl DomainConfig {
    /// Config with the default name and version on the given network.
    pub fn new(network: Network, verifying_contract: TronAddress) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            version: DEFAULT_VERSION.to_string(),
            network,
            verifying_contract,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn build(&self) -> Eip712Domain {
        Eip712Domain::new(
            Some(Cow::Owned(self.name.clone())),
            Some(Cow::Owned(self.version.clone())),
            Some(U256::from(self.network.chain_id())),
            Some(self.verifying_contract.evm()),
            None,
        )
    }
}
