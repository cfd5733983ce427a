//! Shared configuration for the TIP-712 command line tools.

use std::time::{SystemTime, UNIX_EPOCH};

use alloy_primitives::U256;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser};
use tip712_common::domain::{DEFAULT_NAME, DEFAULT_VERSION};
use tip712_common::{DomainConfig, Network, TronAddress};
use tracing::debug;

/// Domain fields that must match the verifier contract's constructor arguments.
#[derive(Args, Debug, Clone)]
pub struct DomainArgs {
    /// Network whose chain id is bound into the domain (`mainnet` or `nile`).
    #[clap(long, env, default_value = "nile")]
    pub network: Network,

    /// Domain name.
    #[clap(long, env, default_value = DEFAULT_NAME)]
    pub name: String,

    /// Domain version.
    #[clap(
        id = "domain_version",
        long = "domain-version",
        env = "VERSION",
        default_value = DEFAULT_VERSION
    )]
    pub version: String,
}

impl DomainArgs {
    pub fn config(&self, verifying_contract: TronAddress) -> DomainConfig {
        DomainConfig::new(self.network, verifying_contract)
            .with_name(self.name.clone())
            .with_version(self.version.clone())
    }
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Load environment variables from `.env` if present.
pub fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment variables from {:?}", path),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => bail!("failed to load .env file: {}", e),
    }
    Ok(())
}

/// Parse command line and environment into `T`.
///
/// `--help` and `--version` print and exit 0 as usual; every other parse
/// failure is returned so the process exits with status 1.
pub fn parse_args<T: Parser>() -> Result<T> {
    match T::try_parse() {
        Ok(args) => Ok(args),
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => Err(e.into()),
    }
}

/// Explicit nonce, or the current Unix time in milliseconds.
pub fn nonce_or_now(nonce: Option<U256>) -> Result<U256> {
    if let Some(nonce) = nonce {
        return Ok(nonce);
    }
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?
        .as_millis();
    Ok(U256::from(millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use clap::CommandFactory;

    #[derive(Parser, Debug)]
    #[clap(version)]
    struct Cli {
        #[clap(flatten)]
        domain: DomainArgs,
    }

    #[test]
    fn domain_args_coexist_with_version_flag() {
        Cli::command().debug_assert();
        let err = Cli::try_parse_from(["test", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        assert!(!err.use_stderr());
    }

    #[test]
    fn domain_defaults() {
        let cli = Cli::try_parse_from(["test"]).unwrap();
        assert_eq!(cli.domain.network, Network::Nile);
        assert_eq!(cli.domain.name, DEFAULT_NAME);
        assert_eq!(cli.domain.version, DEFAULT_VERSION);
    }

    #[test]
    fn unknown_network_is_rejected_at_parse_time() {
        assert!(Cli::try_parse_from(["test", "--network", "shasta"]).is_err());
    }

    #[test]
    fn overrides_flow_into_domain_config() {
        let cli = Cli::try_parse_from([
            "test",
            "--network",
            "mainnet",
            "--name",
            "Mail App",
            "--domain-version",
            "2",
        ])
        .unwrap();
        let contract = TronAddress::from_evm(Address::repeat_byte(0x01));
        let config = cli.domain.config(contract);
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.name, "Mail App");
        assert_eq!(config.version, "2");
        assert_eq!(config.verifying_contract, contract);
    }

    #[test]
    fn explicit_nonce_wins() {
        assert_eq!(nonce_or_now(Some(U256::from(42))).unwrap(), U256::from(42));
        assert_eq!(nonce_or_now(Some(U256::MAX)).unwrap(), U256::MAX);
        assert!(nonce_or_now(None).unwrap() > U256::from(1_700_000_000_000_u64));
    }
}
