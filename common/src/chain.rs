//! TRON networks and their TIP-712 chain identifiers.
//!
//! TIP-712 uses the lower 32 bits of the TVM `block.chainid`, so the values
//! below fit in a `u32`.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub const MAINNET_CHAIN_ID: u32 = 0x2b66_53dc;
pub const NILE_CHAIN_ID: u32 = 0xcd86_90dc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    Mainnet,
    #[default]
    Nile,
}

impl Network {
    pub const fn chain_id(self) -> u32 {
        match self {
            Network::Mainnet => MAINNET_CHAIN_ID,
            Network::Nile => NILE_CHAIN_ID,
        }
    }

    /// Chain id rendered the way TronWeb expects it in a domain (`0xcd8690dc`).
    pub fn chain_id_hex(self) -> String {
        format!("{:#010x}", self.chain_id())
    }

    pub const fn name(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Nile => "nile",
        }
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "nile" => Ok(Network::Nile),
            _ => Err(Error::UnknownNetwork(s.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_ids() {
        assert_eq!(Network::Mainnet.chain_id(), 728_126_428);
        assert_eq!(Network::Nile.chain_id(), 3_448_148_188);
        assert_eq!(Network::Nile.chain_id_hex(), "0xcd8690dc");
        assert_eq!(Network::Mainnet.chain_id_hex(), "0x2b6653dc");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("NILE".parse::<Network>().unwrap(), Network::Nile);
        assert_eq!(" Mainnet ".parse::<Network>().unwrap(), Network::Mainnet);
    }

    #[test]
    fn unknown_network_is_an_error() {
        let err = "shasta".parse::<Network>().unwrap_err();
        assert!(matches!(err, Error::UnknownNetwork(ref n) if n == "shasta"));
    }

    #[test]
    fn default_is_nile() {
        assert_eq!(Network::default(), Network::Nile);
    }
}
