//! TRON account addresses.
//!
//! A TRON address is the 20-byte EVM account hash prefixed with `0x41`, usually
//! rendered as base58check (`T...`). Typed-data `address` fields carry only the
//! 20-byte hash, so conversions to and from [`Address`] are lossless.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{hex, Address};
use alloy_signer_local::PrivateKeySigner;
use base58::{FromBase58, ToBase58};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Network prefix byte shared by every TRON account address.
pub const ADDRESS_PREFIX: u8 = 0x41;

const CHECKSUM_LEN: usize = 4;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TronAddress([u8; 21]);

impl TronAddress {
    pub fn from_evm(address: Address) -> Self {
        let mut bytes = [0u8; 21];
        bytes[0] = ADDRESS_PREFIX;
        bytes[1..].copy_from_slice(address.as_slice());
        Self(bytes)
    }

    pub fn from_signer(signer: &PrivateKeySigner) -> Self {
        Self::from_evm(signer.address())
    }

    /// The 20-byte account hash, as encoded in typed data and ABI arguments.
    pub fn evm(&self) -> Address {
        Address::from_slice(&self.0[1..])
    }

    pub fn to_base58(&self) -> String {
        let mut payload = self.0.to_vec();
        payload.extend_from_slice(&checksum(&self.0));
        payload.to_base58()
    }

    pub fn from_base58(input: &str) -> Result<Self> {
        let decoded = input
            .from_base58()
            .map_err(|e| invalid(input, format!("not base58: {e:?}")))?;
        if decoded.len() != 21 + CHECKSUM_LEN {
            return Err(invalid(input, format!("decoded length {} != 25", decoded.len())));
        }
        let (payload, check) = decoded.split_at(21);
        if checksum(payload).as_slice() != check {
            return Err(invalid(input, "checksum mismatch"));
        }
        Self::from_prefixed(input, payload)
    }

    fn from_prefixed(input: &str, bytes: &[u8]) -> Result<Self> {
        if bytes[0] != ADDRESS_PREFIX {
            return Err(invalid(input, format!("prefix {:#04x} != 0x41", bytes[0])));
        }
        let mut out = [0u8; 21];
        out.copy_from_slice(bytes);
        Ok(Self(out))
    }
}

fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha256::digest(Sha256::digest(payload));
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

fn invalid(input: &str, reason: impl Into<String>) -> Error {
    Error::InvalidAddress {
        input: input.to_string(),
        reason: reason.into(),
    }
}

impl FromStr for TronAddress {
    type Err = Error;

    /// Accepts base58check (`T...`), prefixed hex (`41...`) or a plain EVM
    /// address (`0x` + 40 hex chars).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with('T') {
            return Self::from_base58(s);
        }
        let bytes = hex::decode(s).map_err(|e| invalid(s, e.to_string()))?;
        match bytes.len() {
            20 => Ok(Self::from_evm(Address::from_slice(&bytes))),
            21 => Self::from_prefixed(s, &bytes),
            n => Err(invalid(s, format!("expected 20 or 21 bytes, got {n}"))),
        }
    }
}

impl From<Address> for TronAddress {
    fn from(address: Address) -> Self {
        Self::from_evm(address)
    }
}

impl From<TronAddress> for Address {
    fn from(address: TronAddress) -> Self {
        address.evm()
    }
}

impl fmt::Display for TronAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for TronAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TronAddress({})", self.to_base58())
    }
}
