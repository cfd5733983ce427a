//! Raw `r || s || v` signatures and recovery-id normalization.
//!
//! Signers commonly emit the recovery id as `0`/`1`, while the verifier
//! contract (and `ecrecover`) expect `27`/`28`.

use std::fmt;

use alloy_primitives::{hex, Signature};

use crate::error::{Error, Result};

pub const SIGNATURE_LEN: usize = 65;
const RECOVERY_OFFSET: usize = 64;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawSignature([u8; SIGNATURE_LEN]);

impl RawSignature {
    pub const fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; SIGNATURE_LEN] =
            bytes.try_into().map_err(|_| Error::InvalidSignatureLength {
                expected: SIGNATURE_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Parse `0x`-prefixed or bare hex.
    pub fn from_hex(input: &str) -> Result<Self> {
        Self::from_slice(&hex::decode(input.trim())?)
    }

    /// Raw layout with the parity bit as a `0`/`1` recovery id.
    pub fn from_parts(signature: &Signature) -> Self {
        let mut bytes = [0u8; SIGNATURE_LEN];
        bytes[..32].copy_from_slice(&signature.r().to_be_bytes::<32>());
        bytes[32..64].copy_from_slice(&signature.s().to_be_bytes::<32>());
        bytes[RECOVERY_OFFSET] = u8::from(signature.v());
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    pub const fn recovery_byte(&self) -> u8 {
        self.0[RECOVERY_OFFSET]
    }

    /// Rewrite a `0`/`1` recovery id to `0x1b`/`0x1c`; anything else is kept.
    pub fn normalized(mut self) -> Self {
        self.0[RECOVERY_OFFSET] = match self.0[RECOVERY_OFFSET] {
            0x00 => 0x1b,
            0x01 => 0x1c,
            v => v,
        };
        self
    }

    pub fn to_signature(&self) -> Result<Signature> {
        Ok(Signature::from_raw_array(&self.0)?)
    }

    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(self.0)
    }
}

impl fmt::Display for RawSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for RawSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawSignature({})", self.to_hex())
    }
}

/// Normalize the recovery byte of a 65-byte signature.
///
/// Fails on any other length instead of patching the wrong byte.
pub fn normalize_recovery_id(bytes: &[u8]) -> Result<[u8; SIGNATURE_LEN]> {
    Ok(RawSignature::from_slice(bytes)?.normalized().0)
}

/// Hex front-end to [`normalize_recovery_id`]: accepts an optional `0x`
/// prefix and always returns a `0x`-prefixed string.
pub fn normalize_signature_hex(signature: &str) -> Result<String> {
    Ok(RawSignature::from_hex(signature)?.normalized().to_hex())
}
