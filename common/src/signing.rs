use alloy_dyn_abi::TypedData;
use alloy_primitives::{Address, B256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::{Eip712Domain, SolStruct};
use tracing::debug;

use crate::address::TronAddress;
use crate::error::Result;
use crate::mail::Mail;
use crate::signature::RawSignature;

/// Signs typed data with a locally held secp256k1 key.
#[derive(Clone, Debug)]
pub struct Tip712Signer {
    signer: PrivateKeySigner,
}

impl Tip712Signer {
    pub fn new(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn tron_address(&self) -> TronAddress {
        TronAddress::from_signer(&self.signer)
    }

    /// Sign `mail` under `domain`.
    ///
    /// The returned signature carries the recovery id as `0`/`1`; run it
    /// through [`RawSignature::normalized`] before handing it to a contract.
    pub fn sign_mail(&self, domain: &Eip712Domain, mail: &Mail) -> Result<RawSignature> {
        let hash = mail.eip712_signing_hash(domain);
        debug!("Signing hash: {hash}");
        self.sign_hash(&hash)
    }

    pub fn sign_hash(&self, hash: &B256) -> Result<RawSignature> {
        let signature = self.signer.sign_hash_sync(hash)?;
        Ok(RawSignature::from_parts(&signature))
    }
}

/// Verify a typed-data signature against an expected signer address.
/// - `typed_data`: domain, types and message; the digest is recomputed from it
/// - `signature`: 65-byte r||s||v (v = 0/1 or 27/28 are both accepted)
/// - `expected`: the address you expect as the signer
///
/// A well-formed signature from a different key yields `Ok(false)`.
pub fn verify_typed_data(
    typed_data: &TypedData,
    signature: &RawSignature,
    expected: Address,
) -> Result<bool> {
    let prehash = typed_data.eip712_signing_hash()?;
    verify_prehash(&prehash, signature, expected)
}

/// Recover the signer of a 32-byte prehash and compare.
fn verify_prehash(prehash: &B256, signature: &RawSignature, expected: Address) -> Result<bool> {
    let recovered = signature.to_signature()?.recover_address_from_prehash(prehash)?;
    if recovered != expected {
        debug!("Recovered address {recovered:#x} does not match expected address {expected:#x}");
        return Ok(false);
    }
    Ok(true)
}
