//! Read-only access to a deployed `Tip712Verifier` contract.

use std::fs;
use std::path::Path;

use alloy_dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy_json_abi::{Function, JsonAbi};
use serde::Deserialize;
use tracing::{debug, info};

use crate::address::TronAddress;
use crate::client::{TriggerConstantRequest, TronClient};
use crate::error::{Error, Result};
use crate::mail::Mail;
use crate::signature::RawSignature;

/// Build output location, relative to the working directory.
pub const DEFAULT_ARTIFACT_PATH: &str = "build/contracts/Tip712Verifier.json";

const VERIFY: &str = "verify";

/// Compiled contract artifact; only the ABI is needed.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifierArtifact {
    pub abi: JsonAbi,
}

impl VerifierArtifact {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| Error::ArtifactIo {
            path: path.display().to_string(),
            source,
        })?;
        let artifact: Self = serde_json::from_str(&raw)?;
        debug!("Loaded ABI with {} functions from {}", artifact.abi.functions().count(), path.display());
        Ok(artifact)
    }
}

pub struct Tip712Verifier<'a> {
    client: &'a TronClient,
    address: TronAddress,
    verify: Function,
}

impl<'a> Tip712Verifier<'a> {
    pub fn new(client: &'a TronClient, address: TronAddress, abi: &JsonAbi) -> Result<Self> {
        let verify = abi
            .function(VERIFY)
            .and_then(|overloads| overloads.first())
            .cloned()
            .ok_or_else(|| Error::MissingFunction(VERIFY.to_string()))?;
        Ok(Self {
            client,
            address,
            verify,
        })
    }

    /// Canonical selector text, e.g.
    /// `verify(((string,address),(string,address),string,uint256),address,bytes)`.
    pub fn function_selector(&self) -> String {
        self.verify.signature()
    }

    /// ABI-encode `verify(mail, signer, signature)` arguments without the selector.
    pub fn encode_arguments(
        &self,
        mail: &Mail,
        signer: &TronAddress,
        signature: &RawSignature,
    ) -> Result<Vec<u8>> {
        let args = [
            mail.to_call_value(),
            DynSolValue::Address(signer.evm()),
            DynSolValue::Bytes(signature.as_bytes().to_vec()),
        ];
        Ok(self.verify.abi_encode_input_raw(&args)?)
    }

    pub fn decode_result(&self, output: &[u8]) -> Result<bool> {
        if output.is_empty() || output.len() % 32 != 0 {
            return Err(Error::UnexpectedOutput(format!(
                "{} bytes is not a whole number of ABI words",
                output.len()
            )));
        }
        let values = self.verify.abi_decode_output(output)?;
        match values.as_slice() {
            [DynSolValue::Bool(ok)] => Ok(*ok),
            other => Err(Error::UnexpectedOutput(format!("{other:?}"))),
        }
    }

    /// Ask the contract whether `signature` by `signer` covers `mail`, as a
    /// constant call from `owner`.
    pub async fn verify(
        &self,
        owner: &TronAddress,
        mail: &Mail,
        signer: &TronAddress,
        signature: &RawSignature,
    ) -> Result<bool> {
        let parameter = self.encode_arguments(mail, signer, signature)?;
        let request =
            TriggerConstantRequest::new(owner, &self.address, self.function_selector(), &parameter);
        info!("Calling {}.verify", self.address);
        let output = self.client.trigger_constant_contract(&request).await?;
        self.decode_result(&output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::Person;
    use alloy_dyn_abi::DynSolType;
    use alloy_primitives::{Address, U256};
    use alloy_sol_types::{Revert, SolError};

    const ARTIFACT: &str = include_str!("../tests/fixtures/Tip712Verifier.json");

    fn abi() -> JsonAbi {
        serde_json::from_str::<VerifierArtifact>(ARTIFACT).unwrap().abi
    }

    fn client() -> TronClient {
        TronClient::new("http://127.0.0.1:1".parse().unwrap(), None).unwrap()
    }

    #[test]
    fn selector_expands_structs() {
        let client = client();
        let verifier = Tip712Verifier::new(&client, TronAddress::from_evm(Address::ZERO), &abi()).unwrap();
        assert_eq!(
            verifier.function_selector(),
            "verify(((string,address),(string,address),string,uint256),address,bytes)"
        );
    }

    #[test]
    fn missing_verify_function_is_an_error() {
        let client = client();
        let abi: JsonAbi = serde_json::from_str("[]").unwrap();
        let err = Tip712Verifier::new(&client, TronAddress::from_evm(Address::ZERO), &abi)
            .err()
            .unwrap();
        assert!(matches!(err, Error::MissingFunction(ref f) if f == "verify"));
    }

    #[test]
    fn arguments_decode_back_to_the_same_values() {
        let client = client();
        let verifier = Tip712Verifier::new(&client, TronAddress::from_evm(Address::ZERO), &abi()).unwrap();
        let wallet = Address::repeat_byte(0x33);
        let mail = Mail::new(
            Person::new("Cow", wallet),
            Person::new("Bob", wallet),
            "Hello TIP-712 on TRON!",
            U256::from(99),
        );
        let signature = RawSignature::from_bytes([0x11; 65]);

        let encoded = verifier
            .encode_arguments(&mail, &TronAddress::from_evm(wallet), &signature)
            .unwrap();

        let ty: DynSolType =
            "(((string,address),(string,address),string,uint256),address,bytes)".parse().unwrap();
        let decoded = ty.abi_decode_params(&encoded).unwrap();
        assert_eq!(
            decoded,
            DynSolValue::Tuple(vec![
                mail.to_call_value(),
                DynSolValue::Address(wallet),
                DynSolValue::Bytes(vec![0x11; 65]),
            ])
        );
    }

    #[test]
    fn decodes_boolean_result() {
        let client = client();
        let verifier = Tip712Verifier::new(&client, TronAddress::from_evm(Address::ZERO), &abi()).unwrap();
        let mut word = [0u8; 32];
        assert!(!verifier.decode_result(&word).unwrap());
        word[31] = 1;
        assert!(verifier.decode_result(&word).unwrap());
        assert!(verifier.decode_result(&[]).is_err());
    }

    #[test]
    fn rejects_output_that_is_not_word_aligned() {
        let client = client();
        let verifier = Tip712Verifier::new(&client, TronAddress::from_evm(Address::ZERO), &abi()).unwrap();
        let revert = Revert { reason: "bad".to_string() }.abi_encode();
        assert_ne!(revert.len() % 32, 0);
        assert!(matches!(verifier.decode_result(&revert), Err(Error::UnexpectedOutput(_))));
    }

    #[test]
    fn artifact_requires_abi_field() {
        let dir = std::env::temp_dir().join(format!("tip712-artifact-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let good = dir.join("Tip712Verifier.json");
        fs::write(&good, ARTIFACT).unwrap();
        let artifact = VerifierArtifact::load(&good).unwrap();
        assert!(artifact.abi.function("verify").is_some());

        let bad = dir.join("NoAbi.json");
        fs::write(&bad, r#"{"contractName":"Tip712Verifier"}"#).unwrap();
        assert!(matches!(VerifierArtifact::load(&bad), Err(Error::Json(_))));

        let missing = dir.join("missing.json");
        assert!(matches!(VerifierArtifact::load(&missing), Err(Error::ArtifactIo { .. })));

        fs::remove_dir_all(&dir).unwrap();
    }
}
