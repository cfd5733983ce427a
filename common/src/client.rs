//! Minimal TRON full-node HTTP client.
//!
//! The client is constructed once from configuration and passed to whatever
//! needs node access. Each call is attempted exactly once.

use alloy_primitives::{hex, Bytes};
use alloy_sol_types::{Revert, SolError};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::address::TronAddress;
use crate::error::{Error, Result};

pub const API_KEY_HEADER: &str = "TRON-PRO-API-KEY";

const TRIGGER_CONSTANT_CONTRACT: &str = "wallet/triggerconstantcontract";

#[derive(Debug, Clone)]
pub struct TronClient {
    full_host: Url,
    http: reqwest::Client,
}

/// Read-only contract invocation, addresses in base58 (`visible: true`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerConstantRequest {
    pub owner_address: String,
    pub contract_address: String,
    pub function_selector: String,
    /// Hex ABI-encoded arguments, without the 4-byte selector.
    pub parameter: String,
    pub visible: bool,
}

impl TriggerConstantRequest {
    pub fn new(
        owner: &TronAddress,
        contract: &TronAddress,
        function_selector: impl Into<String>,
        parameter: &[u8],
    ) -> Self {
        Self {
            owner_address: owner.to_base58(),
            contract_address: contract.to_base58(),
            function_selector: function_selector.into(),
            parameter: hex::encode(parameter),
            visible: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggerConstantResponse {
    #[serde(default)]
    pub result: CallResult,
    #[serde(default)]
    pub constant_result: Vec<String>,
    #[serde(default)]
    pub transaction: Option<ConstantTransaction>,
}

/// Execution outcome of the simulated transaction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConstantTransaction {
    #[serde(default)]
    pub ret: Vec<TransactionRet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionRet {
    /// `SUCCESS`, `REVERT`, `OUT_OF_ENERGY`, ...; absent on success.
    #[serde(default, rename = "ret")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallResult {
    #[serde(default)]
    pub result: bool,
    #[serde(default)]
    pub code: Option<String>,
    /// Hex-encoded UTF-8 reason when the node rejects the call.
    #[serde(default)]
    pub message: Option<String>,
}

impl TriggerConstantResponse {
    /// Return data of the call, or the node's rejection as an error.
    pub fn into_output(self) -> Result<Bytes> {
        if !self.result.result {
            return Err(Error::Node {
                message: self.result.reason(),
            });
        }
        let failure = self
            .transaction
            .iter()
            .flat_map(|tx| tx.ret.iter())
            .filter_map(|ret| ret.status.as_deref())
            .find(|status| *status != "SUCCESS")
            .map(str::to_string);
        let first = self.constant_result.into_iter().next();
        let output = first.as_deref().map(hex::decode).transpose()?.unwrap_or_default();

        if let Some(status) = failure {
            let message = match Revert::abi_decode(&output) {
                Ok(revert) => format!("{status}: {}", revert.reason),
                Err(_) => status,
            };
            return Err(Error::Node { message });
        }
        if first.is_none() {
            return Err(Error::UnexpectedOutput("empty constant_result".to_string()));
        }
        Ok(Bytes::from(output))
    }
}

impl CallResult {
    fn reason(&self) -> String {
        let message = self.message.as_deref().map(|m| {
            hex::decode(m)
                .ok()
                .and_then(|raw| String::from_utf8(raw).ok())
                .unwrap_or_else(|| m.to_string())
        });
        match (&self.code, message) {
            (Some(code), Some(message)) => format!("{code}: {message}"),
            (Some(code), None) => code.clone(),
            (None, Some(message)) => message,
            (None, None) => "call failed without a reason".to_string(),
        }
    }
}

impl TronClient {
    pub fn new(full_host: Url, api_key: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let mut value = HeaderValue::from_str(key)?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }
        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self { full_host, http })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut base = self.full_host.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join(path)?)
    }

    pub async fn trigger_constant_contract(&self, request: &TriggerConstantRequest) -> Result<Bytes> {
        let url = self.endpoint(TRIGGER_CONSTANT_CONTRACT)?;
        debug!(%url, selector = %request.function_selector, "triggerconstantcontract");
        let response: TriggerConstantResponse = self
            .http
            .post(url)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        response.into_output()
    }
}
