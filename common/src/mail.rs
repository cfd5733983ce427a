//! The `Mail` message schema and its contract-call encoding.
//!
//! Field order is significant: it fixes both the EIP-712 type string and the
//! positional tuple layout the verifier contract expects.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, U256};
use alloy_sol_types::sol;
use serde::{Deserialize, Serialize};

sol! {
    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Person {
        string name;
        address wallet;
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Mail {
        Person from;
        Person to;
        string contents;
        uint256 nonce;
    }
}

impl Person {
    pub fn new(name: impl Into<String>, wallet: Address) -> Self {
        Self { name: name.into(), wallet }
    }

    /// `(string name, address wallet)`
    pub fn to_call_value(&self) -> DynSolValue {
        DynSolValue::Tuple(vec![
            DynSolValue::String(self.name.clone()),
            DynSolValue::Address(self.wallet),
        ])
    }
}

impl Mail {
    pub fn new(from: Person, to: Person, contents: impl Into<String>, nonce: U256) -> Self {
        Self { from, to, contents: contents.into(), nonce }
    }

    /// `((string,address) from, (string,address) to, string contents, uint256 nonce)`
    pub fn to_call_value(&self) -> DynSolValue {
        DynSolValue::Tuple(vec![
            self.from.to_call_value(),
            self.to.to_call_value(),
            DynSolValue::String(self.contents.clone()),
            DynSolValue::Uint(self.nonce, 256),
        ])
    }
}
