//! Call descriptors, encoded calls and result sequences.
//!
//! A `ContractCall` is the logical request ("call `method` on `address`
//! with `args`"). Encoding turns it into a `ChainCall`, the wire-ready
//! `{address, data}` pair a `ChainCallSource` executes.

use crate::abi::ContractAbi;
use crate::types::{join_args, NormalizedValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Raw result the node returns when a call produced no data.
pub const EMPTY_RESULT: &str = "0x";

/// Raw hex results, one per submitted call, in submission order.
///
/// The `Arc` allocation is the identity of a result set: a source hands out
/// the same allocation for as long as the results have not changed.
pub type RawResults = Arc<[Option<String>]>;

/// Decoded return values, one slot per submitted call.
pub type DecodedResults = Arc<[Option<Vec<NormalizedValue>>]>;

/// A logical contract read.
#[derive(Clone)]
pub struct ContractCall {
    pub abi: Arc<dyn ContractAbi>,
    /// Contract address; an empty string counts as missing
    pub address: String,
    /// Function name or full signature (e.g. `balanceOf(address)`)
    pub method: String,
    pub args: Vec<NormalizedValue>,
}

impl ContractCall {
    pub fn new(
        abi: Arc<dyn ContractAbi>,
        address: impl Into<String>,
        method: impl Into<String>,
        args: Vec<NormalizedValue>,
    ) -> Self {
        Self {
            abi,
            address: address.into(),
            method: method.into(),
            args,
        }
    }
}

impl fmt::Debug for ContractCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractCall")
            .field("address", &self.address)
            .field("method", &self.method)
            .field("args", &join_args(&self.args))
            .finish_non_exhaustive()
    }
}

/// An encoded call: target address plus ABI calldata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainCall {
    pub address: String,
    #[serde(with = "hex_data")]
    pub data: Vec<u8>,
}

impl ChainCall {
    pub fn new(address: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            address: address.into(),
            data,
        }
    }

    /// Calldata as a `0x`-prefixed hex string.
    pub fn data_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.data))
    }
}

/// Parse a `0x`-prefixed (or bare) hex string into bytes.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s))
}

/// Serde adapter: `Vec<u8>` as a `0x`-prefixed hex string.
mod hex_data {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("0x{}", hex::encode(data)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        super::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}
