//! Error types for the ChainCall encode/decode pipeline.

use thiserror::Error;

/// Errors a `ContractAbi` can raise while building calldata.
///
/// The call encoder never lets these reach the caller: every one of them
/// becomes an invalid-call diagnostic and an empty slot in the batch.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("function '{name}' not found in ABI")]
    FunctionNotFound { name: String },

    #[error("argument count mismatch: ABI has {expected}, got {got}")]
    ArgumentCount { expected: usize, got: usize },

    #[error("invalid argument '{param}': {reason}")]
    InvalidArgument { param: String, reason: String },

    #[error("invalid ABI: {reason}")]
    InvalidAbi { reason: String },
}

/// Errors raised while decoding a raw call result.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("function '{name}' not found in ABI")]
    FunctionNotFound { name: String },

    #[error("invalid result hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("ABI decode failed: {reason}")]
    AbiDecodeFailed { reason: String },

    #[error("invalid ABI: {reason}")]
    InvalidAbi { reason: String },
}

/// Why a call slot was reported as invalid.
#[derive(Debug, Error)]
pub enum InvalidCall {
    #[error("no call descriptor")]
    MissingCall,

    #[error("missing contract address")]
    MissingAddress,

    #[error("missing method name")]
    MissingMethod,

    #[error("encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("call returned no data")]
    EmptyResult,
}

/// Errors returned from a batch of contract calls.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("decode error at index {index} ({address}.{method}): {source}")]
    Decode {
        index: usize,
        address: String,
        method: String,
        #[source]
        source: DecodeError,
    },
}

impl CallError {
    /// Index of the call slot that failed.
    pub fn index(&self) -> usize {
        match self {
            CallError::Decode { index, .. } => *index,
        }
    }
}
