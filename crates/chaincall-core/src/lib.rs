//! # chaincall-core
//!
//! Core types and traits shared across all ChainCall crates: call
//! descriptors, encoded calls, the `ContractAbi` and `ChainCallSource`
//! seams, error types and invalid-call diagnostics.

pub mod abi;
pub mod call;
pub mod diagnostics;
pub mod error;
pub mod source;
pub mod types;

pub use abi::ContractAbi;
pub use call::{ChainCall, ContractCall, DecodedResults, RawResults, EMPTY_RESULT};
pub use diagnostics::{format_invalid_call, CallObserver, Diagnostics};
pub use error::{CallError, DecodeError, EncodeError, InvalidCall};
pub use source::{ChainCallSource, MemoryCallSource};
pub use types::NormalizedValue;
