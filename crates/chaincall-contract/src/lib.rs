//! # chaincall-contract
//!
//! Binds typed contract reads to a shared call source.
//!
//! ## Pipeline
//! 1. `encode`: each `ContractCall` becomes a `ChainCall` or an empty slot
//!    (with an invalid-call diagnostic); never fails
//! 2. the `ChainCallSource` answers every slot, preserving order
//! 3. `decode`: raw results are decoded against their descriptors,
//!    memoized on the identity of the result set
//!
//! ## Usage
//! ```ignore
//! let mut reader = ContractCalls::new(source);
//! let balances = reader.contract_calls(&[
//!     Some(ContractCall::new(erc20.clone(), usdc, "balanceOf", vec![holder.clone()])),
//!     None,
//!     Some(ContractCall::new(erc20, dai, "balanceOf", vec![holder])),
//! ])?;
//! assert_eq!(balances.len(), 3);
//! ```

pub mod calls;
pub mod decode;
pub mod encode;
pub mod typed;

#[cfg(test)]
mod testing;

pub use calls::ContractCalls;
pub use decode::{decode_results, ResultMemo};
pub use encode::{encode_call_data, encode_calls};
pub use typed::{Contract, FromOutputs, FromValue, TypedCall, TypedContract};
