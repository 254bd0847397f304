//! # chaincall-evm
//!
//! EVM implementation of the `ContractAbi` trait, built on alloy-rs.
//! Handles Ethereum, Arbitrum, Base, Polygon, Optimism and any EVM-compatible chain.
//!
//! ## Implementation notes
//! - `alloy-json-abi` parses the contract ABI JSON
//! - `alloy-core` dyn-abi encodes arguments and decodes return data
//! - Decoded values are normalized into `chaincall_core::NormalizedValue`

pub mod abi;
pub mod encoder;
pub mod normalizer;

pub use abi::EvmContractAbi;
