//! Call encoder: `ContractCall` → `ChainCall`.
//!
//! Encoding never fails. A slot that cannot be encoded is reported through
//! `Diagnostics` and becomes `None`, so the encoded batch always lines up
//! index-for-index with the descriptors it came from.

use chaincall_core::{
    call::{ChainCall, ContractCall},
    diagnostics::Diagnostics,
    error::InvalidCall,
};

/// Check a descriptor and build its calldata.
fn try_encode(call: Option<&ContractCall>) -> Result<ChainCall, InvalidCall> {
    let call = call.ok_or(InvalidCall::MissingCall)?;
    if call.address.is_empty() {
        return Err(InvalidCall::MissingAddress);
    }
    if call.method.is_empty() {
        return Err(InvalidCall::MissingMethod);
    }
    let data = call.abi.encode_function_data(&call.method, &call.args)?;
    Ok(ChainCall::new(call.address.clone(), data))
}

/// Encode a single descriptor, or report it and return `None`.
pub fn encode_call_data(call: Option<&ContractCall>, diagnostics: &Diagnostics) -> Option<ChainCall> {
    match try_encode(call) {
        Ok(encoded) => Some(encoded),
        Err(reason) => {
            diagnostics.invalid_call(call, &reason);
            None
        }
    }
}

/// Encode a batch of descriptors. The output has exactly one entry per input.
pub fn encode_calls(calls: &[Option<ContractCall>], diagnostics: &Diagnostics) -> Vec<Option<ChainCall>> {
    let encoded: Vec<Option<ChainCall>> = calls
        .iter()
        .map(|call| encode_call_data(call.as_ref(), diagnostics))
        .collect();
    diagnostics.encoded(encoded.iter().filter(|c| c.is_some()).count());
    encoded
}
