//! Result decoder: raw hex results → decoded values, plus the memo that
//! skips re-decoding an unchanged result set.

use chaincall_core::{
    call::{parse_hex, ContractCall, DecodedResults, RawResults, EMPTY_RESULT},
    diagnostics::Diagnostics,
    error::{CallError, DecodeError, InvalidCall},
    types::NormalizedValue,
};
use std::sync::Arc;
use tracing::debug;

/// Decode each raw result with the descriptor at the same index.
///
/// - `"0x"` → diagnostic and `None`, whatever the descriptor
/// - descriptor and result both present → `decode_function_result`
/// - either missing → `None`
///
/// A result that is present but cannot be decoded is an error, not a
/// `None`: the whole batch fails with the offending index.
pub fn decode_results(
    calls: &[Option<ContractCall>],
    results: &[Option<String>],
    diagnostics: &Diagnostics,
) -> Result<Vec<Option<Vec<NormalizedValue>>>, CallError> {
    let mut decoded = Vec::with_capacity(results.len());
    let mut count = 0usize;

    for (index, result) in results.iter().enumerate() {
        let call = calls.get(index).and_then(Option::as_ref);

        if result.as_deref() == Some(EMPTY_RESULT) {
            diagnostics.invalid_call(call, &InvalidCall::EmptyResult);
            decoded.push(None);
            continue;
        }

        let (call, raw) = match (call, result) {
            (Some(call), Some(raw)) => (call, raw),
            _ => {
                decoded.push(None);
                continue;
            }
        };

        let values = decode_one(call, raw).map_err(|source| CallError::Decode {
            index,
            address: call.address.clone(),
            method: call.method.clone(),
            source,
        })?;
        count += 1;
        decoded.push(Some(values));
    }

    diagnostics.decoded(count);
    Ok(decoded)
}

fn decode_one(call: &ContractCall, raw: &str) -> Result<Vec<NormalizedValue>, DecodeError> {
    let bytes = parse_hex(raw)?;
    call.abi.decode_function_result(&call.method, &bytes)
}

/// Caches the last decoded batch, keyed by the identity of the raw results.
///
/// The memo keeps the keyed `Arc` alive, so a later allocation can never
/// reuse its address and be mistaken for it.
#[derive(Default)]
pub struct ResultMemo {
    last: Option<(RawResults, DecodedResults)>,
}

impl ResultMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached decode for `results`, or run `decode_results` and
    /// cache it. Failed decodes are not cached.
    pub fn get_or_decode(
        &mut self,
        calls: &[Option<ContractCall>],
        results: &RawResults,
        diagnostics: &Diagnostics,
    ) -> Result<DecodedResults, CallError> {
        if let Some((key, cached)) = &self.last {
            if Arc::ptr_eq(key, results) {
                diagnostics.memo_hit();
                return Ok(Arc::clone(cached));
            }
        }

        debug!("decoding {} results", results.len());
        let decoded: DecodedResults = decode_results(calls, results, diagnostics)?.into();
        self.last = Some((Arc::clone(results), Arc::clone(&decoded)));
        Ok(decoded)
    }

    /// Drop the cached batch.
    pub fn clear(&mut self) {
        self.last = None;
    }

    pub fn is_cached(&self, results: &RawResults) -> bool {
        matches!(&self.last, Some((key, _)) if Arc::ptr_eq(key, results))
    }
}
