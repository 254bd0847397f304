//! `ContractCalls`: encode, delegate to a call source, decode.
//!
//! One `ContractCalls` plays the part of one reactive subscription: it is
//! re-evaluated on every redraw or poll and only re-decodes when the call
//! source hands back a different result set.

use chaincall_core::{
    call::{ContractCall, DecodedResults},
    diagnostics::{CallObserver, Diagnostics},
    error::CallError,
    source::ChainCallSource,
    types::NormalizedValue,
};
use std::sync::Arc;

use crate::{decode::ResultMemo, encode::encode_calls};

/// Batch contract reader bound to a call source.
pub struct ContractCalls<S> {
    source: S,
    memo: ResultMemo,
    diagnostics: Diagnostics,
}

impl<S: ChainCallSource> ContractCalls<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            memo: ResultMemo::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Attach an observer for invalid calls, encode/decode counts and memo hits.
    pub fn with_observer(mut self, observer: Arc<dyn CallObserver>) -> Self {
        self.diagnostics = Diagnostics::with_observer(observer);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Read a batch of calls. The output has one slot per input call;
    /// invalid or unanswered calls are `None`.
    pub fn contract_calls(
        &mut self,
        calls: &[Option<ContractCall>],
    ) -> Result<DecodedResults, CallError> {
        let encoded = encode_calls(calls, &self.diagnostics);
        let results = self.source.chain_calls(&encoded);
        debug_assert_eq!(results.len(), calls.len(), "call source broke alignment");
        self.memo.get_or_decode(calls, &results, &self.diagnostics)
    }

    /// Read a single call.
    pub fn contract_call(
        &mut self,
        call: Option<ContractCall>,
    ) -> Result<Option<Vec<NormalizedValue>>, CallError> {
        let results = self.contract_calls(&[call])?;
        Ok(results.first().cloned().flatten())
    }

    /// Forget the memoized batch so the next read decodes again.
    pub fn reset(&mut self) {
        self.memo.clear();
    }
}
