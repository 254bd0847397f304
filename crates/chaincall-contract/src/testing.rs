//! Test doubles shared by the unit tests of this crate.

use chaincall_core::{
    abi::ContractAbi,
    call::ContractCall,
    diagnostics::CallObserver,
    error::{DecodeError, EncodeError, InvalidCall},
    types::NormalizedValue,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

/// ABI double: calldata is the method name's bytes, results decode as one
/// big-endian uint. Counts decode invocations.
#[derive(Default)]
pub struct MockAbi {
    decodes: AtomicUsize,
}

impl MockAbi {
    pub const FAILING_METHOD: &'static str = "explode";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn calldata_for(method: &str) -> Vec<u8> {
        method.as_bytes().to_vec()
    }

    pub fn decode_count(&self) -> usize {
        self.decodes.load(Ordering::SeqCst)
    }
}

impl ContractAbi for MockAbi {
    fn encode_function_data(
        &self,
        method: &str,
        _args: &[NormalizedValue],
    ) -> Result<Vec<u8>, EncodeError> {
        if method == Self::FAILING_METHOD {
            return Err(EncodeError::InvalidArgument {
                param: "arg0".into(),
                reason: "rejected by mock".into(),
            });
        }
        Ok(Self::calldata_for(method))
    }

    fn decode_function_result(
        &self,
        method: &str,
        data: &[u8],
    ) -> Result<Vec<NormalizedValue>, DecodeError> {
        self.decodes.fetch_add(1, Ordering::SeqCst);
        if data.len() > 16 {
            return Err(DecodeError::AbiDecodeFailed {
                reason: format!("{method}: {} bytes do not fit", data.len()),
            });
        }
        let value = data.iter().fold(0u128, |acc, b| (acc << 8) | u128::from(*b));
        Ok(vec![NormalizedValue::Uint(value)])
    }
}

#[derive(Default)]
pub struct CountingObserver {
    invalid: AtomicUsize,
    encoded: AtomicUsize,
    decoded: AtomicUsize,
    memo_hits: AtomicUsize,
    reasons: Mutex<Vec<String>>,
}

impl CountingObserver {
    pub fn invalid(&self) -> usize {
        self.invalid.load(Ordering::SeqCst)
    }

    pub fn encoded(&self) -> usize {
        self.encoded.load(Ordering::SeqCst)
    }

    pub fn decoded(&self) -> usize {
        self.decoded.load(Ordering::SeqCst)
    }

    pub fn memo_hits(&self) -> usize {
        self.memo_hits.load(Ordering::SeqCst)
    }

    pub fn reasons(&self) -> Vec<String> {
        self.reasons.lock().unwrap().clone()
    }
}

impl CallObserver for CountingObserver {
    fn on_invalid_call(&self, _call: Option<&ContractCall>, reason: &InvalidCall) {
        self.invalid.fetch_add(1, Ordering::SeqCst);
        self.reasons.lock().unwrap().push(reason.to_string());
    }

    fn on_encoded(&self, count: usize) {
        self.encoded.fetch_add(count, Ordering::SeqCst);
    }

    fn on_decoded(&self, count: usize) {
        self.decoded.fetch_add(count, Ordering::SeqCst);
    }

    fn on_memo_hit(&self) {
        self.memo_hits.fetch_add(1, Ordering::SeqCst);
    }
}
