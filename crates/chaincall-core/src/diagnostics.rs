//! Invalid-call diagnostics and the `CallObserver` hook.
//!
//! Every recovered failure (missing descriptor, missing address or method,
//! encoding error, empty result) is reported here exactly once: as a
//! `tracing` warning with `address`, `method` and `args` fields, and to the
//! optional observer.

use crate::call::ContractCall;
use crate::error::InvalidCall;
use crate::types::join_args;
use std::sync::Arc;
use tracing::warn;

/// Receives call-pipeline events. All methods default to no-ops.
pub trait CallObserver: Send + Sync {
    /// A call slot was dropped to `None`.
    fn on_invalid_call(&self, _call: Option<&ContractCall>, _reason: &InvalidCall) {}

    /// `count` calls were encoded successfully in one batch.
    fn on_encoded(&self, _count: usize) {}

    /// `count` results were decoded in one batch.
    fn on_decoded(&self, _count: usize) {}

    /// A batch was served from the decode memo.
    fn on_memo_hit(&self) {}
}

/// Blanket impl so closures can observe invalid calls.
impl<F: Fn(Option<&ContractCall>, &InvalidCall) + Send + Sync> CallObserver for F {
    fn on_invalid_call(&self, call: Option<&ContractCall>, reason: &InvalidCall) {
        self(call, reason)
    }
}

/// Diagnostic sink shared by the encoder and the decoder.
#[derive(Clone, Default)]
pub struct Diagnostics {
    observer: Option<Arc<dyn CallObserver>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(observer: Arc<dyn CallObserver>) -> Self {
        Self {
            observer: Some(observer),
        }
    }

    pub fn observer(&self) -> Option<&dyn CallObserver> {
        self.observer.as_deref()
    }

    /// Report a call slot that produced no usable result.
    ///
    /// The warning text comes from [`format_invalid_call`]. Fields of an
    /// absent call render as `none` (not `undefined`).
    pub fn invalid_call(&self, call: Option<&ContractCall>, reason: &InvalidCall) {
        let fields = InvalidCallFields::new(call);
        warn!(
            address = fields.address,
            method = fields.method,
            args = %fields.args,
            reason = %reason,
            "{}",
            fields
        );

        if let Some(obs) = &self.observer {
            obs.on_invalid_call(call, reason);
        }
    }

    pub fn encoded(&self, count: usize) {
        if let Some(obs) = &self.observer {
            obs.on_encoded(count);
        }
    }

    pub fn decoded(&self, count: usize) {
        if let Some(obs) = &self.observer {
            obs.on_decoded(count);
        }
    }

    pub fn memo_hit(&self) {
        if let Some(obs) = &self.observer {
            obs.on_memo_hit();
        }
    }
}

/// The warning line for an invalid call:
/// `Invalid contract call: address={address} method={method} args={args}`.
///
/// Args are comma-joined; every field of an absent call is `none`.
pub fn format_invalid_call(call: Option<&ContractCall>) -> String {
    InvalidCallFields::new(call).to_string()
}

struct InvalidCallFields<'a> {
    address: &'a str,
    method: &'a str,
    args: String,
}

impl<'a> InvalidCallFields<'a> {
    fn new(call: Option<&'a ContractCall>) -> Self {
        match call {
            Some(c) => Self {
                address: &c.address,
                method: &c.method,
                args: join_args(&c.args),
            },
            None => Self {
                address: "none",
                method: "none",
                args: "none".into(),
            },
        }
    }
}

impl std::fmt::Display for InvalidCallFields<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid contract call: address={} method={} args={}",
            self.address, self.method, self.args
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::ContractAbi;
    use crate::error::{DecodeError, EncodeError};
    use crate::types::NormalizedValue;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NoAbi;

    impl ContractAbi for NoAbi {
        fn encode_function_data(
            &self,
            method: &str,
            _args: &[NormalizedValue],
        ) -> Result<Vec<u8>, EncodeError> {
            Err(EncodeError::FunctionNotFound { name: method.into() })
        }

        fn decode_function_result(
            &self,
            method: &str,
            _data: &[u8],
        ) -> Result<Vec<NormalizedValue>, DecodeError> {
            Err(DecodeError::FunctionNotFound { name: method.into() })
        }
    }

    fn call(address: &str, method: &str, args: Vec<NormalizedValue>) -> ContractCall {
        ContractCall::new(Arc::new(NoAbi), address, method, args)
    }

    #[test]
    fn message_for_absent_call() {
        assert_eq!(
            format_invalid_call(None),
            "Invalid contract call: address=none method=none args=none"
        );
    }

    #[test]
    fn message_for_empty_address() {
        let c = call("", "balanceOf", vec![NormalizedValue::Address("0xuser".into())]);
        assert_eq!(
            format_invalid_call(Some(&c)),
            "Invalid contract call: address= method=balanceOf args=0xuser"
        );
    }

    #[test]
    fn message_joins_args_with_commas() {
        let c = call(
            "0xabc",
            "transfer",
            vec![
                NormalizedValue::Address("0xuser".into()),
                NormalizedValue::Uint(5),
                NormalizedValue::Bool(true),
            ],
        );
        assert_eq!(
            format_invalid_call(Some(&c)),
            "Invalid contract call: address=0xabc method=transfer args=0xuser,5,true"
        );
        assert_eq!(
            format_invalid_call(Some(&call("0xabc", "symbol", vec![]))),
            "Invalid contract call: address=0xabc method=symbol args="
        );
    }

    #[test]
    fn closure_observer_sees_invalid_calls() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let diag = Diagnostics::with_observer(Arc::new(
            move |call: Option<&ContractCall>, reason: &InvalidCall| {
                assert!(call.is_none());
                assert!(matches!(reason, InvalidCall::MissingCall));
                counter.fetch_add(1, Ordering::SeqCst);
            },
        ));

        diag.invalid_call(None, &InvalidCall::MissingCall);
        diag.encoded(3);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn no_observer_is_fine() {
        let diag = Diagnostics::new();
        assert!(diag.observer().is_none());
        diag.invalid_call(None, &InvalidCall::EmptyResult);
        diag.memo_hit();
    }
}
