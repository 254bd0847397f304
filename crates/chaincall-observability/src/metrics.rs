//! ChainCall metrics definitions.
//!
//! All metrics use OpenTelemetry conventions.
//! They can be exported via OTLP to Prometheus, Grafana, Datadog, etc.

use chaincall_core::{call::ContractCall, diagnostics::CallObserver, error::InvalidCall};
use opentelemetry::{
    metrics::{Counter, Meter},
    KeyValue,
};

/// Central metrics handle for ChainCall. Plug it into a reader with
/// `ContractCalls::with_observer`.
#[derive(Clone)]
pub struct CallMetrics {
    pub calls_encoded: Counter<u64>,
    pub invalid_calls: Counter<u64>,
    pub results_decoded: Counter<u64>,
    pub decode_cache_hits: Counter<u64>,
}

impl CallMetrics {
    pub fn new(meter: &Meter) -> Self {
        Self {
            calls_encoded: meter
                .u64_counter("chaincall.calls_encoded")
                .with_description("Contract calls successfully encoded")
                .build(),
            invalid_calls: meter
                .u64_counter("chaincall.invalid_calls")
                .with_description("Call slots dropped as invalid or empty")
                .build(),
            results_decoded: meter
                .u64_counter("chaincall.results_decoded")
                .with_description("Raw call results decoded")
                .build(),
            decode_cache_hits: meter
                .u64_counter("chaincall.decode_cache_hits")
                .with_description("Batches served from the decode memo")
                .build(),
        }
    }

    /// Metrics on the global meter provider.
    pub fn global() -> Self {
        Self::new(&opentelemetry::global::meter("chaincall"))
    }
}

fn reason_tag(reason: &InvalidCall) -> &'static str {
    match reason {
        InvalidCall::MissingCall => "missing_call",
        InvalidCall::MissingAddress => "missing_address",
        InvalidCall::MissingMethod => "missing_method",
        InvalidCall::Encode(_) => "encode_failed",
        InvalidCall::EmptyResult => "empty_result",
    }
}

impl CallObserver for CallMetrics {
    fn on_invalid_call(&self, _call: Option<&ContractCall>, reason: &InvalidCall) {
        self.invalid_calls
            .add(1, &[KeyValue::new("reason", reason_tag(reason))]);
    }

    fn on_encoded(&self, count: usize) {
        self.calls_encoded.add(count as u64, &[]);
    }

    fn on_decoded(&self, count: usize) {
        self.results_decoded.add(count as u64, &[]);
    }

    fn on_memo_hit(&self) {
        self.decode_cache_hits.add(1, &[]);
    }
}
