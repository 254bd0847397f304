//! `chaincall batch`: replay a batch of contract reads offline.
//!
//! Calls file (JSON array, `null` = no call):
//! ```json
//! [
//!   { "address": "0xa0b8...", "method": "balanceOf", "args": [{"type": "address", "value": "0xd8dA..."}] },
//!   null,
//!   { "address": "0x6b17...", "method": "symbol" }
//! ]
//! ```
//!
//! Responses file (JSON array of recorded node answers):
//! ```json
//! [ { "address": "0xa0b8...", "data": "0x70a08231...", "result": "0x...03e8" } ]
//! ```

use anyhow::{Context, Result};
use chaincall_contract::ContractCalls;
use chaincall_core::{
    abi::ContractAbi,
    call::{parse_hex, ChainCall, ContractCall, DecodedResults},
    diagnostics::CallObserver,
    source::MemoryCallSource,
    types::NormalizedValue,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct CallSpec {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub args: Vec<NormalizedValue>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseSpec {
    pub address: String,
    pub data: String,
    pub result: String,
}

/// Build descriptors from the calls file, all against one ABI.
pub fn parse_calls(abi: &Arc<dyn ContractAbi>, calls_json: &str) -> Result<Vec<Option<ContractCall>>> {
    let specs: Vec<Option<CallSpec>> =
        serde_json::from_str(calls_json).context("parse calls JSON")?;
    Ok(specs
        .into_iter()
        .map(|spec| {
            spec.map(|s| ContractCall::new(Arc::clone(abi), s.address, s.method, s.args))
        })
        .collect())
}

/// Load recorded responses into an in-memory call source.
pub fn load_responses(responses_json: &str) -> Result<MemoryCallSource> {
    let specs: Vec<ResponseSpec> =
        serde_json::from_str(responses_json).context("parse responses JSON")?;
    let source = MemoryCallSource::new();
    for (i, spec) in specs.into_iter().enumerate() {
        let data = parse_hex(&spec.data)
            .with_context(|| format!("response {i}: invalid data hex"))?;
        source.insert(ChainCall::new(spec.address, data), spec.result);
    }
    Ok(source)
}

/// Run the full encode → source → decode pipeline.
pub fn run_batch(
    abi: Arc<dyn ContractAbi>,
    calls_json: &str,
    responses_json: &str,
    observer: Option<Arc<dyn CallObserver>>,
) -> Result<DecodedResults> {
    let calls = parse_calls(&abi, calls_json)?;
    let source = load_responses(responses_json)?;

    let mut reader = ContractCalls::new(source);
    if let Some(observer) = observer {
        reader = reader.with_observer(observer);
    }
    Ok(reader.contract_calls(&calls)?)
}

pub fn print(results: &DecodedResults, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&results.to_vec())?);
        return Ok(());
    }
    for (i, slot) in results.iter().enumerate() {
        match slot {
            Some(values) => {
                let parts: Vec<_> = values.iter().map(|v| v.to_string()).collect();
                println!("  [{i}] {}", parts.join(", "));
            }
            None => println!("  [{i}] -"),
        }
    }
    Ok(())
}
