//! The `ChainCallSource` trait and an in-memory implementation.
//!
//! A call source executes encoded calls against a node. Batching,
//! deduplication, per-block caching and transport are all its concern;
//! the contract layer only relies on the ordering and identity contract
//! documented on the trait.

use crate::call::{ChainCall, RawResults};
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock},
};
use tracing::debug;

/// Executes encoded calls and reports their raw results.
pub trait ChainCallSource {
    /// Return one raw result per entry of `calls`, in the same order.
    ///
    /// `None` entries must map to `None`. A result may also be `None` while
    /// the call has not been answered yet. Implementations should return
    /// the same `Arc` allocation while nothing has changed, since consumers
    /// memoize decoding on it.
    fn chain_calls(&self, calls: &[Option<ChainCall>]) -> RawResults;
}

impl<S: ChainCallSource + ?Sized> ChainCallSource for Arc<S> {
    fn chain_calls(&self, calls: &[Option<ChainCall>]) -> RawResults {
        (**self).chain_calls(calls)
    }
}

impl<S: ChainCallSource + ?Sized> ChainCallSource for &S {
    fn chain_calls(&self, calls: &[Option<ChainCall>]) -> RawResults {
        (**self).chain_calls(calls)
    }
}

struct Inner {
    block: u64,
    /// Encoded call → raw hex result
    responses: HashMap<ChainCall, String>,
    /// Last request and the results handed out for it during this block
    last: Option<(Vec<Option<ChainCall>>, RawResults)>,
}

/// In-memory call source backed by a fixed response table.
///
/// Results handed out for a request stay identical (same `Arc`) until the
/// request changes or `advance_block` is called, mirroring a source that
/// caches per block. Suitable for tests and offline CLI replay.
#[derive(Clone)]
pub struct MemoryCallSource {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryCallSource {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                block: 0,
                responses: HashMap::new(),
                last: None,
            })),
        }
    }

    /// Register the raw result for an encoded call. Takes effect for the
    /// next request that differs from the last one, or after the next
    /// `advance_block`.
    pub fn insert(&self, call: ChainCall, result: impl Into<String>) {
        let mut inner = self.inner.write().expect("lock poisoned");
        inner.responses.insert(call, result.into());
    }

    /// Remove a registered result.
    pub fn remove(&self, call: &ChainCall) -> Option<String> {
        let mut inner = self.inner.write().expect("lock poisoned");
        inner.responses.remove(call)
    }

    /// Move to a new block, dropping the results cached for the old one.
    pub fn advance_block(&self, block: u64) {
        let mut inner = self.inner.write().expect("lock poisoned");
        inner.block = block;
        inner.last = None;
        debug!("MemoryCallSource: advanced to block {}", block);
    }

    pub fn block_number(&self) -> u64 {
        self.inner.read().expect("lock poisoned").block
    }

    /// Number of registered responses.
    pub fn len(&self) -> usize {
        self.inner.read().expect("lock poisoned").responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for MemoryCallSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCallSource")
            .field("block", &self.block_number())
            .field("responses", &self.len())
            .finish_non_exhaustive()
    }
}

impl Default for MemoryCallSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainCallSource for MemoryCallSource {
    fn chain_calls(&self, calls: &[Option<ChainCall>]) -> RawResults {
        {
            let inner = self.inner.read().expect("lock poisoned");
            if let Some((last_calls, results)) = &inner.last {
                if last_calls.as_slice() == calls {
                    return Arc::clone(results);
                }
            }
        }

        let mut inner = self.inner.write().expect("lock poisoned");
        let results: RawResults = calls
            .iter()
            .map(|call| {
                call.as_ref()
                    .and_then(|c| inner.responses.get(c).cloned())
            })
            .collect();
        debug!(
            "MemoryCallSource: answered {} calls at block {}",
            calls.len(),
            inner.block
        );
        inner.last = Some((calls.to_vec(), Arc::clone(&results)));
        results
    }
}
