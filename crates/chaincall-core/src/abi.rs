//! The `ContractAbi` capability trait.
//!
//! Anything that can encode a call by method name and decode its return
//! data can back a `ContractCall`. The EVM implementation lives in
//! `chaincall-evm`; tests use small hand-written doubles.

use crate::error::{DecodeError, EncodeError};
use crate::types::NormalizedValue;

/// Encodes function calls and decodes their results by method name.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so one ABI can be shared as
/// `Arc<dyn ContractAbi>` by every call built against it.
pub trait ContractAbi: Send + Sync {
    /// Build calldata (selector + encoded arguments) for `method`.
    fn encode_function_data(
        &self,
        method: &str,
        args: &[NormalizedValue],
    ) -> Result<Vec<u8>, EncodeError>;

    /// Decode the raw return data of `method` into its output values,
    /// in declaration order.
    fn decode_function_result(
        &self,
        method: &str,
        data: &[u8],
    ) -> Result<Vec<NormalizedValue>, DecodeError>;
}
