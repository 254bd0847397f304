//! Typed contract handles and typed call results.
//!
//! A `TypedContract` is a handle that knows its own ABI and address, so a
//! call only needs a method name and arguments. The contract in a
//! `TypedCall` may be absent (not deployed on this chain, not loaded yet);
//! such a call turns into an empty slot instead of an error.

use chaincall_core::{
    abi::ContractAbi,
    call::ContractCall,
    error::CallError,
    source::ChainCallSource,
    types::NormalizedValue,
};
use std::sync::Arc;
use tracing::debug;

use crate::calls::ContractCalls;

/// A contract handle: ABI plus deployed address.
pub trait TypedContract {
    fn interface(&self) -> Arc<dyn ContractAbi>;
    fn address(&self) -> &str;
}

/// A plain `(abi, address)` handle.
#[derive(Clone)]
pub struct Contract {
    abi: Arc<dyn ContractAbi>,
    address: String,
}

impl Contract {
    pub fn new(abi: Arc<dyn ContractAbi>, address: impl Into<String>) -> Self {
        Self {
            abi,
            address: address.into(),
        }
    }
}

impl TypedContract for Contract {
    fn interface(&self) -> Arc<dyn ContractAbi> {
        Arc::clone(&self.abi)
    }

    fn address(&self) -> &str {
        &self.address
    }
}

/// A call against an optional contract handle.
pub struct TypedCall<'a, C: ?Sized> {
    pub contract: Option<&'a C>,
    pub method: &'a str,
    pub args: Vec<NormalizedValue>,
}

impl<'a, C: TypedContract + ?Sized> TypedCall<'a, C> {
    pub fn new(contract: Option<&'a C>, method: &'a str, args: Vec<NormalizedValue>) -> Self {
        Self {
            contract,
            method,
            args,
        }
    }

    /// Build the generic descriptor; `None` when the contract is absent.
    pub fn to_contract_call(&self) -> Option<ContractCall> {
        self.contract.map(|contract| ContractCall {
            abi: contract.interface(),
            address: contract.address().to_string(),
            method: self.method.to_string(),
            args: self.args.clone(),
        })
    }
}

/// Conversion from a decoded output list to a Rust value.
pub trait FromOutputs: Sized {
    fn from_outputs(outputs: Vec<NormalizedValue>) -> Option<Self>;
}

/// Conversion from a single decoded value.
pub trait FromValue: Sized {
    fn from_value(value: NormalizedValue) -> Option<Self>;
}

impl FromValue for NormalizedValue {
    fn from_value(value: NormalizedValue) -> Option<Self> {
        Some(value)
    }
}

impl FromValue for bool {
    fn from_value(value: NormalizedValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for u128 {
    fn from_value(value: NormalizedValue) -> Option<Self> {
        value.as_u128()
    }
}

impl FromValue for i128 {
    fn from_value(value: NormalizedValue) -> Option<Self> {
        value.as_i128()
    }
}

impl FromValue for String {
    fn from_value(value: NormalizedValue) -> Option<Self> {
        match value {
            NormalizedValue::Str(s)
            | NormalizedValue::Address(s)
            | NormalizedValue::BigUint(s)
            | NormalizedValue::BigInt(s) => Some(s),
            _ => None,
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: NormalizedValue) -> Option<Self> {
        match value {
            NormalizedValue::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl FromOutputs for Vec<NormalizedValue> {
    fn from_outputs(outputs: Vec<NormalizedValue>) -> Option<Self> {
        Some(outputs)
    }
}

/// Single-output functions: exactly one value.
macro_rules! single_output {
    ($($ty:ty),*) => {
        $(
            impl FromOutputs for $ty {
                fn from_outputs(outputs: Vec<NormalizedValue>) -> Option<Self> {
                    let mut it = outputs.into_iter();
                    match (it.next(), it.next()) {
                        (Some(v), None) => <$ty as FromValue>::from_value(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

single_output!(NormalizedValue, bool, u128, i128, String, Vec<u8>);

impl<A: FromValue, B: FromValue> FromOutputs for (A, B) {
    fn from_outputs(outputs: Vec<NormalizedValue>) -> Option<Self> {
        let [a, b]: [NormalizedValue; 2] = outputs.try_into().ok()?;
        Some((A::from_value(a)?, B::from_value(b)?))
    }
}

impl<A: FromValue, B: FromValue, C: FromValue> FromOutputs for (A, B, C) {
    fn from_outputs(outputs: Vec<NormalizedValue>) -> Option<Self> {
        let [a, b, c]: [NormalizedValue; 3] = outputs.try_into().ok()?;
        Some((A::from_value(a)?, B::from_value(b)?, C::from_value(c)?))
    }
}

fn convert<T: FromOutputs>(method: &str, outputs: Option<Vec<NormalizedValue>>) -> Option<T> {
    let outputs = outputs?;
    let converted = T::from_outputs(outputs);
    if converted.is_none() {
        debug!(
            method,
            "decoded outputs do not match {}",
            std::any::type_name::<T>()
        );
    }
    converted
}

impl<S: ChainCallSource> ContractCalls<S> {
    /// Read one typed call.
    pub fn typed_contract_call<C, T>(&mut self, call: TypedCall<'_, C>) -> Result<Option<T>, CallError>
    where
        C: TypedContract + ?Sized,
        T: FromOutputs,
    {
        let outputs = self.contract_call(call.to_contract_call())?;
        Ok(convert(call.method, outputs))
    }

    /// Read a batch of typed calls, one slot per call.
    pub fn typed_contract_calls<C, T>(
        &mut self,
        calls: &[TypedCall<'_, C>],
    ) -> Result<Vec<Option<T>>, CallError>
    where
        C: TypedContract + ?Sized,
        T: FromOutputs,
    {
        let contract_calls: Vec<Option<ContractCall>> =
            calls.iter().map(TypedCall::to_contract_call).collect();
        let results = self.contract_calls(&contract_calls)?;
        Ok(calls
            .iter()
            .zip(results.iter())
            .map(|(call, outputs)| convert(call.method, outputs.clone()))
            .collect())
    }
}
