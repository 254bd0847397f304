//! `EvmContractAbi`: the `ContractAbi` implementation for EVM contracts.
//!
//! # How it works
//! - Calldata = keccak256(function_signature)[:4] ++ abi_encode_params(inputs)
//! - Return data = abi_encode_params(outputs), decoded as a parameter sequence
//! - `method` is either a bare name (first overload wins) or a full
//!   signature such as `balanceOf(address)`

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use alloy_dyn_abi::Specifier;
use alloy_json_abi::{Function, JsonAbi, Param};
use chaincall_core::{
    abi::ContractAbi,
    error::{DecodeError, EncodeError},
    types::NormalizedValue,
};
use tracing::trace;

use crate::{encoder::normalized_to_dyn_value, normalizer};

/// ABI-JSON-backed contract interface.
#[derive(Debug, Clone)]
pub struct EvmContractAbi {
    abi: JsonAbi,
}

impl EvmContractAbi {
    /// Create an interface from a standard Ethereum ABI JSON string.
    pub fn from_abi_json(abi_json: &str) -> Result<Self, EncodeError> {
        let abi: JsonAbi = serde_json::from_str(abi_json).map_err(|e| EncodeError::InvalidAbi {
            reason: format!("invalid ABI JSON: {e}"),
        })?;
        Ok(Self { abi })
    }

    pub fn from_json_abi(abi: JsonAbi) -> Self {
        Self { abi }
    }

    /// Returns all function names in this ABI.
    pub fn function_names(&self) -> Vec<&str> {
        self.abi.functions().map(|f| f.name.as_str()).collect()
    }

    /// Returns the 4-byte selector for a function name or signature.
    pub fn selector_for(&self, method: &str) -> Option<[u8; 4]> {
        self.find_function(method).map(|f| f.selector().0)
    }

    fn find_function(&self, method: &str) -> Option<&Function> {
        if method.contains('(') {
            self.abi.functions().find(|f| f.signature() == method)
        } else {
            self.abi.functions().find(|f| f.name == method)
        }
    }
}

impl ContractAbi for EvmContractAbi {
    fn encode_function_data(
        &self,
        method: &str,
        args: &[NormalizedValue],
    ) -> Result<Vec<u8>, EncodeError> {
        let func = self
            .find_function(method)
            .ok_or_else(|| EncodeError::FunctionNotFound {
                name: method.to_string(),
            })?;

        if args.len() != func.inputs.len() {
            return Err(EncodeError::ArgumentCount {
                expected: func.inputs.len(),
                got: args.len(),
            });
        }

        let mut dyn_values = Vec::with_capacity(args.len());
        for (i, (param, arg)) in func.inputs.iter().zip(args.iter()).enumerate() {
            let sol_type = param.resolve().map_err(|e| EncodeError::InvalidAbi {
                reason: format!("param {i}: {e}"),
            })?;
            let dyn_val = normalized_to_dyn_value(arg, &sol_type).map_err(|reason| {
                EncodeError::InvalidArgument {
                    param: param_label(param, i),
                    reason,
                }
            })?;
            dyn_values.push(dyn_val);
        }

        let mut calldata = func.selector().to_vec();
        calldata.extend_from_slice(&DynSolValue::Tuple(dyn_values).abi_encode_params());
        trace!("encoded {}: {} bytes", func.signature(), calldata.len());
        Ok(calldata)
    }

    fn decode_function_result(
        &self,
        method: &str,
        data: &[u8],
    ) -> Result<Vec<NormalizedValue>, DecodeError> {
        let func = self
            .find_function(method)
            .ok_or_else(|| DecodeError::FunctionNotFound {
                name: method.to_string(),
            })?;

        if func.outputs.is_empty() {
            return Ok(vec![]);
        }

        let output_types = func
            .outputs
            .iter()
            .map(|p| p.resolve())
            .collect::<Result<Vec<DynSolType>, _>>()
            .map_err(|e| DecodeError::InvalidAbi {
                reason: e.to_string(),
            })?;

        let decoded = DynSolType::Tuple(output_types)
            .abi_decode_params(data)
            .map_err(|e| DecodeError::AbiDecodeFailed {
                reason: format!("{} output decode: {e}", func.name),
            })?;

        let values = match decoded {
            DynSolValue::Tuple(vals) => vals,
            other => vec![other],
        };
        Ok(values.into_iter().map(normalizer::normalize).collect())
    }
}

fn param_label(param: &Param, index: usize) -> String {
    if param.name.is_empty() {
        format!("arg{index}")
    } else {
        param.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ERC20_ABI: &str = r#"[
        {
            "name": "balanceOf",
            "type": "function",
            "inputs": [{"name": "owner", "type": "address"}],
            "outputs": [{"name": "", "type": "uint256"}],
            "stateMutability": "view"
        },
        {
            "name": "symbol",
            "type": "function",
            "inputs": [],
            "outputs": [{"name": "", "type": "string"}],
            "stateMutability": "view"
        },
        {
            "name": "transfer",
            "type": "function",
            "inputs": [
                {"name": "to", "type": "address"},
                {"name": "amount", "type": "uint256"}
            ],
            "outputs": [{"name": "", "type": "bool"}],
            "stateMutability": "nonpayable"
        }
    ]"#;

    const HOLDER: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

    #[test]
    fn encode_balance_of() {
        let abi = EvmContractAbi::from_abi_json(ERC20_ABI).unwrap();
        let data = abi
            .encode_function_data("balanceOf", &[NormalizedValue::Address(HOLDER.into())])
            .unwrap();

        // keccak256("balanceOf(address)")[:4] = 0x70a08231
        assert_eq!(&data[..4], hex::decode("70a08231").unwrap().as_slice());
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(
            hex::encode(&data[4..]),
            "000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045"
        );
    }

    #[test]
    fn encode_by_signature() {
        let abi = EvmContractAbi::from_abi_json(ERC20_ABI).unwrap();
        let by_name = abi
            .encode_function_data("balanceOf", &[NormalizedValue::Address(HOLDER.into())])
            .unwrap();
        let by_sig = abi
            .encode_function_data(
                "balanceOf(address)",
                &[NormalizedValue::Address(HOLDER.into())],
            )
            .unwrap();
        assert_eq!(by_name, by_sig);
    }

    #[test]
    fn unknown_function_is_encode_error() {
        let abi = EvmContractAbi::from_abi_json(ERC20_ABI).unwrap();
        let err = abi.encode_function_data("mint", &[]).unwrap_err();
        assert!(matches!(err, EncodeError::FunctionNotFound { .. }));
    }

    #[test]
    fn wrong_arg_count_is_encode_error() {
        let abi = EvmContractAbi::from_abi_json(ERC20_ABI).unwrap();
        let err = abi.encode_function_data("transfer", &[NormalizedValue::Uint(1)]).unwrap_err();
        assert!(matches!(err, EncodeError::ArgumentCount { expected: 2, got: 1 }));
    }

    #[test]
    fn bad_argument_names_the_param() {
        let abi = EvmContractAbi::from_abi_json(ERC20_ABI).unwrap();
        let err = abi
            .encode_function_data("balanceOf", &[NormalizedValue::Address("0xuser".into())])
            .unwrap_err();
        match err {
            EncodeError::InvalidArgument { param, .. } => assert_eq!(param, "owner"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn decode_uint_result() {
        let abi = EvmContractAbi::from_abi_json(ERC20_ABI).unwrap();
        let data = hex::decode(
            "00000000000000000000000000000000000000000000000000000000000003e8",
        )
        .unwrap();
        let values = abi.decode_function_result("balanceOf", &data).unwrap();
        assert_eq!(values, vec![NormalizedValue::Uint(1000)]);
    }

    #[test]
    fn decode_string_result() {
        let abi = EvmContractAbi::from_abi_json(ERC20_ABI).unwrap();
        // offset 0x20, length 4, "USDC"
        let data = hex::decode(concat!(
            "0000000000000000000000000000000000000000000000000000000000000020",
            "0000000000000000000000000000000000000000000000000000000000000004",
            "5553444300000000000000000000000000000000000000000000000000000000",
        ))
        .unwrap();
        let values = abi.decode_function_result("symbol", &data).unwrap();
        assert_eq!(values, vec![NormalizedValue::Str("USDC".into())]);
    }

    #[test]
    fn truncated_result_is_decode_error() {
        let abi = EvmContractAbi::from_abi_json(ERC20_ABI).unwrap();
        let err = abi.decode_function_result("balanceOf", &[0x01]).unwrap_err();
        assert!(matches!(err, DecodeError::AbiDecodeFailed { .. }));
    }

    #[test]
    fn function_names_and_selectors() {
        let abi = EvmContractAbi::from_abi_json(ERC20_ABI).unwrap();
        let names = abi.function_names();
        assert!(names.contains(&"balanceOf"));
        assert!(names.contains(&"symbol"));
        assert_eq!(hex::encode(abi.selector_for("transfer").unwrap()), "a9059cbb");
        assert!(abi.selector_for("mint").is_none());
    }

    #[test]
    fn invalid_json_returns_error() {
        assert!(EvmContractAbi::from_abi_json("not json").is_err());
    }

    #[test]
    fn out_of_range_small_ints_are_encode_errors() {
        let abi = EvmContractAbi::from_abi_json(
            r#"[{"name":"f","type":"function","stateMutability":"view",
                "inputs":[{"name":"x","type":"uint8"},{"name":"y","type":"int8"}],
                "outputs":[]}]"#,
        )
        .unwrap();

        assert!(abi
            .encode_function_data("f", &[NormalizedValue::Uint(255), NormalizedValue::Int(-128)])
            .is_ok());

        let err = abi
            .encode_function_data("f", &[NormalizedValue::Uint(1000), NormalizedValue::Int(-1)])
            .unwrap_err();
        assert!(matches!(err, EncodeError::InvalidArgument { ref param, .. } if param == "x"));

        let err = abi
            .encode_function_data("f", &[NormalizedValue::Uint(1), NormalizedValue::Int(-1000)])
            .unwrap_err();
        assert!(matches!(err, EncodeError::InvalidArgument { ref param, .. } if param == "y"));
    }
}
