//! ERC-20 reads through the full pipeline: `EvmContractAbi` encodes the
//! calls, `MemoryCallSource` plays the node, `ContractCalls` decodes.

use chaincall_contract::{Contract, ContractCalls, TypedCall};
use chaincall_core::{
    abi::ContractAbi,
    call::{ChainCall, ContractCall},
    source::MemoryCallSource,
    types::NormalizedValue,
};
use chaincall_evm::EvmContractAbi;
use std::sync::Arc;

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
        "name": "decimals",
        "type": "function",
        "inputs": [],
        "outputs": [{"name": "", "type": "uint8"}],
        "stateMutability": "view"
    }
]"#;

const USDC: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
const DAI: &str = "0x6b175474e89094c44da98b954eedeac495271d0f";
const HOLDER: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

fn erc20() -> Arc<EvmContractAbi> {
    Arc::new(EvmContractAbi::from_abi_json(ERC20_ABI).unwrap())
}

fn word(n: u64) -> String {
    format!("0x{n:064x}")
}

/// Register the raw answer for `method(args)` on `address`.
fn answer(
    source: &MemoryCallSource,
    abi: &EvmContractAbi,
    address: &str,
    method: &str,
    args: &[NormalizedValue],
    raw: &str,
) {
    let data = abi.encode_function_data(method, args).unwrap();
    source.insert(ChainCall::new(address, data), raw);
}

#[test]
fn balances_across_tokens() {
    let abi = erc20();
    let holder = NormalizedValue::Address(HOLDER.into());
    let source = MemoryCallSource::new();
    answer(&source, &abi, USDC, "balanceOf", &[holder.clone()], &word(1_000_000));
    answer(&source, &abi, DAI, "balanceOf", &[holder.clone()], &word(42));

    let mut reader = ContractCalls::new(source);
    let out = reader
        .contract_calls(&[
            Some(ContractCall::new(abi.clone(), USDC, "balanceOf", vec![holder.clone()])),
            None,
            Some(ContractCall::new(abi.clone(), DAI, "balanceOf", vec![holder.clone()])),
        ])
        .unwrap();

    assert_eq!(out.len(), 3);
    assert_eq!(out[0], Some(vec![NormalizedValue::Uint(1_000_000)]));
    assert_eq!(out[1], None);
    assert_eq!(out[2], Some(vec![NormalizedValue::Uint(42)]));
}

#[test]
fn bad_argument_is_an_empty_slot() {
    let abi = erc20();
    let mut reader = ContractCalls::new(MemoryCallSource::new());

    let out = reader
        .contract_call(Some(ContractCall::new(
            abi,
            USDC,
            "balanceOf",
            vec![NormalizedValue::Address("0xuser".into())],
        )))
        .unwrap();
    assert_eq!(out, None);
}

#[test]
fn typed_symbol_and_decimals() {
    let abi = erc20();
    let source = MemoryCallSource::new();
    let symbol_raw = concat!(
        "0x",
        "0000000000000000000000000000000000000000000000000000000000000020",
        "0000000000000000000000000000000000000000000000000000000000000004",
        "5553444300000000000000000000000000000000000000000000000000000000",
    );
    answer(&source, &abi, USDC, "symbol", &[], symbol_raw);
    answer(&source, &abi, USDC, "decimals", &[], &word(6));

    let usdc = Contract::new(abi.clone(), USDC);
    let missing: Option<&Contract> = None;
    let mut reader = ContractCalls::new(source);

    let symbol: Option<String> = reader
        .typed_contract_call(TypedCall::new(Some(&usdc), "symbol", vec![]))
        .unwrap();
    assert_eq!(symbol.as_deref(), Some("USDC"));

    let decimals: Vec<Option<u128>> = reader
        .typed_contract_calls(&[
            TypedCall::new(Some(&usdc), "decimals", vec![]),
            TypedCall::new(missing, "decimals", vec![]),
        ])
        .unwrap();
    assert_eq!(decimals, vec![Some(6), None]);
}

#[test]
fn empty_return_data_is_none() {
    let abi = erc20();
    let source = MemoryCallSource::new();
    // An EOA or a non-contract address returns "0x".
    answer(&source, &abi, USDC, "decimals", &[], "0x");

    let mut reader = ContractCalls::new(source);
    let out = reader
        .contract_call(Some(ContractCall::new(abi, USDC, "decimals", vec![])))
        .unwrap();
    assert_eq!(out, None);
}

#[test]
fn new_block_new_values() {
    let abi = erc20();
    let holder = NormalizedValue::Address(HOLDER.into());
    let source = MemoryCallSource::new();
    answer(&source, &abi, USDC, "balanceOf", &[holder.clone()], &word(1));

    let mut reader = ContractCalls::new(source.clone());
    let calls = [Some(ContractCall::new(abi.clone(), USDC, "balanceOf", vec![holder.clone()]))];
    assert_eq!(
        reader.contract_calls(&calls).unwrap()[0],
        Some(vec![NormalizedValue::Uint(1)])
    );

    answer(&source, &abi, USDC, "balanceOf", &[holder], &word(2));
    source.advance_block(19_000_001);
    assert_eq!(
        reader.contract_calls(&calls).unwrap()[0],
        Some(vec![NormalizedValue::Uint(2)])
    );
}
