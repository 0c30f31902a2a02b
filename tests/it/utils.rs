use alloy_primitives::{Address, Bytes, U256};
use ngram_inspectors::{
    inspector::TracerInspector,
    tracer::{OpcodeTracer, TraceError},
};
use revm::{
    context::TxEnv,
    context_interface::TransactTo,
    database::CacheDB,
    database_interface::EmptyDB,
    primitives::hardfork::SpecId,
    state::{AccountInfo, Bytecode},
    Context, InspectEvm, MainBuilder, MainContext,
};

/// Address of the contract called by [`trace`].
pub const ENTRY: Address = Address::repeat_byte(0x01);

/// Address of the extra contract used by call-depth tests.
pub const CALLEE: Address = Address::repeat_byte(0x02);

/// Address of the innermost contract used by nested-call tests.
pub const LEAF: Address = Address::repeat_byte(0x03);

/// Runs a call to [`ENTRY`] with the given runtime bytecodes installed,
/// driving `tracer` over the execution.
///
/// Returns whether the call succeeded, together with the tracer's finalized
/// output.
pub fn trace<T: OpcodeTracer>(
    contracts: &[(Address, Bytes)],
    tracer: T,
) -> (bool, Result<T::Output, TraceError>) {
    let mut db = CacheDB::new(EmptyDB::default());

    // Insert the caller
    db.insert_account_info(
        Address::ZERO,
        AccountInfo { balance: U256::from(1e18), ..Default::default() },
    );
    // Insert the contracts
    for (address, code) in contracts {
        db.insert_account_info(
            *address,
            AccountInfo { code: Some(Bytecode::new_legacy(code.clone())), ..Default::default() },
        );
    }

    let mut evm = Context::mainnet()
        .modify_cfg_chained(|cfg| cfg.spec = SpecId::CANCUN)
        .with_db(db)
        .build_mainnet_with_inspector(TracerInspector::new(tracer));

    let res = evm
        .inspect_tx(TxEnv {
            gas_price: 1024,
            gas_limit: 1_000_000,
            gas_priority_fee: None,
            kind: TransactTo::Call(ENTRY),
            ..Default::default()
        })
        .expect("transaction must execute");

    (res.result.is_success(), evm.inspector.finalize())
}
