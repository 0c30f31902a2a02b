//! Integration tests for the mux tracer.

use crate::utils::{trace, ENTRY};
use alloy_primitives::{hex, map::HashMap, Bytes};
use ngram_inspectors::{
    histogram::Histogram,
    mux::{MuxConfig, MuxTracer, TracerKind},
};

/// PUSH1 1, PUSH1 1, ADD, STOP
fn code() -> Bytes {
    hex!("600160010100").into()
}

#[test]
fn mux_runs_every_tracer_over_one_execution() {
    let (ok, result) = trace(&[(ENTRY, code())], MuxTracer::all());
    assert!(ok);
    let frame = result.unwrap();
    assert_eq!(frame.0.len(), 3);

    assert_eq!(
        frame.0[&TracerKind::Unigram],
        Histogram::from_iter([("PUSH1", 2), ("ADD", 1), ("STOP", 1)])
    );
    assert_eq!(
        frame.0[&TracerKind::Bigram],
        Histogram::from_iter([("-PUSH1", 1), ("PUSH1-PUSH1", 1), ("PUSH1-ADD", 1), ("ADD-STOP", 1)])
    );
    assert_eq!(
        frame.0[&TracerKind::Trigram],
        Histogram::from_iter([
            ("--PUSH1", 1),
            ("-PUSH1-PUSH1", 1),
            ("PUSH1-PUSH1-ADD", 1),
            ("PUSH1-ADD-STOP", 1),
        ])
    );
}

#[test]
fn mux_from_config_traces_selected_kinds() {
    let config = MuxConfig(HashMap::from_iter([
        (TracerKind::Bigram, None),
        (TracerKind::Trigram, None),
    ]));
    let mux = MuxTracer::try_from_config(config).unwrap();

    let (ok, result) = trace(&[(ENTRY, code())], mux);
    assert!(ok);
    let frame = result.unwrap();
    assert_eq!(frame.0.len(), 2);
    assert!(frame.0.contains_key(&TracerKind::Bigram));
    assert!(frame.0.contains_key(&TracerKind::Trigram));
    assert!(!frame.0.contains_key(&TracerKind::Unigram));
}
