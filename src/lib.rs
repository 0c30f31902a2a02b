//! revm [`Inspector`](revm::Inspector) implementations for opcode n-gram tracing.
//!
//! ## Feature Flags
//!
//! - `serde`: Enables serialization for histograms, mux configs, and mux frames.

#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// The histogram aggregating n-gram counts.
pub mod histogram;

/// The revm inspector driving any opcode-stream tracer.
pub mod inspector;

/// A tracer multiplexing one step stream to several tracers.
pub mod mux;

/// The n-gram window tracker and the unigram/bigram/trigram tracers.
pub mod ngram;

/// The lifecycle contract opcode-stream tracers implement.
pub mod tracer;
