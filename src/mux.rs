//! A tracer multiplexing one step stream to several n-gram tracers.
//!
//! Behaves like geth's `muxTracer`: every tracer named in the config
//! observes every step, and the final frame maps each tracer's name to its
//! own histogram.

use crate::{
    histogram::Histogram,
    ngram::NgramTracer,
    tracer::{OpcodeTracer, StepLog, TraceError},
};
use alloc::vec::Vec;
use alloy_primitives::map::HashMap;
use core::fmt;

/// Error returned when constructing a [`MuxTracer`] from a [`MuxConfig`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Config payload supplied for a tracer that accepts none.
    #[error("unexpected config for tracer '{0}'")]
    UnexpectedConfig(TracerKind),
}

/// The n-gram tracer kinds a [`MuxTracer`] can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TracerKind {
    /// Single-opcode frequencies.
    #[cfg_attr(feature = "serde", serde(rename = "unigramTracer"))]
    Unigram,
    /// Opcode-pair frequencies.
    #[cfg_attr(feature = "serde", serde(rename = "bigramTracer"))]
    Bigram,
    /// Opcode-triple frequencies.
    #[cfg_attr(feature = "serde", serde(rename = "trigramTracer"))]
    Trigram,
}

impl TracerKind {
    /// Returns the tracer name used in configs and results.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unigram => "unigramTracer",
            Self::Bigram => "bigramTracer",
            Self::Trigram => "trigramTracer",
        }
    }

    /// Creates the tracer this kind names.
    fn tracer(&self) -> NgramTracer {
        match self {
            Self::Unigram => NgramTracer::unigram(),
            Self::Bigram => NgramTracer::bigram(),
            Self::Trigram => NgramTracer::trigram(),
        }
    }
}

impl fmt::Display for TracerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps each tracer to run to its optional raw config payload.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MuxConfig(pub HashMap<TracerKind, Option<serde_json::Value>>);

/// Result of a mux trace: each tracer's histogram keyed by its kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MuxFrame(pub HashMap<TracerKind, Histogram>);

/// Runs multiple n-gram tracers over one step stream.
#[derive(Clone, Debug)]
pub struct MuxTracer {
    tracers: Vec<(TracerKind, NgramTracer)>,
}

impl MuxTracer {
    /// Creates a tracer for every kind named in the config.
    ///
    /// The n-gram tracers accept no configuration, so any payload is
    /// rejected with [`Error::UnexpectedConfig`].
    pub fn try_from_config(config: MuxConfig) -> Result<Self, Error> {
        let mut tracers = Vec::with_capacity(config.0.len());
        for (kind, tracer_config) in config.0 {
            if tracer_config.is_some() {
                return Err(Error::UnexpectedConfig(kind));
            }
            tracers.push((kind, kind.tracer()));
        }
        Ok(Self { tracers })
    }

    /// Creates a tracer running all three n-gram widths.
    pub fn all() -> Self {
        Self {
            tracers: [TracerKind::Unigram, TracerKind::Bigram, TracerKind::Trigram]
                .into_iter()
                .map(|kind| (kind, kind.tracer()))
                .collect(),
        }
    }
}

impl OpcodeTracer for MuxTracer {
    type Output = MuxFrame;

    #[inline]
    fn on_step(&mut self, step: StepLog) {
        for (_, tracer) in &mut self.tracers {
            tracer.on_step(step);
        }
    }

    #[inline]
    fn on_fault(&mut self, step: StepLog) {
        for (_, tracer) in &mut self.tracers {
            tracer.on_fault(step);
        }
    }

    fn finalize(self) -> Result<MuxFrame, TraceError> {
        let mut frame = HashMap::default();
        for (kind, tracer) in self.tracers {
            frame.insert(kind, tracer.finalize()?);
        }
        Ok(MuxFrame(frame))
    }
}
