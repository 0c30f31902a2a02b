//! N-gram opcode tracers.
//!
//! Counts how often each sequence of `width` consecutive opcodes executes
//! within one call frame of a single transaction. Reproduces the behavior of
//! geth's built-in `bigramTracer` and `trigramTracer`, including their
//! differing treatment of call-depth changes, plus a width-1 variant
//! matching `unigramTracer`.
//!
//! See <https://geth.ethereum.org/docs/developers/evm-tracing/built-in-tracers>.

use crate::{
    histogram::Histogram,
    tracer::{OpcodeTracer, StepLog, TraceError},
};
use alloc::{string::String, vec, vec::Vec};
use core::fmt::Write;
use revm::bytecode::OpCode;

/// Configuration of an n-gram window.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NgramConfig {
    /// Number of consecutive opcodes forming one n-gram. At least 1.
    pub width: usize,
    /// Separator placed between the opcode symbols of a key.
    pub delimiter: char,
    /// Symbol rendered for a prefix slot that has not seen a real opcode.
    pub placeholder: String,
    /// Whether a call-depth change clears the pending prefix and drops the
    /// triggering opcode from history.
    ///
    /// When `false`, the window only skips the emission for the step whose
    /// depth differs from the stored one and keeps its prefix, so a symbol
    /// observed right before the depth change pairs with the symbol observed
    /// right after it. The stock bigram tracer behaves this way; the trigram
    /// tracer resets. Width-1 windows have no prefix and ignore this flag.
    pub reset_on_depth_change: bool,
}

impl NgramConfig {
    /// Creates a config for n-grams of `width` consecutive opcodes, joined
    /// with `-`, empty placeholder, resetting on depth change.
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero.
    #[track_caller]
    pub fn new(width: usize) -> Self {
        assert!(width >= 1, "n-gram width must be at least 1");
        Self { width, delimiter: '-', placeholder: String::new(), reset_on_depth_change: true }
    }

    /// Config matching geth's `unigramTracer`: single opcodes.
    pub fn unigram() -> Self {
        Self { reset_on_depth_change: false, ..Self::new(1) }
    }

    /// Config matching geth's `bigramTracer`: opcode pairs, the window
    /// carried over across depth changes.
    pub fn bigram() -> Self {
        Self { reset_on_depth_change: false, ..Self::new(2) }
    }

    /// Config matching geth's `trigramTracer`: opcode triples, the prefix
    /// cleared on depth change.
    pub fn trigram() -> Self {
        Self::new(3)
    }

    /// Sets the delimiter placed between opcode symbols.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the symbol rendered for unfilled prefix slots.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets whether a depth change clears the pending prefix.
    pub fn with_depth_reset(mut self, reset: bool) -> Self {
        self.reset_on_depth_change = reset;
        self
    }
}

/// Sliding window turning a per-step opcode stream into depth-scoped n-gram
/// keys.
///
/// Holds the `width - 1` most recently accepted opcodes ("pending prefix")
/// and the call depth at which they were recorded. Unfilled slots render as
/// the placeholder, so the first `width - 1` keys after construction or a
/// reset carry empty segments. That output is part of the format, not an
/// artifact to be filtered out.
#[derive(Clone, Debug)]
pub struct NgramWindow {
    config: NgramConfig,
    /// Pending prefix, oldest first. `None` marks a slot that has not seen a
    /// real opcode yet.
    prefix: Vec<Option<OpCode>>,
    /// Depth at which the prefix was recorded. Starts at 0, the top-level
    /// depth, so the very first steps of a trace count as depth-homogeneous.
    last_depth: u64,
}

impl NgramWindow {
    /// Creates an empty window for the given config.
    pub fn new(config: NgramConfig) -> Self {
        let prefix = vec![None; config.width.saturating_sub(1)];
        Self { config, prefix, last_depth: 0 }
    }

    /// Returns the config this window was built with.
    pub const fn config(&self) -> &NgramConfig {
        &self.config
    }

    /// Feeds one step, returning the completed key if the window is valid.
    ///
    /// Width-1 windows are trivially depth-homogeneous and emit on every
    /// step. Wider windows apply the configured depth policy.
    pub fn observe(&mut self, op: OpCode, depth: u64) -> Option<String> {
        if self.prefix.is_empty() {
            return Some(self.compose(op));
        }
        if self.config.reset_on_depth_change {
            if depth != self.last_depth {
                self.prefix.fill(None);
                self.last_depth = depth;
                return None;
            }
            let key = self.compose(op);
            self.shift(op);
            Some(key)
        } else {
            // Gate the emission, but advance window and depth regardless.
            let key = (depth == self.last_depth).then(|| self.compose(op));
            self.shift(op);
            self.last_depth = depth;
            key
        }
    }

    /// Joins the pending prefix plus `op` into a histogram key.
    fn compose(&self, op: OpCode) -> String {
        let mut key = String::new();
        for slot in &self.prefix {
            match slot {
                Some(prev) => {
                    let _ = write!(key, "{prev}");
                }
                None => key.push_str(&self.config.placeholder),
            }
            key.push(self.config.delimiter);
        }
        let _ = write!(key, "{op}");
        key
    }

    /// Drops the oldest prefix slot and appends `op`.
    fn shift(&mut self, op: OpCode) {
        self.prefix.rotate_left(1);
        if let Some(last) = self.prefix.last_mut() {
            *last = Some(op);
        }
    }
}

/// An [`OpcodeTracer`] counting n-grams of consecutive opcodes into a
/// [`Histogram`].
#[derive(Clone, Debug)]
pub struct NgramTracer {
    window: NgramWindow,
    histogram: Histogram,
    /// First error observed while counting. Once set, further steps are
    /// absorbed and [`finalize`](OpcodeTracer::finalize) reports the error.
    error: Option<TraceError>,
}

impl NgramTracer {
    /// Creates a tracer for the given window config.
    pub fn new(config: NgramConfig) -> Self {
        Self { window: NgramWindow::new(config), histogram: Histogram::new(), error: None }
    }

    /// Tracer counting single opcodes, like geth's `unigramTracer`.
    pub fn unigram() -> Self {
        Self::new(NgramConfig::unigram())
    }

    /// Tracer counting opcode pairs, like geth's `bigramTracer`.
    pub fn bigram() -> Self {
        Self::new(NgramConfig::bigram())
    }

    /// Tracer counting opcode triples, like geth's `trigramTracer`.
    pub fn trigram() -> Self {
        Self::new(NgramConfig::trigram())
    }

    /// Returns the config this tracer was built with.
    pub const fn config(&self) -> &NgramConfig {
        self.window.config()
    }

    /// Returns the histogram accumulated so far.
    pub const fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Consumes the tracer, returning the histogram accumulated so far even
    /// if a counter overflowed.
    pub fn into_histogram(self) -> Histogram {
        self.histogram
    }
}

impl OpcodeTracer for NgramTracer {
    type Output = Histogram;

    fn on_step(&mut self, step: StepLog) {
        if self.error.is_some() {
            return;
        }
        if let Some(key) = self.window.observe(step.op, step.depth) {
            if let Err(err) = self.histogram.increment(key) {
                self.error = Some(err);
            }
        }
    }

    /// A faulted step contributes no symbol and leaves the window untouched.
    fn on_fault(&mut self, _step: StepLog) {}

    fn finalize(self) -> Result<Histogram, TraceError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.histogram),
        }
    }
}
