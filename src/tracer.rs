//! The lifecycle contract shared by all opcode-stream analyzers.
//!
//! A tracer receives one callback per executed instruction, in program
//! execution order across nested calls, and produces its result once the
//! step stream ends. The three hooks mirror the `step`/`fault`/`result`
//! protocol of geth's JS tracers, narrowed to the fields this crate consumes.

use revm::bytecode::OpCode;

/// A single executed instruction as observed by an [`OpcodeTracer`].
///
/// Carries exactly the fields the analyzers consume. Both are plain values,
/// so a partially populated step is unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StepLog {
    /// The opcode being executed.
    pub op: OpCode,
    /// Call depth of the executing frame. The top-level frame is depth `0`.
    pub depth: u64,
}

impl StepLog {
    /// Creates a new step record.
    pub const fn new(op: OpCode, depth: u64) -> Self {
        Self { op, depth }
    }
}

/// Error terminating a single trace.
///
/// Fatal to the affected trace only; the host VM keeps executing. Tracers
/// latch the error internally and report it from
/// [`finalize`](OpcodeTracer::finalize).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    /// A histogram counter exceeded [`u64::MAX`].
    #[error("histogram counter overflowed")]
    CounterOverflow,
}

/// An analyzer consuming a stream of executed opcodes.
///
/// The driver guarantees that [`on_step`](Self::on_step) is invoked exactly
/// once per successfully executed instruction and
/// [`on_fault`](Self::on_fault) exactly once for an instruction the VM could
/// not complete, instead of `on_step`. [`finalize`](Self::finalize) is
/// invoked once after the stream ends, normally or via fault.
///
/// Hooks must not abort the host VM: implementations absorb internal
/// failures and surface them from `finalize`.
pub trait OpcodeTracer {
    /// The result produced when the trace ends.
    type Output;

    /// Observes one executed instruction.
    fn on_step(&mut self, step: StepLog);

    /// Observes an instruction the VM failed to execute.
    ///
    /// A faulted step contributes no symbol. The default implementation does
    /// nothing.
    fn on_fault(&mut self, step: StepLog) {
        let _ = step;
    }

    /// Consumes the tracer and returns its accumulated result.
    fn finalize(self) -> Result<Self::Output, TraceError>;
}
