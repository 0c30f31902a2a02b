//! Revm [`Inspector`] adapter driving an [`OpcodeTracer`].

use crate::tracer::{OpcodeTracer, StepLog, TraceError};
use revm::{
    bytecode::OpCode,
    context::JournalTr,
    context_interface::ContextTr,
    interpreter::{
        interpreter_types::{Jumps, LoopControl},
        Interpreter,
    },
    Inspector,
};

/// Feeds every executed instruction of a transaction to an [`OpcodeTracer`].
///
/// Revm fires the `step` hook before an instruction runs and only `step_end`
/// knows how it went, so the inspector records the step at dispatch and
/// delivers it once the outcome is known: completed instructions reach
/// [`OpcodeTracer::on_step`], reverted or failed ones reach
/// [`OpcodeTracer::on_fault`]. Exactly one hook fires per instruction.
///
/// Call depth is reported with the top-level frame at `0`.
#[derive(Clone, Debug)]
pub struct TracerInspector<T> {
    tracer: T,
    /// Step recorded at dispatch, pending delivery in `step_end`.
    pending: Option<StepLog>,
}

impl<T> TracerInspector<T> {
    /// Creates an inspector driving the given tracer.
    pub const fn new(tracer: T) -> Self {
        Self { tracer, pending: None }
    }

    /// Returns a reference to the inner tracer.
    pub const fn tracer(&self) -> &T {
        &self.tracer
    }

    /// Returns a mutable reference to the inner tracer.
    pub fn tracer_mut(&mut self) -> &mut T {
        &mut self.tracer
    }

    /// Consumes the inspector, returning the inner tracer.
    pub fn into_tracer(self) -> T {
        self.tracer
    }
}

impl<T: OpcodeTracer> TracerInspector<T> {
    /// Consumes the inspector and finalizes the inner tracer.
    pub fn finalize(self) -> Result<T::Output, TraceError> {
        self.tracer.finalize()
    }
}

impl<CTX, T> Inspector<CTX> for TracerInspector<T>
where
    CTX: ContextTr,
    T: OpcodeTracer,
{
    fn step(&mut self, interp: &mut Interpreter, context: &mut CTX) {
        // we always want an OpCode, even it is unknown because it could be an
        // additional opcode that not a known constant
        let op = unsafe { OpCode::new_unchecked(interp.bytecode.opcode()) };
        // journal depth is 1-based while a frame executes; the contract puts
        // the top-level frame at 0
        let depth = (context.journal_ref().depth() as u64).saturating_sub(1);
        self.pending = Some(StepLog::new(op, depth));
    }

    fn step_end(&mut self, interp: &mut Interpreter, _context: &mut CTX) {
        let Some(step) = self.pending.take() else { return };
        let faulted = interp
            .bytecode
            .action()
            .as_ref()
            .is_some_and(|a| a.instruction_result().map(|r| !r.is_ok()).unwrap_or(false));
        if faulted {
            self.tracer.on_fault(step);
        } else {
            self.tracer.on_step(step);
        }
    }
}
