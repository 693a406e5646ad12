use crate::layouts::{Alignment, Backend, Signal};

/// Allocates zeroed signals in engine-aligned memory.
pub trait SignalAlloc<B: Backend> {
    fn alloc_real(&self, n: usize) -> Signal;
    fn alloc_complex(&self, n: usize) -> Signal;
    fn alloc_split_real(&self, n: usize) -> Signal;
    fn alloc_split_complex(&self, n: usize) -> Signal;
}

/// Reports the engine's alignment class of a signal, one class per plane.
pub trait AlignmentOf<B: Backend> {
    fn alignment_of(&self, signal: &Signal) -> Alignment;
}
