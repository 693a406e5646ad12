use crate::{
    api::{AlignmentOf, SignalAlloc},
    layouts::{Alignment, Backend, Engine, Signal, Split},
    oep::{AlignmentOfImpl, SignalAllocImpl},
    planning,
};

impl<B> SignalAlloc<B> for Engine<B>
where
    B: Backend + SignalAllocImpl<B>,
{
    fn alloc_real(&self, n: usize) -> Signal {
        Signal::Real(B::alloc_real_impl(n).into())
    }

    fn alloc_complex(&self, n: usize) -> Signal {
        Signal::Complex(B::alloc_complex_impl(n).into())
    }

    fn alloc_split_real(&self, n: usize) -> Signal {
        Signal::Split(Split::real(B::alloc_real_impl(n)))
    }

    fn alloc_split_complex(&self, n: usize) -> Signal {
        Signal::Split(Split::from_planes(
            B::alloc_real_impl(n).into(),
            B::alloc_real_impl(n).into(),
        ))
    }
}

impl<B> AlignmentOf<B> for Engine<B>
where
    B: Backend + AlignmentOfImpl<B>,
{
    fn alignment_of(&self, signal: &Signal) -> Alignment {
        planning::alignment_of::<B>(signal)
    }
}
