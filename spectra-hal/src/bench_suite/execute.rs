use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};

use crate::{
    api::{EngineNew, PlanExecute, PlanNew, SignalAlloc},
    layouts::{Dimensions, Engine, EngineConfig, Flags, Operands, OperandsMut, Plan, Sign, Signal},
    oep::CompleteBackend,
    source::Source,
};

/// Execution on the bound operands, complex-to-complex and real-to-complex.
pub fn bench_execute<B: CompleteBackend>(c: &mut Criterion, label: &str) {
    let group_name: String = format!("execute::{label}");

    let mut group = c.benchmark_group(group_name);

    fn runner<B: CompleteBackend>(log_n: usize, real: bool) -> impl FnMut() {
        let engine: Engine<B> = Engine::<B>::new(EngineConfig::default()).expect("default engine configuration");
        let n: usize = 1 << log_n;
        let input: Signal = if real { engine.alloc_real(n) } else { engine.alloc_complex(n) };

        let mut plan: Plan<B> = engine
            .plan(
                Operands::new(input, engine.alloc_complex(n)),
                Sign::FORWARD,
                Flags::ESTIMATE,
                None,
            )
            .expect("estimated plan");

        let mut source: Source = Source::new([0u8; 32]);
        plan.input_mut().fill_uniform(&mut source);

        move || {
            plan.execute().expect("live plan");
            black_box(());
        }
    }

    for log_n in [8, 10, 12, 14] {
        for real in [false, true] {
            let kind: &str = if real { "r2c" } else { "c2c" };
            let id: BenchmarkId = BenchmarkId::from_parameter(format!("{kind}/{}", 1 << log_n));
            let mut runner = runner::<B>(log_n, real);
            group.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
        }
    }

    group.finish();
}

/// New-array execution, including the per-call operand checks.
pub fn bench_execute_with<B: CompleteBackend>(c: &mut Criterion, label: &str) {
    let group_name: String = format!("execute_with::{label}");

    let mut group = c.benchmark_group(group_name);

    fn runner<B: CompleteBackend>(dims: &[usize]) -> impl FnMut() {
        let engine: Engine<B> = Engine::<B>::new(EngineConfig::default()).expect("default engine configuration");
        let dims: Dimensions = Dimensions::new(dims).expect("valid dimensions");
        let n: usize = dims.linear_size();

        let plan: Plan<B> = engine
            .plan(
                Operands::new(engine.alloc_complex(n), engine.alloc_complex(n)),
                Sign::BACKWARD,
                Flags::ESTIMATE,
                Some(dims),
            )
            .expect("estimated plan");

        let mut source: Source = Source::new([0u8; 32]);
        let mut a: Signal = engine.alloc_complex(n);
        let mut b: Signal = engine.alloc_complex(n);
        a.fill_uniform(&mut source);

        move || {
            plan.execute_with(OperandsMut::new(&mut a, &mut b)).expect("matching operands");
            black_box(());
        }
    }

    for dims in [&[1024][..], &[32, 32], &[16, 8, 8], &[4, 4, 8, 8]] {
        let id: BenchmarkId = BenchmarkId::from_parameter(Dimensions::new(dims).expect("valid dimensions"));
        let mut runner = runner::<B>(dims);
        group.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
    }

    group.finish();
}
