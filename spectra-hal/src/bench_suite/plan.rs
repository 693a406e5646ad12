use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};

use crate::{
    api::{EngineNew, PlanGuruNew, PlanNew},
    layouts::{Engine, EngineConfig, Flags, GuruShape, IoDim, Operands, Signal, Sign},
    oep::CompleteBackend,
};

/// Cost of creating, then dropping, an estimated plan.
pub fn bench_plan_create<B: CompleteBackend>(c: &mut Criterion, label: &str) {
    let group_name: String = format!("plan_create::{label}");

    let mut group = c.benchmark_group(group_name);

    fn runner<B: CompleteBackend>(log_n: usize) -> impl FnMut() {
        let engine: Engine<B> = Engine::<B>::new(EngineConfig::default()).expect("default engine configuration");
        let n: usize = 1 << log_n;

        move || {
            let plan = engine
                .plan(
                    Operands::new(Signal::complex(n), Signal::complex(n)),
                    Sign::FORWARD,
                    Flags::ESTIMATE,
                    None,
                )
                .expect("estimated plan");
            black_box(plan);
        }
    }

    for log_n in [6, 8, 10, 12] {
        let id: BenchmarkId = BenchmarkId::from_parameter(format!("{}", 1 << log_n));
        let mut runner = runner::<B>(log_n);
        group.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
    }

    group.finish();
}

/// Cost of creating a batched split guru plan.
pub fn bench_plan_guru_split<B: CompleteBackend>(c: &mut Criterion, label: &str) {
    let group_name: String = format!("plan_guru_split::{label}");

    let mut group = c.benchmark_group(group_name);

    fn runner<B: CompleteBackend>(params: [usize; 2]) -> impl FnMut() {
        let engine: Engine<B> = Engine::<B>::new(EngineConfig::default()).expect("default engine configuration");
        let n: usize = 1 << params[0];
        let batch: usize = params[1];
        let shape: GuruShape = GuruShape::new(vec![IoDim::new(n, 1, 1)], vec![IoDim::new(batch, n as isize, n as isize)])
            .expect("valid guru shape");

        move || {
            let plan = engine
                .plan_guru(
                    shape.clone(),
                    Operands::new(Signal::split_complex(n * batch), Signal::split_complex(n * batch)),
                    Sign::FORWARD,
                    Flags::ESTIMATE,
                )
                .expect("estimated plan");
            black_box(plan);
        }
    }

    for params in [[6, 1], [6, 16], [10, 1], [10, 16]] {
        let id: BenchmarkId = BenchmarkId::from_parameter(format!("{}x{}", 1 << params[0], params[1]));
        let mut runner = runner::<B>(params);
        group.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
    }

    group.finish();
}
