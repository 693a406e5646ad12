use rand::Rng;

use crate::{
    api::{PlanExecute, PlanGuruNew},
    error::ErrorKind,
    layouts::{
        Complexity, Engine, Flags, GuruShape, IoDim, Operands, OperandsMut, Plan, Representation, Side, Sign, Signal,
    },
    oep::CompleteBackend,
    source::Source,
    test_suite::{assert_close, reference_c2c, reference_r2c},
};

/// Split and interleaved guru plans over the same batched shape agree, for
/// both signs, and match the reference transform of every batch entry.
/// Fresh split operands are refused when the engine fixes the plane gap and
/// theirs differs.
pub fn test_guru_split_matches_interleaved<B: CompleteBackend>(engine: &Engine<B>) {
    let mut source: Source = Source::new([8u8; 32]);
    let n: usize = 12;
    let batch: usize = source.random_range(2..5);

    let shape: GuruShape =
        GuruShape::new(vec![IoDim::new(n, 1, 1)], vec![IoDim::new(batch, n as isize, n as isize)]).unwrap();

    for sign in [Sign::FORWARD, Sign::BACKWARD] {
        let mut interleaved: Plan<B> = engine
            .plan_guru(
                shape.clone(),
                Operands::new(Signal::complex(n * batch), Signal::complex(n * batch)),
                sign,
                Flags::ESTIMATE,
            )
            .unwrap();
        let mut split: Plan<B> = engine
            .plan_guru(
                shape.clone(),
                Operands::new(Signal::split_complex(n * batch), Signal::split_complex(n * batch)),
                sign,
                Flags::ESTIMATE | Flags::UNALIGNED,
            )
            .unwrap();
        assert_eq!(split.representation(), Representation::Split);
        assert_eq!(split.complexity(), Complexity::ComplexToComplex);

        interleaved.input_mut().fill_uniform(&mut source);
        let input: Vec<f64> = interleaved.input().to_interleaved();
        split.input_mut().set(&input).unwrap();

        interleaved.execute().unwrap();
        split.execute().unwrap();

        let have: Vec<f64> = interleaved.output().to_interleaved();
        assert_close(&split.output().to_interleaved(), &have, 1e-10);
        for (got, src) in have.chunks_exact(2 * n).zip(input.chunks_exact(2 * n)) {
            assert_close(got, &reference_c2c(&[n], sign, src), 1e-10);
        }

        let mut fresh_in: Signal = Signal::split_complex(n * batch);
        fresh_in.set(&input).unwrap();
        let mut fresh_out: Signal = Signal::split_complex(n * batch);
        let same_gaps: bool =
            fresh_in.plane_gap() == split.input_plane_gap() && fresh_out.plane_gap() == split.output_plane_gap();
        let result = split.execute_with(OperandsMut::new(&mut fresh_in, &mut fresh_out));
        if B::FIXED_PLANE_GAP && !same_gaps {
            let err = result.unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::PlaneGapMismatch { .. }), "{err}");
        } else {
            result.unwrap();
            assert_close(&fresh_out.to_interleaved(), &have, 1e-10);
        }
    }
}

/// Column transforms of a row-major `rows x cols` matrix written transposed.
pub fn test_guru_strided_batch<B: CompleteBackend>(engine: &Engine<B>) {
    let (rows, cols): (usize, usize) = (5, 3);
    let shape: GuruShape = GuruShape::new(
        vec![IoDim::new(rows, cols as isize, 1)],
        vec![IoDim::new(cols, 1, rows as isize)],
    )
    .unwrap();
    assert_eq!(shape.extent(Complexity::ComplexToComplex, Side::Input), rows * cols);

    let mut plan: Plan<B> = engine
        .plan_guru(
            shape,
            Operands::new(Signal::complex(rows * cols), Signal::complex(rows * cols)),
            Sign::FORWARD,
            Flags::ESTIMATE,
        )
        .unwrap();

    let mut source: Source = Source::new([9u8; 32]);
    plan.input_mut().fill_uniform(&mut source);
    let input: Vec<[f64; 2]> = plan.input().as_complex().unwrap().to_vec();
    plan.execute().unwrap();
    let output: Vec<[f64; 2]> = plan.output().as_complex().unwrap().to_vec();

    for c in 0..cols {
        let column: Vec<f64> = (0..rows).flat_map(|r| input[r * cols + c]).collect();
        let got: Vec<f64> = (0..rows).flat_map(|r| output[c * rows + r]).collect();
        assert_close(&got, &reference_c2c(&[rows], Sign::FORWARD, &column), 1e-10);
    }
}

/// Batched real transforms with padded rows on the complex side, in both
/// representations.
pub fn test_guru_r2c_batch<B: CompleteBackend>(engine: &Engine<B>) {
    let n: usize = 8;
    let batch: usize = 3;
    let half: usize = n / 2 + 1;
    let stride: usize = half + 1;
    let shape: GuruShape = GuruShape::new(
        vec![IoDim::new(n, 1, 1)],
        vec![IoDim::new(batch, n as isize, stride as isize)],
    )
    .unwrap();
    let out_len: usize = shape.extent(Complexity::RealToComplex, Side::Output);
    assert_eq!(out_len, (batch - 1) * stride + half);

    let mut interleaved: Plan<B> = engine
        .plan_guru(
            shape.clone(),
            Operands::new(Signal::real(n * batch), Signal::complex(out_len)),
            Sign::FORWARD,
            Flags::ESTIMATE,
        )
        .unwrap();
    let mut split: Plan<B> = engine
        .plan_guru(
            shape.clone(),
            Operands::new(Signal::split_real(n * batch), Signal::split_complex(out_len)),
            Sign::FORWARD,
            Flags::ESTIMATE,
        )
        .unwrap();
    assert_eq!(split.complexity(), Complexity::RealToComplex);

    let mut source: Source = Source::new([10u8; 32]);
    interleaved.input_mut().fill_uniform(&mut source);
    let input: Vec<f64> = interleaved.input().to_interleaved();
    split.input_mut().set(&input).unwrap();

    interleaved.execute().unwrap();
    split.execute().unwrap();

    let have: Vec<f64> = interleaved.output().to_interleaved();
    let have_split: Vec<f64> = split.output().to_interleaved();
    for b in 0..batch {
        let want: Vec<f64> = reference_r2c(&[n], &input[b * n..(b + 1) * n]);
        let at: usize = 2 * b * stride;
        assert_close(&have[at..at + 2 * half], &want, 1e-10);
        assert_close(&have_split[at..at + 2 * half], &want, 1e-10);
    }

    // Back to real through the same padded layout.
    let mut back: Plan<B> = engine
        .plan_guru(
            GuruShape::new(
                vec![IoDim::new(n, 1, 1)],
                vec![IoDim::new(batch, stride as isize, n as isize)],
            )
            .unwrap(),
            Operands::new(Signal::complex(out_len), Signal::real(n * batch)),
            Sign::BACKWARD,
            Flags::ESTIMATE,
        )
        .unwrap();
    assert_eq!(back.complexity(), Complexity::ComplexToReal);
    back.input_mut().set(&have).unwrap();
    back.execute().unwrap();
    let want: Vec<f64> = input.iter().map(|x| x * n as f64).collect();
    assert_close(&back.output().to_interleaved(), &want, 1e-10);
}

/// Operands shorter than the strides reach are refused per side.
pub fn test_guru_extent_checks<B: CompleteBackend>(engine: &Engine<B>) {
    let shape: GuruShape = GuruShape::new(vec![IoDim::new(4, 2, 1)], vec![]).unwrap();
    let err = engine
        .plan_guru(
            shape.clone(),
            Operands::new(Signal::complex(6), Signal::complex(4)),
            Sign::FORWARD,
            Flags::ESTIMATE,
        )
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::SizeMismatch {
            side: Side::Input,
            expected: 7,
            actual: 6
        }
    ));

    let plan: Plan<B> = engine
        .plan_guru(
            shape,
            Operands::new(Signal::complex(7), Signal::complex(4)),
            Sign::FORWARD,
            Flags::ESTIMATE,
        )
        .unwrap();
    assert_eq!(plan.dimensions(), vec![4]);
}
