use crate::{
    api::{PlanExecute, PlanNew},
    layouts::{Complexity, Dimensions, Engine, Flags, Operands, Placement, Plan, Sign, Signal},
    oep::CompleteBackend,
    reference::nd::half_extents,
    source::Source,
    test_suite::{assert_close, reference_c2c, reference_r2c},
};

const TOL: f64 = 1e-12;

/// Shapes covering every rank-specialised primitive and the general one.
const SHAPES: &[&[usize]] = &[&[16], &[12], &[7], &[4, 6], &[2, 3, 4], &[2, 2, 3, 2]];

pub fn test_c2c_impulse<B: CompleteBackend>(engine: &Engine<B>) {
    let n: usize = 8;

    let mut forward: Plan<B> = engine
        .plan(
            Operands::new(Signal::complex(n), Signal::complex(n)),
            Sign::FORWARD,
            Flags::ESTIMATE,
            None,
        )
        .unwrap();
    assert_eq!(forward.complexity(), Complexity::ComplexToComplex);
    assert_eq!(forward.placement(), Placement::OutOfPlace);
    assert_eq!(forward.dimensions(), vec![n]);

    // Delta at zero transforms to a flat spectrum.
    forward.input_mut().set(&[1.0, 0.0]).unwrap();
    forward.execute().unwrap();
    let spectrum: Vec<[f64; 2]> = forward.output().as_complex().unwrap().to_vec();
    assert!(spectrum.iter().all(|&[re, im]| (re - 1.0).abs() < TOL && im.abs() < TOL));

    let mut backward: Plan<B> = engine
        .plan(
            Operands::new(Signal::complex(n), Signal::complex(n)),
            Sign::BACKWARD,
            Flags::ESTIMATE,
            None,
        )
        .unwrap();
    backward.input_mut().set(&forward.output().to_interleaved()).unwrap();
    backward.execute().unwrap();

    let mut want: Vec<f64> = vec![0.0; 2 * n];
    want[0] = n as f64;
    assert_close(&backward.output().to_interleaved(), &want, TOL);
}

pub fn test_c2c_matches_reference<B: CompleteBackend>(engine: &Engine<B>) {
    let mut source: Source = Source::new([1u8; 32]);
    for dims in SHAPES {
        let size: usize = dims.iter().product();
        for sign in [Sign::FORWARD, Sign::BACKWARD] {
            let mut plan: Plan<B> = engine
                .plan(
                    Operands::new(Signal::complex(size), Signal::complex(size)),
                    sign,
                    Flags::ESTIMATE,
                    Some(Dimensions::new(dims).unwrap()),
                )
                .unwrap();
            assert_eq!(plan.rank(), dims.len());
            plan.input_mut().fill_uniform(&mut source);
            let input: Vec<f64> = plan.input().to_interleaved();

            plan.execute().unwrap();

            assert_close(&plan.output().to_interleaved(), &reference_c2c(dims, sign, &input), 1e-10);
            assert_eq!(plan.input().to_interleaved(), input, "out-of-place c2c kept its input");
        }
    }
}

pub fn test_r2c_matches_reference<B: CompleteBackend>(engine: &Engine<B>) {
    let mut source: Source = Source::new([2u8; 32]);
    for dims in SHAPES {
        let size: usize = dims.iter().product();
        let mut plan: Plan<B> = engine
            .plan(
                Operands::new(Signal::real(size), Signal::complex(size)),
                Sign::FORWARD,
                Flags::ESTIMATE,
                Some(Dimensions::new(dims).unwrap()),
            )
            .unwrap();
        assert_eq!(plan.complexity(), Complexity::RealToComplex);

        plan.input_mut().fill_uniform(&mut source);
        let input: Vec<f64> = plan.input().to_interleaved();
        plan.execute().unwrap();

        let want: Vec<f64> = reference_r2c(dims, &input);
        let have: Vec<f64> = plan.output().to_interleaved();
        assert_close(&have[..want.len()], &want, 1e-10);
    }
}

/// Forward real transform followed by the backward complex-to-real one
/// scales the signal by its size.
pub fn test_r2c_c2r_round_trip<B: CompleteBackend>(engine: &Engine<B>) {
    let mut source: Source = Source::new([3u8; 32]);
    for dims in SHAPES {
        let size: usize = dims.iter().product();
        let half: usize = half_extents(dims).iter().product();

        let mut r2c: Plan<B> = engine
            .plan(
                Operands::new(Signal::real(size), Signal::complex(size)),
                Sign::FORWARD,
                Flags::ESTIMATE,
                Some(Dimensions::new(dims).unwrap()),
            )
            .unwrap();
        let mut c2r: Plan<B> = engine
            .plan(
                Operands::new(Signal::complex(size), Signal::real(size)),
                Sign::BACKWARD,
                Flags::ESTIMATE,
                Some(Dimensions::new(dims).unwrap()),
            )
            .unwrap();
        assert_eq!(c2r.complexity(), Complexity::ComplexToReal);

        // Zeros stay zeros.
        c2r.execute().unwrap();
        assert!(c2r.output().to_interleaved().iter().all(|x| *x == 0.0));

        r2c.input_mut().fill_uniform(&mut source);
        let input: Vec<f64> = r2c.input().to_interleaved();
        r2c.execute().unwrap();

        let spectrum: Vec<f64> = r2c.output().to_interleaved();
        c2r.input_mut().set(&spectrum[..2 * half]).unwrap();
        c2r.execute().unwrap();

        let want: Vec<f64> = input.iter().map(|x| x * size as f64).collect();
        assert_close(&c2r.output().to_interleaved(), &want, 1e-10);
    }
}

pub fn test_in_place_matches_out_of_place<B: CompleteBackend>(engine: &Engine<B>) {
    let mut source: Source = Source::new([4u8; 32]);
    for dims in SHAPES {
        let size: usize = dims.iter().product();
        let mut in_place: Plan<B> = engine
            .plan(
                Operands::in_place(Signal::complex(size)),
                Sign::FORWARD,
                Flags::ESTIMATE,
                Some(Dimensions::new(dims).unwrap()),
            )
            .unwrap();
        assert_eq!(in_place.placement(), Placement::InPlace);

        let mut out_of_place: Plan<B> = engine
            .plan(
                Operands::new(Signal::complex(size), Signal::complex(size)),
                Sign::FORWARD,
                Flags::ESTIMATE,
                Some(Dimensions::new(dims).unwrap()),
            )
            .unwrap();

        in_place.input_mut().fill_uniform(&mut source);
        let input: Vec<f64> = in_place.input().to_interleaved();
        out_of_place.input_mut().set(&input).unwrap();

        in_place.execute().unwrap();
        out_of_place.execute().unwrap();

        assert_close(
            &in_place.output().to_interleaved(),
            &out_of_place.output().to_interleaved(),
            1e-10,
        );
    }
}
