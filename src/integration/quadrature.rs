//! Adaptive Gauss–Kronrod quadrature for one- and two-dimensional boxes.
//!
//! Purpose
//! -------
//! Deterministic backend for the low-dimensional integrals (model A loss
//! and information). Each interval is estimated with the 21-point Kronrod
//! rule and its embedded 10-point Gauss rule; the interval with the
//! largest error estimate is bisected until the summed error drops below
//! `max(abs_tol, rel_tol · |value|)`.
//!
//! Key behaviors
//! -------------
//! - [`integrate_1d`] takes a fallible integrand so errors raised deep in a
//!   nested evaluation propagate with `?` instead of being masked.
//! - [`integrate_box`] integrates over a [`DomainBox`] of dimension 1 or 2.
//!   The two-dimensional case is iterated: the outer rule runs over the
//!   first coordinate and each outer node performs a full adaptive inner
//!   integration over the second.
//! - Running out of subintervals above tolerance is an error
//!   ([`IntegrationError::ToleranceNotMet`]), never a silent result.
//!
//! Conventions
//! -----------
//! - Error estimates follow the classical QUADPACK `qk21` heuristic,
//!   including the round-off floor `50·ε·∫|f|`.
//! - Reported `abs_err` for the nested case is the outer error estimate.
use crate::{
    integration::{
        errors::{IntegrationError, IntegrationResult},
        options::QuadratureOptions,
    },
    models::domain::DomainBox,
};

/// Kronrod abscissae on `[0, 1]`; odd indices are the Gauss nodes, the
/// last entry is the center.
const XGK: [f64; 11] = [
    0.995_657_163_025_808_080_735_527_280_689_003,
    0.973_906_528_517_171_720_077_964_012_084_452,
    0.930_157_491_355_708_226_001_207_180_059_508,
    0.865_063_366_688_984_510_732_096_688_423_493,
    0.780_817_726_586_416_897_063_717_578_345_042,
    0.679_409_568_299_024_406_234_327_365_114_874,
    0.562_757_134_668_604_683_339_000_099_272_694,
    0.433_395_394_129_247_190_799_265_943_165_784,
    0.294_392_862_701_460_198_131_126_603_103_866,
    0.148_874_338_981_631_210_884_826_001_129_720,
    0.0,
];

/// Kronrod weights matching [`XGK`].
const WGK: [f64; 11] = [
    0.011_694_638_867_371_874_278_064_396_062_192,
    0.032_558_162_307_964_727_478_818_972_459_390,
    0.054_755_896_574_351_996_031_381_300_244_580,
    0.075_039_674_810_919_952_767_043_140_916_190,
    0.093_125_454_583_697_605_535_065_465_083_366,
    0.109_387_158_802_297_641_899_210_590_325_805,
    0.123_491_976_262_065_851_077_958_109_831_074,
    0.134_709_217_311_473_325_928_054_001_771_707,
    0.142_775_938_577_060_080_797_094_273_138_717,
    0.147_739_104_901_338_491_374_841_515_972_068,
    0.149_445_554_002_916_905_664_936_468_389_821,
];

/// Gauss weights for `XGK[1], XGK[3], …, XGK[9]`.
const WG: [f64; 5] = [
    0.066_671_344_308_688_137_593_568_809_893_332,
    0.149_451_349_150_580_593_145_776_339_657_697,
    0.219_086_362_515_982_043_995_534_934_228_163,
    0.269_266_719_309_996_355_091_226_921_569_469,
    0.295_524_224_714_752_870_173_892_994_651_338,
];

/// Accepted result of an adaptive integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureValue {
    pub value: f64,
    pub abs_err: f64,
    pub intervals: usize,
    pub evaluations: usize,
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    lower: f64,
    upper: f64,
    value: f64,
    abs_err: f64,
}

fn gauss_kronrod_21<F>(f: &mut F, lower: f64, upper: f64) -> IntegrationResult<Segment>
where
    F: FnMut(f64) -> IntegrationResult<f64>,
{
    let center = 0.5 * (lower + upper);
    let half = 0.5 * (upper - lower);

    let f_center = f(center)?;
    let mut res_kronrod = WGK[10] * f_center;
    let mut res_gauss = 0.0;
    let mut res_abs = res_kronrod.abs();
    let mut left = [0.0; 10];
    let mut right = [0.0; 10];

    for j in 0..10 {
        let dx = half * XGK[j];
        let (fl, fr) = (f(center - dx)?, f(center + dx)?);
        left[j] = fl;
        right[j] = fr;
        res_kronrod += WGK[j] * (fl + fr);
        res_abs += WGK[j] * (fl.abs() + fr.abs());
        if j % 2 == 1 {
            res_gauss += WG[j / 2] * (fl + fr);
        }
    }

    let mean = 0.5 * res_kronrod;
    let mut res_asc = WGK[10] * (f_center - mean).abs();
    for j in 0..10 {
        res_asc += WGK[j] * ((left[j] - mean).abs() + (right[j] - mean).abs());
    }

    let scale = half.abs();
    res_abs *= scale;
    res_asc *= scale;
    let mut abs_err = ((res_kronrod - res_gauss) * half).abs();
    if res_asc != 0.0 && abs_err != 0.0 {
        abs_err = res_asc * (200.0 * abs_err / res_asc).powf(1.5).min(1.0);
    }
    if res_abs > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        abs_err = abs_err.max(50.0 * f64::EPSILON * res_abs);
    }

    Ok(Segment { lower, upper, value: res_kronrod * half, abs_err })
}

/// Adaptively integrate a fallible scalar function over `[lower, upper]`.
///
/// # Errors
/// - Any error returned by `f`, unchanged.
/// - [`IntegrationError::ToleranceNotMet`] when `opts.limit` subintervals
///   are in use (or an interval can no longer be bisected) and the summed
///   error estimate is still above tolerance.
pub fn integrate_1d<F>(
    mut f: F, lower: f64, upper: f64, opts: &QuadratureOptions,
) -> IntegrationResult<QuadratureValue>
where
    F: FnMut(f64) -> IntegrationResult<f64>,
{
    let mut segments = vec![gauss_kronrod_21(&mut f, lower, upper)?];
    let mut evaluations = 21;

    loop {
        let value: f64 = segments.iter().map(|s| s.value).sum();
        let abs_err: f64 = segments.iter().map(|s| s.abs_err).sum();
        let tolerance = opts.tolerance_for(value);
        if abs_err <= tolerance {
            return Ok(QuadratureValue { value, abs_err, intervals: segments.len(), evaluations });
        }

        let not_met = IntegrationError::ToleranceNotMet {
            value,
            abs_err,
            tolerance,
            intervals: segments.len(),
        };
        if segments.len() >= opts.limit {
            return Err(not_met);
        }

        let worst = segments
            .iter()
            .enumerate()
            .fold(0, |best, (i, s)| if s.abs_err > segments[best].abs_err { i } else { best });
        let segment = segments.swap_remove(worst);
        let mid = 0.5 * (segment.lower + segment.upper);
        if mid <= segment.lower || mid >= segment.upper {
            return Err(not_met);
        }
        segments.push(gauss_kronrod_21(&mut f, segment.lower, mid)?);
        segments.push(gauss_kronrod_21(&mut f, mid, segment.upper)?);
        evaluations += 42;
    }
}

fn checked<F: Fn(&[f64]) -> f64>(f: &F, point: &[f64]) -> IntegrationResult<f64> {
    let value = f(point);
    if !value.is_finite() {
        return Err(IntegrationError::NonFiniteIntegrand { point: point.to_vec(), value });
    }
    Ok(value)
}

/// Integrate `f` over a one- or two-dimensional box.
///
/// # Errors
/// - [`IntegrationError::UnsupportedDimension`] for boxes of dimension > 2.
/// - [`IntegrationError::NonFiniteIntegrand`] at the first NaN/∞ evaluation.
/// - [`IntegrationError::ToleranceNotMet`] from the outer or any inner
///   integration.
pub fn integrate_box<F>(
    f: &F, domain: &DomainBox, opts: &QuadratureOptions,
) -> IntegrationResult<QuadratureValue>
where
    F: Fn(&[f64]) -> f64,
{
    match domain.intervals() {
        [outer] => integrate_1d(|x| checked(f, &[x]), outer.lower(), outer.upper(), opts),
        [outer, inner] => {
            let mut inner_evaluations = 0;
            let mut result = integrate_1d(
                |x| {
                    let line = integrate_1d(
                        |y| checked(f, &[x, y]),
                        inner.lower(),
                        inner.upper(),
                        opts,
                    )?;
                    inner_evaluations += line.evaluations;
                    Ok(line.value)
                },
                outer.lower(),
                outer.upper(),
                opts,
            )?;
            result.evaluations = inner_evaluations;
            Ok(result)
        }
        intervals => Err(IntegrationError::UnsupportedDimension {
            dim: intervals.len(),
            reason: "Quadrature handles one- and two-dimensional boxes only.",
        }),
    }
}
