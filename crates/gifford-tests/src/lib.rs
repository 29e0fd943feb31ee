//! Classical statistical randomness battery for Gifford keystream output.
//!
//! Five tests from the classical literature — frequency (monobit), sequence
//! (serial/poker), series (runs), autocorrelation at fixed lags, and a
//! Maurer-style universal test — each evaluated against its fixed critical
//! value. Every test returns a [`TestResult`] with the raw statistic, the
//! pass/fail verdict, and an informational p-value derived from the
//! statistic's null distribution.
//!
//! The battery consumes the engine's observation sequence (the first
//! feedback byte per step), not the transformed data. A failed test is a
//! normal, reportable outcome, never an error; the only degenerate condition
//! is insufficient input, reported as a failing result with no p-value.

use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use statrs::function::erf::erfc;
use std::f64::consts::SQRT_2;

// ═══════════════════════════════════════════════════════════════════════════════
// Core types
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of a single randomness test.
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    /// Informational only; the verdict comes from the fixed critical value.
    pub p_value: Option<f64>,
    pub statistic: f64,
    pub details: String,
}

/// Critical value for the frequency test statistic.
///
/// Retained as a closed interval even though the statistic is non-negative
/// as computed; the lower bound is kept for fidelity with the source tables.
pub const FREQUENCY_CRITICAL: f64 = 2.7055;

/// Upper critical value for the sequence (serial/poker) test statistic.
pub const SEQUENCE_CRITICAL: f64 = 284.3359;

/// Upper critical value for the series (runs) test statistic.
pub const SERIES_CRITICAL: f64 = 21.0641;

/// Critical bound for the per-lag autocorrelation statistic.
pub const AUTOCORRELATION_CRITICAL: f64 = 3.0;

/// Lags evaluated by the autocorrelation test, one result per lag.
pub const AUTOCORRELATION_LAGS: [usize; 4] = [10, 15, 20, 25];

/// Critical bound for the universal test statistic.
pub const UNIVERSAL_CRITICAL: f64 = 1.2816;

/// Expected per-symbol gap entropy for the universal test (L=8).
pub const UNIVERSAL_EXPECTED: f64 = 7.1836656;

/// Variance term for the universal test normalization (L=8).
pub const UNIVERSAL_VARIANCE: f64 = 3.238;

/// Initialization segment length (in 8-bit symbols) for the universal test.
pub const UNIVERSAL_Q: usize = 2000;

// ═══════════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// Count of 1-bits across a byte slice.
pub fn count_ones(data: &[u8]) -> u64 {
    data.iter().map(|b| b.count_ones() as u64).sum()
}

/// Count of 0-bits across a byte slice; `count_ones + count_zeros == 8 * len`.
pub fn count_zeros(data: &[u8]) -> u64 {
    data.len() as u64 * 8 - count_ones(data)
}

/// Unpack a byte slice into individual bits (MSB first per byte).
fn to_bits(data: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(data.len() * 8);
    for &byte in data {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1);
        }
    }
    bits
}

/// Return a failing `TestResult` when data is too short to evaluate.
fn insufficient(name: &str, needed: usize, got: usize) -> TestResult {
    TestResult {
        name: name.to_string(),
        passed: false,
        p_value: None,
        statistic: 0.0,
        details: format!("Insufficient data: need {needed} bytes, got {got}"),
    }
}

/// The frequency statistic `(zeros - ones)^2 / total_bits`, parameterized so
/// the autocorrelation test can reuse it over a truncated prefix.
fn frequency_statistic(ones: u64, n_bytes: usize) -> f64 {
    let total_bits = (n_bytes * 8) as f64;
    let ones = ones as f64;
    ((total_bits - ones) - ones).powi(2) / total_bits
}

/// Upper-tail chi-squared p-value, `None` if the statistic is out of domain.
fn chi_squared_sf(statistic: f64, df: f64) -> Option<f64> {
    ChiSquared::new(df).ok().map(|dist| dist.sf(statistic))
}

// ═══════════════════════════════════════════════════════════════════════════════
// 1. Frequency (monobit) test
// ═══════════════════════════════════════════════════════════════════════════════

/// Frequency (monobit) test: the 0/1 balance across all bits.
///
/// Statistic `(zeros - ones)^2 / total_bits`; passes inside the closed
/// interval `[-FREQUENCY_CRITICAL, FREQUENCY_CRITICAL]`.
pub fn frequency_test(data: &[u8]) -> TestResult {
    let name = "Frequency test";
    if data.is_empty() {
        return insufficient(name, 1, 0);
    }
    let ones = count_ones(data);
    let zeros = count_zeros(data);
    let statistic = frequency_statistic(ones, data.len());
    TestResult {
        name: name.to_string(),
        passed: (-FREQUENCY_CRITICAL..=FREQUENCY_CRITICAL).contains(&statistic),
        p_value: chi_squared_sf(statistic, 1.0),
        statistic,
        details: format!("ones={ones}, zeros={zeros}, n_bits={}", data.len() * 8),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// 2. Sequence (serial/poker) test
// ═══════════════════════════════════════════════════════════════════════════════

/// Sequence (serial/poker) test: byte values as 256-valued symbols.
///
/// With `k` symbols and per-value occurrence counts, the statistic is
/// `(256/k) * sum(occ^2) - k`; passes at or below [`SEQUENCE_CRITICAL`].
pub fn sequence_test(data: &[u8]) -> TestResult {
    let name = "Sequence test";
    if data.is_empty() {
        return insufficient(name, 1, 0);
    }
    let mut occurrences = [0u64; 256];
    for &b in data {
        occurrences[b as usize] += 1;
    }
    let k = data.len() as f64;
    let sum_sq: f64 = occurrences.iter().map(|&o| (o as f64) * (o as f64)).sum();
    let statistic = sum_sq * (256.0 / k) - k;
    TestResult {
        name: name.to_string(),
        passed: statistic <= SEQUENCE_CRITICAL,
        p_value: chi_squared_sf(statistic, 255.0),
        statistic,
        details: format!("k={}", data.len()),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// 3. Series (runs) test
// ═══════════════════════════════════════════════════════════════════════════════

/// Series (runs) test over run lengths 1..=8 of both bit values.
///
/// The run bookkeeping mirrors the source exactly: a 1-bit banks the length
/// of the zero run it terminates (index clamped at 8) and resets the zero
/// counter, and symmetrically for 0-bits. Expected counts are
/// `e_i = (n - i + 3) / 2^(i+2)` over `n` total bits; the statistic is the
/// summed chi-squared distance of both banks.
pub fn series_test(data: &[u8]) -> TestResult {
    let name = "Series test";
    if data.is_empty() {
        // n = 0 makes e_3 exactly zero, so the statistic is undefined.
        return insufficient(name, 1, 0);
    }
    const K: usize = 8;
    let n = (data.len() * 8) as f64;
    let mut b = [0u64; K + 1];
    let mut g = [0u64; K + 1];
    let mut run_ones = 0usize;
    let mut run_zeros = 0usize;
    for bit in to_bits(data) {
        if bit == 1 {
            run_ones += 1;
            if run_zeros <= K {
                b[run_zeros] += 1;
            }
            run_zeros = 0;
        } else {
            run_zeros += 1;
            if run_ones <= K {
                g[run_ones] += 1;
            }
            run_ones = 0;
        }
    }

    let mut ones_term = 0.0;
    let mut zeros_term = 0.0;
    for i in 1..=K {
        let e = (n - i as f64 + 3.0) / 2f64.powi(i as i32 + 2);
        ones_term += (b[i] as f64 - e).powi(2) / e;
        zeros_term += (g[i] as f64 - e).powi(2) / e;
    }
    let statistic = ones_term + zeros_term;
    TestResult {
        name: name.to_string(),
        passed: statistic <= SERIES_CRITICAL,
        p_value: chi_squared_sf(statistic, 16.0),
        statistic,
        details: format!("ones_term={ones_term:.4}, zeros_term={zeros_term:.4}"),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// 4. Autocorrelation test
// ═══════════════════════════════════════════════════════════════════════════════

/// Autocorrelation at a single lag: the frequency statistic over the first
/// `len - tau` bytes only; passes inside `[-3, 3]`.
pub fn autocorrelation_at(data: &[u8], tau: usize) -> TestResult {
    let name = format!("Autocorrelation test (tau={tau})");
    if data.len() <= tau {
        return insufficient(&name, tau + 1, data.len());
    }
    let head = &data[..data.len() - tau];
    let ones = count_ones(head);
    let statistic = frequency_statistic(ones, head.len());
    TestResult {
        name,
        passed: (-AUTOCORRELATION_CRITICAL..=AUTOCORRELATION_CRITICAL).contains(&statistic),
        p_value: chi_squared_sf(statistic, 1.0),
        statistic,
        details: format!("ones={ones}, n_bytes={}", head.len()),
    }
}

/// Autocorrelation test: one result per lag in [`AUTOCORRELATION_LAGS`].
pub fn autocorrelation_test(data: &[u8]) -> Vec<TestResult> {
    AUTOCORRELATION_LAGS
        .iter()
        .map(|&tau| autocorrelation_at(data, tau))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// 5. Universal (Maurer-style) test
// ═══════════════════════════════════════════════════════════════════════════════

/// Universal (Maurer-style) test with L=8, Q=2000.
///
/// Symbols are the observed bytes with LSB-first bit packing (each byte's
/// bits reversed), reproducing the source's bit-string decomposition order.
/// The table records the most recent 0-based position of each symbol over
/// the first Q symbols; each later symbol contributes `log2` of its gap
/// distance. Requires strictly more than Q observed bytes.
pub fn universal_test(data: &[u8]) -> TestResult {
    let name = "Universal test";
    if data.len() <= UNIVERSAL_Q {
        return insufficient(name, UNIVERSAL_Q + 1, data.len());
    }
    let symbols: Vec<usize> = data.iter().map(|&b| b.reverse_bits() as usize).collect();
    let k_count = symbols.len() - UNIVERSAL_Q;

    let mut table = [0usize; 256];
    for (i, &s) in symbols.iter().take(UNIVERSAL_Q).enumerate() {
        table[s] = i;
    }

    let mut sum = 0.0;
    for (k, &s) in symbols.iter().enumerate().skip(UNIVERSAL_Q) {
        sum += ((k - table[s]) as f64).log2();
        table[s] = k;
    }

    let l = 8.0;
    let kf = k_count as f64;
    let fn_value = sum / kf;
    let c = 0.7 - 0.8 / l + ((4.0 + 32.0 / l) * kf.powf(-3.0 / l)) / 15.0;
    let statistic = (fn_value - UNIVERSAL_EXPECTED) / (c * UNIVERSAL_VARIANCE.sqrt());
    // The normalized statistic is approximately standard normal.
    let p = erfc(statistic.abs() / SQRT_2);
    TestResult {
        name: name.to_string(),
        passed: (-UNIVERSAL_CRITICAL..=UNIVERSAL_CRITICAL).contains(&statistic),
        p_value: Some(p),
        statistic,
        details: format!("fn={fn_value:.6}, K={k_count}"),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Battery
// ═══════════════════════════════════════════════════════════════════════════════

/// Run the full battery in order; autocorrelation expands to one result per
/// lag, so the vector always has 8 entries.
pub fn run_all(data: &[u8]) -> Vec<TestResult> {
    let mut results = vec![frequency_test(data), sequence_test(data), series_test(data)];
    results.extend(autocorrelation_test(data));
    results.push(universal_test(data));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic pseudo-random fixture (simple LCG).
    fn pseudo_random(n: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(n);
        let mut state: u64 = 0xDEAD_BEEF_CAFE_BABE;
        for _ in 0..n {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            data.push((state >> 33) as u8);
        }
        data
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_to_bits() {
        assert_eq!(to_bits(&[0b1011_0001]), vec![1, 0, 1, 1, 0, 0, 0, 1]);
    }

    #[test]
    fn bit_count_invariant() {
        let data = pseudo_random(333);
        assert_eq!(count_ones(&data) + count_zeros(&data), 333u64 * 8);
    }

    #[test]
    fn frequency_boundary_is_eight_n() {
        for n in [1usize, 7, 64] {
            let zeros = vec![0x00u8; n];
            let ones = vec![0xFFu8; n];
            assert_close(frequency_test(&zeros).statistic, (8 * n) as f64);
            assert_close(frequency_test(&ones).statistic, (8 * n) as f64);
            assert!(!frequency_test(&zeros).passed);
        }
    }

    #[test]
    fn frequency_balanced_input_is_zero() {
        let data: Vec<u8> = (0..=255).collect();
        let result = frequency_test(&data);
        assert_close(result.statistic, 0.0);
        assert!(result.passed);
    }

    #[test]
    fn sequence_uniform_histogram_is_zero() {
        let data: Vec<u8> = (0..=255).collect();
        let result = sequence_test(&data);
        assert_close(result.statistic, 0.0);
        assert!(result.passed);
    }

    #[test]
    fn sequence_constant_input_fails() {
        let result = sequence_test(&[0xAA; 16]);
        assert_close(result.statistic, 4080.0);
        assert!(!result.passed);
    }

    #[test]
    fn series_pinned_values() {
        let data: Vec<u8> = (0..=255).collect();
        let result = series_test(&data);
        assert_close(result.statistic, 20.809171826178865);
        assert!(result.passed);

        let patterned: Vec<u8> = [0x6D, 0xB6].repeat(32);
        let result = series_test(&patterned);
        assert_close(result.statistic, 702.9308182862073);
        assert!(!result.passed);
    }

    #[test]
    fn autocorrelation_short_input_per_lag() {
        // 12 bytes: only tau=10 is computable, the other lags are reported
        // as insufficient rather than evaluated.
        let data = vec![0xAAu8; 12];
        let results = autocorrelation_test(&data);
        assert_eq!(results.len(), 4);
        assert!(results[0].details.starts_with("ones="));
        for r in &results[1..] {
            assert!(!r.passed);
            assert!(r.details.contains("Insufficient"));
        }
    }

    #[test]
    fn autocorrelation_pinned_value() {
        let data = pseudo_random(4096);
        let result = autocorrelation_at(&data, 10);
        assert_close(result.statistic, 0.5493147332354381);
        assert!(result.passed);
    }

    #[test]
    fn universal_length_guard() {
        assert!(universal_test(&pseudo_random(2000))
            .details
            .contains("Insufficient"));
        // 2001 bytes is the minimum computable case (K = 1).
        let result = universal_test(&pseudo_random(2001));
        assert!(!result.details.contains("Insufficient"));
    }

    #[test]
    fn universal_constant_input_fails() {
        let result = universal_test(&[0x5A; 2048]);
        assert_close(result.statistic, -5.507247726906809);
        assert!(!result.passed);
    }

    #[test]
    fn pseudo_random_fixture_pinned_statistics() {
        let data = pseudo_random(4096);
        assert_close(frequency_test(&data).statistic, 0.53173828125);
        assert_close(sequence_test(&data).statistic, 277.0);
        assert_close(series_test(&data).statistic, 14.471485068631958);
        assert_close(universal_test(&data).statistic, -0.011391314592655346);
    }

    #[test]
    fn battery_shape_and_empty_input() {
        let results = run_all(&pseudo_random(4096));
        assert_eq!(results.len(), 8);
        assert!(results.iter().all(|r| r.passed));

        for r in run_all(&[]) {
            assert!(!r.passed);
            assert!(r.p_value.is_none());
            assert!(r.details.contains("Insufficient"));
        }
    }

    #[test]
    fn reference_keystream_passes_battery() {
        let mut engine = gifford_core::KeystreamEngine::new(gifford_core::REFERENCE_KEY);
        let mut data = vec![0u8; 4096];
        engine.transform(&mut data);
        let obs = engine.observation_sequence();

        assert_close(frequency_test(obs).statistic, 0.03125);
        assert_close(sequence_test(obs).statistic, 266.875);
        assert!(run_all(obs).iter().all(|r| r.passed));
    }

    #[test]
    fn p_values_are_probabilities() {
        for r in run_all(&pseudo_random(4096)) {
            let p = r.p_value.expect("computable battery must carry a p-value");
            assert!((0.0..=1.0).contains(&p), "{}: p={p}", r.name);
        }
    }
}
