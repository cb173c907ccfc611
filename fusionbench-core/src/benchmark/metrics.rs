//! Accuracy Metrics Against a Reference
//!
//! | Metric      | Definition                                  | Degenerate case         |
//! |-------------|---------------------------------------------|-------------------------|
//! | MSE         | `mean((r - f)²)`                            | -                       |
//! | R²          | `1 - SS_res / SS_tot`                       | constant `r` → NaN      |
//! | Pearson     | `cov(r, f) / (σ_r · σ_f)`                   | constant `r` or `f` → NaN |
//! | SNR (dB)    | `10·log10(mean(f²) / max(ε, mean((r-f)²)))` | silent `f` → floor      |
//!
//! NaN marks "undefined", never "bad": summaries skip it when ranking.
//! All functions expect equal-length slices; the benchmark checks this before
//! any metric runs.

use crate::{quality, signal};

/// Mean squared error
pub fn mse(reference: &[f64], fused: &[f64]) -> f64 {
    if reference.is_empty() {
        return 0.0;
    }
    let ss: f64 = reference
        .iter()
        .zip(fused)
        .map(|(r, f)| (r - f) * (r - f))
        .sum();
    ss / reference.len() as f64
}

/// Coefficient of determination, NaN for a constant reference
pub fn r2(reference: &[f64], fused: &[f64]) -> f64 {
    let m = signal::mean(reference);
    let ss_tot: f64 = reference.iter().map(|r| (r - m) * (r - m)).sum();
    if ss_tot <= 0.0 {
        log_debug!("r2: constant reference, returning NaN");
        return f64::NAN;
    }
    let ss_res: f64 = reference
        .iter()
        .zip(fused)
        .map(|(r, f)| (r - f) * (r - f))
        .sum();
    1.0 - ss_res / ss_tot
}

/// Pearson correlation, NaN when either side has no variance
pub fn pearson(reference: &[f64], fused: &[f64]) -> f64 {
    let mr = signal::mean(reference);
    let mf = signal::mean(fused);

    let (mut cov, mut var_r, mut var_f) = (0.0, 0.0, 0.0);
    for (r, f) in reference.iter().zip(fused) {
        let (dr, df) = (r - mr, f - mf);
        cov += dr * df;
        var_r += dr * dr;
        var_f += df * df;
    }

    if var_r <= 0.0 || var_f <= 0.0 {
        log_debug!("pearson: zero-variance input, returning NaN");
        return f64::NAN;
    }
    (cov / libm::sqrt(var_r * var_f)).clamp(-1.0, 1.0)
}

/// SNR of the fused output with `reference - fused` as the noise estimate
pub fn snr_db(reference: &[f64], fused: &[f64], epsilon: f64) -> f64 {
    let noise: alloc::vec::Vec<f64> = reference.iter().zip(fused).map(|(r, f)| r - f).collect();
    quality::snr_db(fused, &noise, epsilon)
}
