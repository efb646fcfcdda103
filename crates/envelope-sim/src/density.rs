//! Gaussian probability density for lateral-offset weighting.

use std::f64::consts::PI;

/// Normal density with zero mean and dispersion `sigma`, evaluated at `z`.
pub fn normal_density(sigma: f64, z: f64) -> f64 {
    let coefficient = 1.0 / (sigma * (2.0 * PI).sqrt());
    let exponent = -0.5 * (z / sigma).powi(2);
    coefficient * exponent.exp()
}

/// Elementwise [`normal_density`], preserving order.
pub fn normal_density_all(sigma: f64, zs: &[f64]) -> Vec<f64> {
    zs.iter().map(|&z| normal_density(sigma, z)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_at_zero() {
        let sigma = 100.0;
        let peak = normal_density(sigma, 0.0);
        let expected = 1.0 / (sigma * (2.0 * PI).sqrt());
        assert!((peak - expected).abs() < 1e-15);
    }

    #[test]
    fn test_symmetric_and_decreasing() {
        let sigma = 100.0;
        let values = normal_density_all(sigma, &[-200.0, -100.0, 0.0, 100.0, 200.0]);
        assert_eq!(values.len(), 5);
        assert_eq!(values[0], values[4]);
        assert_eq!(values[1], values[3]);
        assert!(values[2] > values[1] && values[1] > values[0]);
        for v in &values {
            assert!((0.0..=1.0).contains(v), "density {v} out of range for sigma 100");
        }
    }

    #[test]
    fn test_one_sigma_ratio() {
        let ratio = normal_density(50.0, 50.0) / normal_density(50.0, 0.0);
        assert!((ratio - (-0.5f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input() {
        assert!(normal_density_all(10.0, &[]).is_empty());
    }
}
