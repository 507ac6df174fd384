/// Boltzmann distribution over `q_values` at `temperature`
///
/// A temperature of exactly 0 is replaced by 1.
pub(super) fn weights(q_values: &[f64], temperature: f64) -> Vec<f64> {
    assert!(
        temperature >= 0.0 && temperature.is_finite(),
        "Invalid softmax temperature {temperature}. Must be finite and non-negative."
    );
    let tau = if temperature == 0.0 { 1.0 } else { temperature };
    let max = q_values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let exponentials: Vec<f64> = q_values.iter().map(|q| ((q - max) / tau).exp()).collect();
    let sum: f64 = exponentials.iter().sum();
    exponentials.into_iter().map(|x| x / sum).collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn softmax_weights() {
        let w = weights(&[0.0, 3f64.ln()], 1.0);
        assert_abs_diff_eq!(w[0], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(w[1], 0.75, epsilon = 1e-12);

        assert_eq!(weights(&[0.0, 3f64.ln()], 0.0), w, "Zero temperature behaves like 1");

        let hot = weights(&[0.0, 3f64.ln()], 1e6);
        assert_abs_diff_eq!(hot[0], 0.5, epsilon = 1e-6);

        let cold = weights(&[0.0, 1.0], 1e-3);
        assert_abs_diff_eq!(cold[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn softmax_weights_large_values() {
        let w = weights(&[1000.0, 1000.0, 999.0], 1.0);
        assert!(w.iter().all(|x| x.is_finite()));
        assert_abs_diff_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(w[0], w[1], epsilon = 1e-15);
    }
}
