use crate::assert_interval;

/// Epsilon greedy distribution over `q_values`
///
/// The first maximal action gets `1 - epsilon`, every other action `epsilon / (n - 1)`.
pub(super) fn weights(q_values: &[f64], epsilon: f64) -> Vec<f64> {
    assert_interval!(epsilon, 0.0, 1.0);
    let greedy = argmax(q_values);
    let others = epsilon / (q_values.len() - 1) as f64;

    let mut weights = vec![others; q_values.len()];
    weights[greedy] = 1.0 - epsilon;
    weights
}

fn argmax(values: &[f64]) -> usize {
    (1..values.len()).fold(0, |best, i| if values[i] > values[best] { i } else { best })
}
