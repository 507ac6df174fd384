/// Elapsed time at each step of a uniform grid `0, dt, 2dt, ...` strictly below `t_max`
///
/// The step index is the position in the returned vector, so its length is the number
/// of steps in an episode.
///
/// **Panics** if `dt` is not strictly positive and finite, or `t_max` is negative
pub fn time_grid(t_max: f64, dt: f64) -> Vec<f64> {
    assert!(dt > 0.0 && dt.is_finite(), "Invalid time step {dt}. Must be positive and finite.");
    assert!(t_max >= 0.0 && t_max.is_finite(), "Invalid duration {t_max}. Must be non-negative and finite.");
    let steps = (t_max / dt).ceil() as usize;
    (0..steps).map(|i| i as f64 * dt).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_grid_functional() {
        assert_eq!(time_grid(1.0, 0.25), vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(time_grid(1.1, 0.25).len(), 5, "Partial last step included");
        assert!(time_grid(0.0, 0.1).is_empty());
        assert_eq!(time_grid(3.0, 0.025).len(), 120);
    }

    #[test]
    #[should_panic(expected = "Invalid time step")]
    fn time_grid_rejects_zero_step() {
        time_grid(1.0, 0.0);
    }
}
