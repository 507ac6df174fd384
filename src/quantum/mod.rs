use num_complex::Complex64;
use rand::Rng;
use rand_distr::StandardNormal;

pub mod evolution;

pub use evolution::{evolve, Propagator, Spectrum};

/// A pure quantum state given by its complex amplitudes in the computational basis
pub type QState = Vec<Complex64>;

/// Number of amplitudes of a single two-level system
pub const QUBIT_DIM: usize = 2;

/// The instantaneous single-qubit Hamiltonian `[[h, 1], [1, -h]]` for a control field `h`
pub fn hamiltonian(field: f64) -> [[Complex64; 2]; 2] {
    let h = Complex64::new(field, 0.0);
    let one = Complex64::new(1.0, 0.0);
    [[h, one], [one, -h]]
}

/// Magnitude of the inner product `<target|psi>`
///
/// Both states are assumed to be normalized, the result then lies in `[0, 1]` and
/// equals 1 exactly when the states coincide up to a global phase.
pub fn fidelity(target: &[Complex64], psi: &[Complex64]) -> f64 {
    debug_assert_eq!(target.len(), psi.len(), "states must have equal dimension");
    target
        .iter()
        .zip(psi)
        .map(|(t, p)| t.conj() * p)
        .sum::<Complex64>()
        .norm()
}

/// Distance of `<psi|psi>` from 1, used to detect a propagator that fails to conserve the norm
pub fn norm_deviation(psi: &[Complex64]) -> f64 {
    (1.0 - fidelity(psi, psi)).abs()
}

/// Draw a random normalized state of dimension `dim`
///
/// Real and imaginary parts of each amplitude are standard normal, which makes the
/// normalized state uniformly distributed on the unit sphere.
pub fn random_state<R: Rng>(rng: &mut R, dim: usize) -> QState {
    let raw: QState = (0..dim)
        .map(|_| Complex64::new(rng.sample(StandardNormal), rng.sample(StandardNormal)))
        .collect();
    let norm = raw.iter().map(|c| c.norm_sqr()).sum::<f64>().sqrt();
    raw.into_iter().map(|c| c / norm).collect()
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_1_SQRT_2;

    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn hamiltonian_functional() {
        let h = hamiltonian(-2.0);
        assert_eq!(h[0][0], c(-2.0, 0.0));
        assert_eq!(h[1][1], c(2.0, 0.0));
        assert_eq!(h[0][1], h[1][0], "Hamiltonian is symmetric");
    }

    #[test]
    fn fidelity_functional() {
        let target = vec![c(0.0, 0.0), c(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2)];
        let start = vec![c(FRAC_1_SQRT_2, FRAC_1_SQRT_2), c(0.0, 0.0)];

        assert_abs_diff_eq!(fidelity(&target, &target), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(fidelity(&start, &start), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(fidelity(&target, &start), 0.0, epsilon = 1e-15);

        // a global phase does not change the overlap
        let phased: QState = start.iter().map(|a| a * c(0.0, 1.0)).collect();
        assert_abs_diff_eq!(fidelity(&start, &phased), 1.0, epsilon = 1e-15);

        let plus = vec![c(FRAC_1_SQRT_2, 0.0), c(FRAC_1_SQRT_2, 0.0)];
        assert_abs_diff_eq!(fidelity(&plus, &start), 0.5_f64.sqrt(), epsilon = 1e-15);
    }

    #[test]
    fn random_state_is_normalized() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let psi = random_state(&mut rng, QUBIT_DIM);
            assert_eq!(psi.len(), QUBIT_DIM);
            assert!(norm_deviation(&psi) < 1e-14, "Random state has unit norm");
        }
    }
}
