use num_complex::Complex64;

use super::{hamiltonian, QState};
use crate::error::{Error, Result};

/// Strategy used to build the propagator for a single time step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Propagator {
    /// First order expansion `1 - iH dt`, cheap but neither exact nor unitary
    Approximate,
    /// Exact propagator `exp(-iH dt)` from the spectral decomposition of `H`
    #[default]
    Exact,
}

/// Eigen-decomposition of the single-qubit Hamiltonian for a fixed field
///
/// The energies are `+sqrt(1 + h^2)` and `-sqrt(1 + h^2)`, listed in that order, and
/// `eigenstates[k]` is the normalized eigenvector of `energies[k]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spectrum {
    pub energies: [f64; 2],
    pub eigenstates: [[Complex64; 2]; 2],
}

impl Spectrum {
    /// Diagonalize `H(field)` in closed form
    pub fn new(field: f64) -> Self {
        let omega = field.hypot(1.0);
        let energies = [omega, -omega];
        Self {
            energies,
            eigenstates: energies.map(|energy| eigenstate(field, energy)),
        }
    }

    /// Evolve `psi` for a time `dt` by rotating the phase of each eigencomponent
    pub fn propagate(&self, psi: &[Complex64; 2], dt: f64) -> [Complex64; 2] {
        let mut out = [Complex64::new(0.0, 0.0); 2];
        for (energy, v) in self.energies.iter().zip(&self.eigenstates) {
            let overlap = v[0].conj() * psi[0] + v[1].conj() * psi[1];
            let amplitude = overlap * Complex64::from_polar(1.0, -(energy * dt));
            out[0] += amplitude * v[0];
            out[1] += amplitude * v[1];
        }
        out
    }
}

/// Normalized eigenvector of `[[h, 1], [1, -h]]` for the eigenvalue `energy`
///
/// `(E + h, 1)` and `(1, E - h)` are parallel because `(E + h)(E - h) = 1`. Picking the
/// one with the larger free component keeps it away from zero for any sign of `h`.
fn eigenstate(field: f64, energy: f64) -> [Complex64; 2] {
    let (upper, lower) = if (energy + field).abs() >= (energy - field).abs() {
        (energy + field, 1.0)
    } else {
        (1.0, energy - field)
    };
    let norm = upper.hypot(lower);
    [
        Complex64::new(upper / norm, 0.0),
        Complex64::new(lower / norm, 0.0),
    ]
}

/// Advance `psi` by one time step `dt` under the constant control `field`
///
/// **Errors** with [`Error::UnsupportedDimension`] unless `psi` describes a single qubit.
pub fn evolve(psi: &[Complex64], dt: f64, field: f64, propagator: Propagator) -> Result<QState> {
    let psi: &[Complex64; 2] = psi
        .try_into()
        .map_err(|_| Error::UnsupportedDimension { found: psi.len() })?;

    let next = match propagator {
        Propagator::Approximate => {
            let h = hamiltonian(field);
            let step = Complex64::new(0.0, -dt);
            [
                psi[0] + step * (h[0][0] * psi[0] + h[0][1] * psi[1]),
                psi[1] + step * (h[1][0] * psi[0] + h[1][1] * psi[1]),
            ]
        }
        Propagator::Exact => Spectrum::new(field).propagate(psi, dt),
    };

    Ok(next.to_vec())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::quantum::{fidelity, norm_deviation, random_state};

    const FIELDS: [f64; 7] = [-4.0, -2.0, -0.5, 0.0, 0.5, 2.0, 4.0];

    fn assert_states_eq(a: &[Complex64], b: &[Complex64], tol: f64) {
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).norm() < tol, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn spectrum_energies() {
        let spectrum = Spectrum::new(-2.0);
        assert_abs_diff_eq!(spectrum.energies[0], 5f64.sqrt(), epsilon = 1e-15);
        assert_abs_diff_eq!(spectrum.energies[1], -5f64.sqrt(), epsilon = 1e-15);
    }

    #[test]
    fn spectrum_eigenstates_functional() {
        for field in FIELDS {
            let h = hamiltonian(field);
            let spectrum = Spectrum::new(field);
            for (energy, v) in spectrum.energies.iter().zip(&spectrum.eigenstates) {
                for row in 0..2 {
                    let hv = h[row][0] * v[0] + h[row][1] * v[1];
                    assert!((hv - *energy * v[row]).norm() < 1e-12, "H v = E v for field {field}");
                }
                assert_abs_diff_eq!(fidelity(v, v), 1.0, epsilon = 1e-14);
            }
            let [up, down] = spectrum.eigenstates;
            assert!(fidelity(&up, &down) < 1e-14, "Eigenstates are orthogonal");
        }
    }

    #[test]
    fn exact_evolution_is_unitary() {
        let mut rng = StdRng::seed_from_u64(42);
        for field in FIELDS {
            for dt in [0.0125, 0.025, 0.3, 2.0] {
                let psi = random_state(&mut rng, 2);
                let next = evolve(&psi, dt, field, Propagator::Exact).unwrap();
                assert!(norm_deviation(&next) < 1e-12, "Norm conserved for field {field}, dt {dt}");
            }
        }
    }

    #[test]
    fn exact_evolution_zero_step() {
        let mut rng = StdRng::seed_from_u64(3);
        for field in FIELDS {
            let psi = random_state(&mut rng, 2);
            let next = evolve(&psi, 0.0, field, Propagator::Exact).unwrap();
            assert_states_eq(&psi, &next, 1e-14);
        }
    }

    #[test]
    fn exact_evolution_matches_closed_form() {
        // exp(-iH dt) = cos(w dt) - i sin(w dt) H / w, since H^2 = w^2
        let mut rng = StdRng::seed_from_u64(11);
        for field in FIELDS {
            let psi = random_state(&mut rng, 2);
            let dt = 0.37;
            let w = (1.0 + field * field).sqrt();
            let h = hamiltonian(field);
            let cos = Complex64::new((w * dt).cos(), 0.0);
            let sin = Complex64::new(0.0, -(w * dt).sin() / w);
            let expected: Vec<Complex64> = (0..2)
                .map(|r| cos * psi[r] + sin * (h[r][0] * psi[0] + h[r][1] * psi[1]))
                .collect();

            let next = evolve(&psi, dt, field, Propagator::Exact).unwrap();
            assert_states_eq(&next, &expected, 1e-12);
        }
    }

    #[test]
    fn approximate_evolution_functional() {
        let mut rng = StdRng::seed_from_u64(5);
        let psi = random_state(&mut rng, 2);
        let (dt, field) = (1e-4, 4.0);

        let approx = evolve(&psi, dt, field, Propagator::Approximate).unwrap();
        let exact = evolve(&psi, dt, field, Propagator::Exact).unwrap();
        assert_states_eq(&approx, &exact, 1e-6);

        // |(1 - iH dt) psi|^2 = 1 + dt^2 <psi|H^2|psi> = 1 + dt^2 (1 + h^2)
        let dt = 0.1;
        let approx = evolve(&psi, dt, field, Propagator::Approximate).unwrap();
        assert_abs_diff_eq!(
            fidelity(&approx, &approx),
            1.0 + dt * dt * (1.0 + field * field),
            epsilon = 1e-12
        );
    }

    #[test]
    fn evolution_rejects_unsupported_dimension() {
        let c = Complex64::new(0.5, 0.0);
        for propagator in [Propagator::Exact, Propagator::Approximate] {
            assert_eq!(
                evolve(&[c, c, c, c], 0.1, 1.0, propagator),
                Err(Error::UnsupportedDimension { found: 4 })
            );
            assert_eq!(
                evolve(&[c], 0.1, 1.0, propagator),
                Err(Error::UnsupportedDimension { found: 1 })
            );
        }
    }
}
