//! Integrated quantities computed from a wavefunction.

use ndarray as nd;
use crate::{
    Arr1,
    laplacian::Laplacian,
    timedep::WaveFunction,
};

/// Compute the expected energy ⟨ψ|H|ψ⟩ as a Riemann sum,
/// ```text
/// E = dx ∑ [ -½ (ψ_r ∇²ψ_r + ψ_i ∇²ψ_i) + V (ψ_r² + ψ_i²) ]
/// ```
///
/// The result is not divided by the norm of `q`.
///
/// *Panics if `V` or `q` do not match the length of `lap`*.
pub fn expected_energy<L, S>(lap: &L, V: &Arr1<S>, q: &WaveFunction) -> f64
where
    L: Laplacian,
    S: nd::Data<Elem = f64>,
{
    let re = q.get_re();
    let im = q.get_im();
    let d2re = lap.apply(re);
    let d2im = lap.apply(im);
    let mut acc: f64 = 0.0;
    nd::Zip::from(re).and(im).and(&d2re).and(&d2im).and(V)
        .for_each(|r, i, d2r, d2i, Vk| {
            acc += -0.5 * (r * d2r + i * d2i) + Vk * (r * r + i * i);
        });
    acc * lap.get_dx()
}

/// Compute the total probability ∑ (ψ_r² + ψ_i²) *dx*.
pub fn total_probability(q: &WaveFunction, dx: f64) -> f64 { q.norm(dx) }

/// Relative change in a conserved quantity, `(b - a) / a`.
///
/// Falls back to the absolute change if `a` is zero.
pub fn drift(a: f64, b: f64) -> f64 {
    if a == 0.0 { b - a } else { (b - a) / a }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{ PI, TAU };
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::{
        grid::Grid,
        laplacian::{ FiniteDifference, Spectral },
        potential::Potential,
    };

    #[test]
    fn free_plane_wave_energy() {
        let grid = Grid::new(1.0, 64).unwrap();
        let q = WaveFunction::from_real(
            grid.get_x().mapv(|x| 2.0_f64.sqrt() * (TAU * x).sin()));
        let V = Potential::Free.sample(&grid);
        let e = expected_energy(&Spectral::new(&grid), &V, &q);
        assert_abs_diff_eq!(e, TAU * TAU / 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(total_probability(&q, grid.get_dx()), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn constant_potential_shifts_energy() {
        let grid = Grid::new(1.0, 64).unwrap();
        let q = WaveFunction::from_real(
            grid.get_x().mapv(|x| 2.0_f64.sqrt() * (2.0 * PI * x).cos()));
        let lap = FiniteDifference::new(&grid);
        let V0: nd::Array1<f64> = nd::Array1::zeros(64);
        let V1: nd::Array1<f64> = nd::Array1::from_elem(64, 3.0);
        let e0 = expected_energy(&lap, &V0, &q);
        let e1 = expected_energy(&lap, &V1, &q);
        assert_abs_diff_eq!(e1 - e0, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn drift_is_relative() {
        assert_abs_diff_eq!(drift(2.0, 2.5), 0.25);
        assert_abs_diff_eq!(drift(0.0, 0.5), 0.5);
    }
}
