//! Miscellaneous tools.

use ndarray::{ self as nd, Ix1, concatenate };
use crate::Arr1;

/// Generate an array of frequency-space coordinates to accompany a FFT of `n`
/// points for sampling interval `d`.
///
/// Coordinates are given in the native ordering of the transform: zero first,
/// then positive frequencies in ascending order, then negative frequencies in
/// ascending order.
///
/// ```
/// use ndarray as nd;
/// use wellsim::utils::fft_freq;
///
/// let f = fft_freq(4, 0.25);
/// assert_eq!(f, nd::array![0.0, 1.0, -2.0, -1.0]);
/// ```
pub fn fft_freq(n: usize, d: f64) -> nd::Array1<f64> {
    let m = (n + 1) / 2;
    let fp: nd::Array1<f64>
        = (0..m)
        .map(|k| k as f64 / (n as f64 * d))
        .collect();
    let fm: nd::Array1<f64>
        = (1..n - m + 1).rev()
        .map(|k| -(k as f64) / (n as f64 * d))
        .collect();
    concatenate!(nd::Axis(0), fp, fm)
}

/// Left Riemann sum of a sampled function with uniform spacing `dx`.
pub fn riemann<S>(y: &nd::ArrayBase<S, Ix1>, dx: f64) -> f64
where S: nd::Data<Elem = f64>
{
    y.sum() * dx
}

/// Return `true` if every element of both arrays is finite.
pub fn all_finite<S, T>(a: &Arr1<S>, b: &Arr1<T>) -> bool
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    a.iter().chain(b.iter()).all(|x| x.is_finite())
}

// perform the operation `a + v * b` succinctly
pub(crate) fn array_step<S, T>(a: &Arr1<S>, v: f64, b: &Arr1<T>)
    -> nd::Array1<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    nd::Zip::from(a).and(b)
        .map_collect(|ak, bk| ak + v * bk)
}
