//! Interpolating B-splines for the coursework waveform.
//!
//! The fit follows the usual "not-a-knot" construction for odd degrees:
//! the end abscissas are repeated `degree + 1` times and the interior knots
//! are the data abscissas with `(degree + 1) / 2` points dropped at each end.
//! The coefficients come from the square collocation system
//! `B(x_j) · c = y_j`, so the curve passes through every data point.
//!
//! Outside the fitted domain a periodic curve wraps its argument back into
//! `[x_first, x_last)`; inside the domain it is evaluated directly, so the
//! last data point is still honoured exactly.
use ndarray::{Array1, Array2};
use crate::daq::DaqError;
const PIVOT_EPS: f64 = 1e-12;
#[derive(Clone, Debug)]
pub struct SplineCurve {
    knots: Vec<f64>,
    coeffs: Vec<f64>,
    degree: usize,
    domain: (f64, f64),
    periodic: bool,
}
impl SplineCurve {
    pub fn degree(&self) -> usize {
        self.degree
    }
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }
    pub fn period(&self) -> f64 {
        self.domain.1 - self.domain.0
    }
    pub fn is_periodic(&self) -> bool {
        self.periodic
    }
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }
    pub fn evaluate(&self, x: f64) -> f64 {
        let (lo, hi) = self.domain;
        let x = if self.periodic && (x < lo || x > hi) {
            lo + (x - lo).rem_euclid(self.period())
        } else {
            x
        };
        de_boor(&self.knots, &self.coeffs, self.degree, x)
    }
}
/// Fits interpolating splines of a fixed (odd) degree.
#[derive(Clone, Copy, Debug)]
pub struct SplineCurveBuilder {
    degree: usize,
    periodic: bool,
}
impl Default for SplineCurveBuilder {
    fn default() -> Self {
        Self {
            degree: 5,
            periodic: true,
        }
    }
}
impl SplineCurveBuilder {
    pub fn with_degree(degree: usize) -> Self {
        Self {
            degree,
            ..Self::default()
        }
    }
    pub fn periodic(mut self, periodic: bool) -> Self {
        self.periodic = periodic;
        self
    }
    pub fn fit(&self, xs: &[f64], ys: &[f64]) -> Result<SplineCurve, DaqError> {
        let k = self.degree;
        let n = xs.len();
        if k == 0 || k % 2 == 0 {
            return Err(DaqError::SplineFit(format!(
                "only odd degrees are supported, got {k}"
            )));
        }
        if n != ys.len() {
            return Err(DaqError::SplineFit(format!(
                "{n} abscissas but {} ordinates",
                ys.len()
            )));
        }
        if n < k + 1 {
            return Err(DaqError::SplineFit(format!(
                "degree {k} needs at least {} points, got {n}",
                k + 1
            )));
        }
        if xs.iter().chain(ys).any(|v| !v.is_finite()) {
            return Err(DaqError::SplineFit("non-finite control point".into()));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(DaqError::SplineFit(
                "abscissas must be strictly increasing".into(),
            ));
        }
        let knots = not_a_knot_knots(xs, k);
        let mut collocation = Array2::<f64>::zeros((n, n));
        let mut unit = vec![0.0; n];
        for i in 0..n {
            unit[i] = 1.0;
            for (j, &x) in xs.iter().enumerate() {
                collocation[[j, i]] = de_boor(&knots, &unit, k, x);
            }
            unit[i] = 0.0;
        }
        let coeffs = solve_dense(collocation, Array1::from(ys.to_vec()))?;
        Ok(SplineCurve {
            knots,
            coeffs: coeffs.to_vec(),
            degree: k,
            domain: (xs[0], xs[n - 1]),
            periodic: self.periodic,
        })
    }
}
fn not_a_knot_knots(xs: &[f64], k: usize) -> Vec<f64> {
    let n = xs.len();
    let half = (k + 1) / 2;
    let mut knots = Vec::with_capacity(n + k + 1);
    knots.extend(std::iter::repeat(xs[0]).take(k + 1));
    knots.extend_from_slice(&xs[half..n - half]);
    knots.extend(std::iter::repeat(xs[n - 1]).take(k + 1));
    knots
}
/// Index `s` of the knot span `[t_s, t_{s+1})` holding `x`, restricted to the
/// valid range `k..n`. Points at or beyond the right end use the last span.
fn find_span(knots: &[f64], n_coeffs: usize, k: usize, x: f64) -> usize {
    (k..n_coeffs)
        .rev()
        .find(|&i| knots[i] <= x)
        .unwrap_or(k)
}
fn de_boor(knots: &[f64], coeffs: &[f64], k: usize, x: f64) -> f64 {
    let s = find_span(knots, coeffs.len(), k, x);
    let mut d: Vec<f64> = (0..=k).map(|j| coeffs[j + s - k]).collect();
    for r in 1..=k {
        for j in (r..=k).rev() {
            let i = j + s - k;
            let denom = knots[i + k + 1 - r] - knots[i];
            let alpha = if denom == 0.0 {
                0.0
            } else {
                (x - knots[i]) / denom
            };
            d[j] = (1.0 - alpha) * d[j - 1] + alpha * d[j];
        }
    }
    d[k]
}
/// Gaussian elimination with partial pivoting.
fn solve_dense(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>, DaqError> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))
            .unwrap_or(col);
        if a[[pivot, col]].abs() < PIVOT_EPS {
            return Err(DaqError::SplineFit("singular collocation matrix".into()));
        }
        if pivot != col {
            for c in 0..n {
                a.swap([col, c], [pivot, c]);
            }
            b.swap(col, pivot);
        }
        let diag = a[[col, col]];
        for row in col + 1..n {
            let factor = a[[row, col]] / diag;
            if factor == 0.0 {
                continue;
            }
            for c in col..n {
                let upper = a[[col, c]];
                a[[row, c]] -= factor * upper;
            }
            let upper = b[col];
            b[row] -= factor * upper;
        }
    }
    let mut x = Array1::<f64>::zeros(n);
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|c| a[[row, c]] * x[c]).sum();
        x[row] = (b[row] - tail) / a[[row, row]];
    }
    Ok(x)
}
#[cfg(test)]
mod tests {
    use super::*;
    const XS: [f64; 7] = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0];
    const YS: [f64; 7] = [-3.0, -2.0, 4.0, 4.5, 4.0, -2.0, -4.0];
    #[test]
    fn knot_vector_layout() {
        let knots = not_a_knot_knots(&XS, 5);
        assert_eq!(knots.len(), XS.len() + 5 + 1);
        assert_eq!(&knots[..6], &[0.0; 6]);
        assert_eq!(knots[6], 30.0);
        assert_eq!(&knots[7..], &[60.0; 6]);
    }
    #[test]
    fn quintic_passes_through_points() {
        let curve = SplineCurveBuilder::default().fit(&XS, &YS).unwrap();
        for (x, y) in XS.iter().zip(YS) {
            assert!((curve.evaluate(*x) - y).abs() < 1e-9, "x={x}");
        }
    }
    #[test]
    fn cubic_reproduces_a_cubic_polynomial() {
        let f = |x: f64| 0.5 * x * x * x - 2.0 * x + 1.0;
        let xs: Vec<f64> = (0..8).map(|i| i as f64 * 0.7).collect();
        let ys: Vec<f64> = xs.iter().map(|&x| f(x)).collect();
        let curve = SplineCurveBuilder::with_degree(3)
            .periodic(false)
            .fit(&xs, &ys)
            .unwrap();
        for x in [0.1, 1.3, 2.2, 3.9, 4.8] {
            assert!((curve.evaluate(x) - f(x)).abs() < 1e-8, "x={x}");
        }
    }
    #[test]
    fn periodic_wraps_outside_domain() {
        let curve = SplineCurveBuilder::default().fit(&XS, &YS).unwrap();
        for t in [0.5, 7.25, 33.3, 59.5] {
            let v = curve.evaluate(t);
            assert!((curve.evaluate(t + 60.0) - v).abs() < 1e-9);
            assert!((curve.evaluate(t - 60.0) - v).abs() < 1e-9);
            assert!((curve.evaluate(t + 600.0) - v).abs() < 1e-9);
        }
    }
    #[test]
    fn curve_is_smooth_at_interior_knot() {
        let curve = SplineCurveBuilder::default().fit(&XS, &YS).unwrap();
        let h = 1e-4;
        let left = (curve.evaluate(30.0) - curve.evaluate(30.0 - h)) / h;
        let right = (curve.evaluate(30.0 + h) - curve.evaluate(30.0)) / h;
        assert!((left - right).abs() < 1e-2);
    }
    #[test]
    fn rejects_bad_input() {
        let builder = SplineCurveBuilder::default();
        assert!(builder.fit(&XS[..5], &YS[..5]).is_err());
        assert!(builder.fit(&XS, &YS[..6]).is_err());
        let mut unsorted = XS;
        unsorted.swap(2, 3);
        assert!(builder.fit(&unsorted, &YS).is_err());
        assert!(SplineCurveBuilder::with_degree(4).fit(&XS, &YS).is_err());
    }
    #[test]
    fn solve_dense_small_system() {
        let a = Array2::from_shape_vec((2, 2), vec![0.0, 2.0, 1.0, 1.0]).unwrap();
        let b = Array1::from(vec![4.0, 3.0]);
        let x = solve_dense(a, b).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }
}
