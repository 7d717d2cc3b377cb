//! Trapezoidal membership functions and discretized universes
//!
//! A [`Trapezoid`] is the only shape the flood model uses. Degenerate edges
//! (`a == b` or `c == d`) are open shoulders: the shape stays at 1 past the
//! corner, so the extreme categories of every variable saturate instead of
//! dropping to 0 outside the nominal universe.

use serde::Serialize;

/// Trapezoid with breakpoints `a <= b <= c <= d`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trapezoid {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Trapezoid {
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Degree of membership of `x`, defined on the whole real line.
    pub fn evaluate(&self, x: f64) -> f64 {
        let Self { a, b, c, d } = *self;

        let degree = if x <= a {
            if self.is_left_shoulder() {
                1.0
            } else {
                0.0
            }
        } else if x <= b {
            // a < x <= b, so b > a
            (x - a) / (b - a)
        } else if x < c {
            1.0
        } else if x < d {
            // c <= x < d, so d > c
            (d - x) / (d - c)
        } else if self.is_right_shoulder() {
            1.0
        } else {
            0.0
        };

        degree.clamp(0.0, 1.0)
    }

    /// Evaluate the shape at every point of a universe.
    pub fn sample(&self, universe: &Universe) -> Vec<f64> {
        universe.points().iter().map(|&x| self.evaluate(x)).collect()
    }

    /// Rising edge collapsed into a step at `a`
    pub fn is_left_shoulder(&self) -> bool {
        self.a == self.b
    }

    /// Falling edge collapsed into a step at `d`
    pub fn is_right_shoulder(&self) -> bool {
        self.c == self.d
    }

    pub fn is_well_formed(&self) -> bool {
        self.a <= self.b && self.b <= self.c && self.c <= self.d
    }
}

/// Evenly spaced sample points over `[start, end]`
#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    start: f64,
    end: f64,
    points: Vec<f64>,
}

impl Universe {
    /// `count` points from `start` to `end` inclusive.
    ///
    /// Point `i` is `start + i * step`; the last point is pinned to `end` so
    /// accumulated rounding never moves the upper bound.
    pub fn linspace(start: f64, end: f64, count: usize) -> Self {
        let points = match count {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (end - start) / (count - 1) as f64;
                let mut points: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
                points[count - 1] = end;
                points
            }
        };

        Self { start, end, points }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_regular_trapezoid() {
        let mf = Trapezoid::new(50.0, 100.0, 150.0, 200.0);

        assert_eq!(mf.evaluate(10.0), 0.0);
        assert_eq!(mf.evaluate(50.0), 0.0);
        assert!(approx(mf.evaluate(75.0), 0.5));
        assert_eq!(mf.evaluate(100.0), 1.0);
        assert_eq!(mf.evaluate(125.0), 1.0);
        assert_eq!(mf.evaluate(150.0), 1.0);
        assert!(approx(mf.evaluate(175.0), 0.5));
        assert_eq!(mf.evaluate(200.0), 0.0);
        assert_eq!(mf.evaluate(500.0), 0.0);
    }

    #[test]
    fn test_left_shoulder_saturates() {
        let mf = Trapezoid::new(0.0, 0.0, 50.0, 100.0);

        assert_eq!(mf.evaluate(0.0), 1.0);
        assert_eq!(mf.evaluate(-25.0), 1.0);
        assert!(approx(mf.evaluate(75.0), 0.5));
        assert_eq!(mf.evaluate(100.0), 0.0);
    }

    #[test]
    fn test_right_shoulder_saturates() {
        let mf = Trapezoid::new(150.0, 200.0, 300.0, 300.0);

        assert_eq!(mf.evaluate(300.0), 1.0);
        assert_eq!(mf.evaluate(350.0), 1.0);
        assert_eq!(mf.evaluate(150.0), 0.0);
        assert!(approx(mf.evaluate(175.0), 0.5));
    }

    #[test]
    fn test_triangle_peak() {
        let mf = Trapezoid::new(0.0, 5.0, 5.0, 10.0);

        assert_eq!(mf.evaluate(5.0), 1.0);
        assert!(approx(mf.evaluate(2.5), 0.5));
        assert!(approx(mf.evaluate(7.5), 0.5));
    }

    #[test]
    fn test_well_formed() {
        assert!(Trapezoid::new(1.5, 2.5, 3.1, 5.0).is_well_formed());
        assert!(!Trapezoid::new(2.0, 1.0, 3.0, 4.0).is_well_formed());
    }

    #[test]
    fn test_linspace_endpoints() {
        let universe = Universe::linspace(0.0, 100.0, 1001);
        assert_eq!(universe.len(), 1001);
        assert_eq!(universe.points()[0], 0.0);
        assert_eq!(universe.points()[1000], 100.0);
        assert!(approx(universe.points()[500], 50.0));

        let depth = Universe::linspace(0.0, 3.0, 301);
        assert_eq!(depth.len(), 301);
        assert_eq!(depth.points()[300], 3.0);
        assert!(approx(depth.points()[100], 1.0));
    }

    #[test]
    fn test_linspace_degenerate_counts() {
        assert!(Universe::linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(Universe::linspace(2.0, 3.0, 1).points(), &[2.0]);
    }

    #[test]
    fn test_sample_matches_scalar() {
        let universe = Universe::linspace(0.0, 100.0, 1001);
        let mf = Trapezoid::new(0.0, 0.0, 15.0, 40.0);
        let curve = mf.sample(&universe);

        assert_eq!(curve.len(), universe.len());
        assert_eq!(curve[0], 1.0);
        for (x, mu) in universe.points().iter().zip(&curve) {
            assert_eq!(*mu, mf.evaluate(*x));
        }
    }

    fn trapezoid_strategy() -> impl Strategy<Value = Trapezoid> {
        prop::collection::vec(-100.0..100.0f64, 4).prop_map(|mut v| {
            v.sort_by(|a, b| a.partial_cmp(b).unwrap());
            Trapezoid::new(v[0], v[1], v[2], v[3])
        })
    }

    proptest! {
        #[test]
        fn prop_degree_in_unit_interval(mf in trapezoid_strategy(), x in -500.0..500.0f64) {
            let mu = mf.evaluate(x);
            prop_assert!((0.0..=1.0).contains(&mu));
        }

        #[test]
        fn prop_plateau_is_one(mf in trapezoid_strategy(), t in 0.01..0.99f64) {
            prop_assume!(mf.c > mf.b);
            let x = mf.b + t * (mf.c - mf.b);
            prop_assume!(x > mf.b && x < mf.c);
            prop_assert_eq!(mf.evaluate(x), 1.0);
        }

        #[test]
        fn prop_edges_monotonic(mf in trapezoid_strategy(), s in 0.0..1.0f64, t in 0.0..1.0f64) {
            let (lo, hi) = if s <= t { (s, t) } else { (t, s) };

            let x0 = (mf.a + lo * (mf.b - mf.a)).min(mf.b);
            let x1 = (mf.a + hi * (mf.b - mf.a)).min(mf.b);
            prop_assert!(mf.evaluate(x0) <= mf.evaluate(x1));

            let y0 = (mf.c + lo * (mf.d - mf.c)).min(mf.d);
            let y1 = (mf.c + hi * (mf.d - mf.c)).min(mf.d);
            prop_assert!(mf.evaluate(y0) >= mf.evaluate(y1));
        }
    }
}
