//! Mamdani aggregation and centroid defuzzification
//!
//! Each fired rule clips its consequent curve at the firing strength (min
//! implication); clipped curves are combined pointwise with max. Both
//! operations are order independent, so the aggregate depends only on the
//! set of fired rules.

use super::membership::Universe;
use super::variables::{LinguisticVariable, Term};

/// An output variable discretized once: universe plus one curve per term
#[derive(Debug, Clone)]
pub struct OutputModel<T: Term> {
    variable: &'static LinguisticVariable<T>,
    universe: Universe,
    curves: [Vec<f64>; 3],
}

impl<T: Term> OutputModel<T> {
    /// Sample every term of `variable` over `resolution` points of its universe.
    pub fn new(variable: &'static LinguisticVariable<T>, resolution: usize) -> Self {
        let (start, end) = variable.universe;
        let universe = Universe::linspace(start, end, resolution);
        let curves = T::ALL.map(|term| {
            let shape = variable.shape(term);
            debug_assert!(shape.is_well_formed(), "{}: malformed {:?} term", variable.name, term);
            shape.sample(&universe)
        });

        Self {
            variable,
            universe,
            curves,
        }
    }

    pub fn variable(&self) -> &'static LinguisticVariable<T> {
        self.variable
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Precomputed curve of one term
    pub fn curve(&self, term: T) -> &[f64] {
        &self.curves[term.index()]
    }

    /// Clip each `(term, strength)` consequent and max-combine them.
    ///
    /// With no consequents the result is all zeros.
    pub fn aggregate(&self, consequents: impl IntoIterator<Item = (T, f64)>) -> Vec<f64> {
        let mut aggregated = vec![0.0_f64; self.universe.len()];

        for (term, strength) in consequents {
            for (acc, &mu) in aggregated.iter_mut().zip(self.curve(term)) {
                *acc = acc.max(mu.min(strength));
            }
        }

        aggregated
    }

    /// Crisp value of an aggregate over this model's universe
    pub fn defuzzify(&self, aggregated: &[f64]) -> Option<f64> {
        centroid(self.universe.points(), aggregated)
    }
}

/// Mass-weighted mean of the sample points, `None` when the mass is zero.
pub fn centroid(points: &[f64], degrees: &[f64]) -> Option<f64> {
    let mass: f64 = degrees.iter().sum();
    if mass > 0.0 {
        let moment: f64 = points.iter().zip(degrees).map(|(x, mu)| x * mu).sum();
        Some(moment / mass)
    } else {
        None
    }
}
