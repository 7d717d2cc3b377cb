//! Linguistic variables of the flood model
//!
//! Three inputs (rainfall intensity, river water level, rainfall duration)
//! and two outputs (flood risk, water depth). Every variable has exactly
//! three terms, keyed by a closed enum so a missing term cannot be asked for.

use std::fmt;
use std::marker::PhantomData;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::membership::Trapezoid;

/// A closed set of three linguistic terms
pub trait Term: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// All terms in table order
    const ALL: [Self; 3];

    /// Position of the term in its parameter table
    fn index(self) -> usize;

    /// Short lowercase label
    fn label(self) -> &'static str;
}

/// Terms shared by the three input variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputTerm {
    Low,
    Medium,
    High,
}

impl Term for InputTerm {
    const ALL: [Self; 3] = [InputTerm::Low, InputTerm::Medium, InputTerm::High];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            InputTerm::Low => "low",
            InputTerm::Medium => "medium",
            InputTerm::High => "high",
        }
    }
}

/// Flood-risk output categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTerm {
    Safe,
    Alert,
    Danger,
}

impl Term for RiskTerm {
    const ALL: [Self; 3] = [RiskTerm::Safe, RiskTerm::Alert, RiskTerm::Danger];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            RiskTerm::Safe => "safe",
            RiskTerm::Alert => "alert",
            RiskTerm::Danger => "danger",
        }
    }
}

/// Water-depth output categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthTerm {
    Low,
    Medium,
    High,
}

impl Term for DepthTerm {
    const ALL: [Self; 3] = [DepthTerm::Low, DepthTerm::Medium, DepthTerm::High];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            DepthTerm::Low => "low",
            DepthTerm::Medium => "medium",
            DepthTerm::High => "high",
        }
    }
}

macro_rules! impl_term_display {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

impl_term_display!(InputTerm, RiskTerm, DepthTerm);

/// The three observed inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputVariable {
    Rainfall,
    WaterLevel,
    Duration,
}

impl InputVariable {
    pub const ALL: [InputVariable; 3] = [
        InputVariable::Rainfall,
        InputVariable::WaterLevel,
        InputVariable::Duration,
    ];

    pub fn variable(self) -> &'static LinguisticVariable<InputTerm> {
        match self {
            InputVariable::Rainfall => &RAINFALL,
            InputVariable::WaterLevel => &WATER_LEVEL,
            InputVariable::Duration => &DURATION,
        }
    }

    pub fn name(self) -> &'static str {
        self.variable().name
    }
}

/// A named quantity over a fixed universe with one trapezoid per term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinguisticVariable<T: Term> {
    pub name: &'static str,
    pub unit: &'static str,
    /// Nominal universe bounds
    pub universe: (f64, f64),
    /// Shapes in `T::ALL` order
    shapes: [Trapezoid; 3],
    _terms: PhantomData<T>,
}

impl<T: Term> LinguisticVariable<T> {
    pub const fn new(
        name: &'static str,
        unit: &'static str,
        universe: (f64, f64),
        shapes: [Trapezoid; 3],
    ) -> Self {
        Self {
            name,
            unit,
            universe,
            shapes,
            _terms: PhantomData,
        }
    }

    pub fn shape(&self, term: T) -> &Trapezoid {
        &self.shapes[term.index()]
    }

    pub fn terms(&self) -> impl Iterator<Item = (T, &Trapezoid)> + '_ {
        T::ALL.into_iter().map(move |term| (term, self.shape(term)))
    }

    /// Degree of every term for a crisp value
    pub fn fuzzify(&self, value: f64) -> Memberships<T> {
        Memberships::from_fn(|term| self.shape(term).evaluate(value))
    }
}

/// Rainfall intensity in mm/h
pub static RAINFALL: LinguisticVariable<InputTerm> = LinguisticVariable::new(
    "rainfall",
    "mm/h",
    (0.0, 300.0),
    [
        Trapezoid::new(0.0, 0.0, 50.0, 100.0),
        Trapezoid::new(50.0, 100.0, 150.0, 200.0),
        Trapezoid::new(150.0, 200.0, 300.0, 300.0),
    ],
);

/// River water level in m
pub static WATER_LEVEL: LinguisticVariable<InputTerm> = LinguisticVariable::new(
    "water_level",
    "m",
    (0.0, 5.0),
    [
        Trapezoid::new(0.0, 0.0, 1.0, 2.0),
        Trapezoid::new(1.5, 2.5, 3.1, 5.0),
        Trapezoid::new(2.5, 3.1, 5.0, 5.0),
    ],
);

/// Rainfall duration in h
pub static DURATION: LinguisticVariable<InputTerm> = LinguisticVariable::new(
    "duration",
    "h",
    (0.0, 24.0),
    [
        Trapezoid::new(0.0, 0.0, 2.0, 6.0),
        Trapezoid::new(5.0, 6.0, 10.0, 14.0),
        Trapezoid::new(10.0, 14.0, 24.0, 24.0),
    ],
);

/// Flood risk on a 0-100 scale
pub static FLOOD_RISK: LinguisticVariable<RiskTerm> = LinguisticVariable::new(
    "flood_risk",
    "%",
    (0.0, 100.0),
    [
        Trapezoid::new(0.0, 0.0, 15.0, 40.0),
        Trapezoid::new(30.0, 45.0, 55.0, 70.0),
        Trapezoid::new(60.0, 80.0, 100.0, 100.0),
    ],
);

/// Expected water depth in m
pub static WATER_DEPTH: LinguisticVariable<DepthTerm> = LinguisticVariable::new(
    "water_depth",
    "m",
    (0.0, 3.0),
    [
        Trapezoid::new(0.0, 0.0, 0.3, 0.9),
        Trapezoid::new(0.6, 1.2, 1.8, 2.2),
        Trapezoid::new(1.8, 2.2, 3.0, 3.0),
    ],
);

/// Membership degree of every term of one variable
#[derive(Clone, Copy, PartialEq)]
pub struct Memberships<T: Term> {
    degrees: [f64; 3],
    _terms: PhantomData<T>,
}

impl<T: Term> Memberships<T> {
    pub fn from_fn(mut f: impl FnMut(T) -> f64) -> Self {
        Self {
            degrees: T::ALL.map(&mut f),
            _terms: PhantomData,
        }
    }

    pub fn get(&self, term: T) -> f64 {
        self.degrees[term.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (T, f64)> + '_ {
        T::ALL.into_iter().map(move |term| (term, self.get(term)))
    }

    /// Term with the highest degree; ties go to the earlier term.
    pub fn dominant(&self) -> Option<(T, f64)> {
        self.iter()
            .filter(|(_, degree)| *degree > 0.0)
            .fold(None, |best, (term, degree)| match best {
                Some((_, d)) if d >= degree => best,
                _ => Some((term, degree)),
            })
    }
}

impl<T: Term> fmt::Debug for Memberships<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(term, degree)| (term.label(), degree)))
            .finish()
    }
}

impl<T: Term> Serialize for Memberships<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        for (term, degree) in self.iter() {
            map.serialize_entry(term.label(), &degree)?;
        }
        map.end()
    }
}
