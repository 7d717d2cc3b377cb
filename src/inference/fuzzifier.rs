//! Fuzzification of one observed input triple

use serde::Serialize;

use super::variables::{InputTerm, InputVariable, Memberships, DURATION, RAINFALL, WATER_LEVEL};

/// Raw inputs of one assessment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    /// Rainfall intensity (mm/h)
    pub rainfall: f64,
    /// River water level (m)
    pub water_level: f64,
    /// Rainfall duration (h)
    pub duration: f64,
}

impl Observation {
    pub const fn new(rainfall: f64, water_level: f64, duration: f64) -> Self {
        Self {
            rainfall,
            water_level,
            duration,
        }
    }

    pub fn value(&self, var: InputVariable) -> f64 {
        match var {
            InputVariable::Rainfall => self.rainfall,
            InputVariable::WaterLevel => self.water_level,
            InputVariable::Duration => self.duration,
        }
    }

    /// Clamp every input into its nominal universe.
    pub fn clamped(&self) -> Self {
        let clamp = |var: InputVariable| {
            let (lo, hi) = var.variable().universe;
            self.value(var).clamp(lo, hi)
        };
        Self {
            rainfall: clamp(InputVariable::Rainfall),
            water_level: clamp(InputVariable::WaterLevel),
            duration: clamp(InputVariable::Duration),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.rainfall.is_finite() && self.water_level.is_finite() && self.duration.is_finite()
    }
}

/// Term degrees for the three inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputMemberships {
    pub rainfall: Memberships<InputTerm>,
    pub water_level: Memberships<InputTerm>,
    pub duration: Memberships<InputTerm>,
}

impl InputMemberships {
    pub fn get(&self, var: InputVariable) -> &Memberships<InputTerm> {
        match var {
            InputVariable::Rainfall => &self.rainfall,
            InputVariable::WaterLevel => &self.water_level,
            InputVariable::Duration => &self.duration,
        }
    }
}

/// Degree of every input term. No range is enforced here.
pub fn fuzzify(observation: &Observation) -> InputMemberships {
    InputMemberships {
        rainfall: RAINFALL.fuzzify(observation.rainfall),
        water_level: WATER_LEVEL.fuzzify(observation.water_level),
        duration: DURATION.fuzzify(observation.duration),
    }
}
