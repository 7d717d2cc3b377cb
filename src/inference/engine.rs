//! The flood inference engine
//!
//! [`FloodEngine`] owns everything that is fixed for the lifetime of the
//! model: parameter tables, rule base, discretized output universes and the
//! precomputed output curves. It is built once and only read afterwards, so
//! one instance can be shared between threads by reference.

use serde::Serialize;
use tracing::{debug, trace};

use super::aggregate::OutputModel;
use super::fuzzifier::{fuzzify, InputMemberships, Observation};
use super::rules::{evaluate_rules, FiredRule, Rule, RULE_BASE};
use super::variables::{DepthTerm, RiskTerm, FLOOD_RISK, WATER_DEPTH};

/// Sample points over the flood-risk universe `[0, 100]`
pub const RISK_RESOLUTION: usize = 1001;

/// Sample points over the water-depth universe `[0, 3]`
pub const DEPTH_RESOLUTION: usize = 301;

/// Aggregated output sets and their crisp values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Defuzzified {
    pub risk_curve: Vec<f64>,
    pub depth_curve: Vec<f64>,
    /// Centroid of `risk_curve`, `None` when no rule fired
    pub flood_value: Option<f64>,
    /// Centroid of `depth_curve`, `None` when no rule fired
    pub depth_value: Option<f64>,
}

/// Full result of one pass through the pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inference {
    pub observation: Observation,
    pub memberships: InputMemberships,
    pub fired: Vec<FiredRule>,
    pub output: Defuzzified,
}

/// Immutable Mamdani engine for flood risk and water depth
#[derive(Debug, Clone)]
pub struct FloodEngine {
    rules: &'static [Rule],
    risk: OutputModel<RiskTerm>,
    depth: OutputModel<DepthTerm>,
}

impl FloodEngine {
    pub fn new() -> Self {
        Self {
            rules: &RULE_BASE,
            risk: OutputModel::new(&FLOOD_RISK, RISK_RESOLUTION),
            depth: OutputModel::new(&WATER_DEPTH, DEPTH_RESOLUTION),
        }
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    pub fn risk_model(&self) -> &OutputModel<RiskTerm> {
        &self.risk
    }

    pub fn depth_model(&self) -> &OutputModel<DepthTerm> {
        &self.depth
    }

    /// Degrees of every input term for one observation
    pub fn fuzzify(&self, rainfall: f64, water_level: f64, duration: f64) -> InputMemberships {
        let memberships = fuzzify(&Observation::new(rainfall, water_level, duration));
        trace!(?memberships, "fuzzified inputs");
        memberships
    }

    /// Active rules in rule-base order
    pub fn evaluate_rules(&self, memberships: &InputMemberships) -> Vec<FiredRule> {
        let fired = evaluate_rules(self.rules, memberships);
        for rule in &fired {
            debug!(
                id = rule.id,
                firing = rule.firing,
                risk = %rule.risk(),
                depth = %rule.depth(),
                "rule fired"
            );
        }
        fired
    }

    /// Aggregate the fired rules per output and reduce each to its centroid
    pub fn aggregate_and_defuzzify(&self, fired: &[FiredRule]) -> Defuzzified {
        let risk_curve = self.risk.aggregate(fired.iter().map(|r| (r.risk(), r.firing)));
        let depth_curve = self.depth.aggregate(fired.iter().map(|r| (r.depth(), r.firing)));

        let flood_value = self.risk.defuzzify(&risk_curve);
        let depth_value = self.depth.defuzzify(&depth_curve);
        debug!(?flood_value, ?depth_value, active = fired.len(), "defuzzified");

        Defuzzified {
            risk_curve,
            depth_curve,
            flood_value,
            depth_value,
        }
    }

    /// Run fuzzify, rule evaluation and defuzzification in one call
    pub fn infer(&self, observation: &Observation) -> Inference {
        let memberships = self.fuzzify(
            observation.rainfall,
            observation.water_level,
            observation.duration,
        );
        let fired = self.evaluate_rules(&memberships);
        let output = self.aggregate_and_defuzzify(&fired);

        Inference {
            observation: *observation,
            memberships,
            fired,
            output,
        }
    }
}

impl Default for FloodEngine {
    fn default() -> Self {
        Self::new()
    }
}
