//! Mamdani fuzzy inference for flood assessment
//!
//! Pipeline stages, leaf first:
//! - [`membership`] - trapezoid shapes and discretized universes
//! - [`variables`] - linguistic variables and their parameter tables
//! - [`fuzzifier`] - crisp inputs to term degrees
//! - [`rules`] - the 27-rule base and firing strengths
//! - [`aggregate`] - min/max aggregation and centroid defuzzification
//! - [`engine`] - the assembled, immutable engine

pub mod aggregate;
pub mod engine;
pub mod fuzzifier;
pub mod membership;
pub mod rules;
pub mod variables;

pub use aggregate::{centroid, OutputModel};
pub use engine::{Defuzzified, FloodEngine, Inference, DEPTH_RESOLUTION, RISK_RESOLUTION};
pub use fuzzifier::{fuzzify, InputMemberships, Observation};
pub use membership::{Trapezoid, Universe};
pub use rules::{evaluate_rules, FiredRule, Rule, RULE_BASE};
pub use variables::{
    DepthTerm, InputTerm, InputVariable, LinguisticVariable, Memberships, RiskTerm, Term,
    DURATION, FLOOD_RISK, RAINFALL, WATER_DEPTH, WATER_LEVEL,
};
