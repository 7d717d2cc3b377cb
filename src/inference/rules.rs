//! Rule base and rule evaluation
//!
//! The rule base is a flat table of 27 conjunctive rules covering every
//! combination of input terms. A rule's identity is its 1-based position.

use serde::Serialize;

use super::fuzzifier::InputMemberships;
use super::variables::{DepthTerm, InputTerm, RiskTerm};
use super::variables::DepthTerm as D;
use super::variables::InputTerm::{High as H, Low as L, Medium as M};
use super::variables::RiskTerm::{Alert, Danger, Safe};

/// IF rainfall AND water level AND duration THEN risk, depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rule {
    pub rainfall: InputTerm,
    pub water_level: InputTerm,
    pub duration: InputTerm,
    pub risk: RiskTerm,
    pub depth: DepthTerm,
}

impl Rule {
    const fn new(
        rainfall: InputTerm,
        water_level: InputTerm,
        duration: InputTerm,
        risk: RiskTerm,
        depth: DepthTerm,
    ) -> Self {
        Self {
            rainfall,
            water_level,
            duration,
            risk,
            depth,
        }
    }

    pub fn antecedent(&self) -> (InputTerm, InputTerm, InputTerm) {
        (self.rainfall, self.water_level, self.duration)
    }

    /// Min-conjunction of the three antecedent degrees
    pub fn firing_strength(&self, memberships: &InputMemberships) -> f64 {
        memberships
            .rainfall
            .get(self.rainfall)
            .min(memberships.water_level.get(self.water_level))
            .min(memberships.duration.get(self.duration))
    }
}

/// The fixed rule base, ordered by (rainfall, water level, duration)
pub static RULE_BASE: [Rule; 27] = [
    Rule::new(L, L, L, Safe, D::Low),
    Rule::new(L, L, M, Safe, D::Low),
    Rule::new(L, L, H, Alert, D::Medium),
    Rule::new(L, M, L, Alert, D::Medium),
    Rule::new(L, M, M, Alert, D::Medium),
    Rule::new(L, M, H, Alert, D::Medium),
    Rule::new(L, H, L, Alert, D::Medium),
    Rule::new(L, H, M, Alert, D::Medium),
    Rule::new(L, H, H, Danger, D::High),
    Rule::new(M, L, L, Alert, D::Medium),
    Rule::new(M, L, M, Alert, D::Medium),
    Rule::new(M, L, H, Alert, D::Medium),
    Rule::new(M, M, L, Alert, D::Medium),
    Rule::new(M, M, M, Alert, D::Medium),
    Rule::new(M, M, H, Danger, D::High),
    Rule::new(M, H, L, Danger, D::High),
    Rule::new(M, H, M, Danger, D::High),
    Rule::new(M, H, H, Danger, D::High),
    Rule::new(H, L, L, Alert, D::Medium),
    Rule::new(H, L, M, Alert, D::Medium),
    Rule::new(H, L, H, Danger, D::High),
    Rule::new(H, M, L, Danger, D::High),
    Rule::new(H, M, M, Danger, D::High),
    Rule::new(H, M, H, Danger, D::High),
    Rule::new(H, H, L, Danger, D::High),
    Rule::new(H, H, M, Danger, D::High),
    Rule::new(H, H, H, Danger, D::High),
];

/// A rule whose firing strength is above zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiredRule {
    /// 1-based position in the rule base
    pub id: usize,
    #[serde(flatten)]
    pub rule: Rule,
    /// Firing strength in (0, 1]
    pub firing: f64,
}

impl FiredRule {
    pub fn risk(&self) -> RiskTerm {
        self.rule.risk
    }

    pub fn depth(&self) -> DepthTerm {
        self.rule.depth
    }
}

/// Fire every rule against the memberships and keep the active ones,
/// in rule-base order.
pub fn evaluate_rules(rules: &[Rule], memberships: &InputMemberships) -> Vec<FiredRule> {
    rules
        .iter()
        .enumerate()
        .filter_map(|(i, rule)| {
            let firing = rule.firing_strength(memberships);
            (firing > 0.0).then_some(FiredRule {
                id: i + 1,
                rule: *rule,
                firing,
            })
        })
        .collect()
}
