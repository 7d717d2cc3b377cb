//! Risk classification on top of the engine's crisp outputs

use std::fmt;

use serde::Serialize;

use crate::error::{FloodError, FloodResult};
use crate::inference::{
    FiredRule, FloodEngine, Inference, InputMemberships, InputVariable, Observation,
};

/// Flood risk below this is safe
pub const SAFE_BELOW: f64 = 30.0;
/// Flood risk below this (and not safe) is alert
pub const ALERT_BELOW: f64 = 60.0;
/// Depth below this is low (m)
pub const LOW_DEPTH_BELOW: f64 = 1.0;
/// Depth below this (and not low) is medium (m)
pub const MEDIUM_DEPTH_BELOW: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Alert,
    Danger,
    Unknown,
}

impl RiskLevel {
    pub fn classify(flood_value: Option<f64>) -> Self {
        match flood_value {
            None => RiskLevel::Unknown,
            Some(v) if v < SAFE_BELOW => RiskLevel::Safe,
            Some(v) if v < ALERT_BELOW => RiskLevel::Alert,
            Some(_) => RiskLevel::Danger,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "SAFE",
            RiskLevel::Alert => "ALERT",
            RiskLevel::Danger => "DANGER",
            RiskLevel::Unknown => "UNKNOWN",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskLevel::Safe => {
                "Safe. No evacuation needed. Keep following weather updates."
            }
            RiskLevel::Alert => {
                "Alert. Secure valuables, keep watching the water level and stay away from low ground."
            }
            RiskLevel::Danger => {
                "FLOOD DANGER. Evacuate to higher ground now, switch off the mains power and follow official instructions."
            }
            RiskLevel::Unknown => "Insufficient data.",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl DepthLevel {
    pub fn classify(depth_value: Option<f64>) -> Self {
        match depth_value {
            None => DepthLevel::Unknown,
            Some(v) if v < LOW_DEPTH_BELOW => DepthLevel::Low,
            Some(v) if v < MEDIUM_DEPTH_BELOW => DepthLevel::Medium,
            Some(_) => DepthLevel::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DepthLevel::Low => "LOW",
            DepthLevel::Medium => "MEDIUM",
            DepthLevel::High => "HIGH",
            DepthLevel::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for DepthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canned input triples
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// 10 mm/h, 0.25 m, 5 h
    Low,
    /// 140 mm/h, 2.20 m, 8 h
    Medium,
    /// 260 mm/h, 4.20 m, 18 h
    High,
    /// 73 mm/h, 1.55 m, 2 h
    Mixed,
}

impl Preset {
    pub fn observation(&self) -> Observation {
        match self {
            Preset::Low => Observation::new(10.0, 0.25, 5.0),
            Preset::Medium => Observation::new(140.0, 2.20, 8.0),
            Preset::High => Observation::new(260.0, 4.20, 18.0),
            Preset::Mixed => Observation::new(73.0, 1.55, 2.0),
        }
    }
}

/// Reject inputs the engine cannot meaningfully evaluate.
pub fn validate(observation: &Observation) -> FloodResult<()> {
    if observation.is_finite() {
        return Ok(());
    }
    match InputVariable::ALL
        .into_iter()
        .find(|&var| !observation.value(var).is_finite())
    {
        Some(var) => Err(FloodError::invalid_input(var.name(), observation.value(var))),
        None => Ok(()),
    }
}

/// Sampled aggregate curves with their universes, for plotting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curves {
    pub risk_points: Vec<f64>,
    pub risk: Vec<f64>,
    pub depth_points: Vec<f64>,
    pub depth: Vec<f64>,
}

/// Everything a front end shows for one observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub observation: Observation,
    pub memberships: InputMemberships,
    pub fired: Vec<FiredRule>,
    pub flood_value: Option<f64>,
    pub depth_value: Option<f64>,
    pub risk_level: RiskLevel,
    pub depth_level: DepthLevel,
    pub recommendation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curves: Option<Curves>,
}

impl Assessment {
    /// Classify an inference. Curves are kept only when asked for.
    pub fn from_inference(engine: &FloodEngine, inference: Inference, with_curves: bool) -> Self {
        let Inference {
            observation,
            memberships,
            fired,
            output,
        } = inference;

        let risk_level = RiskLevel::classify(output.flood_value);
        let depth_level = DepthLevel::classify(output.depth_value);

        let curves = with_curves.then(|| Curves {
            risk_points: engine.risk_model().universe().points().to_vec(),
            risk: output.risk_curve,
            depth_points: engine.depth_model().universe().points().to_vec(),
            depth: output.depth_curve,
        });

        Self {
            observation,
            memberships,
            fired,
            flood_value: output.flood_value,
            depth_value: output.depth_value,
            risk_level,
            depth_level,
            recommendation: risk_level.recommendation(),
            curves,
        }
    }
}

/// Validate, optionally clamp, run the engine and classify.
pub fn assess(
    engine: &FloodEngine,
    observation: Observation,
    clamp: bool,
    with_curves: bool,
) -> FloodResult<Assessment> {
    validate(&observation)?;
    let observation = if clamp {
        observation.clamped()
    } else {
        observation
    };

    let inference = engine.infer(&observation);
    tracing::info!(
        flood = ?inference.output.flood_value,
        depth = ?inference.output.depth_value,
        active = inference.fired.len(),
        "assessment complete"
    );
    Ok(Assessment::from_inference(engine, inference, with_curves))
}
