//! floodfis - fuzzy flood risk assessment
//!
//! A Mamdani fuzzy inference engine that turns three crisp observations
//! (rainfall intensity, river water level, rain duration) into a flood risk
//! score on 0..100 and an expected inundation depth on 0..3 m.
//!
//! # Architecture
//!
//! - [`inference`] - membership functions, the 27-rule base, min/max
//!   aggregation and centroid defuzzification
//! - [`assessment`] - risk and depth classes, recommendations, presets
//! - [`report`] - text, JSON and CSV rendering
//! - [`config`] - TOML configuration with environment overrides
//! - [`error`] - structured error codes
//!
//! # Example
//!
//! ```rust
//! use floodfis::{FloodEngine, Observation, RiskLevel};
//!
//! let engine = FloodEngine::new();
//! let result = engine.infer(&Observation::new(260.0, 4.2, 18.0));
//!
//! assert!(result.output.flood_value.unwrap() >= 60.0);
//! assert_eq!(RiskLevel::classify(result.output.flood_value), RiskLevel::Danger);
//! ```

pub mod assessment;
pub mod config;
pub mod error;
pub mod inference;
pub mod report;

pub use assessment::{assess, validate, Assessment, Curves, DepthLevel, Preset, RiskLevel};
pub use config::{ConfigError, FloodConfig, LogLevel, OutputFormat, ReportConfig};
pub use error::{ErrorCode, ErrorContext, FloodError, FloodResult};
pub use inference::{
    Defuzzified, FiredRule, FloodEngine, Inference, InputMemberships, InputTerm, Observation,
    Rule, RiskTerm, DepthTerm, Trapezoid, Universe, RULE_BASE,
};
pub use report::{render, write_report};
