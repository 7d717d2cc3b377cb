//! Rendering assessments as text, JSON or CSV

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write as _};
use std::path::Path;

use crate::assessment::Assessment;
use crate::config::{OutputFormat, ReportConfig};
use crate::error::{FloodError, FloodResult};
use crate::inference::{FiredRule, InputVariable};

/// Render an assessment in the configured format.
pub fn render(assessment: &Assessment, config: &ReportConfig) -> FloodResult<String> {
    match config.format {
        OutputFormat::Text => Ok(format_text(assessment, config.precision)),
        OutputFormat::Json => format_json(assessment),
        OutputFormat::Csv => Ok(format_csv(&assessment.fired)),
    }
}

fn format_value(value: Option<f64>, precision: usize, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.*}{}", precision, v, unit),
        None => "N/A".to_string(),
    }
}

/// `rainfall:low, water_level:low, duration:medium`
pub fn antecedent_label(rule: &FiredRule) -> String {
    let (r, w, d) = rule.rule.antecedent();
    format!(
        "{}:{}, {}:{}, {}:{}",
        InputVariable::Rainfall.name(),
        r,
        InputVariable::WaterLevel.name(),
        w,
        InputVariable::Duration.name(),
        d
    )
}

/// `flood:danger / depth:high`
pub fn consequent_label(rule: &FiredRule) -> String {
    format!("flood:{} / depth:{}", rule.risk(), rule.depth())
}

pub fn format_text(a: &Assessment, precision: usize) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    for var in InputVariable::ALL {
        let lin = var.variable();
        let dominant = match a.memberships.get(var).dominant() {
            Some((term, degree)) => format!("{} {:.2}", term, degree),
            None => "no term".to_string(),
        };
        let _ = writeln!(
            out,
            "{:<12} {:>8} {:<5} ({})",
            lin.name,
            a.observation.value(var),
            lin.unit,
            dominant
        );
    }
    let _ = writeln!(
        out,
        "Flood risk:  {:>8}  {}",
        format_value(a.flood_value, precision, ""),
        a.risk_level
    );
    let _ = writeln!(
        out,
        "Water depth: {:>8}  {}",
        format_value(a.depth_value, precision, " m"),
        a.depth_level
    );
    let _ = writeln!(out, "Recommendation: {}", a.recommendation);
    let _ = writeln!(out);

    if a.fired.is_empty() {
        let _ = writeln!(out, "No rules fired.");
        return out;
    }

    let _ = writeln!(out, "{:>3}  {:<52}  {:>6}  Consequent", "ID", "Antecedent", "Firing");
    for rule in &a.fired {
        let _ = writeln!(
            out,
            "{:>3}  {:<52}  {:>6.3}  {}",
            rule.id,
            antecedent_label(rule),
            rule.firing,
            consequent_label(rule)
        );
    }

    out
}

pub fn format_json(a: &Assessment) -> FloodResult<String> {
    Ok(serde_json::to_string_pretty(a)?)
}

/// Fired-rule table, one row per rule
pub fn format_csv(fired: &[FiredRule]) -> String {
    let mut out = String::from("ID,Antecedent,Firing,Consequent\n");
    for rule in fired {
        let _ = writeln!(
            out,
            "{},{},{:.3},{}",
            rule.id,
            csv_field(&antecedent_label(rule)),
            rule.firing,
            csv_field(&consequent_label(rule))
        );
    }
    out
}

/// Write a rendered report to `path`, or to stdout when none is given.
pub fn write_report(content: &str, path: Option<&Path>) -> FloodResult<()> {
    match path {
        Some(path) => fs::write(path, content).map_err(|e| {
            FloodError::from(e).with_context("path", path.display().to_string())
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
