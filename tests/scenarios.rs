//! End-to-end scenarios through the public API

use floodfis::{
    assess, render, DepthLevel, DepthTerm, FloodConfig, FloodEngine, Observation, OutputFormat,
    Preset, RiskLevel, RiskTerm, RULE_BASE,
};
use proptest::prelude::*;

fn engine() -> FloodEngine {
    FloodEngine::new()
}

#[test]
fn low_inputs_are_safe_and_shallow() {
    let result = engine().infer(&Observation::new(10.0, 0.25, 5.0));

    let flood = result.output.flood_value.unwrap();
    let depth = result.output.depth_value.unwrap();
    assert!(flood < 30.0, "flood = {}", flood);
    assert!(depth < 1.0, "depth = {}", depth);
}

#[test]
fn high_inputs_fire_only_danger_rules() {
    let result = engine().infer(&Observation::new(260.0, 4.2, 18.0));

    assert!(result.output.flood_value.unwrap() >= 60.0);
    assert!(result.output.depth_value.unwrap() >= 2.0);
    assert!(!result.fired.is_empty());
    for rule in &result.fired {
        assert_eq!(rule.risk(), RiskTerm::Danger);
        assert_eq!(rule.depth(), DepthTerm::High);
    }
}

#[test]
fn out_of_range_inputs_saturate() {
    let engine = engine();
    let beyond = engine.infer(&Observation::new(350.0, 6.0, 25.0));
    let edge = engine.infer(&Observation::new(300.0, 5.0, 24.0));

    assert!(!beyond.fired.is_empty());
    assert_eq!(beyond.fired, edge.fired);
    assert_eq!(beyond.output.flood_value, edge.output.flood_value);
    assert_eq!(beyond.output.depth_value, edge.output.depth_value);
}

#[test]
fn repeated_inference_is_identical() {
    let engine = engine();
    let obs = Observation::new(73.0, 1.55, 2.0);
    let first = engine.infer(&obs);
    let second = engine.infer(&obs);

    assert_eq!(first.fired, second.fired);
    assert_eq!(first.output, second.output);
}

#[test]
fn active_rule_count_stays_within_the_rule_base() {
    let engine = engine();
    for preset in [Preset::Low, Preset::Medium, Preset::High, Preset::Mixed] {
        let result = engine.infer(&preset.observation());
        assert!(result.fired.len() <= RULE_BASE.len());
        assert!(result.fired.iter().all(|r| r.firing > 0.0 && r.firing <= 1.0));
        assert!(result.fired.windows(2).all(|w| w[0].id < w[1].id));
    }
}

#[test]
fn presets_map_to_expected_levels() {
    let engine = engine();

    let cases = [
        (Preset::Low, RiskLevel::Safe, DepthLevel::Low),
        (Preset::Medium, RiskLevel::Alert, DepthLevel::Medium),
        (Preset::High, RiskLevel::Danger, DepthLevel::High),
    ];
    for (preset, risk, depth) in cases {
        let a = assess(&engine, preset.observation(), false, false).unwrap();
        assert_eq!(a.risk_level, risk, "{:?}", preset);
        assert_eq!(a.depth_level, depth, "{:?}", preset);
    }
}

#[test]
fn csv_export_lists_fired_rules() {
    let engine = engine();
    let a = assess(&engine, Preset::Mixed.observation(), false, false).unwrap();

    let mut config = FloodConfig::default();
    config.report.format = OutputFormat::Csv;
    let csv = render(&a, &config.report).unwrap();

    assert_eq!(csv.lines().count(), a.fired.len() + 1);
    assert!(csv.starts_with("ID,Antecedent,Firing,Consequent\n"));
}

#[test]
fn engine_is_shared_across_threads() {
    let engine = engine();
    let expected = engine.infer(&Preset::High.observation());

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| engine.infer(&Preset::High.observation())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().output, expected.output);
        }
    });
}

proptest! {
    #[test]
    fn prop_any_finite_input_fires_min_of_antecedents(
        rainfall in -50.0..400.0f64,
        water_level in -1.0..8.0f64,
        duration in -5.0..36.0f64,
    ) {
        let result = engine().infer(&Observation::new(rainfall, water_level, duration));
        let mu = &result.memberships;

        prop_assert!(result.fired.len() <= RULE_BASE.len());
        for fired in &result.fired {
            let expected = mu
                .rainfall
                .get(fired.rule.rainfall)
                .min(mu.water_level.get(fired.rule.water_level))
                .min(mu.duration.get(fired.rule.duration));
            prop_assert_eq!(fired.firing, expected);
            prop_assert!(fired.firing > 0.0);
            prop_assert_eq!(RULE_BASE[fired.id - 1], fired.rule);
        }

        if let Some(flood) = result.output.flood_value {
            prop_assert!((0.0..=100.0).contains(&flood));
        }
        if let Some(depth) = result.output.depth_value {
            prop_assert!((0.0..=3.0).contains(&depth));
        }
        prop_assert_eq!(result.fired.is_empty(), result.output.flood_value.is_none());
    }
}
