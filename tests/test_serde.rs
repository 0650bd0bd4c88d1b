#![cfg(feature = "serde")]

use evogen::{
    evolution::{LogLevel, SolverOptions},
    selection::{Direction, ElitistSelection, ParetoSelection, StrictDominance},
};

#[test]
fn test_options_from_json() {
    let json = r#"{
        "population_size": 64,
        "max_fail_times": 0,
        "max_generations": 500,
        "crossover_prob": 0.9,
        "mutate_prob": 0.1,
        "log_level": "Minimal",
        "parallel_threshold": 256
    }"#;

    let options: SolverOptions = serde_json::from_str(json).unwrap();

    assert_eq!(options.get_population_size(), 64);
    assert_eq!(options.stagnation_limit(), None);
    assert_eq!(options.get_log_level(), &LogLevel::Minimal);
    assert!(options.validate().is_ok());
}

#[test]
fn test_selection_strategies_serialize() {
    let elitist = ElitistSelection::new(Direction::Minimize);
    let json = serde_json::to_string(&elitist).unwrap();
    assert_eq!(json, r#"{"direction":"Minimize"}"#);

    let pareto: ParetoSelection<StrictDominance> =
        serde_json::from_str(r#"{"dominance":{"direction":"Maximize"}}"#).unwrap();
    assert_eq!(
        pareto,
        ParetoSelection::new(StrictDominance::new(Direction::Maximize))
    );
}
