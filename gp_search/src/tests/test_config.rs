use gp_expressions::ExprError;

use crate::config::GpConfig;
use crate::error::GpError;
use crate::gp::Gp;

fn config_error(config: GpConfig) -> String {
    match config.validate() {
        Err(GpError::Configuration(msg)) => msg,
        other => panic!("expected a configuration error, got {other:?}"),
    }
}

#[test]
fn defaults_are_valid() {
    let config = GpConfig::default();
    config.validate().unwrap();
    assert_eq!(config.funcs, "add,sub,mul,div");
    assert_eq!((config.min_height, config.max_height), (3, 5));
    assert_eq!(config.n_individuals, 100);
    assert_eq!(config.tournament_size, 3);
    assert_eq!(
        (config.pick_weight_const, config.pick_weight_var, config.pick_weight_func),
        (0.1, 0.1, 0.9)
    );
    assert!(config.polish_best);
    assert_eq!(config.seed, 0);
}

#[test]
fn probabilities_must_be_in_unit_interval() {
    let msg = config_error(GpConfig {
        p_constant: 1.5,
        ..Default::default()
    });
    assert!(msg.contains("p_constant"));
    config_error(GpConfig {
        p_subtree_crossover: -0.1,
        ..Default::default()
    });
    config_error(GpConfig {
        point_mutation_rate: f64::NAN,
        ..Default::default()
    });
}

#[test]
fn ranges_must_be_ordered() {
    let msg = config_error(GpConfig {
        min_height: 4,
        max_height: 2,
        ..Default::default()
    });
    assert!(msg.contains("min_height"));
    config_error(GpConfig {
        const_min: 1.0,
        const_max: -1.0,
        ..Default::default()
    });
}

#[test]
fn sizes_must_be_positive() {
    config_error(GpConfig {
        n_individuals: 0,
        ..Default::default()
    });
    config_error(GpConfig {
        n_populations: 0,
        ..Default::default()
    });
    config_error(GpConfig {
        tournament_size: 0,
        ..Default::default()
    });
    let msg = config_error(GpConfig {
        n_generations: 0,
        ..Default::default()
    });
    assert!(msg.contains("n_generations"));
}

#[test]
fn zero_generations_fail_before_fitting() {
    let result = Gp::new(GpConfig {
        n_generations: 0,
        ..Default::default()
    });
    assert!(matches!(result, Err(GpError::Configuration(msg)) if msg.contains("n_generations")));
}

#[test]
fn pick_weights_must_not_all_be_zero() {
    let msg = config_error(GpConfig {
        pick_weight_const: 0.0,
        pick_weight_var: 0.0,
        pick_weight_func: 0.0,
        ..Default::default()
    });
    assert!(msg.contains("pick weights"));
    config_error(GpConfig {
        pick_weight_var: -1.0,
        ..Default::default()
    });
}

#[test]
fn function_list_errors_surface_from_constructor() {
    let unknown = Gp::new(GpConfig {
        funcs: "add,tan".to_string(),
        ..Default::default()
    });
    assert!(matches!(
        unknown,
        Err(GpError::Expr(ExprError::UnknownFunction(name))) if name == "tan"
    ));

    let empty = Gp::new(GpConfig {
        funcs: " ".to_string(),
        ..Default::default()
    });
    assert!(matches!(empty, Err(GpError::Expr(ExprError::EmptyFunctionSet))));

    let gp = Gp::new(GpConfig {
        funcs: "add, mul ,if".to_string(),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(gp.functions().len(), 3);
}

#[test]
fn deserializes_with_defaults_for_missing_fields() {
    let config: GpConfig = serde_json::from_str(r#"{"n_individuals": 12, "funcs": "add,cos"}"#).unwrap();
    assert_eq!(config.n_individuals, 12);
    assert_eq!(config.funcs, "add,cos");
    assert_eq!(config.n_generations, GpConfig::default().n_generations);

    let back: GpConfig = serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
    assert_eq!(back, config);
}

#[test]
fn parameters_use_long_names() {
    let config = GpConfig::default();
    let params = config.parameters();
    assert_eq!(params[0], ("funcs", "add,sub,mul,div".to_string()));
    assert!(params.contains(&("n-individuals", "100".to_string())));
    assert!(config.to_string().contains("pick-weight-func=0.9"));
}

#[test]
fn zero_seed_is_replaced() {
    let fixed = GpConfig {
        seed: 42,
        ..Default::default()
    };
    assert_eq!(fixed.resolved_seed(), 42);
    assert_ne!(GpConfig::default().resolved_seed(), 0);
}
