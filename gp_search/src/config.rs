use core::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use gp_expressions::FunctionSet;
use serde::{Deserialize, Serialize};

use crate::error::GpError;

#[rustfmt::skip]
macro_rules! gp_config_spec {
    ($m:ident) => {
        $m! {
            funcs:
                (String, String::from("add,sub,mul,div"), "funcs",
                 "Comma-separated function names drawn on for internal nodes."),
            const_min:
                (f64, -5.0, "const-min", "Lower bound of freshly drawn constants."),
            const_max:
                (f64, 5.0, "const-max", "Upper bound of freshly drawn constants."),
            p_constant:
                (f64, 0.5, "p-constant", "Probability that a new leaf is a constant rather than a variable."),
            p_full:
                (f64, 0.5, "p-full", "Probability that ramped half-and-half uses the full method."),
            p_leaf:
                (f64, 0.3, "p-leaf", "Probability that grow stops at a leaf once the minimum height is met."),
            min_height:
                (usize, 3, "min-height", "Minimum height of initial trees."),
            max_height:
                (usize, 5, "max-height", "Maximum height of initial trees."),
            n_populations:
                (usize, 1, "n-populations", "Number of independent sub-populations."),
            n_individuals:
                (usize, 100, "n-individuals", "Individuals per sub-population."),
            n_generations:
                (usize, 30, "n-generations", "Generations per sub-population."),
            p_hoist_mutation:
                (f64, 0.1, "p-hoist-mutation", "Relative probability of hoist mutation."),
            p_point_mutation:
                (f64, 0.1, "p-point-mutation", "Relative probability of point mutation."),
            p_subtree_mutation:
                (f64, 0.1, "p-subtree-mutation", "Relative probability of subtree mutation."),
            point_mutation_rate:
                (f64, 0.3, "point-mutation-rate", "Per-node replacement probability of point mutation."),
            p_subtree_crossover:
                (f64, 0.5, "p-subtree-crossover", "Probability that an offspring slot is filled by crossover."),
            parsimony_coeff:
                (f64, 0.0, "parsimony-coeff", "Fitness penalty per tree node."),
            polish_best:
                (bool, true, "polish-best", "Tune the constants of the best program after the search."),
            polish_individuals:
                (usize, 30, "polish-individuals", "Population size of the constant polisher."),
            polish_generations:
                (usize, 30, "polish-generations", "Generations of the constant polisher."),
            polish_mutation_rate:
                (f64, 0.8, "polish-mutation-rate", "Per-constant perturbation probability while polishing."),
            polish_jitter:
                (f64, 1.0, "polish-jitter", "Scale of the normal jitter applied to initial polisher individuals."),
            tournament_size:
                (usize, 3, "tournament-size", "Individuals drawn per tournament."),
            pick_weight_const:
                (f64, 0.1, "pick-weight-const", "Pick weight of constant nodes."),
            pick_weight_var:
                (f64, 0.1, "pick-weight-var", "Pick weight of variable nodes."),
            pick_weight_func:
                (f64, 0.9, "pick-weight-func", "Pick weight of function nodes."),
            patience:
                (usize, 0, "patience", "Generations without improvement before stopping early (0 disables)."),
            parallel_eval:
                (bool, true, "parallel-eval", "Evaluate fitness in parallel."),
            verbose:
                (bool, false, "verbose", "Show a progress bar (requires the `progress` feature)."),
            seed:
                (u64, 0, "seed", "Random seed; 0 derives one from the clock."),
        }
    };
}

macro_rules! __define_config {
    ( $( $name:ident: ($ty:ty, $default:expr, $long:literal, $doc:literal), )* ) => {
        /// Parameters of a genetic-programming run.
        #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct GpConfig {
            $(
                #[doc = $doc]
                pub $name: $ty,
            )*
        }

        impl Default for GpConfig {
            fn default() -> Self {
                Self { $($name: $default,)* }
            }
        }

        impl GpConfig {
            /// `(long name, rendered value)` for every parameter, in declaration order.
            pub fn parameters(&self) -> Vec<(&'static str, String)> {
                vec![$(($long, self.$name.to_string()),)*]
            }
        }
    };
}

gp_config_spec!(__define_config);

fn check_probability(name: &str, p: f64) -> Result<(), GpError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(GpError::Configuration(format!("{name} must be in [0, 1], got {p}")))
    }
}

fn check_non_negative(name: &str, v: f64) -> Result<(), GpError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(GpError::Configuration(format!(
            "{name} must be finite and non-negative, got {v}"
        )))
    }
}

fn check_positive(name: &str, n: usize) -> Result<(), GpError> {
    if n == 0 {
        return Err(GpError::Configuration(format!("{name} must be at least 1")));
    }
    Ok(())
}

impl GpConfig {
    pub fn validate(&self) -> Result<(), GpError> {
        for (name, p) in [
            ("p_constant", self.p_constant),
            ("p_full", self.p_full),
            ("p_leaf", self.p_leaf),
            ("p_hoist_mutation", self.p_hoist_mutation),
            ("p_point_mutation", self.p_point_mutation),
            ("p_subtree_mutation", self.p_subtree_mutation),
            ("point_mutation_rate", self.point_mutation_rate),
            ("p_subtree_crossover", self.p_subtree_crossover),
            ("polish_mutation_rate", self.polish_mutation_rate),
        ] {
            check_probability(name, p)?;
        }

        if self.min_height > self.max_height {
            return Err(GpError::Configuration(format!(
                "min_height ({}) is greater than max_height ({})",
                self.min_height, self.max_height
            )));
        }
        if !(self.const_min.is_finite() && self.const_max.is_finite()) || self.const_min > self.const_max {
            return Err(GpError::Configuration(format!(
                "invalid constant range [{}, {}]",
                self.const_min, self.const_max
            )));
        }

        check_positive("n_individuals", self.n_individuals)?;
        check_positive("n_populations", self.n_populations)?;
        check_positive("n_generations", self.n_generations)?;
        check_positive("tournament_size", self.tournament_size)?;
        if self.polish_best {
            check_positive("polish_individuals", self.polish_individuals)?;
        }

        for (name, w) in [
            ("pick_weight_const", self.pick_weight_const),
            ("pick_weight_var", self.pick_weight_var),
            ("pick_weight_func", self.pick_weight_func),
            ("parsimony_coeff", self.parsimony_coeff),
            ("polish_jitter", self.polish_jitter),
        ] {
            check_non_negative(name, w)?;
        }
        if self.pick_weight_const + self.pick_weight_var + self.pick_weight_func == 0.0 {
            return Err(GpError::Configuration("all pick weights are zero".to_string()));
        }

        Ok(())
    }

    /// Parses [`GpConfig::funcs`].
    pub fn function_set(&self) -> Result<FunctionSet, GpError> {
        Ok(FunctionSet::parse(&self.funcs, ",")?)
    }

    /// The configured seed, or a clock-derived one when `seed == 0`.
    pub fn resolved_seed(&self) -> u64 {
        if self.seed != 0 {
            return self.seed;
        }
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(1, |d| (d.as_nanos() as u64).max(1))
    }
}

impl fmt::Display for GpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.parameters().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}
