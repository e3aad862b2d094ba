use gp_search::GpConfig;
use ndarray::{Array1, Array2};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Rows `(x0, x1)` with both features positive and not linearly related.
#[allow(dead_code)]
pub fn grid(n: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, 2), |(row, feature)| {
        let r = row as f64;
        if feature == 0 {
            0.5 + 0.25 * r
        } else {
            3.0 - 0.4 * r + 0.05 * r * r
        }
    })
}

#[allow(dead_code)]
pub fn sum_targets(x: &Array2<f64>) -> Array1<f64> {
    x.rows().into_iter().map(|row| row[0] + row[1]).collect()
}

#[allow(dead_code)]
pub fn search_config(seed: u64) -> GpConfig {
    GpConfig {
        funcs: "add,sub,mul,div".to_string(),
        n_individuals: 200,
        n_generations: 30,
        min_height: 1,
        max_height: 3,
        parsimony_coeff: 0.001,
        parallel_eval: false,
        polish_best: true,
        polish_individuals: 20,
        polish_generations: 10,
        seed,
        ..Default::default()
    }
}
