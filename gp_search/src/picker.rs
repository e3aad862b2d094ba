use gp_expressions::{Operator, Tree};
use rand::Rng;

use crate::config::GpConfig;

/// Relative pick weight per node kind.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Weighting {
    pub w_const: f64,
    pub w_var: f64,
    pub w_func: f64,
}

impl Default for Weighting {
    fn default() -> Self {
        Self {
            w_const: 0.1,
            w_var: 0.1,
            w_func: 0.9,
        }
    }
}

impl Weighting {
    pub fn from_config(config: &GpConfig) -> Self {
        Self {
            w_const: config.pick_weight_const,
            w_var: config.pick_weight_var,
            w_func: config.pick_weight_func,
        }
    }

    pub fn weight(&self, op: &Operator) -> f64 {
        match op {
            Operator::Const(_) => self.w_const,
            Operator::Var(_) => self.w_var,
            Operator::Func(_) => self.w_func,
        }
    }
}

/// Weighted random choice of a node position, restricted by subtree height.
#[derive(Copy, Clone, Debug, Default)]
pub struct Picker {
    pub weighting: Weighting,
}

impl Picker {
    pub fn new(weighting: Weighting) -> Self {
        Self { weighting }
    }

    /// Picks a node whose subtree height lies in `[min_height, max_height]`.
    ///
    /// Nodes are visited in pre-order and weighted by kind; the node at the
    /// first cumulative weight exceeding a uniform draw in `[0, total)` wins.
    /// Returns `None` when no node carries positive weight.
    pub fn pick<R: Rng + ?Sized>(
        &self,
        tree: &Tree,
        min_height: usize,
        max_height: usize,
        rng: &mut R,
    ) -> Option<usize> {
        let heights = tree.subtree_heights();
        let mut positions = Vec::with_capacity(tree.size());
        let mut cumsum = Vec::with_capacity(tree.size());
        let mut total = 0.0;
        tree.walk(|pos, op, _| {
            if (min_height..=max_height).contains(&heights[pos]) {
                total += self.weighting.weight(op);
            }
            positions.push(pos);
            cumsum.push(total);
            true
        });

        if total <= 0.0 {
            return None;
        }
        let r = rng.random::<f64>() * total;
        // `r` may round up to `total`; the last weighted node is the ceiling.
        let last = cumsum.partition_point(|&c| c < total);
        let idx = cumsum.partition_point(|&c| c <= r).min(last);
        positions.get(idx).copied()
    }
}

#[cfg(test)]
mod tests {
    use gp_expressions::expression_algebra::{cos, var};
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    use super::*;

    #[test]
    fn zero_weights_pick_nothing() {
        let picker = Picker::new(Weighting {
            w_const: 0.0,
            w_var: 0.0,
            w_func: 0.0,
        });
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(picker.pick(&(var(0) + var(1)), 0, 10, &mut rng), None);
    }

    #[test]
    fn height_bounds_exclude_nodes() {
        // only `cos(x0)` has height 1
        let t = cos(var(0)) * var(1);
        let picker = Picker::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let pos = picker.pick(&t, 1, 1, &mut rng).unwrap();
            assert_eq!(t.subtree(pos), cos(var(0)));
        }
    }

    /// Always yields the largest possible sample.
    struct TopRng;

    impl RngCore for TopRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(u8::MAX);
        }
    }

    #[test]
    fn top_draw_picks_last_weighted_node() {
        let t = cos(var(0)) * var(1);
        let picker = Picker::default();
        // pre-order is mul, cos, x0, x1; x1 sits at postfix index 2
        assert_eq!(picker.pick(&t, 0, 10, &mut TopRng), Some(2));
        let pos = picker.pick(&t, 1, 1, &mut TopRng).unwrap();
        assert_eq!(t.subtree(pos), cos(var(0)));
    }
}
