pub mod constants;
pub mod derivative;
pub mod error;
pub mod evaluate;
pub mod expression_algebra;
pub mod function_set;
pub mod math;
pub mod node_utils;
pub mod operator;
pub mod parse;
pub mod serialization;
pub mod simplify;
pub mod strings;
pub mod tree;

pub use crate::constants::{get_constants, set_constants, ConstantView};
pub use crate::derivative::diff_tree;
pub use crate::error::ExprError;
pub use crate::evaluate::{eval_row, eval_tree_array};
pub use crate::function_set::FunctionSet;
pub use crate::node_utils::{count_depth, subtree_heights, subtree_range, subtree_sizes, tree_mapreduce};
pub use crate::operator::{Function, Operator};
pub use crate::parse::parse_code;
pub use crate::serialization::{from_json, to_json, NodeKind, SerialTree};
pub use crate::simplify::{simplify_in_place, simplify_tree};
pub use crate::strings::{code_string, dir_string, graphviz_string, string_tree, StringTreeOptions};
pub use crate::tree::Tree;
