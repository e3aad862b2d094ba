//! Structural encoding of trees: every node records its kind, its value
//! (constant value, feature index or function name) and its ordered operands.
//!
//! ```json
//! {"kind": "func", "value": "add", "operands": [
//!     {"kind": "var", "value": "0", "operands": []},
//!     {"kind": "const", "value": "2.5", "operands": []}
//! ]}
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ExprError;
use crate::node_utils::tree_mapreduce;
use crate::operator::{Function, Operator};
use crate::tree::Tree;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Const,
    Var,
    Func,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerialTree {
    pub kind: NodeKind,
    pub value: String,
    #[serde(default)]
    pub operands: Vec<SerialTree>,
}

impl From<&Tree> for SerialTree {
    fn from(tree: &Tree) -> Self {
        tree_mapreduce(
            tree.ops(),
            |_, op| {
                let (kind, value) = match *op {
                    Operator::Const(v) => (NodeKind::Const, v.to_string()),
                    Operator::Var(i) => (NodeKind::Var, i.to_string()),
                    Operator::Func(f) => (NodeKind::Func, f.name().to_string()),
                };
                SerialTree {
                    kind,
                    value,
                    operands: Vec::new(),
                }
            },
            |_, f, operands| SerialTree {
                kind: NodeKind::Func,
                value: f.name().to_string(),
                operands,
            },
        )
    }
}

impl TryFrom<&SerialTree> for Tree {
    type Error = ExprError;

    fn try_from(node: &SerialTree) -> Result<Self, Self::Error> {
        let mut ops = Vec::new();
        push_postfix(node, &mut ops)?;
        Tree::from_postfix(ops)
    }
}

fn push_postfix(node: &SerialTree, out: &mut Vec<Operator>) -> Result<(), ExprError> {
    let op = match node.kind {
        NodeKind::Const => Operator::Const(
            node.value
                .trim()
                .parse::<f64>()
                .map_err(|_| ExprError::InvalidNumber(node.value.clone()))?,
        ),
        NodeKind::Var => Operator::Var(
            node.value
                .trim()
                .parse::<usize>()
                .map_err(|_| ExprError::InvalidNumber(node.value.clone()))?,
        ),
        NodeKind::Func => Operator::Func(Function::from_name(&node.value)?),
    };
    if node.operands.len() != op.arity() {
        return Err(ExprError::ArityMismatch {
            name: node.value.clone(),
            expected: op.arity(),
            found: node.operands.len(),
        });
    }
    for operand in &node.operands {
        push_postfix(operand, out)?;
    }
    out.push(op);
    Ok(())
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SerialTree::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Tree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let node = SerialTree::deserialize(deserializer)?;
        Tree::try_from(&node).map_err(D::Error::custom)
    }
}

pub fn to_json(tree: &Tree) -> Result<String, ExprError> {
    Ok(serde_json::to_string(tree)?)
}

pub fn from_json(s: &str) -> Result<Tree, ExprError> {
    let node: SerialTree = serde_json::from_str(s)?;
    Tree::try_from(&node)
}
