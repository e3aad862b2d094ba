use core::fmt;
use core::fmt::Write as _;

use crate::node_utils::{child_roots, tree_mapreduce};
use crate::operator::{Function, Operator};
use crate::tree::Tree;

#[derive(Clone, Debug, Default)]
pub struct StringTreeOptions<'a> {
    pub variable_names: Option<&'a [String]>,
}

pub fn default_string_variable(feature: usize, names: Option<&[String]>) -> String {
    if let Some(name) = names.and_then(|n| n.get(feature)) {
        return name.clone();
    }
    format!("x{feature}")
}

fn strip_outer_parens(mut s: &str) -> &str {
    loop {
        let bytes = s.as_bytes();
        if bytes.len() < 2 || bytes[0] != b'(' || bytes[bytes.len() - 1] != b')' {
            return s;
        }

        let mut depth = 0i32;
        let mut encloses_all = false;
        for (i, &b) in bytes.iter().enumerate() {
            match b {
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        encloses_all = i == bytes.len() - 1;
                        break;
                    }
                }
                _ => {}
            }
        }

        if encloses_all {
            s = &s[1..s.len() - 1];
            continue;
        }

        return s;
    }
}

enum OpStyle<'a> {
    Prefix(&'a str),
    Infix(&'a str),
    Call(&'a str),
}

fn style_of(f: Function) -> OpStyle<'static> {
    match f {
        Function::Neg => OpStyle::Prefix("-"),
        f => match f.infix_symbol() {
            Some(sym) => OpStyle::Infix(sym),
            None => OpStyle::Call(f.name()),
        },
    }
}

fn combine(style: OpStyle<'_>, args: &[String]) -> String {
    match style {
        OpStyle::Prefix(tok) => {
            debug_assert_eq!(args.len(), 1);
            let a = strip_outer_parens(&args[0]);
            if a.contains(' ') || a.starts_with('-') {
                format!("{tok}({a})")
            } else {
                format!("{tok}{a}")
            }
        }
        OpStyle::Infix(tok) => {
            debug_assert_eq!(args.len(), 2);
            format!("({} {} {})", args[0], tok, args[1])
        }
        OpStyle::Call(opname) => {
            let mut out = String::new();
            out.push_str(opname);
            out.push('(');
            for (i, a) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(strip_outer_parens(a));
            }
            out.push(')');
            out
        }
    }
}

/// Human-oriented infix rendering, e.g. `x0 * cos(x1 - 3.2)`.
pub fn string_tree(tree: &Tree, opts: StringTreeOptions<'_>) -> String {
    let s = tree_mapreduce(
        tree.ops(),
        |_, op| match *op {
            Operator::Var(i) => default_string_variable(i, opts.variable_names),
            Operator::Const(v) if v < 0.0 => format!("({v})"),
            ref op => op.to_string(),
        },
        |_, f, children| combine(style_of(f), &children),
    );
    strip_outer_parens(&s).to_string()
}

/// Function-call rendering, e.g. `cos(add(42, x0))`. This is the form accepted
/// by [`crate::parse::parse_code`].
pub fn code_string(tree: &Tree) -> String {
    tree_mapreduce(
        tree.ops(),
        |_, op| op.to_string(),
        |_, f, children| format!("{}({})", f.name(), children.join(", ")),
    )
}

/// One node per line, children indented by `tab_size` spaces under their parent.
pub fn dir_string(tree: &Tree, tab_size: usize) -> String {
    let mut lines = Vec::with_capacity(tree.size());
    tree.walk(|_, op, depth| {
        lines.push(format!("{}{op}", " ".repeat(depth * tab_size)));
        true
    });
    lines.join("\n")
}

/// Graphviz `dot` source with nodes numbered in pre-order.
pub fn graphviz_string(tree: &Tree) -> String {
    fn visit(tree: &Tree, sizes: &[usize], pos: usize, next_id: &mut usize, out: &mut String) {
        let id = *next_id;
        *next_id += 1;
        let op = tree.op(pos);
        let _ = writeln!(out, "  {id} [label=\"{op}\"];");
        for child in child_roots(sizes, pos, op.arity()) {
            let _ = writeln!(out, "  {id} -> {};", *next_id);
            visit(tree, sizes, child, next_id, out);
        }
    }

    let sizes = tree.subtree_sizes();
    let mut out = String::from("digraph G {\n");
    let mut next_id = 0;
    visit(tree, &sizes, tree.root_index(), &mut next_id, &mut out);
    out.push('}');
    out
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&code_string(self))
    }
}

impl Tree {
    pub fn to_infix(&self) -> String {
        string_tree(self, StringTreeOptions::default())
    }
}
