use core::fmt;
use core::str::FromStr;

use crate::error::ExprError;
use crate::operator::Function;

/// A de-duplicated subset of the built-in catalog, indexed by arity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSet {
    functions: Vec<Function>,
    by_arity: [Vec<Function>; 4],
}

impl FunctionSet {
    pub fn new(functions: impl IntoIterator<Item = Function>) -> Result<Self, ExprError> {
        let mut unique: Vec<Function> = Vec::new();
        for f in functions {
            if !unique.contains(&f) {
                unique.push(f);
            }
        }
        if unique.is_empty() {
            return Err(ExprError::EmptyFunctionSet);
        }
        let mut by_arity: [Vec<Function>; 4] = Default::default();
        for &f in &unique {
            by_arity[f.arity()].push(f);
        }
        Ok(Self {
            functions: unique,
            by_arity,
        })
    }

    /// Parses a `sep`-delimited list of names such as `"add,sub,mul,div"`.
    pub fn parse(names: &str, sep: &str) -> Result<Self, ExprError> {
        if names.trim().is_empty() {
            return Err(ExprError::EmptyFunctionSet);
        }
        let functions = names
            .split(sep)
            .map(Function::from_name)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(functions)
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn of_arity(&self, arity: usize) -> &[Function] {
        self.by_arity.get(arity).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Arities with at least one function, ascending.
    pub fn arities(&self) -> Vec<usize> {
        (1..self.by_arity.len())
            .filter(|&a| !self.by_arity[a].is_empty())
            .collect()
    }

    pub fn contains(&self, f: Function) -> bool {
        self.functions.contains(&f)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl FromStr for FunctionSet {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, ",")
    }
}

impl fmt::Display for FunctionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, func) in self.functions.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(func.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_list() {
        let set: FunctionSet = "add,sub,mul,div".parse().unwrap();
        assert_eq!(set.len(), 4);
        assert_eq!(set.of_arity(2).len(), 4);
        assert!(set.of_arity(1).is_empty());
        assert_eq!(set.arities(), vec![2]);
        assert_eq!(set.to_string(), "add,sub,mul,div");
    }

    #[test]
    fn parse_trims_and_deduplicates() {
        let set = FunctionSet::parse(" cos | add |cos| if", "|").unwrap();
        assert_eq!(set.functions(), &[Function::Cos, Function::Add, Function::If]);
        assert_eq!(set.arities(), vec![1, 2, 3]);
    }

    #[test]
    fn parse_rejects_unknown_and_empty() {
        assert!(matches!(
            FunctionSet::parse("add,foo", ","),
            Err(ExprError::UnknownFunction(n)) if n == "foo"
        ));
        assert!(matches!(
            FunctionSet::parse("add,,mul", ","),
            Err(ExprError::UnknownFunction(n)) if n.is_empty()
        ));
        assert!(matches!(FunctionSet::parse("  ", ","), Err(ExprError::EmptyFunctionSet)));
        assert!(matches!(FunctionSet::new([]), Err(ExprError::EmptyFunctionSet)));
    }
}
