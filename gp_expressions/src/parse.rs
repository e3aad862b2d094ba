//! Parser for the function-call form produced by [`crate::strings::code_string`].
//!
//! Grammar:
//!
//! ```text
//! expr   := number | var | name "(" expr ("," expr)* ")"
//! var    := "x" digits
//! number := ["+" | "-"] (decimal | "inf" | "NaN")
//! ```

use crate::error::ExprError;
use crate::operator::Function;
use crate::tree::Tree;

pub fn parse_code(src: &str) -> Result<Tree, ExprError> {
    let mut p = Parser { src, pos: 0 };
    let tree = p.expr()?;
    p.skip_ws();
    if p.pos != src.len() {
        return Err(p.error("unexpected trailing input"));
    }
    Ok(tree)
}

impl std::str::FromStr for Tree {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s)
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: &str) -> ExprError {
        ExprError::Parse {
            pos: self.pos,
            message: message.to_string(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), ExprError> {
        self.skip_ws();
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", byte as char)))
        }
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        let src = self.src;
        &src[start..self.pos]
    }

    fn expr(&mut self) -> Result<Tree, ExprError> {
        self.skip_ws();
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some(b) if b.is_ascii_digit() || b == b'.' || b == b'-' || b == b'+' => self.number(),
            Some(b) if b.is_ascii_alphabetic() => self.identifier(),
            Some(_) => Err(self.error("unexpected character")),
        }
    }

    fn number(&mut self) -> Result<Tree, ExprError> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'-' | b'+')) {
            self.pos += 1;
        }
        if self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
            self.take_while(|b| b.is_ascii_alphabetic());
        } else {
            let mut prev = 0u8;
            while let Some(b) = self.peek() {
                let ok = b.is_ascii_digit()
                    || b == b'.'
                    || b == b'e'
                    || b == b'E'
                    || ((b == b'-' || b == b'+') && (prev == b'e' || prev == b'E'));
                if !ok {
                    break;
                }
                prev = b;
                self.pos += 1;
            }
        }
        let text = &self.src[start..self.pos];
        text.parse::<f64>()
            .map(Tree::constant)
            .map_err(|_| ExprError::InvalidNumber(text.to_string()))
    }

    fn identifier(&mut self) -> Result<Tree, ExprError> {
        let start = self.pos;
        let name = self.take_while(|b| b.is_ascii_alphanumeric() || b == b'_');

        if let Some(digits) = name.strip_prefix('x') {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return digits
                    .parse::<usize>()
                    .map(Tree::variable)
                    .map_err(|_| ExprError::InvalidNumber(digits.to_string()));
            }
        }
        if name == "inf" || name == "NaN" {
            self.pos = start;
            return self.number();
        }

        let f = Function::from_name(name)?;
        self.expect(b'(')?;
        let mut args = vec![self.expr()?];
        loop {
            self.skip_ws();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    args.push(self.expr()?);
                }
                Some(b')') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.error("expected ',' or ')'")),
            }
        }
        if args.len() != f.arity() {
            return Err(ExprError::ArityMismatch {
                name: f.name().to_string(),
                expected: f.arity(),
                found: args.len(),
            });
        }
        Ok(Tree::new(f, args))
    }
}
