//! Unresolved type expressions.
//!
//! A `TypeExpr` is a type reference exactly as the declaration loader wrote
//! it: `E`, `String`, `Iterator<E>`, `Map.Entry<K, V>`. Whether a bare name is
//! a type parameter, a call-site variable or a declaration is decided later,
//! when the registry lowers the expression in a scope.
//!
//! At the serde boundary a type expression is a plain string.

use bridgeck_common::limits::MAX_TYPE_EXPR_DEPTH;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeExpr {
    pub name: String,
    pub args: Vec<TypeExpr>,
}

impl TypeExpr {
    /// A bare name with no type arguments.
    pub fn simple(name: impl Into<String>) -> Self {
        TypeExpr {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn applied(name: impl Into<String>, args: Vec<TypeExpr>) -> Self {
        TypeExpr {
            name: name.into(),
            args,
        }
    }

    #[inline]
    pub fn is_simple(&self) -> bool {
        self.args.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("malformed type expression `{text}`: {reason}")]
pub struct TypeExprError {
    pub text: String,
    pub reason: &'static str,
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl FromStr for TypeExpr {
    type Err = TypeExprError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        };
        let expr = parser.parse_type(0)?;
        parser.skip_whitespace();
        if parser.pos != parser.bytes.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(expr)
    }
}

impl TryFrom<String> for TypeExpr {
    type Error = TypeExprError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeExpr> for String {
    fn from(value: TypeExpr) -> Self {
        value.to_string()
    }
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn parse_type(&mut self, depth: u32) -> Result<TypeExpr, TypeExprError> {
        if depth > MAX_TYPE_EXPR_DEPTH {
            return Err(self.error("type arguments nested too deeply"));
        }
        self.skip_whitespace();
        let name = self.parse_name()?;
        self.skip_whitespace();

        let mut args = Vec::new();
        if self.peek() == Some(b'<') {
            self.pos += 1;
            loop {
                args.push(self.parse_type(depth + 1)?);
                self.skip_whitespace();
                match self.peek() {
                    Some(b',') => self.pos += 1,
                    Some(b'>') => {
                        self.pos += 1;
                        break;
                    }
                    _ => return Err(self.error("expected `,` or `>`")),
                }
            }
        }

        Ok(TypeExpr { name, args })
    }

    fn parse_name(&mut self) -> Result<String, TypeExprError> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b == b'.' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.error("expected a type name"));
        }
        let name = &self.text[start..self.pos];
        if name.starts_with('.') || name.ends_with('.') || name.contains("..") {
            return Err(self.error("empty qualified name segment"));
        }
        Ok(name.to_string())
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn error(&self, reason: &'static str) -> TypeExprError {
        TypeExprError {
            text: self.text.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
#[path = "../tests/type_expr_tests.rs"]
mod tests;
