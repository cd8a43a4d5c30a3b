//! # Syntax Token Model
//!
//! One lexical unit of the directive syntax notation. Control tokens carry
//! no payload; `LITERAL` carries the verbatim text and `VALUE` the name of
//! the placeholder (e.g. `size`, `time`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token of a directive syntax description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyntaxToken {
    /// Whitespace boundary between elements.
    Separator,
    /// Alternation boundary (`|`).
    Or,
    /// Start of an optional group (`[`).
    LeftBracket,
    /// End of an optional group (`]`).
    RightBracket,
    /// Repetition marker (`...`).
    OneOrMore,
    /// Text that must appear verbatim.
    Literal {
        /// The literal text.
        value: String,
    },
    /// Placeholder for a class of values.
    Value {
        /// Placeholder name.
        name: String,
    },
}

impl SyntaxToken {
    /// Shorthand for a `LITERAL` token.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
        }
    }

    /// Shorthand for a `VALUE` token.
    pub fn value(name: impl Into<String>) -> Self {
        Self::Value { name: name.into() }
    }

    /// The control token a character of plain syntax text stands for.
    pub fn from_control_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Self::Separator),
            '|' => Some(Self::Or),
            '[' => Some(Self::LeftBracket),
            ']' => Some(Self::RightBracket),
            '…' => Some(Self::OneOrMore),
            _ => None,
        }
    }

    /// Upper-case kind name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Separator => "SEPARATOR",
            Self::Or => "OR",
            Self::LeftBracket => "LEFT_BRACKET",
            Self::RightBracket => "RIGHT_BRACKET",
            Self::OneOrMore => "ONE_OR_MORE",
            Self::Literal { .. } => "LITERAL",
            Self::Value { .. } => "VALUE",
        }
    }

    /// Returns true for `LEFT_BRACKET` and `RIGHT_BRACKET`.
    pub fn is_bracket(&self) -> bool {
        matches!(self, Self::LeftBracket | Self::RightBracket)
    }
}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value } => write!(f, "LITERAL({value:?})"),
            Self::Value { name } => write!(f, "VALUE({name:?})"),
            other => f.write_str(other.kind()),
        }
    }
}
