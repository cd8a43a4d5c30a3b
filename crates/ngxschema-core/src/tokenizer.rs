//! # Syntax Tokenizer
//!
//! Converts a syntax description (the children of one `<syntax>` element in
//! the module documentation) into a flat [`SyntaxToken`] sequence.
//!
//! ## Text Normalization
//!
//! Plain text between markup is written for humans and its spacing is
//! irregular. Before scanning, every text node is normalized in this order:
//!
//! 1. whitespace + `|` + whitespace → `|`
//! 2. `[` + whitespace → `[`, whitespace + `]` → `]`
//! 3. optional whitespace + `...` → `…`
//! 4. any whitespace run → a single space
//!
//! Text consisting only of newlines is layout and produces nothing. Any other
//! whitespace (such as the single space between two placeholders) is a real
//! separator.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SyntaxError;
use crate::token::SyntaxToken;

static NEWLINES_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\n+$").expect("valid regex"));
static SPACED_OR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\|\s+").expect("valid regex"));
static SPACED_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\s+").expect("valid regex"));
static SPACED_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\]").expect("valid regex"));
static ELLIPSIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\.\.\.").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// One child node of a syntax description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    /// `<literal>` element: text that must appear verbatim.
    Literal(String),
    /// `<value>` element: a named placeholder.
    Value(String),
    /// Plain text between elements, including control characters.
    Text(String),
}

impl SyntaxNode {
    /// Classify a documentation element by its tag name.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnexpectedElement`] for any tag other than
    /// `literal` or `value`.
    pub fn from_element(tag: &str, text: impl Into<String>) -> Result<Self, SyntaxError> {
        match tag {
            "literal" => Ok(Self::Literal(text.into())),
            "value" => Ok(Self::Value(text.into())),
            other => Err(SyntaxError::UnexpectedElement(other.to_string())),
        }
    }
}

/// Tokenize a syntax description.
///
/// An empty result describes a directive without parameters.
pub fn tokenize_syntax(nodes: &[SyntaxNode]) -> Vec<SyntaxToken> {
    let mut tokens = Vec::new();

    for node in nodes {
        match node {
            SyntaxNode::Literal(text) => tokens.push(SyntaxToken::literal(text.as_str())),
            SyntaxNode::Value(text) => tokens.push(SyntaxToken::value(text.as_str())),
            SyntaxNode::Text(text) => {
                if NEWLINES_ONLY.is_match(text) {
                    continue;
                }
                tokenize_text(&normalize_text(text), &mut tokens);
            }
        }
    }

    tokens
}

fn normalize_text(text: &str) -> String {
    let text = SPACED_OR.replace_all(text, "|");
    let text = SPACED_OPEN.replace_all(&text, "[");
    let text = SPACED_CLOSE.replace_all(&text, "]");
    let text = ELLIPSIS.replace_all(&text, "…");
    WHITESPACE.replace_all(&text, " ").into_owned()
}

fn tokenize_text(text: &str, tokens: &mut Vec<SyntaxToken>) {
    let mut literal = String::new();

    for c in text.chars() {
        match SyntaxToken::from_control_char(c) {
            Some(control) => {
                if !literal.is_empty() {
                    tokens.push(SyntaxToken::literal(std::mem::take(&mut literal)));
                }
                // A separator before the first element carries no meaning.
                if !tokens.is_empty() || control != SyntaxToken::Separator {
                    tokens.push(control);
                }
            }
            None => literal.push(c),
        }
    }

    if !literal.is_empty() {
        tokens.push(SyntaxToken::literal(literal));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> SyntaxToken {
        SyntaxToken::literal(s)
    }

    fn val(s: &str) -> SyntaxToken {
        SyntaxToken::value(s)
    }

    fn text(s: &str) -> SyntaxNode {
        SyntaxNode::Text(s.to_string())
    }

    #[test]
    fn literal_and_value_nodes_map_one_to_one() {
        let nodes = [
            SyntaxNode::Literal("off".into()),
            text(" "),
            SyntaxNode::Value("size".into()),
        ];
        assert_eq!(
            tokenize_syntax(&nodes),
            vec![lit("off"), SyntaxToken::Separator, val("size")]
        );
    }

    #[test]
    fn spaced_alternation_in_text_collapses() {
        assert_eq!(
            tokenize_syntax(&[text("on | off")]),
            vec![lit("on"), SyntaxToken::Or, lit("off")]
        );
    }

    #[test]
    fn alternation_between_literal_elements() {
        let nodes = [
            SyntaxNode::Literal("on".into()),
            text(" | "),
            SyntaxNode::Literal("off".into()),
        ];
        assert_eq!(
            tokenize_syntax(&nodes),
            vec![lit("on"), SyntaxToken::Or, lit("off")]
        );
    }

    #[test]
    fn newline_only_text_is_dropped() {
        let nodes = [
            text("\n"),
            SyntaxNode::Value("name".into()),
            text("\n\n"),
        ];
        assert_eq!(tokenize_syntax(&nodes), vec![val("name")]);
    }

    #[test]
    fn leading_separator_is_suppressed() {
        let nodes = [text("  "), SyntaxNode::Value("name".into())];
        assert_eq!(tokenize_syntax(&nodes), vec![val("name")]);
    }

    #[test]
    fn separator_after_first_token_is_kept() {
        let nodes = [
            SyntaxNode::Value("key".into()),
            text(" "),
            SyntaxNode::Value("value".into()),
        ];
        assert_eq!(
            tokenize_syntax(&nodes),
            vec![val("key"), SyntaxToken::Separator, val("value")]
        );
    }

    #[test]
    fn brackets_lose_inner_spacing() {
        let nodes = [
            SyntaxNode::Value("address".into()),
            text(" [ "),
            SyntaxNode::Literal("default".into()),
            text(" ]"),
        ];
        assert_eq!(
            tokenize_syntax(&nodes),
            vec![
                val("address"),
                SyntaxToken::Separator,
                SyntaxToken::LeftBracket,
                lit("default"),
                SyntaxToken::RightBracket,
            ]
        );
    }

    #[test]
    fn ellipsis_becomes_one_or_more() {
        let nodes = [SyntaxNode::Value("uri".into()), text(" ...")];
        assert_eq!(
            tokenize_syntax(&nodes),
            vec![val("uri"), SyntaxToken::OneOrMore]
        );
    }

    #[test]
    fn whitespace_runs_collapse_to_one_separator() {
        let nodes = [
            SyntaxNode::Value("a".into()),
            text(" \t\n  "),
            SyntaxNode::Value("b".into()),
        ];
        assert_eq!(
            tokenize_syntax(&nodes),
            vec![val("a"), SyntaxToken::Separator, val("b")]
        );
    }

    #[test]
    fn literal_text_is_flushed_before_control_tokens() {
        let nodes = [
            text("proxy_"),
            SyntaxNode::Value("name".into()),
            text("=x y"),
        ];
        assert_eq!(
            tokenize_syntax(&nodes),
            vec![
                lit("proxy_"),
                val("name"),
                lit("=x"),
                SyntaxToken::Separator,
                lit("y"),
            ]
        );
    }

    #[test]
    fn empty_description_is_parameterless() {
        assert!(tokenize_syntax(&[]).is_empty());
    }

    #[test]
    fn unknown_element_is_rejected() {
        let err = SyntaxNode::from_element("emphasis", "x").unwrap_err();
        assert_eq!(err, SyntaxError::UnexpectedElement("emphasis".into()));
    }

    #[test]
    fn known_elements_are_classified() {
        assert_eq!(
            SyntaxNode::from_element("literal", "on").unwrap(),
            SyntaxNode::Literal("on".into())
        );
        assert_eq!(
            SyntaxNode::from_element("value", "size").unwrap(),
            SyntaxNode::Value("size".into())
        );
    }
}
