//! # Variant Grouper
//!
//! Splits a token sequence at each top-level `OR` into independent
//! alternatives. Callers must check for bracket tokens first: optional
//! groups can nest alternations, which this flat split cannot represent.

use crate::error::SyntaxError;
use crate::token::SyntaxToken;

/// Split `tokens` into alternation variants.
///
/// A sequence without `OR` yields exactly one variant; an empty sequence
/// yields one empty variant.
///
/// # Errors
///
/// Returns [`SyntaxError::BracketSyntax`] if any token is a bracket.
pub fn group_or_variants(tokens: &[SyntaxToken]) -> Result<Vec<Vec<SyntaxToken>>, SyntaxError> {
    let mut variants = vec![Vec::new()];

    for token in tokens {
        if token.is_bracket() {
            return Err(SyntaxError::BracketSyntax);
        }
        if *token == SyntaxToken::Or {
            variants.push(Vec::new());
        } else if let Some(current) = variants.last_mut() {
            current.push(token.clone());
        }
    }

    Ok(variants)
}
