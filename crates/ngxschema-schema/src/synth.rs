//! # Schema Synthesizer
//!
//! Turns one [`Directive`] into the schema fragment constraining its value.
//!
//! ## Decision Sequence
//!
//! The first matching case wins:
//!
//! 1. Block directive: reference to its context schema (or a generic
//!    object); one-or-array without parameters, map of blocks with.
//! 2. Parameterless directive: `null`.
//! 3. Optional groups (`[...]`) or brace literals: unconstrained fragment.
//! 4. General case: one candidate per alternation variant, boolean
//!    collapsing, the key/value object form, then final composition.
//!
//! [`one_or_array`] and [`collapse_booleans`] are kept as standalone
//! functions; both are easy to misapply when inlined.

use std::collections::BTreeMap;

use ngxschema_core::{group_or_variants, Directive, SyntaxError, SyntaxToken};

use crate::fragment::{Schema, SchemaType};
use crate::patterns::{is_numeric_value, pattern_body, value_pattern};

/// Characters escaped when literal text is embedded into a pattern.
const REGEX_META: &[char] = &[
    '\\', '^', '$', '.', '|', '?', '*', '+', '(', ')', '[', ']', '{', '}',
];

/// Fragment for `directive`.
///
/// `contexts` is the complete table of context schemas keyed by
/// [`Directive::context_id`]; it is only read.
///
/// # Errors
///
/// Returns [`SyntaxError::UnexpectedToken`] when a single-token variant is
/// neither a literal nor a placeholder (e.g. a lone `...`).
pub fn synthesize(
    directive: &Directive,
    contexts: &BTreeMap<String, Schema>,
) -> Result<Schema, SyntaxError> {
    let no_parameters = directive.takes_no_parameters();

    if directive.block {
        let key = directive.context_id();
        let target = if contexts.contains_key(&key) {
            Schema::ref_to(&key)
        } else {
            Schema::of_type(SchemaType::Object)
        };
        return Ok(if no_parameters {
            one_or_array(target)
        } else {
            Schema::object_of(target)
        });
    }

    if no_parameters {
        return Ok(Schema::of_type(SchemaType::Null));
    }

    if directive.any_token(is_unsupported) {
        tracing::debug!(directive = %directive.id(), "syntax not modelled, leaving unconstrained");
        return Ok(Schema::default());
    }

    let mut variants = Vec::new();
    for form in &directive.syntax {
        variants.extend(group_or_variants(form)?);
    }

    let candidates = variants
        .iter()
        .map(|variant| variant_schema(variant))
        .collect::<Result<Vec<_>, _>>()?;

    let Collapsed {
        candidates,
        boolean_only,
    } = collapse_booleans(candidates);

    if let ([variant], [candidate]) = (variants.as_slice(), candidates.as_slice()) {
        if let Some(schema) = key_value_schema(variant, candidate) {
            return Ok(schema);
        }
    }

    Ok(compose(candidates, boolean_only))
}

/// `anyOf: [schema, {type: array, items: schema}]`.
pub fn one_or_array(schema: Schema) -> Schema {
    Schema::any_of(vec![schema.clone(), Schema::array_of(schema)])
}

/// Result of [`collapse_booleans`].
#[derive(Debug, Clone, PartialEq)]
pub struct Collapsed {
    /// Remaining candidates; exact values folded into one `enum` at the end.
    pub candidates: Vec<Schema>,
    /// True when `on`/`off` were collapsed and nothing but exact values
    /// was present.
    pub boolean_only: bool,
}

/// Fold exact-value candidates into one enumeration, offering a boolean
/// alongside it when the exact values include exactly one `on` and one
/// `off` between them.
///
/// Candidate lists with at most one exact value are returned unchanged.
pub fn collapse_booleans(candidates: Vec<Schema>) -> Collapsed {
    if candidates.iter().filter(|s| s.is_const()).count() <= 1 {
        return Collapsed {
            candidates,
            boolean_only: false,
        };
    }

    let (consts, mut rest): (Vec<Schema>, Vec<Schema>) =
        candidates.into_iter().partition(Schema::is_const);
    let values: Vec<String> = consts.into_iter().filter_map(|s| s.constant).collect();

    let mut boolean_only = false;
    if values.iter().filter(|v| *v == "on" || *v == "off").count() == 2 {
        boolean_only = rest.is_empty();
        rest.push(Schema::of_type(SchemaType::Boolean));
    }
    rest.push(Schema::enumeration(values));

    Collapsed {
        candidates: rest,
        boolean_only,
    }
}

/// Schema for a single placeholder, titled with its name.
pub fn placeholder_schema(name: &str) -> Schema {
    let schema = match (value_pattern(name), is_numeric_value(name)) {
        (Some(pattern), true) => Schema::any_of(vec![
            Schema::string_pattern(pattern),
            Schema::of_type(SchemaType::Number),
        ]),
        (Some(pattern), false) => Schema::string_pattern(pattern),
        (None, _) => Schema::of_type(SchemaType::String),
    };
    schema.titled(name)
}

/// Anchored pattern matching the whole of `tokens`, or `None` if some token
/// has no pattern representation (a placeholder without a known pattern,
/// alternation, brackets, repetition).
pub fn composite_pattern(tokens: &[SyntaxToken]) -> Option<String> {
    let mut pattern = String::from("^");
    for token in tokens {
        match token {
            SyntaxToken::Separator => pattern.push_str(r"\s+"),
            SyntaxToken::Literal { value } => pattern.push_str(&escape_literal(value)),
            SyntaxToken::Value { name } => pattern.push_str(pattern_body(value_pattern(name)?)),
            _ => return None,
        }
    }
    pattern.push('$');
    Some(pattern)
}

fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if REGEX_META.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn is_unsupported(token: &SyntaxToken) -> bool {
    match token {
        SyntaxToken::Literal { value } => value.contains(['{', '}']),
        other => other.is_bracket(),
    }
}

fn variant_schema(tokens: &[SyntaxToken]) -> Result<Schema, SyntaxError> {
    match tokens {
        [] => Ok(Schema::of_type(SchemaType::Null)),
        [SyntaxToken::Literal { value }] => Ok(Schema::constant(value.as_str())),
        [SyntaxToken::Value { name }] => Ok(placeholder_schema(name)),
        [other] => Err(SyntaxError::UnexpectedToken { kind: other.kind() }),
        _ => Ok(match composite_pattern(tokens) {
            Some(pattern) => Schema::string_pattern(pattern),
            None => Schema::of_type(SchemaType::String),
        }),
    }
}

/// `VALUE SEPARATOR VALUE ...` directives also accept an object keyed by the
/// first placeholder.
fn key_value_schema(variant: &[SyntaxToken], candidate: &Schema) -> Option<Schema> {
    let [SyntaxToken::Value { name: key }, SyntaxToken::Separator, SyntaxToken::Value { name: value }, rest @ ..] =
        variant
    else {
        return None;
    };

    let value_schema = Schema {
        pattern: if rest.is_empty() {
            value_pattern(value).map(str::to_string)
        } else {
            None
        },
        ..Schema::of_type(SchemaType::String).titled(value.as_str())
    };

    let object = match value_pattern(key) {
        Some(key_pattern) => Schema {
            pattern_properties: Some(BTreeMap::from([(key_pattern.to_string(), value_schema)])),
            ..Schema::of_type(SchemaType::Object)
        },
        None => Schema::object_of(value_schema),
    };

    Some(Schema::any_of(vec![
        candidate.clone(),
        Schema::array_of(candidate.clone()),
        object,
    ]))
}

fn compose(mut candidates: Vec<Schema>, boolean_only: bool) -> Schema {
    if candidates.len() == 1 {
        if let Some(single) = candidates.pop() {
            return one_or_array(single);
        }
    }
    if boolean_only {
        return Schema::any_of(candidates);
    }

    let mut unique: Vec<Schema> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }
    one_or_array(Schema::any_of(unique))
}
