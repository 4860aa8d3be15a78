//! Representation detection.
//!
//! Structural inputs carry their representation in the [`SchemaInput`] tag;
//! the heuristic voting path survives only for string-token schemas of
//! unknown dialect, and is deliberately conservative: a schema that does not
//! match exactly one representation completely detects as `None` rather than
//! a guess, since a wrong guess would corrupt every downstream conversion.

use rustc_hash::FxHashMap;

use crate::dictionary::{ALL_REPRESENTATIONS, Representation, token_table};
use crate::model::{SchemaInput, TokenSchema};

/// Determine which representation a schema input is expressed in.
///
/// Returns `None` for raw data inputs (data has no representation to
/// detect) and for token schemas the voting heuristic cannot uniquely and
/// fully identify.
#[must_use]
pub fn detect(input: &SchemaInput) -> Option<Representation> {
    match input {
        SchemaInput::Arrow(_) => Some(Representation::Arrow),
        SchemaInput::BigQuery(_) => Some(Representation::BigQuery),
        SchemaInput::Native(_) => Some(Representation::Native),
        SchemaInput::Batch(_) | SchemaInput::Records(_) => None,
        SchemaInput::Tokens(schema) => detect_tokens(schema),
    }
}

/// Number of tokens found in a representation's native token set.
#[must_use]
pub fn compute_type_matches(tokens: &[&str], rep: Representation) -> usize {
    let table = token_table(rep);
    tokens
        .iter()
        .filter(|token| table.iter().any(|(_, t)| t == *token))
        .count()
}

/// Voting detection for a string-token schema.
///
/// Flattens the schema to its multiset of leaf tokens and counts, per
/// representation, how many tokens appear in that representation's native
/// token set. The winner must match every leaf and must be the only
/// representation to do so.
#[must_use]
pub fn detect_tokens(schema: &TokenSchema) -> Option<Representation> {
    let tokens = schema.leaf_tokens();
    let total = tokens.len();

    let mut matches: FxHashMap<Representation, usize> = FxHashMap::default();
    for rep in ALL_REPRESENTATIONS {
        matches.insert(rep, compute_type_matches(&tokens, rep));
    }

    if matches.values().sum::<usize>() == 0 {
        log::warn!("Schema - no matching schema type found for {schema}");
        return None;
    }

    let full_matches = matches.values().filter(|count| **count == total).count();
    if full_matches > 1 {
        log::warn!("Schema - multiple matching schema types found for {schema}");
        return None;
    }

    let (winner, best) = matches
        .iter()
        .max_by_key(|(_, count)| **count)
        .map(|(rep, count)| (*rep, *count))?;
    if best != total {
        log::warn!("Schema - not all schema types matched for {schema}");
        return None;
    }
    Some(winner)
}
