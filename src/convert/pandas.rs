//! Canonical ↔ pandas dtype tokens.
//!
//! The pandas dictionary is not injective: `timestamp`, `date`, `time` and
//! `datetime` all collapse to `"datetime64[ns]"`, so the round trip through
//! this representation is documented as lossy: converting back resolves
//! every temporal dtype to `datetime`.

use crate::dictionary::Representation;
use crate::error::Result;
use crate::model::TokenSchema;

/// Convert a canonical schema to pandas dtype tokens.
pub fn from_canonical(schema: &TokenSchema) -> Result<TokenSchema> {
    super::tokens_from_canonical(schema, Representation::Pandas)
}

/// Convert a pandas dtype schema back to canonical form.
pub fn to_canonical(schema: &TokenSchema) -> Result<TokenSchema> {
    super::tokens_to_canonical(schema, Representation::Pandas)
}
