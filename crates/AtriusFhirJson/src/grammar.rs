//! Compiled primitive grammars.
//!
//! The patterns come from [`PrimitiveKind::pattern`]. Each is compiled once,
//! anchored to the whole input, on first use.

use std::collections::HashMap;

use atrius_fhir_lib::PrimitiveKind;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CodecError, Result};

static GRAMMARS: Lazy<HashMap<PrimitiveKind, Regex>> = Lazy::new(|| {
    PrimitiveKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let pattern = kind.pattern()?;
            Regex::new(&format!("^(?:{})$", pattern))
                .ok()
                .map(|regex| (kind, regex))
        })
        .collect()
});

/// The anchored grammar of a kind, `None` for kinds without one.
pub fn grammar_of(kind: PrimitiveKind) -> Option<&'static Regex> {
    GRAMMARS.get(&kind)
}

/// Checks the unquoted text of a primitive against its grammar.
pub fn check(kind: PrimitiveKind, text: &str) -> Result<()> {
    match grammar_of(kind) {
        Some(regex) if !regex.is_match(text) => Err(CodecError::GrammarViolation {
            kind,
            pattern: kind.pattern().unwrap_or_default(),
            input: text.to_string(),
        }),
        _ => Ok(()),
    }
}
