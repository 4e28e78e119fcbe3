//! Placeholder substitution.
//!
//! # Design Decisions
//! - Keys are literal byte patterns (escaped before compiling), never regex syntax
//! - Values are inserted verbatim: no `$name` expansion
//! - Replacements run in the order given and each pass sees the output of the
//!   previous one, so a value containing a later key is rewritten by that key

use regex::bytes::{NoExpand, Regex};
use thiserror::Error;

use crate::template::resolver::Replacement;
use crate::template::variables::VariableSpec;

#[derive(Debug, Error)]
pub enum SubstitutionError {
    #[error("placeholder key must not be empty")]
    EmptyPlaceholder,

    #[error("cannot build matcher for placeholder {key}: {source}")]
    InvalidPlaceholder {
        key: String,
        #[source]
        source: regex::Error,
    },
}

/// A compiled, ordered set of placeholder rewrites.
#[derive(Debug)]
pub struct Substitution {
    passes: Vec<(Regex, Vec<u8>)>,
}

impl Substitution {
    pub fn new(replacements: &[Replacement]) -> Result<Self, SubstitutionError> {
        let passes = replacements
            .iter()
            .map(|rep| -> Result<_, SubstitutionError> {
                Ok((literal_matcher(&rep.key)?, rep.value.clone().into_bytes()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { passes })
    }

    /// Rewrite every occurrence of every key, pass by pass.
    pub fn apply(&self, buffer: Vec<u8>) -> Vec<u8> {
        self.passes.iter().fold(buffer, |buf, (matcher, value)| {
            matcher
                .replace_all(&buf, NoExpand(value.as_slice()))
                .into_owned()
        })
    }
}

/// Compile `replacements` and apply them to `buffer`.
pub fn substitute(
    buffer: Vec<u8>,
    replacements: &[Replacement],
) -> Result<Vec<u8>, SubstitutionError> {
    Ok(Substitution::new(replacements)?.apply(buffer))
}

/// Catalog names that do not occur anywhere in `buffer`.
///
/// Uses the same literal matcher as substitution, so a name reported present
/// here is one that [`substitute`] would rewrite.
pub fn missing_placeholders(
    buffer: &[u8],
    catalog: &[VariableSpec],
) -> Result<Vec<&'static str>, SubstitutionError> {
    let mut missing = Vec::new();
    for var in catalog {
        if !literal_matcher(var.name)?.is_match(buffer) {
            missing.push(var.name);
        }
    }
    Ok(missing)
}

fn literal_matcher(key: &str) -> Result<Regex, SubstitutionError> {
    if key.is_empty() {
        return Err(SubstitutionError::EmptyPlaceholder);
    }
    Regex::new(&regex::escape(key)).map_err(|source| SubstitutionError::InvalidPlaceholder {
        key: key.to_string(),
        source,
    })
}
