//! RDF-namespace datatypes.

use std::cmp::Ordering;

use super::capabilities::*;
use super::value::LangString;
use crate::{Error, Result};

pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

/// `rdf:langString`.
///
/// A language-tagged literal cannot be built from its lexical form alone,
/// so `from_string` always fails; the store constructs these directly from
/// the (lexical form, tag) pair. Tags compare case-insensitively.
pub struct RdfLangString;

impl LiteralDatatype for RdfLangString {
    const IDENTIFIER: &'static str = LANG_STRING;
    type Repr = LangString;

    fn from_string(s: &str) -> Result<LangString> {
        Err(invalid_lexical::<Self>(
            s,
            Error::Parse("a language-tagged string requires a language tag".into()),
        ))
    }

    fn to_canonical_string(value: &LangString) -> String {
        value.lexical_form.clone()
    }
}

impl Logical for RdfLangString {
    fn effective_boolean_value(value: &LangString) -> bool {
        !value.lexical_form.is_empty()
    }
}

impl Comparable for RdfLangString {
    /// Ordered by lexical form; values with different tags are unordered.
    fn compare(lhs: &LangString, rhs: &LangString) -> Option<Ordering> {
        lhs.language_tag
            .eq_ignore_ascii_case(&rhs.language_tag)
            .then(|| lhs.lexical_form.cmp(&rhs.lexical_form))
    }
}
