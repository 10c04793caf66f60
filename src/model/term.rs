//! Owned RDF terms.

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};

use crate::datatypes::{rdf, xsd};

/// A literal's components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub lexical_form: String,
    pub datatype: String,
    pub language_tag: Option<String>,
}

/// A term resolved out of a `NodeStorage`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Iri(String),
    BlankNode(String),
    Literal(Literal),
    Variable { name: String, is_anonymous: bool },
}

impl Term {
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable { .. })
    }
}

/// N-Triples: `<iri>`, `_:label`, `"text"`, `"text"@tag`,
/// `"text"^^<datatype>`. Variables render SPARQL style.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write_iri(f, iri),
            Term::BlankNode(label) => write!(f, "_:{label}"),
            Term::Literal(literal) => write!(f, "{literal}"),
            Term::Variable { name, is_anonymous: false } => write!(f, "?{name}"),
            Term::Variable { name, is_anonymous: true } => write!(f, "_:{name}"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        for c in self.lexical_form.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                c => f.write_char(c)?,
            }
        }
        f.write_char('"')?;

        match &self.language_tag {
            Some(tag) if self.datatype == rdf::LANG_STRING => write!(f, "@{tag}"),
            _ if self.datatype == xsd::STRING => Ok(()),
            _ => {
                f.write_str("^^")?;
                write_iri(f, &self.datatype)
            }
        }
    }
}

fn write_iri(f: &mut fmt::Formatter<'_>, iri: &str) -> fmt::Result {
    f.write_char('<')?;
    for c in iri.chars() {
        match c {
            '\u{00}'..='\u{20}' | '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => {
                write!(f, "\\u{:04X}", u32::from(c))?
            }
            c => f.write_char(c)?,
        }
    }
    f.write_char('>')
}
