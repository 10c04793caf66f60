//! Backend representations: the owned data stored for one term.
//!
//! Every backend kind is interned through a borrowed *view*, so a lookup
//! never allocates. Hash and equality are defined on views and default to
//! the view's structural `Hash`/`Eq`; a kind with different identity rules
//! overrides `hash_view` and `view_eq`.

use std::hash::{Hash, Hasher};

use crate::datatypes::{LiteralType, Value};

use super::NodeId;

/// A term kind storable in a `NodeTypeStorage`.
pub trait NodeBackend: Send + Sync + 'static {
    type View<'a>: Copy + Eq + Hash
    where
        Self: 'a;

    fn view(&self) -> Self::View<'_>;

    fn from_view(view: Self::View<'_>) -> Self;

    /// Narrows a view's lifetime. Implementations are always `view`.
    fn shorten_view<'short, 'long: 'short>(view: Self::View<'long>) -> Self::View<'short>;

    fn hash_view<H: Hasher>(view: &Self::View<'_>, state: &mut H) {
        view.hash(state);
    }

    fn view_eq(a: &Self::View<'_>, b: &Self::View<'_>) -> bool {
        Self::shorten_view(*a) == Self::shorten_view(*b)
    }
}

// ============================================================================
// IRI
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IriBackend {
    pub identifier: String,
}

impl NodeBackend for IriBackend {
    type View<'a> = &'a str;

    fn view(&self) -> &str {
        &self.identifier
    }

    fn from_view(view: &str) -> Self {
        Self {
            identifier: view.to_owned(),
        }
    }

    fn shorten_view<'short, 'long: 'short>(view: &'long str) -> &'short str {
        view
    }
}

// ============================================================================
// Blank node
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BNodeBackend {
    pub identifier: String,
}

impl NodeBackend for BNodeBackend {
    type View<'a> = &'a str;

    fn view(&self) -> &str {
        &self.identifier
    }

    fn from_view(view: &str) -> Self {
        Self {
            identifier: view.to_owned(),
        }
    }

    fn shorten_view<'short, 'long: 'short>(view: &'long str) -> &'short str {
        view
    }
}

// ============================================================================
// Variable
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableBackend {
    pub name: String,
    pub is_anonymous: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableView<'a> {
    pub name: &'a str,
    pub is_anonymous: bool,
}

impl NodeBackend for VariableBackend {
    type View<'a> = VariableView<'a>;

    fn view(&self) -> VariableView<'_> {
        VariableView {
            name: &self.name,
            is_anonymous: self.is_anonymous,
        }
    }

    fn from_view(view: VariableView<'_>) -> Self {
        Self {
            name: view.name.to_owned(),
            is_anonymous: view.is_anonymous,
        }
    }

    fn shorten_view<'short, 'long: 'short>(view: VariableView<'long>) -> VariableView<'short> {
        view
    }
}

// ============================================================================
// Generic literal
// ============================================================================

/// A literal kept as text: language-tagged strings and literals of
/// datatypes without a fixed id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackLiteralBackend {
    pub lexical_form: String,
    /// IRI node of the datatype.
    pub datatype: NodeId,
    /// Empty unless the datatype is `rdf:langString`.
    pub language_tag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LiteralView<'a> {
    pub lexical_form: &'a str,
    pub datatype: NodeId,
    pub language_tag: &'a str,
}

impl NodeBackend for FallbackLiteralBackend {
    type View<'a> = LiteralView<'a>;

    fn view(&self) -> LiteralView<'_> {
        LiteralView {
            lexical_form: &self.lexical_form,
            datatype: self.datatype,
            language_tag: &self.language_tag,
        }
    }

    fn from_view(view: LiteralView<'_>) -> Self {
        Self {
            lexical_form: view.lexical_form.to_owned(),
            datatype: view.datatype,
            language_tag: view.language_tag.to_owned(),
        }
    }

    fn shorten_view<'short, 'long: 'short>(view: LiteralView<'long>) -> LiteralView<'short> {
        view
    }

    // language tags match case-insensitively, lexical forms exactly

    fn hash_view<H: Hasher>(view: &LiteralView<'_>, state: &mut H) {
        view.lexical_form.hash(state);
        view.datatype.hash(state);
        state.write_usize(view.language_tag.len());
        for b in view.language_tag.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }

    fn view_eq(a: &LiteralView<'_>, b: &LiteralView<'_>) -> bool {
        a.lexical_form == b.lexical_form
            && a.datatype == b.datatype
            && a.language_tag.eq_ignore_ascii_case(b.language_tag)
    }
}

// ============================================================================
// Specialized literal
// ============================================================================

/// A literal of a fixed-id datatype, stored as its native value.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecializedLiteralBackend {
    pub datatype: LiteralType,
    pub value: Value,
}

/// Compares values by storage identity (see `Value::identity_eq`).
#[derive(Debug, Clone, Copy)]
pub struct SpecializedLiteralView<'a> {
    pub datatype: LiteralType,
    pub value: &'a Value,
}

impl PartialEq for SpecializedLiteralView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.datatype == other.datatype && self.value.identity_eq(other.value)
    }
}

impl Eq for SpecializedLiteralView<'_> {}

impl Hash for SpecializedLiteralView<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.datatype.hash(state);
        self.value.identity_hash(state);
    }
}

impl NodeBackend for SpecializedLiteralBackend {
    type View<'a> = SpecializedLiteralView<'a>;

    fn view(&self) -> SpecializedLiteralView<'_> {
        SpecializedLiteralView {
            datatype: self.datatype,
            value: &self.value,
        }
    }

    fn from_view(view: SpecializedLiteralView<'_>) -> Self {
        Self {
            datatype: view.datatype,
            value: view.value.clone(),
        }
    }

    fn shorten_view<'short, 'long: 'short>(
        view: SpecializedLiteralView<'long>,
    ) -> SpecializedLiteralView<'short> {
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<B: NodeBackend>(view: B::View<'_>) -> u64 {
        let mut h = DefaultHasher::new();
        B::hash_view(&view, &mut h);
        h.finish()
    }

    fn literal<'a>(lexical_form: &'a str, language_tag: &'a str) -> LiteralView<'a> {
        LiteralView {
            lexical_form,
            datatype: NodeId::from_raw(7),
            language_tag,
        }
    }

    #[test]
    fn test_language_tag_case_insensitive() {
        let a = literal("Hallo", "de-DE");
        let b = literal("Hallo", "de-de");
        assert!(FallbackLiteralBackend::view_eq(&a, &b));
        assert_eq!(
            hash_of::<FallbackLiteralBackend>(a),
            hash_of::<FallbackLiteralBackend>(b)
        );
    }

    #[test]
    fn test_lexical_form_case_sensitive() {
        let a = literal("Hallo", "de");
        let b = literal("hallo", "de");
        assert!(!FallbackLiteralBackend::view_eq(&a, &b));
    }

    #[test]
    fn test_structural_default() {
        assert!(IriBackend::view_eq(&"http://a", &"http://a"));
        assert!(!IriBackend::view_eq(&"http://a", &"http://A"));
        let named = VariableView { name: "x", is_anonymous: false };
        let anon = VariableView { name: "x", is_anonymous: true };
        assert!(!VariableBackend::view_eq(&named, &anon));
    }

    #[test]
    fn test_specialized_identity() {
        let nan = Value::Double(f64::NAN);
        let other_nan = Value::Double(-f64::NAN);
        let a = SpecializedLiteralView { datatype: LiteralType::XSD_DOUBLE, value: &nan };
        let b = SpecializedLiteralView { datatype: LiteralType::XSD_DOUBLE, value: &other_nan };
        assert!(SpecializedLiteralBackend::view_eq(&a, &b));
        assert_eq!(
            hash_of::<SpecializedLiteralBackend>(a),
            hash_of::<SpecializedLiteralBackend>(b)
        );
    }
}
