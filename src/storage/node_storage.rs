//! `NodeStorage`: the term interning store.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use serde::Serialize;
use tracing::debug;

use super::backend::*;
use super::config::NodeStorageConfig;
use super::identifier::{NodeId, NodeKind};
use super::table::NodeTypeStorage;
use crate::datatypes::{
    DatatypeDescriptor, DatatypeRegistry, LangString, LiteralType, TypedValue, Value, rdf, xsd,
};
use crate::model::{Literal, Term};
use crate::{Error, Result};

/// Entry counts per table. Inlined literals occupy no entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    pub iris: usize,
    pub bnodes: usize,
    pub variables: usize,
    pub literals: usize,
    pub specialized_literals: usize,
}

impl StorageStats {
    pub fn total(&self) -> usize {
        self.iris + self.bnodes + self.variables + self.literals + self.specialized_literals
    }
}

/// Concurrent, growth-only store of RDF terms.
///
/// Cloning is cheap and yields a handle to the same store.
#[derive(Clone)]
pub struct NodeStorage {
    inner: Arc<NodeStorageInner>,
}

struct NodeStorageInner {
    config: NodeStorageConfig,
    registry: Arc<DatatypeRegistry>,
    iris: NodeTypeStorage<IriBackend>,
    bnodes: NodeTypeStorage<BNodeBackend>,
    variables: NodeTypeStorage<VariableBackend>,
    literals: NodeTypeStorage<FallbackLiteralBackend>,
    specialized: HashMap<LiteralType, NodeTypeStorage<SpecializedLiteralBackend>>,
}

impl NodeStorage {
    /// Default configuration, built-in datatypes.
    pub fn new() -> Result<Self> {
        Self::with_config(NodeStorageConfig::default())
    }

    pub fn with_config(config: NodeStorageConfig) -> Result<Self> {
        Ok(Self::with_registry(config, Arc::new(DatatypeRegistry::builtin()?)))
    }

    /// A store whose literals are validated against `registry`.
    ///
    /// Every datatype IRI of the registry is interned up front, and every
    /// fixed-id datatype gets its own specialized literal table.
    pub fn with_registry(config: NodeStorageConfig, registry: Arc<DatatypeRegistry>) -> Self {
        let capacity = config.initial_capacity;
        let specialized = registry
            .iter()
            .filter_map(DatatypeDescriptor::fixed_id)
            .map(|fixed_id| (fixed_id, NodeTypeStorage::new("specialized_literal", capacity)))
            .collect::<HashMap<_, _>>();

        let store = Self {
            inner: Arc::new(NodeStorageInner {
                iris: NodeTypeStorage::new("iri", capacity),
                bnodes: NodeTypeStorage::new("bnode", capacity),
                variables: NodeTypeStorage::new("variable", capacity),
                literals: NodeTypeStorage::new("literal", capacity),
                specialized,
                config,
                registry,
            }),
        };

        for descriptor in store.inner.registry.iter() {
            store.make_iri(descriptor.identifier());
        }

        debug!(
            datatypes = store.inner.registry.len(),
            specialized_tables = store.inner.specialized.len(),
            inline_literals = store.inner.config.inline_literals,
            "node storage initialized"
        );
        store
    }

    pub fn config(&self) -> &NodeStorageConfig {
        &self.inner.config
    }

    pub fn registry(&self) -> &DatatypeRegistry {
        &self.inner.registry
    }

    // ========================================================================
    // Interning
    // ========================================================================

    pub fn make_iri(&self, iri: &str) -> NodeId {
        let index = self.inner.iris.intern(iri);
        NodeId::stored(NodeKind::Iri, LiteralType::OTHER, index)
    }

    pub fn make_bnode(&self, label: &str) -> NodeId {
        let index = self.inner.bnodes.intern(label);
        NodeId::stored(NodeKind::BlankNode, LiteralType::OTHER, index)
    }

    pub fn make_variable(&self, name: &str, is_anonymous: bool) -> NodeId {
        let index = self.inner.variables.intern(VariableView { name, is_anonymous });
        NodeId::stored(NodeKind::Variable, LiteralType::OTHER, index)
    }

    /// An `xsd:string` literal.
    pub fn make_simple_literal(&self, lexical: &str) -> Result<NodeId> {
        self.make_typed_literal(lexical, xsd::STRING)
    }

    /// An `rdf:langString` literal. The tag is kept as first seen; later
    /// spellings differing only in case resolve to the same node.
    pub fn make_lang_literal(&self, lexical: &str, language_tag: &str) -> Result<NodeId> {
        if language_tag.is_empty() {
            return Err(Error::Validation {
                datatype: rdf::LANG_STRING.to_owned(),
                lexical: lexical.to_owned(),
                reason: "empty language tag".into(),
            });
        }
        Ok(self.intern_fallback(lexical, rdf::LANG_STRING, language_tag))
    }

    /// A literal of datatype `datatype`.
    ///
    /// Registered datatypes validate `lexical` and store its value, so any
    /// two lexical forms of one value yield the same node. Literals of an
    /// unregistered datatype are stored verbatim.
    pub fn make_typed_literal(&self, lexical: &str, datatype: &str) -> Result<NodeId> {
        match self.inner.registry.get(datatype) {
            Some(descriptor) => {
                let value = descriptor.from_string(lexical)?;
                self.store_value(descriptor, value)
            }
            None => Ok(self.intern_fallback(lexical, datatype, "")),
        }
    }

    /// A literal from an already parsed value.
    ///
    /// The value is re-checked against its datatype, so a mismatched
    /// representation or a value outside a subtype's range is rejected.
    pub fn make_literal_from_value(&self, value: &TypedValue) -> Result<NodeId> {
        let descriptor = self.inner.registry.descriptor(value.datatype)?;

        if let Value::LangString(lang) = &value.value {
            if descriptor.identifier() != rdf::LANG_STRING {
                return Err(Error::TypeError {
                    expected: descriptor.identifier().to_owned(),
                    got: value.value.type_name().to_owned(),
                });
            }
            return self.make_lang_literal(&lang.lexical_form, &lang.language_tag);
        }

        // canonical text may be coarser than the value (integral doubles),
        // so it only decides validity
        let canonical = descriptor.to_canonical_string(&value.value)?;
        descriptor.from_string(&canonical)?;
        self.store_value(descriptor, value.value.clone())
    }

    fn store_value(&self, descriptor: &DatatypeDescriptor, value: Value) -> Result<NodeId> {
        if let Some(fixed_id) = descriptor.fixed_id() {
            if self.inner.config.inline_literals
                && let Some(payload) = descriptor.try_into_inlined(&value)
            {
                return Ok(NodeId::inlined(fixed_id, payload));
            }
            let index = self.specialized_table(fixed_id)?.intern(SpecializedLiteralView {
                datatype: fixed_id,
                value: &value,
            });
            return Ok(NodeId::stored(NodeKind::Literal, fixed_id, index));
        }

        let lexical = descriptor.to_canonical_string(&value)?;
        Ok(self.intern_fallback(&lexical, descriptor.identifier(), ""))
    }

    fn intern_fallback(&self, lexical: &str, datatype: &str, language_tag: &str) -> NodeId {
        let datatype = self.make_iri(datatype);
        let index = self.inner.literals.intern(LiteralView {
            lexical_form: lexical,
            datatype,
            language_tag,
        });
        NodeId::stored(NodeKind::Literal, LiteralType::OTHER, index)
    }

    fn specialized_table(
        &self,
        fixed_id: LiteralType,
    ) -> Result<&NodeTypeStorage<SpecializedLiteralBackend>> {
        self.inner
            .specialized
            .get(&fixed_id)
            .ok_or_else(|| Error::UnknownDatatype(format!("fixed id {fixed_id}")))
    }

    // ========================================================================
    // Lookup without insertion
    // ========================================================================

    pub fn find_iri(&self, iri: &str) -> Option<NodeId> {
        let index = self.inner.iris.find(iri)?;
        Some(NodeId::stored(NodeKind::Iri, LiteralType::OTHER, index))
    }

    pub fn find_bnode(&self, label: &str) -> Option<NodeId> {
        let index = self.inner.bnodes.find(label)?;
        Some(NodeId::stored(NodeKind::BlankNode, LiteralType::OTHER, index))
    }

    pub fn find_variable(&self, name: &str, is_anonymous: bool) -> Option<NodeId> {
        let index = self.inner.variables.find(VariableView { name, is_anonymous })?;
        Some(NodeId::stored(NodeKind::Variable, LiteralType::OTHER, index))
    }

    pub fn find_lang_literal(&self, lexical: &str, language_tag: &str) -> Option<NodeId> {
        self.find_fallback(lexical, rdf::LANG_STRING, language_tag)
    }

    /// The node `make_typed_literal` would return, if it already exists.
    /// Inlined literals always exist.
    pub fn find_typed_literal(&self, lexical: &str, datatype: &str) -> Result<Option<NodeId>> {
        let Some(descriptor) = self.inner.registry.get(datatype) else {
            return Ok(self.find_fallback(lexical, datatype, ""));
        };
        let value = descriptor.from_string(lexical)?;

        let Some(fixed_id) = descriptor.fixed_id() else {
            let canonical = descriptor.to_canonical_string(&value)?;
            return Ok(self.find_fallback(&canonical, descriptor.identifier(), ""));
        };
        if self.inner.config.inline_literals
            && let Some(payload) = descriptor.try_into_inlined(&value)
        {
            return Ok(Some(NodeId::inlined(fixed_id, payload)));
        }
        let index = self.specialized_table(fixed_id)?.find(SpecializedLiteralView {
            datatype: fixed_id,
            value: &value,
        });
        Ok(index.map(|index| NodeId::stored(NodeKind::Literal, fixed_id, index)))
    }

    fn find_fallback(&self, lexical: &str, datatype: &str, language_tag: &str) -> Option<NodeId> {
        let datatype = self.find_iri(datatype)?;
        let index = self.inner.literals.find(LiteralView {
            lexical_form: lexical,
            datatype,
            language_tag,
        })?;
        Some(NodeId::stored(NodeKind::Literal, LiteralType::OTHER, index))
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    fn resolve_in<B: NodeBackend>(
        table: &NodeTypeStorage<B>,
        id: NodeId,
        kind: NodeKind,
    ) -> Result<Arc<B>> {
        if id.kind() != kind || id.is_inlined() {
            return Err(Error::NotFound(format!("{kind} {id}")));
        }
        table
            .resolve(id.payload())
            .ok_or_else(|| Error::NotFound(format!("{kind} {id}")))
    }

    pub fn resolve_iri(&self, id: NodeId) -> Result<Arc<IriBackend>> {
        Self::resolve_in(&self.inner.iris, id, NodeKind::Iri)
    }

    pub fn resolve_bnode(&self, id: NodeId) -> Result<Arc<BNodeBackend>> {
        Self::resolve_in(&self.inner.bnodes, id, NodeKind::BlankNode)
    }

    pub fn resolve_variable(&self, id: NodeId) -> Result<Arc<VariableBackend>> {
        Self::resolve_in(&self.inner.variables, id, NodeKind::Variable)
    }

    /// A literal of the generic table (language-tagged or without fixed id).
    pub fn resolve_literal(&self, id: NodeId) -> Result<Arc<FallbackLiteralBackend>> {
        if id.literal_type().is_fixed() {
            return Err(Error::NotFound(format!("generic literal {id}")));
        }
        Self::resolve_in(&self.inner.literals, id, NodeKind::Literal)
    }

    /// A literal of a specialized table. Inlined literals have none.
    pub fn resolve_specialized_literal(
        &self,
        id: NodeId,
    ) -> Result<Arc<SpecializedLiteralBackend>> {
        let table = self
            .specialized_table(id.literal_type())
            .map_err(|_| Error::NotFound(format!("specialized literal {id}")))?;
        Self::resolve_in(table, id, NodeKind::Literal)
    }

    fn fixed_descriptor(&self, id: NodeId) -> Result<&DatatypeDescriptor> {
        self.inner
            .registry
            .get_by_fixed_id(id.literal_type())
            .ok_or_else(|| Error::NotFound(format!("literal {id}")))
    }

    /// Value and datatype of a fixed-id literal, inlined or not.
    fn fixed_value(&self, id: NodeId) -> Result<(&DatatypeDescriptor, Value)> {
        let descriptor = self.fixed_descriptor(id)?;
        let value = if id.is_inlined() {
            descriptor.from_inlined(id.payload())?
        } else {
            self.resolve_specialized_literal(id)?.value.clone()
        };
        Ok((descriptor, value))
    }

    fn expect_literal(id: NodeId) -> Result<()> {
        if id.is_literal() {
            Ok(())
        } else {
            Err(Error::NotFound(format!("literal {id}")))
        }
    }

    pub fn literal_value(&self, id: NodeId) -> Result<TypedValue> {
        Self::expect_literal(id)?;
        if id.literal_type().is_fixed() {
            let (descriptor, value) = self.fixed_value(id)?;
            return Ok(TypedValue {
                datatype: descriptor.identifier(),
                value,
            });
        }

        let literal = self.resolve_literal(id)?;
        let datatype = self.resolve_iri(literal.datatype)?;
        let descriptor = self.inner.registry.descriptor(&datatype.identifier)?;
        let value = if descriptor.identifier() == rdf::LANG_STRING {
            Value::LangString(LangString::new(
                literal.lexical_form.as_str(),
                literal.language_tag.as_str(),
            ))
        } else {
            descriptor.from_string(&literal.lexical_form)?
        };
        Ok(TypedValue {
            datatype: descriptor.identifier(),
            value,
        })
    }

    /// Canonical lexical form.
    pub fn literal_lexical_form(&self, id: NodeId) -> Result<String> {
        Self::expect_literal(id)?;
        if id.literal_type().is_fixed() {
            let (descriptor, value) = self.fixed_value(id)?;
            return descriptor.to_canonical_string(&value);
        }
        Ok(self.resolve_literal(id)?.lexical_form.clone())
    }

    /// Human-oriented rendering of the value.
    pub fn literal_simplified_form(&self, id: NodeId) -> Result<String> {
        Self::expect_literal(id)?;
        if id.literal_type().is_fixed() {
            let (descriptor, value) = self.fixed_value(id)?;
            return descriptor.to_simplified_string(&value);
        }
        Ok(self.resolve_literal(id)?.lexical_form.clone())
    }

    /// Datatype IRI.
    pub fn literal_datatype(&self, id: NodeId) -> Result<String> {
        Self::expect_literal(id)?;
        if id.literal_type().is_fixed() {
            return Ok(self.fixed_descriptor(id)?.identifier().to_owned());
        }
        let literal = self.resolve_literal(id)?;
        Ok(self.resolve_iri(literal.datatype)?.identifier.clone())
    }

    pub fn literal_language_tag(&self, id: NodeId) -> Result<Option<String>> {
        Self::expect_literal(id)?;
        if id.literal_type().is_fixed() {
            return Ok(None);
        }
        let literal = self.resolve_literal(id)?;
        Ok((!literal.language_tag.is_empty()).then(|| literal.language_tag.clone()))
    }

    /// An owned copy of the term, e.g. for rendering.
    pub fn resolve_term(&self, id: NodeId) -> Result<Term> {
        match id.kind() {
            NodeKind::Iri => Ok(Term::Iri(self.resolve_iri(id)?.identifier.clone())),
            NodeKind::BlankNode => Ok(Term::BlankNode(self.resolve_bnode(id)?.identifier.clone())),
            NodeKind::Variable => {
                let variable = self.resolve_variable(id)?;
                Ok(Term::Variable {
                    name: variable.name.clone(),
                    is_anonymous: variable.is_anonymous,
                })
            }
            NodeKind::Literal if id.literal_type().is_fixed() => {
                let (descriptor, value) = self.fixed_value(id)?;
                Ok(Term::Literal(Literal {
                    lexical_form: descriptor.to_canonical_string(&value)?,
                    datatype: descriptor.identifier().to_owned(),
                    language_tag: None,
                }))
            }
            NodeKind::Literal => {
                let literal = self.resolve_literal(id)?;
                Ok(Term::Literal(Literal {
                    lexical_form: literal.lexical_form.clone(),
                    datatype: self.resolve_iri(literal.datatype)?.identifier.clone(),
                    language_tag: (!literal.language_tag.is_empty())
                        .then(|| literal.language_tag.clone()),
                }))
            }
        }
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    pub fn stats(&self) -> StorageStats {
        StorageStats {
            iris: self.inner.iris.len(),
            bnodes: self.inner.bnodes.len(),
            variables: self.inner.variables.len(),
            literals: self.inner.literals.len(),
            specialized_literals: self.inner.specialized.values().map(NodeTypeStorage::len).sum(),
        }
    }

    /// Number of stored terms, datatype IRIs included.
    pub fn len(&self) -> usize {
        self.stats().total()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for NodeStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeStorage")
            .field("config", &self.inner.config)
            .field("stats", &self.stats())
            .finish()
    }
}
