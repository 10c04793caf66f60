//! The hash-consing table behind every term kind.

use std::hash::{BuildHasher, Hasher};
use std::sync::Arc;

use hashbrown::{DefaultHashBuilder, HashTable};
use parking_lot::RwLock;
use tracing::trace;

use super::backend::NodeBackend;
use super::identifier::MAX_PAYLOAD;

struct Tables<B> {
    /// Entry `i` has id `i + 1`.
    id2data: Vec<Arc<B>>,
    /// Indices into `id2data`, keyed by the entry's view hash.
    data2id: HashTable<usize>,
}

/// Growth-only bijection between 1-based ids and backend instances.
///
/// Lookups take the read lock. Only a value not yet present takes the
/// write lock, and re-checks under it, so racing interns of one value
/// always agree on its id.
pub struct NodeTypeStorage<B> {
    name: &'static str,
    tables: RwLock<Tables<B>>,
    hasher: DefaultHashBuilder,
}

impl<B: NodeBackend> NodeTypeStorage<B> {
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            tables: RwLock::new(Tables {
                id2data: Vec::with_capacity(capacity),
                data2id: HashTable::with_capacity(capacity),
            }),
            hasher: DefaultHashBuilder::default(),
        }
    }

    fn hash(&self, view: &B::View<'_>) -> u64 {
        let mut state = self.hasher.build_hasher();
        B::hash_view(view, &mut state);
        state.finish()
    }

    /// The id of `view`, inserting an owned copy if it is new.
    pub fn intern(&self, view: B::View<'_>) -> u64 {
        let hash = self.hash(&view);

        if let Some(id) = self.lookup(hash, &view) {
            return id;
        }

        let mut guard = self.tables.write();
        let Tables { id2data, data2id } = &mut *guard;

        if let Some(&idx) = data2id.find(hash, |&idx| B::view_eq(&id2data[idx].view(), &view)) {
            return idx as u64 + 1;
        }

        let idx = id2data.len();
        // ids must fit the NodeId payload
        assert!((idx as u64) < MAX_PAYLOAD, "{} table exhausted", self.name);

        id2data.push(Arc::new(B::from_view(view)));
        data2id.insert_unique(hash, idx, |&i| self.hash(&id2data[i].view()));

        let id = idx as u64 + 1;
        trace!(table = self.name, id, "interned new term");
        id
    }

    /// The id of `view` if it has been interned.
    pub fn find(&self, view: B::View<'_>) -> Option<u64> {
        self.lookup(self.hash(&view), &view)
    }

    fn lookup(&self, hash: u64, view: &B::View<'_>) -> Option<u64> {
        let tables = self.tables.read();
        tables
            .data2id
            .find(hash, |&idx| B::view_eq(&tables.id2data[idx].view(), view))
            .map(|&idx| idx as u64 + 1)
    }

    /// The instance with id `id`; `None` for 0 and unassigned ids.
    pub fn resolve(&self, id: u64) -> Option<Arc<B>> {
        let idx = usize::try_from(id.checked_sub(1)?).ok()?;
        self.tables.read().id2data.get(idx).cloned()
    }

    pub fn len(&self) -> usize {
        self.tables.read().id2data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::backend::{FallbackLiteralBackend, IriBackend, LiteralView};
    use crate::storage::NodeId;

    #[test]
    fn test_intern_is_idempotent() {
        let table = NodeTypeStorage::<IriBackend>::new("iri", 0);
        let a = table.intern("http://example.org/a");
        let b = table.intern("http://example.org/b");
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(table.intern("http://example.org/a"), a);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_resolve() {
        let table = NodeTypeStorage::<IriBackend>::new("iri", 4);
        let id = table.intern("http://example.org/a");
        assert_eq!(table.resolve(id).unwrap().identifier, "http://example.org/a");
        assert!(table.resolve(0).is_none());
        assert!(table.resolve(id + 1).is_none());
    }

    #[test]
    fn test_find_does_not_insert() {
        let table = NodeTypeStorage::<IriBackend>::new("iri", 0);
        assert_eq!(table.find("http://example.org/a"), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_custom_equality_is_used() {
        let table = NodeTypeStorage::<FallbackLiteralBackend>::new("literal", 0);
        let view = |tag| LiteralView {
            lexical_form: "chat",
            datatype: NodeId::from_raw(1),
            language_tag: tag,
        };
        let first = table.intern(view("fr-FR"));
        assert_eq!(table.intern(view("FR-fr")), first);
        assert_eq!(table.resolve(first).unwrap().language_tag, "fr-FR");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_many_entries_survive_rehash() {
        let table = NodeTypeStorage::<IriBackend>::new("iri", 0);
        let iris: Vec<String> = (0..2000).map(|i| format!("http://example.org/{i}")).collect();
        let ids: Vec<u64> = iris.iter().map(|iri| table.intern(iri.as_str())).collect();
        for (iri, id) in iris.iter().zip(&ids) {
            assert_eq!(table.find(iri.as_str()), Some(*id));
        }
    }
}
