use tracing::warn;

use crate::model::definition::{Collection, CollectionMeta, PathDefinition};

/// Normalized store for one workspace's collections and path definitions.
///
/// Collections hold only id and name; membership comes from each path's
/// `collect_id`, and the hierarchical view is derived on demand by [`tree`].
///
/// [`tree`]: DefinitionStore::tree
#[derive(Debug, Clone, Default)]
pub struct DefinitionStore {
    collections: Vec<CollectionMeta>,
    paths: Vec<PathDefinition>,
    selected: Option<String>,
}

impl DefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all state with freshly fetched collections, flattening their
    /// nested paths into the flat list. Dangling `collect_id` references are
    /// kept (persistence remains the source of truth) but flagged.
    pub fn initialize(&mut self, collections: Vec<Collection>, selected: Option<String>) {
        let mut metas = Vec::with_capacity(collections.len());
        let mut paths = Vec::new();
        for collection in collections {
            metas.push(CollectionMeta {
                id: collection.id,
                name: collection.name,
            });
            paths.extend(collection.paths);
        }
        self.collections = metas;
        self.paths = paths;
        self.selected = selected;

        let dangling = self.orphaned_paths().len();
        if dangling > 0 {
            warn!(count = dangling, "initialized with dangling collection references");
        }
    }

    /// Derive the Collection→Paths view. Pure: no caching, no mutation.
    /// Children keep their relative order from the flat list; collections
    /// keep their stored order.
    pub fn tree(&self) -> Vec<Collection> {
        self.collections
            .iter()
            .map(|meta| Collection {
                id: meta.id.clone(),
                name: meta.name.clone(),
                paths: self
                    .paths
                    .iter()
                    .filter(|p| p.collect_id == meta.id)
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    /// Replace the definition with the same id in place, or append it.
    pub fn upsert_path(&mut self, def: PathDefinition) {
        match self.paths.iter_mut().find(|p| p.id == def.id) {
            Some(slot) => *slot = def,
            None => self.paths.push(def),
        }
    }

    /// Remove by id; no-op if absent.
    pub fn remove_path(&mut self, id: &str) {
        self.paths.retain(|p| p.id != id);
    }

    pub fn path(&self, id: &str) -> Option<&PathDefinition> {
        self.paths.iter().find(|p| p.id == id)
    }

    pub fn paths(&self) -> &[PathDefinition] {
        &self.paths
    }

    pub fn collections(&self) -> &[CollectionMeta] {
        &self.collections
    }

    pub fn append_collection(&mut self, collection: CollectionMeta) {
        self.collections.push(collection);
    }

    pub fn update_collection(&mut self, collection: CollectionMeta) {
        if let Some(slot) = self.collections.iter_mut().find(|c| c.id == collection.id) {
            *slot = collection;
        }
    }

    /// Remove a collection entry without cascading into the flat path list.
    /// Member paths become orphaned and stay queryable via
    /// [`orphaned_paths`]; persistence-layer truth wins on the next
    /// initialize.
    ///
    /// [`orphaned_paths`]: DefinitionStore::orphaned_paths
    pub fn remove_collection(&mut self, id: &str) {
        self.collections.retain(|c| c.id != id);
        let orphaned = self
            .paths
            .iter()
            .filter(|p| p.collect_id == id)
            .count();
        if orphaned > 0 {
            warn!(collection = id, count = orphaned, "collection removal orphaned paths");
        }
    }

    /// Paths whose non-empty `collect_id` references no known collection.
    pub fn orphaned_paths(&self) -> Vec<&PathDefinition> {
        self.paths
            .iter()
            .filter(|p| {
                !p.collect_id.is_empty()
                    && !self.collections.iter().any(|c| c.id == p.collect_id)
            })
            .collect()
    }

    /// Set the selected path id. Existence is not validated.
    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}
