use tracing::info;

use crate::error::EngineError;
use crate::http::executor::MockExecutor;
use crate::model::body::FileRef;
use crate::model::definition::{Collection, CollectionMeta, PathDefinition, ResponseDefinition};
use crate::persist::PersistClient;
use crate::store::definitions::DefinitionStore;
use crate::store::sessions::SessionManager;
use crate::store::workspaces::WorkspaceRegistry;

/// One workspace session's worth of engine state, wired together explicitly:
/// the registry, the definition store, the session manager, the persistence
/// client and the executor. Constructed once per process (or per user
/// session) and passed to whoever needs it.
///
/// Persistence-backed operations fetch first and mutate local state only on
/// success, so a failed round trip leaves everything as it was.
pub struct Engine {
    registry: WorkspaceRegistry,
    definitions: DefinitionStore,
    sessions: SessionManager,
    persist: PersistClient,
    executor: MockExecutor,
}

impl Engine {
    pub fn new(persist: PersistClient) -> Self {
        Self {
            registry: WorkspaceRegistry::new(),
            definitions: DefinitionStore::new(),
            sessions: SessionManager::new(),
            persist,
            executor: MockExecutor::new(),
        }
    }

    pub fn registry(&self) -> &WorkspaceRegistry {
        &self.registry
    }

    pub fn definitions(&self) -> &DefinitionStore {
        &self.definitions
    }

    pub fn definitions_mut(&mut self) -> &mut DefinitionStore {
        &mut self.definitions
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut SessionManager {
        &mut self.sessions
    }

    /// Fetch the workspace list, select the first workspace (or the default
    /// one when the list is empty) and load its collections.
    pub async fn bootstrap(&mut self) -> Result<(), EngineError> {
        let workspaces = self.persist.workspaces().await?;
        let current = workspaces.first().cloned().unwrap_or_default();
        let collections = self.persist.collections(&current.id).await?;
        info!(workspace = %current.id, collections = collections.len(), "engine bootstrapped");

        self.registry.initialize(workspaces, current.clone());
        let selected = self.sessions.selected(&current.id).map(str::to_string);
        self.definitions.initialize(collections, selected);
        Ok(())
    }

    /// Re-target another known workspace: fetch its collections, then swap
    /// the definition store over. Session state is keyed by workspace id and
    /// simply becomes current again.
    pub async fn switch_workspace(&mut self, wid: &str) -> Result<(), EngineError> {
        let workspace = self
            .registry
            .find(wid)
            .cloned()
            .ok_or_else(|| EngineError::Validation(format!("unknown workspace {wid:?}")))?;
        let collections = self.persist.collections(wid).await?;
        info!(workspace = %wid, "switched workspace");

        self.registry.set_current(workspace);
        let selected = self.sessions.selected(wid).map(str::to_string);
        self.definitions.initialize(collections, selected);
        Ok(())
    }

    /// Open a tab for a path definition. Definitions not yet in the store
    /// are fetched from persistence first; a failed fetch reports without
    /// touching tab state.
    pub async fn open_definition(&mut self, wid: &str, id: &str) -> Result<(), EngineError> {
        if self.definitions.path(id).is_none() {
            let definition = self.persist.definition(wid, id).await?;
            self.definitions.upsert_path(definition);
        }
        self.definitions.select(id);
        self.sessions.open(wid, id);
        Ok(())
    }

    pub fn close_definition(&mut self, wid: &str, id: &str) {
        self.sessions.close(wid, id);
    }

    /// Persist a definition and mirror it locally under the assigned id.
    pub async fn save_definition(
        &mut self,
        wid: &str,
        mut definition: PathDefinition,
    ) -> Result<String, EngineError> {
        if definition.name.trim().is_empty() {
            return Err(EngineError::Validation(
                "definition name must not be empty".to_string(),
            ));
        }
        if !definition.has_fixed_status() {
            return Err(EngineError::Validation(
                "mock_status must keep its statusCode and statusText rows".to_string(),
            ));
        }
        let id = self.persist.save_definition(wid, &definition).await?;
        definition.id = id.clone();
        self.definitions.upsert_path(definition);
        Ok(id)
    }

    pub async fn delete_definition(&mut self, wid: &str, id: &str) -> Result<(), EngineError> {
        self.persist.delete_definition(wid, id).await?;
        self.definitions.remove_path(id);
        self.sessions.close(wid, id);
        Ok(())
    }

    pub async fn create_collection(
        &mut self,
        wid: &str,
        name: &str,
    ) -> Result<Collection, EngineError> {
        if name.trim().is_empty() {
            return Err(EngineError::Validation(
                "collection name must not be empty".to_string(),
            ));
        }
        let collection = Collection {
            id: String::new(),
            name: name.to_string(),
            paths: Vec::new(),
        };
        let saved = self.persist.save_collection(wid, &collection).await?;
        self.definitions.append_collection(CollectionMeta::from(&saved));
        Ok(saved)
    }

    pub async fn rename_collection(
        &mut self,
        wid: &str,
        id: &str,
        name: &str,
    ) -> Result<(), EngineError> {
        if name.trim().is_empty() {
            return Err(EngineError::Validation(
                "collection name must not be empty".to_string(),
            ));
        }
        let collection = Collection {
            id: id.to_string(),
            name: name.to_string(),
            paths: Vec::new(),
        };
        let saved = self.persist.update_collection(wid, &collection).await?;
        self.definitions.update_collection(CollectionMeta::from(&saved));
        Ok(())
    }

    pub async fn delete_collection(&mut self, wid: &str, id: &str) -> Result<(), EngineError> {
        self.persist.delete_collection(wid, id).await?;
        self.definitions.remove_collection(id);
        Ok(())
    }

    /// Files available for native file bodies.
    pub async fn fileset(&self) -> Result<Vec<FileRef>, EngineError> {
        self.persist.fileset().await
    }

    /// Run one live test call for the cached request of `path_id` against
    /// the current workspace. The result lands in the testing cache through
    /// the sequence gate, so out-of-order completions can never clobber a
    /// newer result. Transport failures propagate and cache nothing.
    pub async fn run_test(&mut self, path_id: &str) -> Result<ResponseDefinition, EngineError> {
        let request = self.sessions.request(path_id);
        let workspace = self.registry.current().clone();
        let seq = self.sessions.begin_test(path_id);

        let response = self.executor.execute(&request, &workspace).await?;
        self.sessions.save_response(path_id, seq, response.clone());
        Ok(response)
    }
}
