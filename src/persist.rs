use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::EngineError;
use crate::http::client::build_client;
use crate::model::body::FileRef;
use crate::model::definition::{Collection, PathDefinition};
use crate::model::workspace::Workspace;

/// Client for the remote definition store. Covers the full persistence
/// contract: workspaces, collections, path definitions and the native file
/// set. Any transport failure or non-2xx status reports as
/// [`EngineError::Persistence`].
#[derive(Debug, Clone)]
pub struct PersistClient {
    base: String,
    client: Client,
}

impl PersistClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base: base_url.into().trim_end_matches('/').to_string(),
            client: build_client(),
        }
    }

    pub async fn workspaces(&self) -> Result<Vec<Workspace>, EngineError> {
        self.fetch(self.client.get(self.url("/workspaces"))).await
    }

    pub async fn collections(&self, wid: &str) -> Result<Vec<Collection>, EngineError> {
        let req = self
            .client
            .get(self.url("/collections"))
            .query(&[("workspaceId", wid)]);
        self.fetch(req).await
    }

    pub async fn save_collection(
        &self,
        wid: &str,
        collection: &Collection,
    ) -> Result<Collection, EngineError> {
        let req = self
            .client
            .post(self.url("/collection"))
            .query(&[("workspaceId", wid)])
            .json(collection);
        self.fetch(req).await
    }

    pub async fn update_collection(
        &self,
        wid: &str,
        collection: &Collection,
    ) -> Result<Collection, EngineError> {
        let req = self
            .client
            .put(self.url("/collection"))
            .query(&[("workspaceId", wid)])
            .json(collection);
        self.fetch(req).await
    }

    pub async fn delete_collection(&self, wid: &str, id: &str) -> Result<(), EngineError> {
        let req = self
            .client
            .delete(self.url("/collection"))
            .query(&[("workspaceId", wid), ("id", id)]);
        self.send(req).await
    }

    pub async fn definition(&self, wid: &str, id: &str) -> Result<PathDefinition, EngineError> {
        let req = self
            .client
            .get(self.url(&format!("/define/{id}")))
            .query(&[("workspaceId", wid)]);
        self.fetch(req).await
    }

    /// Persist a path definition; the service answers with the assigned id.
    pub async fn save_definition(
        &self,
        wid: &str,
        definition: &PathDefinition,
    ) -> Result<String, EngineError> {
        let req = self
            .client
            .post(self.url("/define"))
            .query(&[("workspaceId", wid)])
            .json(definition);
        self.fetch(req).await
    }

    pub async fn delete_definition(&self, wid: &str, id: &str) -> Result<(), EngineError> {
        let req = self
            .client
            .delete(self.url(&format!("/define/{id}")))
            .query(&[("workspaceId", wid)]);
        self.send(req).await
    }

    /// Files available for native file bodies, with their static-serving URL
    /// filled in.
    pub async fn fileset(&self) -> Result<Vec<FileRef>, EngineError> {
        let files: Vec<FileRef> = self.fetch(self.client.get(self.url("/fileset"))).await?;
        Ok(files.into_iter().map(FileRef::with_static_url).collect())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, EngineError> {
        let response = req
            .send()
            .await
            .map_err(EngineError::Persistence)?
            .error_for_status()
            .map_err(EngineError::Persistence)?;
        debug!(url = %response.url(), "persistence round trip");
        response.json().await.map_err(EngineError::Persistence)
    }

    async fn send(&self, req: RequestBuilder) -> Result<(), EngineError> {
        req.send()
            .await
            .map_err(EngineError::Persistence)?
            .error_for_status()
            .map_err(EngineError::Persistence)?;
        Ok(())
    }
}
