use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::body::HttpBody;
use super::field::{self, KVField};

/// One mock API endpoint's full editable shape: the route it matches and the
/// response it serves. This is the unit persisted and edited.
///
/// `collect_id == ""` means not yet assigned to a collection (new/unsaved).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathDefinition {
    #[serde(rename = "collectId", default)]
    pub collect_id: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub route_headers: Vec<KVField>,
    #[serde(default)]
    pub route_params: Vec<KVField>,
    #[serde(default = "default_mock_status")]
    pub mock_status: Vec<KVField>,
    #[serde(default)]
    pub mock_headers: Vec<KVField>,
    #[serde(default)]
    pub mock_body: HttpBody,
}

fn default_mock_status() -> Vec<KVField> {
    vec![
        KVField::new(0, "statusCode", "200"),
        KVField::new(1, "statusText", "OK"),
    ]
}

impl Default for PathDefinition {
    fn default() -> Self {
        Self::new("Unnamed")
    }
}

impl PathDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            collect_id: String::new(),
            id: String::new(),
            name: name.into(),
            method: "GET".to_string(),
            path: "/something".to_string(),
            route_headers: Vec::new(),
            route_params: Vec::new(),
            mock_status: default_mock_status(),
            mock_headers: Vec::new(),
            mock_body: HttpBody::default(),
        }
    }

    /// Whether the two fixed `mock_status` rows are still present.
    pub fn has_fixed_status(&self) -> bool {
        field::get(&self.mock_status, "statusCode").is_some()
            && field::get(&self.mock_status, "statusText").is_some()
    }
}

/// A named folder grouping path definitions, as materialized in the tree view
/// and on the persistence wire. Normalized storage keeps only id and name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Collection {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub paths: Vec<PathDefinition>,
}

/// Normalized collection entry; membership is inferred from each path
/// definition's `collect_id`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectionMeta {
    pub id: String,
    pub name: String,
}

impl From<&Collection> for CollectionMeta {
    fn from(c: &Collection) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
        }
    }
}

/// What one live test call will actually send. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDefinition {
    pub id: String,
    pub name: String,
    pub method: String,
    pub path: String,
    pub headers: Vec<KVField>,
    pub parameters: Vec<KVField>,
    pub body: HttpBody,
}

impl Default for RequestDefinition {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            method: String::new(),
            path: String::new(),
            headers: Vec::new(),
            parameters: Vec::new(),
            body: HttpBody::default(),
        }
    }
}

impl RequestDefinition {
    /// Seed a request from a path definition's route shape.
    pub fn for_path(def: &PathDefinition) -> Self {
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            method: def.method.clone(),
            path: def.path.clone(),
            headers: def.route_headers.clone(),
            parameters: def.route_params.clone(),
            body: HttpBody::default(),
        }
    }
}

/// The decoded outcome of one live test call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDefinition {
    pub id: String,
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<KVField>,
    pub body: HttpBody,
    pub received_at: DateTime<Utc>,
}

impl ResponseDefinition {
    pub fn new(status: u16, status_text: impl Into<String>, headers: Vec<KVField>, body: HttpBody) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            status,
            status_text: status_text.into(),
            headers,
            body,
            received_at: Utc::now(),
        }
    }
}
