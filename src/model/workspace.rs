use serde::{Deserialize, Serialize};

/// A named target environment against which live test calls run.
/// `endpoint` is the base URL prefix for the Mock Executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub endpoint: String,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            name: "Default Workspace".to_string(),
            endpoint: "http://127.0.0.1:18080".to_string(),
        }
    }
}
