use crate::model::workspace::Workspace;

/// The known workspaces and the one currently targeted by live calls.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceRegistry {
    workspaces: Vec<Workspace>,
    current: Workspace,
}

impl WorkspaceRegistry {
    pub fn new() -> Self {
        Self {
            workspaces: Vec::new(),
            current: Workspace::default(),
        }
    }

    pub fn initialize(&mut self, workspaces: Vec<Workspace>, current: Workspace) {
        self.workspaces = workspaces;
        self.current = current;
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn current(&self) -> &Workspace {
        &self.current
    }

    pub fn find(&self, id: &str) -> Option<&Workspace> {
        self.workspaces.iter().find(|w| w.id == id)
    }

    pub fn set_current(&mut self, workspace: Workspace) {
        self.current = workspace;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_and_find() {
        let w1 = Workspace {
            id: "w1".to_string(),
            name: "One".to_string(),
            endpoint: "http://x".to_string(),
        };
        let mut registry = WorkspaceRegistry::new();
        registry.initialize(vec![w1.clone()], w1.clone());
        assert_eq!(registry.current().id, "w1");
        assert!(registry.find("w1").is_some());
        assert!(registry.find("w2").is_none());
    }

    #[test]
    fn test_default_current_workspace() {
        let registry = WorkspaceRegistry::new();
        assert_eq!(registry.current().id, "default");
        assert_eq!(registry.current().endpoint, "http://127.0.0.1:18080");
    }
}
