pub mod definitions;
pub mod sessions;
pub mod workspaces;

pub use definitions::DefinitionStore;
pub use sessions::SessionManager;
pub use workspaces::WorkspaceRegistry;
