//! Definition store and mock execution engine for an interactive API
//! testing workbench: collections of mock endpoint definitions, per-workspace
//! editing sessions, and live test calls with structured body transcoding.
//!
//! The crate is the headless core; any presentation layer consumes the
//! stores' read model and drives mutations through [`Engine`].

pub mod engine;
pub mod error;
pub mod http;
pub mod model;
pub mod persist;
pub mod store;

pub use engine::Engine;
pub use error::EngineError;
pub use persist::PersistClient;
