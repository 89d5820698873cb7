pub mod body;
pub mod definition;
pub mod field;
pub mod workspace;

pub use body::{FileRef, FileType, FormType, HttpBody, RawType};
pub use definition::{Collection, CollectionMeta, PathDefinition, RequestDefinition, ResponseDefinition};
pub use field::KVField;
pub use workspace::Workspace;
