pub mod client;
pub mod codec;
pub mod executor;

pub use executor::MockExecutor;
