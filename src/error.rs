/// Typed failure channel for every engine operation. No variant is fatal:
/// an operation either completes or reports one of these with prior state
/// intact.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Rejected input; no state was mutated.
    #[error("validation error: {0}")]
    Validation(String),
    /// The persistence service call failed; the local mutation was not applied.
    #[error("persistence error: {0}")]
    Persistence(#[source] reqwest::Error),
    /// The live test call failed at the transport level (DNS, connect,
    /// timeout). Never coerced into a response artifact.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
}
