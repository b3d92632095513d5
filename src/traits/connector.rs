use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ProcValue, ResultSet};

/// Trait for backend connection factories.
/// The gateway opens one fresh connection per routine invocation, so the
/// factory is the long-lived object and connections are throwaways.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Establish a new connection to the backend.
    async fn connect(&self) -> Result<Box<dyn ProcedureConnection>>;
}

/// One live connection to the backend.
/// Implementations are responsible for:
/// - Converting ProcValue parameters to native types
/// - Invoking the named routine with positional parameters
/// - Returning every emitted result set, in emission order, as strings
#[async_trait]
pub trait ProcedureConnection: Send {
    /// Invoke a row-returning routine.
    async fn call(&mut self, procedure: &str, params: &[ProcValue]) -> Result<Vec<ResultSet>>;

    /// Invoke a routine that yields a single scalar.
    /// Returns `None` when the routine produced no row or a NULL value.
    async fn call_scalar(&mut self, routine: &str, params: &[ProcValue])
        -> Result<Option<String>>;

    /// Release the connection. Called on success and failure paths alike.
    async fn close(self: Box<Self>) -> Result<()>;
}
