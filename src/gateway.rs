use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use crate::catalog::ProcedureCall;
use crate::config::DbConfig;
use crate::drivers::PgConnector;
use crate::error::{BiblioError, Result};
use crate::traits::{Connector, ProcedureConnection};
use crate::types::RowSet;

/// The single choke point between the menu layer and the remote database.
///
/// Every invocation runs the same protocol: open a fresh connection, invoke
/// the named routine with positional parameters, drain every emitted result
/// set, close the connection, return the concatenated rows. Connections are
/// never reused across two calls and never survive past a call's return,
/// whether it succeeded or failed.
pub struct Gateway {
    connector: Arc<dyn Connector>,
    call_timeout: Duration,
}

impl Gateway {
    /// Build a gateway against the configured PostgreSQL backend.
    pub fn new(config: &DbConfig) -> Self {
        Self {
            connector: Arc::new(PgConnector::new(config)),
            call_timeout: config.call_timeout(),
        }
    }

    /// Build a gateway over a custom backend.
    /// Useful for testing or alternative database drivers.
    pub fn with_connector(connector: Arc<dyn Connector>, call_timeout: Duration) -> Self {
        Self {
            connector,
            call_timeout,
        }
    }

    /// Invoke a row-returning routine and collect everything it emitted.
    /// The returned rows may be empty; any failure is reported as an error
    /// after the connection has been released.
    pub async fn invoke(&self, call: &ProcedureCall) -> Result<RowSet> {
        debug!(procedure = call.name(), "invoking routine");
        let mut conn = self.open(call.name()).await?;

        let outcome = match timeout(self.call_timeout, conn.call(call.name(), call.params())).await
        {
            Ok(result) => result,
            Err(_) => Err(self.timed_out(call.name())),
        };
        self.release(call.name(), conn).await;

        let sets = outcome?;
        debug!(
            procedure = call.name(),
            sets = sets.len(),
            "collected result sets"
        );
        Ok(RowSet::from_sets(sets))
    }

    /// Invoke a routine that yields a single scalar.
    /// `None` means the routine produced no value, which read-style callers
    /// render as "not found".
    pub async fn invoke_scalar(&self, call: &ProcedureCall) -> Result<Option<String>> {
        debug!(procedure = call.name(), "invoking scalar routine");
        let mut conn = self.open(call.name()).await?;

        let outcome =
            match timeout(self.call_timeout, conn.call_scalar(call.name(), call.params())).await {
                Ok(result) => result,
                Err(_) => Err(self.timed_out(call.name())),
            };
        self.release(call.name(), conn).await;

        outcome
    }

    async fn open(&self, procedure: &str) -> Result<Box<dyn ProcedureConnection>> {
        match timeout(self.call_timeout, self.connector.connect()).await {
            Ok(result) => result,
            Err(_) => Err(self.timed_out(procedure)),
        }
    }

    /// Connections are released even when the call failed; a close failure is
    /// logged rather than masking the call's own outcome.
    async fn release(&self, procedure: &str, conn: Box<dyn ProcedureConnection>) {
        if let Err(err) = conn.close().await {
            warn!(procedure, error = %err, "failed to close connection");
        }
    }

    fn timed_out(&self, procedure: &str) -> BiblioError {
        BiblioError::TimedOut {
            procedure: procedure.to_string(),
            seconds: self.call_timeout.as_secs(),
        }
    }
}
