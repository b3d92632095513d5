use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{BiblioError, Result};
use crate::traits::{Connector, ProcedureConnection};
use crate::types::{ProcValue, ResultSet};

/// A recorded routine invocation for verification.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub procedure: String,
    pub params: Vec<ProcValue>,
}

/// What the backend should do with the next invocation.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Emit these result sets, in order.
    Sets(Vec<ResultSet>),
    /// Fail the invocation with this message, as a violated constraint or an
    /// unknown routine would.
    Failure(String),
}

/// An in-memory backend for testing.
///
/// Allows scripting replies and verifying the invocations the gateway
/// issued, including how many connections were opened and closed.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use biblio::drivers::{InMemoryConnector, ResultSetBuilder};
///
/// let connector = Arc::new(
///     InMemoryConnector::new().with_set(
///         ResultSetBuilder::new()
///             .columns(&["id", "name"])
///             .row(&["1", "Ana"])
///             .build(),
///     ),
/// );
/// ```
pub struct InMemoryConnector {
    state: Arc<State>,
}

#[derive(Default)]
struct State {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<RecordedCall>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
    refuse: AtomicBool,
}

impl InMemoryConnector {
    /// Create a new in-memory backend with no scripted replies.
    /// Unscripted invocations succeed with zero result sets.
    pub fn new() -> Self {
        Self {
            state: Arc::new(State::default()),
        }
    }

    /// Script the next invocation to emit the given result sets.
    /// Replies are consumed in FIFO order.
    pub fn with_sets(self, sets: Vec<ResultSet>) -> Self {
        self.state
            .replies
            .lock()
            .unwrap()
            .push_back(Reply::Sets(sets));
        self
    }

    /// Script the next invocation to emit a single result set.
    pub fn with_set(self, set: ResultSet) -> Self {
        self.with_sets(vec![set])
    }

    /// Script the next invocation to yield one scalar value.
    pub fn with_scalar(self, value: &str) -> Self {
        self.with_set(ResultSetBuilder::new().columns(&["value"]).row(&[value]).build())
    }

    /// Script the next invocation to fail.
    pub fn with_failure(self, message: &str) -> Self {
        self.state
            .replies
            .lock()
            .unwrap()
            .push_back(Reply::Failure(message.to_string()));
        self
    }

    /// Make every connection attempt fail, as an unreachable or
    /// misconfigured database would.
    pub fn refusing_connections(self) -> Self {
        self.state.refuse.store(true, Ordering::SeqCst);
        self
    }

    /// Get all invocations the gateway issued.
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }

    /// Get the last invocation, if any.
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.state.calls.lock().unwrap().last().cloned()
    }

    /// Number of invocations issued so far.
    pub fn call_count(&self) -> usize {
        self.state.calls.lock().unwrap().len()
    }

    /// Number of connections handed out.
    pub fn opened(&self) -> usize {
        self.state.opened.load(Ordering::SeqCst)
    }

    /// Number of connections released again.
    pub fn closed(&self) -> usize {
        self.state.closed.load(Ordering::SeqCst)
    }

    /// Assert that the last invocation matches the expected routine name and
    /// positional parameters.
    pub fn assert_last_call(&self, expected_procedure: &str, expected_params: &[ProcValue]) {
        let last = self.last_call().expect("No calls were recorded");
        assert_eq!(
            last.procedure, expected_procedure,
            "Routine mismatch.\nExpected: {}\nActual: {}",
            expected_procedure, last.procedure
        );
        assert_eq!(
            last.params, expected_params,
            "Parameters mismatch.\nExpected: {:?}\nActual: {:?}",
            expected_params, last.params
        );
    }

    /// Assert that exactly n invocations were issued.
    pub fn assert_call_count(&self, expected: usize) {
        let actual = self.call_count();
        assert_eq!(
            actual, expected,
            "Call count mismatch. Expected: {}, Actual: {}",
            expected, actual
        );
    }
}

impl Default for InMemoryConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for InMemoryConnector {
    async fn connect(&self) -> Result<Box<dyn ProcedureConnection>> {
        if self.state.refuse.load(Ordering::SeqCst) {
            return Err(BiblioError::ConnectionFailed(
                "connection refused".to_string(),
            ));
        }
        self.state.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemoryConnection {
            state: Arc::clone(&self.state),
        }))
    }
}

struct InMemoryConnection {
    state: Arc<State>,
}

impl InMemoryConnection {
    fn next_reply(&self, procedure: &str, params: &[ProcValue]) -> Result<Vec<ResultSet>> {
        self.state.calls.lock().unwrap().push(RecordedCall {
            procedure: procedure.to_string(),
            params: params.to_vec(),
        });

        let reply = self.state.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Sets(sets)) => Ok(sets),
            Some(Reply::Failure(message)) => Err(BiblioError::CallFailed {
                procedure: procedure.to_string(),
                message,
            }),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl ProcedureConnection for InMemoryConnection {
    async fn call(&mut self, procedure: &str, params: &[ProcValue]) -> Result<Vec<ResultSet>> {
        self.next_reply(procedure, params)
    }

    async fn call_scalar(
        &mut self,
        routine: &str,
        params: &[ProcValue],
    ) -> Result<Option<String>> {
        let sets = self.next_reply(routine, params)?;
        Ok(sets
            .first()
            .and_then(|set| set.rows.first())
            .and_then(|row| row.first())
            .cloned())
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.state.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Builder for creating test result sets easily.
pub struct ResultSetBuilder {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ResultSetBuilder {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Set the column names for the result set.
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Add a row of string values.
    pub fn row(mut self, values: &[&str]) -> Self {
        self.rows
            .push(values.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Build the ResultSet.
    pub fn build(self) -> ResultSet {
        ResultSet::new(self.columns, self.rows)
    }
}

impl Default for ResultSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
