use async_trait::async_trait;
use chrono::NaiveDate;
use tokio_postgres::{types::ToSql, Client, NoTls};
use tracing::warn;

use crate::config::DbConfig;
use crate::error::{BiblioError, Result};
use crate::traits::{Connector, ProcedureConnection};
use crate::types::{ProcValue, ResultSet};

/// PostgreSQL backend using tokio-postgres.
///
/// Row-returning routines are set-returning functions invoked as
/// `SELECT * FROM "Name"($1, ...)`; scalar routines as `SELECT "Name"(...)`.
/// tokio-postgres runs each statement in autocommit mode, so a mutation is
/// durable once the query returns.
pub struct PgConnector {
    config: DbConfig,
}

impl PgConnector {
    pub fn new(config: &DbConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait]
impl Connector for PgConnector {
    async fn connect(&self) -> Result<Box<dyn ProcedureConnection>> {
        let mut pg = tokio_postgres::Config::new();
        pg.host(&self.config.host)
            .port(self.config.port)
            .user(&self.config.user)
            .password(&self.config.password)
            .dbname(&self.config.dbname);

        let (client, connection) = pg
            .connect(NoTls)
            .await
            .map_err(|e| BiblioError::ConnectionFailed(e.to_string()))?;

        // Drive the connection until the client side drops it.
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                warn!(error = %e, "postgres connection task ended with error");
            }
        });

        Ok(Box::new(PgConnection { client }))
    }
}

struct PgConnection {
    client: Client,
}

#[async_trait]
impl ProcedureConnection for PgConnection {
    async fn call(&mut self, procedure: &str, params: &[ProcValue]) -> Result<Vec<ResultSet>> {
        let sql = routine_sql(procedure, params.len(), true);
        let rows = self.query(procedure, &sql, params).await?;

        // Extract column names
        let columns: Vec<String> = if rows.is_empty() {
            Vec::new()
        } else {
            rows[0]
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect()
        };

        // Convert rows to string values
        let result_rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                (0..row.columns().len())
                    .map(|i| row_value_to_string(row, i))
                    .collect()
            })
            .collect();

        Ok(vec![ResultSet::new(columns, result_rows)])
    }

    async fn call_scalar(
        &mut self,
        routine: &str,
        params: &[ProcValue],
    ) -> Result<Option<String>> {
        let sql = routine_sql(routine, params.len(), false);
        let rows = self.query(routine, &sql, params).await?;

        let Some(row) = rows.first() else {
            return Ok(None);
        };
        Ok(scalar_value(row))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        // Dropping the client terminates the spawned connection task.
        Ok(())
    }
}

impl PgConnection {
    async fn query(
        &self,
        routine: &str,
        sql: &str,
        params: &[ProcValue],
    ) -> Result<Vec<tokio_postgres::Row>> {
        let converted_params: Vec<Box<dyn ToSql + Sync + Send>> =
            params.iter().map(proc_value_to_tosql).collect();

        let param_refs: Vec<&(dyn ToSql + Sync)> = converted_params
            .iter()
            .map(|b| b.as_ref() as &(dyn ToSql + Sync))
            .collect();

        self.client
            .query(sql, &param_refs)
            .await
            .map_err(|e| BiblioError::CallFailed {
                procedure: routine.to_string(),
                message: e.to_string(),
            })
    }
}

/// Build the invocation statement for a routine with `arity` positional
/// placeholders. Routine names come from the compiled-in catalog, never from
/// user input.
fn routine_sql(name: &str, arity: usize, rowset: bool) -> String {
    let placeholders = (1..=arity)
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    if rowset {
        format!("SELECT * FROM \"{name}\"({placeholders})")
    } else {
        format!("SELECT \"{name}\"({placeholders})")
    }
}

/// Convert a ProcValue to a boxed ToSql trait object.
fn proc_value_to_tosql(value: &ProcValue) -> Box<dyn ToSql + Sync + Send> {
    match value {
        ProcValue::Id(i) => Box::new(*i),
        ProcValue::Text(s) => Box::new(s.clone()),
        ProcValue::Date(d) => Box::new(*d),
        ProcValue::Money(m) => Box::new(*m),
        ProcValue::Count(c) => Box::new(*c),
        ProcValue::Flag(b) => Box::new(*b),
    }
}

/// Convert a row value at a given index to a string.
fn row_value_to_string(row: &tokio_postgres::Row, index: usize) -> String {
    // Try common types and convert to string

    // Try as i32
    if let Ok(val) = row.try_get::<_, i32>(index) {
        return val.to_string();
    }

    // Try as i64
    if let Ok(val) = row.try_get::<_, i64>(index) {
        return val.to_string();
    }

    // Try as String
    if let Ok(val) = row.try_get::<_, String>(index) {
        return val;
    }

    // Try as bool
    if let Ok(val) = row.try_get::<_, bool>(index) {
        return val.to_string();
    }

    // Try as f64
    if let Ok(val) = row.try_get::<_, f64>(index) {
        return val.to_string();
    }

    // Try as date
    if let Ok(val) = row.try_get::<_, NaiveDate>(index) {
        return val.to_string();
    }

    // Try as Option<String> for NULL handling
    if let Ok(val) = row.try_get::<_, Option<String>>(index) {
        return val.unwrap_or_else(|| "NULL".to_string());
    }

    // Fallback
    "UNKNOWN".to_string()
}

/// Read the single value of a scalar routine's result row.
/// NULL maps to `None` so callers can render a "not found" message.
fn scalar_value(row: &tokio_postgres::Row) -> Option<String> {
    if let Ok(val) = row.try_get::<_, Option<f64>>(0) {
        return val.map(|v| v.to_string());
    }
    if let Ok(val) = row.try_get::<_, Option<i64>>(0) {
        return val.map(|v| v.to_string());
    }
    if let Ok(val) = row.try_get::<_, Option<i32>>(0) {
        return val.map(|v| v.to_string());
    }
    if let Ok(val) = row.try_get::<_, Option<String>>(0) {
        return val;
    }
    None
}
