mod in_memory;
mod postgres;

pub use self::in_memory::{InMemoryConnector, RecordedCall, Reply, ResultSetBuilder};
pub use self::postgres::PgConnector;
