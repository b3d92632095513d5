//! biblio - a text-menu administration client for a library database
//!
//! All business rules (fine formulas, referential-integrity checks, fee math)
//! live in server-side stored routines. This client collects input, dispatches
//! named routine calls with positional parameters through a single gateway,
//! and prints the returned rows. Each call opens its own connection and closes
//! it before the result is consumed.
//!
//! # Example
//! ```ignore
//! use biblio::{catalog, DbConfig, Gateway};
//!
//! // Connect settings come from biblio.toml, never from compiled-in values
//! let config = DbConfig::load()?;
//! let gateway = Gateway::new(&config);
//!
//! let rows = gateway.invoke(&catalog::view_user(4.into())).await?;
//! for record in rows.rows() {
//!     println!("{}", record.join(" | "));
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod drivers;
pub mod error;
pub mod menu;
pub mod traits;
pub mod types;

mod gateway;

// Re-export main types for convenient access
pub use config::DbConfig;
pub use error::{BiblioError, Result};
pub use gateway::Gateway;
pub use menu::Session;
pub use traits::{Connector, ProcedureConnection};
pub use types::{ProcValue, ResultSet, RowSet};
