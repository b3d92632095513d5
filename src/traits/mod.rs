mod connector;

pub use connector::{Connector, ProcedureConnection};
