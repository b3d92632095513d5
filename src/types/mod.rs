mod rows;
mod value;

pub use self::rows::{ResultSet, RowSet};
pub use self::value::ProcValue;
