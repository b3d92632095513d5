use chrono::NaiveDate;

/// Represents one positional routine parameter in a driver-agnostic way.
/// Drivers are responsible for converting these to their native types.
///
/// Every scalar kind the remote catalog accepts has its own variant, so a
/// call site cannot hand an amount where the routine expects an identifier
/// without the compiler noticing.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcValue {
    /// A surrogate key (user id, book id, loan id).
    Id(i64),
    Text(String),
    Date(NaiveDate),
    /// A monetary amount (fee, fine).
    Money(f64),
    /// A small cardinal such as a month, a year, or a publication year.
    Count(i64),
    Flag(bool),
}

impl From<&str> for ProcValue {
    fn from(value: &str) -> Self {
        ProcValue::Text(value.to_string())
    }
}

impl From<String> for ProcValue {
    fn from(value: String) -> Self {
        ProcValue::Text(value)
    }
}

impl From<NaiveDate> for ProcValue {
    fn from(value: NaiveDate) -> Self {
        ProcValue::Date(value)
    }
}

impl From<f64> for ProcValue {
    fn from(value: f64) -> Self {
        ProcValue::Money(value)
    }
}

impl From<bool> for ProcValue {
    fn from(value: bool) -> Self {
        ProcValue::Flag(value)
    }
}
