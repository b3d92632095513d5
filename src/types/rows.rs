/// One result set emitted by a routine invocation.
/// All values are converted to strings by the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    /// Column names in order
    pub columns: Vec<String>,
    /// Rows, where each row is a vector of string values in column order
    pub rows: Vec<Vec<String>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}

/// Everything a routine invocation produced, with the rows of every emitted
/// result set concatenated in emission order. Column names come from the
/// first set that declared any; the sets of a single routine share a shape
/// in practice.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSet {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RowSet {
    /// Flatten the emitted result sets into one ordered sequence of records.
    pub fn from_sets(sets: Vec<ResultSet>) -> Self {
        let mut columns = Vec::new();
        let mut rows = Vec::new();
        for set in sets {
            if columns.is_empty() && !set.columns.is_empty() {
                columns = set.columns;
            }
            rows.extend(set.rows);
        }
        Self { columns, rows }
    }

    /// Returns the column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the concatenated records, in emission order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns the number of records across all result sets.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no result set produced any record.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(columns: &[&str], rows: &[&[&str]]) -> ResultSet {
        ResultSet::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|v| v.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn from_sets_concatenates_in_emission_order() {
        let rows = RowSet::from_sets(vec![
            set(&["id", "name"], &[&["1", "Ana"], &["2", "Luis"]]),
            set(&["id", "name"], &[&["3", "Eva"]]),
        ]);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows.columns(), &["id", "name"]);
        assert_eq!(rows.rows()[0], vec!["1", "Ana"]);
        assert_eq!(rows.rows()[2], vec!["3", "Eva"]);
    }

    #[test]
    fn from_sets_takes_columns_from_first_nonempty_set() {
        let rows = RowSet::from_sets(vec![
            ResultSet::empty(),
            set(&["id"], &[&["7"]]),
        ]);

        assert_eq!(rows.columns(), &["id"]);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn from_sets_of_nothing_is_empty() {
        let rows = RowSet::from_sets(Vec::new());
        assert!(rows.is_empty());
        assert_eq!(rows.len(), 0);
        assert!(rows.columns().is_empty());
    }
}
