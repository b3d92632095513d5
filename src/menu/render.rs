use std::io::{self, BufRead, Write};

use super::Session;
use crate::types::RowSet;

impl<R: BufRead, W: Write> Session<R, W> {
    /// Print a header naming the fields in order, then one line per record.
    pub(super) fn print_rows(&mut self, rows: &RowSet) -> io::Result<()> {
        if !rows.columns().is_empty() {
            writeln!(self.out, "{}", rows.columns().join(" | "))?;
        }
        for record in rows.rows() {
            writeln!(self.out, "{}", record.join(" | "))?;
        }
        Ok(())
    }

    /// Shared tail of every read-style action: rows when the lookup found
    /// any, otherwise the action's "not found" message.
    pub(super) fn render_lookup(&mut self, result: Option<RowSet>, missing: &str) -> io::Result<()> {
        match result {
            Some(rows) if !rows.is_empty() => self.print_rows(&rows),
            _ => writeln!(self.out, "{missing}"),
        }
    }
}
