use std::io::{self, BufRead, Write};

use super::Session;
use crate::catalog;

impl<R: BufRead, W: Write> Session<R, W> {
    pub(super) async fn search_users(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- Search Users ---")?;
        let text = self.read_text("Text")?;

        let result = self.dispatch(&catalog::search_users(&text)).await?;
        self.render_lookup(result, "No users matched.")
    }

    pub(super) async fn search_books(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- Search Books ---")?;
        let text = self.read_text("Text")?;

        let result = self.dispatch(&catalog::search_books(&text)).await?;
        self.render_lookup(result, "No books matched.")
    }

    pub(super) async fn delinquent_list(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- Delinquent Users ---")?;
        let month = self.read_integer("Month (1-12)")?;
        let year = self.read_integer("Year")?;

        let result = self.dispatch(&catalog::delinquent_list(month, year)).await?;
        self.render_lookup(result, "No delinquent users found.")
    }

    pub(super) async fn average_months_owed(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- Average Months Owed ---")?;

        match self
            .dispatch_scalar(&catalog::average_months_owed())
            .await?
        {
            Some(value) => match value.parse::<f64>() {
                Ok(average) => writeln!(self.out, "Average months owed: {average:.2}"),
                Err(_) => writeln!(self.out, "Average months owed: {value}"),
            },
            None => writeln!(self.out, "No fee debt recorded."),
        }
    }
}
