use std::io::{self, BufRead, Write};

use super::Session;
use crate::catalog::{self, UserId};

impl<R: BufRead, W: Write> Session<R, W> {
    pub(super) async fn register_payment(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- Register Fee Payment ---")?;
        let user = UserId(self.read_integer("User id")?);
        let month = self.read_integer("Month (1-12)")?;
        let year = self.read_integer("Year")?;

        let call = catalog::register_payment(user, month, year);
        if self.dispatch(&call).await?.is_some() {
            writeln!(self.out, "Payment registered.")?;
        }
        Ok(())
    }

    pub(super) async fn update_fee(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- Update Fee ---")?;
        let month = self.read_integer("Month (1-12)")?;
        let year = self.read_integer("Year")?;
        let amount = self.read_amount("New amount")?;

        let call = catalog::update_fee(month, year, amount);
        if self.dispatch(&call).await?.is_some() {
            writeln!(self.out, "Fee updated.")?;
        }
        Ok(())
    }
}
