use std::io::{self, BufRead, Write};

use super::Session;
use crate::catalog::{self, BookId, LoanId, UserId};

impl<R: BufRead, W: Write> Session<R, W> {
    pub(super) async fn register_loan(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- Register Loan ---")?;
        let user = UserId(self.read_integer("User id")?);
        let book = BookId(self.read_integer("Book id")?);
        let due = self.read_date("Due date (YYYY-MM-DD)")?;

        let call = catalog::register_loan(user, book, due);
        if self.dispatch(&call).await?.is_some() {
            writeln!(self.out, "Loan registered.")?;
        }
        Ok(())
    }

    pub(super) async fn register_return(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- Register Return ---")?;
        let loan = LoanId(self.read_integer("Loan id")?);
        let returned = self.read_date("Actual return date (YYYY-MM-DD)")?;

        let call = catalog::register_return(loan, returned);
        if self.dispatch(&call).await?.is_some() {
            writeln!(self.out, "Return registered.")?;
        }
        Ok(())
    }

    pub(super) async fn compute_fine(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- Compute Fine ---")?;
        let loan = LoanId(self.read_integer("Loan id")?);

        match self.dispatch_scalar(&catalog::loan_fine(loan)).await? {
            Some(value) => match value.parse::<f64>() {
                Ok(amount) => writeln!(self.out, "The fine is: ${amount:.2}"),
                Err(_) => writeln!(self.out, "The fine is: {value}"),
            },
            None => writeln!(self.out, "Loan not found."),
        }
    }
}
