//! The interactive surface: a hierarchical text menu over any pair of
//! input/output streams. The binary wires it to stdin/stdout; tests drive it
//! with byte slices and capture the transcript.
//!
//! Every leaf action reads its prompts first, then dispatches exactly one
//! gateway call, so no connection is ever held while waiting on the keyboard.

use std::io::{self, BufRead, Write};

use crate::catalog::ProcedureCall;
use crate::gateway::Gateway;
use crate::types::RowSet;

mod books;
mod fees;
mod loans;
mod prompt;
mod render;
mod reports;
mod users;

/// One interactive administration session.
pub struct Session<R, W> {
    gateway: Gateway,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(gateway: Gateway, input: R, out: W) -> Self {
        Self {
            gateway,
            input,
            out,
        }
    }

    /// Consume the session and hand back the output stream.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run the root menu loop until the user selects exit.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "==== LIBRARY SYSTEM ====")?;
            writeln!(self.out, "1. Manage users")?;
            writeln!(self.out, "2. Manage books")?;
            writeln!(self.out, "3. Register loan")?;
            writeln!(self.out, "4. Register return")?;
            writeln!(self.out, "5. Compute fine")?;
            writeln!(self.out, "6. Register payment")?;
            writeln!(self.out, "7. Update fee")?;
            writeln!(self.out, "8. Search users")?;
            writeln!(self.out, "9. Search books")?;
            writeln!(self.out, "10. Delinquent users")?;
            writeln!(self.out, "11. Average months owed")?;
            writeln!(self.out, "0. Exit")?;

            match self.read_choice()?.as_str() {
                "1" => self.users_menu().await?,
                "2" => self.books_menu().await?,
                "3" => self.register_loan().await?,
                "4" => self.register_return().await?,
                "5" => self.compute_fine().await?,
                "6" => self.register_payment().await?,
                "7" => self.update_fee().await?,
                "8" => self.search_users().await?,
                "9" => self.search_books().await?,
                "10" => self.delinquent_list().await?,
                "11" => self.average_months_owed().await?,
                "0" => {
                    writeln!(self.out, "Exiting.")?;
                    break;
                }
                _ => writeln!(self.out, "Invalid option")?,
            }
        }
        Ok(())
    }

    /// Dispatch a row-returning call, normalizing any gateway error into a
    /// printed diagnostic plus the "no result" branch, so leaf actions only
    /// ever see "got rows" or "got nothing".
    async fn dispatch(&mut self, call: &ProcedureCall) -> io::Result<Option<RowSet>> {
        match self.gateway.invoke(call).await {
            Ok(rows) => Ok(Some(rows)),
            Err(err) => {
                writeln!(self.out, "Error: {err}")?;
                Ok(None)
            }
        }
    }

    /// Scalar counterpart of [`Session::dispatch`].
    async fn dispatch_scalar(&mut self, call: &ProcedureCall) -> io::Result<Option<String>> {
        match self.gateway.invoke_scalar(call).await {
            Ok(value) => Ok(value),
            Err(err) => {
                writeln!(self.out, "Error: {err}")?;
                Ok(None)
            }
        }
    }
}
