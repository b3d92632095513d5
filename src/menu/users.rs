use std::io::{self, BufRead, Write};

use super::Session;
use crate::catalog::{self, UserId};

impl<R: BufRead, W: Write> Session<R, W> {
    pub(super) async fn users_menu(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "=== USERS ===")?;
            writeln!(self.out, "1. Create user")?;
            writeln!(self.out, "2. View user")?;
            writeln!(self.out, "3. Update user")?;
            writeln!(self.out, "4. Delete user")?;
            writeln!(self.out, "0. Back")?;

            match self.read_choice()?.as_str() {
                "1" => self.create_user().await?,
                "2" => self.view_user().await?,
                "3" => self.update_user().await?,
                "4" => self.delete_user().await?,
                "0" => break,
                _ => writeln!(self.out, "Invalid option")?,
            }
        }
        Ok(())
    }

    async fn create_user(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- Create User ---")?;
        let dni = self.read_text("DNI")?;
        let name = self.read_text("Name")?;
        let surname = self.read_text("Surname")?;
        let email = self.read_text("Email")?;
        let phone = self.read_text("Phone")?;
        let admitted = self.read_date("Admission date (YYYY-MM-DD)")?;

        let call = catalog::create_user(&dni, &name, &surname, &email, &phone, admitted);
        if self.dispatch(&call).await?.is_some() {
            writeln!(self.out, "User created.")?;
        }
        Ok(())
    }

    async fn view_user(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- View User ---")?;
        let user = UserId(self.read_integer("User id")?);

        let result = self.dispatch(&catalog::view_user(user)).await?;
        self.render_lookup(result, "User not found.")
    }

    async fn update_user(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- Update User ---")?;
        let user = UserId(self.read_integer("User id")?);
        let dni = self.read_text("New DNI")?;
        let name = self.read_text("New name")?;
        let surname = self.read_text("New surname")?;
        let email = self.read_text("New email")?;
        let phone = self.read_text("New phone")?;
        let status = self.read_text("Status (active/inactive)")?;

        let call = catalog::update_user(user, &dni, &name, &surname, &email, &phone, &status);
        if self.dispatch(&call).await?.is_some() {
            writeln!(self.out, "User updated.")?;
        }
        Ok(())
    }

    async fn delete_user(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- Delete User ---")?;
        let user = UserId(self.read_integer("User id")?);

        if self.dispatch(&catalog::delete_user(user)).await?.is_some() {
            writeln!(self.out, "User deleted (if they had no loans or pending payments).")?;
        }
        Ok(())
    }
}
