use std::io::{self, BufRead, Write};

use super::Session;
use crate::catalog::{self, BookId};

impl<R: BufRead, W: Write> Session<R, W> {
    pub(super) async fn books_menu(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "=== BOOKS ===")?;
            writeln!(self.out, "1. Create book")?;
            writeln!(self.out, "2. View book")?;
            writeln!(self.out, "3. Update book")?;
            writeln!(self.out, "4. Delete book")?;
            writeln!(self.out, "0. Back")?;

            match self.read_choice()?.as_str() {
                "1" => self.create_book().await?,
                "2" => self.view_book().await?,
                "3" => self.update_book().await?,
                "4" => self.delete_book().await?,
                "0" => break,
                _ => writeln!(self.out, "Invalid option")?,
            }
        }
        Ok(())
    }

    async fn create_book(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- Create Book ---")?;
        let title = self.read_text("Title")?;
        let author = self.read_text("Author")?;
        let year = self.read_integer("Year")?;
        let genre = self.read_text("Genre")?;

        let call = catalog::create_book(&title, &author, year, &genre);
        if self.dispatch(&call).await?.is_some() {
            writeln!(self.out, "Book created.")?;
        }
        Ok(())
    }

    async fn view_book(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- View Book ---")?;
        let book = BookId(self.read_integer("Book id")?);

        let result = self.dispatch(&catalog::view_book(book)).await?;
        self.render_lookup(result, "Book not found.")
    }

    async fn update_book(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- Update Book ---")?;
        let book = BookId(self.read_integer("Book id")?);
        let title = self.read_text("New title")?;
        let author = self.read_text("New author")?;
        let year = self.read_integer("New year")?;
        let genre = self.read_text("New genre")?;
        let available = self.read_flag("Available (1/0)")?;

        let call = catalog::update_book(book, &title, &author, year, &genre, available);
        if self.dispatch(&call).await?.is_some() {
            writeln!(self.out, "Book updated.")?;
        }
        Ok(())
    }

    async fn delete_book(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- Delete Book ---")?;
        let book = BookId(self.read_integer("Book id")?);

        if self.dispatch(&catalog::delete_book(book)).await?.is_some() {
            writeln!(self.out, "Book deleted (if it had no loans).")?;
        }
        Ok(())
    }
}
