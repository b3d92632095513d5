use std::io::{self, BufRead, Write};

use chrono::NaiveDate;

use super::Session;

/// Typed prompt helpers. A value that does not parse re-prompts the same
/// field; what the value *means* is for the remote routines to judge.
impl<R: BufRead, W: Write> Session<R, W> {
    pub(super) fn read_choice(&mut self) -> io::Result<String> {
        self.read_field("Select")
    }

    pub(super) fn read_text(&mut self, label: &str) -> io::Result<String> {
        self.read_field(label)
    }

    pub(super) fn read_integer(&mut self, label: &str) -> io::Result<i64> {
        loop {
            let raw = self.read_field(label)?;
            match raw.parse() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.out, "Enter a whole number.")?,
            }
        }
    }

    pub(super) fn read_date(&mut self, label: &str) -> io::Result<NaiveDate> {
        loop {
            let raw = self.read_field(label)?;
            match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                Ok(date) => return Ok(date),
                Err(_) => writeln!(self.out, "Enter a date as YYYY-MM-DD.")?,
            }
        }
    }

    pub(super) fn read_amount(&mut self, label: &str) -> io::Result<f64> {
        loop {
            let raw = self.read_field(label)?;
            match raw.parse() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.out, "Enter an amount such as 12.50.")?,
            }
        }
    }

    pub(super) fn read_flag(&mut self, label: &str) -> io::Result<bool> {
        loop {
            match self.read_field(label)?.as_str() {
                "1" => return Ok(true),
                "0" => return Ok(false),
                _ => writeln!(self.out, "Enter 1 or 0.")?,
            }
        }
    }

    fn read_field(&mut self, label: &str) -> io::Result<String> {
        write!(self.out, "{label}: ")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed",
            ));
        }
        Ok(line.trim().to_string())
    }
}
