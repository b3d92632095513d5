//! The remote routine catalog.
//!
//! Each administrative action has exactly one constructor here, so the
//! positional parameter order the remote routine declares is encoded once
//! instead of being re-matched by hand at every prompt site.

use chrono::NaiveDate;

use crate::types::ProcValue;

/// Surrogate key of a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

/// Surrogate key of a book record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookId(pub i64);

/// Surrogate key of a loan record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanId(pub i64);

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        UserId(value)
    }
}

impl From<i64> for BookId {
    fn from(value: i64) -> Self {
        BookId(value)
    }
}

impl From<i64> for LoanId {
    fn from(value: i64) -> Self {
        LoanId(value)
    }
}

/// A routine name plus its positional parameters, ready for the gateway.
/// Only the constructors below can build one.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureCall {
    name: &'static str,
    params: Vec<ProcValue>,
}

impl ProcedureCall {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn params(&self) -> &[ProcValue] {
        &self.params
    }
}

/// New users always enter in this state; the remote routine still takes the
/// status positionally.
const INITIAL_USER_STATUS: &str = "active";

pub fn create_user(
    dni: &str,
    name: &str,
    surname: &str,
    email: &str,
    phone: &str,
    admitted: NaiveDate,
) -> ProcedureCall {
    ProcedureCall {
        name: "CreateUser",
        params: vec![
            dni.into(),
            name.into(),
            surname.into(),
            email.into(),
            phone.into(),
            admitted.into(),
            INITIAL_USER_STATUS.into(),
        ],
    }
}

pub fn view_user(user: UserId) -> ProcedureCall {
    ProcedureCall {
        name: "ViewUser",
        params: vec![ProcValue::Id(user.0)],
    }
}

pub fn update_user(
    user: UserId,
    dni: &str,
    name: &str,
    surname: &str,
    email: &str,
    phone: &str,
    status: &str,
) -> ProcedureCall {
    ProcedureCall {
        name: "UpdateUser",
        params: vec![
            ProcValue::Id(user.0),
            dni.into(),
            name.into(),
            surname.into(),
            email.into(),
            phone.into(),
            status.into(),
        ],
    }
}

pub fn delete_user(user: UserId) -> ProcedureCall {
    ProcedureCall {
        name: "DeleteUser",
        params: vec![ProcValue::Id(user.0)],
    }
}

pub fn create_book(title: &str, author: &str, year: i64, genre: &str) -> ProcedureCall {
    // Newly registered books are always available for loan.
    ProcedureCall {
        name: "CreateBook",
        params: vec![
            title.into(),
            author.into(),
            ProcValue::Count(year),
            genre.into(),
            ProcValue::Flag(true),
        ],
    }
}

pub fn view_book(book: BookId) -> ProcedureCall {
    ProcedureCall {
        name: "ViewBook",
        params: vec![ProcValue::Id(book.0)],
    }
}

pub fn update_book(
    book: BookId,
    title: &str,
    author: &str,
    year: i64,
    genre: &str,
    available: bool,
) -> ProcedureCall {
    ProcedureCall {
        name: "UpdateBook",
        params: vec![
            ProcValue::Id(book.0),
            title.into(),
            author.into(),
            ProcValue::Count(year),
            genre.into(),
            ProcValue::Flag(available),
        ],
    }
}

pub fn delete_book(book: BookId) -> ProcedureCall {
    ProcedureCall {
        name: "DeleteBook",
        params: vec![ProcValue::Id(book.0)],
    }
}

pub fn register_loan(user: UserId, book: BookId, due: NaiveDate) -> ProcedureCall {
    ProcedureCall {
        name: "RegisterLoan",
        params: vec![ProcValue::Id(user.0), ProcValue::Id(book.0), due.into()],
    }
}

pub fn register_return(loan: LoanId, returned: NaiveDate) -> ProcedureCall {
    ProcedureCall {
        name: "RegisterReturn",
        params: vec![ProcValue::Id(loan.0), returned.into()],
    }
}

pub fn register_payment(user: UserId, month: i64, year: i64) -> ProcedureCall {
    ProcedureCall {
        name: "RegisterPayment",
        params: vec![
            ProcValue::Id(user.0),
            ProcValue::Count(month),
            ProcValue::Count(year),
        ],
    }
}

pub fn update_fee(month: i64, year: i64, amount: f64) -> ProcedureCall {
    ProcedureCall {
        name: "UpdateFee",
        params: vec![
            ProcValue::Count(month),
            ProcValue::Count(year),
            ProcValue::Money(amount),
        ],
    }
}

pub fn search_users(text: &str) -> ProcedureCall {
    ProcedureCall {
        name: "SearchUsers",
        params: vec![text.into()],
    }
}

pub fn search_books(text: &str) -> ProcedureCall {
    ProcedureCall {
        name: "SearchBooks",
        params: vec![text.into()],
    }
}

pub fn delinquent_list(month: i64, year: i64) -> ProcedureCall {
    ProcedureCall {
        name: "GenerateDelinquentList",
        params: vec![ProcValue::Count(month), ProcValue::Count(year)],
    }
}

/// Scalar routine: the fine accrued by a loan, zero when returned on time.
pub fn loan_fine(loan: LoanId) -> ProcedureCall {
    ProcedureCall {
        name: "ComputeFine",
        params: vec![ProcValue::Id(loan.0)],
    }
}

/// Scalar routine: the average number of months owed across delinquent users.
pub fn average_months_owed() -> ProcedureCall {
    ProcedureCall {
        name: "AverageMonthsOwed",
        params: Vec::new(),
    }
}
