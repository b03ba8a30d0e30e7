//! Data models for Libris

pub mod book;
pub mod loan;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookStat, BookType, CreateBook};
pub use loan::{LoanHistory, LoanStatus, NewLoanHistory};
pub use user::{BookHistory, CreateUser, UpdateUserName, User, UserLoanHistories};
