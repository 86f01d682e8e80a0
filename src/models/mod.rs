pub mod loan;
pub mod user;
