pub mod loan;
pub mod user;

pub use loan::LoanRepo;
pub use user::UserRepo;
