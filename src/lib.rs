//! # A small bank ledger
//! Accounts of three kinds (plain, checking and certificate of deposit) with their deposit and
//! withdrawal rules, owned by a `Bank` that loads and saves them in a comma-separated record
//! format.
#![forbid(unsafe_code)]
pub mod account;
pub mod bank;
pub mod clock;
pub mod errors;
pub mod money;
pub mod name;
pub mod record;

pub use account::{Account, AccountKind, AccountNumber};
pub use bank::{Bank, RejectedRecord};
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::BankingError;
pub use money::MonetaryValue;
pub use name::Name;
