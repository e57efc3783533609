use crate::money::MonetaryValue;
use chrono::NaiveDate;
use thiserror::Error;

/// Every failure the ledger reports. All of them are recoverable: callers are expected to
/// report the error and carry on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BankingError {
    /// Returned when an account number is not exactly eight ASCII digits.
    #[error("invalid account number: {0:?}")]
    InvalidAccountNumber(String),
    /// Returned when a holder name does not have two or three parts.
    #[error("invalid name: {0:?} (expected two or three parts)")]
    InvalidName(String),
    /// Returned when a deposit, withdrawal or overdraft limit is below zero.
    #[error("cannot use a negative amount: {0}")]
    NegativeAmount(MonetaryValue),
    /// Returned when a withdrawal exceeds what the account makes available. For checking
    /// accounts `available` includes the overdraft limit.
    #[error("{available} is less than {desired}")]
    InsufficientFunds {
        available: MonetaryValue,
        desired: MonetaryValue,
    },
    /// Returned when a deposit or withdrawal would take a balance past the largest (or smallest)
    /// amount that can be represented. The balance is left as it was.
    #[error("balance {balance} cannot absorb {amount}")]
    AmountOverflow {
        balance: MonetaryValue,
        amount: MonetaryValue,
    },
    /// Returned when a certificate of deposit is withdrawn from before it matures.
    #[error("cannot withdraw until {maturity}")]
    WithdrawalDuringTerm { maturity: NaiveDate },
    /// Returned when an account is added under a number that is already taken.
    #[error("duplicate account number: {0}")]
    DuplicateAccountNumber(String),
    /// Returned when no account matches the number used for a lookup.
    #[error("account number {0} doesn't exist")]
    NonexistentAccount(String),
    /// Returned when a line of the record format can't be turned into an account: an
    /// unrecognized type tag, a missing field, or a field that does not parse.
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}
