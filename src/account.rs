use crate::errors::BankingError;
use crate::money::MonetaryValue;
use crate::name::Name;
use chrono::{Months, NaiveDate};
use rand::Rng;
use std::fmt;

const ACCOUNT_NUMBER_DIGITS: usize = 8;

/// An eight digit account number, kept as text so leading zeros survive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountNumber(String);

impl AccountNumber {
    pub fn parse(number: &str) -> Result<AccountNumber, BankingError> {
        if number.len() != ACCOUNT_NUMBER_DIGITS || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BankingError::InvalidAccountNumber(number.to_string()));
        }
        Ok(AccountNumber(number.to_string()))
    }

    /// Picks a random number. Uniqueness is left to the `Bank`.
    pub fn generate() -> AccountNumber {
        let value: u32 = rand::rng().random_range(0..100_000_000);
        AccountNumber(format!("{:08}", value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three kinds of account, each carrying what its withdrawal policy needs.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountKind {
    /// A plain account never goes below zero.
    Plain,
    /// May be overdrawn by up to `overdraft_limit`.
    Checking { overdraft_limit: MonetaryValue },
    /// Refuses every withdrawal until `term_months` have passed since the account was opened.
    CertificateOfDeposit { term_months: u32 },
}

impl AccountKind {
    /// The tag used for this kind in the record format.
    pub fn type_tag(&self) -> &'static str {
        match self {
            AccountKind::Plain => "BankAccount",
            AccountKind::Checking { .. } => "CheckingAccount",
            AccountKind::CertificateOfDeposit { .. } => "CDAccount",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    number: AccountNumber,
    balance: MonetaryValue,
    opened: NaiveDate,
    holder: Name,
    kind: AccountKind,
}

impl Account {
    /// Builds an account with every attribute supplied, as when loading a record. The balance may
    /// be negative.
    pub fn new(
        number: &str,
        balance: MonetaryValue,
        opened: NaiveDate,
        holder: Name,
        kind: AccountKind,
    ) -> Result<Account, BankingError> {
        let number = AccountNumber::parse(number)?;
        validate_kind(&kind)?;
        Ok(Account {
            number,
            balance,
            opened,
            holder,
            kind,
        })
    }

    /// Opens a fresh account for `holder` with a generated number, a zero balance and `today`
    /// as its opening date.
    pub fn open(holder: Name, kind: AccountKind, today: NaiveDate) -> Result<Account, BankingError> {
        validate_kind(&kind)?;
        Ok(Account {
            number: AccountNumber::generate(),
            balance: MonetaryValue::ZERO,
            opened: today,
            holder,
            kind,
        })
    }

    pub fn number(&self) -> &AccountNumber {
        &self.number
    }

    pub fn balance(&self) -> MonetaryValue {
        self.balance
    }

    pub fn opened(&self) -> NaiveDate {
        self.opened
    }

    pub fn holder(&self) -> &Name {
        &self.holder
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    /// The first day a certificate of deposit can be withdrawn from; `None` for other kinds.
    /// Adding months clamps to the end of shorter months (Jan 31 + 1 month = Feb 28/29).
    pub fn maturity_date(&self) -> Option<NaiveDate> {
        match self.kind {
            AccountKind::CertificateOfDeposit { term_months } => Some(
                self.opened
                    .checked_add_months(Months::new(term_months))
                    .unwrap_or(NaiveDate::MAX),
            ),
            _ => None,
        }
    }

    pub fn deposit(&mut self, amount: MonetaryValue) -> Result<(), BankingError> {
        if amount.is_negative() {
            return Err(BankingError::NegativeAmount(amount));
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BankingError::AmountOverflow {
                balance: self.balance,
                amount,
            })?;
        Ok(())
    }

    /// Withdraws `amount` if the account's policy allows it on `today`:
    ///
    /// | kind | allowed when |
    /// |---|---|
    /// | plain | `amount <= balance` |
    /// | checking | `amount <= balance + overdraft_limit` |
    /// | certificate of deposit | matured, then `amount <= balance` |
    pub fn withdraw(&mut self, amount: MonetaryValue, today: NaiveDate) -> Result<(), BankingError> {
        if amount.is_negative() {
            return Err(BankingError::NegativeAmount(amount));
        }

        let available = match self.kind {
            AccountKind::Plain => self.balance,
            AccountKind::Checking { overdraft_limit } => {
                self.balance.saturating_add(overdraft_limit)
            }
            AccountKind::CertificateOfDeposit { .. } => {
                if let Some(maturity) = self.maturity_date() {
                    if today < maturity {
                        return Err(BankingError::WithdrawalDuringTerm { maturity });
                    }
                }
                self.balance
            }
        };

        if amount > available {
            return Err(BankingError::InsufficientFunds {
                available,
                desired: amount,
            });
        }

        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(BankingError::AmountOverflow {
                balance: self.balance,
                amount,
            })?;
        Ok(())
    }
}

fn validate_kind(kind: &AccountKind) -> Result<(), BankingError> {
    if let AccountKind::Checking { overdraft_limit } = kind {
        if overdraft_limit.is_negative() {
            return Err(BankingError::NegativeAmount(*overdraft_limit));
        }
    }
    Ok(())
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<16} {}  {:<24} opened {}  balance ${}",
            self.kind.type_tag(),
            self.number,
            self.holder.to_string(),
            self.opened,
            self.balance
        )?;
        match self.kind {
            AccountKind::Plain => Ok(()),
            AccountKind::Checking { overdraft_limit } => {
                write!(f, "  overdraft limit ${}", overdraft_limit)
            }
            AccountKind::CertificateOfDeposit { term_months } => {
                write!(f, "  term {} months", term_months)
            }
        }
    }
}
