//! # The ledger
//! `Bank` owns a set of accounts of three kinds (plain, checking and certificate of deposit),
//! keeps their numbers unique, and dispatches deposits, withdrawals and balance lookups by
//! account number.
//!
//! Accounts are kept in insertion order in a `Vec` and looked up with a linear scan, so that
//! serializing writes them back in the order they were loaded or added.
//!
//! Loading is fault tolerant: each record is parsed and added on its own, and a record that
//! fails for any reason is logged and reported back to the caller while the rest of the input
//! keeps loading.
//!
//! ## Getting started
//!
//! ```csv
//! BankAccount,11112222,150.0,2020-08-23,John Adam Smith
//! CheckingAccount,22223333,200.0,2021-07-14,Dane Doe,50.0
//! CDAccount,33334444,300.0,2022-01-01,John Adam Smith,6
//! ```
//!
//! ## Usage
//! ```no_run
//! use bank_ledger::Bank;
//!
//! let mut bank = Bank::new();
//! let _rejected = bank.load_path("input_accounts.csv")?;
//! bank.deposit("11112222", "100.0".parse().unwrap())?;
//! bank.write_to_path("output_accounts.csv")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
use crate::account::{Account, AccountKind, AccountNumber};
use crate::clock::{Clock, SystemClock};
use crate::errors::BankingError;
use crate::money::MonetaryValue;
use crate::name::Name;
use crate::record::{self, AccountRecord};
use log::{debug, info, warn};
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

/// A record that could not be loaded, with the line it came from.
#[derive(Debug, PartialEq)]
pub struct RejectedRecord {
    pub line: u64,
    pub error: BankingError,
}

/// `Bank` is the ledger: the only owner of its accounts.
pub struct Bank {
    accounts: Vec<Account>,
    clock: Box<dyn Clock>,
}

impl Default for Bank {
    fn default() -> Self {
        Bank::new()
    }
}

impl Bank {
    /// An empty bank that uses the wall clock for maturity checks.
    pub fn new() -> Bank {
        Bank::with_clock(SystemClock)
    }

    /// An empty bank that asks `clock` for today's date.
    pub fn with_clock<C: Clock + 'static>(clock: C) -> Bank {
        Bank {
            accounts: Vec::new(),
            clock: Box::new(clock),
        }
    }

    /// Parses every record from `reader` and adds the resulting accounts in order. Records that
    /// fail are logged, skipped and returned; they never stop the load.
    pub fn load_records<R: io::Read>(&mut self, reader: R) -> Vec<RejectedRecord> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rejected = Vec::new();
        let mut loaded = 0usize;
        for result in reader.records() {
            let (line, outcome) = match result {
                Ok(row) => {
                    let line = row.position().map(|p| p.line()).unwrap_or(0);
                    let outcome = AccountRecord::from_row(&row)
                        .and_then(AccountRecord::into_account)
                        .and_then(|account| self.add_account(account));
                    (line, outcome)
                }
                Err(e) => (
                    e.position().map(|p| p.line()).unwrap_or(0),
                    Err(BankingError::MalformedRecord(record::describe_csv_error(&e))),
                ),
            };

            match outcome {
                Ok(()) => loaded += 1,
                Err(error) => {
                    warn!("skipping record on line {}: {}", line, error);
                    rejected.push(RejectedRecord { line, error });
                }
            }
        }

        info!("loaded {} accounts, rejected {} records", loaded, rejected.len());
        rejected
    }

    /// Same as `load_records`, taking one record per item.
    pub fn load_lines<I, S>(&mut self, lines: I) -> Vec<RejectedRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = lines
            .into_iter()
            .map(|line| line.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        self.load_records(text.as_bytes())
    }

    /// Loads the records in the file at `path`. Fails only if the file can't be opened.
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<RejectedRecord>, io::Error> {
        let file = File::open(path.as_ref())?;
        debug!("loading accounts from {}", path.as_ref().display());
        Ok(self.load_records(file))
    }

    /// Adds `account`, keeping insertion order. Fails without changing the bank if its number is
    /// already in use.
    pub fn add_account(&mut self, account: Account) -> Result<(), BankingError> {
        if self.get(account.number().as_str()).is_some() {
            return Err(BankingError::DuplicateAccountNumber(
                account.number().to_string(),
            ));
        }
        debug!("adding {} {}", account.kind().type_tag(), account.number());
        self.accounts.push(account);
        Ok(())
    }

    /// Opens a new account for `holder` under a freshly generated, unused number and returns
    /// that number.
    pub fn open_account(
        &mut self,
        holder: Name,
        kind: AccountKind,
    ) -> Result<AccountNumber, BankingError> {
        let today = self.clock.today();
        let mut account = Account::open(holder.clone(), kind.clone(), today)?;
        while self.get(account.number().as_str()).is_some() {
            account = Account::open(holder.clone(), kind.clone(), today)?;
        }
        let number = account.number().clone();
        self.add_account(account)?;
        Ok(number)
    }

    pub fn deposit(&mut self, number: &str, amount: MonetaryValue) -> Result<(), BankingError> {
        let account = self.retrieve_account(number)?;
        account.deposit(amount)
    }

    pub fn withdraw(&mut self, number: &str, amount: MonetaryValue) -> Result<(), BankingError> {
        let today = self.clock.today();
        let account = self.retrieve_account(number)?;
        account.withdraw(amount, today)
    }

    pub fn balance(&self, number: &str) -> Result<MonetaryValue, BankingError> {
        self.get(number)
            .map(Account::balance)
            .ok_or_else(|| BankingError::NonexistentAccount(number.to_string()))
    }

    pub fn get(&self, number: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|account| account.number().as_str() == number)
    }

    /// All accounts, in insertion order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Writes every account in the record format, one line each, in insertion order.
    pub fn write_records<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        for account in &self.accounts {
            wtr.write_record(record::to_fields(account))?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// The whole bank in the record format.
    pub fn serialize(&self) -> Result<String, csv::Error> {
        let mut buf = Vec::new();
        self.write_records(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Replaces the contents of the file at `path` with the whole bank in the record format.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), csv::Error> {
        let file = File::create(path.as_ref())?;
        self.write_records(file)?;
        info!(
            "wrote {} accounts to {}",
            self.accounts.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    fn retrieve_account(&mut self, number: &str) -> Result<&mut Account, BankingError> {
        self.accounts
            .iter_mut()
            .find(|account| account.number().as_str() == number)
            .ok_or_else(|| BankingError::NonexistentAccount(number.to_string()))
    }
}

/// Human-readable listing, one account per line.
impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for account in &self.accounts {
            writeln!(f, "{}", account)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bank")
            .field("accounts", &self.accounts)
            .finish()
    }
}
