//! The line-oriented record format used to load and persist accounts:
//!
//! ```text
//! <TypeTag>,<AccountNumber>,<Balance>,<DateOpened>,<HolderName>[,<Extra>]
//! BankAccount,11112222,150.0,2020-08-23,John Adam Smith
//! CheckingAccount,22223333,200.0,2021-07-14,Dane Doe,50.0
//! CDAccount,33334444,300.0,2022-01-01,John Adam Smith,6
//! ```
//!
//! `Extra` is the overdraft limit of a checking account or the term in months of a certificate
//! of deposit; plain accounts have none, and one given anyway is ignored. A line with more than
//! six fields is malformed.
use crate::account::{Account, AccountKind};
use crate::errors::BankingError;
use crate::money::MonetaryValue;
use chrono::NaiveDate;
use csv::StringRecord;
use serde::Deserialize;

const PLAIN_TAG: &str = "BankAccount";
const CHECKING_TAG: &str = "CheckingAccount";
const CD_TAG: &str = "CDAccount";
const MAX_FIELDS: usize = 6;

/// One record as read from the input, before any validation beyond the date.
#[derive(Deserialize, Debug, PartialEq)]
pub struct AccountRecord {
    pub kind: String,
    pub number: String,
    pub balance: String,
    pub opened: NaiveDate,
    pub holder: String,
    #[serde(default)]
    pub extra: Option<String>,
}

impl AccountRecord {
    /// Reads the fields of one csv row. Only the shape and the date are checked here.
    pub fn from_row(row: &StringRecord) -> Result<AccountRecord, BankingError> {
        if row.len() > MAX_FIELDS {
            return Err(BankingError::MalformedRecord(format!(
                "expected at most {} fields, found {}",
                MAX_FIELDS,
                row.len()
            )));
        }
        row.deserialize(None)
            .map_err(|e| BankingError::MalformedRecord(describe_csv_error(&e)))
    }

    /// Validates the record and builds the account it describes. The balance is taken as-is,
    /// negative values included.
    pub fn into_account(self) -> Result<Account, BankingError> {
        let tag = self.kind.as_str();
        if tag != PLAIN_TAG && tag != CHECKING_TAG && tag != CD_TAG {
            return Err(BankingError::MalformedRecord(format!(
                "incorrect account type: {}",
                tag
            )));
        }

        let holder = self.holder.parse()?;
        let balance = parse_amount("balance", &self.balance)?;

        let kind = match tag {
            CD_TAG => {
                let term = required_extra(&self.extra, "term")?;
                let term_months = term.parse::<u32>().map_err(|_| {
                    BankingError::MalformedRecord(format!("invalid term in months: {}", term))
                })?;
                AccountKind::CertificateOfDeposit { term_months }
            }
            CHECKING_TAG => {
                let limit = required_extra(&self.extra, "overdraft limit")?;
                AccountKind::Checking {
                    overdraft_limit: parse_amount("overdraft limit", limit)?,
                }
            }
            _ => AccountKind::Plain,
        };

        Account::new(&self.number, balance, self.opened, holder, kind)
    }
}

/// The fields of `account` in record order, amounts rendered with two decimals.
pub fn to_fields(account: &Account) -> Vec<String> {
    let mut fields = vec![
        account.kind().type_tag().to_string(),
        account.number().to_string(),
        account.balance().to_string(),
        account.opened().format("%Y-%m-%d").to_string(),
        account.holder().to_string(),
    ];
    match account.kind() {
        AccountKind::Plain => {}
        AccountKind::Checking { overdraft_limit } => fields.push(overdraft_limit.to_string()),
        AccountKind::CertificateOfDeposit { term_months } => fields.push(term_months.to_string()),
    }
    fields
}

pub(crate) fn describe_csv_error(e: &csv::Error) -> String {
    match e.kind() {
        csv::ErrorKind::Deserialize { err, .. } => match err.field() {
            Some(field) => format!("field {}: {}", field + 1, err.kind()),
            None => err.kind().to_string(),
        },
        _ => e.to_string(),
    }
}

fn required_extra<'a>(extra: &'a Option<String>, what: &str) -> Result<&'a str, BankingError> {
    match extra.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(BankingError::MalformedRecord(format!("missing {}", what))),
    }
}

fn parse_amount(what: &str, value: &str) -> Result<MonetaryValue, BankingError> {
    value
        .parse()
        .map_err(|_| BankingError::MalformedRecord(format!("invalid {}: {}", what, value)))
}
