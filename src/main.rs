use bank_ledger::{AccountKind, Bank, FixedClock, MonetaryValue, Name};
use chrono::NaiveDate;
use env_logger::Env;
use log::{error, info};
use std::error::Error;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "bank-ledger", about = "Load, update and save a file of bank accounts")]
struct Cli {
    /// Accounts to load, one record per line
    #[structopt(parse(from_os_str))]
    input_file: PathBuf,
    /// Where to write the accounts afterwards; the file is overwritten
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
    /// Use this date (YYYY-MM-DD) instead of today's for maturity checks and new accounts
    #[structopt(long)]
    today: Option<NaiveDate>,
    #[structopt(subcommand)]
    command: Option<Command>,
}

#[derive(StructOpt, Debug)]
enum Command {
    /// Print every account
    List,
    /// Look up an account's balance
    Balance { account: String },
    /// Deposit into an account
    Deposit {
        account: String,
        amount: MonetaryValue,
    },
    /// Withdraw from an account
    Withdraw {
        account: String,
        amount: MonetaryValue,
    },
    /// Open a new account with a generated number
    Open {
        #[structopt(possible_values = &["BankAccount", "CheckingAccount", "CDAccount"])]
        kind: String,
        /// Two or three space-separated names
        name: String,
        /// Overdraft limit of a CheckingAccount
        #[structopt(long, required_if("kind", "CheckingAccount"))]
        overdraft_limit: Option<MonetaryValue>,
        /// Term in months of a CDAccount
        #[structopt(long, required_if("kind", "CDAccount"))]
        term: Option<u32>,
    },
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    info!("Bank ledger started");
    let args = Cli::from_args();

    let mut bank = match args.today {
        Some(today) => Bank::with_clock(FixedClock(today)),
        None => Bank::new(),
    };
    // Rejected records are already logged at `warn` by the loader.
    if let Err(e) = bank.load_path(&args.input_file) {
        error!("{}: {}", args.input_file.display(), e);
        return;
    }

    match args.command {
        None | Some(Command::List) => print!("{}", bank),
        Some(command) => {
            if let Err(e) = run(&mut bank, command) {
                println!("Error: {}", e);
            }
        }
    }

    if let Some(output) = args.output {
        if let Err(e) = bank.write_to_path(&output) {
            error!("{}: {}", output.display(), e);
        }
    }
}

fn run(bank: &mut Bank, command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::List => print!("{}", bank),
        Command::Balance { account } => println!("Balance: ${}", bank.balance(&account)?),
        Command::Deposit { account, amount } => {
            bank.deposit(&account, amount)?;
            println!("Balance: ${}", bank.balance(&account)?);
        }
        Command::Withdraw { account, amount } => {
            bank.withdraw(&account, amount)?;
            println!("Balance: ${}", bank.balance(&account)?);
        }
        Command::Open {
            kind,
            name,
            overdraft_limit,
            term,
        } => {
            let holder: Name = name.parse()?;
            let kind = account_kind(&kind, overdraft_limit, term)?;
            let number = bank.open_account(holder, kind)?;
            println!("Account added: {}", number);
        }
    }
    Ok(())
}

fn account_kind(
    tag: &str,
    overdraft_limit: Option<MonetaryValue>,
    term: Option<u32>,
) -> Result<AccountKind, Box<dyn Error>> {
    match tag {
        "CheckingAccount" => Ok(AccountKind::Checking {
            overdraft_limit: overdraft_limit.ok_or("--overdraft-limit is required")?,
        }),
        "CDAccount" => Ok(AccountKind::CertificateOfDeposit {
            term_months: term.ok_or("--term is required")?,
        }),
        "BankAccount" => Ok(AccountKind::Plain),
        other => Err(format!("unknown account type: {}", other).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, structopt::clap::Error> {
        Cli::from_iter_safe(args)
    }

    #[test]
    fn open_requires_the_kind_specific_option() {
        assert!(parse(&["bank-ledger", "in.csv", "open", "CDAccount", "Jane Doe"]).is_err());
        assert!(parse(&["bank-ledger", "in.csv", "open", "CheckingAccount", "Jane Doe"]).is_err());
        assert!(parse(&["bank-ledger", "in.csv", "open", "BankAccount", "Jane Doe"]).is_ok());

        let cli = parse(&[
            "bank-ledger",
            "in.csv",
            "open",
            "CDAccount",
            "Jane Doe",
            "--term",
            "6",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Command::Open { term: Some(6), .. })));
    }

    #[test]
    fn account_kind_never_defaults_missing_values() {
        assert!(account_kind("CDAccount", None, None).is_err());
        assert!(account_kind("CheckingAccount", None, None).is_err());
        assert!(account_kind("SavingsAccount", None, None).is_err());
        assert_eq!(
            account_kind("CDAccount", None, Some(6)).unwrap(),
            AccountKind::CertificateOfDeposit { term_months: 6 }
        );
        assert_eq!(
            account_kind("CheckingAccount", Some("50".parse().unwrap()), None).unwrap(),
            AccountKind::Checking {
                overdraft_limit: "50".parse().unwrap()
            }
        );
    }
}
