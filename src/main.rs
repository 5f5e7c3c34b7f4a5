use anyhow::{Context, Result};
use passbook::bank::{Account, AccountKind, CheckbookStatus, Ledger};
use simple_logger::SimpleLogger;
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    SimpleLogger::new().env().init()?;

    log::debug!("Application started");

    let path = table_path();
    log::debug!("Using account table at {path:?}");
    let mut ledger = Ledger::load(&path)
        .with_context(|| format!("loading account table from {}", path.display()))?;
    log::debug!("Loaded {} account(s)", ledger.len());

    println!("Welcome to Passbook");
    println!("Commands: create, deposit, withdraw, show, exit");

    loop {
        let Some(cmd) = prompt("\n> ")? else {
            break;
        };
        match cmd.to_lowercase().as_str() {
            "create" => create_account(&mut ledger, &path)?,
            "deposit" => apply_operation(&mut ledger, &path, Op::Deposit)?,
            "withdraw" => apply_operation(&mut ledger, &path, Op::Withdraw)?,
            "show" => show_account(&mut ledger, &path)?,
            "exit" => break,
            "" => continue,
            _ => println!("Unknown command."),
        }
    }

    log::info!("User exited the banking system");
    println!("Goodbye.");
    Ok(())
}

/// Account table location: first CLI argument, or accounts.csv in the
/// working directory.
fn table_path() -> PathBuf {
    env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("accounts.csv"))
}

/// Prints `message`, reads one trimmed line. `None` means stdin hit EOF.
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

fn create_account(ledger: &mut Ledger, path: &Path) -> Result<()> {
    let number = ledger.next_account_number();
    println!("Assigned account number: {number}");

    let Some(first) = prompt("First Name: ")? else {
        return Ok(());
    };
    let Some(last) = prompt("Last Name: ")? else {
        return Ok(());
    };
    let Some(gender) = prompt("Gender (M/F/Other): ")? else {
        return Ok(());
    };
    let Some(type_input) = prompt("Type (savings/checking): ")? else {
        return Ok(());
    };

    let type_name = type_input.to_lowercase();
    let kind = match type_name.as_str() {
        "savings" => AccountKind::savings(),
        "checking" => AccountKind::checking(),
        _ => {
            println!("Invalid account type.");
            return Ok(());
        }
    };

    ledger.insert(Account::new(&number, &first, &last, &gender, kind));
    ledger.save(path)?;
    log::info!("Created {type_name} account {number} for {first} {last}");
    println!("Account created.");
    Ok(())
}

#[derive(Clone, Copy)]
enum Op {
    Deposit,
    Withdraw,
}

fn apply_operation(ledger: &mut Ledger, path: &Path, op: Op) -> Result<()> {
    let Some(number) = prompt("Account number: ")? else {
        return Ok(());
    };
    if ledger.get(&number).is_none() {
        println!("Account not found.");
        return Ok(());
    }

    let Some(amount_input) = prompt("Amount: ")? else {
        return Ok(());
    };
    let Ok(amount) = amount_input.parse::<f64>() else {
        println!("Invalid amount.");
        return Ok(());
    };

    // Checked above, the account is still there.
    let Some(account) = ledger.get_mut(&number) else {
        return Ok(());
    };

    let result = match op {
        Op::Deposit => account.deposit(amount),
        Op::Withdraw => account.withdraw(amount),
    };

    match result {
        Ok(()) => {
            match op {
                Op::Deposit => {
                    log::info!("Deposited ${amount} to account {number}");
                    println!("Deposit successful.");
                }
                Op::Withdraw => {
                    log::info!("Withdrew ${amount} from account {number}");
                    println!("Withdrawal successful.");
                }
            }
            ledger.save(path)?;
        }
        Err(e) => {
            log::warn!("Failed operation on account {number}: {e}");
            println!("Error: {e}");
        }
    }
    Ok(())
}

fn show_account(ledger: &mut Ledger, path: &Path) -> Result<()> {
    let Some(number) = prompt("Account number: ")? else {
        return Ok(());
    };
    let Some(account) = ledger.get_mut(&number) else {
        println!("Account not found.");
        return Ok(());
    };

    log::info!("Viewed account {number}");
    println!("{}", account.summary());
    println!("{}", account.history_text());

    let offer_checkbook =
        matches!(account.kind, AccountKind::Checking { .. }) && !account.checkbook_issued();
    if offer_checkbook {
        let Some(answer) = prompt(
            "Checkbook on this Checking Account has not been issued. Issue checkbook? [y/n]: ",
        )?
        else {
            return Ok(());
        };
        if answer.eq_ignore_ascii_case("y") {
            if account.issue_checkbook() == Some(CheckbookStatus::Issued) {
                println!("Checkbook has been issued");
                ledger.save(path)?;
                log::info!("Issued checkbook to account {number}");
            }
        } else {
            println!("Account checkbook remains unissued.");
        }
    }
    Ok(())
}
