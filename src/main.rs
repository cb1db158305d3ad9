//! Binary entry point
//!
//! Bootstraps the demo account set, runs the pipeline over the given
//! command file, and prints the final balance of every account. Syntax
//! errors in the source are reported per line but do not fail the run:
//! the valid prefix has already been executed and the balances reflect it.

use std::process;
use std::sync::Arc;
use std::time::Instant;

use teller_engine::account::{AccountRegistry, BankAccount};
use teller_engine::cli;
use teller_engine::parser::bank_grammar;
use teller_engine::pipeline::Pipeline;
use teller_engine::types::{EngineError, Money};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// The fixed account set the engine serves.
fn demo_accounts() -> AccountRegistry {
    let mut registry = AccountRegistry::new();
    for (owner, number, limit) in [
        ("Brent, D.", "67832189", Money::from_dollars(1500)),
        ("Tinsley, D.", "69826344", Money::from_dollars(100)),
        ("Keenan, G.", "61198701", Money::from_dollars(250)),
    ] {
        registry.insert(number, Arc::new(BankAccount::new(Money::ZERO, owner, number, limit)));
    }
    registry
}

/// Print the final balance of every account, in account-number order.
async fn print_balances(registry: &AccountRegistry) {
    let mut numbers: Vec<&str> = registry.numbers().collect();
    numbers.sort_unstable();

    for number in numbers {
        if let Some(account) = registry.get(number) {
            match account.balance().await {
                Ok(balance) => println!("{number}: [{balance}]"),
                Err(e) => error!(account = number, error = %e, "could not read balance"),
            }
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = cli::parse_args();
    let config = args.to_pipeline_config();

    let grammar = match bank_grammar() {
        Ok(grammar) => grammar,
        Err(e) => {
            error!(error = %e, "command grammar failed to compile");
            process::exit(1);
        }
    };

    let registry = Arc::new(demo_accounts());
    if registry.is_empty() {
        error!("no accounts configured");
        process::exit(1);
    }

    let pipeline = Pipeline::new(Arc::clone(&registry), grammar, config);
    let start = Instant::now();

    match pipeline.run(&args.input_file).await {
        Ok(summary) => {
            info!(
                submitted = summary.submitted,
                processed = summary.processed,
                failed = summary.failed,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "run complete"
            );
        }
        Err(EngineError::Syntax(report)) => {
            // Commands before the first error have already been executed;
            // report the errors and fall through to the balances.
            for syntax_error in &report.errors {
                eprintln!("{syntax_error}");
            }
            info!(
                errors = report.errors.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "run complete with syntax errors"
            );
        }
        Err(e) => {
            error!(error = %e, "pipeline run failed");
            process::exit(1);
        }
    }

    print_balances(&registry).await;
}
