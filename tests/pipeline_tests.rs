//! End-to-end pipeline tests
//!
//! Each test writes a command file, runs the full pipeline over it, and
//! checks the resulting account balances and run summary.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use teller_engine::account::{AccountRegistry, BankAccount};
use teller_engine::parser::bank_grammar;
use teller_engine::pipeline::{Pipeline, PipelineConfig};
use teller_engine::types::{EngineError, Money};
use tempfile::NamedTempFile;

const CHECKING: &str = "11111111";
const SAVINGS: &str = "22222222";

fn test_registry() -> Arc<AccountRegistry> {
    let mut registry = AccountRegistry::new();
    registry.insert(
        CHECKING,
        Arc::new(BankAccount::new(
            Money::ZERO,
            "Checking Owner",
            CHECKING,
            Money::from_dollars(500),
        )),
    );
    registry.insert(
        SAVINGS,
        Arc::new(BankAccount::new(
            Money::from_dollars(100),
            "Savings Owner",
            SAVINGS,
            Money::from_dollars(50),
        )),
    );
    Arc::new(registry)
}

fn command_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn test_config() -> PipelineConfig {
    PipelineConfig {
        workers: 4,
        buffer_capacity: 8,
        max_commands: 0,
        drain_poll_interval: Duration::from_millis(5),
    }
}

fn pipeline(registry: Arc<AccountRegistry>, config: PipelineConfig) -> Pipeline {
    Pipeline::new(registry, bank_grammar().unwrap(), config)
}

async fn balance_of(registry: &AccountRegistry, number: &str) -> Money {
    registry.get(number).unwrap().balance().await.unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_deposits_and_withdrawals_settle() {
    let registry = test_registry();
    let file = command_file(
        "! opening deposits\n\
         deposit,11111111,200,50;\n\
         deposit,22222222,10,25;\n\
         withdraw,11111111,50,0;\n\
         balance,11111111;\n\
         name,22222222;\n",
    );

    let summary = pipeline(Arc::clone(&registry), test_config())
        .run(file.path())
        .await
        .unwrap();

    assert_eq!(summary.submitted, 5);
    assert_eq!(summary.processed, 5);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.ignored, 2);

    // 200.50 - 50.00
    assert_eq!(
        balance_of(&registry, CHECKING).await,
        Money::from_strs("150", "50").unwrap()
    );
    // 100.00 + 10.25
    assert_eq!(
        balance_of(&registry, SAVINGS).await,
        Money::from_strs("110", "25").unwrap()
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_syntax_errors_reported_after_valid_prefix_executes() {
    let registry = test_registry();
    let file = command_file(
        "deposit,11111111,10,0;\n\
         deposit,1234567,10,0;\n\
         deposit,11111111,99,0;\n\
         withdraw,bogus;\n",
    );

    let result = pipeline(Arc::clone(&registry), test_config())
        .run(file.path())
        .await;

    let report = match result {
        Err(EngineError::Syntax(report)) => report,
        other => panic!("expected a syntax report, got {other:?}"),
    };
    assert_eq!(report.errors.len(), 2);
    assert_eq!(report.errors[0].line, 2);
    assert_eq!(report.errors[1].line, 4);

    // Only the command before the first error was executed; the valid
    // command on line 3 was suppressed by the tainted run.
    assert_eq!(balance_of(&registry, CHECKING).await, Money::from_dollars(10));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_contended_account_settles_exactly() {
    const DEPOSITS: usize = 150;
    const WITHDRAWALS: usize = 50;

    let mut text = String::new();
    for _ in 0..DEPOSITS {
        text.push_str("deposit,11111111,3,0;\n");
    }
    for _ in 0..WITHDRAWALS {
        text.push_str("withdraw,11111111,1,0;\n");
    }

    let registry = test_registry();
    let file = command_file(&text);
    let config = PipelineConfig {
        buffer_capacity: 4,
        ..test_config()
    };

    let summary = pipeline(Arc::clone(&registry), config)
        .run(file.path())
        .await
        .unwrap();

    assert_eq!(summary.processed as usize, DEPOSITS + WITHDRAWALS);
    assert_eq!(summary.failed, 0);
    // 150 * 3.00 - 50 * 1.00, regardless of interleaving.
    assert_eq!(
        balance_of(&registry, CHECKING).await,
        Money::from_dollars((DEPOSITS * 3 - WITHDRAWALS) as i64)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_independent_accounts_both_settle() {
    let mut text = String::new();
    for _ in 0..100 {
        text.push_str("deposit,11111111,1,0;deposit,22222222,2,0;\n");
    }

    let registry = test_registry();
    let file = command_file(&text);

    pipeline(Arc::clone(&registry), test_config())
        .run(file.path())
        .await
        .unwrap();

    assert_eq!(balance_of(&registry, CHECKING).await, Money::from_dollars(100));
    assert_eq!(
        balance_of(&registry, SAVINGS).await,
        Money::from_dollars(100 + 200)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_rejected_commands_are_counted_not_applied() {
    let registry = test_registry();
    // Over the 50.00 ceiling on savings, an unknown account, and a
    // negative deposit amount.
    let file = command_file(
        "withdraw,22222222,60,0;\n\
         deposit,99999999,10,0;\n\
         deposit,11111111,-5,0;\n\
         deposit,11111111,20,0;\n",
    );

    let summary = pipeline(Arc::clone(&registry), test_config())
        .run(file.path())
        .await
        .unwrap();

    assert_eq!(summary.processed, 4);
    assert_eq!(summary.failed, 3);
    assert_eq!(balance_of(&registry, CHECKING).await, Money::from_dollars(20));
    assert_eq!(balance_of(&registry, SAVINGS).await, Money::from_dollars(100));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_oversized_amount_fails_the_command_not_the_run() {
    let registry = test_registry();
    // Grammar-valid, but the amount does not fit in the cent count. With a
    // single worker the run must still drain and settle the command after it.
    let file = command_file(
        "deposit,11111111,92233720368547759,0;\n\
         deposit,11111111,5,0;\n",
    );
    let config = PipelineConfig {
        workers: 1,
        ..test_config()
    };

    let summary = pipeline(Arc::clone(&registry), config)
        .run(file.path())
        .await
        .unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(balance_of(&registry, CHECKING).await, Money::from_dollars(5));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_withdrawal_may_overdraw_within_ceiling() {
    let registry = test_registry();
    let file = command_file("withdraw,11111111,400,0;\n");

    pipeline(Arc::clone(&registry), test_config())
        .run(file.path())
        .await
        .unwrap();

    assert_eq!(balance_of(&registry, CHECKING).await, Money::from_dollars(-400));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_max_commands_limits_the_run() {
    let registry = test_registry();
    let file = command_file(
        "deposit,11111111,1,0;\n\
         deposit,11111111,1,0;\n\
         deposit,11111111,1,0;\n\
         deposit,11111111,1,0;\n",
    );
    let config = PipelineConfig {
        max_commands: 2,
        ..test_config()
    };

    let summary = pipeline(Arc::clone(&registry), config)
        .run(file.path())
        .await
        .unwrap();

    assert_eq!(summary.submitted, 2);
    assert_eq!(summary.processed, 2);
    assert_eq!(balance_of(&registry, CHECKING).await, Money::from_dollars(2));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_missing_input_file_fails_cleanly() {
    let registry = test_registry();
    let result = pipeline(Arc::clone(&registry), test_config())
        .run(std::path::Path::new("/no/such/input.txt"))
        .await;

    assert!(matches!(result, Err(EngineError::Io { .. })));
    // Nothing executed.
    assert_eq!(balance_of(&registry, CHECKING).await, Money::ZERO);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_comment_only_file_is_a_clean_empty_run() {
    let registry = test_registry();
    let file = command_file("! nothing but remarks\n! on every line\n");

    let summary = pipeline(Arc::clone(&registry), test_config())
        .run(file.path())
        .await
        .unwrap();

    assert_eq!(summary.submitted, 0);
    assert_eq!(summary.processed, 0);
}
