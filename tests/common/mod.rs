#![allow(dead_code)]

use assert_cmd::cargo_bin;
use std::path::Path;
use std::process::Command;

/// Builds a command bound to `data_dir`, isolated from the caller's environment.
pub fn loan_cmd(data_dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin!("loan-origination"));
    cmd.arg("--data-dir")
        .arg(data_dir)
        .env_remove("RUST_LOG")
        .env_remove("LOAN_DB_PATH")
        .env_remove("LOAN_MAX_AMOUNT")
        .env_remove("LOAN_MIN_CREDIT_SCORE")
        .env_remove("LOAN_MAX_CREDIT_SCORE")
        .env_remove("LOAN_LOG_LEVEL");
    cmd
}

pub fn submit_args(
    full_name: &str,
    amount: &str,
    purpose: &str,
    credit_score: &str,
) -> Vec<String> {
    vec![
        "submit".to_string(),
        format!("--full-name={full_name}"),
        format!("--amount={amount}"),
        format!("--purpose={purpose}"),
        format!("--credit-score={credit_score}"),
    ]
}

/// Submits an application and returns the id printed on stdout.
pub fn submit(
    data_dir: &Path,
    full_name: &str,
    amount: &str,
    purpose: &str,
    credit_score: &str,
) -> String {
    let output = loan_cmd(data_dir)
        .args(submit_args(full_name, amount, purpose, credit_score))
        .output()
        .expect("Failed to execute command");
    assert!(
        output.status.success(),
        "submit failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

/// Decides an application and returns the status printed on stdout.
pub fn decide(data_dir: &Path, id: &str) -> String {
    let output = loan_cmd(data_dir)
        .args(["decide", id])
        .output()
        .expect("Failed to execute command");
    assert!(
        output.status.success(),
        "decide failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    let (printed_id, status) = stdout.trim().split_once(',').expect("id,status");
    assert_eq!(printed_id, id);
    status.to_string()
}

pub fn list(data_dir: &Path) -> String {
    let output = loan_cmd(data_dir)
        .arg("list")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}
