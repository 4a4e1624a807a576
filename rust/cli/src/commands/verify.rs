//! Verify command handler module.
//!
//! Validates a JSONL file of hand records, one record per line. Each record
//! must:
//!
//! - parse as a hand record
//! - pass the record checks applied before storage (six stacks, positions,
//!   hole cards, no duplicate cards, zero-sum winnings, action grammar)
//! - have a hand id not seen earlier in the file
//! - put the button and blinds on seats that started with chips
//! - not lose more than its starting stack for any seat
//!
//! Errors are collected using the shared `BatchValidationError` pattern for structured reporting.

use std::collections::HashSet;
use std::io::Write;

use holdem_engine::logger::HandRecord;

use crate::error::{BatchValidationError, CliError};
use crate::io_utils::read_text;

/// The `usize` context is the 1-based hand number in the file.
type VerifyError = BatchValidationError<usize>;

/// Handle the verify command - validate hand record integrity.
///
/// # Returns
///
/// `Result<(), CliError>`: `Ok(())` if all checks pass, otherwise an `Err` that maps to exit code `2`.
pub fn handle_verify_command(
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = read_text(input).map_err(CliError::InvalidInput)?;

    let mut errors: Vec<VerifyError> = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut hands = 0usize;

    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        hands += 1;
        let record: HandRecord = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                errors.push(VerifyError {
                    item_context: hands,
                    message: format!("Invalid JSON record: {}", e),
                });
                continue;
            }
        };
        for message in check_record(&record) {
            errors.push(VerifyError {
                item_context: hands,
                message,
            });
        }
        if !seen_ids.insert(record.hand_id.clone()) {
            errors.push(VerifyError {
                item_context: hands,
                message: format!("Duplicate hand_id {}", record.hand_id),
            });
        }
    }

    if errors.is_empty() {
        writeln!(out, "Verify: OK (hands={})", hands)?;
        return Ok(());
    }

    writeln!(out, "Verify: FAIL (hands={})", hands)?;
    writeln!(err)?;
    writeln!(err, "Errors found:")?;
    for error in &errors {
        writeln!(err, "  Hand {}", error)?;
    }
    writeln!(err)?;
    let invalid_hands = errors
        .iter()
        .map(|e| e.item_context)
        .collect::<HashSet<_>>()
        .len();
    let percentage = if hands > 0 {
        (invalid_hands as f64 / hands as f64 * 100.0).round() as u32
    } else {
        0
    };
    writeln!(
        err,
        "Summary: {} error(s) in {} hands ({} invalid hands, {}% invalid)",
        errors.len(),
        hands,
        invalid_hands,
        percentage
    )?;
    Err(CliError::InvalidInput(format!(
        "{} validation errors found",
        errors.len()
    )))
}

/// Problems with one record; empty when it is consistent.
fn check_record(record: &HandRecord) -> Vec<String> {
    if let Err(e) = record.validate() {
        return vec![e.to_string()];
    }
    let mut problems = Vec::new();
    let stacks = &record.stack_settings;

    let funded = stacks.iter().filter(|&&s| s > 0).count();
    let p = record.positions;
    if funded >= 2 {
        for (role, seat) in [
            ("dealer", p.dealer),
            ("small blind", p.small_blind),
            ("big blind", p.big_blind),
        ] {
            if stacks[seat] == 0 {
                problems.push(format!("{} on seat {} which had no chips", role, seat));
            }
        }
    }

    for (&seat, &delta) in &record.winnings {
        if delta < -i64::from(stacks[seat]) {
            problems.push(format!(
                "seat {} lost {} with a starting stack of {}",
                seat, -delta, stacks[seat]
            ));
        }
    }
    problems
}
