//! Shared helpers for CLI integration tests.

use std::path::Path;

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Runs `holdem_cli::run` in-process with captured output.
pub fn run_cli(args: &[&str]) -> CliResult {
    let mut argv = vec!["holdem"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let exit_code = holdem_cli::run(argv, &mut out, &mut err);
    CliResult {
        exit_code,
        stdout: String::from_utf8(out).expect("stdout is UTF-8"),
        stderr: String::from_utf8(err).expect("stderr is UTF-8"),
    }
}

const HOLDEM_VARS: [&str; 5] = [
    "HOLDEM_CONFIG",
    "HOLDEM_SEED",
    "HOLDEM_SMALL_BLIND",
    "HOLDEM_STACKS",
    "HOLDEM_DB",
];

/// Clears every `HOLDEM_*` variable, applies `pairs`, and restores the
/// previous environment on drop. Tests using it must be `#[serial]`.
pub struct EnvGuard {
    restores: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub fn apply(pairs: &[(&str, &str)]) -> Self {
        let restores = HOLDEM_VARS
            .iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();
        for key in HOLDEM_VARS {
            unsafe { std::env::remove_var(key) };
        }
        for (key, value) in pairs {
            unsafe { std::env::set_var(key, value) };
        }
        EnvGuard { restores }
    }

    /// Points the hand store at a database under `dir`.
    #[allow(dead_code)]
    pub fn with_db(dir: &Path, extra: &[(&str, &str)]) -> Self {
        let db = dir.join("db").join("hands.sqlite");
        let db = db.to_str().expect("temp path is UTF-8").to_string();
        let mut pairs = vec![("HOLDEM_DB", db.as_str())];
        pairs.extend_from_slice(extra);
        Self::apply(&pairs)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            match previous {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

/// Extracts the pretty-printed hand record from `play` output.
#[allow(dead_code)]
pub fn record_from_play(stdout: &str) -> holdem_engine::logger::HandRecord {
    let start = stdout.find('{').expect("play prints a JSON record");
    let end = stdout.rfind('}').expect("play prints a JSON record");
    serde_json::from_str(&stdout[start..=end]).expect("record parses")
}
