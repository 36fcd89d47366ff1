#![allow(dead_code)]

//! Shared helpers for CLI integration tests.

pub struct CliOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Runs the CLI in-process with `gamemory` prepended to `args`.
pub fn run_cli(args: &[&str]) -> CliOutput {
    let mut argv = vec!["gamemory"];
    argv.extend_from_slice(args);
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = gamemory_cli::run(argv, &mut out, &mut err);
    CliOutput {
        code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

pub const ENV_KEYS: [&str; 8] = [
    "GAMEMORY_CONFIG",
    "GAMEMORY_SEED",
    "GAMEMORY_ROWS",
    "GAMEMORY_COLS",
    "GAMEMORY_RESOLVE_DELAY_MS",
    "GAMEMORY_MESSAGE_DELAY_MS",
    "GAMEMORY_TEST_INPUT",
    "GAMEMORY_SIM_BREAK_AFTER",
];

/// Removes every variable the CLI reads. Callers must be `#[serial]`.
pub fn clear_env() {
    for key in ENV_KEYS {
        unsafe {
            std::env::remove_var(key);
        }
    }
}

pub fn set_env(key: &str, value: impl AsRef<std::ffi::OsStr>) {
    unsafe {
        std::env::set_var(key, value);
    }
}
