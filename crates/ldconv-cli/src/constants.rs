//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// Configuration, input and resource failures all exit with `FAILURE`.
/// Skipped entries do not change the exit status.
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Built-in defaults, overridden by the config file and then by flags.
pub mod defaults {
    pub const INPUT: &str = "input.jsonl";
    pub const OUTPUT: &str = "output.txt";
    pub const FORMAT: &str = "sqlcipher";
    pub const CIPHER: &str = "aes-256-cbc";
}
