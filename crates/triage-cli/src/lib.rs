//! CLI argument models and validation utilities for the triage action binary.
//!
//! Every flag falls back to the environment variable the GitHub Actions runner
//! sets for action inputs (`INPUT_*`) or workflow context (`GITHUB_*`).

pub mod cli_args;
pub mod validation;

pub use cli_args::Cli;
pub use validation::*;
