//! Integration tests for cargo-decide
//!
//! Each test builds a throwaway Cargo workspace in a git repository and runs
//! the compiled binary against it.

mod helpers;
mod test_check;
mod test_interactive;
