//! Workspace root placeholder package.
//!
//! Exists so the `cargo-husky` dev-dependency can install the shared git
//! hooks; all functionality lives in the `crates/` members.
