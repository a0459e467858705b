//! CLI subcommand implementations for the imagescout binary.

pub mod output;
pub mod search_cmd;
