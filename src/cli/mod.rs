//! Command-line front end for the `sevlog` binary.

pub mod args;
pub mod commands;
