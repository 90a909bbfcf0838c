//! `msgshell`: turn parsed Outlook `.msg` messages into plain email values.
//!
//! This crate provides the mapping from a parsed Outlook message onto an
//! immutable [`model::email::Email`], together with the builder, the parser
//! boundary and a few export helpers used by the CLI.

pub mod builder;
pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;
