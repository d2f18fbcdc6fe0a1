//! CSV adapters used by the command-line front end.

pub mod application_writer;
pub mod submission_reader;
