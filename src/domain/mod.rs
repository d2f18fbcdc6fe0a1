//! Domain model: loan applications, the decision rule and the storage port
//! the application layer persists through.

pub mod application;
pub mod decision;
pub mod ports;
pub mod user;
