//! Application layer: the ordered, persisted store of loan applications.
//!
//! `ApplicationStore` is the surface UI collaborators call: it validates
//! submissions, records decisions made by the
//! [`DecisionEngine`](crate::domain::decision::DecisionEngine) and persists
//! the whole list through a [`BlobStorage`](crate::domain::ports::BlobStorage)
//! backend.

pub mod store;
