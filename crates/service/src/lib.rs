//! Service layer providing business-oriented CRUD operations on top of models.
//! - Every create also appends its activity entry, in one transaction.
//! - Reuses validation and entity definitions in `models` crate.
//! - Lists take an optional owner id to scope results to one user.

pub mod errors;
pub mod pagination;
pub mod auth;
pub mod db;
pub mod user_service;
#[cfg(test)]
pub mod test_support;
