//! Entities, input payloads and field validation for the CRM schema.
//!
//! Every entity module exposes its sea-orm `Model`, a `New*` payload for
//! creation, a `*Changes` payload for partial updates and an `insert`
//! function generic over `ConnectionTrait` so it runs inside transactions.

pub mod errors;
pub mod db;
pub mod validate;
pub mod user;
pub mod user_credentials;
pub mod lead;
pub mod property;
pub mod contact;
pub mod appointment;
pub mod task;
pub mod document;
pub mod activity;

#[cfg(test)]
mod tests;
