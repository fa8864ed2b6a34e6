//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Password registration and login live here; session tokens are signed
//! JWTs whose subject is the user id.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;
pub mod token;

pub use service::AuthService;
