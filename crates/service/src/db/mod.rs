//! Database-backed business operations, one module per entity.
//!
//! List functions take an optional owner id; `None` lists every row.

pub mod activity_service;
pub mod appointment_service;
pub mod contact_service;
pub mod dashboard_service;
pub mod document_service;
pub mod lead_service;
pub mod property_service;
pub mod task_service;
