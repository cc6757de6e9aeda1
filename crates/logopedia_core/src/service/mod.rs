//! Core use-case services.
//!
//! # Responsibility
//! - Turn raw front-end input into validated records.
//! - Keep front ends decoupled from storage details.

pub mod child_service;
pub mod examination_service;
