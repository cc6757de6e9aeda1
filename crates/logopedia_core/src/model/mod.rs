//! Domain model for children, examinations and answers.
//!
//! # Invariants
//! - Every record is identified by a store-assigned `i64` surrogate key.
//! - Ownership is a strict chain: Child -> Examination -> Answer.
//! - Blank optional text is represented as `None`, never as `Some("")`.

pub mod answer;
pub mod child;
pub mod examination;
pub mod validation;
