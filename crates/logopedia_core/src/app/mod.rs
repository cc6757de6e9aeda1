//! Application layer: view-state controller over the record store.

pub mod controller;
