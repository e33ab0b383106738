//! Core health engine
//!
//! Everything independent of the transport a report is served over.

pub mod health;
