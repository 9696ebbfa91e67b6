//! Encrypted local audit store for scoring decisions.

mod encrypted;

pub use encrypted::{DecisionStore, StoredDecision};
