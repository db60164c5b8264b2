//! Persistence trait for the domain layer.
//!
//! The engine mutates state in memory and writes through to storage via the
//! [`StateStore`] trait. The concrete JSON-file implementation lives in
//! `crate::infrastructure::persistence`; a mock is auto-generated via
//! `mockall` for unit tests.

pub mod state_store;

pub use state_store::StateStore;

#[cfg(test)]
pub use state_store::MockStateStore;
