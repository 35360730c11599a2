//! Game state export
//!
//! Read-only JSON snapshots of the simulation for logging and debugging.
//! Nothing is loaded back: scores do not survive a restart.

pub mod snapshot;

pub use snapshot::SnapshotError;
