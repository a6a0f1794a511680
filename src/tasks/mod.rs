//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache purge: deletes entries older than their category TTL

mod purge;

pub use purge::{purge_once, spawn_purge_task, PurgeReport};
