//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache sweep: Purges expired response cache entries (opt-in)

mod sweep;

pub use sweep::spawn_sweep_task;
