//! Background Tasks Module
//!
//! Contains background tasks that run alongside the HTTP server.

pub mod preload;
pub mod sweep;

pub use preload::spawn_startup_preload;
pub use sweep::spawn_sweep_task;
