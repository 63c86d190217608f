//! Filesystem utilities for factory.
//!
//! Generated files are written atomically so an interrupted or failed run
//! never leaves a truncated output behind for the build to pick up.

pub mod atomic;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
