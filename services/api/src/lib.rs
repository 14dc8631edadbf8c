//! Interviewer API Library Crate
//!
//! This library contains the web service around `interviewer-core`: configuration,
//! completion client wiring, the in-memory session store, API handlers, and
//! routing. The binaries are thin wrappers around this library.

pub mod completion;
pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
pub mod store;
