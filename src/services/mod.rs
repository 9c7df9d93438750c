//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own catalog access and session bookkeeping so route
//! handlers can stay focused on request translation and cookie plumbing.

pub mod activity;
pub mod catalog;
pub mod session;
