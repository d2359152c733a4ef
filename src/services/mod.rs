//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on input parsing, session plumbing, and
//! result shaping.

pub mod auth;
pub mod feed;
pub mod interest;
pub mod paper;
pub mod publish;
pub mod session;
