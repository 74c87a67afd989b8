//! Request middleware.
//!
//! Cross-cutting request lifecycle concerns. Authentication lives with the
//! HTTP adapter in [`crate::inbound::http::auth`].

pub mod trace;

pub use trace::Trace;
