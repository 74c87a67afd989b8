//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod cors;
pub mod error;
pub mod health;
pub mod incidents;
pub mod index;
pub mod login;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
