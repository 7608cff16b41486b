//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod exercises;
pub mod feeds;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod social;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
