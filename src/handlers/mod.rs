//! MCP tool handlers for the academic schedule server
//!
//! This module contains the implementation of all MCP tool handlers.
//! Each view has its own file.

pub mod auth;
pub mod calendar;
pub mod curriculum;
pub mod schedule;

/// Turn a domain error into an error whose message reaches the client
pub(crate) fn invalid_params(error: impl std::fmt::Display) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(error.to_string(), true)
}
