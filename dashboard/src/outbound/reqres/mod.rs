//! Reqres outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `UsersApi` and
//! `AuthApi` ports.

mod dto;
mod http_client;

pub use http_client::{API_KEY_HEADER, ReqresClient};
