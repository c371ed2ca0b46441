//! Jira Cloud adapter.
//!
//! Creates issues through the REST API v3 using basic authentication.

pub mod client;
pub mod models;

pub use client::JiraClient;
