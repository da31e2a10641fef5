//! Rust client SDK for the agent gateway.

pub mod client;

pub use client::{CreatePostRequest, GatewayClient};
