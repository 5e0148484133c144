// SPDX-FileCopyrightText: 2026 Haulchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the haulchat chat widget.
//!
//! Serves the public chat endpoint, the bearer-authenticated quote
//! endpoints, photo uploads and public photo reads.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod quote;
pub mod server;
pub mod upload;

pub use auth::AuthConfig;
pub use error::ApiError;
pub use server::{GatewayConfig, GatewayState, HealthState, build_router, start_server};
