//! # Gaming Speed Calculator server
//! This crate hosts the HTTP surface of the gaming speed calculator. It is responsible for:
//! Accepting speed calculation requests from authenticated game clients.
//! Registering and logging in users against the managed identity provider.
//! Translating malformed payloads and validation failures into client-error responses.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/`: A service banner.
//! * `/auth/register`, `/auth/login`: Registration and login against the identity provider.
//! * `/calculate-speed`: The terrain-based speed calculation. Requires a bearer access token.

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod integrations;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
