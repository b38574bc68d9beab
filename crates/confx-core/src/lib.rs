//! Core types and configuration for confx.
//!
//! This crate defines the `confx.toml` schema ([`ConfxConfig`]), the
//! Docker build settings and their defaults ([`DockerConfig`]), the ordered
//! environment-variable registry ([`EnvVars`]), and shared error types.

pub mod config;
pub mod env;
pub mod error;

pub use config::{ConfxConfig, DockerConfig, GoProxyConfig, ProjectConfig};
pub use env::{EnvVar, EnvVars};
pub use error::{Error, Result};
