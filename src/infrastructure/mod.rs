//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Activities: Activities API client
//! - Adapters: Platform integrations (Spark, console)
//! - Server: Webhook HTTP server

pub mod config;
pub mod activities;
pub mod adapters;
pub mod server;
