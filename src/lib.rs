//! Tiered translation resolution: ephemeral cache, static bundles, and
//! an on-demand machine-translation provider, in that order, with
//! failure-safe degradation to source text.

pub mod bundle;
pub mod cache;
pub mod config;
pub mod error;
pub mod i18n;
pub mod provider;
pub mod resolver;
pub mod retry;
pub mod security;
pub mod server;
