// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Inference endpoint configuration
//!
//! Resolves `OLLAMA_HOST` the same way the Ollama tooling does, so a value
//! that works for `ollama run` works here too.

use std::env;
use tracing::warn;

/// Port Ollama listens on when none is given
pub const DEFAULT_PORT: u16 = 11434;

/// Host used when `OLLAMA_HOST` is unset or empty
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Configuration for the inference client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the model server, without a trailing slash
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: resolve_endpoint(""),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let raw = env::var("OLLAMA_HOST").unwrap_or_default();
        Self::from_host(&raw)
    }

    /// Build the configuration from an `OLLAMA_HOST`-style value
    pub fn from_host(raw: &str) -> Self {
        Self {
            endpoint: resolve_endpoint(raw),
        }
    }
}

/// Turn an `OLLAMA_HOST` value into a full base URL.
///
/// - empty: `http://127.0.0.1:11434`
/// - bare host or `host:port`: scheme defaults to http, port to 11434
/// - `http://host` / `https://host`: port defaults to 80 / 443
/// - anything after the first `/` of the authority is kept as a path prefix
pub fn resolve_endpoint(raw: &str) -> String {
    let raw = raw.trim();

    let (scheme, rest, default_port) = match raw.split_once("://") {
        None => ("http", raw, DEFAULT_PORT),
        Some(("http", rest)) => ("http", rest, 80),
        Some(("https", rest)) => ("https", rest, 443),
        Some((scheme, rest)) => (scheme, rest, DEFAULT_PORT),
    };

    let (authority, path) = match rest.split_once('/') {
        Some((authority, path)) => (authority, path.trim_end_matches('/')),
        None => (rest, ""),
    };

    let (host, port) = split_host_port(authority, default_port);
    let host = if host.is_empty() {
        DEFAULT_HOST.to_string()
    } else {
        host.to_string()
    };

    let host = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]", host)
    } else {
        host
    };

    if path.is_empty() {
        format!("{}://{}:{}", scheme, host, port)
    } else {
        format!("{}://{}:{}/{}", scheme, host, port, path)
    }
}

/// Split `host:port` or `[v6]:port`.
///
/// A missing port, or one that is not a valid `u16`, falls back to
/// `default_port`. The host is kept either way.
fn split_host_port(authority: &str, default_port: u16) -> (&str, u16) {
    let (host, port) = if let Some(stripped) = authority.strip_prefix('[') {
        match stripped.split_once(']') {
            Some((host, tail)) => (host, tail.strip_prefix(':')),
            None => (authority, None),
        }
    } else {
        match authority.rsplit_once(':') {
            // A bare IPv6 address has several colons and no port
            Some((host, _)) if host.contains(':') => (authority, None),
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        }
    };

    let port = match port {
        None => default_port,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Invalid port '{}' in OLLAMA_HOST, using {}", raw, default_port);
            default_port
        }),
    };
    (host, port)
}
