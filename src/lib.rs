//! # Cronbeat Rust Client
//!
//! A Rust client for reporting the lifecycle of scheduled jobs (start,
//! progress, success or failure, and plain liveness pings) to the Cronbeat
//! monitoring service.
//!
//! ## Overview
//!
//! This crate provides:
//! - A validated [`JobKey`] and a type-safe [`ClientConfig`] built through
//!   [`ClientConfigBuilder`]
//! - [`PingClient`], an async client with one method per lifecycle action
//! - Automatic retries with exponential backoff and jitter for rate limiting,
//!   server errors, and network failures
//! - A pluggable [`Transport`](clients::Transport), with a `reqwest`-backed
//!   default
//! - Defensive response handling: every 2xx response becomes a
//!   [`PingResult`], even when the body is malformed
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cronbeat::PingClient;
//!
//! let client = PingClient::with_defaults("abc123de")?;
//!
//! client.start().await?;
//! match run_backup().await {
//!     Ok(()) => client.success().await?,
//!     Err(_) => client.fail().await?,
//! };
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use std::time::Duration;
//! use cronbeat::{BaseUrl, ClientConfig, PingClient};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://ping.internal.example.com").unwrap())
//!     .timeout(Duration::from_secs(2))
//!     .max_retries(3)
//!     .backoff_base(Duration::from_millis(500))
//!     .user_agent("nightly-backup/1.4")
//!     .build();
//!
//! let client = PingClient::new("abc123de", config).unwrap();
//! assert_eq!(client.job_key().as_ref(), "abc123de");
//! ```
//!
//! ## Progress Reports
//!
//! ```rust,ignore
//! use cronbeat::ProgressInput;
//!
//! // Sequence number plus message; these two calls are equivalent.
//! client.progress(50u64, Some("halfway")).await?;
//! client.progress(ProgressInput::with_message(50u64, "halfway"), None).await?;
//!
//! // Message only.
//! client.progress(None::<u64>, Some("copying shard 7")).await?;
//! ```
//!
//! ## Error Handling
//!
//! Operations return [`PingError`]: either a local [`ValidationError`]
//! (raised before any request is sent) or a [`RemoteError`] carrying an
//! [`ErrorCode`], the HTTP status, a retryable flag, and the raw body.
//!
//! ## Logging
//!
//! The client emits `tracing` events: `debug` for each attempt and success,
//! `warn` before each retry. Install any `tracing` subscriber to see them.
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based
//! - **Fail-fast validation**: job keys are checked at construction, inputs
//!   before sending
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: designed for the Tokio runtime

pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use clients::{ErrorCode, PingClient, PingError, PingResult, ProgressInput, RemoteError};
pub use config::{BaseUrl, ClientConfig, ClientConfigBuilder, EndStatus, JobKey};
pub use error::ValidationError;
