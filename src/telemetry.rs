// Copyright 2025 Cowboy AI, LLC.

//! Structured logging setup

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over `default_filter`. With `json` set,
/// events are written as one JSON object per line.
pub fn init_tracing(default_filter: &str, json: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let (compact, structured) = if json {
        (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            ),
        )
    } else {
        (Some(tracing_subscriber::fmt::layer().with_target(true)), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(compact)
        .with(structured)
        .try_init()
}
