//! Integration test crate for ReelKit.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on multiple reelkit crates to verify that the timeline
//! model, the segment editor, the playback clock, and the overlay
//! compositor work together.

#[cfg(test)]
mod timeline;

#[cfg(test)]
mod preview;

/// Route library tracing through the test harness; `RUST_LOG` filters.
#[cfg(test)]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
