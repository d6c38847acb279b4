//! # Observability
//!
//! Every actor logs through `tracing` with an `entity_type` field, so one subscriber
//! covers the whole system:
//!
//! ```text
//! INFO Actor started entity_type="Product"
//! INFO Action ok entity_type="Product" id=product_1
//! WARN Action rejected, locked entity_type="Order" id=order_3
//! INFO Prepared entity_type="Order" tx=tx_4 count=2
//! INFO Committed entity_type="Order" tx=tx_4 removed=2 size=5
//! ```
//!
//! `RUST_LOG=debug` additionally shows every request with its payload.

use tracing_subscriber::EnvFilter;

/// Installs a compact fmt subscriber filtered by `RUST_LOG`.
///
/// When `RUST_LOG` is unset or invalid, `fallback` is used as the filter directive.
/// Calling it twice is harmless: the second call leaves the first subscriber in place.
pub fn setup_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
