//! Domain Ports
//!
//! Traits the domain depends on. Implementations live in `tbr-providers`.

/// External provider ports (cache store, item fetcher)
pub mod providers;
