//! Concurrency limiting for outbound calls
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ConcurrencyGate`] | FIFO limiter shared by callers of one upstream |
//! | [`GatePermit`] | RAII slot; dropping it releases the slot |
//! | [`GateRegistry`] | Named gates built once from configuration |

pub mod gate;
pub mod registry;

pub use gate::{ConcurrencyGate, GatePermit};
pub use registry::GateRegistry;
