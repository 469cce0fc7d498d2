//! Batched execution of per-item work
//!
//! | Type | Description |
//! |------|-------------|
//! | [`BatchFetcher`] | Runs items in fixed-size concurrent batches with a pause between batches |
//! | [`ProgressCallback`] | `(processed, total)` hook invoked after each batch |

pub mod fetcher;

pub use fetcher::{BatchFetcher, ProgressCallback};
