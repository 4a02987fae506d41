//! Stock health backend integration.
//!
//! This module provides the [`StockApi`] seam used by the sync layer and
//! its reqwest implementation, [`ApiClient`].

mod client;
mod query;

#[cfg(test)]
pub use client::MockStockApi;
pub use client::{ApiClient, ApiClientBuilder, StockApi};
pub use query::{SortOrder, StockQuery};
