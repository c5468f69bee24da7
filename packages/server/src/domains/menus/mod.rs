//! Menus domain - serves daily menus from the cache or a fresh extraction

pub mod inflight;
pub mod service;

pub use inflight::{InflightRegistry, Lease};
pub use service::{MenuService, MenuServiceError, SummarizeOutcome};
