//! Data types for menus, cache entries, and fetched pages.

pub mod entry;
pub mod menu;
pub mod page;
