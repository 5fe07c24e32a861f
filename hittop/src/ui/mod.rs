//! UI module root: exposes drawing functions for individual panels.

pub mod header;
pub mod pageviews;
pub mod theme;
pub mod tiles;
pub mod top_pages;
pub mod util;
