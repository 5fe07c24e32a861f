//! Shared UI theme constants.

use ratatui::style::Color;

// Chart series colors (#4CAF50 green, #2196F3 blue)
pub const PAGEVIEWS_COLOR: Color = Color::Rgb(76, 175, 80);
pub const TOP_PAGES_COLOR: Color = Color::Rgb(33, 150, 243);

pub const TILE_VALUE: Color = Color::Rgb(230, 230, 235);
pub const AXIS: Color = Color::Rgb(170, 170, 180);
