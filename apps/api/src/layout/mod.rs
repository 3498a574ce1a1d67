// Text measurement for the page renderer: Times AFM widths, page geometry, greedy wrap.

pub mod font_metrics;
pub mod wrap;

pub use font_metrics::{default_page_config, PageConfig};
