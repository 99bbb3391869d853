//! Derived artifact generation.
//!
//! Everything here is a pure function of the article store plus the site
//! configuration, written back to disk by the stage runners in `main`.
//!
//! # Submodules
//!
//! - [`stats`]: Per-category and per-author statistics
//! - [`navigation`]: Menu, footer and top-category data for the site chrome
//! - [`feed`]: RSS 2.0 feed of the latest articles
//! - [`sitemap`]: `sitemap.xml` and `robots.txt`
//! - [`json`]: Pretty JSON file writer
//! - [`xml`]: Shared `quick-xml` helpers
//!
//! # Output Structure
//!
//! ```text
//! data_dir/
//! ├── articles.json
//! ├── navigation.json
//! └── category-stats.json
//!
//! public_dir/
//! ├── feed.xml
//! ├── sitemap.xml
//! └── robots.txt
//! ```

pub mod feed;
pub mod json;
pub mod navigation;
pub mod sitemap;
pub mod stats;
pub mod xml;
