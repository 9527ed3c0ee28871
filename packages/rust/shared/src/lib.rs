//! Shared types, error model, and configuration for Bulletin.
//!
//! This crate is the foundation depended on by the other Bulletin crates.
//! It provides:
//! - [`BulletinError`] — the unified error type
//! - Domain types ([`Announcement`], [`NewsSnapshot`], [`Category`], [`Member`])
//! - Configuration ([`AppConfig`], [`FetchOptions`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    ApiConfig, AppConfig, DataMode, FetchConfig, FetchOptions, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{BulletinError, Result};
pub use types::{
    ALL_CATEGORY_ID, ALL_CATEGORY_LABEL, Announcement, Category, DEFAULT_CATEGORY, Member,
    NewsSnapshot,
};
