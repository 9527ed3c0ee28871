//! Core domain types for Bulletin content records.
//!
//! These are the post-normalization contracts exposed to consumers. Every
//! field is a concrete value: missing CMS inputs normalize to empty
//! strings or default labels upstream, never to nulls.

use serde::{Deserialize, Serialize};

/// Category label applied when a record carries none.
pub const DEFAULT_CATEGORY: &str = "Announcement";

/// Synthetic category id selecting every announcement.
pub const ALL_CATEGORY_ID: &str = "all";

/// Display label for the synthetic all-announcements category.
pub const ALL_CATEGORY_LABEL: &str = "All announcements";

// ---------------------------------------------------------------------------
// Announcement
// ---------------------------------------------------------------------------

/// A display-ready announcement record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// Zero-padded rank ordinal ("001"…), most recent rank highest.
    /// Stable only within a single fetch snapshot, NOT a persistent key.
    pub id: String,
    /// The CMS's own record identifier, preserved for detail-page lookups.
    pub source_id: u64,
    /// Canonical display date, `YYYY.MM.DD`.
    pub date: String,
    /// Category label; [`DEFAULT_CATEGORY`] when the record carried none.
    pub category: String,
    /// Title, may be empty.
    pub title: String,
    /// Body content (HTML from the CMS), may be empty.
    pub content: String,
}

/// A ranked announcement snapshot with its derived category list.
///
/// Snapshots are rebuilt from scratch on every fetch; rank ids are only
/// meaningful relative to the snapshot they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsSnapshot {
    /// Announcements in rank order (most recent first).
    pub announcements: Vec<Announcement>,
    /// Unique categories in rank order, headed by the synthetic
    /// [`ALL_CATEGORY_ID`] entry.
    pub categories: Vec<Category>,
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// A selectable announcement category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Filter key: the category label itself, or [`ALL_CATEGORY_ID`].
    pub id: String,
    /// Human-readable label.
    pub label: String,
}

impl Category {
    /// The synthetic head entry selecting every announcement.
    pub fn all() -> Self {
        Self {
            id: ALL_CATEGORY_ID.into(),
            label: ALL_CATEGORY_LABEL.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Member
// ---------------------------------------------------------------------------

/// A display-ready member profile record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// The CMS's record identifier.
    pub id: u64,
    /// Romanized name.
    pub name_en: String,
    /// Japanese name.
    pub name_jp: String,
    /// Role or title within the association.
    pub role: String,
    /// Short biography, may be empty.
    pub description: String,
    /// Resolved display image URL; empty when no image could be resolved
    /// (the consumer renders a placeholder).
    pub image_url: String,
    /// Ascending sort key; records without one sort first at 0.
    pub display_order: i64,
}
