//! Raw CMS record shapes, as they arrive off the wire.
//!
//! These are untrusted inputs. The same logical field can appear under the
//! standard CMS location (`title.rendered`, top-level `date`) or under the
//! `acf` custom-fields sub-mapping, depending on which authoring mechanism
//! last touched the record. Everything is optional here; the normalization
//! layer resolves the precedence and guarantees concrete values.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Announcement posts
// ---------------------------------------------------------------------------

/// A raw announcement record from the posts collection.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    /// The CMS's own record identifier.
    pub id: u64,

    /// Standard publication timestamp (usually RFC 3339-like).
    #[serde(default)]
    pub date: Option<String>,

    /// Standard rendered title.
    #[serde(default)]
    pub title: Option<Rendered>,

    /// Standard rendered body.
    #[serde(default)]
    pub content: Option<Rendered>,

    /// Custom-fields sub-mapping written by the alternate authoring UI.
    #[serde(default)]
    pub acf: Option<PostFields>,
}

/// The CMS wraps rendered strings in `{ "rendered": "..." }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: Option<String>,
}

/// Announcement custom fields (`acf` sub-mapping).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostFields {
    /// Override date; the date picker writes compact `YYYYMMDD` strings.
    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub content: Option<String>,
}

// ---------------------------------------------------------------------------
// Member posts
// ---------------------------------------------------------------------------

/// A raw member record from the members collection.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMember {
    /// The CMS's own record identifier.
    pub id: u64,

    /// Custom-fields sub-mapping.
    #[serde(default)]
    pub acf: Option<MemberFields>,

    /// Related resources inlined by the `_embed` request flag.
    #[serde(default, rename = "_embedded")]
    pub embedded: Option<Embedded>,
}

/// Member custom fields (`acf` sub-mapping).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberFields {
    #[serde(default)]
    pub name_en: Option<String>,

    #[serde(default)]
    pub name_jp: Option<String>,

    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Image field; shape depends on the field's return-format setting.
    #[serde(default)]
    pub image: Option<ImageField>,

    #[serde(default)]
    pub display_order: Option<i64>,
}

/// The image custom field arrives as a bare URL string, an attachment
/// object carrying a `url` property, or something else entirely (an
/// attachment id, null) which the resolver ignores.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ImageField {
    Url(String),
    Attachment { url: String },
    Other(serde_json::Value),
}

/// Embedded related resources (`_embedded`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Embedded {
    /// Featured-media relation; the first entry's `source_url` is the
    /// fallback display image.
    #[serde(default, rename = "wp:featuredmedia")]
    pub featured_media: Vec<FeaturedMedia>,
}

/// One entry of the featured-media relation.
#[derive(Debug, Clone, Deserialize)]
pub struct FeaturedMedia {
    #[serde(default)]
    pub source_url: Option<String>,
}
