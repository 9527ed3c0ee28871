//! Record normalization: date canonicalization, ordered field fallback,
//! rank-id assignment, category derivation, and member image resolution.
//!
//! Every reconciled field reads through [`first_of`]: values written by the
//! alternate authoring mechanism (`acf` custom fields) take precedence over
//! the standard CMS fields, and absence cascades to the next candidate.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

use bulletin_shared::{Announcement, Category, DEFAULT_CATEGORY, Member};

use crate::record::{ImageField, RawMember, RawPost};

// ---------------------------------------------------------------------------
// Date shape recognition (compiled once)
// ---------------------------------------------------------------------------

/// Matches the canonical display form `YYYY.MM.DD`.
static CANONICAL_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}\.\d{2}\.\d{2}$").expect("canonical date regex"));

/// Matches the compact date-picker form `YYYYMMDD`.
static COMPACT_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{8}$").expect("compact date regex"));

// ---------------------------------------------------------------------------
// Ordered fallback
// ---------------------------------------------------------------------------

/// First-match-wins over an ordered list of candidate accessors.
pub(crate) fn first_of<S, T>(record: &S, candidates: &[&dyn Fn(&S) -> Option<T>]) -> Option<T> {
    candidates.iter().find_map(|pick| pick(record))
}

/// Treat empty strings as absent so they cascade to the next candidate.
fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|s| !s.is_empty()).cloned()
}

// ---------------------------------------------------------------------------
// Date normalization
// ---------------------------------------------------------------------------

/// Canonicalize a date string to `YYYY.MM.DD` display form.
///
/// Exactly four shapes are recognized, in order: already-canonical input
/// passes through untouched, compact 8-digit input is split positionally,
/// anything chrono can read as a timestamp is calendar-decomposed, and
/// everything else is returned unchanged as a display fallback. The order
/// matters: canonical first so it is never reinterpreted. Idempotent.
pub fn format_date(raw: &str) -> String {
    if raw.is_empty() || CANONICAL_DATE_RE.is_match(raw) {
        return raw.to_string();
    }

    if COMPACT_DATE_RE.is_match(raw) {
        return format!("{}.{}.{}", &raw[0..4], &raw[4..6], &raw[6..8]);
    }

    if let Some(date) = parse_timestamp(raw) {
        return date.format("%Y.%m.%d").to_string();
    }

    raw.to_string()
}

/// Read a generic timestamp: RFC 3339, bare `YYYY-MM-DDTHH:MM:SS` (the
/// CMS omits the offset), or a plain `YYYY-MM-DD` date.
fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

// ---------------------------------------------------------------------------
// Announcement ranking
// ---------------------------------------------------------------------------

/// The date actually used for sorting and display: custom-field override
/// first, then the standard CMS date, then empty.
fn effective_date(post: &RawPost) -> String {
    first_of(
        post,
        &[
            &|p: &RawPost| non_empty(p.acf.as_ref().and_then(|f| f.date.as_ref())),
            &|p: &RawPost| non_empty(p.date.as_ref()),
        ],
    )
    .unwrap_or_default()
}

/// Sort raw posts most-recent-first and assign dense, gapless rank ids:
/// the most recent record gets `totalCount` zero-padded to three digits,
/// the oldest gets `"001"`.
///
/// The sort key is the effective date string compared lexicographically.
/// That is correct only because the date encodings are zero-padded
/// ISO-like strings; non-zero-padded inputs will mis-order. Accepted
/// constraint of the source data, not calendar-aware sorting.
pub(crate) fn rank_announcements(posts: Vec<RawPost>) -> Vec<Announcement> {
    let mut keyed: Vec<(String, RawPost)> = posts
        .into_iter()
        .map(|post| (effective_date(&post), post))
        .collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));

    let total = keyed.len();
    keyed
        .into_iter()
        .enumerate()
        .map(|(index, (date, post))| normalize_post(post, &date, total - index))
        .collect()
}

/// Normalize one raw post into the display contract, with its rank.
fn normalize_post(post: RawPost, effective_date: &str, rank: usize) -> Announcement {
    let title = first_of(
        &post,
        &[
            &|p: &RawPost| non_empty(p.acf.as_ref().and_then(|f| f.title.as_ref())),
            &|p: &RawPost| non_empty(p.title.as_ref().and_then(|t| t.rendered.as_ref())),
        ],
    )
    .unwrap_or_default();

    let content = first_of(
        &post,
        &[
            &|p: &RawPost| non_empty(p.acf.as_ref().and_then(|f| f.content.as_ref())),
            &|p: &RawPost| non_empty(p.content.as_ref().and_then(|c| c.rendered.as_ref())),
        ],
    )
    .unwrap_or_default();

    let category = first_of(
        &post,
        &[&|p: &RawPost| non_empty(p.acf.as_ref().and_then(|f| f.category.as_ref()))],
    )
    .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    Announcement {
        id: format!("{rank:03}"),
        source_id: post.id,
        date: format_date(effective_date),
        category,
        title,
        content,
    }
}

/// Unique categories of a ranked snapshot, in rank order, headed by the
/// synthetic all-announcements entry.
pub(crate) fn derive_categories(announcements: &[Announcement]) -> Vec<Category> {
    let mut seen = HashSet::new();
    let mut categories = vec![Category::all()];

    for record in announcements {
        if seen.insert(record.category.clone()) {
            categories.push(Category {
                id: record.category.clone(),
                label: record.category.clone(),
            });
        }
    }

    categories
}

// ---------------------------------------------------------------------------
// Member normalization
// ---------------------------------------------------------------------------

/// Normalize one raw member record into the display contract.
pub(crate) fn normalize_member(raw: &RawMember) -> Member {
    let field = |pick: &dyn Fn(&crate::record::MemberFields) -> Option<String>| {
        raw.acf.as_ref().and_then(|f| pick(f)).unwrap_or_default()
    };

    Member {
        id: raw.id,
        name_en: field(&|f| non_empty(f.name_en.as_ref())),
        name_jp: field(&|f| non_empty(f.name_jp.as_ref())),
        role: field(&|f| non_empty(f.role.as_ref())),
        description: field(&|f| non_empty(f.description.as_ref())),
        image_url: resolve_image(raw),
        display_order: raw.acf.as_ref().and_then(|f| f.display_order).unwrap_or(0),
    }
}

/// Resolve a member's display image URL. Checked in order: a direct
/// string-valued image field, an attachment object's `url` property, then
/// the first embedded featured-media entry's `source_url`. First match
/// wins; absence of all three yields an empty string and the consumer
/// renders a placeholder.
fn resolve_image(raw: &RawMember) -> String {
    first_of(
        raw,
        &[
            &|m: &RawMember| match m.acf.as_ref()?.image.as_ref()? {
                ImageField::Url(url) => non_empty(Some(url)),
                _ => None,
            },
            &|m: &RawMember| match m.acf.as_ref()?.image.as_ref()? {
                ImageField::Attachment { url } => non_empty(Some(url)),
                _ => None,
            },
            &|m: &RawMember| {
                non_empty(
                    m.embedded
                        .as_ref()?
                        .featured_media
                        .first()?
                        .source_url
                        .as_ref(),
                )
            },
        ],
    )
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Embedded, FeaturedMedia, MemberFields, PostFields, Rendered};

    fn post(id: u64, date: &str) -> RawPost {
        RawPost {
            id,
            date: Some(date.to_string()),
            title: Some(Rendered {
                rendered: Some(format!("Post {id}")),
            }),
            content: None,
            acf: None,
        }
    }

    #[test]
    fn format_date_canonical_passthrough() {
        assert_eq!(format_date("2025.01.15"), "2025.01.15");
    }

    #[test]
    fn format_date_compact_split() {
        assert_eq!(format_date("20250115"), "2025.01.15");
    }

    #[test]
    fn format_date_generic_timestamp() {
        assert_eq!(format_date("2025-01-15T00:00:00"), "2025.01.15");
        assert_eq!(format_date("2025-01-15T09:00:00+09:00"), "2025.01.15");
        assert_eq!(format_date("2025-01-15"), "2025.01.15");
    }

    #[test]
    fn format_date_unrecognized_passthrough() {
        assert_eq!(format_date("N/A"), "N/A");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn format_date_is_idempotent() {
        for input in ["2025.01.15", "20250115", "2025-01-15T00:00:00", "N/A"] {
            let once = format_date(input);
            assert_eq!(format_date(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn rank_sorts_descending_and_numbers_from_total() {
        let records = rank_announcements(vec![
            post(10, "2025-01-10"),
            post(20, "2025-01-20"),
            post(5, "2025-01-05"),
        ]);

        let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2025.01.20", "2025.01.10", "2025.01.05"]);

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["003", "002", "001"]);

        assert_eq!(records[0].source_id, 20);
    }

    #[test]
    fn rank_ids_unique_and_strictly_decreasing() {
        let records =
            rank_announcements((1..=12).map(|i| post(i, &format!("2025-03-{i:02}"))).collect());

        let mut seen = HashSet::new();
        let mut previous = usize::MAX;
        for record in &records {
            assert_eq!(record.id.len(), 3);
            assert!(seen.insert(record.id.clone()), "duplicate id {}", record.id);
            let numeric: usize = record.id.parse().expect("numeric id");
            assert!(numeric < previous, "ids must strictly decrease");
            previous = numeric;
        }
    }

    #[test]
    fn override_date_wins_over_standard() {
        let mut older = post(1, "2025-06-01");
        older.acf = Some(PostFields {
            date: Some("2025-01-01".into()),
            ..Default::default()
        });
        let newer = post(2, "2025-03-01");

        // The override pushes record 1 behind record 2 despite its newer
        // standard date.
        let records = rank_announcements(vec![older, newer]);
        assert_eq!(records[0].source_id, 2);
        assert_eq!(records[1].date, "2025.01.01");
    }

    #[test]
    fn mixed_encodings_sort_by_raw_text() {
        // Lexicographic comparison is not calendar-aware: a compact
        // override always sorts above an ISO standard date because
        // '0' > '-'. Accepted constraint of the source data.
        let mut compact = post(1, "2025-12-31");
        compact.acf = Some(PostFields {
            date: Some("20250101".into()),
            ..Default::default()
        });
        let iso = post(2, "2025-12-01");

        let records = rank_announcements(vec![compact, iso]);
        assert_eq!(records[0].source_id, 1);
        assert_eq!(records[0].date, "2025.01.01");
    }

    #[test]
    fn title_falls_back_to_custom_field() {
        let raw = RawPost {
            id: 1,
            date: Some("2025-01-01".into()),
            title: None,
            content: None,
            acf: Some(PostFields {
                title: Some("Entrance ceremony".into()),
                ..Default::default()
            }),
        };
        let records = rank_announcements(vec![raw]);
        assert_eq!(records[0].title, "Entrance ceremony");
    }

    #[test]
    fn missing_fields_normalize_to_defaults() {
        let raw = RawPost {
            id: 1,
            date: Some("2025-01-01".into()),
            title: None,
            content: None,
            acf: None,
        };
        let records = rank_announcements(vec![raw]);
        assert_eq!(records[0].title, "");
        assert_eq!(records[0].content, "");
        assert_eq!(records[0].category, DEFAULT_CATEGORY);
    }

    #[test]
    fn categories_unique_in_rank_order_with_all_head() {
        let mut a = post(1, "2025-01-03");
        a.acf = Some(PostFields {
            category: Some("Seminars".into()),
            ..Default::default()
        });
        let mut b = post(2, "2025-01-02");
        b.acf = Some(PostFields {
            category: Some("Events".into()),
            ..Default::default()
        });
        let mut c = post(3, "2025-01-01");
        c.acf = Some(PostFields {
            category: Some("Seminars".into()),
            ..Default::default()
        });

        let records = rank_announcements(vec![a, b, c]);
        let categories = derive_categories(&records);

        let ids: Vec<&str> = categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["all", "Seminars", "Events"]);
    }

    fn member_with_image(image: Option<ImageField>) -> RawMember {
        RawMember {
            id: 1,
            acf: Some(MemberFields {
                name_en: Some("Aiko Tanaka".into()),
                image,
                ..Default::default()
            }),
            embedded: None,
        }
    }

    #[test]
    fn image_direct_string_wins() {
        let mut raw = member_with_image(Some(ImageField::Url(
            "https://img.example.org/direct.jpg".into(),
        )));
        raw.embedded = Some(Embedded {
            featured_media: vec![FeaturedMedia {
                source_url: Some("https://img.example.org/featured.jpg".into()),
            }],
        });
        let member = normalize_member(&raw);
        assert_eq!(member.image_url, "https://img.example.org/direct.jpg");
    }

    #[test]
    fn image_object_url_second() {
        let raw = member_with_image(Some(ImageField::Attachment {
            url: "https://img.example.org/object.jpg".into(),
        }));
        let member = normalize_member(&raw);
        assert_eq!(member.image_url, "https://img.example.org/object.jpg");
    }

    #[test]
    fn image_featured_media_third() {
        let mut raw = member_with_image(Some(ImageField::Other(serde_json::json!(318))));
        raw.embedded = Some(Embedded {
            featured_media: vec![FeaturedMedia {
                source_url: Some("https://img.example.org/featured.jpg".into()),
            }],
        });
        let member = normalize_member(&raw);
        assert_eq!(member.image_url, "https://img.example.org/featured.jpg");
    }

    #[test]
    fn image_absent_yields_empty() {
        let member = normalize_member(&member_with_image(None));
        assert_eq!(member.image_url, "");
        assert_eq!(member.display_order, 0);
    }
}
