//! Bundled fixture data served when the CMS is unreachable.
//!
//! The fixtures are pre-normalized (the same shape the live path
//! produces, with no re-derivation needed) and are embedded in the
//! binary so the fallback works without any filesystem or network access.

use std::sync::LazyLock;

use bulletin_shared::{Member, NewsSnapshot};

static NEWS: LazyLock<NewsSnapshot> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../fixtures/news.fixture.json"))
        .expect("bundled news fixture is valid")
});

static MEMBERS: LazyLock<Vec<Member>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../fixtures/members.fixture.json"))
        .expect("bundled members fixture is valid")
});

/// The fallback announcement snapshot.
pub(crate) fn news_snapshot() -> NewsSnapshot {
    NEWS.clone()
}

/// The fallback member roster.
pub(crate) fn members() -> Vec<Member> {
    MEMBERS.clone()
}
