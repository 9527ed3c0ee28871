//! CMS content client and normalization service.
//!
//! Retrieves announcement and member collections from a WordPress-style
//! REST API (`GET {endpoint}?per_page={N}&_embed`), reconciles the
//! inconsistent legacy record shapes into display-ready records, derives
//! rank-based display identifiers, and degrades to bundled fixture data on
//! any remote failure. Callers always receive a renderable result; a
//! transport error is never surfaced from the fetch operations, only the
//! [`DataSource`] flag tells live and fallback data apart.

mod fixtures;
mod normalize;
mod record;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use bulletin_shared::{
    Announcement, ApiConfig, AppConfig, BulletinError, DataMode, FetchOptions, Member,
    NewsSnapshot, Result,
};

pub use normalize::format_date;
pub use record::{RawMember, RawPost};

/// User-Agent string for CMS requests.
const USER_AGENT: &str = concat!("Bulletin/", env!("CARGO_PKG_VERSION"));

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 3;

// ---------------------------------------------------------------------------
// Sourced results
// ---------------------------------------------------------------------------

/// Where a result's records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Fetched from the CMS during this call.
    Live,
    /// Served from the bundled fixtures (fixture mode, or remote failure).
    Fixture,
}

/// A fetch result that is always renderable: the payload plus the flag
/// saying whether it came from the CMS or from the bundled fixtures.
///
/// The flag exists for observability and testing; the record shapes are
/// identical either way, so consumers that don't care can ignore it.
#[derive(Debug, Clone)]
pub struct Sourced<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> Sourced<T> {
    fn live(data: T) -> Self {
        Self {
            data,
            source: DataSource::Live,
        }
    }

    fn fixture(data: T) -> Self {
        Self {
            data,
            source: DataSource::Fixture,
        }
    }

    /// True when the bundled fixtures were served instead of live data.
    pub fn is_fallback(&self) -> bool {
        self.source == DataSource::Fixture
    }
}

// ---------------------------------------------------------------------------
// ContentClient
// ---------------------------------------------------------------------------

/// Client for the association CMS.
///
/// Holds no state besides configuration and the HTTP connection pool.
/// Every fetch computes an independent snapshot; concurrent calls are not
/// coordinated and may observe different remote states.
pub struct ContentClient {
    mode: DataMode,
    api: ApiConfig,
    options: FetchOptions,
    client: Client,
}

impl ContentClient {
    /// Create a new client from the application config.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let options = FetchOptions::from(config);

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(options.timeout)
            .build()
            .map_err(|e| BulletinError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            mode: config.mode,
            api: config.api.clone(),
            options,
            client,
        })
    }

    /// Fetch the ranked announcement snapshot.
    ///
    /// On any remote failure (network error, timeout, non-2xx status,
    /// malformed payload) the error is logged and the bundled fixture
    /// snapshot is returned instead. There is no retry and no partial
    /// result; each call is all-or-nothing.
    #[instrument(skip_all)]
    pub async fn fetch_announcements(&self) -> Sourced<NewsSnapshot> {
        if self.mode == DataMode::Fixture {
            debug!("fixture mode, serving bundled announcements");
            return Sourced::fixture(fixtures::news_snapshot());
        }

        match self.news_snapshot().await {
            Ok(snapshot) => {
                debug!(
                    announcements = snapshot.announcements.len(),
                    categories = snapshot.categories.len(),
                    "announcement snapshot ready"
                );
                Sourced::live(snapshot)
            }
            Err(e) => {
                warn!(error = %e, "announcement fetch failed, serving fixtures");
                Sourced::fixture(fixtures::news_snapshot())
            }
        }
    }

    /// Locate a single announcement by its rank-derived id.
    ///
    /// The full snapshot is re-derived on every call: rank ids are only
    /// meaningful relative to a snapshot, so caching one here would pin
    /// stale ranks. `None` is the normal "not found" outcome, distinct
    /// from fixture fallback. A detail call racing a list call across a
    /// remote content change can disagree about which record owns an id;
    /// that window is inherent to rank-derived ids and is accepted.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn fetch_announcement_by_id(&self, id: &str) -> Sourced<Option<Announcement>> {
        let snapshot = self.fetch_announcements().await;
        let found = snapshot
            .data
            .announcements
            .iter()
            .find(|record| record.id == id)
            .cloned();

        Sourced {
            data: found,
            source: snapshot.source,
        }
    }

    /// Fetch the member roster in display order.
    ///
    /// Same failure discipline as [`fetch_announcements`](Self::fetch_announcements).
    #[instrument(skip_all)]
    pub async fn fetch_members(&self) -> Sourced<Vec<Member>> {
        if self.mode == DataMode::Fixture {
            debug!("fixture mode, serving bundled members");
            return Sourced::fixture(fixtures::members());
        }

        match self.member_roster().await {
            Ok(members) => Sourced::live(members),
            Err(e) => {
                warn!(error = %e, "member fetch failed, serving fixtures");
                Sourced::fixture(fixtures::members())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    async fn news_snapshot(&self) -> Result<NewsSnapshot> {
        let endpoint = self.api.news_endpoint()?;
        let posts: Vec<RawPost> = self.fetch_collection(&endpoint).await?;

        let announcements = normalize::rank_announcements(posts);
        let categories = normalize::derive_categories(&announcements);

        Ok(NewsSnapshot {
            announcements,
            categories,
        })
    }

    async fn member_roster(&self) -> Result<Vec<Member>> {
        let endpoint = self.api.members_endpoint()?;
        let raw: Vec<RawMember> = self.fetch_collection(&endpoint).await?;

        let mut members: Vec<Member> = raw.iter().map(normalize::normalize_member).collect();
        members.sort_by_key(|m| m.display_order);

        Ok(members)
    }

    /// Issue one bounded-time collection read. `per_page` is a pagination
    /// hint sized to cover the whole collection in a single call; `_embed`
    /// asks the CMS to inline related resources (featured media).
    async fn fetch_collection<T: DeserializeOwned>(&self, endpoint: &Url) -> Result<Vec<T>> {
        let url = format!("{endpoint}?per_page={}&_embed", self.options.per_page);
        debug!(%url, "fetching collection");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BulletinError::Network(format!("{endpoint}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BulletinError::Network(format!("{endpoint}: HTTP {status}")));
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| BulletinError::parse(format!("{endpoint}: {e}")))
    }
}
