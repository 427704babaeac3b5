//! Identity resolution.
//!
//! Three inputs compete to say what a page shows: the `#home` hash, the
//! dataset the server embedded in the page, and the URL path. The hash is a
//! short-circuit; the other two feed an ordered chain of [`IdentitySource`]s
//! where, field by field, the first source with a value wins.

mod sources;

pub use sources::{IdentitySource, PathSegments};

use series_model::{
    ContentIdentity, EmbeddedDataset, HOME_HASH, ROUTE_SENTINEL, Resolution,
    RouteContext,
};
use tracing::debug;

/// `true` iff the hash is exactly `#home` and the first path segment is the
/// route sentinel.
pub fn is_home_route(route: &RouteContext) -> bool {
    route.hash == HOME_HASH && route.first_segment() == Some(ROUTE_SENTINEL)
}

/// Resolve the page's content identity.
///
/// Query parameters are never consulted for season or episode.
pub fn resolve(
    route: &RouteContext,
    dataset: Option<&EmbeddedDataset>,
) -> Resolution {
    if is_home_route(route) {
        debug!("home route selected; no detail content");
        return Resolution::Home;
    }

    let path = PathSegments::from_route(route);

    let mut chain: Vec<&dyn IdentitySource> = Vec::with_capacity(2);
    if let Some(dataset) = dataset {
        chain.push(dataset);
    }
    if let Some(path) = path.as_ref() {
        chain.push(path);
    }

    let identity = merge(&chain);
    debug!(
        identity = %identity,
        has_dataset = dataset.is_some(),
        "resolved content identity"
    );
    Resolution::Content(identity)
}

/// Merge sources in priority order; each field keeps the first non-null
/// value offered.
pub fn merge(sources: &[&dyn IdentitySource]) -> ContentIdentity {
    fn first<T>(
        sources: &[&dyn IdentitySource],
        pick: impl Fn(&dyn IdentitySource) -> Option<T>,
    ) -> Option<T> {
        sources.iter().find_map(|source| pick(*source))
    }

    ContentIdentity {
        media_type: first(sources, |s| s.media_type()),
        media_id: first(sources, |s| s.media_id()),
        season: first(sources, |s| s.season()),
        episode: first(sources, |s| s.episode()),
        episode_type: first(sources, |s| s.episode_type()),
    }
}
