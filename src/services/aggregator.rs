use crate::constants::{MIN_SEARCH_RADIUS_METERS, RADIUS_GROWTH_FACTOR};
use crate::error::{AppError, Result};
use crate::models::{DistanceKm, DistanceMeters, RankedResult, SearchRequest};
use crate::services::provider::{PlaceCandidate, PlaceSearchProvider};
use std::collections::HashSet;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

/// Produces a deterministic, distance-ranked, deduplicated list of places
/// near a point for a keyword, tolerating sparse provider responses by
/// retrying with a doubled radius until enough unique results accumulate
/// or the radius ceiling is passed.
pub struct NearbySearchAggregator {
    provider: Arc<dyn PlaceSearchProvider>,
    /// Generation counter tagging each search. A search that discovers a
    /// newer generation after a provider round-trip abandons its results.
    generation: AtomicU64,
}

impl NearbySearchAggregator {
    pub fn new(provider: Arc<dyn PlaceSearchProvider>) -> Self {
        NearbySearchAggregator {
            provider,
            generation: AtomicU64::new(0),
        }
    }

    /// Run one nearby search.
    ///
    /// Suspends only at provider round-trips. A provider failure aborts the
    /// whole search with no partial results; running out of radius before
    /// reaching `min_count` is success with a shorter list. Starting a new
    /// search supersedes any search still in flight on this aggregator: the
    /// superseded call returns [`AppError::StaleSearch`], which callers
    /// drop silently instead of surfacing.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<RankedResult>> {
        request
            .validate()
            .map_err(AppError::InvalidRequest)?;

        let token = self
            .generation
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
            + 1;

        let mut collected: Vec<PlaceCandidate> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut radius = DistanceMeters::from_raw(
            request.initial_radius.as_meters().max(MIN_SEARCH_RADIUS_METERS),
        );

        while collected.len() < request.min_count && radius <= request.max_radius {
            // Bounding region side, matching how map views express a span
            let span = radius * 2.0;

            let batch = self
                .provider
                .query(&request.keyword, &request.center, span)
                .await?;

            if self.is_superseded(token) {
                tracing::debug!(
                    "Search '{}' superseded mid-flight, discarding {} candidates",
                    request.keyword,
                    batch.len()
                );
                return Err(AppError::StaleSearch);
            }

            let batch_len = batch.len();
            for candidate in batch {
                if seen.insert(candidate.dedup_key()) {
                    collected.push(candidate);
                }
            }

            tracing::debug!(
                "Keyword '{}' at radius {}: {} hits, {} unique so far",
                request.keyword,
                radius,
                batch_len,
                collected.len()
            );

            radius = radius * RADIUS_GROWTH_FACTOR;
        }

        let total_unique = collected.len();
        let center = request.center;

        let mut ranked: Vec<RankedResult> = collected
            .into_iter()
            .map(|candidate| {
                let distance =
                    DistanceKm::from_raw(center.distance_to(&candidate.coordinates)).to_meters();
                RankedResult {
                    place: candidate.into(),
                    distance,
                }
            })
            .collect();

        // Stable sort: equidistant places keep their discovery order
        ranked.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(request.min_count);

        tracing::info!(
            "Search '{}' returning {} of {} unique results",
            request.keyword,
            ranked.len(),
            total_unique
        );

        Ok(ranked)
    }

    fn is_superseded(&self, token: u64) -> bool {
        self.generation.load(std::sync::atomic::Ordering::SeqCst) != token
    }
}
