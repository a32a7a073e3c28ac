//! Per-region observation counts.

use std::collections::BTreeMap;

use futures::future::join_all;
use tracing::{info, warn};

use crate::models::{Region, RegionStat, RegionStats};
use crate::upstream::{ObservationQuery, ObservationSource};

/// Count research-grade native plant observations in every region.
///
/// One minimal unordered fetch (`per_page=1`) per region, issued
/// concurrently; only `total_results` is read. A region whose fetch fails is left out of the
/// result and out of the total.
pub async fn aggregate_region_stats(source: &dyn ObservationSource) -> RegionStats {
    let fetches = Region::ALL.into_iter().map(|region| async move {
        let query = ObservationQuery::builder(region)
            .per_page(1)
            .unordered()
            .build();
        (region, source.fetch(&query).await)
    });

    let mut regions = BTreeMap::new();
    for (region, outcome) in join_all(fetches).await {
        match outcome {
            Ok(batch) => {
                regions.insert(
                    region,
                    RegionStat {
                        total_observations: batch.total_results,
                        place_id: region.place_id(),
                    },
                );
            }
            Err(e) => warn!(region = %region, "Omitting region from statistics: {}", e),
        }
    }

    let stats = RegionStats::from_regions(regions);
    info!(
        regions = stats.regions.len(),
        total = stats.total_pnw,
        "Region statistics aggregated"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawObservationBatch;
    use crate::upstream::{FetchError, StaticSource};

    fn counted(total: u64) -> RawObservationBatch {
        RawObservationBatch::new(total, vec![])
    }

    #[tokio::test]
    async fn test_all_regions_succeed() {
        let source = StaticSource::new()
            .with_batch(Region::Washington, counted(100))
            .with_batch(Region::Oregon, counted(50))
            .with_batch(Region::Idaho, counted(20))
            .with_batch(Region::California, counted(5));

        let stats = aggregate_region_stats(&source).await;

        assert_eq!(stats.regions.len(), 4);
        assert_eq!(stats.total_pnw, 175);
        assert_eq!(
            stats.regions[&Region::Oregon],
            RegionStat {
                total_observations: 50,
                place_id: 41
            }
        );
    }

    #[tokio::test]
    async fn test_failed_region_is_omitted() {
        let source = StaticSource::new()
            .with_batch(Region::Washington, counted(100))
            .with_failure(Region::Oregon, FetchError::unavailable("timed out"))
            .with_batch(Region::Idaho, counted(20))
            .with_batch(Region::California, counted(5));

        let stats = aggregate_region_stats(&source).await;

        assert_eq!(stats.regions.len(), 3);
        assert!(!stats.regions.contains_key(&Region::Oregon));
        assert_eq!(stats.total_pnw, 125);
    }

    #[tokio::test]
    async fn test_queries_are_minimal() {
        let source = StaticSource::new();
        let _ = aggregate_region_stats(&source).await;

        let queries = source.queries();
        assert_eq!(queries.len(), 4);
        assert!(queries.iter().all(|q| q.per_page == 1));
        assert!(queries.iter().all(|q| q.order.is_none() && q.order_by.is_none()));

        let mut place_ids: Vec<u32> = queries.iter().map(|q| q.place_id).collect();
        place_ids.sort();
        assert_eq!(place_ids, vec![14, 41, 42, 43]);
    }

    #[test]
    fn test_stats_wire_shape() {
        let mut regions = BTreeMap::new();
        regions.insert(
            Region::Idaho,
            RegionStat {
                total_observations: 3,
                place_id: 42,
            },
        );
        regions.insert(
            Region::Washington,
            RegionStat {
                total_observations: 4,
                place_id: 14,
            },
        );
        let stats = RegionStats::from_regions(regions);

        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(
            json,
            r#"{"washington":{"total_observations":4,"place_id":14},"idaho":{"total_observations":3,"place_id":42},"total_pnw":7}"#
        );

        let decoded: RegionStats = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, stats);
    }
}
