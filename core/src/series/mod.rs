//! Chart series built from per-player bucket arrays
//!
//! Raw arrays hold one value per bucket: damage dealt during the bucket for
//! the damage chart, the sampled gauge (0-1000) for the gauge chart. Missing
//! arrays, missing indices and non-finite values all read as 0.

use std::collections::{BTreeMap, BTreeSet};

use relink_types::formatting::format_elapsed;
use relink_types::{DamageSeriesPoint, GaugeSeriesPoint, MeterSettings};

/// Gauge samples are taken once per second.
const GAUGE_BUCKET_MS: i64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesConfig {
    /// Bucket width of the damage chart in seconds
    pub interval_secs: u32,
    /// Buckets averaged per point, the current one included
    pub smoothing_window: usize,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            interval_secs: 3,
            smoothing_window: 6,
        }
    }
}

impl SeriesConfig {
    pub fn from_settings(settings: &MeterSettings) -> Self {
        Self {
            interval_secs: settings.dps_interval_secs,
            smoothing_window: settings.smoothing_window,
        }
    }
}

fn sample(raw: Option<&Vec<f64>>, index: usize) -> f64 {
    raw.and_then(|values| values.get(index))
        .copied()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn player_set(raw: &BTreeMap<u32, Vec<f64>>, player_ids: &[u32]) -> BTreeSet<u32> {
    raw.keys().chain(player_ids.iter()).copied().collect()
}

/// Smoothed damage-per-second series, one point per bucket.
///
/// Each player's value at bucket `i` is the mean of buckets
/// `i - window + 1 ..= i` (fewer at the start of the encounter) divided by
/// the bucket width, rounded. `party` is the sum of the rounded player values.
pub fn build_damage_series(
    raw: &BTreeMap<u32, Vec<f64>>,
    player_ids: &[u32],
    chart_len: usize,
    config: &SeriesConfig,
) -> Vec<DamageSeriesPoint> {
    let ids = player_set(raw, player_ids);
    let window = config.smoothing_window.max(1);
    let interval = f64::from(config.interval_secs);

    (0..chart_len)
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let count = (i - start + 1) as f64;

            let players: BTreeMap<u32, i64> = ids
                .iter()
                .map(|&id| {
                    let values = raw.get(&id);
                    let sum: f64 = (start..=i).map(|j| sample(values, j)).sum();
                    let rate = if interval > 0.0 {
                        (sum / count / interval).round() as i64
                    } else {
                        0
                    };
                    (id, rate)
                })
                .collect();

            let timestamp_ms = i as i64 * i64::from(config.interval_secs) * 1_000;
            DamageSeriesPoint {
                timestamp_ms,
                timestamp: format_elapsed(timestamp_ms),
                party: players.values().sum(),
                players,
            }
        })
        .collect()
}

/// Gauge percentage series, one point per second. No smoothing.
pub fn build_gauge_series(
    raw: &BTreeMap<u32, Vec<f64>>,
    player_ids: &[u32],
    sba_chart_len: usize,
) -> Vec<GaugeSeriesPoint> {
    let ids = player_set(raw, player_ids);

    (0..sba_chart_len)
        .map(|i| {
            let timestamp_ms = i as i64 * GAUGE_BUCKET_MS;
            GaugeSeriesPoint {
                timestamp_ms,
                timestamp: format_elapsed(timestamp_ms),
                players: ids
                    .iter()
                    .map(|&id| (id, sample(raw.get(&id), i) / 10.0))
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(entries: &[(u32, &[f64])]) -> BTreeMap<u32, Vec<f64>> {
        entries.iter().map(|(id, v)| (*id, v.to_vec())).collect()
    }

    #[test]
    fn series_length_matches_chart_len() {
        let data = raw(&[(1, &[1.0, 2.0, 3.0])]);
        let config = SeriesConfig::default();

        assert_eq!(build_damage_series(&data, &[1], 0, &config).len(), 0);
        assert_eq!(build_damage_series(&data, &[1], 3, &config).len(), 3);
        assert_eq!(build_damage_series(&data, &[1], 10, &config).len(), 10);
        assert_eq!(build_gauge_series(&data, &[1], 0).len(), 0);
        assert_eq!(build_gauge_series(&data, &[1], 4).len(), 4);
    }

    #[test]
    fn smoothing_window_is_configurable() {
        let data = raw(&[(1, &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0])]);

        let five = SeriesConfig {
            interval_secs: 5,
            smoothing_window: 5,
        };
        let series = build_damage_series(&data, &[1], 6, &five);
        assert_eq!(series[5].players[&1], 8);

        let default_window = SeriesConfig {
            interval_secs: 5,
            ..SeriesConfig::default()
        };
        let series = build_damage_series(&data, &[1], 6, &default_window);
        assert_eq!(series[5].players[&1], 7);
    }

    #[test]
    fn window_shrinks_at_encounter_start() {
        let data = raw(&[(1, &[30.0, 90.0])]);
        let config = SeriesConfig {
            interval_secs: 3,
            smoothing_window: 6,
        };

        let series = build_damage_series(&data, &[1], 2, &config);
        assert_eq!(series[0].players[&1], 10);
        assert_eq!(series[1].players[&1], 20);
    }

    #[test]
    fn party_is_sum_of_players() {
        let data = raw(&[(1, &[30.0, 60.0, 90.0]), (2, &[3.0, 3.0, 3.0])]);
        let series = build_damage_series(&data, &[1, 2], 3, &SeriesConfig::default());

        for point in &series {
            assert_eq!(point.party, point.players.values().sum::<i64>());
        }
        assert_eq!(series[0].party, 11);
    }

    #[test]
    fn timestamps_use_interval() {
        let series = build_damage_series(&BTreeMap::new(), &[], 25, &SeriesConfig::default());
        assert_eq!(series[1].timestamp_ms, 3_000);
        assert_eq!(series[20].timestamp, "01:00");
        assert_eq!(series[24].timestamp, "01:12");
    }

    #[test]
    fn missing_data_reads_as_zero() {
        let data = raw(&[(1, &[f64::NAN, 9.0])]);
        let series = build_damage_series(&data, &[1, 7], 4, &SeriesConfig::default());

        assert_eq!(series[0].players[&1], 0);
        assert_eq!(series[3].players[&1], 1);
        assert!(series.iter().all(|p| p.players[&7] == 0));
    }

    #[test]
    fn zero_interval_and_window_do_not_panic() {
        let data = raw(&[(1, &[10.0])]);
        let config = SeriesConfig {
            interval_secs: 0,
            smoothing_window: 0,
        };
        let series = build_damage_series(&data, &[1], 1, &config);
        assert_eq!(series[0].players[&1], 0);
        assert_eq!(series[0].timestamp_ms, 0);
    }

    #[test]
    fn gauge_is_scaled_to_percent() {
        let data = raw(&[(1, &[0.0, 500.0, 1000.0])]);
        let series = build_gauge_series(&data, &[1, 2], 4);

        assert_eq!(series[1].players[&1], 50.0);
        assert_eq!(series[2].players[&1], 100.0);
        assert_eq!(series[3].players[&1], 0.0);
        assert_eq!(series[2].players[&2], 0.0);
        assert_eq!(series[2].timestamp, "00:02");
    }
}
