use crate::types::{CapacitySample, DerivedMetrics, TableSnapshot};

/// Days of consumed-capacity telemetry that feed the daily averages.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 14;

/// One write-capacity unit covers a write of up to 1 KiB.
const BYTES_PER_WRITE_UNIT: f64 = 1024.0;

/// Derives storage-growth metrics for one table from its current
/// size/item-count snapshot and a window of hourly consumed
/// write-capacity samples.
///
/// The estimate inverts the capacity pricing rule: one write unit
/// persists up to 1 KiB, so writing an item of the table's average size
/// costs `ceil(avg_item_size / 1KiB)` units. Dividing the daily unit
/// consumption by that cost approximates item-writes per day, and
/// multiplying by the average item size converts it to bytes changed
/// per day. Every consumed unit is assumed to be a full-item overwrite
/// of average size.
///
/// All divisions are guarded; the function is total over non-negative
/// finite inputs and never panics. When the series is non-empty the sum
/// is divided by `lookback_days` even if the samples cover fewer days,
/// which understates the average for young tables; that matches the
/// historical behavior of this report and is kept as-is.
pub fn derive(
    snapshot: &TableSnapshot,
    series: &[CapacitySample],
    lookback_days: u32,
) -> DerivedMetrics {
    let size_bytes = snapshot.size_bytes as f64;

    let avg_item_size_bytes = if snapshot.item_count > 0 {
        size_bytes / snapshot.item_count as f64
    } else {
        0.0
    };

    // A zero-day window has no meaningful daily average; treat it like
    // an empty series rather than dividing by zero.
    let avg_daily_write_units = if series.is_empty() || lookback_days == 0 {
        0.0
    } else {
        let total_units: f64 = series.iter().map(|sample| sample.consumed_units).sum();
        total_units / f64::from(lookback_days)
    };

    // Capacity is billed in whole 1 KiB increments; an item of unknown
    // or zero average size still costs the minimum of one unit.
    let units_per_item = if avg_item_size_bytes > 0.0 {
        (avg_item_size_bytes / BYTES_PER_WRITE_UNIT).ceil()
    } else {
        1.0
    };

    let avg_daily_change_bytes = avg_daily_write_units * avg_item_size_bytes / units_per_item;

    let avg_daily_change_rate = if snapshot.size_bytes > 0 {
        avg_daily_change_bytes / size_bytes
    } else {
        0.0
    };

    DerivedMetrics {
        table_name: snapshot.name.clone(),
        size_bytes: snapshot.size_bytes,
        item_count: snapshot.item_count,
        avg_item_size_bytes,
        avg_daily_write_units,
        avg_daily_change_rate_percent: format!("{:.2}%", avg_daily_change_rate * 100.0),
        avg_daily_change_bytes,
        avg_daily_change_rate,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{derive, DEFAULT_LOOKBACK_DAYS};
    use crate::types::{CapacitySample, TableSnapshot};

    fn snapshot(size_bytes: u64, item_count: u64) -> TableSnapshot {
        TableSnapshot {
            name: "orders".to_string(),
            size_bytes,
            item_count,
        }
    }

    fn hourly_samples(units: &[f64]) -> Vec<CapacitySample> {
        let start = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
        units
            .iter()
            .enumerate()
            .map(|(i, &consumed_units)| CapacitySample {
                timestamp: start + Duration::hours(i as i64),
                consumed_units,
            })
            .collect()
    }

    #[test]
    fn one_mib_table_with_steady_writes() {
        // 1 MiB over 1024 items -> exactly 1 KiB per item, one write
        // unit per item-write. 1960 units over the window is 140/day.
        let series = hourly_samples(&[140.0; 14]);
        let metrics = derive(&snapshot(1_048_576, 1024), &series, DEFAULT_LOOKBACK_DAYS);

        assert_eq!(metrics.avg_item_size_bytes, 1024.0);
        assert_eq!(metrics.avg_daily_write_units, 140.0);
        assert_eq!(metrics.avg_daily_change_bytes, 143_360.0);
        assert_eq!(metrics.avg_daily_change_rate_percent, "13.67%");
    }

    #[test]
    fn empty_table_with_empty_series_yields_all_zeros() {
        let metrics = derive(&snapshot(0, 0), &[], DEFAULT_LOOKBACK_DAYS);

        assert_eq!(metrics.avg_item_size_bytes, 0.0);
        assert_eq!(metrics.avg_daily_write_units, 0.0);
        assert_eq!(metrics.avg_daily_change_bytes, 0.0);
        assert_eq!(metrics.avg_daily_change_rate, 0.0);
        assert_eq!(metrics.avg_daily_change_rate_percent, "0.00%");
    }

    #[test]
    fn zero_item_count_never_divides() {
        let metrics = derive(&snapshot(4096, 0), &hourly_samples(&[10.0]), 14);
        assert_eq!(metrics.avg_item_size_bytes, 0.0);
        // Zero average size with live telemetry: minimum one unit per
        // item, so the byte estimate collapses to zero.
        assert_eq!(metrics.avg_daily_change_bytes, 0.0);
    }

    #[test]
    fn zero_size_table_reports_zero_rate_despite_telemetry() {
        let metrics = derive(&snapshot(0, 0), &hourly_samples(&[500.0, 500.0]), 14);
        assert!(metrics.avg_daily_write_units > 0.0);
        assert_eq!(metrics.avg_daily_change_rate_percent, "0.00%");
    }

    #[test]
    fn empty_series_yields_zero_rate_regardless_of_size() {
        let metrics = derive(&snapshot(10_000_000, 500), &[], 14);
        assert_eq!(metrics.avg_daily_write_units, 0.0);
        assert_eq!(metrics.avg_daily_change_bytes, 0.0);
        assert_eq!(metrics.avg_daily_change_rate_percent, "0.00%");
    }

    #[test]
    fn lookback_divisor_applies_even_to_short_series() {
        // Two hours of data are still averaged over the full window.
        let metrics = derive(&snapshot(1_048_576, 1024), &hourly_samples(&[7.0, 7.0]), 14);
        assert_eq!(metrics.avg_daily_write_units, 1.0);
    }

    #[test]
    fn zero_lookback_days_yields_finite_zeros() {
        let metrics = derive(&snapshot(1_048_576, 1024), &hourly_samples(&[140.0; 14]), 0);
        assert!(metrics.avg_daily_write_units.is_finite());
        assert_eq!(metrics.avg_daily_write_units, 0.0);
        assert_eq!(metrics.avg_daily_change_bytes, 0.0);
        assert_eq!(metrics.avg_daily_change_rate_percent, "0.00%");
    }

    #[test]
    fn items_larger_than_one_kib_cost_multiple_units() {
        // 3000-byte average item -> ceil(3000/1024) = 3 units per write.
        let series = hourly_samples(&[42.0; 14]);
        let metrics = derive(&snapshot(3_000_000, 1000), &series, 14);

        assert_eq!(metrics.avg_item_size_bytes, 3000.0);
        assert_eq!(metrics.avg_daily_write_units, 42.0);
        assert_eq!(metrics.avg_daily_change_bytes, 42.0 * 3000.0 / 3.0);
    }

    #[test]
    fn change_bytes_is_monotone_in_consumed_units() {
        let base = snapshot(50_000_000, 20_000);
        let mut previous = f64::NEG_INFINITY;
        for daily_units in [0.0, 1.0, 50.0, 1000.0, 123_456.0] {
            let series = hourly_samples(&[daily_units; 14]);
            let metrics = derive(&base, &series, 14);
            assert!(
                metrics.avg_daily_change_bytes >= previous,
                "change bytes decreased at {daily_units} units/day"
            );
            previous = metrics.avg_daily_change_bytes;
        }
    }

    #[test]
    fn rate_is_always_two_decimals_with_percent_suffix() {
        for (size, count, units) in [
            (0u64, 0u64, vec![]),
            (1_048_576, 1024, vec![140.0; 14]),
            (999, 3, vec![0.25]),
            (123_456_789, 1, vec![10_000.0; 24]),
        ] {
            let series = hourly_samples(&units);
            let metrics = derive(&snapshot(size, count), &series, 14);
            let rate = &metrics.avg_daily_change_rate_percent;

            let digits = rate.strip_suffix('%').expect("percent suffix");
            let (whole, frac) = digits.split_once('.').expect("decimal point");
            assert!(!whole.is_empty() && whole.chars().all(|c| c.is_ascii_digit()));
            assert_eq!(frac.len(), 2);
            assert!(frac.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn derive_is_deterministic() {
        let snap = snapshot(2_097_152, 4096);
        let series = hourly_samples(&[3.5; 48]);
        assert_eq!(derive(&snap, &series, 14), derive(&snap, &series, 14));
    }

    #[test]
    fn passes_size_and_count_through_unchanged() {
        let metrics = derive(&snapshot(777, 3), &[], 14);
        assert_eq!(metrics.table_name, "orders");
        assert_eq!(metrics.size_bytes, 777);
        assert_eq!(metrics.item_count, 3);
    }
}
