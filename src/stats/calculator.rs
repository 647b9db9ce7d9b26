//! Statistics Calculator Module
//! Descriptive statistics and the synthetic-year projection.

use crate::stats::DayAverage;
use rand::Rng;
use statrs::distribution::Normal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("cannot compute statistics over an empty sample")]
    EmptySample,
    #[error("invalid normal distribution (mean {mean}, std dev {std_dev})")]
    InvalidDistribution { mean: f64, std_dev: f64 },
}

/// Mean and spread of a series of daily averages.
#[derive(Debug, Clone, Copy)]
pub struct Descriptive {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

/// Handles statistical calculations over aggregated daily series.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Mean and population standard deviation (divisor n) of `values`.
    /// An empty slice is an error, never a silent zero.
    pub fn descriptive(values: &[f64]) -> Result<Descriptive, StatsError> {
        if values.is_empty() {
            return Err(StatsError::EmptySample);
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Ok(Descriptive {
            count: values.len(),
            mean,
            std_dev: variance.sqrt(),
        })
    }

    /// Draw `count` samples from a normal distribution fitted to `stats`.
    ///
    /// This is a display-only projection of a hypothetical following year;
    /// it is never validated against real data. A zero spread collapses to
    /// a constant sample.
    pub fn project_normal_sample(
        stats: &Descriptive,
        count: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<f64>, StatsError> {
        if stats.std_dev == 0.0 {
            return Ok(vec![stats.mean; count]);
        }

        let normal = Normal::new(stats.mean, stats.std_dev).map_err(|_| {
            StatsError::InvalidDistribution {
                mean: stats.mean,
                std_dev: stats.std_dev,
            }
        })?;

        Ok((0..count).map(|_| rng.sample(normal)).collect())
    }

    /// Count `values` into unit-width bins `[e, e + 1)` for `e` in
    /// `lo..hi`. The final bin also takes values equal to `hi`; values
    /// outside the range are dropped.
    pub fn histogram(values: &[f64], lo: i32, hi: i32) -> Vec<(i32, usize)> {
        let mut bins: Vec<(i32, usize)> = (lo..hi).map(|edge| (edge, 0)).collect();
        if bins.is_empty() {
            return bins;
        }

        for &value in values {
            if value < lo as f64 || value > hi as f64 {
                continue;
            }
            let idx = ((value.floor() as i32) - lo).min(hi - lo - 1) as usize;
            bins[idx].1 += 1;
        }

        bins
    }

    /// Split daily precipitation averages into rainy (nonzero mean) and dry
    /// day counts.
    pub fn rain_counts(days: &[DayAverage]) -> (usize, usize) {
        let rainy = days.iter().filter(|d| d.value != 0.0).count();
        (rainy, days.len() - rainy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn descriptive_uses_population_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

        let stats = StatsCalculator::descriptive(&values).unwrap();
        assert_eq!(stats.count, 8);
        assert_close(stats.mean, 5.0);
        assert_close(stats.std_dev, 2.0);
    }

    #[test]
    fn descriptive_of_empty_sample_is_an_error() {
        assert!(matches!(
            StatsCalculator::descriptive(&[]),
            Err(StatsError::EmptySample)
        ));
    }

    #[test]
    fn projection_has_the_requested_length() {
        let stats = Descriptive {
            count: 28,
            mean: 10.0,
            std_dev: 2.0,
        };
        let mut rng = StdRng::seed_from_u64(7);

        let sample = StatsCalculator::project_normal_sample(&stats, 28, &mut rng).unwrap();
        assert_eq!(sample.len(), 28);
        // Six sigma around the mean is loose enough to hold for any seed.
        assert!(sample.iter().all(|v| (v - 10.0).abs() < 12.0));
    }

    #[test]
    fn projection_with_zero_spread_is_constant() {
        let stats = Descriptive {
            count: 28,
            mean: 3.5,
            std_dev: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(7);

        let sample = StatsCalculator::project_normal_sample(&stats, 5, &mut rng).unwrap();
        assert_eq!(sample, vec![3.5; 5]);
    }

    #[test]
    fn histogram_bins_match_unit_edges() {
        // Edges 8..=12: bins [8,9) [9,10) [10,11) [11,12], right-inclusive.
        let values = [8.0, 8.9, 9.0, 11.5, 12.0, 7.9, 12.1];

        let bins = StatsCalculator::histogram(&values, 8, 12);
        assert_eq!(bins, vec![(8, 2), (9, 1), (10, 0), (11, 3)]);
    }

    #[test]
    fn histogram_with_empty_range_is_empty() {
        assert!(StatsCalculator::histogram(&[1.0], 5, 5).is_empty());
    }

    #[test]
    fn rain_counts_split_rainy_and_dry_days() {
        let days = [
            DayAverage { day: 1, value: 0.0 },
            DayAverage { day: 2, value: 0.0 },
            DayAverage { day: 3, value: 2.5 },
            DayAverage { day: 4, value: 0.0 },
        ];

        assert_eq!(StatsCalculator::rain_counts(&days), (1, 3));
    }

    #[test]
    fn rain_counts_of_empty_series_are_zero() {
        assert_eq!(StatsCalculator::rain_counts(&[]), (0, 0));
    }
}
