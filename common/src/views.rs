//! Approximate per-day view counts for a listing's analytics chart.
//!
//! The listings API only reports a lifetime view total. Until a real per-day
//! series exists, the dealer dashboard spreads that total over recent days with
//! a decaying curve. The jitter is derived from the listing id so the chart
//! looks the same on every refresh.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Longest window a chart may request.
pub const MAX_DISTRIBUTION_DAYS: u32 = 365;

/// Fixed-point scale for weights, so allocation is exact integer math.
const WEIGHT_SCALE: f64 = 1_000_000.0;

/// Views attributed to one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyViews {
    pub date: NaiveDate,
    pub views: u64,
}

/// Source of per-day view counts for a listing.
pub trait ViewDistribution {
    /// Daily counts for the `days` days ending at `today`, oldest first.
    /// The counts sum to `total_views`; the window is cut short rather than
    /// reaching before the earliest representable date.
    fn distribute(
        &self,
        listing_id: &str,
        total_views: u64,
        days: u32,
        today: NaiveDate,
    ) -> Vec<DailyViews>;
}

/// Exponential decay with per-listing jitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayViewDistribution {
    /// Decay rate per day of age.
    pub decay: f64,
}

impl Default for DecayViewDistribution {
    fn default() -> Self {
        DecayViewDistribution { decay: 0.15 }
    }
}

impl DecayViewDistribution {
    /// Relative weight of the day `age` days before today, scaled to an integer.
    fn weight(&self, digest: &[u8], age: u32) -> u64 {
        let idx = age as usize % digest.len();
        let round = (age as usize / digest.len()) as u8;
        let byte = digest[idx].wrapping_add(round.wrapping_mul(31));
        let jitter = 0.75 + f64::from(byte) / 256.0 * 0.5;
        let decayed = (-self.decay.max(0.0) * f64::from(age)).exp();
        (decayed * jitter * WEIGHT_SCALE).round() as u64
    }
}

impl ViewDistribution for DecayViewDistribution {
    fn distribute(
        &self,
        listing_id: &str,
        total_views: u64,
        days: u32,
        today: NaiveDate,
    ) -> Vec<DailyViews> {
        // index = age, 0 is today; the window stops at the earliest representable date
        let dates: Vec<NaiveDate> = (0..days.min(MAX_DISTRIBUTION_DAYS))
            .map_while(|age| today.checked_sub_days(Days::new(u64::from(age))))
            .collect();
        let days = dates.len() as u32;
        if days == 0 {
            return Vec::new();
        }

        let digest = Sha256::digest(listing_id.as_bytes());
        let weights: Vec<u64> = (0..days).map(|age| self.weight(&digest, age)).collect();
        let weight_sum: u128 = weights.iter().map(|&w| u128::from(w)).sum::<u128>().max(1);

        let total = u128::from(total_views);
        let mut views: Vec<u64> = Vec::with_capacity(weights.len());
        let mut remainders: Vec<(u128, u32)> = Vec::with_capacity(weights.len());
        for (age, &w) in weights.iter().enumerate() {
            let share = total * u128::from(w);
            views.push((share / weight_sum) as u64);
            remainders.push((share % weight_sum, age as u32));
        }

        let allocated: u64 = views.iter().sum();
        let leftover = total_views.saturating_sub(allocated) as usize;
        // largest remainder first, newer day on ties
        remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        for &(_, age) in remainders.iter().take(leftover) {
            views[age as usize] += 1;
        }

        dates
            .into_iter()
            .zip(views)
            .rev()
            .map(|(date, views)| DailyViews { date, views })
            .collect()
    }
}
