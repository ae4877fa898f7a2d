//! Randomized gap/reach generator
//!
//! Produces the vertical gap and horizontal position of the next platform.
//! Positions are whole pixels; every draw comes from a window that is
//! clamped before sampling, so no draw can fail.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::tuning::Tuning;

/// Seeded source of platform placements
#[derive(Debug, Clone)]
pub struct PlatformGenerator {
    rng: Pcg32,
    gap_min: i32,
    gap_max: i32,
    reach_min: i32,
    reach_max: i32,
    /// Leftmost legal platform x
    min_x: i32,
    /// Rightmost legal platform x
    max_x: i32,
    attempts: u32,
}

impl PlatformGenerator {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let min_x = tuning.margin_left;
        let right_edge = (tuning.field_width - tuning.platform_width).floor() as i32 - tuning.margin_right;
        // Margins wider than the field collapse the window onto its left bound
        let max_x = right_edge.max(min_x);

        let gap_min = tuning.gap_min.max(1);
        Self {
            rng: Pcg32::seed_from_u64(seed),
            gap_min,
            gap_max: tuning.gap_max.max(gap_min),
            reach_min: tuning.reach_min.max(0),
            reach_max: tuning.reach_max.max(tuning.reach_min).max(0),
            min_x,
            max_x,
            attempts: tuning.reach_attempts.max(1),
        }
    }

    /// Legal platform x range, inclusive
    pub fn x_bounds(&self) -> (i32, i32) {
        (self.min_x, self.max_x)
    }

    /// Uniform vertical gap in `[gap_min, gap_max]`
    pub fn next_gap(&mut self) -> i32 {
        self.rng.random_range(self.gap_min..=self.gap_max)
    }

    /// Horizontal position reachable from `prev_x`
    ///
    /// The result stays inside the field and, whenever the field is at least
    /// `2 * reach_min` wide, satisfies `reach_min <= |x - prev_x| <= reach_max`.
    /// Narrower fields shrink the reach bounds to what fits.
    pub fn next_reachable_x(&mut self, prev_x: i32) -> i32 {
        let prev = prev_x.clamp(self.min_x, self.max_x);
        let span = self.max_x - self.min_x;
        let reach_max = self.reach_max.min(span);
        let reach_min = self.reach_min.min(reach_max).min(span / 2);

        let mut lo = (prev - reach_max).max(self.min_x);
        let mut hi = (prev + reach_max).min(self.max_x);
        // A side that cannot honour the minimum reach is dropped from the window
        if prev - reach_min < self.min_x {
            lo = lo.max(prev + reach_min);
        }
        if prev + reach_min > self.max_x {
            hi = hi.min(prev - reach_min);
        }
        debug_assert!(lo <= hi, "empty reach window [{lo}, {hi}] from {prev}");
        if lo > hi {
            return prev;
        }

        let mut best = prev;
        for _ in 0..self.attempts {
            let x = self.rng.random_range(lo..=hi);
            if (x - prev).abs() >= reach_min {
                return x;
            }
            if (x - prev).abs() > (best - prev).abs() {
                best = x;
            }
        }

        // Push the best draw out of the dead zone onto the nearest legal edge
        let right = prev + reach_min;
        let left = prev - reach_min;
        let right_ok = right <= hi;
        let left_ok = left >= lo;
        match (left_ok, right_ok) {
            (true, true) if best >= prev => right,
            (true, true) => left,
            (false, true) => right,
            (true, false) => left,
            (false, false) => best,
        }
    }
}
