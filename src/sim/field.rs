//! Platform field: spawn-ahead and recycling
//!
//! A finite set of platforms is reused for an endless climb. Platforms that
//! scroll below the field are dropped, and fresh ones are spawned above the
//! current top until the lookahead count is restored.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::generator::PlatformGenerator;
use crate::tuning::Tuning;

/// A surface the player bounces off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Never reused while the platform is alive
    pub id: u32,
    /// Top-left corner; `pos.y` is the landing surface
    pub pos: Vec2,
    pub size: Vec2,
}

impl Platform {
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }
}

/// Live platforms plus the spawn cursor
#[derive(Debug, Clone)]
pub struct PlatformField {
    platforms: Vec<Platform>,
    generator: PlatformGenerator,
    /// x of the most recently spawned platform
    last_spawn_x: i32,
    next_id: u32,
    size: Vec2,
    start_y: f32,
    field_width: f32,
    recycle_epsilon: f32,
    min_count: usize,
}

impl PlatformField {
    /// Build and seed a field from `tuning`
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let mut field = Self {
            platforms: Vec::new(),
            generator: PlatformGenerator::new(seed, tuning),
            last_spawn_x: 0,
            next_id: 0,
            size: Vec2::new(tuning.platform_width, tuning.platform_height),
            start_y: tuning.start_platform_y(),
            field_width: tuning.field_width,
            recycle_epsilon: tuning.recycle_epsilon,
            min_count: tuning.min_platform_count(),
        };
        field.initialize();
        field
    }

    fn make_platform(&mut self, x: i32, y: f32) -> Platform {
        let id = self.next_id;
        self.next_id += 1;
        Platform {
            id,
            pos: Vec2::new(x as f32, y),
            size: self.size,
        }
    }

    /// Clear and reseed: one centred start platform, then platforms upward
    /// until the next candidate would sit above the field top, then the
    /// lookahead buffer above that.
    pub fn initialize(&mut self) {
        self.platforms.clear();

        let start_x = ((self.field_width - self.size.x) / 2.0).floor() as i32;
        let (min_x, max_x) = self.generator.x_bounds();
        let start_x = start_x.clamp(min_x, max_x);
        let start = self.make_platform(start_x, self.start_y);
        self.platforms.push(start);
        self.last_spawn_x = start_x;

        let mut y = self.start_y - self.generator.next_gap() as f32;
        while y > -self.size.y {
            let x = self.generator.next_reachable_x(self.last_spawn_x);
            let platform = self.make_platform(x, y);
            self.platforms.push(platform);
            self.last_spawn_x = x;
            y -= self.generator.next_gap() as f32;
        }
        while self.platforms.len() < self.min_count {
            self.spawn_above_top();
        }

        log::debug!("Platform field seeded with {} platforms", self.platforms.len());
    }

    /// Smallest y (highest on screen), or `None` for an empty field
    pub fn topmost_y(&self) -> Option<f32> {
        self.platforms
            .iter()
            .map(|p| p.pos.y)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// The platform with the smallest y
    pub fn topmost(&self) -> Option<&Platform> {
        self.platforms.iter().min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    }

    /// Spawn one platform a generated gap above the current top
    ///
    /// An empty field cannot be extended and is re-initialized instead.
    pub fn spawn_above_top(&mut self) {
        let Some(top) = self.topmost_y() else {
            log::warn!("Platform field empty, re-initializing");
            self.initialize();
            return;
        };
        let y = top - self.generator.next_gap() as f32;
        let x = self.generator.next_reachable_x(self.last_spawn_x);
        let platform = self.make_platform(x, y);
        self.platforms.push(platform);
        self.last_spawn_x = x;
    }

    /// Drop platforms below the field and top the field back up
    ///
    /// Returns the number of platforms removed.
    pub fn recycle(&mut self, field_height: f32) -> usize {
        let before = self.platforms.len();
        let limit = field_height + self.recycle_epsilon;
        self.platforms.retain(|p| p.pos.y < limit);
        let removed = before - self.platforms.len();

        while self.platforms.len() < self.min_count {
            self.spawn_above_top();
        }
        removed
    }

    /// Move every platform down by `delta_y`
    pub fn shift(&mut self, delta_y: f32) {
        for platform in &mut self.platforms {
            platform.pos.y += delta_y;
        }
    }

    pub fn get(&self, index: usize) -> Option<&Platform> {
        self.platforms.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Platform> {
        self.platforms.iter()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Live count kept after every recycle
    pub fn min_count(&self) -> usize {
        self.min_count
    }

    pub fn last_spawn_x(&self) -> i32 {
        self.last_spawn_x
    }

    pub fn generator(&self) -> &PlatformGenerator {
        &self.generator
    }

    /// Insert a platform at an explicit position (fixtures and replays)
    pub fn push_at(&mut self, x: f32, y: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.platforms.push(Platform {
            id,
            pos: Vec2::new(x, y),
            size: self.size,
        });
        id
    }

    /// Remove every platform, leaving the field empty
    pub fn clear(&mut self) {
        self.platforms.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field(seed: u64) -> (PlatformField, Tuning) {
        let tuning = Tuning::default();
        (PlatformField::new(seed, &tuning), tuning)
    }

    #[test]
    fn test_initialize_layout() {
        let (field, tuning) = field(1);
        let start = field.get(0).unwrap();
        assert_eq!(start.pos, Vec2::new(98.0, 322.0));

        // Strictly rising in spawn order with gaps in range
        for pair in field.platforms.windows(2) {
            let gap = pair[0].pos.y - pair[1].pos.y;
            assert!(gap >= tuning.gap_min as f32 && gap <= tuning.gap_max as f32);
        }
        assert!(field.len() >= field.min_count());
        // Covers the whole visible field
        assert!(field.topmost_y().unwrap() <= 0.0);
    }

    #[test]
    fn test_ids_unique_and_increasing() {
        let (mut field, tuning) = field(2);
        field.shift(200.0);
        field.recycle(tuning.field_height);
        let ids: Vec<u32> = field.iter().map(|p| p.id).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_spawn_above_top() {
        let (mut field, tuning) = field(3);
        let top = field.topmost_y().unwrap();
        let count = field.len();
        field.spawn_above_top();
        assert_eq!(field.len(), count + 1);
        let new_top = field.topmost_y().unwrap();
        let gap = top - new_top;
        assert!(gap >= tuning.gap_min as f32 && gap <= tuning.gap_max as f32);
        assert_eq!(field.topmost().unwrap().pos.x as i32, field.last_spawn_x());
    }

    #[test]
    fn test_spawn_on_empty_field_reinitializes() {
        let (mut field, _) = field(4);
        field.clear();
        assert_eq!(field.topmost_y(), None);
        field.spawn_above_top();
        assert!(!field.is_empty());
        assert_eq!(field.get(0).unwrap().pos.y, 322.0);
    }

    #[test]
    fn test_recycle_drops_scrolled_platforms() {
        let (mut field, tuning) = field(5);
        field.shift(120.0);
        let below = field
            .iter()
            .filter(|p| p.pos.y >= tuning.field_height + tuning.recycle_epsilon)
            .count();
        assert!(below > 0);
        let removed = field.recycle(tuning.field_height);
        assert_eq!(removed, below);
        assert!(field.iter().all(|p| p.pos.y < tuning.field_height + tuning.recycle_epsilon));
        assert!(field.len() >= field.min_count());
    }

    #[test]
    fn test_recycle_removes_platform_exactly_at_limit() {
        let (mut field, tuning) = field(7);
        field.clear();
        let limit = tuning.field_height + tuning.recycle_epsilon;
        assert_eq!(limit, 362.0);
        let at_limit = field.push_at(0.0, 362.0);
        let inside = field.push_at(0.0, 361.5);

        assert_eq!(field.recycle(tuning.field_height), 1);
        assert!(field.iter().all(|p| p.id != at_limit));
        assert!(field.iter().any(|p| p.id == inside));
        assert!(field.len() >= field.min_count());
    }

    #[test]
    fn test_recycle_idempotent() {
        let (mut field, tuning) = field(6);
        field.shift(250.0);
        field.recycle(tuning.field_height);
        let snapshot = field.platforms.clone();
        assert_eq!(field.recycle(tuning.field_height), 0);
        assert_eq!(field.platforms, snapshot);
    }

    proptest! {
        #[test]
        fn min_count_holds_after_any_shift(seed in any::<u64>(), shifts in proptest::collection::vec(0.0f32..120.0, 1..40)) {
            let tuning = Tuning::default();
            let mut field = PlatformField::new(seed, &tuning);
            for dy in shifts {
                field.shift(dy);
                field.recycle(tuning.field_height);
                prop_assert!(field.len() >= field.min_count());
                let again = field.platforms.clone();
                prop_assert_eq!(field.recycle(tuning.field_height), 0);
                prop_assert_eq!(&field.platforms, &again);
            }
        }
    }
}
