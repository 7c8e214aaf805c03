//! Obstacle stream: spawning, scrolling and culling of gated obstacles
//!
//! Obstacles enter at the right edge of the viewport and scroll left at a
//! uniform speed. The sequence is kept in spawn order.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::state::Viewport;
use crate::settings::Tuning;

/// A pair of gates with a passable gap between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Obstacle {
    /// Left edge of both gates
    pub x: f32,
    /// Height of the top gate (the gap starts here)
    pub gap_top: f32,
    /// Already scored under `ScoringMode::PassOnce`
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }
}

/// Bounds for the randomized top of the gap: `[margin, height - gap - margin)`
///
/// Collapses to the lower bound when the viewport is too short to fit both
/// margins and the gap.
pub fn gap_top_range(viewport_height: f32, tuning: &Tuning) -> (f32, f32) {
    let low = tuning.gap_margin;
    let high = viewport_height - tuning.obstacle_gap - tuning.gap_margin;
    (low, high.max(low))
}

/// Ordered sequence of live obstacles plus the RNG that shapes new ones
///
/// Spawn order matches left-to-right order only while the viewport width is
/// unchanged; culling therefore checks every obstacle, not just the front.
#[derive(Debug, Clone)]
pub struct ObstacleStream {
    obstacles: VecDeque<Obstacle>,
    rng: Pcg32,
}

impl ObstacleStream {
    pub fn new(seed: u64) -> Self {
        Self {
            obstacles: VecDeque::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Append a new obstacle at the right edge of the viewport
    pub fn spawn(&mut self, viewport: Viewport, tuning: &Tuning) -> Obstacle {
        let (low, high) = gap_top_range(viewport.height, tuning);
        let gap_top = if high > low {
            self.rng.random_range(low..high)
        } else {
            low
        };
        let obstacle = Obstacle {
            x: viewport.width,
            gap_top,
            passed: false,
        };
        self.obstacles.push_back(obstacle);
        obstacle
    }

    /// Scroll every obstacle left by `speed` and drop those fully off-screen.
    /// Returns the number removed.
    pub fn advance(&mut self, speed: f32, width: f32) -> usize {
        for obstacle in self.obstacles.iter_mut() {
            obstacle.x -= speed;
        }

        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.x > -width);
        before - self.obstacles.len()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> {
        self.obstacles.iter_mut()
    }

    /// Push a pre-built obstacle (tests and replays)
    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push_back(obstacle);
    }
}

/// Wall-clock spawn timer for hosts without an interval callback
///
/// Accumulates elapsed milliseconds and reports how many spawns fell due.
#[derive(Debug, Clone, Default)]
pub struct SpawnClock {
    elapsed_ms: f64,
}

impl SpawnClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt_ms: f64, interval_ms: u32) -> u32 {
        let interval = f64::from(interval_ms.max(1));
        self.elapsed_ms += dt_ms.max(0.0);
        let mut due = 0;
        while self.elapsed_ms >= interval {
            self.elapsed_ms -= interval;
            due += 1;
        }
        due
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEWPORT: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn test_spawn_at_right_edge() {
        let tuning = Tuning::default();
        let mut stream = ObstacleStream::new(7);
        let obstacle = stream.spawn(VIEWPORT, &tuning);
        assert_eq!(obstacle.x, 800.0);
        assert!(!obstacle.passed);
        assert_eq!(stream.len(), 1);
    }

    #[test]
    fn test_gap_range_for_800x600() {
        let (low, high) = gap_top_range(600.0, &Tuning::default());
        assert_eq!(low, 100.0);
        assert_eq!(high, 300.0);
    }

    #[test]
    fn test_gap_range_collapses_on_short_viewport() {
        let tuning = Tuning::default();
        let (low, high) = gap_top_range(250.0, &tuning);
        assert_eq!(low, high);

        let mut stream = ObstacleStream::new(1);
        let obstacle = stream.spawn(
            Viewport {
                width: 300.0,
                height: 250.0,
            },
            &tuning,
        );
        assert_eq!(obstacle.gap_top, tuning.gap_margin);
    }

    #[test]
    fn test_advance_moves_by_speed() {
        let tuning = Tuning::default();
        let mut stream = ObstacleStream::new(3);
        stream.spawn(VIEWPORT, &tuning);
        stream.advance(tuning.obstacle_speed, tuning.obstacle_width);
        let x = stream.iter().next().unwrap().x;
        assert!((x - (800.0 - 2.9)).abs() < 1e-4);
    }

    #[test]
    fn test_advance_culls_offscreen_front() {
        let mut stream = ObstacleStream::new(3);
        stream.push(Obstacle { x: -78.0, gap_top: 150.0, passed: false });
        stream.push(Obstacle { x: 300.0, gap_top: 150.0, passed: false });

        // -78 - 2.9 = -80.9, past the trailing edge
        let removed = stream.advance(2.9, 80.0);
        assert_eq!(removed, 1);
        assert_eq!(stream.len(), 1);
        assert!(stream.iter().all(|o| o.x > 0.0));
    }

    #[test]
    fn test_advance_culls_behind_a_wider_spawn() {
        let tuning = Tuning::default();
        let mut stream = ObstacleStream::new(11);
        stream.spawn(Viewport { width: 1600.0, height: 600.0 }, &tuning);
        // Viewport shrank: the newer obstacle enters left of the older one
        stream.spawn(Viewport { width: 400.0, height: 600.0 }, &tuning);

        let mut removed = 0;
        for _ in 0..200 {
            removed += stream.advance(tuning.obstacle_speed, tuning.obstacle_width);
        }

        assert_eq!(removed, 1);
        assert_eq!(stream.len(), 1);
        assert!(stream.iter().all(|o| o.x > -tuning.obstacle_width));
        assert!(stream.iter().all(|o| o.x > 1000.0));
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let tuning = Tuning::default();
        let mut a = ObstacleStream::new(42);
        let mut b = ObstacleStream::new(42);
        for _ in 0..10 {
            assert_eq!(a.spawn(VIEWPORT, &tuning), b.spawn(VIEWPORT, &tuning));
        }
    }

    #[test]
    fn test_spawn_clock() {
        let mut clock = SpawnClock::new();
        assert_eq!(clock.advance(3999.0, 4000), 0);
        assert_eq!(clock.advance(1.0, 4000), 1);
        assert_eq!(clock.advance(8000.0, 4000), 2);
        clock.advance(3000.0, 4000);
        clock.reset();
        assert_eq!(clock.advance(1500.0, 4000), 0);
    }

    proptest! {
        #[test]
        fn prop_gap_top_within_bounds(seed in any::<u64>(), height in 400.0f32..2000.0) {
            let tuning = Tuning::default();
            let mut stream = ObstacleStream::new(seed);
            let (low, high) = gap_top_range(height, &tuning);
            for _ in 0..32 {
                let o = stream.spawn(Viewport { width: 800.0, height }, &tuning);
                prop_assert!(o.gap_top >= low && o.gap_top <= high);
                // Both gate segments keep their minimum thickness
                prop_assert!(o.gap_top + tuning.obstacle_gap <= height - tuning.gap_margin);
            }
        }

        #[test]
        fn prop_nothing_survives_past_left_edge(steps in 0usize..800) {
            let tuning = Tuning::default();
            let mut stream = ObstacleStream::new(9);
            stream.spawn(VIEWPORT, &tuning);
            for _ in 0..steps {
                stream.advance(tuning.obstacle_speed, tuning.obstacle_width);
            }
            prop_assert!(stream.iter().all(|o| o.x > -tuning.obstacle_width));
        }
    }
}
