//! Level layouts and brick grid generation
//!
//! A level is described by [`LevelParams`] (grid size, pattern, hue and which
//! brick variants may appear). [`generate_grid`] turns those parameters into a
//! fresh [`BrickGrid`] using an explicit RNG so the same seed always produces
//! the same layout.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Brick, BrickGrid, BrickStatus};
use crate::consts::*;
use crate::level_hue;
use crate::tuning::Tuning;

/// Which grid cells start with a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pattern {
    #[default]
    Full,
    Checkerboard,
    Pyramid,
    Hollow,
    CentralBlock,
    Diagonal,
    RandomHoles,
    Wave,
    GapBand,
    SkipRows,
}

impl Pattern {
    /// Level rotation order
    pub const ALL: [Pattern; 10] = [
        Pattern::Full,
        Pattern::Checkerboard,
        Pattern::Pyramid,
        Pattern::Hollow,
        Pattern::CentralBlock,
        Pattern::Diagonal,
        Pattern::RandomHoles,
        Pattern::Wave,
        Pattern::GapBand,
        Pattern::SkipRows,
    ];

    /// Pattern used by a 1-based level number
    pub fn for_level(level: u32) -> Pattern {
        let index = level.saturating_sub(1) as usize % Self::ALL.len();
        Self::ALL[index]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Full => "full",
            Pattern::Checkerboard => "checkerboard",
            Pattern::Pyramid => "pyramid",
            Pattern::Hollow => "hollow",
            Pattern::CentralBlock => "centralBlock",
            Pattern::Diagonal => "diagonal",
            Pattern::RandomHoles => "randomHoles",
            Pattern::Wave => "wave",
            Pattern::GapBand => "gapBand",
            Pattern::SkipRows => "skipRows",
        }
    }

    /// Whether cell (`row`, `col`) of a `rows` x `cols` grid holds a brick.
    /// Only `RandomHoles` draws from `rng`.
    pub fn contains<R: Rng>(&self, row: usize, col: usize, rows: usize, cols: usize, rng: &mut R) -> bool {
        match self {
            Pattern::Full => true,
            Pattern::Checkerboard => (row + col) % 2 == 0,
            Pattern::Pyramid => {
                // Top row is the narrow tip, bottom row spans the grid
                let mid = (cols as f32 - 1.0) / 2.0;
                let half_width = (row + 1) as f32 * cols as f32 / (2.0 * rows as f32);
                (col as f32 - mid).abs() < half_width
            }
            Pattern::Hollow => row == 0 || row + 1 == rows || col == 0 || col + 1 == cols,
            Pattern::CentralBlock => {
                let (r0, c0) = (rows / 4, cols / 4);
                (r0..rows - r0).contains(&row) && (c0..cols - c0).contains(&col)
            }
            Pattern::Diagonal => (col as isize - row as isize).rem_euclid(3) == 0,
            Pattern::RandomHoles => rng.random_bool(0.75),
            Pattern::Wave => {
                let crest = ((col as f32 * 0.8).sin() + 1.0) * (rows as f32 - 1.0) / 4.0;
                row as f32 >= crest.round()
            }
            Pattern::GapBand => row != rows / 2,
            Pattern::SkipRows => row % 2 == 0,
        }
    }
}

/// Everything grid generation needs to know about a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelParams {
    pub level: u32,
    pub rows: usize,
    pub columns: usize,
    pub pattern: Pattern,
    pub hue: u16,
    pub multi_hit: bool,
    pub moving: bool,
}

impl LevelParams {
    /// Grid grows one column per level and one row every other level, up to the caps
    pub fn for_level(level: u32, tuning: &Tuning) -> Self {
        let level = level.max(1);
        let step = (level - 1) as usize;
        Self {
            level,
            rows: (BRICK_ROWS_START + step / 2).min(BRICK_ROWS_MAX),
            columns: (BRICK_COLUMNS_START + step).min(BRICK_COLUMNS_MAX),
            pattern: Pattern::for_level(level),
            hue: level_hue(level),
            multi_hit: level >= tuning.multi_hit_from_level,
            moving: level >= tuning.moving_from_level,
        }
    }

    /// Brick width that fits `columns` bricks between the side offsets
    pub fn brick_width(&self, field_width: f32) -> f32 {
        let gaps = (self.columns.saturating_sub(1)) as f32 * BRICK_PADDING;
        ((field_width - 2.0 * BRICK_OFFSET_LEFT - gaps) / self.columns as f32).max(1.0)
    }
}

/// Build the brick grid for a level
pub fn generate_grid<R: Rng>(params: &LevelParams, tuning: &Tuning, rng: &mut R) -> BrickGrid {
    let grid = build_grid(params, params.pattern, tuning, rng);
    if grid.alive_count() > 0 {
        return grid;
    }
    log::warn!(
        "Pattern {} left level {} empty, falling back to full",
        params.pattern.as_str(),
        params.level
    );
    build_grid(params, Pattern::Full, tuning, rng)
}

fn build_grid<R: Rng>(params: &LevelParams, pattern: Pattern, tuning: &Tuning, rng: &mut R) -> BrickGrid {
    let width = params.brick_width(tuning.field_width);
    let size = Vec2::new(width, BRICK_HEIGHT);

    let mut cells = Vec::with_capacity(params.columns);
    for col in 0..params.columns {
        let mut column = Vec::with_capacity(params.rows);
        for row in 0..params.rows {
            let pos = Vec2::new(
                BRICK_OFFSET_LEFT + col as f32 * (width + BRICK_PADDING),
                BRICK_OFFSET_TOP + row as f32 * (BRICK_HEIGHT + BRICK_PADDING),
            );
            let present = pattern.contains(row, col, params.rows, params.columns, rng);

            let hit_points = if present
                && params.multi_hit
                && tuning.max_hit_points > 1
                && rng.random_bool(tuning.multi_hit_chance as f64)
            {
                rng.random_range(2..=tuning.max_hit_points)
            } else {
                1
            };

            let vel = if present && params.moving && rng.random_bool(tuning.moving_chance as f64) {
                let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                Vec2::new(tuning.moving_speed * direction, 0.0)
            } else {
                Vec2::ZERO
            };

            column.push(Brick {
                column: col,
                row,
                pos,
                size,
                status: if present { BrickStatus::Alive } else { BrickStatus::Broken },
                hit_points,
                points: tuning.score_policy.points_for(row, hit_points),
                vel,
            });
        }
        cells.push(column);
    }

    let grid = BrickGrid {
        columns: params.columns,
        rows: params.rows,
        hue: params.hue,
        pattern,
        cells,
    };
    log::info!(
        "Level {}: {}x{} {} grid, {} bricks",
        params.level,
        params.columns,
        params.rows,
        pattern.as_str(),
        grid.alive_count()
    );
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_pcg::Pcg32;

    fn count(pattern: Pattern, rows: usize, cols: usize) -> usize {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut n = 0;
        for row in 0..rows {
            for col in 0..cols {
                if pattern.contains(row, col, rows, cols, &mut rng) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_pattern_rotation() {
        assert_eq!(Pattern::for_level(1), Pattern::Full);
        assert_eq!(Pattern::for_level(2), Pattern::Checkerboard);
        assert_eq!(Pattern::for_level(10), Pattern::SkipRows);
        assert_eq!(Pattern::for_level(11), Pattern::Full);
        // Level 0 is treated like level 1
        assert_eq!(Pattern::for_level(0), Pattern::Full);
    }

    #[test]
    fn test_pattern_shapes() {
        assert_eq!(count(Pattern::Full, 5, 7), 35);
        assert_eq!(count(Pattern::Checkerboard, 5, 7), 18);
        assert_eq!(count(Pattern::Hollow, 5, 7), 20);
        assert_eq!(count(Pattern::SkipRows, 5, 7), 21);
        assert_eq!(count(Pattern::GapBand, 5, 7), 28);
        assert_eq!(count(Pattern::CentralBlock, 5, 7), 15);
    }

    #[test]
    fn test_pyramid_widens_downward() {
        let mut rng = Pcg32::seed_from_u64(0);
        let width = |row: usize, rng: &mut Pcg32| {
            (0..9).filter(|&c| Pattern::Pyramid.contains(row, c, 6, 9, rng)).count()
        };
        let top = width(0, &mut rng);
        let bottom = width(5, &mut rng);
        assert!(top >= 1);
        assert!(bottom > top);
        assert_eq!(bottom, 9);
    }

    #[test]
    fn test_every_pattern_non_empty() {
        for pattern in Pattern::ALL {
            assert!(count(pattern, 5, 7) > 0, "{} is empty", pattern.as_str());
        }
    }

    /// Generator whose every draw is the top of the range, so `random_bool(p)` is false for p < 1
    struct Saturated;

    impl RngCore for Saturated {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0xff);
        }
    }

    #[test]
    fn test_empty_pattern_falls_back_to_full() {
        let tuning = Tuning::default();
        let params = LevelParams {
            pattern: Pattern::RandomHoles,
            ..LevelParams::for_level(1, &tuning)
        };
        let mut rng = Saturated;
        assert!(!Pattern::RandomHoles.contains(0, 0, 5, 7, &mut rng));

        let grid = generate_grid(&params, &tuning, &mut rng);
        assert_eq!(grid.pattern, Pattern::Full);
        assert_eq!(grid.alive_count(), 35);
        assert_eq!((grid.columns, grid.rows), (7, 5));
    }

    #[test]
    fn test_level_params_growth_and_caps() {
        let tuning = Tuning::default();
        let first = LevelParams::for_level(1, &tuning);
        assert_eq!((first.rows, first.columns), (5, 7));
        assert!(!first.multi_hit && !first.moving);

        let third = LevelParams::for_level(3, &tuning);
        assert_eq!((third.rows, third.columns), (6, 9));
        assert!(third.multi_hit && third.moving);

        let late = LevelParams::for_level(40, &tuning);
        assert_eq!((late.rows, late.columns), (8, 17));
        assert!(late.rows * late.columns <= 136);
    }

    #[test]
    fn test_level_one_geometry() {
        let tuning = Tuning::default();
        let params = LevelParams::for_level(1, &tuning);
        assert_eq!(params.brick_width(tuning.field_width), 55.0);

        let mut rng = Pcg32::seed_from_u64(1);
        let grid = generate_grid(&params, &tuning, &mut rng);
        assert_eq!(grid.alive_count(), 35);
        let brick = grid.get(2, 1).expect("cell exists");
        assert_eq!(brick.pos, Vec2::new(35.0 + 2.0 * 65.0, 60.0));
        assert_eq!(brick.points, 4);
        assert_eq!(brick.hit_points, 1);
        assert_eq!(brick.vel, Vec2::ZERO);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let tuning = Tuning::default();
        let params = LevelParams::for_level(7, &tuning);
        let a = generate_grid(&params, &tuning, &mut Pcg32::seed_from_u64(42));
        let b = generate_grid(&params, &tuning, &mut Pcg32::seed_from_u64(42));
        let statuses = |g: &BrickGrid| g.iter().map(|b| (b.status, b.hit_points, b.vel.x)).collect::<Vec<_>>();
        assert_eq!(statuses(&a), statuses(&b));
    }

    #[test]
    fn test_late_levels_mix_brick_variants() {
        let tuning = Tuning {
            multi_hit_chance: 1.0,
            moving_chance: 1.0,
            ..Tuning::default()
        };
        let params = LevelParams::for_level(3, &tuning);
        let grid = generate_grid(&params, &tuning, &mut Pcg32::seed_from_u64(9));
        for brick in grid.iter().filter(|b| b.is_alive()) {
            assert!(brick.hit_points >= 2 && brick.hit_points <= 3);
            assert!(brick.is_moving());
        }
    }
}
