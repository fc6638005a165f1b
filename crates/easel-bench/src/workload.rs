// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Synthetic canvas workload.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::BenchmarkError;
use crate::scenario::OperationKind;

/// Width of the synthetic canvas, in pixels.
pub const CANVAS_WIDTH: f64 = 1920.0;
/// Height of the synthetic canvas, in pixels.
pub const CANVAS_HEIGHT: f64 = 1080.0;

/// Side of one coverage tile used by the render workload.
const TILE_SIZE: f64 = 32.0;
const TILES_X: usize = (CANVAS_WIDTH / TILE_SIZE) as usize;
const TILES_Y: usize = (CANVAS_HEIGHT / TILE_SIZE) as usize + 1;

/// A rectangle on the canvas, rotated about its centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Stable identifier.
    pub id: String,
    /// Left edge before rotation.
    pub x: f64,
    /// Top edge before rotation.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Rotation in radians.
    pub rotation: f64,
    /// Fill colour as `#rrggbb`.
    pub fill: String,
}

impl Shape {
    fn random(index: usize, rng: &mut StdRng) -> Self {
        Self {
            id: format!("shape-{index}"),
            x: rng.random_range(0.0..CANVAS_WIDTH),
            y: rng.random_range(0.0..CANVAS_HEIGHT),
            width: rng.random_range(10.0..200.0),
            height: rng.random_range(10.0..200.0),
            rotation: rng.random_range(0.0..std::f64::consts::TAU),
            fill: random_fill(rng),
        }
    }

    fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Axis-aligned bounds of the rotated rectangle: `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let (cx, cy) = self.center();
        let (sin, cos) = self.rotation.sin_cos();
        let half_w = (self.width * cos.abs() + self.height * sin.abs()) / 2.0;
        let half_h = (self.width * sin.abs() + self.height * cos.abs()) / 2.0;
        (cx - half_w, cy - half_h, cx + half_w, cy + half_h)
    }

    /// Returns `true` if the canvas point lies inside the rotated rectangle.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let (cx, cy) = self.center();
        let (sin, cos) = (-self.rotation).sin_cos();
        let dx = px - cx;
        let dy = py - cy;
        let local_x = dx * cos - dy * sin;
        let local_y = dx * sin + dy * cos;
        local_x.abs() <= self.width / 2.0 && local_y.abs() <= self.height / 2.0
    }
}

fn random_fill(rng: &mut StdRng) -> String {
    format!("#{:06x}", rng.random_range(0..0x0100_0000u32))
}

/// The shape list a scenario operates on.
#[derive(Debug)]
pub struct CanvasWorkload {
    shapes: Vec<Shape>,
    rng: StdRng,
}

impl CanvasWorkload {
    /// Generates `shape_count` random shapes.
    pub fn generate(shape_count: usize, mut rng: StdRng) -> Self {
        let shapes = (0..shape_count).map(|i| Shape::random(i, &mut rng)).collect();
        Self { shapes, rng }
    }

    /// The current shapes.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Runs one iteration of `kind` and returns a workload-specific checksum.
    pub fn run(&mut self, kind: OperationKind) -> Result<usize, BenchmarkError> {
        Ok(match kind {
            OperationKind::Render => self.render(),
            OperationKind::Update => self.update(),
            OperationKind::Collaboration => self.collaborate()?,
            OperationKind::Interaction => self.interact(),
        })
    }

    /// Rasterises every shape's bounding box onto a tile grid and returns the covered tiles.
    pub fn render(&self) -> usize {
        let mut covered = vec![false; TILES_X * TILES_Y];
        for shape in &self.shapes {
            let (min_x, min_y, max_x, max_y) = shape.bounds();
            let Some((x0, x1)) = tile_span(min_x, max_x, TILES_X) else {
                continue;
            };
            let Some((y0, y1)) = tile_span(min_y, max_y, TILES_Y) else {
                continue;
            };
            for ty in y0..=y1 {
                covered[ty * TILES_X + x0..=ty * TILES_X + x1].fill(true);
            }
        }
        covered.iter().filter(|tile| **tile).count()
    }

    /// Moves, rotates and recolours a random tenth of the shapes. Returns how many changed.
    pub fn update(&mut self) -> usize {
        if self.shapes.is_empty() {
            return 0;
        }
        let changes = (self.shapes.len() / 10).max(1);
        for _ in 0..changes {
            let index = self.rng.random_range(0..self.shapes.len());
            let dx = self.rng.random_range(-20.0..20.0);
            let dy = self.rng.random_range(-20.0..20.0);
            let rotation = self.rng.random_range(0.0..std::f64::consts::TAU);
            let fill = random_fill(&mut self.rng);

            let shape = &mut self.shapes[index];
            shape.x = (shape.x + dx).clamp(0.0, CANVAS_WIDTH);
            shape.y = (shape.y + dy).clamp(0.0, CANVAS_HEIGHT);
            shape.rotation = rotation;
            shape.fill = fill;
        }
        changes
    }

    /// Serialises the shape list to JSON and parses it back. Returns the payload size.
    pub fn collaborate(&mut self) -> Result<usize, BenchmarkError> {
        let payload = serde_json::to_string(&self.shapes)?;
        self.shapes = serde_json::from_str(&payload)?;
        Ok(payload.len())
    }

    /// Hit-tests a random point against every shape. Returns the number of hits.
    pub fn interact(&mut self) -> usize {
        let px = self.rng.random_range(0.0..CANVAS_WIDTH);
        let py = self.rng.random_range(0.0..CANVAS_HEIGHT);
        self.shapes.iter().filter(|shape| shape.contains(px, py)).count()
    }
}

/// Clamps `[min, max]` to tile indices in `0..tiles`, `None` if fully outside.
fn tile_span(min: f64, max: f64, tiles: usize) -> Option<(usize, usize)> {
    let limit = tiles as f64 * TILE_SIZE;
    if max < 0.0 || min >= limit {
        return None;
    }
    let first = (min.max(0.0) / TILE_SIZE) as usize;
    let last = ((max.min(limit - 1.0)) / TILE_SIZE) as usize;
    Some((first.min(tiles - 1), last.min(tiles - 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;

    fn square(x: f64, y: f64, side: f64, rotation: f64) -> Shape {
        Shape {
            id: "s".to_string(),
            x,
            y,
            width: side,
            height: side,
            rotation,
            fill: "#000000".to_string(),
        }
    }

    fn workload(shapes: Vec<Shape>) -> CanvasWorkload {
        CanvasWorkload {
            shapes,
            rng: StdRng::seed_from_u64(7),
        }
    }

    #[test]
    fn same_seed_generates_same_shapes() {
        let a = CanvasWorkload::generate(20, StdRng::seed_from_u64(1));
        let b = CanvasWorkload::generate(20, StdRng::seed_from_u64(1));
        assert_eq!(a.shapes(), b.shapes());
        assert_eq!(a.shapes().len(), 20);
    }

    #[test]
    fn rotated_bounds_grow() {
        let shape = square(0.0, 0.0, 10.0, std::f64::consts::FRAC_PI_4);
        let (min_x, _, max_x, _) = shape.bounds();
        assert_relative_eq!(max_x - min_x, 10.0 * std::f64::consts::SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn hit_test_respects_rotation() {
        // A 10x10 square centred on (5, 5); its corner region is empty once rotated 45 degrees.
        let flat = square(0.0, 0.0, 10.0, 0.0);
        let diamond = square(0.0, 0.0, 10.0, std::f64::consts::FRAC_PI_4);

        assert!(flat.contains(0.5, 0.5));
        assert!(!diamond.contains(0.5, 0.5));
        assert!(diamond.contains(5.0, 5.0));
    }

    #[test]
    fn render_counts_covered_tiles() {
        let w = workload(vec![square(0.0, 0.0, 64.0, 0.0), square(-500.0, -500.0, 10.0, 0.0)]);
        // 64px square from the origin covers tiles 0..=2 on each axis.
        assert_eq!(w.render(), 9);
    }

    #[test]
    fn collaboration_round_trip_preserves_shapes() {
        let mut w = CanvasWorkload::generate(5, StdRng::seed_from_u64(3));
        let before = w.shapes().to_vec();
        assert!(w.collaborate().unwrap() > 0);
        assert_eq!(w.shapes(), before.as_slice());
    }

    #[test]
    fn update_touches_at_least_one_shape() {
        let mut w = CanvasWorkload::generate(5, StdRng::seed_from_u64(3));
        assert_eq!(w.update(), 1);

        let mut empty = workload(Vec::new());
        assert_eq!(empty.update(), 0);
        assert_eq!(empty.interact(), 0);
    }
}
