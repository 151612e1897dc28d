//! Cube-coordinate algebra and the pointy-top pixel projection.
//!
//! All types in this module are free of Bevy ECS dependencies and operate on
//! plain integers / `Vec2` values, making them straightforward to unit-test.
//! Coordinates follow the cube convention: three axes q, r, s constrained by
//! `q + r + s = 0`.

use std::fmt;
use std::ops::Add;

use bevy::prelude::{Reflect, Vec2};
use thiserror::Error;

/// A cube coordinate was constructed from components that do not sum to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cube coordinate ({q}, {r}, {s}) violates q + r + s = 0")]
pub struct InvalidCoordinate {
    /// Rejected q component.
    pub q: i32,
    /// Rejected r component.
    pub r: i32,
    /// Rejected s component.
    pub s: i32,
}

/// Address of one hex cell: three signed axes with `q + r + s = 0`.
///
/// The invariant is enforced at construction, so every value of this type is
/// valid and the sum of two values is valid automatically. Equality and
/// hashing are structural, which makes the coordinate directly usable as a
/// map key.
///
/// # Examples
/// ```
/// # use hex_pathfinder::hex::CubeCoord;
/// let c = CubeCoord::axial(2, -1);
/// assert_eq!((c.q(), c.r(), c.s()), (2, -1, -1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct CubeCoord {
    q: i32,
    r: i32,
    s: i32,
}

impl CubeCoord {
    /// Builds a coordinate from the two free axes; s is derived as `-q - r`,
    /// so the invariant holds by construction.
    pub const fn axial(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Builds a coordinate from all three components, rejecting any triple
    /// that does not sum to zero.
    pub fn new(q: i32, r: i32, s: i32) -> Result<Self, InvalidCoordinate> {
        if q + r + s == 0 {
            Ok(Self { q, r, s })
        } else {
            Err(InvalidCoordinate { q, r, s })
        }
    }

    /// The q component.
    pub const fn q(&self) -> i32 {
        self.q
    }

    /// The r component.
    pub const fn r(&self) -> i32 {
        self.r
    }

    /// The s component.
    pub const fn s(&self) -> i32 {
        self.s
    }

    /// Hex-grid distance: the minimum number of single-hex steps between two
    /// cells, `(|dq| + |dr| + |ds|) / 2`.
    ///
    /// Symmetric, zero only for identical coordinates, and satisfies the
    /// triangle inequality, so it is usable as an admissible search
    /// heuristic wherever the per-step cost is at least 1.
    ///
    /// # Examples
    /// ```
    /// # use hex_pathfinder::hex::CubeCoord;
    /// let a = CubeCoord::axial(0, 0);
    /// let b = CubeCoord::axial(2, 4);
    /// assert_eq!(a.distance_to(b), 6);
    /// ```
    pub fn distance_to(self, other: Self) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s - other.s).abs();
        ((dq + dr + ds) / 2) as u32
    }
}

impl Add for CubeCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            q: self.q + rhs.q,
            r: self.r + rhs.r,
            s: self.s + rhs.s,
        }
    }
}

impl fmt::Display for CubeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s)
    }
}

/// The six unit directions, in the fixed order used for neighbor enumeration.
///
/// Search tie-breaking depends on this enumeration order, so the table must
/// not be reordered.
pub const DIRECTIONS: [CubeCoord; 6] = [
    CubeCoord { q: 0, r: -1, s: 1 },  // north-west
    CubeCoord { q: 1, r: -1, s: 0 },  // north-east
    CubeCoord { q: 1, r: 0, s: -1 },  // east
    CubeCoord { q: 0, r: 1, s: -1 },  // south-east
    CubeCoord { q: -1, r: 1, s: 0 },  // south-west
    CubeCoord { q: -1, r: 0, s: 1 },  // west
];

/// Converts offset coordinates (row/column with alternating rows shifted) to
/// cube space: `q = col - floor(row / 2)`, `r = row`.
///
/// Floor means euclidean division, so the formula is also correct for
/// negative rows.
pub fn offset_to_cube(row: i32, col: i32) -> CubeCoord {
    CubeCoord::axial(col - row.div_euclid(2), row)
}

/// A cube coordinate with fractional components, produced by the inverse
/// pixel projection before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractionalCube {
    q: f32,
    r: f32,
    s: f32,
}

impl FractionalCube {
    /// Builds a fractional coordinate from the two free axes, deriving s.
    pub fn from_axial(q: f32, r: f32) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Rounds to the nearest valid integer cube coordinate.
    ///
    /// Each component is rounded independently; the component with the
    /// largest rounding delta is then recomputed from the other two so the
    /// result satisfies `q + r + s = 0`. When two deltas are equal the
    /// correction prefers q, then r, then s.
    pub fn round(self) -> CubeCoord {
        let mut q = self.q.round();
        let mut r = self.r.round();
        let mut s = self.s.round();

        let dq = (q - self.q).abs();
        let dr = (r - self.r).abs();
        let ds = (s - self.s).abs();

        if dq >= dr && dq >= ds {
            q = -r - s;
        } else if dr >= ds {
            r = -q - s;
        } else {
            s = -q - r;
        }

        CubeCoord {
            q: q as i32,
            r: r as i32,
            s: s as i32,
        }
    }
}

/// Pointy-top hex layout: maps cube coordinates to pixel centers and back.
///
/// `size` is the hex circumradius in pixels, `origin` the pixel position of
/// the cell at `(0, 0, 0)`. Pixel space is screen-style (+y down); callers
/// working in a +y-up world are expected to flip y on the way in and out.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct HexLayout {
    /// Hex circumradius in pixels.
    pub size: f32,
    /// Pixel position of the origin cell's center.
    pub origin: Vec2,
}

impl Default for HexLayout {
    fn default() -> Self {
        Self {
            size: 25.0,
            origin: Vec2::ZERO,
        }
    }
}

impl HexLayout {
    /// Builds a layout with the given hex size and pixel origin.
    pub fn new(size: f32, origin: Vec2) -> Self {
        Self { size, origin }
    }

    /// Pixel center of a hex cell (pointy-top forward basis).
    pub fn hex_to_pixel(&self, c: CubeCoord) -> Vec2 {
        let sqrt3 = 3.0_f32.sqrt();
        let x = (sqrt3 * c.q as f32 + sqrt3 / 2.0 * c.r as f32) * self.size;
        let y = 1.5 * c.r as f32 * self.size;
        Vec2::new(x, y) + self.origin
    }

    /// Inverse projection: pixel position to fractional cube coordinates
    /// (pointy-top inverse basis).
    pub fn pixel_to_fractional(&self, p: Vec2) -> FractionalCube {
        let sqrt3 = 3.0_f32.sqrt();
        let local = p - self.origin;
        let q = (sqrt3 / 3.0 * local.x - local.y / 3.0) / self.size;
        let r = 2.0 / 3.0 * local.y / self.size;
        FractionalCube::from_axial(q, r)
    }

    /// Inverse projection rounded to the nearest cell.
    pub fn pixel_to_hex(&self, p: Vec2) -> CubeCoord {
        self.pixel_to_fractional(p).round()
    }

    /// The six corner positions of a cell relative to its center, one at the
    /// top point (pointy-top orientation).
    pub fn corner_offsets(&self) -> [Vec2; 6] {
        std::array::from_fn(|i| {
            let angle = std::f32::consts::FRAC_PI_3 * i as f32 + std::f32::consts::FRAC_PI_6;
            Vec2::new(self.size * angle.cos(), self.size * angle.sin())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── construction ────────────────────────────────────────────────

    #[test]
    fn axial_derives_s() {
        let c = CubeCoord::axial(3, -5);
        assert_eq!(c.s(), 2);
        assert_eq!(c.q() + c.r() + c.s(), 0);
    }

    #[test]
    fn three_arg_accepts_valid_triple() {
        let c = CubeCoord::new(1, 2, -3).unwrap();
        assert_eq!(c, CubeCoord::axial(1, 2));
    }

    #[test]
    fn three_arg_rejects_invariant_violation() {
        let err = CubeCoord::new(1, 2, 3).unwrap_err();
        assert_eq!(err, InvalidCoordinate { q: 1, r: 2, s: 3 });
    }

    #[test]
    fn addition_preserves_invariant() {
        for a in [CubeCoord::axial(0, 0), CubeCoord::axial(2, -3)] {
            for dir in DIRECTIONS {
                let sum = a + dir;
                assert_eq!(sum.q() + sum.r() + sum.s(), 0);
            }
        }
    }

    // ── distance ────────────────────────────────────────────────────

    fn small_region() -> Vec<CubeCoord> {
        let mut coords = Vec::new();
        for q in -2..=2 {
            for r in -2..=2 {
                coords.push(CubeCoord::axial(q, r));
            }
        }
        coords
    }

    #[test]
    fn distance_to_self_is_zero() {
        for c in small_region() {
            assert_eq!(c.distance_to(c), 0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let coords = small_region();
        for &a in &coords {
            for &b in &coords {
                assert_eq!(a.distance_to(b), b.distance_to(a));
            }
        }
    }

    #[test]
    fn distance_satisfies_triangle_inequality() {
        let coords = small_region();
        for &a in &coords {
            for &b in &coords {
                for &c in &coords {
                    assert!(
                        a.distance_to(c) <= a.distance_to(b) + b.distance_to(c),
                        "triangle inequality failed for {a}, {b}, {c}"
                    );
                }
            }
        }
    }

    #[test]
    fn unit_directions_are_at_distance_one() {
        let center = CubeCoord::axial(1, -2);
        for dir in DIRECTIONS {
            assert_eq!(center.distance_to(center + dir), 1);
        }
    }

    // ── directions ──────────────────────────────────────────────────

    #[test]
    fn direction_order_is_fixed() {
        let expected = [(0, -1), (1, -1), (1, 0), (0, 1), (-1, 1), (-1, 0)];
        for (dir, (q, r)) in DIRECTIONS.iter().zip(expected) {
            assert_eq!(*dir, CubeCoord::axial(q, r));
        }
    }

    #[test]
    fn directions_are_distinct() {
        for (i, a) in DIRECTIONS.iter().enumerate() {
            for b in &DIRECTIONS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    // ── offset conversion ───────────────────────────────────────────

    #[test]
    fn offset_to_cube_matches_formula() {
        assert_eq!(offset_to_cube(0, 0), CubeCoord::axial(0, 0));
        assert_eq!(offset_to_cube(1, 0), CubeCoord::axial(0, 1));
        assert_eq!(offset_to_cube(2, 0), CubeCoord::axial(-1, 2));
        assert_eq!(offset_to_cube(4, 6), CubeCoord::axial(4, 4));
    }

    #[test]
    fn offset_to_cube_floors_negative_rows() {
        // floor(-1 / 2) = -1, not 0
        assert_eq!(offset_to_cube(-1, 0), CubeCoord::axial(1, -1));
        assert_eq!(offset_to_cube(-2, 3), CubeCoord::axial(4, -2));
    }

    // ── rounding ────────────────────────────────────────────────────

    #[test]
    fn whole_valued_fraction_rounds_to_itself() {
        let c = FractionalCube::from_axial(2.0, -1.0).round();
        assert_eq!(c, CubeCoord::axial(2, -1));
    }

    #[test]
    fn rounding_corrects_largest_delta() {
        // (1.3, 0.4, -1.7) rounds componentwise to (1, 0, -2), which sums to
        // -1. r carries the largest delta (0.4) and is recomputed from q and s.
        let c = FractionalCube::from_axial(1.3, 0.4).round();
        assert_eq!(c, CubeCoord::new(1, 1, -2).unwrap());
    }

    #[test]
    fn rounding_prefers_q_on_ties() {
        // q and r are both exactly half-way; the q correction wins.
        let c = FractionalCube::from_axial(0.5, 0.5).round();
        assert_eq!(c, CubeCoord::new(0, 1, -1).unwrap());
    }

    // ── pixel projection ────────────────────────────────────────────

    #[test]
    fn tile_centers_round_trip_exactly() {
        let layout = HexLayout::new(25.0, Vec2::new(200.0, 100.0));
        for q in -4..=4 {
            for r in -4..=4 {
                let c = CubeCoord::axial(q, r);
                let center = layout.hex_to_pixel(c);
                assert_eq!(layout.pixel_to_hex(center), c, "round trip failed for {c}");
            }
        }
    }

    #[test]
    fn points_near_a_center_round_to_that_cell() {
        let layout = HexLayout::default();
        let c = CubeCoord::axial(3, -1);
        let center = layout.hex_to_pixel(c);
        for offset in [
            Vec2::new(4.0, 0.0),
            Vec2::new(-4.0, 3.0),
            Vec2::new(0.0, -5.0),
        ] {
            assert_eq!(layout.pixel_to_hex(center + offset), c);
        }
    }

    #[test]
    fn origin_cell_center_is_the_layout_origin() {
        let origin = Vec2::new(200.0, 100.0);
        let layout = HexLayout::new(25.0, origin);
        assert_eq!(layout.hex_to_pixel(CubeCoord::axial(0, 0)), origin);
    }

    #[test]
    fn row_step_moves_down_and_right() {
        let layout = HexLayout::default();
        let a = layout.hex_to_pixel(CubeCoord::axial(0, 0));
        let b = layout.hex_to_pixel(CubeCoord::axial(0, 1));
        assert!(b.y > a.y, "+r should increase pixel y (screen down)");
        assert!(b.x > a.x, "+r should shift right on a pointy-top grid");
    }

    #[test]
    fn corner_offsets_lie_on_the_circumradius() {
        let layout = HexLayout::new(25.0, Vec2::ZERO);
        for corner in layout.corner_offsets() {
            assert!((corner.length() - 25.0).abs() < 1e-4);
        }
    }

    #[test]
    fn corners_include_the_top_point() {
        let layout = HexLayout::new(25.0, Vec2::ZERO);
        let pointy = layout
            .corner_offsets()
            .iter()
            .any(|c| c.x.abs() < 1e-4 && (c.y.abs() - 25.0).abs() < 1e-4);
        assert!(pointy, "pointy-top layout must have a corner straight above the center");
    }
}
