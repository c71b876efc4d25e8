// Copyright 2026 the Planeshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dihedral group of the square.
//!
//! A [`Dihedral`] is one of the eight axis-aligned rotation/flip operations
//! that a display controller can apply when sampling an overlay plane. The
//! encoding is a packed 3-bit value: bit 2 is the flip flag and bits 0–1 are
//! the number of clockwise quarter turns (in a y-down coordinate system).
//!
//! Element `flip | r` means "mirror horizontally, then rotate `r` quarter
//! turns". As a linear map it is `R^r · F`, where `F` negates x and `R` maps
//! `(x, y)` to `(-y, x)`.
//!
//! Composition is written in application order: `a.combine(b)` applies `a`
//! first and `b` second, so its matrix is `M(b) · M(a)`.

use kurbo::{Affine, Rect, Size};

/// An element of the dihedral group of order 8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Dihedral {
    /// No rotation, no flip.
    #[default]
    Normal = 0,
    /// A quarter turn clockwise.
    Rotate90 = 1,
    /// A half turn.
    Rotate180 = 2,
    /// Three quarter turns clockwise.
    Rotate270 = 3,
    /// A horizontal mirror.
    Flipped = 4,
    /// A horizontal mirror followed by a quarter turn.
    Flipped90 = 5,
    /// A horizontal mirror followed by a half turn (a vertical mirror).
    Flipped180 = 6,
    /// A horizontal mirror followed by three quarter turns (a transpose).
    Flipped270 = 7,
}

impl Dihedral {
    /// All eight elements, in encoding order.
    pub const ALL: [Self; 8] = [
        Self::Normal,
        Self::Rotate90,
        Self::Rotate180,
        Self::Rotate270,
        Self::Flipped,
        Self::Flipped90,
        Self::Flipped180,
        Self::Flipped270,
    ];

    /// Decodes the low three bits of `bits`.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 7 {
            0 => Self::Normal,
            1 => Self::Rotate90,
            2 => Self::Rotate180,
            3 => Self::Rotate270,
            4 => Self::Flipped,
            5 => Self::Flipped90,
            6 => Self::Flipped180,
            _ => Self::Flipped270,
        }
    }

    /// Builds an element from a flip flag and a number of clockwise quarter
    /// turns (taken modulo 4).
    #[inline]
    #[must_use]
    pub const fn from_parts(flipped: bool, quarter_turns: u8) -> Self {
        let flip = if flipped { 4 } else { 0 };
        Self::from_bits(flip | (quarter_turns & 3))
    }

    /// Returns the packed 3-bit encoding.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Returns the number of clockwise quarter turns (0–3).
    #[inline]
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self.bits() & 3
    }

    /// Returns `true` if this element mirrors.
    #[inline]
    #[must_use]
    pub const fn is_flipped(self) -> bool {
        self.bits() & 4 != 0
    }

    /// Composes two elements: `self` is applied first, then `then`.
    ///
    /// This is not commutative. A flip in `then` reverses the sense of the
    /// rotation accumulated in `self`.
    #[inline]
    #[must_use]
    pub const fn combine(self, then: Self) -> Self {
        let first = self.bits();
        let second = then.bits();
        let flip = (first & 4) ^ (second & 4);
        let sign = ((second & 4) >> 1) + 1;
        Self::from_bits(flip | (((first & 3) * sign + second) & 3))
    }

    /// Returns the group inverse.
    #[inline]
    #[must_use]
    pub const fn invert(self) -> Self {
        let d = self.bits();
        let sign = ((d & 4) >> 1) + 1;
        Self::from_bits((4_u8.wrapping_sub(d).wrapping_mul(sign) & 3) | (d & 4))
    }

    /// Returns `true` if this element exchanges the x and y axes.
    #[inline]
    #[must_use]
    pub const fn swaps_xy(self) -> bool {
        self.bits() & 1 != 0
    }

    /// Returns the 2×2 linear map in column-major order `[xx, yx, xy, yy]`.
    ///
    /// This is the same coefficient order as the linear part of
    /// [`Affine::as_coeffs`].
    #[must_use]
    pub const fn to_matrix(self) -> [f64; 4] {
        match self {
            Self::Normal => [1.0, 0.0, 0.0, 1.0],
            Self::Rotate90 => [0.0, 1.0, -1.0, 0.0],
            Self::Rotate180 => [-1.0, 0.0, 0.0, -1.0],
            Self::Rotate270 => [0.0, -1.0, 1.0, 0.0],
            Self::Flipped => [-1.0, 0.0, 0.0, 1.0],
            Self::Flipped90 => [0.0, -1.0, -1.0, 0.0],
            Self::Flipped180 => [1.0, 0.0, 0.0, -1.0],
            Self::Flipped270 => [0.0, 1.0, 1.0, 0.0],
        }
    }

    /// Returns the element as an [`Affine`] with no translation.
    #[must_use]
    pub fn to_affine(self) -> Affine {
        let [a, b, c, d] = self.to_matrix();
        Affine::new([a, b, c, d, 0.0, 0.0])
    }

    /// Splits a column-major 2×2 linear map into `scale · self`.
    ///
    /// Returns the element together with strictly positive x and y scale
    /// factors, or `None` if `linear` is not a positive anisotropic scale
    /// composed with one of the eight elements.
    #[must_use]
    pub fn from_linear(linear: [f64; 4]) -> Option<(Self, f64, f64)> {
        let [a, b, c, d] = linear;
        Self::ALL.into_iter().find_map(|dihedral| {
            // The inverse of an orthogonal matrix is its transpose.
            let [ea, eb, ec, ed] = dihedral.to_matrix();
            let sx = a * ea + c * ec;
            let off_x = a * eb + c * ed;
            let off_y = b * ea + d * ec;
            let sy = b * eb + d * ed;
            (off_x == 0.0 && off_y == 0.0 && sx > 0.0 && sy > 0.0).then_some((dihedral, sx, sy))
        })
    }

    /// Re-orients `rect`, a sub-rectangle of a box of size `size` anchored at
    /// the origin, so that it describes the same region after the box has been
    /// transformed by `self` and moved back to the origin.
    #[must_use]
    pub fn map_rect_in(self, rect: Rect, size: Size) -> Rect {
        let affine = self.to_affine();
        let frame = affine.transform_rect_bbox(Rect::from_origin_size((0.0, 0.0), size));
        affine.transform_rect_bbox(rect) - frame.origin().to_vec2()
    }

    /// Returns a short human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Rotate90 => "90",
            Self::Rotate180 => "180",
            Self::Rotate270 => "270",
            Self::Flipped => "flipped",
            Self::Flipped90 => "flipped-90",
            Self::Flipped180 => "flipped-180",
            Self::Flipped270 => "flipped-270",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat_mul(lhs: [f64; 4], rhs: [f64; 4]) -> [f64; 4] {
        [
            lhs[0] * rhs[0] + lhs[2] * rhs[1],
            lhs[1] * rhs[0] + lhs[3] * rhs[1],
            lhs[0] * rhs[2] + lhs[2] * rhs[3],
            lhs[1] * rhs[2] + lhs[3] * rhs[3],
        ]
    }

    #[test]
    fn bits_round_trip() {
        for (i, d) in Dihedral::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(d.bits()), i);
            assert_eq!(Dihedral::from_bits(d.bits()), d);
            assert_eq!(Dihedral::from_parts(d.is_flipped(), d.quarter_turns()), d);
        }
    }

    #[test]
    fn identity_is_neutral() {
        for d in Dihedral::ALL {
            assert_eq!(d.combine(Dihedral::Normal), d);
            assert_eq!(Dihedral::Normal.combine(d), d);
        }
    }

    #[test]
    fn inverse_laws() {
        for d in Dihedral::ALL {
            assert_eq!(d.combine(d.invert()), Dihedral::Normal, "{d:?}");
            assert_eq!(d.invert().combine(d), Dihedral::Normal, "{d:?}");
            assert_eq!(d.invert().invert(), d);
        }
        assert_eq!(Dihedral::Rotate90.invert(), Dihedral::Rotate270);
        assert_eq!(Dihedral::Flipped90.invert(), Dihedral::Flipped90);
    }

    #[test]
    fn combine_is_associative() {
        for a in Dihedral::ALL {
            for b in Dihedral::ALL {
                for c in Dihedral::ALL {
                    assert_eq!(a.combine(b).combine(c), a.combine(b.combine(c)));
                }
            }
        }
    }

    #[test]
    fn composition_table() {
        assert_eq!(
            Dihedral::Rotate90.combine(Dihedral::Rotate90),
            Dihedral::Rotate180
        );
        assert_eq!(Dihedral::Flipped.combine(Dihedral::Flipped), Dihedral::Normal);
        // Mirror then turn is the same map as turning the other way, then
        // mirroring: R · F = F · R³.
        assert_eq!(
            Dihedral::Flipped.combine(Dihedral::Rotate90),
            Dihedral::Rotate270.combine(Dihedral::Flipped)
        );
        assert_eq!(
            Dihedral::Flipped.combine(Dihedral::Rotate90),
            Dihedral::Flipped90
        );
        assert_eq!(
            Dihedral::Rotate90.combine(Dihedral::Flipped),
            Dihedral::Flipped270
        );
    }

    #[test]
    fn combine_matches_matrix_product() {
        for a in Dihedral::ALL {
            for b in Dihedral::ALL {
                assert_eq!(
                    a.combine(b).to_matrix(),
                    mat_mul(b.to_matrix(), a.to_matrix()),
                    "{a:?} then {b:?}"
                );
            }
        }
    }

    #[test]
    fn group_is_non_abelian() {
        assert_ne!(
            Dihedral::Flipped.combine(Dihedral::Rotate90),
            Dihedral::Rotate90.combine(Dihedral::Flipped)
        );
    }

    #[test]
    fn swaps_xy_for_odd_turns() {
        let swapping: [Dihedral; 4] = [
            Dihedral::Rotate90,
            Dihedral::Rotate270,
            Dihedral::Flipped90,
            Dihedral::Flipped270,
        ];
        for d in Dihedral::ALL {
            assert_eq!(d.swaps_xy(), swapping.contains(&d), "{d:?}");
            let [xx, _, _, yy] = d.to_matrix();
            assert_eq!(d.swaps_xy(), xx == 0.0 && yy == 0.0);
        }
    }

    #[test]
    fn from_linear_recovers_scale_and_element() {
        for d in Dihedral::ALL {
            let linear = mat_mul([2.0, 0.0, 0.0, 3.0], d.to_matrix());
            let (found, sx, sy) = Dihedral::from_linear(linear).unwrap();
            assert_eq!(found, d);
            assert_eq!((sx, sy), (2.0, 3.0));
        }
        assert!(Dihedral::from_linear([1.0, 0.5, 0.0, 1.0]).is_none());
        assert!(Dihedral::from_linear([0.0, 0.0, 0.0, 1.0]).is_none());
    }

    #[test]
    fn map_rect_in_quarter_turn() {
        let size = Size::new(100.0, 50.0);
        let rect = Rect::new(0.0, 0.0, 10.0, 5.0);
        // After a clockwise quarter turn the top-left corner lands top-right.
        let mapped = Dihedral::Rotate90.map_rect_in(rect, size);
        assert_eq!(mapped, Rect::new(45.0, 0.0, 50.0, 10.0));
        assert_eq!(Dihedral::Normal.map_rect_in(rect, size), rect);
        let whole = Rect::from_origin_size((0.0, 0.0), size);
        assert_eq!(
            Dihedral::Flipped270.map_rect_in(whole, size),
            Rect::new(0.0, 0.0, 50.0, 100.0)
        );
    }
}
