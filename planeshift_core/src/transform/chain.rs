// Copyright 2026 the Planeshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Affine, Rect, Vec2};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use super::{Transform3d, TransformCategory};
use crate::dihedral::Dihedral;

/// A single operation in a [`Transform`] chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformOp {
    /// An arbitrary matrix with a caller-supplied category.
    Matrix {
        /// The matrix.
        matrix: Transform3d,
        /// The narrowest category the matrix is known to belong to.
        category: TransformCategory,
    },
    /// A 2D translation.
    Translate(Vec2),
    /// A 3D translation.
    Translate3d([f64; 3]),
    /// A clockwise rotation around the Z axis, in degrees within `[0, 360)`.
    Rotate(f64),
    /// A rotation around an arbitrary axis.
    Rotate3d {
        /// Angle in degrees.
        degrees: f64,
        /// Rotation axis; never parallel to Z (those become [`Rotate`](Self::Rotate)).
        axis: [f64; 3],
    },
    /// A 2D axis scale.
    Scale {
        /// Horizontal factor.
        x: f64,
        /// Vertical factor.
        y: f64,
    },
    /// A 3D axis scale.
    Scale3d([f64; 3]),
    /// A perspective projection with the viewer at the given depth.
    Perspective(f64),
}

impl TransformOp {
    /// Returns the category of this operation on its own.
    #[must_use]
    pub fn category(&self) -> TransformCategory {
        match *self {
            Self::Matrix { category, .. } => category,
            Self::Translate(_) => TransformCategory::Translate,
            Self::Translate3d([_, _, z]) if z == 0.0 => TransformCategory::Translate,
            Self::Translate3d(_) | Self::Rotate3d { .. } => TransformCategory::ThreeD,
            Self::Rotate(degrees) => {
                if quarter_turns(degrees).is_some() {
                    TransformCategory::Dihedral
                } else {
                    TransformCategory::TwoD
                }
            }
            Self::Scale { x, y } | Self::Scale3d([x, y, 1.0]) => {
                if x >= 0.0 && y >= 0.0 {
                    TransformCategory::Affine
                } else {
                    TransformCategory::NegativeAffine
                }
            }
            Self::Scale3d(_) => TransformCategory::ThreeD,
            Self::Perspective(_) => TransformCategory::Any,
        }
    }

    /// Returns the matrix form of this operation.
    #[must_use]
    pub fn to_matrix(&self) -> Transform3d {
        match *self {
            Self::Matrix { matrix, .. } => matrix,
            Self::Translate(v) => Transform3d::from_translation(v.x, v.y, 0.0),
            Self::Translate3d([x, y, z]) => Transform3d::from_translation(x, y, z),
            Self::Rotate(degrees) => match quarter_turns(degrees) {
                Some(turns) => Transform3d::from_affine(Dihedral::from_parts(false, turns).to_affine()),
                None => Transform3d::from_rotation_z(degrees),
            },
            Self::Rotate3d { degrees, axis } => Transform3d::from_rotation_axis(degrees, axis),
            Self::Scale { x, y } => Transform3d::from_scale(x, y, 1.0),
            Self::Scale3d([x, y, z]) => Transform3d::from_scale(x, y, z),
            Self::Perspective(depth) => Transform3d::from_perspective(depth),
        }
    }

    fn invert(&self) -> Option<Self> {
        Some(match *self {
            Self::Matrix { matrix, category } => Self::Matrix {
                matrix: matrix.inverse()?,
                category,
            },
            Self::Translate(v) => Self::Translate(-v),
            Self::Translate3d([x, y, z]) => Self::Translate3d([-x, -y, -z]),
            Self::Rotate(degrees) => Self::Rotate(normalize_degrees(-degrees)),
            Self::Rotate3d { degrees, axis } => Self::Rotate3d {
                degrees: -degrees,
                axis,
            },
            Self::Scale { x, y } => {
                if x == 0.0 || y == 0.0 {
                    return None;
                }
                Self::Scale { x: 1.0 / x, y: 1.0 / y }
            }
            Self::Scale3d([x, y, z]) => {
                if x == 0.0 || y == 0.0 || z == 0.0 {
                    return None;
                }
                Self::Scale3d([1.0 / x, 1.0 / y, 1.0 / z])
            }
            Self::Perspective(depth) => Self::Perspective(-depth),
        })
    }
}

/// The decomposition of a dihedral-category transform.
///
/// The transform equals `translate(dx, dy) · scale(scale_x, scale_y) ·
/// dihedral`, with both scale factors non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DihedralParts {
    /// The rotation/flip component, applied first.
    pub dihedral: Dihedral,
    /// Horizontal scale, applied after the dihedral element.
    pub scale_x: f64,
    /// Vertical scale, applied after the dihedral element.
    pub scale_y: f64,
    /// Horizontal offset, applied last.
    pub dx: f64,
    /// Vertical offset, applied last.
    pub dy: f64,
}

impl DihedralParts {
    /// The decomposition of the identity.
    pub const IDENTITY: Self = Self {
        dihedral: Dihedral::Normal,
        scale_x: 1.0,
        scale_y: 1.0,
        dx: 0.0,
        dy: 0.0,
    };

    /// Recomposes the parts into an affine transform.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate((self.dx, self.dy))
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
            * self.dihedral.to_affine()
    }

    // Folds one more inner operation into the parts accumulated so far.
    fn push_translate(&mut self, v: Vec2) {
        let [a, b, c, d] = self.dihedral.to_matrix();
        let px = a * v.x + c * v.y;
        let py = b * v.x + d * v.y;
        self.dx += self.scale_x * px;
        self.dy += self.scale_y * py;
    }

    fn push_scale(&mut self, x: f64, y: f64) {
        let sign = match (x < 0.0, y < 0.0) {
            (false, false) => Dihedral::Normal,
            (true, false) => Dihedral::Flipped,
            (false, true) => Dihedral::Flipped180,
            (true, true) => Dihedral::Rotate180,
        };
        let (x, y) = if self.dihedral.swaps_xy() {
            (y.abs(), x.abs())
        } else {
            (x.abs(), y.abs())
        };
        self.scale_x *= x;
        self.scale_y *= y;
        self.dihedral = sign.combine(self.dihedral);
    }

    fn push_dihedral(&mut self, inner: Dihedral) {
        self.dihedral = inner.combine(self.dihedral);
    }

    fn push_affine(&mut self, affine: Affine) -> Option<()> {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        let (dihedral, sx, sy) = Dihedral::from_linear([a, b, c, d])?;
        self.push_translate(Vec2::new(e, f));
        self.push_scale(sx, sy);
        self.push_dihedral(dihedral);
        Some(())
    }
}

#[derive(Debug)]
struct Link {
    op: TransformOp,
    next: Transform,
    category: TransformCategory,
}

/// An immutable chain of transform operations.
///
/// Chains are cheap to clone and share their tails. Building methods such as
/// [`translate`](Self::translate) return a new chain whose new operation is
/// applied to points *before* the existing chain, matching the reading order
/// of nested transform nodes: `parent.translate(v).rotate(90.0)` rotates a
/// point, then translates it, then applies `parent`.
#[derive(Clone, Default)]
pub struct Transform {
    head: Option<Arc<Link>>,
}

impl Transform {
    /// The identity chain.
    #[inline]
    #[must_use]
    pub const fn identity() -> Self {
        Self { head: None }
    }

    /// Returns `true` if the chain has no operations.
    #[inline]
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the category of the whole chain.
    #[inline]
    #[must_use]
    pub fn category(&self) -> TransformCategory {
        self.head
            .as_ref()
            .map_or(TransformCategory::Identity, |link| link.category)
    }

    /// Iterates the operations from the first applied to the last applied.
    pub fn ops(&self) -> impl Iterator<Item = &TransformOp> + '_ {
        let mut cursor = self.head.as_deref();
        core::iter::from_fn(move || {
            let link = cursor?;
            cursor = link.next.head.as_deref();
            Some(&link.op)
        })
    }

    /// Prepends an operation, eliding no-ops and merging with a compatible head.
    #[must_use]
    pub fn push(&self, op: TransformOp) -> Self {
        let op = match op {
            TransformOp::Rotate(degrees) => TransformOp::Rotate(normalize_degrees(degrees)),
            op => op,
        };
        match (op, self.head.as_deref()) {
            (TransformOp::Translate(v), _) if v == Vec2::ZERO => self.clone(),
            (TransformOp::Rotate(degrees), _) if degrees == 0.0 => self.clone(),
            (TransformOp::Scale { x: 1.0, y: 1.0 }, _) => self.clone(),
            (TransformOp::Translate(v), Some(link)) => {
                if let TransformOp::Translate(w) = link.op {
                    return link.next.push(TransformOp::Translate(v + w));
                }
                self.link(op)
            }
            (TransformOp::Rotate(degrees), Some(link)) => {
                if let TransformOp::Rotate(other) = link.op {
                    return link
                        .next
                        .push(TransformOp::Rotate(normalize_degrees(degrees + other)));
                }
                self.link(op)
            }
            (TransformOp::Scale { x, y }, Some(link)) => {
                if let TransformOp::Scale { x: ox, y: oy } = link.op {
                    return link.next.push(TransformOp::Scale {
                        x: x * ox,
                        y: y * oy,
                    });
                }
                self.link(op)
            }
            _ => self.link(op),
        }
    }

    fn link(&self, op: TransformOp) -> Self {
        let category = op.category().min(self.category());
        Self {
            head: Some(Arc::new(Link {
                op,
                next: self.clone(),
                category,
            })),
        }
    }

    /// Prepends a 2D translation.
    #[must_use]
    pub fn translate(&self, offset: impl Into<Vec2>) -> Self {
        self.push(TransformOp::Translate(offset.into()))
    }

    /// Prepends a 3D translation.
    #[must_use]
    pub fn translate_3d(&self, x: f64, y: f64, z: f64) -> Self {
        if z == 0.0 {
            return self.translate((x, y));
        }
        self.push(TransformOp::Translate3d([x, y, z]))
    }

    /// Prepends a clockwise rotation around the Z axis, in degrees.
    #[must_use]
    pub fn rotate(&self, degrees: f64) -> Self {
        self.push(TransformOp::Rotate(normalize_degrees(degrees)))
    }

    /// Prepends a rotation around an arbitrary axis, in degrees.
    #[must_use]
    pub fn rotate_3d(&self, degrees: f64, axis: [f64; 3]) -> Self {
        match axis {
            [x, y, z] if x == 0.0 && y == 0.0 && z > 0.0 => self.rotate(degrees),
            [x, y, z] if x == 0.0 && y == 0.0 && z < 0.0 => self.rotate(-degrees),
            _ => self.push(TransformOp::Rotate3d { degrees, axis }),
        }
    }

    /// Prepends a 2D axis scale.
    #[must_use]
    pub fn scale(&self, x: f64, y: f64) -> Self {
        self.push(TransformOp::Scale { x, y })
    }

    /// Prepends a 3D axis scale.
    #[must_use]
    pub fn scale_3d(&self, x: f64, y: f64, z: f64) -> Self {
        if z == 1.0 {
            return self.scale(x, y);
        }
        self.push(TransformOp::Scale3d([x, y, z]))
    }

    /// Prepends a perspective projection.
    #[must_use]
    pub fn perspective(&self, depth: f64) -> Self {
        self.push(TransformOp::Perspective(depth))
    }

    /// Prepends an opaque matrix. Its category is [`TransformCategory::Unknown`].
    #[must_use]
    pub fn matrix(&self, matrix: Transform3d) -> Self {
        self.push(TransformOp::Matrix {
            matrix,
            category: TransformCategory::Unknown,
        })
    }

    /// Prepends a 2D affine matrix.
    ///
    /// Matrices whose linear part is a positive scale times a dihedral element
    /// are split into translate, scale, and rotation links so that they keep a
    /// dihedral category. Anything else becomes a [`TransformCategory::TwoD`]
    /// matrix link.
    #[must_use]
    pub fn matrix_2d(&self, affine: Affine) -> Self {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        match Dihedral::from_linear([a, b, c, d]) {
            Some((dihedral, sx, sy)) => self.translate((e, f)).scale(sx, sy).dihedral(dihedral),
            None => self.push(TransformOp::Matrix {
                matrix: Transform3d::from_affine(affine),
                category: TransformCategory::TwoD,
            }),
        }
    }

    /// Prepends a dihedral element.
    #[must_use]
    pub fn dihedral(&self, dihedral: Dihedral) -> Self {
        let rotated = self.rotate(f64::from(dihedral.quarter_turns()) * 90.0);
        if dihedral.is_flipped() {
            rotated.scale(-1.0, 1.0)
        } else {
            rotated
        }
    }

    /// Returns the chain that applies `self` first and `outer` afterwards.
    #[must_use]
    pub fn then(&self, outer: &Self) -> Self {
        if self.is_identity() {
            return outer.clone();
        }
        let ops: Vec<TransformOp> = self.ops().copied().collect();
        ops.into_iter().rev().fold(outer.clone(), |acc, op| acc.push(op))
    }

    /// Returns the inverse chain, or `None` if any operation is singular.
    #[must_use]
    pub fn invert(&self) -> Option<Self> {
        let mut out = Self::identity();
        for op in self.ops() {
            out = out.push(op.invert()?);
        }
        Some(out)
    }

    /// Flattens the chain into a single matrix.
    #[must_use]
    pub fn to_matrix(&self) -> Transform3d {
        self.ops()
            .fold(Transform3d::IDENTITY, |acc, op| op.to_matrix() * acc)
    }

    /// Returns the chain as a 2D affine transform, if it stays in the xy-plane.
    #[must_use]
    pub fn to_affine(&self) -> Option<Affine> {
        if let Some(parts) = self.to_dihedral() {
            return Some(parts.to_affine());
        }
        if !self.category().is_2d() {
            return None;
        }
        self.to_matrix().to_affine()
    }

    /// Decomposes a dihedral-category chain.
    ///
    /// Returns `None` unless [`category`](Self::category) is at least
    /// [`TransformCategory::Dihedral`].
    #[must_use]
    pub fn to_dihedral(&self) -> Option<DihedralParts> {
        if !self.category().is_dihedral() {
            return None;
        }
        let ops: Vec<&TransformOp> = self.ops().collect();
        let mut parts = DihedralParts::IDENTITY;
        for op in ops.into_iter().rev() {
            match *op {
                TransformOp::Translate(v) => parts.push_translate(v),
                TransformOp::Translate3d([x, y, _]) => parts.push_translate(Vec2::new(x, y)),
                TransformOp::Scale { x, y } | TransformOp::Scale3d([x, y, _]) => {
                    parts.push_scale(x, y);
                }
                TransformOp::Rotate(degrees) => {
                    parts.push_dihedral(Dihedral::from_parts(false, quarter_turns(degrees)?));
                }
                TransformOp::Matrix { matrix, .. } => parts.push_affine(matrix.to_affine()?)?,
                TransformOp::Rotate3d { .. } | TransformOp::Perspective(_) => return None,
            }
        }
        Some(parts)
    }

    /// Maps `rect` through the chain and returns the bounding box.
    #[must_use]
    pub fn transform_bounds(&self, rect: Rect) -> Rect {
        match self.category() {
            TransformCategory::Identity => rect,
            TransformCategory::Translate => {
                let offset = self.ops().fold(Vec2::ZERO, |acc, op| match *op {
                    TransformOp::Translate(v) => acc + v,
                    TransformOp::Translate3d([x, y, _]) => acc + Vec2::new(x, y),
                    _ => acc,
                });
                rect + offset
            }
            _ => match self.to_dihedral() {
                Some(parts) => parts.to_affine().transform_rect_bbox(rect),
                None => self.to_matrix().project_rect_bbox(rect),
            },
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ops()).finish()
    }
}

impl From<Dihedral> for Transform {
    fn from(dihedral: Dihedral) -> Self {
        Self::identity().dihedral(dihedral)
    }
}

fn normalize_degrees(degrees: f64) -> f64 {
    let r = degrees % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

// Quarter turns of an angle, if it is a multiple of 90°.
fn quarter_turns(degrees: f64) -> Option<u8> {
    let turns = normalize_degrees(degrees) / 90.0;
    if turns != turns.round() {
        return None;
    }
    #[expect(clippy::cast_possible_truncation, reason = "angle is normalized to [0, 360)")]
    let turns = turns as u8;
    Some(turns & 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rect_near(a: Rect, b: Rect) {
        assert!(
            (a.x0 - b.x0).abs() < 1e-9
                && (a.y0 - b.y0).abs() < 1e-9
                && (a.x1 - b.x1).abs() < 1e-9
                && (a.y1 - b.y1).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    fn assert_affine_near(a: Affine, b: Affine) {
        for (x, y) in a.as_coeffs().iter().zip(b.as_coeffs()) {
            assert!((x - y).abs() < 1e-9, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn identity_category() {
        let t = Transform::identity();
        assert_eq!(t.category(), TransformCategory::Identity);
        assert_eq!(t.to_dihedral(), Some(DihedralParts::IDENTITY));
        assert_eq!(t.to_matrix(), Transform3d::IDENTITY);
    }

    #[test]
    fn no_op_links_are_elided() {
        let t = Transform::identity()
            .translate((0.0, 0.0))
            .rotate(360.0)
            .scale(1.0, 1.0);
        assert!(t.is_identity());
    }

    #[test]
    fn adjacent_links_merge() {
        let t = Transform::identity().rotate(45.0).rotate(45.0);
        assert_eq!(t.ops().count(), 1);
        assert_eq!(t.category(), TransformCategory::Dihedral);

        let t = Transform::identity().translate((1.0, 2.0)).translate((3.0, 4.0));
        assert_eq!(t.ops().copied().collect::<Vec<_>>(), [TransformOp::Translate(Vec2::new(4.0, 6.0))]);

        let t = Transform::identity().rotate(90.0).rotate(-90.0);
        assert!(t.is_identity());
    }

    #[test]
    fn pushed_negative_quarter_turn_is_normalized() {
        let pushed = Transform::identity().push(TransformOp::Rotate(-90.0));
        let rotated = Transform::identity().rotate(270.0);
        assert_eq!(pushed.ops().copied().collect::<Vec<_>>(), [TransformOp::Rotate(270.0)]);
        assert_eq!(pushed.category(), TransformCategory::Dihedral);
        assert_eq!(pushed.to_dihedral(), rotated.to_dihedral());
        assert_eq!(
            pushed.to_dihedral().map(|p| p.dihedral),
            Some(Dihedral::Rotate270)
        );

        // Ops built by hand classify the same way.
        assert_eq!(TransformOp::Rotate(-90.0).category(), TransformCategory::Dihedral);
        assert_eq!(
            TransformOp::Rotate(-90.0).to_matrix(),
            TransformOp::Rotate(270.0).to_matrix()
        );
        assert_eq!(TransformOp::Rotate(-450.0).to_matrix(), TransformOp::Rotate(270.0).to_matrix());
    }

    #[test]
    fn categories_of_links() {
        let id = Transform::identity();
        assert_eq!(id.translate((1.0, 0.0)).category(), TransformCategory::Translate);
        assert_eq!(id.scale(2.0, 3.0).category(), TransformCategory::Affine);
        assert_eq!(id.scale(-2.0, 3.0).category(), TransformCategory::NegativeAffine);
        assert_eq!(id.rotate(270.0).category(), TransformCategory::Dihedral);
        assert_eq!(id.rotate(37.0).category(), TransformCategory::TwoD);
        assert_eq!(id.translate_3d(0.0, 0.0, 1.0).category(), TransformCategory::ThreeD);
        assert_eq!(id.rotate_3d(30.0, [1.0, 0.0, 0.0]).category(), TransformCategory::ThreeD);
        assert_eq!(id.rotate_3d(90.0, [0.0, 0.0, 1.0]).category(), TransformCategory::Dihedral);
        assert_eq!(id.perspective(100.0).category(), TransformCategory::Any);
        assert_eq!(id.matrix(Transform3d::IDENTITY).category(), TransformCategory::Unknown);
        assert_eq!(
            id.matrix_2d(Affine::new([1.0, 0.5, 0.0, 1.0, 0.0, 0.0])).category(),
            TransformCategory::TwoD
        );
    }

    #[test]
    fn composition_never_refines_category() {
        let chains = [
            Transform::identity(),
            Transform::identity().translate((3.0, 4.0)),
            Transform::identity().scale(2.0, 0.5),
            Transform::identity().scale(-1.0, 1.0),
            Transform::identity().rotate(90.0),
            Transform::identity().rotate(10.0),
            Transform::identity().translate_3d(0.0, 0.0, 5.0),
            Transform::identity().perspective(50.0),
            Transform::identity().matrix(Transform3d::from_scale(2.0, 2.0, 2.0)),
        ];
        for t in &chains {
            for u in &chains {
                let composed = t.then(u);
                assert!(
                    composed.category() <= t.category().min(u.category())
                        || composed.is_identity(),
                    "{t:?} then {u:?} -> {:?}",
                    composed.category()
                );
            }
        }
    }

    #[test]
    fn then_applies_inner_first() {
        let inner = Transform::identity().scale(2.0, 2.0);
        let outer = Transform::identity().translate((10.0, 0.0));
        let t = inner.then(&outer);
        let r = t.transform_bounds(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_rect_near(r, Rect::new(10.0, 0.0, 12.0, 2.0));
    }

    #[test]
    fn rotate_90_bounds_swap_axes() {
        let t = Transform::identity().rotate(90.0);
        let r = t.transform_bounds(Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_rect_near(r, Rect::new(-50.0, 0.0, 0.0, 100.0));
    }

    #[test]
    fn dihedral_decomposition_matches_matrix() {
        let t = Transform::identity()
            .translate((5.0, 7.0))
            .rotate(90.0)
            .scale(2.0, -3.0)
            .translate((1.0, 1.0))
            .rotate(180.0)
            .scale(-0.5, 4.0);
        let parts = t.to_dihedral().unwrap();
        assert!(parts.scale_x >= 0.0 && parts.scale_y >= 0.0, "{parts:?}");
        assert_affine_near(parts.to_affine(), t.to_matrix().to_affine().unwrap());
    }

    #[test]
    fn dihedral_round_trips_through_chain() {
        for d in Dihedral::ALL {
            let parts = Transform::from(d).to_dihedral().unwrap();
            assert_eq!(parts.dihedral, d);
            assert_eq!((parts.scale_x, parts.scale_y), (1.0, 1.0));
        }
    }

    #[test]
    fn matrix_2d_keeps_dihedral_category() {
        let affine = Affine::new([0.0, 2.0, -3.0, 0.0, 4.0, 5.0]);
        let t = Transform::identity().matrix_2d(affine);
        assert!(t.category().is_dihedral());
        let parts = t.to_dihedral().unwrap();
        assert_eq!(parts.dihedral, Dihedral::Rotate90);
        assert_affine_near(parts.to_affine(), affine);
    }

    #[test]
    fn non_dihedral_rotation_has_no_decomposition() {
        assert!(Transform::identity().rotate(37.0).to_dihedral().is_none());
    }

    #[test]
    fn invert_undoes_chain() {
        let t = Transform::identity()
            .translate((5.0, -2.0))
            .rotate(30.0)
            .scale(2.0, 4.0)
            .translate_3d(1.0, 2.0, 3.0);
        let inv = t.invert().unwrap();
        let m = t.to_matrix() * inv.to_matrix();
        for j in 0..4 {
            for i in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((m.cols[j][i] - expected).abs() < 1e-9, "{m:?}");
            }
        }
        assert!(Transform::identity().scale(0.0, 1.0).invert().is_none());
    }

    #[test]
    fn invert_of_dihedral_is_group_inverse() {
        for d in Dihedral::ALL {
            let inv = Transform::from(d).invert().unwrap();
            assert_eq!(inv.to_dihedral().unwrap().dihedral, d.invert());
        }
    }

    #[test]
    fn to_affine_of_3d_is_none() {
        assert!(Transform::identity().translate_3d(0.0, 0.0, 1.0).to_affine().is_none());
        assert!(Transform::identity().rotate(10.0).to_affine().is_some());
    }
}
