// Copyright 2026 the Planeshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clip shapes and their intersection.
//!
//! The intersection of two clip shapes is not always representable as a
//! single shape. [`ClipShape::intersect`] resolves the cases that matter for
//! overlay planning exactly and reports everything else as
//! [`ClipIntersection::Complex`].

use kurbo::{Rect, RoundedRect, RoundedRectRadii};

use crate::transform::Transform;

/// A shape used to clip content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClipShape {
    /// An axis-aligned rectangle.
    Rect(Rect),
    /// A rectangle with rounded corners.
    RoundedRect(RoundedRect),
}

/// The result of intersecting two clip shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClipIntersection {
    /// The shapes do not overlap.
    Empty,
    /// The intersection is an axis-aligned rectangle.
    Rect(Rect),
    /// The intersection is a rounded rectangle.
    Rounded(RoundedRect),
    /// The intersection has no single-shape representation.
    Complex,
}

impl ClipIntersection {
    /// Returns the intersection as a shape, if it is one.
    #[must_use]
    pub fn shape(self) -> Option<ClipShape> {
        match self {
            Self::Rect(rect) => Some(ClipShape::Rect(rect)),
            Self::Rounded(rr) => Some(ClipShape::RoundedRect(rr)),
            Self::Empty | Self::Complex => None,
        }
    }
}

impl ClipShape {
    /// Returns the bounding rectangle.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rect(rect) => *rect,
            Self::RoundedRect(rr) => rr.rect(),
        }
    }

    /// Returns the radii, all zero for a plain rectangle.
    #[must_use]
    pub fn radii(&self) -> RoundedRectRadii {
        match self {
            Self::Rect(_) => RoundedRectRadii::from_single_radius(0.0),
            Self::RoundedRect(rr) => rr.radii(),
        }
    }

    /// Returns the shape as a rounded rectangle.
    #[must_use]
    pub fn to_rounded_rect(&self) -> RoundedRect {
        RoundedRect::from_rect(self.bounds(), self.radii())
    }

    /// Returns `true` if no corner is rounded.
    #[must_use]
    pub fn is_rectilinear(&self) -> bool {
        let r = self.radii();
        r.top_left == 0.0 && r.top_right == 0.0 && r.bottom_right == 0.0 && r.bottom_left == 0.0
    }

    /// Returns `true` if the shape encloses no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bounds().is_zero_area()
    }

    /// Returns `true` if `rect` lies entirely inside the shape.
    ///
    /// For rounded shapes this is conservative: `rect` must fit in the
    /// horizontal or vertical band left after insetting the corners.
    #[must_use]
    pub fn contains_rect(&self, rect: Rect) -> bool {
        let b = self.bounds();
        if self.is_rectilinear() {
            return rect_contains(b, rect);
        }
        let r = self.radii();
        let horizontal = Rect::new(
            b.x0,
            b.y0 + r.top_left.max(r.top_right),
            b.x1,
            b.y1 - r.bottom_left.max(r.bottom_right),
        );
        let vertical = Rect::new(
            b.x0 + r.top_left.max(r.bottom_left),
            b.y0,
            b.x1 - r.top_right.max(r.bottom_right),
            b.y1,
        );
        rect_contains(horizontal, rect) || rect_contains(vertical, rect)
    }

    /// Maps the shape through a transform.
    ///
    /// Returns `None` unless the transform is dihedral. Rounded corners
    /// additionally require a uniform scale.
    #[must_use]
    pub fn transformed(&self, transform: &Transform) -> Option<Self> {
        let parts = transform.to_dihedral()?;
        let bounds = parts.to_affine().transform_rect_bbox(self.bounds());
        if self.is_rectilinear() {
            return Some(Self::Rect(bounds));
        }
        if parts.scale_x != parts.scale_y {
            return None;
        }
        let s = parts.scale_x;
        let src = self.radii();
        let [a, b, c, d] = parts.dihedral.to_matrix();
        let mut radii = RoundedRectRadii::from_single_radius(0.0);
        let corners = [
            (-1.0, -1.0, src.top_left),
            (1.0, -1.0, src.top_right),
            (1.0, 1.0, src.bottom_right),
            (-1.0, 1.0, src.bottom_left),
        ];
        for (x, y, radius) in corners {
            let slot = match (a * x + c * y < 0.0, b * x + d * y < 0.0) {
                (true, true) => &mut radii.top_left,
                (false, true) => &mut radii.top_right,
                (false, false) => &mut radii.bottom_right,
                (true, false) => &mut radii.bottom_left,
            };
            *slot = radius * s;
        }
        Some(Self::RoundedRect(RoundedRect::from_rect(bounds, radii)))
    }

    /// Intersects the shape with an axis-aligned rectangle.
    #[must_use]
    pub fn intersect_rect(&self, rect: Rect) -> ClipIntersection {
        match self {
            Self::Rect(a) => intersect_rects(*a, rect),
            Self::RoundedRect(rr) if self.is_rectilinear() => intersect_rects(rr.rect(), rect),
            Self::RoundedRect(rr) => intersect_rounded_with_rect(*rr, rect),
        }
    }

    /// Intersects two shapes.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> ClipIntersection {
        if other.is_rectilinear() {
            return self.intersect_rect(other.bounds());
        }
        if self.is_rectilinear() {
            return other.intersect_rect(self.bounds());
        }
        let (a, b) = (self.to_rounded_rect(), other.to_rounded_rect());
        if a == b {
            return ClipIntersection::Rounded(a);
        }
        if !rects_overlap(a.rect(), b.rect()) {
            return ClipIntersection::Empty;
        }
        if self.contains_rect(b.rect()) {
            return ClipIntersection::Rounded(b);
        }
        if other.contains_rect(a.rect()) {
            return ClipIntersection::Rounded(a);
        }
        ClipIntersection::Complex
    }
}

impl From<Rect> for ClipShape {
    fn from(rect: Rect) -> Self {
        Self::Rect(rect)
    }
}

impl From<RoundedRect> for ClipShape {
    fn from(rr: RoundedRect) -> Self {
        Self::RoundedRect(rr)
    }
}

/// Returns `true` if `inner` lies within `outer` (edges may touch).
#[must_use]
pub fn rect_contains(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

/// Returns `true` if the rectangles share a region of non-zero area.
#[must_use]
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

fn intersect_rects(a: Rect, b: Rect) -> ClipIntersection {
    if rects_overlap(a, b) {
        ClipIntersection::Rect(a.intersect(b))
    } else {
        ClipIntersection::Empty
    }
}

fn intersect_rounded_with_rect(rr: RoundedRect, rect: Rect) -> ClipIntersection {
    let b = rr.rect();
    if !rects_overlap(b, rect) {
        return ClipIntersection::Empty;
    }
    let i = b.intersect(rect);
    let shape = ClipShape::RoundedRect(rr);
    let r = rr.radii();
    let limit = i.width().min(i.height()) / 2.0;

    // A corner of the intersection either coincides with the matching corner
    // of the rounded rect (and keeps its radius) or must lie in the region
    // where the rounded rect is square.
    let corner = |ix: f64, iy: f64, bx: f64, by: f64, radius: f64| -> Option<f64> {
        if ix == bx && iy == by {
            return (radius <= limit).then_some(radius);
        }
        shape
            .contains_rect(Rect::new(ix, iy, ix, iy))
            .then_some(0.0)
    };
    let radii = corner(i.x0, i.y0, b.x0, b.y0, r.top_left).and_then(|top_left| {
        Some(RoundedRectRadii::new(
            top_left,
            corner(i.x1, i.y0, b.x1, b.y0, r.top_right)?,
            corner(i.x1, i.y1, b.x1, b.y1, r.bottom_right)?,
            corner(i.x0, i.y1, b.x0, b.y1, r.bottom_left)?,
        ))
    });
    match radii {
        None => ClipIntersection::Complex,
        Some(radii) if radii == RoundedRectRadii::from_single_radius(0.0) => ClipIntersection::Rect(i),
        Some(radii) => ClipIntersection::Rounded(RoundedRect::from_rect(i, radii)),
    }
}
