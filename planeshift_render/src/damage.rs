// Copyright 2026 the Planeshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial damage tracking for partial re-rendering.

use alloc::vec::Vec;

use kurbo::Rect;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// A region of the output that needs re-rendering.
///
/// Backends can use this to minimize GPU work by only redrawing areas
/// that changed since the last frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DamageRegion {
    /// The entire output needs redrawing.
    #[default]
    Full,
    /// A list of pixel-aligned rectangles that need redrawing, in output
    /// coordinates.
    Rects(Vec<Rect>),
    /// Nothing changed; the previous frame can be reused.
    None,
}

impl DamageRegion {
    /// Returns `true` if no region needs redrawing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Adds `rect`, expanded outward to whole pixels. Empty rectangles are
    /// ignored.
    pub fn add_rect(&mut self, rect: Rect) {
        let rect = Rect::new(
            rect.x0.floor(),
            rect.y0.floor(),
            rect.x1.ceil(),
            rect.y1.ceil(),
        );
        if rect.is_zero_area() {
            return;
        }
        match self {
            Self::Full => {}
            Self::Rects(rects) => rects.push(rect),
            Self::None => *self = Self::Rects(alloc::vec![rect]),
        }
    }

    /// Merges another damage region into this one.
    pub fn merge(&mut self, other: &Self) {
        match other {
            Self::None => {}
            Self::Full => *self = Self::Full,
            Self::Rects(b) => match self {
                Self::Full => {}
                Self::None => *self = other.clone(),
                Self::Rects(a) => a.extend_from_slice(b),
            },
        }
    }

    /// Returns the rectangles, or an empty slice for [`Full`](Self::Full)
    /// and [`None`](Self::None).
    #[must_use]
    pub fn rects(&self) -> &[Rect] {
        match self {
            Self::Rects(rects) => rects,
            Self::Full | Self::None => &[],
        }
    }

    /// Returns the bounding box of the damage, using `viewport` for
    /// [`Full`](Self::Full).
    #[must_use]
    pub fn union_rect(&self, viewport: Rect) -> Option<Rect> {
        match self {
            Self::Full => Some(viewport),
            Self::Rects(rects) => rects.iter().copied().reduce(|a, b| a.union(b)),
            Self::None => None,
        }
    }
}
