// Copyright 2026 the Planeshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clip tracking during the scene walk.
//!
//! Frames are kept in output coordinates. Once a frame is known to fully
//! contain, exclude, or be unresolvable against the content below it, its
//! descendants inherit it without pushing further frames.

use alloc::vec::Vec;

use kurbo::Rect;
use planeshift_core::clip::{ClipIntersection, ClipShape, rects_overlap};

/// What is known about the content under a clip frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClipState {
    /// The shape is exact and may still cut the content below.
    Simplifiable,
    /// The content below lies entirely inside the clip.
    FullyContained,
    /// The content below is entirely clipped away.
    Empty,
    /// The clip cannot be expressed as a single shape.
    Complex,
}

/// One entry of the clip stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipFrame {
    /// The clip shape in output coordinates.
    pub shape: ClipShape,
    /// What is known about the content.
    pub state: ClipState,
}

impl ClipFrame {
    /// Returns `true` if the shape has no rounded corners.
    #[inline]
    #[must_use]
    pub fn is_rectilinear(&self) -> bool {
        self.shape.is_rectilinear()
    }

    /// Returns `true` if the content is known to be entirely inside.
    #[inline]
    #[must_use]
    pub fn is_fully_contained(&self) -> bool {
        self.state == ClipState::FullyContained
    }
}

/// Whether [`ClipStack::update`] pushed a frame that must be popped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClipUpdate {
    /// A frame was pushed.
    Pushed,
    /// The stack is unchanged.
    Unchanged,
}

/// A stack of clip frames above a base frame covering the output.
#[derive(Clone, Debug)]
pub struct ClipStack {
    base: ClipFrame,
    frames: Vec<ClipFrame>,
}

impl ClipStack {
    /// Creates a stack whose base frame covers `viewport`.
    #[must_use]
    pub fn new(viewport: Rect) -> Self {
        Self {
            base: Self::base_frame(viewport),
            frames: Vec::new(),
        }
    }

    /// Drops every pushed frame and re-seeds the base frame.
    pub fn reset(&mut self, viewport: Rect) {
        self.base = Self::base_frame(viewport);
        self.frames.clear();
    }

    fn base_frame(viewport: Rect) -> ClipFrame {
        ClipFrame {
            shape: ClipShape::Rect(viewport),
            state: ClipState::Simplifiable,
        }
    }

    /// Returns the current frame.
    #[must_use]
    pub fn top(&self) -> &ClipFrame {
        self.frames.last().unwrap_or(&self.base)
    }

    /// Returns the number of frames above the base frame.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn push_state(&mut self, state: ClipState) {
        let shape = self.top().shape;
        self.frames.push(ClipFrame { shape, state });
    }

    /// Pushes a frame marking the content as clipped away.
    pub fn push_empty(&mut self) {
        self.push_state(ClipState::Empty);
    }

    /// Pushes a frame marking the content as entirely visible.
    pub fn push_fully_contained(&mut self) {
        self.push_state(ClipState::FullyContained);
    }

    /// Pushes a frame marking the clip as unresolvable.
    pub fn push_complex(&mut self) {
        self.push_state(ClipState::Complex);
    }

    /// Pushes an exact clip shape.
    pub fn push_rect(&mut self, shape: impl Into<ClipShape>) {
        self.frames.push(ClipFrame {
            shape: shape.into(),
            state: ClipState::Simplifiable,
        });
    }

    /// Pushes the frame describing an intersection result.
    pub fn push_intersection(&mut self, intersection: ClipIntersection) {
        match intersection {
            ClipIntersection::Empty => self.push_empty(),
            ClipIntersection::Rect(rect) => self.push_rect(rect),
            ClipIntersection::Rounded(rr) => self.push_rect(rr),
            ClipIntersection::Complex => self.push_complex(),
        }
    }

    /// Pushes the frame for an explicit clip node.
    ///
    /// `clip` is the node's clip in output coordinates, or `None` if it
    /// could not be mapped there.
    pub fn push_clip(&mut self, clip: Option<ClipShape>) {
        let top = *self.top();
        match (top.state, clip) {
            (ClipState::Empty, _) => self.push_empty(),
            (ClipState::Complex, _) | (_, None) => self.push_complex(),
            (_, Some(clip)) => self.push_intersection(top.shape.intersect(&clip)),
        }
    }

    /// Removes the top frame. The base frame is never removed.
    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "clip stack underflow");
        self.frames.pop();
    }

    /// Narrows the current frame against content `bounds` (in output
    /// coordinates).
    ///
    /// Frames that are already fully contained, empty, or complex are
    /// inherited as they are. A rounded frame that neither contains nor
    /// excludes the bounds is also left in place.
    pub fn update(&mut self, bounds: Rect) -> ClipUpdate {
        let top = *self.top();
        if top.state != ClipState::Simplifiable {
            return ClipUpdate::Unchanged;
        }
        if !rects_overlap(top.shape.bounds(), bounds) {
            self.push_empty();
        } else if top.shape.contains_rect(bounds) {
            self.push_fully_contained();
        } else if top.is_rectilinear() {
            self.push_rect(top.shape.bounds().intersect(bounds));
        } else {
            return ClipUpdate::Unchanged;
        }
        ClipUpdate::Pushed
    }
}
