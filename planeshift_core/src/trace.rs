// Copyright 2026 the Planeshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for offload planning.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! planner calls while it walks a scene and reconciles overlay surfaces. All
//! method bodies default to no-ops, so implementing only the events you care
//! about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates per-frame damage rectangle events
//!   and the corresponding `TraceSink` method.

use kurbo::Rect;

use crate::dihedral::Dihedral;
use crate::overlay::{OverlayId, Placement, RejectReason};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What the planner decided for an overlay node bound to a known surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CandidateOutcome {
    /// The subtree will be offloaded.
    Planned {
        /// Destination on the parent surface.
        dest: Rect,
        /// Orientation of the texture.
        transform: Dihedral,
        /// Whether the overlay is, so far, allowed above the parent.
        raised: bool,
    },
    /// The subtree will be composited normally.
    Rejected(RejectReason),
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted at the start of a planning pass.
#[derive(Clone, Copy, Debug)]
pub struct PlanBeginEvent {
    /// Monotonic pass counter.
    pub frame_index: u64,
    /// Number of overlay surfaces bound to the output.
    pub overlay_count: usize,
    /// The area of the parent surface being planned.
    pub viewport: Rect,
}

/// Emitted when an overlay node bound to a known surface is resolved.
#[derive(Clone, Copy, Debug)]
pub struct CandidateEvent {
    /// Pass counter.
    pub frame_index: u64,
    /// The overlay surface the node is bound to.
    pub overlay: OverlayId,
    /// The decision.
    pub outcome: CandidateOutcome,
}

/// Emitted when later content prevents a candidate from being raised.
#[derive(Clone, Copy, Debug)]
pub struct DemoteEvent {
    /// Pass counter.
    pub frame_index: u64,
    /// The demoted overlay surface.
    pub overlay: OverlayId,
}

/// Emitted after an attach call during reconciliation.
#[derive(Clone, Copy, Debug)]
pub struct AttachEvent {
    /// Pass counter.
    pub frame_index: u64,
    /// The overlay surface.
    pub overlay: OverlayId,
    /// Requested placement.
    pub placement: Placement,
    /// Whether the surface reports the texture as attached.
    pub accepted: bool,
    /// Bounds reported by the surface afterwards.
    pub bounds: Rect,
}

/// Emitted after a detach call during reconciliation.
#[derive(Clone, Copy, Debug)]
pub struct DetachEvent {
    /// Pass counter.
    pub frame_index: u64,
    /// The overlay surface.
    pub overlay: OverlayId,
}

/// Per-pass summary.
#[derive(Clone, Copy, Debug)]
pub struct PlanSummary {
    /// Pass counter.
    pub frame_index: u64,
    /// Number of candidate records (one per overlay surface).
    pub candidates: usize,
    /// Overlays attached after reconciliation.
    pub offloaded: usize,
    /// Overlays above the parent after reconciliation.
    pub raised: usize,
    /// Damage rectangles added by this pass.
    pub damage_rects: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the offload planner.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called at the start of a planning pass.
    fn on_plan_begin(&mut self, e: &PlanBeginEvent) {
        _ = e;
    }

    /// Called when an overlay node is planned or rejected.
    fn on_candidate(&mut self, e: &CandidateEvent) {
        _ = e;
    }

    /// Called when a candidate loses permission to sit above the parent.
    fn on_demote(&mut self, e: &DemoteEvent) {
        _ = e;
    }

    /// Called after an attach call.
    fn on_attach(&mut self, e: &AttachEvent) {
        _ = e;
    }

    /// Called after a detach call.
    fn on_detach(&mut self, e: &DetachEvent) {
        _ = e;
    }

    /// Called with the per-pass summary.
    fn on_plan_summary(&mut self, s: &PlanSummary) {
        _ = s;
    }

    /// Called with the damage rectangles a pass added (requires `trace-rich`
    /// feature).
    #[cfg(feature = "trace-rich")]
    fn on_damage_rects(&mut self, frame_index: u64, rects: &[Rect]) {
        _ = (frame_index, rects);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PlanBeginEvent`].
    #[inline]
    pub fn plan_begin(&mut self, e: &PlanBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_plan_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CandidateEvent`].
    #[inline]
    pub fn candidate(&mut self, e: &CandidateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_candidate(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DemoteEvent`].
    #[inline]
    pub fn demote(&mut self, e: &DemoteEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_demote(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`AttachEvent`].
    #[inline]
    pub fn attach(&mut self, e: &AttachEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_attach(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DetachEvent`].
    #[inline]
    pub fn detach(&mut self, e: &DetachEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_detach(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PlanSummary`].
    #[inline]
    pub fn plan_summary(&mut self, s: &PlanSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_plan_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits damage rectangles (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn damage_rects(&mut self, frame_index: u64, rects: &[Rect]) {
        if let Some(s) = &mut self.sink {
            s.on_damage_rects(frame_index, rects);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
