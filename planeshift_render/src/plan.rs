// Copyright 2026 the Planeshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame offload planning.
//!
//! [`OffloadPlanner::plan`] walks the scene once, in paint order, and
//! decides for every overlay surface whether the subtree bound to it can be
//! presented on the plane instead of being composited. It then reconciles
//! the surfaces with that decision and reports the damage the changes cause
//! on the parent surface.
//!
//! The walk tracks three things:
//!
//! - the ambient transform from node coordinates to output coordinates,
//! - a [`ClipStack`] in output coordinates, and
//! - the candidates planned so far, which are demoted from "above the
//!   parent" to "below the parent" as soon as later painted content
//!   overlaps them.

use alloc::vec::Vec;

use kurbo::{Rect, Size};
use planeshift_core::clip::{ClipShape, rects_overlap};
use planeshift_core::dihedral::Dihedral;
use planeshift_core::node::{NodeKind, RenderNode, Texture};
use planeshift_core::overlay::{
    AttachRequest, OverlayId, OverlayOutput, OverlaySurface, Placement, RejectReason,
};
use planeshift_core::trace::{
    AttachEvent, CandidateEvent, CandidateOutcome, DemoteEvent, DetachEvent, PlanBeginEvent,
    PlanSummary, Tracer,
};
use planeshift_core::transform::Transform;

use crate::clip_stack::{ClipStack, ClipUpdate};
use crate::{DamageRegion, OffloadConfig, match_overlay_content};

/// What an overlay surface presented before the current pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviousState {
    /// The surface had a texture attached.
    pub was_offloaded: bool,
    /// The surface was stacked above its parent.
    pub was_above: bool,
    /// The background the surface drew, in output coordinates.
    pub background: Option<Rect>,
    /// The destination the surface covered, in output coordinates.
    pub bounds: Rect,
}

impl PreviousState {
    fn of<S: OverlaySurface + ?Sized>(surface: &S) -> Self {
        Self {
            was_offloaded: surface.texture().is_some(),
            was_above: surface.is_above_parent(),
            background: surface.background_rect(),
            bounds: surface.bounds(),
        }
    }
}

/// The planning state of one overlay surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// The surface this candidate belongs to.
    pub overlay: OverlayId,
    /// A bound subtree was accepted for offloading.
    pub can_offload: bool,
    /// The offloaded subtree may sit above the parent surface.
    pub can_raise: bool,
    /// Texture to present.
    pub texture: Option<Texture>,
    /// Visible part of the texture, in pixels of the oriented texture.
    pub source: Rect,
    /// Destination in output coordinates.
    pub dest: Rect,
    /// Orientation of the texture on the output.
    pub transform: Dihedral,
    /// Opaque black background in output coordinates.
    pub background: Option<Rect>,
    /// The nearest overlay planned earlier in paint order that is stacked
    /// below the parent, if any.
    pub place_above: Option<OverlayId>,
    /// Why the bound subtree was not offloaded.
    pub rejected: Option<RejectReason>,
    /// The surface's state before this pass.
    pub previous: PreviousState,
    /// The surface presents a texture after reconciliation.
    pub is_offloaded: bool,
    /// The surface sits above its parent after reconciliation.
    pub is_above: bool,
}

impl Candidate {
    fn new(overlay: OverlayId, previous: PreviousState) -> Self {
        Self {
            overlay,
            can_offload: false,
            can_raise: false,
            texture: None,
            source: Rect::ZERO,
            dest: Rect::ZERO,
            transform: Dihedral::Normal,
            background: None,
            place_above: None,
            rejected: None,
            previous,
            is_offloaded: false,
            is_above: false,
        }
    }

    /// Where the surface should be stacked relative to its parent.
    #[must_use]
    pub fn placement(&self) -> Placement {
        if self.can_raise {
            Placement::AboveParent
        } else {
            Placement::BelowParent {
                place_above: self.place_above,
            }
        }
    }

    fn request(&self) -> Option<AttachRequest> {
        if !self.can_offload {
            return None;
        }
        Some(AttachRequest {
            texture: self.texture?,
            source: self.source,
            dest: self.dest,
            transform: self.transform,
            background: self.background,
            placement: self.placement(),
        })
    }
}

/// Plans which scene subtrees are presented on overlay planes.
///
/// The planner owns its working buffers and reuses them from frame to
/// frame, so steady-state planning does not allocate beyond the transform
/// chains built for nested transform nodes.
#[derive(Debug)]
pub struct OffloadPlanner {
    config: OffloadConfig,
    candidates: Vec<Candidate>,
    // Indices of planned candidates, in paint order.
    planned: Vec<usize>,
    clips: ClipStack,
    damage_rects: Vec<Rect>,
    frame_index: u64,
}

impl OffloadPlanner {
    /// Creates a planner with the given configuration.
    #[must_use]
    pub fn new(config: OffloadConfig) -> Self {
        Self {
            config,
            candidates: Vec::new(),
            planned: Vec::new(),
            clips: ClipStack::new(Rect::ZERO),
            damage_rects: Vec::new(),
            frame_index: 0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &OffloadConfig {
        &self.config
    }

    /// Replaces the configuration. Takes effect on the next pass.
    pub fn set_config(&mut self, config: OffloadConfig) {
        self.config = config;
    }

    /// Number of passes run so far.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// The candidates of the most recent pass, in surface order.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Runs one planning pass.
    ///
    /// Walks `root` against `viewport` (the parent surface in output
    /// coordinates), attaches or detaches every surface in `output` to
    /// match the result, and adds the parent-surface area whose content
    /// changed because of that to `damage`.
    ///
    /// Returns the candidates, one per surface in `output`.
    pub fn plan<O>(
        &mut self,
        root: &RenderNode,
        viewport: Rect,
        output: &mut O,
        damage: &mut DamageRegion,
        tracer: &mut Tracer<'_>,
    ) -> &[Candidate]
    where
        O: OverlayOutput + ?Sized,
    {
        let frame_index = self.frame_index;
        self.frame_index = self.frame_index.wrapping_add(1);

        self.candidates.clear();
        for index in 0..output.overlay_count() {
            let surface = output.overlay(index);
            self.candidates
                .push(Candidate::new(surface.id(), PreviousState::of(surface)));
        }
        self.planned.clear();
        self.clips.reset(viewport);

        tracer.plan_begin(&PlanBeginEvent {
            frame_index,
            overlay_count: self.candidates.len(),
            viewport,
        });

        let mut walk = Walk {
            config: &self.config,
            candidates: &mut self.candidates,
            clips: &mut self.clips,
            planned: &mut self.planned,
            frame_index,
            tracer: &mut *tracer,
        };
        walk.visit(root, &Transform::identity());
        debug_assert_eq!(self.clips.depth(), 0, "unbalanced clip stack");
        self.assign_stacking();

        self.reconcile(output, frame_index, tracer);
        for rect in &self.damage_rects {
            damage.add_rect(*rect);
        }

        #[cfg(feature = "trace-rich")]
        tracer.damage_rects(frame_index, &self.damage_rects);

        tracer.plan_summary(&PlanSummary {
            frame_index,
            candidates: self.candidates.len(),
            offloaded: self.candidates.iter().filter(|c| c.is_offloaded).count(),
            raised: self.candidates.iter().filter(|c| c.is_above).count(),
            damage_rects: self.damage_rects.len(),
        });

        &self.candidates
    }

    // Orders planes below the parent by paint order. Raised planes are skipped
    // since they do not share the stack below the parent.
    fn assign_stacking(&mut self) {
        let mut below: Option<OverlayId> = None;
        for &index in &self.planned {
            let candidate = &mut self.candidates[index];
            candidate.place_above = below;
            if !candidate.can_raise {
                below = Some(candidate.overlay);
            }
        }
    }

    fn reconcile<O>(&mut self, output: &mut O, frame_index: u64, tracer: &mut Tracer<'_>)
    where
        O: OverlayOutput + ?Sized,
    {
        self.damage_rects.clear();
        for (index, candidate) in self.candidates.iter_mut().enumerate() {
            let surface = output.overlay_mut(index);
            let previous = candidate.previous;

            let request = candidate.request();
            if let Some(request) = &request {
                candidate.is_offloaded = surface.attach(request);
            } else {
                if previous.was_offloaded {
                    surface.detach();
                    tracer.detach(&DetachEvent {
                        frame_index,
                        overlay: candidate.overlay,
                    });
                }
                candidate.is_offloaded = false;
            }
            candidate.is_above = candidate.is_offloaded && surface.is_above_parent();

            let bounds = surface.bounds();
            let background = surface.background_rect();
            if let Some(request) = request {
                tracer.attach(&AttachEvent {
                    frame_index,
                    overlay: candidate.overlay,
                    placement: request.placement,
                    accepted: candidate.is_offloaded,
                    bounds,
                });
            }
            let changed = candidate.is_offloaded != previous.was_offloaded
                || candidate.is_above != previous.was_above
                || (candidate.is_offloaded && bounds != previous.bounds)
                || background != previous.background;
            if !changed {
                continue;
            }
            if previous.was_offloaded {
                self.damage_rects.push(previous.bounds);
                self.damage_rects.extend(previous.background);
            }
            if candidate.is_offloaded {
                self.damage_rects.push(bounds);
                self.damage_rects.extend(background);
            }
        }
    }
}

/// State of one scene walk.
struct Walk<'w, 't> {
    config: &'w OffloadConfig,
    candidates: &'w mut [Candidate],
    clips: &'w mut ClipStack,
    planned: &'w mut Vec<usize>,
    frame_index: u64,
    tracer: &'w mut Tracer<'t>,
}

impl Walk<'_, '_> {
    fn visit(&mut self, node: &RenderNode, ambient: &Transform) {
        let bounds = ambient.transform_bounds(node.bounds());
        if node.paints() {
            self.demote_overlapping(bounds);
        }
        let update = self.clips.update(bounds);

        match node.kind() {
            NodeKind::Container(children) => {
                for child in children {
                    self.visit(child, ambient);
                }
            }
            NodeKind::Transform { transform, child } => {
                self.visit(child, &transform.then(ambient));
            }
            NodeKind::Clip { clip, child } => {
                self.visit_clipped(ClipShape::Rect(*clip), child, ambient);
            }
            NodeKind::RoundedClip { clip, child } => {
                self.visit_clipped(ClipShape::RoundedRect(*clip), child, ambient);
            }
            NodeKind::Debug(child) => self.visit(child, ambient),
            NodeKind::Overlay { overlay, child } => self.visit_overlay(*overlay, child, ambient),
            NodeKind::Color(_)
            | NodeKind::Texture(_)
            | NodeKind::Paint(_)
            | NodeKind::Effect { .. } => {}
        }

        if update == ClipUpdate::Pushed {
            self.clips.pop();
        }
    }

    fn visit_clipped(&mut self, clip: ClipShape, child: &RenderNode, ambient: &Transform) {
        self.clips.push_clip(clip.transformed(ambient));
        self.visit(child, ambient);
        self.clips.pop();
    }

    fn visit_overlay(
        &mut self,
        overlay: Option<OverlayId>,
        child: &RenderNode,
        ambient: &Transform,
    ) {
        // A second node bound to an already planned surface is ignored.
        let index = overlay.and_then(|id| {
            self.candidates
                .iter()
                .position(|c| c.overlay == id && !c.can_offload)
        });
        let Some(index) = index else {
            self.visit(child, ambient);
            return;
        };

        match self.try_plan(index, child, ambient) {
            Ok(()) => {
                let candidate = &self.candidates[index];
                self.tracer.candidate(&CandidateEvent {
                    frame_index: self.frame_index,
                    overlay: candidate.overlay,
                    outcome: CandidateOutcome::Planned {
                        dest: candidate.dest,
                        transform: candidate.transform,
                        raised: candidate.can_raise,
                    },
                });
            }
            Err(reason) => {
                let candidate = &mut self.candidates[index];
                candidate.rejected = Some(reason);
                self.tracer.candidate(&CandidateEvent {
                    frame_index: self.frame_index,
                    overlay: candidate.overlay,
                    outcome: CandidateOutcome::Rejected(reason),
                });
                self.visit(child, ambient);
            }
        }
    }

    fn try_plan(
        &mut self,
        index: usize,
        child: &RenderNode,
        ambient: &Transform,
    ) -> Result<(), RejectReason> {
        if !self.config.enabled {
            return Err(RejectReason::Disabled);
        }
        if !self.clips.top().is_fully_contained() {
            return Err(RejectReason::NotFullyContained);
        }
        let outer = ambient
            .to_dihedral()
            .ok_or(RejectReason::UnsupportedTransform)?;
        let content =
            match_overlay_content(child, self.config).ok_or(RejectReason::UnsupportedContent)?;
        if content.background.is_some() && !self.config.allow_background {
            return Err(RejectReason::BackgroundNotAllowed);
        }

        let (width, height) = content.oriented_size();
        let affine = outer.to_affine();

        let candidate = &mut self.candidates[index];
        candidate.can_offload = true;
        candidate.can_raise = self.config.allow_raise;
        candidate.texture = Some(content.texture);
        candidate.transform = content.transform.combine(outer.dihedral);
        candidate.source = outer
            .dihedral
            .map_rect_in(content.source, Size::new(width, height));
        candidate.dest = affine.transform_rect_bbox(content.dest);
        candidate.background = content.background.map(|b| affine.transform_rect_bbox(b));
        candidate.rejected = None;
        self.planned.push(index);
        Ok(())
    }

    /// Moves every raised candidate that `bounds` overlaps below the parent.
    fn demote_overlapping(&mut self, bounds: Rect) {
        for candidate in self.candidates.iter_mut().filter(|c| c.can_raise) {
            let overlaps = rects_overlap(bounds, candidate.dest)
                || candidate
                    .background
                    .is_some_and(|b| rects_overlap(bounds, b));
            if overlaps {
                candidate.can_raise = false;
                self.tracer.demote(&DemoteEvent {
                    frame_index: self.frame_index,
                    overlay: candidate.overlay,
                });
            }
        }
    }
}
