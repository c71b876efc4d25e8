// Copyright 2026 the Planeshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract between the offload planner and the windowing layer.
//!
//! An output surface owns a fixed list of overlay surfaces (hardware planes
//! or subsurfaces). The planner reads their current state through
//! [`OverlaySurface`] and changes it only through
//! [`attach`](OverlaySurface::attach) and [`detach`](OverlaySurface::detach).
//! The overlay is authoritative: after an attach call the planner reads the
//! state back instead of assuming the request was honored.
//!
//! [`HeadlessOverlay`] is an in-memory implementation with a configurable
//! acceptance policy, useful for tests and for embedders that have no
//! display.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;

use crate::dihedral::Dihedral;
use crate::node::Texture;

/// Identity of an overlay surface, referenced by overlay scene nodes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverlayId(pub u32);

impl fmt::Debug for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OverlayId({})", self.0)
    }
}

/// Where an attached overlay sits relative to the parent surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Above all content of the parent surface.
    AboveParent,
    /// Below the parent surface, directly above `place_above` if given,
    /// otherwise at the bottom of the stack.
    BelowParent {
        /// The overlay to stack directly on top of.
        place_above: Option<OverlayId>,
    },
}

impl Placement {
    /// Returns `true` for [`Placement::AboveParent`].
    #[inline]
    #[must_use]
    pub fn is_above_parent(self) -> bool {
        matches!(self, Self::AboveParent)
    }
}

/// Everything an overlay surface needs to scan out a texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttachRequest {
    /// The texture to present.
    pub texture: Texture,
    /// Region of the texture to sample, in pixels of the oriented texture.
    pub source: Rect,
    /// Destination on the parent surface.
    pub dest: Rect,
    /// Orientation applied to the texture.
    pub transform: Dihedral,
    /// Opaque black rectangle to present behind the texture.
    pub background: Option<Rect>,
    /// Stacking position.
    pub placement: Placement,
}

/// An overlay surface bound to an output surface.
pub trait OverlaySurface {
    /// Returns the identity used by overlay scene nodes.
    fn id(&self) -> OverlayId;

    /// Requests that `request` be presented. Returns `true` if the overlay
    /// is now showing the texture.
    fn attach(&mut self, request: &AttachRequest) -> bool;

    /// Stops presenting any texture.
    fn detach(&mut self);

    /// Returns the texture currently attached, if any.
    fn texture(&self) -> Option<Texture>;

    /// Returns `true` if the overlay currently sits above the parent.
    fn is_above_parent(&self) -> bool;

    /// Returns the destination of the current attachment, or an empty rect.
    fn bounds(&self) -> Rect;

    /// Returns the background of the current attachment, if any.
    fn background_rect(&self) -> Option<Rect>;
}

/// An output surface: a fixed, ordered list of overlay surfaces.
pub trait OverlayOutput {
    /// The overlay surface type.
    type Surface: OverlaySurface;

    /// Returns the number of overlay surfaces.
    fn overlay_count(&self) -> usize;

    /// Returns the overlay surface at `index`.
    fn overlay(&self, index: usize) -> &Self::Surface;

    /// Returns the overlay surface at `index` mutably.
    fn overlay_mut(&mut self, index: usize) -> &mut Self::Surface;
}

impl<S: OverlaySurface> OverlayOutput for [S] {
    type Surface = S;

    fn overlay_count(&self) -> usize {
        self.len()
    }

    fn overlay(&self, index: usize) -> &S {
        &self[index]
    }

    fn overlay_mut(&mut self, index: usize) -> &mut S {
        &mut self[index]
    }
}

impl<S: OverlaySurface> OverlayOutput for Vec<S> {
    type Surface = S;

    fn overlay_count(&self) -> usize {
        self.len()
    }

    fn overlay(&self, index: usize) -> &S {
        &self[index]
    }

    fn overlay_mut(&mut self, index: usize) -> &mut S {
        &mut self[index]
    }
}

/// Why a bound overlay node was not planned for offload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// Offloading is switched off.
    Disabled,
    /// The node is not entirely inside the current clip.
    NotFullyContained,
    /// The transform above the node is not dihedral.
    UnsupportedTransform,
    /// The subtree is not a shape an overlay can present.
    UnsupportedContent,
    /// The subtree needs a background and backgrounds are switched off.
    BackgroundNotAllowed,
}

impl RejectReason {
    /// Returns a short human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::NotFullyContained => "not fully contained",
            Self::UnsupportedTransform => "unsupported transform",
            Self::UnsupportedContent => "unsupported content",
            Self::BackgroundNotAllowed => "background not allowed",
        }
    }
}

/// Which attach requests a [`HeadlessOverlay`] honors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AcceptPolicy {
    /// Every request succeeds.
    #[default]
    AcceptAll,
    /// Every request fails and leaves the overlay detached.
    RejectAll,
    /// Requests to sit above the parent are placed below it instead.
    RejectRaise,
}

/// An in-memory overlay surface.
#[derive(Clone, Debug)]
pub struct HeadlessOverlay {
    id: OverlayId,
    policy: AcceptPolicy,
    attached: Option<AttachRequest>,
    attach_count: u32,
    detach_count: u32,
}

impl HeadlessOverlay {
    /// Creates a detached overlay that accepts every request.
    #[must_use]
    pub const fn new(id: OverlayId) -> Self {
        Self::with_policy(id, AcceptPolicy::AcceptAll)
    }

    /// Creates a detached overlay with the given policy.
    #[must_use]
    pub const fn with_policy(id: OverlayId, policy: AcceptPolicy) -> Self {
        Self {
            id,
            policy,
            attached: None,
            attach_count: 0,
            detach_count: 0,
        }
    }

    /// Changes the acceptance policy for later requests.
    pub fn set_policy(&mut self, policy: AcceptPolicy) {
        self.policy = policy;
    }

    /// Returns the request currently presented, as adjusted by the policy.
    #[must_use]
    pub fn attached(&self) -> Option<&AttachRequest> {
        self.attached.as_ref()
    }

    /// Number of [`attach`](OverlaySurface::attach) calls received.
    #[must_use]
    pub fn attach_count(&self) -> u32 {
        self.attach_count
    }

    /// Number of [`detach`](OverlaySurface::detach) calls received.
    #[must_use]
    pub fn detach_count(&self) -> u32 {
        self.detach_count
    }
}

impl OverlaySurface for HeadlessOverlay {
    fn id(&self) -> OverlayId {
        self.id
    }

    fn attach(&mut self, request: &AttachRequest) -> bool {
        self.attach_count += 1;
        self.attached = match self.policy {
            AcceptPolicy::AcceptAll => Some(*request),
            AcceptPolicy::RejectAll => None,
            AcceptPolicy::RejectRaise => Some(AttachRequest {
                placement: match request.placement {
                    Placement::AboveParent => Placement::BelowParent { place_above: None },
                    below => below,
                },
                ..*request
            }),
        };
        self.attached.is_some()
    }

    fn detach(&mut self) {
        self.detach_count += 1;
        self.attached = None;
    }

    fn texture(&self) -> Option<Texture> {
        self.attached.map(|a| a.texture)
    }

    fn is_above_parent(&self) -> bool {
        self.attached
            .is_some_and(|a| a.placement.is_above_parent())
    }

    fn bounds(&self) -> Rect {
        self.attached.map_or(Rect::ZERO, |a| a.dest)
    }

    fn background_rect(&self) -> Option<Rect> {
        self.attached.and_then(|a| a.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::TextureId;

    fn request(placement: Placement) -> AttachRequest {
        AttachRequest {
            texture: Texture::new(TextureId(7), 64, 64),
            source: Rect::new(0.0, 0.0, 64.0, 64.0),
            dest: Rect::new(10.0, 10.0, 74.0, 74.0),
            transform: Dihedral::Normal,
            background: Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
            placement,
        }
    }

    #[test]
    fn accept_all_reflects_request() {
        let mut o = HeadlessOverlay::new(OverlayId(1));
        assert!(o.attach(&request(Placement::AboveParent)));
        assert_eq!(o.texture().map(|t| t.id), Some(TextureId(7)));
        assert!(o.is_above_parent());
        assert_eq!(o.bounds(), Rect::new(10.0, 10.0, 74.0, 74.0));
        assert_eq!(o.background_rect(), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        o.detach();
        assert!(o.texture().is_none());
        assert_eq!(o.bounds(), Rect::ZERO);
        assert_eq!((o.attach_count(), o.detach_count()), (1, 1));
    }

    #[test]
    fn reject_all_stays_detached() {
        let mut o = HeadlessOverlay::with_policy(OverlayId(1), AcceptPolicy::RejectAll);
        assert!(!o.attach(&request(Placement::AboveParent)));
        assert!(o.texture().is_none());
        assert!(!o.is_above_parent());
    }

    #[test]
    fn reject_raise_places_below() {
        let mut o = HeadlessOverlay::with_policy(OverlayId(1), AcceptPolicy::RejectRaise);
        assert!(o.attach(&request(Placement::AboveParent)));
        assert!(!o.is_above_parent());
        assert!(o.texture().is_some());
    }

    #[test]
    fn slices_are_outputs() {
        let mut overlays = [HeadlessOverlay::new(OverlayId(3)), HeadlessOverlay::new(OverlayId(4))];
        let output: &mut [HeadlessOverlay] = &mut overlays;
        assert_eq!(output.overlay_count(), 2);
        assert_eq!(output.overlay(1).id(), OverlayId(4));
        output.overlay_mut(0).detach();
        assert_eq!(overlays[0].detach_count(), 1);
    }
}
