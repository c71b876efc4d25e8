// Copyright 2026 the Planeshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable scene nodes.
//!
//! A scene is a tree of [`RenderNode`]s shared through [`NodeRef`]. Nodes are
//! never mutated after construction, so a tree can be reused across frames
//! and read by several consumers at once. Every node carries its bounds in
//! its own coordinate space; the constructors compute them from the children.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Rect, RoundedRect};
use peniko::Color;

use crate::overlay::OverlayId;
use crate::transform::Transform;

/// A shared reference to a scene node.
pub type NodeRef = Arc<RenderNode>;

/// An opaque reference to a texture owned by the embedder.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

impl fmt::Debug for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextureId({})", self.0)
    }
}

/// A texture together with its pixel dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Texture {
    /// Identity of the texture.
    pub id: TextureId,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Texture {
    /// Creates a texture reference.
    #[must_use]
    pub const fn new(id: TextureId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }
}

/// Leaf kinds that paint pixels but are opaque to overlay planning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaintKind {
    /// Box borders.
    Border,
    /// A run of glyphs.
    Text,
    /// A linear gradient.
    LinearGradient,
    /// A radial gradient.
    RadialGradient,
    /// A conic gradient.
    ConicGradient,
    /// An inset box shadow.
    InsetShadow,
    /// An outset box shadow.
    OutsetShadow,
    /// A filled path.
    Fill,
    /// A stroked path.
    Stroke,
    /// A texture drawn with an explicit filter.
    TextureScale,
    /// A repeated child pattern.
    Repeat,
    /// Content drawn by an external rasterizer.
    Custom,
}

/// Nodes that combine or filter their children.
///
/// The planner treats these as painting leaves: the result depends on the
/// rendered children, so nothing below them is offloaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Group opacity.
    Opacity,
    /// Gaussian blur.
    Blur,
    /// Drop shadow of the children.
    Shadow,
    /// Blend of two children.
    Blend,
    /// Cross-fade of two children.
    CrossFade,
    /// One child masking another.
    Mask,
    /// Color matrix filter.
    ColorMatrix,
    /// Per-channel transfer function.
    ComponentTransfer,
}

/// The kind-specific payload of a [`RenderNode`].
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// Children painted in order.
    Container(Vec<NodeRef>),
    /// A child drawn under a transform.
    Transform {
        /// Maps child coordinates to this node's coordinates.
        transform: Transform,
        /// The transformed child.
        child: NodeRef,
    },
    /// A child clipped to a rectangle.
    Clip {
        /// The clip, in this node's coordinates.
        clip: Rect,
        /// The clipped child.
        child: NodeRef,
    },
    /// A child clipped to a rounded rectangle.
    RoundedClip {
        /// The clip, in this node's coordinates.
        clip: RoundedRect,
        /// The clipped child.
        child: NodeRef,
    },
    /// A debugging annotation around a child.
    Debug(NodeRef),
    /// A subtree that may be diverted to an overlay surface.
    Overlay {
        /// The overlay surface this subtree is bound to, if any.
        overlay: Option<OverlayId>,
        /// The diverted content.
        child: NodeRef,
    },
    /// A solid color filling the node bounds.
    Color(Color),
    /// A texture stretched over the node bounds.
    Texture(Texture),
    /// Any other painting leaf.
    Paint(PaintKind),
    /// A filter or compositing effect over its children.
    Effect {
        /// Which effect.
        kind: EffectKind,
        /// The inputs of the effect.
        children: Vec<NodeRef>,
    },
}

/// An immutable scene node: bounds plus a kind-specific payload.
#[derive(Clone, Debug)]
pub struct RenderNode {
    bounds: Rect,
    kind: NodeKind,
}

impl RenderNode {
    /// Creates a node from raw parts.
    #[must_use]
    pub fn new(bounds: Rect, kind: NodeKind) -> NodeRef {
        Arc::new(Self { bounds, kind })
    }

    /// Creates a container; its bounds are the union of the children.
    #[must_use]
    pub fn container(children: impl IntoIterator<Item = NodeRef>) -> NodeRef {
        let children: Vec<NodeRef> = children.into_iter().collect();
        Self::new(union_bounds(&children), NodeKind::Container(children))
    }

    /// Creates a transform node.
    #[must_use]
    pub fn transform(transform: Transform, child: NodeRef) -> NodeRef {
        let bounds = transform.transform_bounds(child.bounds);
        Self::new(bounds, NodeKind::Transform { transform, child })
    }

    /// Creates a rectangular clip node.
    #[must_use]
    pub fn clip(clip: Rect, child: NodeRef) -> NodeRef {
        let bounds = clip.intersect(child.bounds);
        Self::new(bounds, NodeKind::Clip { clip, child })
    }

    /// Creates a rounded clip node.
    #[must_use]
    pub fn rounded_clip(clip: RoundedRect, child: NodeRef) -> NodeRef {
        let bounds = clip.rect().intersect(child.bounds);
        Self::new(bounds, NodeKind::RoundedClip { clip, child })
    }

    /// Wraps a child in a debug node.
    #[must_use]
    pub fn debug(child: NodeRef) -> NodeRef {
        Self::new(child.bounds, NodeKind::Debug(child))
    }

    /// Marks a subtree as a candidate for an overlay surface.
    #[must_use]
    pub fn overlay(overlay: Option<OverlayId>, child: NodeRef) -> NodeRef {
        Self::new(child.bounds, NodeKind::Overlay { overlay, child })
    }

    /// Creates a solid color node.
    #[must_use]
    pub fn color(bounds: Rect, color: Color) -> NodeRef {
        Self::new(bounds, NodeKind::Color(color))
    }

    /// Creates a texture node.
    #[must_use]
    pub fn texture(bounds: Rect, texture: Texture) -> NodeRef {
        Self::new(bounds, NodeKind::Texture(texture))
    }

    /// Creates an opaque painting leaf.
    #[must_use]
    pub fn paint(bounds: Rect, kind: PaintKind) -> NodeRef {
        Self::new(bounds, NodeKind::Paint(kind))
    }

    /// Creates an effect node; its bounds are the union of the children.
    #[must_use]
    pub fn effect(kind: EffectKind, children: impl IntoIterator<Item = NodeRef>) -> NodeRef {
        let children: Vec<NodeRef> = children.into_iter().collect();
        Self::new(union_bounds(&children), NodeKind::Effect { kind, children })
    }

    /// Returns the bounds in this node's coordinate space.
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns the kind-specific payload.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns `true` if the node draws pixels itself, as opposed to only
    /// structuring or clipping its children.
    #[must_use]
    pub fn paints(&self) -> bool {
        match self.kind {
            NodeKind::Container(_)
            | NodeKind::Transform { .. }
            | NodeKind::Clip { .. }
            | NodeKind::RoundedClip { .. }
            | NodeKind::Debug(_) => false,
            NodeKind::Overlay { .. }
            | NodeKind::Color(_)
            | NodeKind::Texture(_)
            | NodeKind::Paint(_)
            | NodeKind::Effect { .. } => true,
        }
    }
}

fn union_bounds(children: &[NodeRef]) -> Rect {
    children
        .iter()
        .map(|c| c.bounds)
        .reduce(|a, b| a.union(b))
        .unwrap_or(Rect::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tex() -> Texture {
        Texture::new(TextureId(1), 100, 50)
    }

    #[test]
    fn container_bounds_are_union() {
        let a = RenderNode::color(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        let b = RenderNode::texture(Rect::new(20.0, 5.0, 30.0, 40.0), tex());
        let c = RenderNode::container([a, b]);
        assert_eq!(c.bounds(), Rect::new(0.0, 0.0, 30.0, 40.0));
        assert_eq!(RenderNode::container([]).bounds(), Rect::ZERO);
    }

    #[test]
    fn transform_bounds_follow_transform() {
        let leaf = RenderNode::texture(Rect::new(0.0, 0.0, 100.0, 50.0), tex());
        let t = RenderNode::transform(Transform::identity().translate((5.0, 5.0)), leaf);
        assert_eq!(t.bounds(), Rect::new(5.0, 5.0, 105.0, 55.0));
    }

    #[test]
    fn clip_bounds_are_intersection() {
        let leaf = RenderNode::texture(Rect::new(0.0, 0.0, 100.0, 50.0), tex());
        let c = RenderNode::clip(Rect::new(50.0, 0.0, 200.0, 25.0), leaf);
        assert_eq!(c.bounds(), Rect::new(50.0, 0.0, 100.0, 25.0));
    }

    #[test]
    fn structural_nodes_do_not_paint() {
        let leaf = RenderNode::paint(Rect::new(0.0, 0.0, 1.0, 1.0), PaintKind::Text);
        assert!(leaf.paints());
        assert!(!RenderNode::debug(leaf.clone()).paints());
        assert!(!RenderNode::container([leaf.clone()]).paints());
        assert!(RenderNode::effect(EffectKind::Opacity, [leaf.clone()]).paints());
        assert!(RenderNode::overlay(None, leaf).paints());
    }
}
