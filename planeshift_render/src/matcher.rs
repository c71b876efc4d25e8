// Copyright 2026 the Planeshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognition of subtrees an overlay plane can present.
//!
//! An overlay can show exactly one texture, sampled from an axis-aligned
//! source rectangle, oriented by a [`Dihedral`] element, scaled into an
//! axis-aligned destination, optionally over an opaque black background.
//! [`match_overlay_content`] accepts only subtrees that reduce to that and
//! rejects everything else.

use kurbo::Rect;
use peniko::Color;
use planeshift_core::clip::{ClipShape, rects_overlap};
use planeshift_core::dihedral::Dihedral;
use planeshift_core::node::{NodeKind, RenderNode, Texture};
use planeshift_core::transform::Transform;

use crate::OffloadConfig;

/// The parameters of a matched subtree, in the coordinates of its root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayContent {
    /// The texture to present.
    pub texture: Texture,
    /// Where the visible part of the texture lands.
    pub dest: Rect,
    /// The visible part of the texture, in pixels of the oriented texture.
    pub source: Rect,
    /// The opaque black background behind the texture, if any.
    pub background: Option<Rect>,
    /// Orientation of the texture.
    pub transform: Dihedral,
}

impl OverlayContent {
    /// Pixel size of the texture after orientation.
    #[must_use]
    pub fn oriented_size(&self) -> (f64, f64) {
        oriented_size(self.texture, self.transform)
    }
}

fn oriented_size(texture: Texture, transform: Dihedral) -> (f64, f64) {
    let (w, h) = (f64::from(texture.width), f64::from(texture.height));
    if transform.swaps_xy() { (h, w) } else { (w, h) }
}

/// Returns `true` if `color` is opaque black within `tolerance`.
#[must_use]
pub fn is_opaque_black(color: Color, tolerance: f32) -> bool {
    let [r, g, b, a] = color.components;
    r <= tolerance && g <= tolerance && b <= tolerance && a >= 1.0 - tolerance
}

/// Matches `node` against the shapes an overlay can present.
///
/// Returns `None` for anything not explicitly recognized.
#[must_use]
pub fn match_overlay_content(node: &RenderNode, config: &OffloadConfig) -> Option<OverlayContent> {
    let mut node = node;
    let mut transform = Transform::identity();
    // Accumulated clip, in the coordinates of `node`.
    let mut clip: Option<Rect> = None;
    let mut background: Option<Rect> = None;

    loop {
        match node.kind() {
            NodeKind::Debug(child) | NodeKind::Overlay { child, .. } => node = child,
            NodeKind::Container(children) => match children.as_slice() {
                [child] => node = child,
                [first, second] if background.is_none() => {
                    let NodeKind::Color(color) = first.kind() else {
                        return None;
                    };
                    if first.bounds() != node.bounds()
                        || !is_opaque_black(*color, config.background_tolerance)
                    {
                        return None;
                    }
                    let visible = visible_part(first.bounds(), clip)?;
                    background = Some(transform.transform_bounds(visible));
                    node = second;
                }
                _ => return None,
            },
            NodeKind::Transform {
                transform: local,
                child,
            } => {
                if !local.category().is_dihedral() {
                    return None;
                }
                if let Some(c) = clip {
                    clip = Some(local.invert()?.transform_bounds(c));
                }
                transform = local.then(&transform);
                node = child;
            }
            NodeKind::Clip { clip: rect, child } => {
                clip = Some(visible_part(*rect, clip)?);
                node = child;
            }
            NodeKind::RoundedClip { clip: rr, child } => {
                if !ClipShape::from(*rr).is_rectilinear() {
                    return None;
                }
                clip = Some(visible_part(rr.rect(), clip)?);
                node = child;
            }
            NodeKind::Texture(texture) => {
                return match_texture(*texture, node.bounds(), &transform, clip, background);
            }
            NodeKind::Color(_) | NodeKind::Paint(_) | NodeKind::Effect { .. } => return None,
        }
    }
}

// The part of `rect` left by `clip`, or `None` if nothing is.
fn visible_part(rect: Rect, clip: Option<Rect>) -> Option<Rect> {
    match clip {
        None => Some(rect),
        Some(c) => rects_overlap(rect, c).then(|| rect.intersect(c)),
    }
}

fn match_texture(
    texture: Texture,
    bounds: Rect,
    transform: &Transform,
    clip: Option<Rect>,
    background: Option<Rect>,
) -> Option<OverlayContent> {
    let parts = transform.to_dihedral()?;
    let visible = visible_part(bounds, clip)?;
    let affine = parts.to_affine();
    let full = affine.transform_rect_bbox(bounds);
    if full.is_zero_area() {
        return None;
    }
    let dest = affine.transform_rect_bbox(visible);
    let (w, h) = oriented_size(texture, parts.dihedral);
    let (sx, sy) = (w / full.width(), h / full.height());
    let source = Rect::new(
        (dest.x0 - full.x0) * sx,
        (dest.y0 - full.y0) * sy,
        (dest.x1 - full.x0) * sx,
        (dest.y1 - full.y0) * sy,
    );
    Some(OverlayContent {
        texture,
        dest,
        source,
        background,
        transform: parts.dihedral,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::RoundedRect;
    use planeshift_core::node::{EffectKind, PaintKind, TextureId};

    fn tex(w: u32, h: u32) -> Texture {
        Texture::new(TextureId(1), w, h)
    }

    fn config() -> OffloadConfig {
        OffloadConfig::new()
    }

    #[test]
    fn plain_texture() {
        let node = RenderNode::texture(Rect::new(0.0, 0.0, 100.0, 50.0), tex(100, 50));
        let m = match_overlay_content(&node, &config()).unwrap();
        assert_eq!(m.dest, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(m.source, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(m.transform, Dihedral::Normal);
        assert!(m.background.is_none());
    }

    #[test]
    fn scaled_texture_source_is_full_texture() {
        let node = RenderNode::texture(Rect::new(10.0, 10.0, 60.0, 35.0), tex(200, 100));
        let m = match_overlay_content(&node, &config()).unwrap();
        assert_eq!(m.dest, Rect::new(10.0, 10.0, 60.0, 35.0));
        assert_eq!(m.source, Rect::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn wrappers_are_transparent() {
        let leaf = RenderNode::texture(Rect::new(0.0, 0.0, 10.0, 10.0), tex(10, 10));
        let node = RenderNode::debug(RenderNode::container([RenderNode::overlay(None, leaf)]));
        assert!(match_overlay_content(&node, &config()).is_some());
    }

    #[test]
    fn rotated_texture() {
        let leaf = RenderNode::texture(Rect::new(0.0, 0.0, 100.0, 50.0), tex(100, 50));
        let node = RenderNode::transform(Transform::identity().rotate(90.0), leaf);
        let m = match_overlay_content(&node, &config()).unwrap();
        assert_eq!(m.transform, Dihedral::Rotate90);
        assert_eq!(m.dest, Rect::new(-50.0, 0.0, 0.0, 100.0));
        assert_eq!(m.source, Rect::new(0.0, 0.0, 50.0, 100.0));
        assert_eq!(m.oriented_size(), (50.0, 100.0));
    }

    #[test]
    fn clipped_texture_samples_sub_rect() {
        let leaf = RenderNode::texture(Rect::new(0.0, 0.0, 100.0, 100.0), tex(200, 200));
        let node = RenderNode::clip(Rect::new(0.0, 0.0, 50.0, 100.0), leaf);
        let m = match_overlay_content(&node, &config()).unwrap();
        assert_eq!(m.dest, Rect::new(0.0, 0.0, 50.0, 100.0));
        assert_eq!(m.source, Rect::new(0.0, 0.0, 100.0, 200.0));
    }

    #[test]
    fn clip_under_transform_is_mapped() {
        let leaf = RenderNode::texture(Rect::new(0.0, 0.0, 100.0, 100.0), tex(100, 100));
        let inner = RenderNode::transform(Transform::identity().scale(0.5, 0.5), leaf);
        let node = RenderNode::clip(Rect::new(0.0, 0.0, 25.0, 50.0), inner);
        let m = match_overlay_content(&node, &config()).unwrap();
        assert_eq!(m.dest, Rect::new(0.0, 0.0, 25.0, 50.0));
        assert_eq!(m.source, Rect::new(0.0, 0.0, 50.0, 100.0));
    }

    #[test]
    fn disjoint_clips_fail() {
        let leaf = RenderNode::texture(Rect::new(0.0, 0.0, 100.0, 100.0), tex(100, 100));
        let node = RenderNode::clip(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            RenderNode::clip(Rect::new(50.0, 50.0, 60.0, 60.0), leaf),
        );
        assert!(match_overlay_content(&node, &config()).is_none());
    }

    #[test]
    fn black_background() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let node = RenderNode::container([
            RenderNode::color(bounds, Color::BLACK),
            RenderNode::texture(Rect::new(18.0, 18.0, 82.0, 82.0), tex(64, 64)),
        ]);
        let m = match_overlay_content(&node, &config()).unwrap();
        assert_eq!(m.background, Some(bounds));
        assert_eq!(m.dest, Rect::new(18.0, 18.0, 82.0, 82.0));
        assert_eq!(m.source, Rect::new(0.0, 0.0, 64.0, 64.0));
    }

    #[test]
    fn non_black_or_partial_background_fails() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let leaf = RenderNode::texture(Rect::new(10.0, 10.0, 90.0, 90.0), tex(64, 64));
        let white = RenderNode::container([RenderNode::color(bounds, Color::WHITE), leaf.clone()]);
        assert!(match_overlay_content(&white, &config()).is_none());
        let translucent = RenderNode::container([
            RenderNode::color(bounds, Color::new([0.0, 0.0, 0.0, 0.5])),
            leaf.clone(),
        ]);
        assert!(match_overlay_content(&translucent, &config()).is_none());
        let partial = RenderNode::container([
            RenderNode::color(Rect::new(0.0, 0.0, 50.0, 100.0), Color::BLACK),
            leaf,
        ]);
        assert!(match_overlay_content(&partial, &config()).is_none());
    }

    #[test]
    fn near_black_respects_tolerance() {
        let almost = Color::new([0.002, 0.0, 0.0, 1.0]);
        assert!(is_opaque_black(almost, OffloadConfig::DEFAULT_BACKGROUND_TOLERANCE));
        assert!(!is_opaque_black(almost, 0.001));
    }

    #[test]
    fn unsupported_shapes_fail() {
        let leaf = RenderNode::texture(Rect::new(0.0, 0.0, 10.0, 10.0), tex(10, 10));
        let paint = RenderNode::paint(Rect::new(0.0, 0.0, 10.0, 10.0), PaintKind::Text);
        let cases = [
            RenderNode::transform(Transform::identity().rotate(37.0), leaf.clone()),
            RenderNode::container([leaf.clone(), paint.clone(), leaf.clone()]),
            RenderNode::container([]),
            RenderNode::effect(EffectKind::Opacity, [leaf.clone()]),
            RenderNode::rounded_clip(RoundedRect::new(0.0, 0.0, 10.0, 10.0, 2.0), leaf.clone()),
            paint,
        ];
        for node in cases {
            assert!(match_overlay_content(&node, &config()).is_none(), "{node:?}");
        }
    }

    #[test]
    fn square_rounded_clip_acts_as_rect() {
        let leaf = RenderNode::texture(Rect::new(0.0, 0.0, 10.0, 10.0), tex(10, 10));
        let node = RenderNode::rounded_clip(RoundedRect::new(0.0, 0.0, 5.0, 10.0, 0.0), leaf);
        let m = match_overlay_content(&node, &config()).unwrap();
        assert_eq!(m.dest, Rect::new(0.0, 0.0, 5.0, 10.0));
    }
}
