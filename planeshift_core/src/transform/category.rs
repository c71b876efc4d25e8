// Copyright 2026 the Planeshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How constrained a transform is, from coarsest to finest.
///
/// Categories are totally ordered: a variant compares greater than another
/// when it describes a strictly narrower set of transforms. Composing two
/// transforms yields the [`min`](Ord::min) of their categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransformCategory {
    /// Nothing is known about the transform.
    Unknown,
    /// A projective transform (perspective).
    Any,
    /// An affine transform that moves content out of the xy-plane.
    ThreeD,
    /// A 2D affine transform with shear or non-axis-aligned rotation.
    TwoD,
    /// Translation, axis scale, and rotation/flip by multiples of 90°.
    Dihedral,
    /// Translation and axis scale with possibly negative factors.
    NegativeAffine,
    /// Translation and positive axis scale.
    Affine,
    /// Translation only.
    Translate,
    /// The identity.
    Identity,
}

impl TransformCategory {
    /// Returns `true` if transforms of this category can be decomposed into a
    /// dihedral element, a positive scale, and a translation.
    #[inline]
    #[must_use]
    pub fn is_dihedral(self) -> bool {
        self >= Self::Dihedral
    }

    /// Returns `true` if transforms of this category stay in the xy-plane.
    #[inline]
    #[must_use]
    pub fn is_2d(self) -> bool {
        self >= Self::TwoD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_coarse_to_fine() {
        assert!(TransformCategory::Unknown < TransformCategory::Any);
        assert!(TransformCategory::Any < TransformCategory::ThreeD);
        assert!(TransformCategory::ThreeD < TransformCategory::TwoD);
        assert!(TransformCategory::TwoD < TransformCategory::Dihedral);
        assert!(TransformCategory::Dihedral < TransformCategory::NegativeAffine);
        assert!(TransformCategory::NegativeAffine < TransformCategory::Affine);
        assert!(TransformCategory::Affine < TransformCategory::Translate);
        assert!(TransformCategory::Translate < TransformCategory::Identity);
    }

    #[test]
    fn dihedral_threshold() {
        assert!(TransformCategory::Translate.is_dihedral());
        assert!(TransformCategory::Dihedral.is_dihedral());
        assert!(!TransformCategory::TwoD.is_dihedral());
        assert!(TransformCategory::TwoD.is_2d());
        assert!(!TransformCategory::ThreeD.is_2d());
    }
}
