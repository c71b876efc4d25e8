// Copyright 2026 the Planeshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform chains and their classification.
//!
//! A [`Transform`] is an immutable, shared chain of [`TransformOp`]s. Each
//! chain knows its [`TransformCategory`], which lets the planner decide
//! cheaply whether content under it can be scanned out by an overlay plane.
//! Chains in the [`Dihedral`](TransformCategory::Dihedral) category or finer
//! decompose exactly into [`DihedralParts`].

mod category;
mod chain;
mod matrix;

pub use category::TransformCategory;
pub use chain::{DihedralParts, Transform, TransformOp};
pub use matrix::Transform3d;
