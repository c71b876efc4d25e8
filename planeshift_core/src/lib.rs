// Copyright 2026 the Planeshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for offloading scene content to overlay planes.
//!
//! `planeshift_core` provides the vocabulary shared by the offload planner
//! and its embedders: the dihedral group that display controllers can apply
//! when scanning out a plane, immutable transform chains that know how close
//! they are to that group, clip shapes, the scene-node tree, and the
//! contract with the windowing layer. It is `no_std` compatible (with
//! `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   scene (NodeRef tree) ──► OffloadPlanner::plan() ──► AttachRequest
//!                                   │                        │
//!                                   ▼                        ▼
//!                             DamageRegion          OverlaySurface::attach()
//! ```
//!
//! The planner itself lives in `planeshift_render`; this crate has no
//! planning logic.
//!
//! **[`dihedral`]** — The eight axis-aligned rotations and flips, packed in
//! three bits, with exact composition and inversion.
//!
//! **[`transform`]** — Shared transform chains, their
//! [`TransformCategory`](transform::TransformCategory), and decomposition of
//! dihedral chains into orientation, scale and offset.
//!
//! **[`clip`]** — Rectangular and rounded clip shapes and their intersection.
//!
//! **[`node`]** — Immutable, reference-counted scene nodes.
//!
//! **[`overlay`]** — The [`OverlaySurface`](overlay::OverlaySurface) and
//! [`OverlayOutput`](overlay::OverlayOutput) traits, attach requests, and a
//! headless implementation.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! planner instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates damage-rect
//!   events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod clip;
pub mod dihedral;
pub mod node;
pub mod overlay;
pub mod trace;
pub mod transform;
