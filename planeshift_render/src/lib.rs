// Copyright 2026 the Planeshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay offload planning for planeshift.
//!
//! This crate turns a [`planeshift_core`] scene into decisions about which
//! subtrees are presented on overlay planes. It provides:
//!
//! - [`OffloadPlanner`] — the per-frame walk, candidate tracking, and
//!   reconciliation with the [`OverlayOutput`](planeshift_core::overlay::OverlayOutput)
//! - [`match_overlay_content`] — recognition of subtrees a plane can present
//! - [`ClipStack`] — clip tracking in output coordinates
//! - [`DamageRegion`] — spatial damage tracking for partial re-rendering
//! - [`OffloadConfig`] — planner switches and thresholds

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod clip_stack;
mod config;
mod damage;
mod matcher;
mod plan;

pub use clip_stack::{ClipFrame, ClipStack, ClipState, ClipUpdate};
pub use config::OffloadConfig;
pub use damage::DamageRegion;
pub use matcher::{OverlayContent, is_opaque_black, match_overlay_content};
pub use plan::{Candidate, OffloadPlanner, PreviousState};
