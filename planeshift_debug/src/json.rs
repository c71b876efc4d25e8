// Copyright 2026 the Planeshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON report export.
//!
//! [`JsonReportSink`] implements [`TraceSink`] by turning every event into a
//! JSON object. The collected events can be written out as a single array,
//! one object per event in emission order, for offline inspection of why a
//! given overlay was or was not offloaded.

use std::io::{self, Write};

use kurbo::Rect;
use serde_json::{Value, json};

use planeshift_core::overlay::Placement;
use planeshift_core::trace::{
    AttachEvent, CandidateEvent, CandidateOutcome, DemoteEvent, DetachEvent, PlanBeginEvent,
    PlanSummary, TraceSink,
};

/// Collects trace events as JSON objects.
#[derive(Clone, Debug, Default)]
pub struct JsonReportSink {
    events: Vec<Value>,
}

impl JsonReportSink {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The events collected so far.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// Discards all collected events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Returns the report as a compact JSON array.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        Value::Array(self.events.clone()).to_string()
    }

    /// Writes the report as a pretty-printed JSON array.
    pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(writer, &self.events)?;
        Ok(())
    }
}

fn rect(r: Rect) -> Value {
    json!([r.x0, r.y0, r.x1, r.y1])
}

fn placement(p: Placement) -> Value {
    match p {
        Placement::AboveParent => json!({ "kind": "above" }),
        Placement::BelowParent { place_above } => json!({
            "kind": "below",
            "place_above": place_above.map(|id| id.0),
        }),
    }
}

impl TraceSink for JsonReportSink {
    fn on_plan_begin(&mut self, e: &PlanBeginEvent) {
        self.events.push(json!({
            "event": "plan_begin",
            "frame_index": e.frame_index,
            "overlay_count": e.overlay_count,
            "viewport": rect(e.viewport),
        }));
    }

    fn on_candidate(&mut self, e: &CandidateEvent) {
        let outcome = match e.outcome {
            CandidateOutcome::Planned {
                dest,
                transform,
                raised,
            } => json!({
                "planned": true,
                "dest": rect(dest),
                "transform": transform.name(),
                "raised": raised,
            }),
            CandidateOutcome::Rejected(reason) => json!({
                "planned": false,
                "reason": reason.name(),
            }),
        };
        self.events.push(json!({
            "event": "candidate",
            "frame_index": e.frame_index,
            "overlay": e.overlay.0,
            "outcome": outcome,
        }));
    }

    fn on_demote(&mut self, e: &DemoteEvent) {
        self.events.push(json!({
            "event": "demote",
            "frame_index": e.frame_index,
            "overlay": e.overlay.0,
        }));
    }

    fn on_attach(&mut self, e: &AttachEvent) {
        self.events.push(json!({
            "event": "attach",
            "frame_index": e.frame_index,
            "overlay": e.overlay.0,
            "placement": placement(e.placement),
            "accepted": e.accepted,
            "bounds": rect(e.bounds),
        }));
    }

    fn on_detach(&mut self, e: &DetachEvent) {
        self.events.push(json!({
            "event": "detach",
            "frame_index": e.frame_index,
            "overlay": e.overlay.0,
        }));
    }

    fn on_plan_summary(&mut self, s: &PlanSummary) {
        self.events.push(json!({
            "event": "summary",
            "frame_index": s.frame_index,
            "candidates": s.candidates,
            "offloaded": s.offloaded,
            "raised": s.raised,
            "damage_rects": s.damage_rects,
        }));
    }

    fn on_damage_rects(&mut self, frame_index: u64, rects: &[Rect]) {
        self.events.push(json!({
            "event": "damage",
            "frame_index": frame_index,
            "rects": rects.iter().copied().map(rect).collect::<Vec<_>>(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peniko::Color;
    use planeshift_core::node::{RenderNode, Texture, TextureId};
    use planeshift_core::overlay::{HeadlessOverlay, OverlayId};
    use planeshift_core::trace::Tracer;
    use planeshift_render::{DamageRegion, OffloadConfig, OffloadPlanner};

    #[test]
    fn empty_report_is_empty_array() {
        let sink = JsonReportSink::new();
        let mut out = Vec::new();
        sink.write_to(&mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert!(parsed.is_empty());
        assert_eq!(sink.to_json_string(), "[]");
    }

    #[test]
    fn records_a_planning_pass() {
        let video = RenderNode::overlay(
            Some(OverlayId(0)),
            RenderNode::texture(
                Rect::new(0.0, 0.0, 320.0, 180.0),
                Texture::new(TextureId(1), 1280, 720),
            ),
        );
        let root = RenderNode::container([
            video,
            RenderNode::color(Rect::new(10.0, 10.0, 60.0, 30.0), Color::WHITE),
        ]);

        let mut planner = OffloadPlanner::new(OffloadConfig::new());
        let mut output = vec![HeadlessOverlay::new(OverlayId(0))];
        let mut damage = DamageRegion::None;
        let mut sink = JsonReportSink::new();
        let mut tracer = Tracer::new(&mut sink);
        planner.plan(
            &root,
            Rect::new(0.0, 0.0, 800.0, 600.0),
            &mut output,
            &mut damage,
            &mut tracer,
        );
        drop(tracer);

        let names: Vec<&str> = sink
            .events()
            .iter()
            .map(|e| e["event"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            ["plan_begin", "candidate", "demote", "attach", "damage", "summary"]
        );

        let candidate = &sink.events()[1];
        assert_eq!(candidate["outcome"]["planned"], true);
        assert_eq!(candidate["outcome"]["transform"], "normal");
        let attach = &sink.events()[3];
        assert_eq!(attach["placement"]["kind"], "below");
        assert_eq!(attach["accepted"], true);
        assert_eq!(attach["bounds"], json!([0.0, 0.0, 320.0, 180.0]));

        let mut out = Vec::new();
        sink.write_to(&mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 6);
    }
}
