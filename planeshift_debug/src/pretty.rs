// Copyright 2026 the Planeshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use kurbo::Rect;
use planeshift_core::overlay::Placement;
use planeshift_core::trace::{
    AttachEvent, CandidateEvent, CandidateOutcome, DemoteEvent, DetachEvent, PlanBeginEvent,
    PlanSummary, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

struct ShowRect(Rect);

impl std::fmt::Display for ShowRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = self.0;
        write!(f, "({},{})-({},{})", r.x0, r.y0, r.x1, r.y1)
    }
}

fn placement_name(placement: Placement) -> String {
    match placement {
        Placement::AboveParent => "above".to_owned(),
        Placement::BelowParent { place_above: None } => "below".to_owned(),
        Placement::BelowParent {
            place_above: Some(id),
        } => format!("below,over={}", id.0),
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_plan_begin(&mut self, e: &PlanBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[begin] frame={} overlays={} viewport={}",
            e.frame_index,
            e.overlay_count,
            ShowRect(e.viewport),
        );
    }

    fn on_candidate(&mut self, e: &CandidateEvent) {
        match e.outcome {
            CandidateOutcome::Planned {
                dest,
                transform,
                raised,
            } => {
                let _ = writeln!(
                    self.writer,
                    "[planned] frame={} overlay={} dest={} transform={} raised={raised}",
                    e.frame_index,
                    e.overlay.0,
                    ShowRect(dest),
                    transform.name(),
                );
            }
            CandidateOutcome::Rejected(reason) => {
                let _ = writeln!(
                    self.writer,
                    "[rejected] frame={} overlay={} reason={}",
                    e.frame_index,
                    e.overlay.0,
                    reason.name(),
                );
            }
        }
    }

    fn on_demote(&mut self, e: &DemoteEvent) {
        let _ = writeln!(
            self.writer,
            "[demote] frame={} overlay={}",
            e.frame_index, e.overlay.0,
        );
    }

    fn on_attach(&mut self, e: &AttachEvent) {
        let accepted = if e.accepted { "ok" } else { "REFUSED" };
        let _ = writeln!(
            self.writer,
            "[attach] frame={} overlay={} placement={} bounds={} {accepted}",
            e.frame_index,
            e.overlay.0,
            placement_name(e.placement),
            ShowRect(e.bounds),
        );
    }

    fn on_detach(&mut self, e: &DetachEvent) {
        let _ = writeln!(
            self.writer,
            "[detach] frame={} overlay={}",
            e.frame_index, e.overlay.0,
        );
    }

    fn on_plan_summary(&mut self, s: &PlanSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] frame={} candidates={} offloaded={} raised={} damage={}",
            s.frame_index, s.candidates, s.offloaded, s.raised, s.damage_rects,
        );
    }

    fn on_damage_rects(&mut self, frame_index: u64, rects: &[Rect]) {
        let _ = writeln!(
            self.writer,
            "[damage] frame={frame_index} rects={}",
            rects.len(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planeshift_core::dihedral::Dihedral;
    use planeshift_core::overlay::{OverlayId, RejectReason};

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pretty_print_candidates() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_candidate(&CandidateEvent {
            frame_index: 3,
            overlay: OverlayId(1),
            outcome: CandidateOutcome::Planned {
                dest: Rect::new(0.0, 0.0, 100.0, 50.0),
                transform: Dihedral::Rotate90,
                raised: true,
            },
        });
        sink.on_candidate(&CandidateEvent {
            frame_index: 3,
            overlay: OverlayId(2),
            outcome: CandidateOutcome::Rejected(RejectReason::UnsupportedTransform),
        });
        let output = output(sink);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[planned] frame=3 overlay=1"), "got: {output}");
        assert!(lines[0].contains("dest=(0,0)-(100,50)"), "got: {output}");
        assert!(lines[0].contains("raised=true"), "got: {output}");
        assert!(lines[1].starts_with("[rejected] frame=3 overlay=2"), "got: {output}");
    }

    #[test]
    fn pretty_print_attach_placement() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_attach(&AttachEvent {
            frame_index: 0,
            overlay: OverlayId(4),
            placement: Placement::BelowParent {
                place_above: Some(OverlayId(2)),
            },
            accepted: false,
            bounds: Rect::new(1.0, 2.0, 3.0, 4.0),
        });
        let output = output(sink);
        assert!(output.contains("placement=below,over=2"), "got: {output}");
        assert!(output.contains("REFUSED"), "got: {output}");
    }

    #[test]
    fn pretty_print_summary_and_damage() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_plan_summary(&PlanSummary {
            frame_index: 9,
            candidates: 2,
            offloaded: 1,
            raised: 0,
            damage_rects: 1,
        });
        sink.on_damage_rects(9, &[Rect::new(0.0, 0.0, 1.0, 1.0)]);
        let output = output(sink);
        assert!(output.contains("[summary] frame=9 candidates=2"), "got: {output}");
        assert!(output.contains("[damage] frame=9 rects=1"), "got: {output}");
    }
}
