//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `SessionBuilder` - Builder for a host with a tracker and wired probes
//! - `ProbeNode` - A downstream node that reports how often it solves
//! - Viewport fixtures and float assertion helpers

use glam::{DVec2, DVec3};
use uuid::uuid;

use mousenode::graph::{Node, ParamSpec, SolveCtx, Value};
use mousenode::host::FeedOutcome;
use mousenode::types::{NodeId, Rect, TypeGuid};
use mousenode::{Host, Modifiers, MouseButton, MouseEvent, MouseTracker, Viewport};

// ============================================================================
// Viewport fixtures
// ============================================================================

/// Perspective camera on the negative Y axis looking at the origin,
/// 800x600 viewport.
pub fn perspective_viewport() -> Viewport {
    Viewport::perspective(800.0, 600.0, DVec3::new(0.0, -30.0, 0.0), DVec3::ZERO)
}

/// Parallel camera 50 units behind its target, 800x600 viewport.
pub fn parallel_viewport() -> Viewport {
    Viewport::parallel(
        800.0,
        600.0,
        DVec3::new(0.0, -40.0, 10.0),
        DVec3::new(0.0, 10.0, 10.0),
    )
}

pub fn tracker_bounds() -> Rect {
    Rect::new(80.0, 60.0, 120.0, 100.0)
}

// ============================================================================
// ProbeNode - a downstream consumer that reports on itself
// ============================================================================

/// Downstream node for observing propagation. Echoes its boolean input on
/// slot 0 and publishes its own solve count on slot 1, so tests can tell
/// exactly when expiry reached it.
#[derive(Default)]
pub struct ProbeNode {
    solves: u64,
    last: Option<bool>,
}

const PROBE_INPUTS: &[ParamSpec] = &[ParamSpec {
    name: "Signal",
    nickname: "S",
    description: "Value under observation",
}];

const PROBE_OUTPUTS: &[ParamSpec] = &[
    ParamSpec {
        name: "Echo",
        nickname: "E",
        description: "The observed value",
    },
    ParamSpec {
        name: "Solves",
        nickname: "N",
        description: "How many times this probe has solved",
    },
];

impl ProbeNode {
    pub const TYPE_GUID: TypeGuid =
        TypeGuid::new(uuid!("6c1f4e2a-9d83-4b6f-b0c5-8e7a21d94f30"));
}

impl Node for ProbeNode {
    fn type_guid(&self) -> TypeGuid {
        Self::TYPE_GUID
    }

    fn name(&self) -> &'static str {
        "Probe"
    }

    fn nickname(&self) -> &'static str {
        "P"
    }

    fn inputs(&self) -> &'static [ParamSpec] {
        PROBE_INPUTS
    }

    fn outputs(&self) -> &'static [ParamSpec] {
        PROBE_OUTPUTS
    }

    fn solve(&mut self, ctx: &mut SolveCtx<'_>) {
        self.solves += 1;
        self.last = ctx.input_bool(0);
        ctx.set_output(0, self.last.unwrap_or(false));
        ctx.set_output(1, self.solves as f64);
    }
}

// ============================================================================
// SessionBuilder - host fixtures for integration tests
// ============================================================================

/// Builder for a running host session.
///
/// # Example
/// ```ignore
/// let mut session = SessionBuilder::new()
///     .with_tracker()
///     .with_wired_probe()
///     .build();
/// session.alt_down(400.0, 300.0);
/// assert!(session.pressed());
/// ```
pub struct SessionBuilder {
    viewport: Viewport,
    tracker: bool,
    wired_probe: bool,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            viewport: perspective_viewport(),
            tracker: false,
            wired_probe: false,
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Place a tracker on the canvas.
    pub fn with_tracker(mut self) -> Self {
        self.tracker = true;
        self
    }

    /// Place a probe wired to the tracker's pressed output. Implies
    /// `with_tracker`.
    pub fn with_wired_probe(mut self) -> Self {
        self.tracker = true;
        self.wired_probe = true;
        self
    }

    /// Build the host and run the initial solve so subscriptions are live.
    pub fn build(self) -> Session {
        let mut host = Host::new(self.viewport);
        let mut tracker = None;
        let mut probe = None;

        if self.tracker {
            let id = host
                .document
                .add(Box::new(MouseTracker::new()), tracker_bounds())
                .unwrap_or_else(|| panic!("tracker rejected by a fresh document"));
            tracker = Some(id);
        }
        if self.wired_probe {
            let tracker_id = tracker.unwrap();
            let id = host
                .document
                .add(Box::new(ProbeNode::default()), Rect::new(320.0, 60.0, 80.0, 40.0))
                .unwrap();
            host.document
                .connect(tracker_id, 3, id, 0)
                .unwrap_or_else(|e| panic!("wiring probe failed: {e}"));
            probe = Some(id);
        }

        host.solve().unwrap_or_else(|e| panic!("initial solve failed: {e}"));
        Session { host, tracker, probe }
    }
}

/// A built host plus the ids of the nodes the builder placed.
pub struct Session {
    pub host: Host,
    pub tracker: Option<NodeId>,
    pub probe: Option<NodeId>,
}

impl Session {
    pub fn tracker(&self) -> NodeId {
        self.tracker.unwrap_or_else(|| panic!("session built without a tracker"))
    }

    // ------------------------------------------------------------------
    // Event shorthand
    // ------------------------------------------------------------------

    pub fn alt_down(&mut self, x: f64, y: f64) -> FeedOutcome {
        self.feed(MouseEvent::down(MouseButton::Left, DVec2::new(x, y), Modifiers::ALT))
    }

    pub fn alt_move(&mut self, x: f64, y: f64) -> FeedOutcome {
        self.feed(MouseEvent::moved(DVec2::new(x, y), Modifiers::ALT))
    }

    pub fn alt_up(&mut self, x: f64, y: f64) -> FeedOutcome {
        self.feed(MouseEvent::up(MouseButton::Left, DVec2::new(x, y), Modifiers::ALT))
    }

    pub fn plain_down(&mut self, x: f64, y: f64) -> FeedOutcome {
        self.feed(MouseEvent::down(MouseButton::Left, DVec2::new(x, y), Modifiers::NONE))
    }

    pub fn plain_up(&mut self, x: f64, y: f64) -> FeedOutcome {
        self.feed(MouseEvent::up(MouseButton::Left, DVec2::new(x, y), Modifiers::NONE))
    }

    pub fn leave(&mut self) -> FeedOutcome {
        self.feed(MouseEvent::leave(DVec2::new(-1.0, -1.0)))
    }

    fn feed(&mut self, event: MouseEvent) -> FeedOutcome {
        self.host
            .feed(event)
            .unwrap_or_else(|e| panic!("feed failed: {e}"))
    }

    // ------------------------------------------------------------------
    // Output inspection
    // ------------------------------------------------------------------

    /// The tracker's published value on `slot`.
    pub fn tracker_output(&self, slot: usize) -> Option<Value> {
        self.host.document.entry(self.tracker()).and_then(|e| e.output(slot))
    }

    /// The tracker's published pressed flag.
    pub fn pressed(&self) -> bool {
        matches!(self.tracker_output(3), Some(Value::Bool(true)))
    }

    /// The tracker's published pixel position.
    pub fn pixel(&self) -> Option<DVec2> {
        match self.tracker_output(1) {
            Some(Value::Point(p)) => Some(p),
            _ => None,
        }
    }

    /// How many times the wired probe has solved.
    pub fn probe_solves(&self) -> f64 {
        let probe = self.probe.unwrap_or_else(|| panic!("session built without a probe"));
        match self.host.document.entry(probe).and_then(|e| e.output(1)) {
            Some(Value::Number(n)) => n,
            other => panic!("probe has no solve count yet: {other:?}"),
        }
    }
}

// ============================================================================
// Assertion helpers
// ============================================================================

const EPS: f64 = 1e-6;

/// Assert two floats agree to within a millionth.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

/// Assert two points agree component-wise.
pub fn assert_point_close(actual: DVec3, expected: DVec3) {
    assert!(
        (actual - expected).length() < EPS,
        "expected {expected:?}, got {actual:?}"
    );
}

// ============================================================================
// Tests for the helpers themselves
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creates_live_tracker() {
        let session = SessionBuilder::new().with_tracker().build();
        assert_eq!(session.host.dispatcher.live_count(), 1);
        assert!(!session.pressed());
    }

    #[test]
    fn test_builder_wires_probe_to_tracker() {
        let session = SessionBuilder::new().with_wired_probe().build();
        assert_eq!(session.host.document.wires().len(), 1);
        assert_eq!(session.probe_solves(), 1.0);
    }

    #[test]
    fn test_probe_echoes_default_when_unwired() {
        let mut host = Host::new(perspective_viewport());
        let id = host
            .document
            .add(Box::new(ProbeNode::default()), Rect::new(0.0, 0.0, 80.0, 40.0))
            .unwrap();
        host.solve().unwrap();

        let entry = host.document.entry(id).unwrap();
        assert_eq!(entry.output(0), Some(Value::Bool(false)));
        assert_eq!(entry.output(1), Some(Value::Number(1.0)));
    }
}
