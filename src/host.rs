//! The event loop glue: viewport, dispatcher, document, and the host's own
//! default mouse behavior.
//!
//! [`Host::feed`] is the one entry point for mouse input. Each event runs
//! the same pass: dispatch to listening nodes first, then apply the host's
//! default reaction (rubber-band drag-select) only if no listener claimed
//! the event, then solve whatever the dispatch expired. Listeners therefore
//! always get the chance to suppress drag-select before it starts, the same
//! priority a modeling viewport gives its mouse callbacks.

use glam::DVec2;
use tracing::debug;

use crate::graph::{Document, GraphResult};
use crate::input::{MouseButton, MouseDispatcher, MouseEvent, MouseEventKind};
use crate::perf::PerfMonitor;
use crate::types::Rect;
use crate::viewport::Viewport;

// ============================================================================
// Drag-select
// ============================================================================

/// An in-progress rubber-band selection, in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSelect {
    pub anchor: DVec2,
    pub current: DVec2,
}

impl DragSelect {
    /// Axis-aligned band between the anchor and the current corner.
    pub fn band(&self) -> Rect {
        let min_x = self.anchor.x.min(self.current.x) as f32;
        let min_y = self.anchor.y.min(self.current.y) as f32;
        let max_x = self.anchor.x.max(self.current.x) as f32;
        let max_y = self.anchor.y.max(self.current.y) as f32;
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

/// What one call to [`Host::feed`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeedOutcome {
    /// A listener claimed the event
    pub canceled: bool,
    /// Listeners the event reached
    pub delivered: usize,
    /// Nodes re-evaluated by the follow-up solve pass
    pub solved: usize,
    /// A rubber-band selection is in progress after this event
    pub drag_select_active: bool,
}

// ============================================================================
// Host
// ============================================================================

/// Owns the pieces a running session needs and turns raw mouse events into
/// document updates.
pub struct Host {
    pub document: Document,
    pub dispatcher: MouseDispatcher,
    pub viewport: Viewport,
    drag_select: Option<DragSelect>,
    perf: PerfMonitor,
}

impl Host {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            document: Document::new(),
            dispatcher: MouseDispatcher::new(),
            viewport,
            drag_select: None,
            perf: PerfMonitor::new(),
        }
    }

    /// Run pending solves outside of event handling, for example right
    /// after nodes are added or a document is loaded.
    pub fn solve(&mut self) -> GraphResult<usize> {
        self.document.solve_pending(&mut self.dispatcher)
    }

    /// Push one mouse event through a full pass: dispatch, default
    /// behavior, solve.
    pub fn feed(&mut self, mut event: MouseEvent) -> GraphResult<FeedOutcome> {
        self.perf.begin_pass();
        let outcome = self
            .dispatcher
            .dispatch(&mut self.document, &self.viewport, &mut event);
        self.apply_default_behavior(&event);
        let solved = self.document.solve_pending(&mut self.dispatcher)?;
        self.perf.end_pass();
        Ok(FeedOutcome {
            canceled: outcome.canceled,
            delivered: outcome.delivered,
            solved,
            drag_select_active: self.drag_select.is_some(),
        })
    }

    /// The host's own mouse handling, skipped wherever a listener claimed
    /// the event.
    fn apply_default_behavior(&mut self, event: &MouseEvent) {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !event.cancel {
                    debug!(x = event.position.x, y = event.position.y, "drag-select started");
                    self.drag_select = Some(DragSelect {
                        anchor: event.position,
                        current: event.position,
                    });
                }
            }
            MouseEventKind::Move => {
                if !event.cancel {
                    if let Some(drag) = &mut self.drag_select {
                        drag.current = event.position;
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(drag) = self.drag_select.take() {
                    if !event.cancel {
                        self.finish_drag_select(drag);
                    }
                }
            }
            MouseEventKind::Leave => {
                self.drag_select = None;
            }
            _ => {}
        }
    }

    /// Select every node the band touches, deselect the rest.
    fn finish_drag_select(&mut self, drag: DragSelect) {
        let band = drag.band();
        let mut selected = 0;
        for id in self.document.node_ids() {
            let hit = self
                .document
                .entry(id)
                .map(|e| e.bounds.intersects(&band))
                .unwrap_or(false);
            if hit {
                selected += 1;
            }
            self.document.set_selected(id, hit);
        }
        debug!(selected, "drag-select finished");
    }

    pub fn drag_select(&self) -> Option<&DragSelect> {
        self.drag_select.as_ref()
    }

    pub fn perf(&self) -> &PerfMonitor {
        &self.perf
    }
}
