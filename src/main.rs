//! Scripted demo session for the mouse tracker.
//!
//! Builds a host with a perspective viewport, drops a tracker on the
//! canvas, replays an Alt-drag across the viewport, and logs what the
//! tracker publishes after each event. A plain drag follows to show the
//! host's own drag-select taking over once the gate fails, and the
//! document is round-tripped through disk at the end.
//!
//! Run with `RUST_LOG=debug` to watch the dispatch and solve passes.

use anyhow::{Context, Result};
use glam::{DVec2, DVec3};
use tracing::info;

use mousenode::graph::{Document, NodeRegistry, Value};
use mousenode::{Host, Modifiers, MouseButton, MouseEvent, MouseTracker, NodeId, Rect, Viewport};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let viewport = Viewport::perspective(
        1280.0,
        720.0,
        DVec3::new(20.0, -30.0, 12.0),
        DVec3::ZERO,
    );
    let mut host = Host::new(viewport);

    let tracker = host
        .document
        .add(
            Box::new(MouseTracker::new()),
            Rect::new(80.0, 60.0, 120.0, 100.0),
        )
        .context("tracker rejected by the document")?;
    host.solve()?;
    info!(node = %tracker, "tracker placed and subscribed");

    // 1) Alt-drag across the viewport: press, three moves, release.
    let path = [
        DVec2::new(400.0, 360.0),
        DVec2::new(520.0, 340.0),
        DVec2::new(700.0, 320.0),
        DVec2::new(880.0, 300.0),
    ];
    host.feed(MouseEvent::down(MouseButton::Left, path[0], Modifiers::ALT))?;
    report(&host.document, tracker);
    for &position in &path[1..] {
        host.feed(MouseEvent::moved(position, Modifiers::ALT))?;
        report(&host.document, tracker);
    }
    host.feed(MouseEvent::up(MouseButton::Left, path[3], Modifiers::ALT))?;
    report(&host.document, tracker);

    // 2) Without Alt the gate fails, so the same drag falls through to the
    //    host's rubber-band selection.
    host.feed(MouseEvent::down(MouseButton::Left, DVec2::new(40.0, 40.0), Modifiers::NONE))?;
    host.feed(MouseEvent::moved(DVec2::new(400.0, 400.0), Modifiers::NONE))?;
    host.feed(MouseEvent::up(MouseButton::Left, DVec2::new(400.0, 400.0), Modifiers::NONE))?;
    let selected = host
        .document
        .entry(tracker)
        .map(|e| e.selected)
        .unwrap_or(false);
    info!(selected, "plain drag fell through to host selection");

    // 3) Round-trip the document through disk.
    let dir = tempfile::tempdir()?;
    let saved = dir.path().join("session.json");
    host.document.save_to(&saved)?;
    let restored = Document::load_from(&saved, NodeRegistry::builtin())?;
    info!(nodes = restored.len(), wires = restored.wires().len(), "document round-tripped");

    info!(
        average_pass_ms = host.perf().average_pass_time(),
        "session finished"
    );
    Ok(())
}

/// Log the tracker's current outputs.
fn report(document: &Document, tracker: NodeId) {
    let Some(entry) = document.entry(tracker) else {
        return;
    };
    let pressed = matches!(entry.output(3), Some(Value::Bool(true)));
    match (entry.output(0), entry.output(1)) {
        (Some(Value::Line(line)), Some(Value::Point(pixel))) => {
            info!(
                pressed,
                pixel = ?pixel,
                from = ?line.from,
                to = ?line.to,
                "tracker output"
            );
        }
        _ => info!(pressed, "tracker output (no capture yet)"),
    }
}
