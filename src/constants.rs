//! Crate-wide constants.
//!
//! Centralizes magic numbers and layout values to make the codebase
//! more maintainable and self-documenting.

// ============================================================================
// Node Layout
// ============================================================================

/// Corner radius of the node capsule
pub const CAPSULE_CORNER_RADIUS: f32 = 6.0;

/// Distance from the bottom edge of the node bounds to the tracker's
/// single input grip
pub const GRIP_BOTTOM_OFFSET: f32 = 20.0;

/// Radius of input/output grips
pub const GRIP_RADIUS: f32 = 3.0;

/// Vertical padding reserved per parameter row in the default node body
pub const PARAM_ROW_HEIGHT: f32 = 20.0;

// ============================================================================
// Wire Rendering
// ============================================================================

/// Stroke width for wires between nodes
pub const WIRE_THICKNESS: f32 = 2.0;

/// Horizontal offset of the cubic control points, as a fraction of the
/// distance between the wire endpoints
pub const WIRE_CONTROL_FRACTION: f32 = 0.5;

/// Minimum horizontal control-point offset so short wires still curve
pub const WIRE_MIN_CONTROL_OFFSET: f32 = 24.0;

// ============================================================================
// Viewport Defaults
// ============================================================================

/// Near clipping plane distance for the perspective projection
pub const DEFAULT_NEAR_CLIP: f64 = 0.1;

/// Far clipping plane distance
pub const DEFAULT_FAR_CLIP: f64 = 1000.0;

/// Vertical field of view for perspective viewports, in radians (60 degrees)
pub const DEFAULT_FOV_Y: f64 = std::f64::consts::FRAC_PI_3;

/// Half-height of the view volume for parallel viewports, in world units
pub const DEFAULT_PARALLEL_HALF_HEIGHT: f64 = 10.0;

// ============================================================================
// Graph Evaluation
// ============================================================================

/// Upper bound on nodes solved in one pass; trips the cycle guard when
/// exceeded
pub const MAX_SOLVE_STEPS: usize = 10_000;

// ============================================================================
// Notices
// ============================================================================

/// Maximum number of queued notices before the oldest is dropped
pub const MAX_PENDING_NOTICES: usize = 32;

// ============================================================================
// Colors (default hex values)
// ============================================================================

/// Capsule fill for a normal node
pub const CAPSULE_FILL_NORMAL: &str = "#d4d0c8";

/// Capsule fill for a locked (disabled) node
pub const CAPSULE_FILL_LOCKED: &str = "#9a9a9a";

/// Capsule fill for a hidden (preview off) node
pub const CAPSULE_FILL_HIDDEN: &str = "#b5bfa9";

/// Capsule edge color
pub const CAPSULE_EDGE: &str = "#2b2b2b";

/// Edge color for selected nodes
pub const CAPSULE_EDGE_SELECTED: &str = "#3c9c3c";

/// Wire stroke color
pub const WIRE_COLOR: &str = "#5a5a5a";

/// Grip fill color
pub const GRIP_COLOR: &str = "#2b2b2b";
