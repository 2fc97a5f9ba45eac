//! Values carried on wires between nodes.

use crate::geometry::Line;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A single value published on an output slot or read from an input slot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Number(f64),
    /// 2-D point in client-pixel or fraction space
    Point(DVec2),
    Line(Line),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<DVec2> {
        match self {
            Value::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<Line> {
        match self {
            Value::Line(l) => Some(*l),
            _ => None,
        }
    }

    /// Human-readable type name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::Point(_) => "Point",
            Value::Line(_) => "Line",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<DVec2> for Value {
    fn from(p: DVec2) -> Self {
        Value::Point(p)
    }
}

impl From<Line> for Value {
    fn from(l: Line) -> Self {
        Value::Line(l)
    }
}
