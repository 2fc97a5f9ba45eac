//! Built-in value-holder nodes.

use super::node::{MenuEntry, Node, ParamSpec, SolveCtx};
use crate::types::TypeGuid;
use uuid::uuid;

const NO_INPUTS: &[ParamSpec] = &[];

const BOOLEAN_OUTPUTS: &[ParamSpec] = &[ParamSpec {
    name: "Value",
    nickname: "V",
    description: "The stored value",
}];

/// Holds a single boolean and publishes it, the minimal upstream a toggle
/// input needs.
pub struct BooleanParam {
    value: bool,
}

impl BooleanParam {
    pub const TYPE_GUID: TypeGuid = TypeGuid::new(uuid!("a1520c9e-7b36-4db0-8a4d-3e5f90c12b88"));

    pub fn new(value: bool) -> Self {
        Self { value }
    }

    pub fn value(&self) -> bool {
        self.value
    }
}

impl Node for BooleanParam {
    fn type_guid(&self) -> TypeGuid {
        Self::TYPE_GUID
    }

    fn name(&self) -> &'static str {
        "Boolean"
    }

    fn nickname(&self) -> &'static str {
        "Bool"
    }

    fn description(&self) -> &'static str {
        "Holds a single boolean value"
    }

    fn inputs(&self) -> &'static [ParamSpec] {
        NO_INPUTS
    }

    fn outputs(&self) -> &'static [ParamSpec] {
        BOOLEAN_OUTPUTS
    }

    fn solve(&mut self, ctx: &mut SolveCtx<'_>) {
        ctx.set_output(0, self.value);
    }

    fn context_menu(&self) -> Vec<MenuEntry> {
        vec![MenuEntry {
            id: "toggle",
            label: "True".to_string(),
            checked: self.value,
        }]
    }

    fn activate_menu(&mut self, id: &str) {
        if id == "toggle" {
            self.value = !self.value;
        }
    }

    fn write_chunk(&self) -> serde_json::Value {
        serde_json::Value::Bool(self.value)
    }

    fn read_chunk(&mut self, chunk: &serde_json::Value) {
        if let Some(value) = chunk.as_bool() {
            self.value = value;
        }
    }
}
