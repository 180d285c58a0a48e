//! Auto-field tool: per-field selection under `Configuration/Fields`.

use crate::error::Result;
use crate::registry::AUTOFIELD;
use crate::types::Tool;

use super::{CONFIGURATION, FieldList, ensure_kind};

const FIELDS: FieldList = FieldList {
  path: &[CONFIGURATION, "Fields"],
  element: "Field",
};

pub fn set_field(tool: &mut Tool, field: &str, selected: bool) -> Result<()> {
  ensure_kind(tool, AUTOFIELD)?;
  FIELDS.set(tool, field, selected);
  Ok(())
}

/// Whether `field` is selected; `false` when it is not configured at all.
pub fn field_selection(tool: &Tool, field: &str) -> Result<bool> {
  ensure_kind(tool, AUTOFIELD)?;
  FIELDS.selection(tool, field)
}

pub fn remove_field(tool: &mut Tool, field: &str) -> Result<bool> {
  ensure_kind(tool, AUTOFIELD)?;
  Ok(FIELDS.remove(tool, field))
}

pub fn fields(tool: &Tool) -> Result<Vec<(String, bool)>> {
  ensure_kind(tool, AUTOFIELD)?;
  FIELDS.entries(tool)
}
