//! Select tool: field selection plus a couple of global flags.

use crate::error::Result;
use crate::registry::SELECT;
use crate::types::Tool;

use super::{CONFIGURATION, FieldList, bool_text, ensure_kind, node_at, parse_bool};

const SELECT_FIELDS: FieldList = FieldList {
  path: &[CONFIGURATION, "SelectFields"],
  element: "SelectField",
};

fn flag(tool: &Tool, name: &str) -> Result<bool> {
  ensure_kind(tool, SELECT)?;
  parse_bool(node_at(tool, &[CONFIGURATION, name])?.get_attribute("value")?)
}

fn set_flag(tool: &mut Tool, name: &str, value: bool) -> Result<()> {
  ensure_kind(tool, SELECT)?;
  tool
    .config
    .ensure_path(&[CONFIGURATION, name])
    .insert_attribute("value", bool_text(value));
  Ok(())
}

pub fn order_changed(tool: &Tool) -> Result<bool> {
  flag(tool, "OrderChanged")
}

pub fn set_order_changed(tool: &mut Tool, value: bool) -> Result<()> {
  set_flag(tool, "OrderChanged", value)
}

pub fn comma_decimal(tool: &Tool) -> Result<bool> {
  flag(tool, "CommaDecimal")
}

pub fn set_comma_decimal(tool: &mut Tool, value: bool) -> Result<()> {
  set_flag(tool, "CommaDecimal", value)
}

pub fn set_select_field(tool: &mut Tool, field: &str, selected: bool) -> Result<()> {
  ensure_kind(tool, SELECT)?;
  SELECT_FIELDS.set(tool, field, selected);
  Ok(())
}

pub fn remove_select_field(tool: &mut Tool, field: &str) -> Result<bool> {
  ensure_kind(tool, SELECT)?;
  Ok(SELECT_FIELDS.remove(tool, field))
}

pub fn select_fields(tool: &Tool) -> Result<Vec<(String, bool)>> {
  ensure_kind(tool, SELECT)?;
  SELECT_FIELDS.entries(tool)
}
