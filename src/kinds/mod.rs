//! Typed accessors for the config payload of specific tool kinds.
//!
//! Each accessor reads or writes named entries of [`Tool::config`] by path, e.g.
//! `Configuration/FormatSpecificOptions/Delimeter`. Getters fail with
//! [`WorkflowError::MissingConfig`] when the path is absent; setters create it.

pub mod autofield;
pub mod file_input;
pub mod file_output;
pub mod filter;
pub mod select;

use crate::error::{Result, WorkflowError};
use crate::types::{PropertyTree, Tool};

pub const CONFIGURATION: &str = "Configuration";

pub(crate) fn ensure_kind(tool: &Tool, kind_tag: &str) -> Result<()> {
  if tool.kind_tag == kind_tag {
    Ok(())
  } else {
    Err(WorkflowError::InvalidConfig(format!(
      "tool '{}' is a '{}', not a '{}'",
      tool.id, tool.kind_tag, kind_tag
    )))
  }
}

pub(crate) fn node_at<'a>(tool: &'a Tool, path: &[&str]) -> Result<&'a PropertyTree> {
  tool
    .config
    .at(path)
    .ok_or_else(|| WorkflowError::MissingConfig(path.join("/")))
}

pub(crate) fn text_at<'a>(tool: &'a Tool, path: &[&str]) -> Result<&'a str> {
  node_at(tool, path).map(PropertyTree::text)
}

pub(crate) fn set_text_at(tool: &mut Tool, path: &[&str], value: impl Into<String>) {
  tool.config.ensure_path(path).replace_text(value);
}

pub(crate) fn attr_at<'a>(tool: &'a Tool, path: &[&str], key: &str) -> Result<&'a str> {
  node_at(tool, path)?.get_attribute(key)
}

pub(crate) fn set_attr_at(tool: &mut Tool, path: &[&str], key: &str, value: impl Into<String>) {
  tool.config.ensure_path(path).insert_attribute(key, value);
}

/// Parses the `True`/`False` spelling used throughout the document.
pub(crate) fn parse_bool(raw: &str) -> Result<bool> {
  match raw.trim() {
    s if s.eq_ignore_ascii_case("true") => Ok(true),
    s if s.eq_ignore_ascii_case("false") => Ok(false),
    other => Err(WorkflowError::InvalidConfig(format!(
      "expected True or False, found '{}'",
      other
    ))),
  }
}

pub(crate) fn bool_text(value: bool) -> &'static str {
  if value { "True" } else { "False" }
}

pub(crate) fn parse_number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T> {
  raw
    .trim()
    .parse()
    .map_err(|_| WorkflowError::InvalidConfig(format!("{} is not a number: '{}'", what, raw)))
}

/// A record limit where the empty string means "no limit".
pub(crate) fn parse_limit(raw: &str, what: &str) -> Result<Option<u64>> {
  if raw.trim().is_empty() {
    return Ok(None);
  }
  parse_number(raw, what).map(Some)
}

pub(crate) fn limit_text(limit: Option<u64>) -> String {
  limit.map(|l| l.to_string()).unwrap_or_default()
}

/// A list of `<Elem field=".." selected=".."/>` entries under a fixed path.
pub(crate) struct FieldList {
  pub path: &'static [&'static str],
  pub element: &'static str,
}

impl FieldList {
  /// Sets `selected` on every entry for `field`, appending one if none exists.
  pub fn set(&self, tool: &mut Tool, field: &str, selected: bool) {
    let list = tool.config.ensure_path(self.path);
    let mut found = false;
    for entry in list.children_mut() {
      if entry.name() == self.element && entry.attribute("field") == Some(field) {
        entry.insert_attribute("selected", bool_text(selected));
        found = true;
      }
    }
    if !found {
      list.push_child(
        PropertyTree::new(self.element)
          .set_attribute("field", field)
          .set_attribute("selected", bool_text(selected)),
      );
    }
  }

  /// Selection of `field`; `false` when the field is not configured.
  pub fn selection(&self, tool: &Tool, field: &str) -> Result<bool> {
    let entry = tool.config.at(self.path).and_then(|list| {
      list
        .children_named(self.element)
        .find(|e| e.attribute("field") == Some(field))
    });
    match entry.and_then(|e| e.attribute("selected")) {
      Some(raw) => parse_bool(raw),
      None => Ok(false),
    }
  }

  /// Removes every entry for `field`. Returns whether anything was removed.
  pub fn remove(&self, tool: &mut Tool, field: &str) -> bool {
    let Some(list) = tool.config.at_mut(self.path) else {
      return false;
    };
    let before = list.children().len();
    let element = self.element;
    list.retain_children(|e| !(e.name() == element && e.attribute("field") == Some(field)));
    list.children().len() != before
  }

  /// All entries carrying both `field` and `selected`, in document order.
  pub fn entries(&self, tool: &Tool) -> Result<Vec<(String, bool)>> {
    let Some(list) = tool.config.at(self.path) else {
      return Ok(Vec::new());
    };
    list
      .children_named(self.element)
      .filter_map(|e| Some((e.attribute("field")?, e.attribute("selected")?)))
      .map(|(field, selected)| Ok((field.to_string(), parse_bool(selected)?)))
      .collect()
  }
}
