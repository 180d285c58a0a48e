//! A directed edge between two tools.

use indexmap::IndexMap;

use super::PropertyTree;

pub(crate) const CONNECTION: &str = "Connection";
pub(crate) const ORIGIN: &str = "Origin";
pub(crate) const DESTINATION: &str = "Destination";
pub(crate) const TOOL_ID: &str = "ToolID";

/// A directed edge: `origin_id.origin_port -> destination_id.destination_port`.
///
/// Referential integrity is checked by the workflow, not here.
#[derive(Debug, Clone, Default)]
pub struct Connection {
  pub origin_id: String,
  pub origin_port: String,
  pub destination_id: String,
  pub destination_port: String,
  /// Extra attributes of the `Connection` element (`name`, `Wireless`, ...).
  pub attributes: IndexMap<String, String>,
}

impl PartialEq for Connection {
  fn eq(&self, other: &Self) -> bool {
    self.matches(
      &other.origin_id,
      &other.origin_port,
      &other.destination_id,
      &other.destination_port,
    ) && self.attributes.iter().eq(other.attributes.iter())
  }
}

impl Eq for Connection {}

impl Connection {
  pub fn new(
    origin_id: impl Into<String>,
    origin_port: impl Into<String>,
    destination_id: impl Into<String>,
    destination_port: impl Into<String>,
  ) -> Self {
    Self {
      origin_id: origin_id.into(),
      origin_port: origin_port.into(),
      destination_id: destination_id.into(),
      destination_port: destination_port.into(),
      attributes: IndexMap::new(),
    }
  }

  pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.attributes.insert(key.into(), value.into());
    self
  }

  /// True when the four endpoint fields are equal to the given ones.
  pub fn matches(
    &self,
    origin_id: &str,
    origin_port: &str,
    destination_id: &str,
    destination_port: &str,
  ) -> bool {
    self.origin_id == origin_id
      && self.origin_port == origin_port
      && self.destination_id == destination_id
      && self.destination_port == destination_port
  }

  pub fn touches(&self, tool_id: &str) -> bool {
    self.origin_id == tool_id || self.destination_id == tool_id
  }

  /// Serializes the edge as a `Connection` element with `Origin` and `Destination`.
  pub fn render(&self) -> PropertyTree {
    let mut connection = PropertyTree::new(CONNECTION);
    for (k, v) in &self.attributes {
      connection.insert_attribute(k.as_str(), v.as_str());
    }
    connection
      .add_child(
        PropertyTree::new(ORIGIN)
          .set_attribute(TOOL_ID, self.origin_id.as_str())
          .set_attribute(CONNECTION, self.origin_port.as_str()),
      )
      .add_child(
        PropertyTree::new(DESTINATION)
          .set_attribute(TOOL_ID, self.destination_id.as_str())
          .set_attribute(CONNECTION, self.destination_port.as_str()),
      )
  }
}
