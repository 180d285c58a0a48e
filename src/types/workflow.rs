//! The workflow document: tools, connections and document properties.

use indexmap::IndexMap;
use tracing::{debug, instrument, warn};

use crate::error::{PortDirection, Result, WorkflowError};

use super::document_properties::{META_INFO, default_properties};
use super::{Connection, PortRef, Position, PropertyTree, Tool};

/// Vertical distance used by [`Workflow::position_below`].
pub const ROW_SPACING: i32 = 100;

/// An owned workflow document.
///
/// `tools` keeps insertion order, which is also the serialization order. Every
/// connection is mirrored as one [`crate::PortRef`] on each endpoint; `add_connection`
/// and `disconnect` keep both sides in step.
#[derive(Debug, Clone)]
pub struct Workflow {
  /// Display name, written to `MetaInfo/Name`.
  pub name: String,
  /// Value of the root `yxmdVer` attribute, e.g. `2019.1`.
  pub format_version: String,
  /// Document-level `Properties` block, including `MetaInfo`.
  pub properties: PropertyTree,
  tools: IndexMap<String, Tool>,
  connections: Vec<Connection>,
}

impl PartialEq for Workflow {
  /// Tool order is part of the document, so it takes part in equality.
  fn eq(&self, other: &Self) -> bool {
    self.name == other.name
      && self.format_version == other.format_version
      && self.properties == other.properties
      && self.tools.iter().eq(other.tools.iter())
      && self.connections == other.connections
  }
}

impl Eq for Workflow {}

impl Workflow {
  pub fn new(name: impl Into<String>, format_version: impl Into<String>) -> Self {
    let name = name.into();
    Self {
      properties: default_properties(&name),
      name,
      format_version: format_version.into(),
      tools: IndexMap::new(),
      connections: Vec::new(),
    }
  }

  /// Empty document with a caller-supplied `Properties` block (used when reading).
  pub(crate) fn with_properties(
    name: String,
    format_version: String,
    properties: PropertyTree,
  ) -> Self {
    Self {
      name,
      format_version,
      properties,
      tools: IndexMap::new(),
      connections: Vec::new(),
    }
  }

  pub fn tool(&self, id: &str) -> Option<&Tool> {
    self.tools.get(id)
  }

  pub fn tool_mut(&mut self, id: &str) -> Option<&mut Tool> {
    self.tools.get_mut(id)
  }

  /// Tools in insertion order.
  pub fn tools(&self) -> impl Iterator<Item = &Tool> {
    self.tools.values()
  }

  pub fn tool_count(&self) -> usize {
    self.tools.len()
  }

  pub fn connections(&self) -> &[Connection] {
    &self.connections
  }

  /// Inserts a tool, replacing any tool with the same id in place.
  ///
  /// Replacing does not touch port references on other tools; keeping them valid is
  /// up to the caller.
  pub fn add_tool(&mut self, tool: Tool) -> &mut Self {
    if self.tools.contains_key(&tool.id) {
      debug!(tool_id = %tool.id, "replacing existing tool");
    }
    self.tools.insert(tool.id.clone(), tool);
    self
  }

  /// Removes the tool entry only. Connections and peer port references that point at
  /// it are left in place; use [`Workflow::detach_tool`] to remove those as well.
  pub fn remove_tool(&mut self, id: &str) -> &mut Self {
    if self.tools.shift_remove(id).is_some() {
      let dangling = self.connections.iter().filter(|c| c.touches(id)).count();
      if dangling > 0 {
        warn!(tool_id = %id, dangling, "removed tool still referenced by connections");
      }
    }
    self
  }

  /// Connects `origin_id.origin_port` to `destination_id.destination_port`.
  ///
  /// On success the edge is appended and both endpoints gain a port reference. On error
  /// nothing changes.
  pub fn add_connection(
    &mut self,
    origin_id: &str,
    origin_port: &str,
    destination_id: &str,
    destination_port: &str,
  ) -> Result<&mut Self> {
    self.insert_connection(Connection::new(
      origin_id,
      origin_port,
      destination_id,
      destination_port,
    ))
  }

  /// Same as [`Workflow::add_connection`] for a prepared [`Connection`] value.
  pub fn insert_connection(&mut self, connection: Connection) -> Result<&mut Self> {
    let origin = self
      .tools
      .get(&connection.origin_id)
      .ok_or_else(|| WorkflowError::UnknownNode(connection.origin_id.clone()))?;
    let destination = self
      .tools
      .get(&connection.destination_id)
      .ok_or_else(|| WorkflowError::UnknownNode(connection.destination_id.clone()))?;
    if !origin.accepts_output() {
      return Err(origin.capability_error(PortDirection::Output));
    }
    if !destination.accepts_input() {
      return Err(destination.capability_error(PortDirection::Input));
    }
    if !origin.declares_output_port(&connection.origin_port)
      || !destination.declares_input_port(&connection.destination_port)
    {
      debug!(
        origin = %connection.origin_id,
        origin_port = %connection.origin_port,
        destination = %connection.destination_id,
        destination_port = %connection.destination_port,
        "connection uses a port outside the kind's vocabulary"
      );
    }

    // Capabilities were checked above; neither call fails.
    if let Some(origin) = self.tools.get_mut(&connection.origin_id) {
      origin.add_output(
        connection.destination_id.as_str(),
        connection.origin_port.as_str(),
        connection.destination_port.as_str(),
      )?;
    }
    if let Some(destination) = self.tools.get_mut(&connection.destination_id) {
      destination.add_input(
        connection.origin_id.as_str(),
        connection.origin_port.as_str(),
        connection.destination_port.as_str(),
      )?;
    }
    self.connections.push(connection);
    Ok(self)
  }

  /// Removes the first matching edge from the connection list only. Port references on
  /// the endpoints are left in place; use [`Workflow::disconnect`] to remove both.
  pub fn remove_connection(
    &mut self,
    origin_id: &str,
    origin_port: &str,
    destination_id: &str,
    destination_port: &str,
  ) -> &mut Self {
    if let Some(idx) = self
      .connections
      .iter()
      .position(|c| c.matches(origin_id, origin_port, destination_id, destination_port))
    {
      self.connections.remove(idx);
    }
    self
  }

  /// Removes the first matching edge together with both mirrored port references.
  pub fn disconnect(
    &mut self,
    origin_id: &str,
    origin_port: &str,
    destination_id: &str,
    destination_port: &str,
  ) -> Result<&mut Self> {
    let idx = self
      .connections
      .iter()
      .position(|c| c.matches(origin_id, origin_port, destination_id, destination_port))
      .ok_or_else(|| WorkflowError::UnknownConnection {
        origin_id: origin_id.to_string(),
        origin_port: origin_port.to_string(),
        destination_id: destination_id.to_string(),
        destination_port: destination_port.to_string(),
      })?;
    self.connections.remove(idx);
    if let Some(origin) = self.tools.get_mut(origin_id) {
      origin.remove_output(destination_id, origin_port, destination_port);
    }
    if let Some(destination) = self.tools.get_mut(destination_id) {
      destination.remove_input(origin_id, origin_port, destination_port);
    }
    Ok(self)
  }

  /// Disconnects every edge touching `id`, then removes and returns the tool.
  #[instrument(level = "trace", skip(self))]
  pub fn detach_tool(&mut self, id: &str) -> Result<Tool> {
    if !self.tools.contains_key(id) {
      return Err(WorkflowError::UnknownNode(id.to_string()));
    }
    let touching: Vec<Connection> = self
      .connections
      .iter()
      .filter(|c| c.touches(id))
      .cloned()
      .collect();
    for c in &touching {
      self.disconnect(
        &c.origin_id,
        &c.origin_port,
        &c.destination_id,
        &c.destination_port,
      )?;
    }
    self
      .tools
      .shift_remove(id)
      .ok_or_else(|| WorkflowError::UnknownNode(id.to_string()))
  }

  /// Checks that every edge references present tools and that the port references on
  /// the tools match the edge list one-to-one.
  pub fn validate(&self) -> Result<()> {
    for c in &self.connections {
      for id in [&c.origin_id, &c.destination_id] {
        if !self.tools.contains_key(id) {
          return Err(WorkflowError::Inconsistent(format!(
            "connection {}.{} -> {}.{} references missing tool '{}'",
            c.origin_id, c.origin_port, c.destination_id, c.destination_port, id
          )));
        }
      }
    }
    for tool in self.tools.values() {
      for r in tool.outputs() {
        let edges = self.count_edges(&tool.id, &r.local_port, &r.peer_tool_id, &r.peer_port);
        let refs = count_refs(tool.outputs(), r);
        if edges != refs {
          return Err(WorkflowError::Inconsistent(format!(
            "tool '{}' output {} -> {}.{} has no matching connection",
            tool.id, r.local_port, r.peer_tool_id, r.peer_port
          )));
        }
      }
      for r in tool.inputs() {
        let edges = self.count_edges(&r.peer_tool_id, &r.peer_port, &tool.id, &r.local_port);
        let refs = count_refs(tool.inputs(), r);
        if edges != refs {
          return Err(WorkflowError::Inconsistent(format!(
            "tool '{}' input {} <- {}.{} has no matching connection",
            tool.id, r.local_port, r.peer_tool_id, r.peer_port
          )));
        }
      }
    }
    let mirrored: usize = self.tools.values().map(|t| t.outputs().len()).sum();
    if mirrored != self.connections.len() {
      return Err(WorkflowError::Inconsistent(format!(
        "{} connections but {} output port references",
        self.connections.len(),
        mirrored
      )));
    }
    Ok(())
  }

  fn count_edges(&self, origin_id: &str, origin_port: &str, dest_id: &str, dest_port: &str) -> usize {
    self
      .connections
      .iter()
      .filter(|c| c.matches(origin_id, origin_port, dest_id, dest_port))
      .count()
  }

  /// Tools with no incoming connections.
  pub fn sources(&self) -> Vec<&Tool> {
    self.tools.values().filter(|t| t.is_source()).collect()
  }

  /// Tools with no outgoing connections.
  pub fn sinks(&self) -> Vec<&Tool> {
    self.tools.values().filter(|t| t.is_sink()).collect()
  }

  pub fn orphans(&self) -> Vec<&Tool> {
    self.tools.values().filter(|t| t.is_orphan()).collect()
  }

  /// One past the largest numeric tool id; non-numeric ids are ignored. When the largest
  /// id is `u64::MAX`, the smallest unused positive id is returned instead.
  pub fn next_tool_id(&self) -> String {
    let mut used: Vec<u64> = self
      .tools
      .keys()
      .filter_map(|id| id.parse::<u64>().ok())
      .collect();
    let max = used.iter().copied().max().unwrap_or(0);
    if let Some(next) = max.checked_add(1) {
      return next.to_string();
    }
    used.sort_unstable();
    used.dedup();
    let mut next = 1;
    for id in used {
      if id == next {
        next += 1;
      } else if id > next {
        break;
      }
    }
    next.to_string()
  }

  /// Position one row below tool `id`, at the same x. Saturates at `i32::MAX`.
  pub fn position_below(&self, id: &str) -> Result<Position> {
    let tool = self
      .tools
      .get(id)
      .ok_or_else(|| WorkflowError::UnknownNode(id.to_string()))?;
    Ok(Position::new(
      tool.position.x,
      tool.position.y.saturating_add(ROW_SPACING),
    ))
  }

  pub fn description(&self) -> Option<&str> {
    self
      .properties
      .at(&[META_INFO, "Description"])
      .map(PropertyTree::text)
  }

  pub fn set_description(&mut self, description: &str) -> &mut Self {
    self
      .properties
      .ensure_path(&[META_INFO, "Description"])
      .replace_text(description);
    self
  }

  pub fn author(&self) -> Option<&str> {
    self
      .properties
      .at(&[META_INFO, "Author"])
      .map(PropertyTree::text)
  }

  pub fn set_author(&mut self, author: &str) -> &mut Self {
    self
      .properties
      .ensure_path(&[META_INFO, "Author"])
      .replace_text(author);
    self
  }

  /// `GlobalRecordLimit@value`; 0 means no limit.
  pub fn global_record_limit(&self) -> Result<u64> {
    let element = self
      .properties
      .child("GlobalRecordLimit")
      .ok_or_else(|| WorkflowError::MissingConfig("GlobalRecordLimit".to_string()))?;
    let value = element.get_attribute("value")?;
    value
      .parse()
      .map_err(|_| WorkflowError::InvalidConfig(format!("GlobalRecordLimit '{}'", value)))
  }

  pub fn set_global_record_limit(&mut self, limit: u64) -> &mut Self {
    self
      .properties
      .ensure_path(&["GlobalRecordLimit"])
      .insert_attribute("value", limit.to_string());
    self
  }
}

fn count_refs(refs: &[PortRef], r: &PortRef) -> usize {
  refs.iter().filter(|x| *x == r).count()
}
