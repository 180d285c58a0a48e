//! A tool (node) in the workflow graph.

use crate::error::{PortDirection, Result, WorkflowError};

use super::{EngineBinding, PortRef, Position, PropertyTree};

pub(crate) const NODE: &str = "Node";
pub(crate) const TOOL_ID: &str = "ToolID";
pub(crate) const GUI_SETTINGS: &str = "GuiSettings";
pub(crate) const PLUGIN: &str = "Plugin";
pub(crate) const POSITION: &str = "Position";
pub(crate) const PROPERTIES: &str = "Properties";
pub(crate) const ENGINE_SETTINGS: &str = "EngineSettings";

/// A processing step placed on the canvas.
///
/// `inputs` and `outputs` mirror the workflow's connection list. They are only changed
/// through [`Tool::add_input`] / [`Tool::add_output`] (and their removal counterparts), which
/// enforce the capability flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
  pub id: String,
  /// Plugin identifier. Empty for tools without a plugin (macros).
  pub kind_tag: String,
  pub position: Position,
  /// The `Properties` block, addressed by path (e.g. `Configuration/File`).
  pub config: PropertyTree,
  pub binding: Option<EngineBinding>,
  /// Node-level elements after the envelope (e.g. `ChildNodes` of a container).
  pub extras: Vec<PropertyTree>,
  accepts_input: bool,
  accepts_output: bool,
  input_ports: Vec<String>,
  output_ports: Vec<String>,
  inputs: Vec<PortRef>,
  outputs: Vec<PortRef>,
}

impl Tool {
  /// Generic tool with no capability restrictions and an empty config.
  pub fn new(id: impl Into<String>, kind_tag: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      kind_tag: kind_tag.into(),
      position: Position::default(),
      config: PropertyTree::new(PROPERTIES),
      binding: None,
      extras: Vec::new(),
      accepts_input: true,
      accepts_output: true,
      input_ports: Vec::new(),
      output_ports: Vec::new(),
      inputs: Vec::new(),
      outputs: Vec::new(),
    }
  }

  pub fn with_capabilities(mut self, accepts_input: bool, accepts_output: bool) -> Self {
    self.accepts_input = accepts_input;
    self.accepts_output = accepts_output;
    self
  }

  /// Declares the port names this kind uses. Empty means any name is fine.
  pub fn with_ports(mut self, input_ports: &[&str], output_ports: &[&str]) -> Self {
    self.input_ports = input_ports.iter().map(|p| p.to_string()).collect();
    self.output_ports = output_ports.iter().map(|p| p.to_string()).collect();
    self
  }

  pub fn with_position(mut self, position: impl Into<Position>) -> Self {
    self.position = position.into();
    self
  }

  pub fn with_binding(mut self, binding: EngineBinding) -> Self {
    self.binding = Some(binding);
    self
  }

  /// Replaces the config payload. The root is renamed to `Properties`.
  pub fn with_config(mut self, config: PropertyTree) -> Self {
    self.config = rename(config, PROPERTIES);
    self
  }

  pub fn accepts_input(&self) -> bool {
    self.accepts_input
  }

  pub fn accepts_output(&self) -> bool {
    self.accepts_output
  }

  pub fn inputs(&self) -> &[PortRef] {
    &self.inputs
  }

  pub fn outputs(&self) -> &[PortRef] {
    &self.outputs
  }

  pub fn input_ports(&self) -> &[String] {
    &self.input_ports
  }

  pub fn output_ports(&self) -> &[String] {
    &self.output_ports
  }

  pub fn declares_input_port(&self, port: &str) -> bool {
    self.input_ports.is_empty() || self.input_ports.iter().any(|p| p == port)
  }

  pub fn declares_output_port(&self, port: &str) -> bool {
    self.output_ports.is_empty() || self.output_ports.iter().any(|p| p == port)
  }

  pub fn is_source(&self) -> bool {
    self.inputs.is_empty()
  }

  pub fn is_sink(&self) -> bool {
    self.outputs.is_empty()
  }

  pub fn is_orphan(&self) -> bool {
    self.is_source() && self.is_sink()
  }

  /// Records an incoming connection from `peer_id`'s `peer_output_port`.
  pub fn add_input(
    &mut self,
    peer_id: impl Into<String>,
    peer_output_port: impl Into<String>,
    local_input_port: impl Into<String>,
  ) -> Result<&mut Self> {
    if !self.accepts_input {
      return Err(self.capability_error(PortDirection::Input));
    }
    self
      .inputs
      .push(PortRef::new(peer_id, peer_output_port, local_input_port));
    Ok(self)
  }

  /// Records an outgoing connection to `peer_id`'s `peer_input_port`.
  pub fn add_output(
    &mut self,
    peer_id: impl Into<String>,
    local_output_port: impl Into<String>,
    peer_input_port: impl Into<String>,
  ) -> Result<&mut Self> {
    if !self.accepts_output {
      return Err(self.capability_error(PortDirection::Output));
    }
    self
      .outputs
      .push(PortRef::new(peer_id, peer_input_port, local_output_port));
    Ok(self)
  }

  /// Drops the first matching input reference. Returns whether one was found.
  pub fn remove_input(&mut self, peer_id: &str, peer_output_port: &str, local_input_port: &str) -> bool {
    remove_first(&mut self.inputs, |r| {
      r.matches(peer_id, peer_output_port, local_input_port)
    })
  }

  /// Drops the first matching output reference. Returns whether one was found.
  pub fn remove_output(&mut self, peer_id: &str, local_output_port: &str, peer_input_port: &str) -> bool {
    remove_first(&mut self.outputs, |r| {
      r.matches(peer_id, peer_input_port, local_output_port)
    })
  }

  pub(crate) fn capability_error(&self, direction: PortDirection) -> WorkflowError {
    WorkflowError::Capability {
      tool_id: self.id.clone(),
      direction,
    }
  }

  /// Serializes the tool as a `Node` element.
  ///
  /// The envelope is the same for every kind: identity, `GuiSettings` with plugin and
  /// position, the `Properties` payload, then `EngineSettings`.
  pub fn render(&self) -> PropertyTree {
    let mut gui = PropertyTree::new(GUI_SETTINGS);
    if !self.kind_tag.is_empty() {
      gui.insert_attribute(PLUGIN, self.kind_tag.as_str());
    }
    gui.push_child(render_position(&self.position));

    let mut node = PropertyTree::new(NODE)
      .set_attribute(TOOL_ID, self.id.as_str())
      .add_child(gui)
      .add_child(rename(self.config.clone(), PROPERTIES));
    if let Some(binding) = &self.binding {
      let mut engine = PropertyTree::new(ENGINE_SETTINGS);
      for (k, v) in binding.attributes() {
        engine.insert_attribute(k.as_str(), v.as_str());
      }
      node.push_child(engine);
    }
    node.add_children(self.extras.iter().cloned())
  }
}

fn render_position(position: &Position) -> PropertyTree {
  let mut tree = PropertyTree::new(POSITION)
    .set_attribute("x", position.x.to_string())
    .set_attribute("y", position.y.to_string());
  if let Some(width) = position.width {
    tree.insert_attribute("width", width.to_string());
  }
  if let Some(height) = position.height {
    tree.insert_attribute("height", height.to_string());
  }
  tree
}

fn rename(tree: PropertyTree, name: &str) -> PropertyTree {
  if tree.name() == name {
    return tree;
  }
  let mut renamed = PropertyTree::new(name).set_text(tree.text());
  for (k, v) in tree.attributes() {
    renamed.insert_attribute(k.as_str(), v.as_str());
  }
  renamed.add_children(tree.children().iter().cloned())
}

fn remove_first(refs: &mut Vec<PortRef>, pred: impl Fn(&PortRef) -> bool) -> bool {
  match refs.iter().position(pred) {
    Some(idx) => {
      refs.remove(idx);
      true
    }
    None => false,
  }
}
