//! Maps a [`Workflow`] to and from its XML document form.
//!
//! Document shape: `AlteryxDocument[yxmdVer]` with exactly three sections in order:
//! `Nodes`, `Connections`, `Properties`.

use tracing::{info, instrument};

use crate::error::Result;
use crate::registry::{ToolRegistry, builtin_registry};
use crate::types::element::{
  CONNECTION, DESTINATION, ENGINE_SETTINGS, GUI_SETTINGS, META_INFO, NAME, NODE, ORIGIN, PLUGIN,
  POSITION, PROPERTIES, TOOL_ID,
};
use crate::types::{Connection, EngineBinding, Position, PropertyTree, Tool, Workflow};
use crate::xml_tree::{DEFAULT_INDENT, malformed, parse_tree, render_tree};

pub const ROOT: &str = "AlteryxDocument";
pub const VERSION_ATTR: &str = "yxmdVer";
pub const NODES: &str = "Nodes";
pub const CONNECTIONS: &str = "Connections";

const SECTIONS: [&str; 3] = [NODES, CONNECTIONS, PROPERTIES];

fn required_attr<'a>(element: &'a PropertyTree, key: &str) -> Result<&'a str> {
  element.attribute(key).ok_or_else(|| {
    malformed(format!(
      "<{}> is missing the '{}' attribute",
      element.name(),
      key
    ))
  })
}

fn required_child<'a>(element: &'a PropertyTree, name: &str) -> Result<&'a PropertyTree> {
  element
    .child(name)
    .ok_or_else(|| malformed(format!("<{}> has no <{}>", element.name(), name)))
}

fn int_attr(element: &PropertyTree, key: &str) -> Result<i32> {
  let raw = required_attr(element, key)?;
  raw.trim().parse().map_err(|_| {
    malformed(format!(
      "<{}> attribute '{}' is not an integer: '{}'",
      element.name(),
      key,
      raw
    ))
  })
}

fn optional_int_attr(element: &PropertyTree, key: &str) -> Result<Option<i32>> {
  match element.attribute(key) {
    Some(_) => int_attr(element, key).map(Some),
    None => Ok(None),
  }
}

/// Reads `GuiSettings/Position`.
pub(crate) fn parse_position(gui: &PropertyTree) -> Result<Position> {
  let position = required_child(gui, POSITION)?;
  Ok(Position {
    x: int_attr(position, "x")?,
    y: int_attr(position, "y")?,
    width: optional_int_attr(position, "width")?,
    height: optional_int_attr(position, "height")?,
  })
}

/// Builds a tool from a `Node` element, dispatching on its plugin through `registry`.
pub(crate) fn parse_tool(node: &PropertyTree, registry: &ToolRegistry) -> Result<Tool> {
  if node.name() != NODE {
    return Err(malformed(format!("expected <{}>, found <{}>", NODE, node.name())));
  }
  let id = required_attr(node, TOOL_ID)?;
  let gui = required_child(node, GUI_SETTINGS)?;
  let kind_tag = gui.attribute(PLUGIN).unwrap_or_default();

  let mut tool = registry.create(kind_tag, id).with_position(parse_position(gui)?);
  tool.binding = node
    .child(ENGINE_SETTINGS)
    .map(|engine| EngineBinding::from_attributes(engine.attributes().clone()));
  if let Some(config) = node.child(PROPERTIES) {
    tool.config = config.clone();
  }
  tool.extras = node
    .children()
    .iter()
    .filter(|c| ![GUI_SETTINGS, PROPERTIES, ENGINE_SETTINGS].contains(&c.name()))
    .cloned()
    .collect();
  Ok(tool)
}

/// Reads a `Connection` element. Endpoints are not checked here.
pub(crate) fn parse_connection(element: &PropertyTree) -> Result<Connection> {
  if element.name() != CONNECTION {
    return Err(malformed(format!(
      "expected <{}>, found <{}>",
      CONNECTION,
      element.name()
    )));
  }
  let origin = required_child(element, ORIGIN)?;
  let destination = required_child(element, DESTINATION)?;
  let mut connection = Connection::new(
    required_attr(origin, TOOL_ID)?,
    required_attr(origin, CONNECTION)?,
    required_attr(destination, TOOL_ID)?,
    required_attr(destination, CONNECTION)?,
  );
  connection.attributes = element.attributes().clone();
  Ok(connection)
}

/// Splits the root into its three sections, rejecting anything else.
fn sections(root: &PropertyTree) -> Result<[&PropertyTree; 3]> {
  if root.name() != ROOT {
    return Err(malformed(format!(
      "expected root <{}>, found <{}>",
      ROOT,
      root.name()
    )));
  }
  let names: Vec<&str> = root.children().iter().map(PropertyTree::name).collect();
  if names != SECTIONS {
    return Err(malformed(format!(
      "expected sections {:?}, found {:?}",
      SECTIONS, names
    )));
  }
  let children = root.children();
  Ok([&children[0], &children[1], &children[2]])
}

impl Workflow {
  /// Builds a workflow from a parsed document tree using the built-in registry.
  pub fn from_tree(root: &PropertyTree) -> Result<Self> {
    Self::from_tree_with(root, builtin_registry())
  }

  /// Builds a workflow from a parsed document tree.
  ///
  /// Order: metadata, then every tool, then connections (which need all tools to
  /// exist), then the document properties.
  #[instrument(level = "trace", skip(root, registry))]
  pub fn from_tree_with(root: &PropertyTree, registry: &ToolRegistry) -> Result<Self> {
    let [nodes, connections, properties] = sections(root)?;

    let format_version = required_attr(root, VERSION_ATTR)?.to_string();
    let name = properties
      .at(&[META_INFO, NAME])
      .map(|n| n.text().to_string())
      .unwrap_or_default();
    let mut workflow = Workflow::with_properties(name, format_version, PropertyTree::new(PROPERTIES));

    for node in nodes.children() {
      let tool = parse_tool(node, registry)?;
      if workflow.tool(&tool.id).is_some() {
        return Err(malformed(format!("duplicate ToolID '{}'", tool.id)));
      }
      workflow.add_tool(tool);
    }
    for element in connections.children() {
      workflow.insert_connection(parse_connection(element)?)?;
    }
    workflow.properties = properties.clone();

    info!(
      tools = workflow.tool_count(),
      connections = workflow.connections().len(),
      "parsed workflow"
    );
    Ok(workflow)
  }

  /// Parses XML text using the built-in registry.
  pub fn from_xml_str(source: &str) -> Result<Self> {
    Self::from_tree(&parse_tree(source)?)
  }

  pub fn from_xml_str_with(source: &str, registry: &ToolRegistry) -> Result<Self> {
    Self::from_tree_with(&parse_tree(source)?, registry)
  }

  /// The full document tree: tools and connections in insertion order, then properties.
  ///
  /// `name` is written to `MetaInfo/Name`. The element is created when missing, unless the
  /// name is empty, so documents read without one are written back unchanged.
  pub fn to_tree(&self) -> PropertyTree {
    let mut properties = self.properties.clone();
    if let Some(name) = properties.at_mut(&[META_INFO, NAME]) {
      name.replace_text(self.name.as_str());
    } else if !self.name.is_empty() {
      properties
        .ensure_path(&[META_INFO, NAME])
        .replace_text(self.name.as_str());
    }
    PropertyTree::new(ROOT)
      .set_attribute(VERSION_ATTR, self.format_version.as_str())
      .add_child(PropertyTree::new(NODES).add_children(self.tools().map(Tool::render)))
      .add_child(
        PropertyTree::new(CONNECTIONS).add_children(self.connections().iter().map(Connection::render)),
      )
      .add_child(properties)
  }

  pub fn to_xml_string(&self) -> Result<String> {
    self.to_xml_string_with(DEFAULT_INDENT)
  }

  pub fn to_xml_string_with(&self, indent: usize) -> Result<String> {
    render_tree(&self.to_tree(), indent)
  }
}
