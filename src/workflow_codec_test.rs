//! Tests for the workflow document codec.

use crate::error::WorkflowError;
use crate::registry::{FILE_OUTPUT, FILTER, ToolRegistry};
use crate::types::{Position, PropertyTree, Tool, Workflow};
use crate::xml_tree::parse_tree;

const SIMPLE: &str = include_str!("../tests/fixtures/simple.yxmd");

fn assert_malformed(source: &str) {
  match Workflow::from_xml_str(source) {
    Err(WorkflowError::MalformedDocument(_)) => {}
    other => panic!("expected MalformedDocument, got {:?}", other),
  }
}

const NODE_1: &str = r#"<Node ToolID="1"><GuiSettings Plugin="P"><Position x="1" y="2"/></GuiSettings></Node>"#;

fn document(nodes: &str, connections: &str) -> String {
  format!(
    r#"<AlteryxDocument yxmdVer="2019.1"><Nodes>{}</Nodes><Connections>{}</Connections><Properties/></AlteryxDocument>"#,
    nodes, connections
  )
}

#[test]
fn reads_fixture() {
  let wf = Workflow::from_xml_str(SIMPLE).unwrap();
  assert_eq!(wf.name, "Simple");
  assert_eq!(wf.format_version, "2019.1");
  assert_eq!(wf.tool_count(), 5);
  assert_eq!(wf.connections().len(), 4);
  assert_eq!(wf.description(), Some("Filters large customers"));
  assert_eq!(wf.author(), Some("analytics"));

  let ids: Vec<&str> = wf.tools().map(|t| t.id.as_str()).collect();
  assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);

  let filter = wf.tool("3").unwrap();
  assert_eq!(filter.kind_tag, FILTER);
  assert_eq!(filter.position, Position::new(246, 66));
  assert_eq!(filter.outputs().len(), 2);
  assert_eq!(
    filter.config.at(&["Configuration", "Expression"]).unwrap().text(),
    "[Sales] > 100"
  );

  let output = wf.tool("4").unwrap();
  assert_eq!(output.kind_tag, FILE_OUTPUT);
  assert!(!output.accepts_output());
  assert!(output.is_sink());

  let macro_tool = wf.tool("5").unwrap();
  assert_eq!(macro_tool.kind_tag, "Vendor.Custom.Macro");
  assert!(macro_tool.binding.is_none());
  assert_eq!(macro_tool.position, Position::new(342, 166).with_size(120, 60));

  assert_eq!(wf.connections()[3].attributes.get("name").map(String::as_str), Some("#1"));
  assert!(wf.validate().is_ok());
  assert_eq!(wf.sources().len(), 1);
}

#[test]
fn fixture_tree_is_reproduced_exactly() {
  let wf = Workflow::from_xml_str(SIMPLE).unwrap();
  assert_eq!(wf.to_tree(), parse_tree(SIMPLE).unwrap());
}

#[test]
fn write_then_read_is_tree_equal() {
  let wf = Workflow::from_xml_str(SIMPLE).unwrap();
  let xml = wf.to_xml_string().unwrap();
  let again = Workflow::from_xml_str(&xml).unwrap();
  assert_eq!(again.to_tree(), wf.to_tree());
  assert_eq!(again.to_xml_string().unwrap(), xml);
}

#[test]
fn new_workflow_round_trips() {
  let mut wf = Workflow::new("Fresh", "2020.2");
  wf.add_tool(Tool::new("1", "").with_position((10, 20)));
  let again = Workflow::from_xml_str(&wf.to_xml_string_with(0).unwrap()).unwrap();
  assert_eq!(again.name, "Fresh");
  assert_eq!(again.format_version, "2020.2");
  assert_eq!(again.to_tree(), wf.to_tree());
  assert_eq!(again.tool("1").unwrap().kind_tag, "");
}

#[test]
fn to_tree_syncs_display_name() {
  let mut wf = Workflow::from_xml_str(SIMPLE).unwrap();
  wf.name = "Renamed".to_string();
  let tree = wf.to_tree();
  assert_eq!(
    tree.at(&["Properties", "MetaInfo", "Name"]).unwrap().text(),
    "Renamed"
  );
}

#[test]
fn to_tree_section_order() {
  let tree = Workflow::new("W", "2019.1").to_tree();
  assert_eq!(tree.name(), "AlteryxDocument");
  assert_eq!(tree.attribute("yxmdVer"), Some("2019.1"));
  let names: Vec<&str> = tree.children().iter().map(|c| c.name()).collect();
  assert_eq!(names, vec!["Nodes", "Connections", "Properties"]);
}

#[test]
fn minimal_document_parses() {
  let wf = Workflow::from_xml_str(&document(NODE_1, "")).unwrap();
  assert_eq!(wf.tool_count(), 1);
  assert_eq!(wf.name, "");
  assert_eq!(wf.tool("1").unwrap().kind_tag, "P");
}

#[test]
fn structural_errors_are_malformed() {
  assert_malformed("<Other yxmdVer=\"1\"><Nodes/><Connections/><Properties/></Other>");
  assert_malformed("<AlteryxDocument><Nodes/><Connections/><Properties/></AlteryxDocument>");
  assert_malformed("<AlteryxDocument yxmdVer=\"1\"><Nodes/><Properties/></AlteryxDocument>");
  assert_malformed(
    "<AlteryxDocument yxmdVer=\"1\"><Connections/><Nodes/><Properties/></AlteryxDocument>",
  );
  assert_malformed(
    "<AlteryxDocument yxmdVer=\"1\"><Nodes/><Connections/><Properties/><Extra/></AlteryxDocument>",
  );
}

#[test]
fn node_errors_are_malformed() {
  assert_malformed(&document(
    r#"<Node><GuiSettings><Position x="1" y="2"/></GuiSettings></Node>"#,
    "",
  ));
  assert_malformed(&document(r#"<Node ToolID="1"><Properties/></Node>"#, ""));
  assert_malformed(&document(
    r#"<Node ToolID="1"><GuiSettings><Position x="a" y="2"/></GuiSettings></Node>"#,
    "",
  ));
  assert_malformed(&document(
    r#"<Node ToolID="1"><GuiSettings><Position x="1"/></GuiSettings></Node>"#,
    "",
  ));
  assert_malformed(&document(&format!("{}{}", NODE_1, NODE_1), ""));
}

#[test]
fn connection_errors() {
  assert_malformed(&document(
    NODE_1,
    r#"<Connection><Origin ToolID="1" Connection="Output"/></Connection>"#,
  ));
  let dangling = document(
    NODE_1,
    r#"<Connection><Origin ToolID="1" Connection="Output"/><Destination ToolID="9" Connection="Input"/></Connection>"#,
  );
  assert!(matches!(
    Workflow::from_xml_str(&dangling),
    Err(WorkflowError::UnknownNode(id)) if id == "9"
  ));
}

#[test]
fn custom_registry_is_used_for_dispatch() {
  let mut registry = ToolRegistry::empty();
  registry.register("P", |id| Tool::new(id, "P").with_capabilities(false, true));
  let wf = Workflow::from_xml_str_with(&document(NODE_1, ""), &registry).unwrap();
  assert!(!wf.tool("1").unwrap().accepts_input());
}

#[test]
fn name_survives_properties_without_meta_info() {
  let mut wf = Workflow::new("Keep", "2019.1");
  wf.properties = PropertyTree::new("Properties");
  let tree = wf.to_tree();
  assert_eq!(
    tree.at(&["Properties", "MetaInfo", "Name"]).unwrap().text(),
    "Keep"
  );
  let again = Workflow::from_xml_str(&wf.to_xml_string().unwrap()).unwrap();
  assert_eq!(again.name, "Keep");
}

#[test]
fn unnamed_document_without_meta_info_is_unchanged() {
  let source = document(NODE_1, "");
  let wf = Workflow::from_xml_str(&source).unwrap();
  assert_eq!(wf.name, "");
  assert_eq!(
    wf.to_tree().child("Properties"),
    parse_tree(&source).unwrap().child("Properties")
  );
}
