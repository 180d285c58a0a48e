//! Tests for `Workflow` editing operations.

use super::{Position, ROW_SPACING, Tool, Workflow};
use crate::error::{PortDirection, WorkflowError};
use crate::registry::{FILE_INPUT, FILE_OUTPUT, FILTER, SELECT, create_tool};

fn pipeline() -> Workflow {
  let mut wf = Workflow::new("Pipeline", "2019.1");
  wf.add_tool(create_tool(FILE_INPUT, "1"))
    .add_tool(create_tool(SELECT, "2"))
    .add_tool(create_tool(FILE_OUTPUT, "3"));
  wf.add_connection("1", "Output", "2", "Input")
    .unwrap()
    .add_connection("2", "Output", "3", "Input")
    .unwrap();
  wf
}

#[test]
fn new_workflow_has_default_properties() {
  let wf = Workflow::new("My Flow", "2019.1");
  assert_eq!(wf.tool_count(), 0);
  assert!(wf.connections().is_empty());
  assert_eq!(wf.properties.name(), "Properties");
  assert_eq!(
    wf.properties.at(&["MetaInfo", "Name"]).map(|n| n.text()),
    Some("My Flow")
  );
  assert_eq!(wf.global_record_limit().unwrap(), 0);
  assert_eq!(wf.description(), Some(""));
}

#[test]
fn add_tool_replaces_in_place() {
  let mut wf = Workflow::new("W", "2019.1");
  wf.add_tool(Tool::new("1", "A"))
    .add_tool(Tool::new("2", "B"))
    .add_tool(Tool::new("1", "C"));
  let ids: Vec<(&str, &str)> = wf
    .tools()
    .map(|t| (t.id.as_str(), t.kind_tag.as_str()))
    .collect();
  assert_eq!(ids, vec![("1", "C"), ("2", "B")]);
}

#[test]
fn add_connection_mirrors_port_refs() {
  let wf = pipeline();
  assert_eq!(wf.connections().len(), 2);
  let select = wf.tool("2").unwrap();
  assert_eq!(select.inputs().len(), 1);
  assert_eq!(select.inputs()[0].peer_tool_id, "1");
  assert_eq!(select.outputs().len(), 1);
  assert_eq!(select.outputs()[0].peer_tool_id, "3");
  assert!(wf.validate().is_ok());
}

#[test]
fn capability_violation_leaves_workflow_unchanged() {
  let mut wf = pipeline();
  let before = wf.clone();
  match wf.add_connection("3", "Output", "1", "Input") {
    Err(WorkflowError::Capability { tool_id, direction }) => {
      assert_eq!(tool_id, "3");
      assert_eq!(direction, PortDirection::Output);
    }
    other => panic!("expected capability error, got {:?}", other.map(|_| ())),
  }
  assert_eq!(wf.connections().len(), 2);
  assert_eq!(wf, before);
}

#[test]
fn input_capability_checked_on_destination() {
  let mut wf = pipeline();
  wf.add_tool(create_tool(SELECT, "4"));
  assert!(matches!(
    wf.add_connection("4", "Output", "1", "Input"),
    Err(WorkflowError::Capability {
      direction: PortDirection::Input,
      ..
    })
  ));
  assert!(wf.tool("4").unwrap().outputs().is_empty());
}

#[test]
fn unknown_endpoint_is_rejected_without_mutation() {
  let mut wf = pipeline();
  let before = wf.clone();
  assert!(matches!(
    wf.add_connection("1", "Output", "99", "Input"),
    Err(WorkflowError::UnknownNode(id)) if id == "99"
  ));
  assert!(matches!(
    wf.add_connection("42", "Output", "3", "Input"),
    Err(WorkflowError::UnknownNode(id)) if id == "42"
  ));
  assert_eq!(wf, before);
}

#[test]
fn undeclared_port_names_are_accepted() {
  let mut wf = Workflow::new("W", "2019.1");
  wf.add_tool(create_tool(FILTER, "1"))
    .add_tool(create_tool(FILE_OUTPUT, "2"));
  wf.add_connection("1", "Maybe", "2", "Input").unwrap();
  assert_eq!(wf.connections()[0].origin_port, "Maybe");
}

#[test]
fn duplicate_edges_are_kept() {
  let mut wf = pipeline();
  wf.add_connection("1", "Output", "2", "Input").unwrap();
  assert_eq!(wf.connections().len(), 3);
  assert_eq!(wf.tool("2").unwrap().inputs().len(), 2);
  assert!(wf.validate().is_ok());
}

#[test]
fn remove_tool_does_not_cascade() {
  let mut wf = pipeline();
  wf.remove_tool("2");
  assert!(wf.tool("2").is_none());
  assert_eq!(wf.connections().len(), 2);
  assert_eq!(wf.tool("1").unwrap().outputs().len(), 1);
  assert!(matches!(wf.validate(), Err(WorkflowError::Inconsistent(_))));
}

#[test]
fn remove_missing_tool_is_noop() {
  let mut wf = pipeline();
  let before = wf.clone();
  wf.remove_tool("nope");
  assert_eq!(wf, before);
}

#[test]
fn remove_connection_touches_edge_list_only() {
  let mut wf = pipeline();
  wf.remove_connection("1", "Output", "2", "Input");
  assert_eq!(wf.connections().len(), 1);
  assert_eq!(wf.tool("1").unwrap().outputs().len(), 1);
  assert!(wf.validate().is_err());

  let len = wf.connections().len();
  wf.remove_connection("1", "Output", "2", "Input");
  assert_eq!(wf.connections().len(), len);
}

#[test]
fn disconnect_removes_both_sides() {
  let mut wf = pipeline();
  wf.disconnect("1", "Output", "2", "Input").unwrap();
  assert_eq!(wf.connections().len(), 1);
  assert!(wf.tool("1").unwrap().is_sink());
  assert!(wf.tool("2").unwrap().is_source());
  assert!(wf.validate().is_ok());

  assert!(matches!(
    wf.disconnect("1", "Output", "2", "Input"),
    Err(WorkflowError::UnknownConnection { .. })
  ));
}

#[test]
fn detach_tool_cascades() {
  let mut wf = pipeline();
  let removed = wf.detach_tool("2").unwrap();
  assert_eq!(removed.id, "2");
  assert!(wf.connections().is_empty());
  assert_eq!(wf.orphans().len(), 2);
  assert!(wf.validate().is_ok());
  assert!(matches!(
    wf.detach_tool("2"),
    Err(WorkflowError::UnknownNode(_))
  ));
}

#[test]
fn sources_sinks_and_orphans() {
  let mut wf = pipeline();
  wf.add_tool(Tool::new("9", "Comment"));
  let ids = |tools: Vec<&Tool>| tools.iter().map(|t| t.id.clone()).collect::<Vec<_>>();
  assert_eq!(ids(wf.sources()), vec!["1", "9"]);
  assert_eq!(ids(wf.sinks()), vec!["3", "9"]);
  assert_eq!(ids(wf.orphans()), vec!["9"]);
}

#[test]
fn next_tool_id_skips_non_numeric() {
  let mut wf = Workflow::new("W", "2019.1");
  assert_eq!(wf.next_tool_id(), "1");
  wf.add_tool(Tool::new("7", ""))
    .add_tool(Tool::new("abc", ""))
    .add_tool(Tool::new("3", ""));
  assert_eq!(wf.next_tool_id(), "8");
}

#[test]
fn position_below_uses_row_spacing() {
  let mut wf = Workflow::new("W", "2019.1");
  wf.add_tool(Tool::new("1", "").with_position((54, 66)));
  assert_eq!(
    wf.position_below("1").unwrap(),
    Position::new(54, 66 + ROW_SPACING)
  );
  assert!(wf.position_below("2").is_err());
}

#[test]
fn metadata_accessors() {
  let mut wf = Workflow::new("W", "2019.1");
  wf.set_description("loads and filters")
    .set_author("analytics")
    .set_global_record_limit(500);
  assert_eq!(wf.description(), Some("loads and filters"));
  assert_eq!(wf.author(), Some("analytics"));
  assert_eq!(wf.global_record_limit().unwrap(), 500);
}

#[test]
fn global_record_limit_errors() {
  let mut wf = Workflow::new("W", "2019.1");
  wf.properties.retain_children(|c| c.name() != "GlobalRecordLimit");
  assert!(matches!(
    wf.global_record_limit(),
    Err(WorkflowError::MissingConfig(_))
  ));
  wf.properties
    .ensure_path(&["GlobalRecordLimit"])
    .insert_attribute("value", "lots");
  assert!(matches!(
    wf.global_record_limit(),
    Err(WorkflowError::InvalidConfig(_))
  ));
}

#[test]
fn next_tool_id_at_u64_max_reuses_a_free_id() {
  let mut wf = Workflow::new("W", "2019.1");
  wf.add_tool(Tool::new(u64::MAX.to_string(), ""));
  assert_eq!(wf.next_tool_id(), "1");
  wf.add_tool(Tool::new("1", ""))
    .add_tool(Tool::new("2", ""))
    .add_tool(Tool::new("4", ""));
  assert_eq!(wf.next_tool_id(), "3");
  assert!(wf.tool(&wf.next_tool_id()).is_none());
}

#[test]
fn position_below_saturates() {
  let mut wf = Workflow::new("W", "2019.1");
  wf.add_tool(Tool::new("1", "").with_position((5, i32::MAX - 10)));
  assert_eq!(wf.position_below("1").unwrap(), Position::new(5, i32::MAX));
}

#[test]
fn equality_depends_on_tool_order() {
  let mut a = Workflow::new("W", "2019.1");
  a.add_tool(Tool::new("1", "")).add_tool(Tool::new("2", ""));
  let mut b = Workflow::new("W", "2019.1");
  b.add_tool(Tool::new("2", "")).add_tool(Tool::new("1", ""));
  assert_ne!(a, b);
  assert_ne!(a.to_tree(), b.to_tree());

  let mut c = Workflow::new("W", "2019.1");
  c.add_tool(Tool::new("1", "")).add_tool(Tool::new("2", ""));
  assert_eq!(a, c);
}
