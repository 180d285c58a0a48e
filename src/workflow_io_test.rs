//! Tests for reading and writing workflow files.

use std::fs;

use crate::error::WorkflowError;
use crate::registry::{FILE_INPUT, FILE_OUTPUT, ToolRegistry, create_tool};
use crate::types::{Tool, Workflow};
use crate::workflow_io::{
  WriteOptions, default_file_name, read_workflow, read_workflow_with, write_workflow,
};

fn two_tools() -> Workflow {
  let mut wf = Workflow::new("Two Tools", "2019.1");
  wf.add_tool(create_tool(FILE_INPUT, "1"))
    .add_tool(create_tool(FILE_OUTPUT, "2"));
  wf.add_connection("1", "Output", "2", "Input").unwrap();
  wf
}

#[test]
fn write_options_default() {
  let options = WriteOptions::default();
  assert!(!options.overwrite);
  assert_eq!(options.indent, 2);
  assert!(WriteOptions::overwrite(true).overwrite);
}

#[test]
fn default_file_name_replaces_invalid_characters() {
  assert_eq!(
    default_file_name(&Workflow::new("My Flow: v2/final?", "2019.1")),
    "My Flow_ v2_final_.yxmd"
  );
  assert_eq!(
    default_file_name(&Workflow::new("sales-2024.q1", "2019.1")),
    "sales-2024.q1.yxmd"
  );
  assert_eq!(default_file_name(&Workflow::new("  ", "2019.1")), "Workflow.yxmd");
}

#[test]
fn write_then_read() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("two.yxmd");
  let wf = two_tools();
  let written = write_workflow(&wf, Some(path.as_path()), WriteOptions::default()).unwrap();
  assert_eq!(written, path);

  let back = read_workflow(&path).unwrap();
  assert_eq!(back.to_tree(), wf.to_tree());
  assert_eq!(back.connections().len(), 1);
  assert!(back.validate().is_ok());
}

#[test]
fn overwrite_guard_leaves_file_untouched() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("existing.yxmd");
  fs::write(&path, b"original bytes").unwrap();

  match two_tools().write(Some(path.as_path()), false) {
    Err(WorkflowError::AlreadyExists(p)) => assert_eq!(p, path),
    other => panic!("expected AlreadyExists, got {:?}", other),
  }
  assert_eq!(fs::read(&path).unwrap(), b"original bytes");

  two_tools().write(Some(path.as_path()), true).unwrap();
  assert_eq!(Workflow::read(&path).unwrap().tool_count(), 2);
}

#[test]
fn overwrite_truncates_longer_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("long.yxmd");
  fs::write(&path, "x".repeat(100_000)).unwrap();
  Workflow::new("Short", "2019.1")
    .write(Some(path.as_path()), true)
    .unwrap();
  assert_eq!(Workflow::read(&path).unwrap().name, "Short");
}

#[test]
fn indent_zero_writes_single_line_body() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("flat.yxmd");
  let options = WriteOptions {
    indent: 0,
    ..WriteOptions::default()
  };
  write_workflow(&two_tools(), Some(path.as_path()), options).unwrap();
  let text = fs::read_to_string(&path).unwrap();
  assert_eq!(text.lines().count(), 1);
}

#[test]
fn read_missing_file_is_io_error() {
  let dir = tempfile::tempdir().unwrap();
  assert!(matches!(
    read_workflow(&dir.path().join("absent.yxmd")),
    Err(WorkflowError::Io(_))
  ));
}

#[test]
fn read_with_custom_registry() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("custom.yxmd");
  two_tools().write(Some(path.as_path()), false).unwrap();

  let mut registry = ToolRegistry::empty();
  registry.register(FILE_INPUT, |id| Tool::new(id, "renamed"));
  let wf = read_workflow_with(&path, &registry).unwrap();
  assert_eq!(wf.tool("1").unwrap().kind_tag, "renamed");
  assert!(wf.tool("2").unwrap().accepts_output());
}

#[test]
fn invalid_utf8_is_malformed() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("binary.yxmd");
  fs::write(&path, b"<X>\xff</X>").unwrap();
  assert!(matches!(
    read_workflow(&path),
    Err(WorkflowError::MalformedDocument(_))
  ));
  assert!(matches!(
    read_workflow_with(&path, &ToolRegistry::empty()),
    Err(WorkflowError::MalformedDocument(_))
  ));
}
