//! Tests for the tool registry.

use crate::registry::{
  AUTOFIELD, BASE_ENGINE_DLL, BUILTIN_KINDS, FILE_INPUT, FILE_OUTPUT, FILTER, SELECT, SORT,
  ToolRegistry, builtin_kind, builtin_registry, create_tool,
};
use crate::types::Tool;

#[test]
fn builtin_kinds_are_registered() {
  let registry = builtin_registry();
  for tag in [FILE_INPUT, FILE_OUTPUT, SELECT, AUTOFIELD, FILTER, SORT] {
    assert!(registry.is_registered(tag), "{} not registered", tag);
  }
  assert_eq!(BUILTIN_KINDS.len(), 6);
}

#[test]
fn builtin_tools_carry_capabilities_and_binding() {
  let input = create_tool(FILE_INPUT, "1");
  assert_eq!(input.id, "1");
  assert_eq!(input.kind_tag, FILE_INPUT);
  assert!(!input.accepts_input());
  assert!(input.accepts_output());
  let binding = input.binding.as_ref().unwrap();
  assert_eq!(binding.library(), Some(BASE_ENGINE_DLL));
  assert_eq!(binding.entry_point(), Some("AlteryxDbFileInput"));

  let output = create_tool(FILE_OUTPUT, "2");
  assert!(output.accepts_input());
  assert!(!output.accepts_output());

  let filter = create_tool(FILTER, "3");
  assert_eq!(filter.output_ports(), &["True".to_string(), "False".to_string()]);
  assert!(filter.declares_output_port("True"));
  assert!(!filter.declares_output_port("Output"));
}

#[test]
fn unknown_kind_falls_back_to_generic_tool() {
  let tool = create_tool("Vendor.Macro.Thing", "5");
  assert_eq!(tool.kind_tag, "Vendor.Macro.Thing");
  assert!(tool.accepts_input());
  assert!(tool.accepts_output());
  assert!(tool.binding.is_none());
  assert_eq!(tool, Tool::new("5", "Vendor.Macro.Thing"));
}

#[test]
fn custom_registration_overrides_builtin() {
  let mut registry = ToolRegistry::builtin();
  registry.register(SORT, |id| Tool::new(id, SORT).with_capabilities(true, false));
  assert!(!registry.create(SORT, "1").accepts_output());
  assert!(builtin_registry().create(SORT, "1").accepts_output());
}

#[test]
fn empty_registry_knows_nothing() {
  let registry = ToolRegistry::empty();
  assert!(!registry.is_registered(FILE_INPUT));
  assert!(registry.create(FILE_INPUT, "1").accepts_input());
}

#[test]
fn builtin_kind_lookup() {
  assert_eq!(builtin_kind(SELECT).map(|k| k.entry_point), Some("AlteryxSelect"));
  assert!(builtin_kind("nope").is_none());
}
