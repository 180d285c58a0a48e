//! Tests for `Connection`.

use super::{Connection, PropertyTree};

#[test]
fn matches_on_endpoints_only() {
  let c = Connection::new("1", "Output", "2", "Input").with_attribute("name", "#1");
  assert!(c.matches("1", "Output", "2", "Input"));
  assert!(!c.matches("1", "True", "2", "Input"));
  assert!(c.touches("1"));
  assert!(c.touches("2"));
  assert!(!c.touches("3"));
}

#[test]
fn render_two_sided_block() {
  let c = Connection::new("4", "True", "6", "Input");
  let tree = c.render();
  assert_eq!(tree.name(), "Connection");
  let names: Vec<&str> = tree.children().iter().map(PropertyTree::name).collect();
  assert_eq!(names, vec!["Origin", "Destination"]);
  let origin = tree.child("Origin").unwrap();
  assert_eq!(origin.attribute("ToolID"), Some("4"));
  assert_eq!(origin.attribute("Connection"), Some("True"));
  let destination = tree.child("Destination").unwrap();
  assert_eq!(destination.attribute("ToolID"), Some("6"));
  assert_eq!(destination.attribute("Connection"), Some("Input"));
}

#[test]
fn render_keeps_element_attributes() {
  let c = Connection::new("1", "Output", "2", "Input").with_attribute("Wireless", "True");
  assert_eq!(c.render().attribute("Wireless"), Some("True"));
}
