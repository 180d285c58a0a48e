//! Ordered, attributed tree used for every free-form configuration payload.

use indexmap::IndexMap;

use crate::error::{Result, WorkflowError};

/// A named element with text, ordered attributes and ordered children.
///
/// The builder methods (`set_attribute`, `set_text`, `add_child`, `add_children`) consume
/// the tree and return the updated value. The `&mut self` editors further down are for
/// code that already owns the tree, such as the kind accessors in [`crate::kinds`].
#[derive(Debug, Clone, Default)]
pub struct PropertyTree {
  name: String,
  text: String,
  attributes: IndexMap<String, String>,
  children: Vec<PropertyTree>,
}

impl PartialEq for PropertyTree {
  /// Tree equality: attribute order and child order both matter.
  fn eq(&self, other: &Self) -> bool {
    self.name == other.name
      && self.text == other.text
      && self.attributes.iter().eq(other.attributes.iter())
      && self.children == other.children
  }
}

impl Eq for PropertyTree {}

impl PropertyTree {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Self::default()
    }
  }

  /// Element carrying only text, e.g. `<LayoutType>Horizontal</LayoutType>`.
  pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
    Self::new(name).set_text(text)
  }

  pub fn set_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.insert_attribute(key, value);
    self
  }

  pub fn set_text(mut self, text: impl Into<String>) -> Self {
    self.text = text.into();
    self
  }

  pub fn add_child(mut self, child: PropertyTree) -> Self {
    self.children.push(child);
    self
  }

  pub fn add_children(mut self, children: impl IntoIterator<Item = PropertyTree>) -> Self {
    self.children.extend(children);
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn attributes(&self) -> &IndexMap<String, String> {
    &self.attributes
  }

  pub fn children(&self) -> &[PropertyTree] {
    &self.children
  }

  pub fn is_empty(&self) -> bool {
    self.text.is_empty() && self.attributes.is_empty() && self.children.is_empty()
  }

  pub fn attribute(&self, key: &str) -> Option<&str> {
    self.attributes.get(key).map(String::as_str)
  }

  /// Looks up an attribute, failing with [`WorkflowError::AttributeNotFound`].
  pub fn get_attribute(&self, key: &str) -> Result<&str> {
    self
      .attribute(key)
      .ok_or_else(|| WorkflowError::AttributeNotFound {
        element: self.name.clone(),
        key: key.to_string(),
      })
  }

  /// First child with the given element name.
  pub fn child(&self, name: &str) -> Option<&PropertyTree> {
    self.children.iter().find(|c| c.name == name)
  }

  pub fn child_mut(&mut self, name: &str) -> Option<&mut PropertyTree> {
    self.children.iter_mut().find(|c| c.name == name)
  }

  pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a PropertyTree> {
    self.children.iter().filter(move |c| c.name == name)
  }

  /// Follows a path of child names, taking the first match at each level.
  pub fn at(&self, path: &[&str]) -> Option<&PropertyTree> {
    path
      .iter()
      .try_fold(self, |node, segment| node.child(segment))
  }

  pub fn at_mut(&mut self, path: &[&str]) -> Option<&mut PropertyTree> {
    let mut node = self;
    for segment in path {
      node = node.child_mut(segment)?;
    }
    Some(node)
  }

  /// Like [`PropertyTree::at_mut`] but appends empty elements for missing segments.
  pub fn ensure_path(&mut self, path: &[&str]) -> &mut PropertyTree {
    let mut node = self;
    for segment in path {
      let idx = match node.children.iter().position(|c| c.name == *segment) {
        Some(idx) => idx,
        None => {
          node.children.push(PropertyTree::new(*segment));
          node.children.len() - 1
        }
      };
      node = &mut node.children[idx];
    }
    node
  }

  /// Sets an attribute in place. An existing key keeps its position.
  pub fn insert_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
    self.attributes.insert(key.into(), value.into());
  }

  pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
    self.attributes.shift_remove(key)
  }

  pub fn replace_text(&mut self, text: impl Into<String>) {
    self.text = text.into();
  }

  pub fn push_child(&mut self, child: PropertyTree) {
    self.children.push(child);
  }

  pub fn retain_children(&mut self, keep: impl FnMut(&PropertyTree) -> bool) {
    self.children.retain(keep);
  }

  pub fn children_mut(&mut self) -> &mut Vec<PropertyTree> {
    &mut self.children
  }
}
