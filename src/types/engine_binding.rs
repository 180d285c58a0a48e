//! Runtime binding of a tool (`EngineSettings`).

use indexmap::IndexMap;

/// Attribute name of the engine library reference.
pub const ENGINE_DLL: &str = "EngineDll";
/// Attribute name of the engine entry point.
pub const ENGINE_ENTRY_POINT: &str = "EngineDllEntryPoint";

/// Opaque pass-through metadata naming the library and entry point that run a tool.
///
/// Stored as the ordered attributes of the `EngineSettings` element so that other
/// bindings (macros reference a `Macro` file instead) survive a round trip.
#[derive(Debug, Clone, Default)]
pub struct EngineBinding {
  attributes: IndexMap<String, String>,
}

impl PartialEq for EngineBinding {
  fn eq(&self, other: &Self) -> bool {
    self.attributes.iter().eq(other.attributes.iter())
  }
}

impl Eq for EngineBinding {}

impl EngineBinding {
  pub fn new(library: impl Into<String>, entry_point: impl Into<String>) -> Self {
    let mut attributes = IndexMap::new();
    attributes.insert(ENGINE_DLL.to_string(), library.into());
    attributes.insert(ENGINE_ENTRY_POINT.to_string(), entry_point.into());
    Self { attributes }
  }

  pub fn from_attributes(attributes: IndexMap<String, String>) -> Self {
    Self { attributes }
  }

  pub fn library(&self) -> Option<&str> {
    self.attributes.get(ENGINE_DLL).map(String::as_str)
  }

  pub fn entry_point(&self) -> Option<&str> {
    self.attributes.get(ENGINE_ENTRY_POINT).map(String::as_str)
  }

  pub fn attributes(&self) -> &IndexMap<String, String> {
    &self.attributes
  }
}
