//! Tool factory: maps a plugin identifier to a typed tool constructor.
//!
//! Unknown identifiers never fail. They produce a generic [`Tool`] that keeps the
//! identifier, so documents with kinds this crate knows nothing about still round-trip.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::types::{EngineBinding, Tool};

pub const FILE_INPUT: &str = "AlteryxBasePluginsGui.DbFileInput.DbFileInput";
pub const FILE_OUTPUT: &str = "AlteryxBasePluginsGui.DbFileOutput.DbFileOutput";
pub const SELECT: &str = "AlteryxBasePluginsGui.AlteryxSelect.AlteryxSelect";
pub const AUTOFIELD: &str = "AlteryxBasePluginsGui.AutoField.AutoField";
pub const FILTER: &str = "AlteryxBasePluginsGui.Filter.Filter";
pub const SORT: &str = "AlteryxBasePluginsGui.Sort.Sort";

/// Engine library shared by the built-in kinds.
pub const BASE_ENGINE_DLL: &str = "AlteryxBasePluginsEngine.dll";

/// Static description of a built-in tool kind.
#[derive(Debug, Clone, Copy)]
pub struct ToolKind {
  pub plugin: &'static str,
  pub entry_point: &'static str,
  pub accepts_input: bool,
  pub accepts_output: bool,
  pub input_ports: &'static [&'static str],
  pub output_ports: &'static [&'static str],
}

impl ToolKind {
  /// A fresh tool of this kind with an empty config payload.
  pub fn create(&self, id: &str) -> Tool {
    Tool::new(id, self.plugin)
      .with_capabilities(self.accepts_input, self.accepts_output)
      .with_ports(self.input_ports, self.output_ports)
      .with_binding(EngineBinding::new(BASE_ENGINE_DLL, self.entry_point))
  }
}

pub const BUILTIN_KINDS: &[ToolKind] = &[
  ToolKind {
    plugin: FILE_INPUT,
    entry_point: "AlteryxDbFileInput",
    accepts_input: false,
    accepts_output: true,
    input_ports: &[],
    output_ports: &["Output"],
  },
  ToolKind {
    plugin: FILE_OUTPUT,
    entry_point: "AlteryxDbFileOutput",
    accepts_input: true,
    accepts_output: false,
    input_ports: &["Input"],
    output_ports: &[],
  },
  ToolKind {
    plugin: SELECT,
    entry_point: "AlteryxSelect",
    accepts_input: true,
    accepts_output: true,
    input_ports: &["Input"],
    output_ports: &["Output"],
  },
  ToolKind {
    plugin: AUTOFIELD,
    entry_point: "AlteryxAutoField",
    accepts_input: true,
    accepts_output: true,
    input_ports: &["Input"],
    output_ports: &["Output"],
  },
  ToolKind {
    plugin: FILTER,
    entry_point: "AlteryxFilter",
    accepts_input: true,
    accepts_output: true,
    input_ports: &["Input"],
    output_ports: &["True", "False"],
  },
  ToolKind {
    plugin: SORT,
    entry_point: "AlteryxSort",
    accepts_input: true,
    accepts_output: true,
    input_ports: &["Input"],
    output_ports: &["Output"],
  },
];

type Constructor = Box<dyn Fn(&str) -> Tool + Send + Sync>;

/// Open registry of tool constructors keyed by plugin identifier.
pub struct ToolRegistry {
  constructors: HashMap<String, Constructor>,
}

impl std::fmt::Debug for ToolRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut kinds: Vec<&String> = self.constructors.keys().collect();
    kinds.sort();
    f.debug_struct("ToolRegistry").field("kinds", &kinds).finish()
  }
}

impl Default for ToolRegistry {
  fn default() -> Self {
    Self::builtin()
  }
}

impl ToolRegistry {
  /// Registry with no kinds; every tag falls back to a generic tool.
  pub fn empty() -> Self {
    Self {
      constructors: HashMap::new(),
    }
  }

  /// Registry preloaded with [`BUILTIN_KINDS`].
  pub fn builtin() -> Self {
    let mut registry = Self::empty();
    for kind in BUILTIN_KINDS {
      let kind = *kind;
      registry.register(kind.plugin, move |id| kind.create(id));
    }
    registry
  }

  /// Registers (or replaces) the constructor for `kind_tag`.
  pub fn register(
    &mut self,
    kind_tag: impl Into<String>,
    constructor: impl Fn(&str) -> Tool + Send + Sync + 'static,
  ) -> &mut Self {
    self
      .constructors
      .insert(kind_tag.into(), Box::new(constructor));
    self
  }

  pub fn is_registered(&self, kind_tag: &str) -> bool {
    self.constructors.contains_key(kind_tag)
  }

  /// Creates a tool for `kind_tag`, falling back to a generic tool.
  pub fn create(&self, kind_tag: &str, id: &str) -> Tool {
    match self.constructors.get(kind_tag) {
      Some(constructor) => constructor(id),
      None => {
        debug!(kind_tag, tool_id = id, "unregistered tool kind, using generic tool");
        Tool::new(id, kind_tag)
      }
    }
  }
}

static BUILTIN: Lazy<ToolRegistry> = Lazy::new(ToolRegistry::builtin);

/// The process-wide registry of built-in kinds.
pub fn builtin_registry() -> &'static ToolRegistry {
  &BUILTIN
}

/// Creates a tool through the built-in registry.
pub fn create_tool(kind_tag: &str, id: &str) -> Tool {
  BUILTIN.create(kind_tag, id)
}

/// Looks up the static description of a built-in kind.
pub fn builtin_kind(kind_tag: &str) -> Option<&'static ToolKind> {
  BUILTIN_KINDS.iter().find(|k| k.plugin == kind_tag)
}
