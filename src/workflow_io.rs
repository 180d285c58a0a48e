//! Read and write workflow files (`.yxmd`).

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, instrument};

use crate::error::{Result, WorkflowError};
use crate::registry::ToolRegistry;
use crate::types::Workflow;
use crate::xml_tree::{DEFAULT_INDENT, malformed};

/// Extension of workflow documents.
pub const DEFAULT_EXTENSION: &str = "yxmd";

/// Stem used when a workflow has no display name.
pub const FALLBACK_STEM: &str = "Workflow";

static INVALID_FILE_CHARS: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\-. ]").expect("static regex"));

/// How a workflow is written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
  /// Replace an existing file. When false, writing to an existing path fails.
  pub overwrite: bool,
  /// Spaces per nesting level; 0 writes a single line.
  pub indent: usize,
}

impl Default for WriteOptions {
  fn default() -> Self {
    Self {
      overwrite: false,
      indent: DEFAULT_INDENT,
    }
  }
}

impl WriteOptions {
  pub fn overwrite(overwrite: bool) -> Self {
    Self {
      overwrite,
      ..Self::default()
    }
  }
}

/// File name derived from the workflow's display name, e.g. `My_Flow_.yxmd`.
///
/// Characters outside `[A-Za-z0-9_\-. ]` become `_`.
pub fn default_file_name(workflow: &Workflow) -> String {
  let stem = if workflow.name.trim().is_empty() {
    FALLBACK_STEM.to_string()
  } else {
    INVALID_FILE_CHARS
      .replace_all(&workflow.name, "_")
      .into_owned()
  };
  format!("{}.{}", stem, DEFAULT_EXTENSION)
}

/// Reads a file as UTF-8 text. Undecodable bytes make the document malformed.
fn read_source(path: &Path) -> Result<String> {
  let bytes = std::fs::read(path)?;
  String::from_utf8(bytes)
    .map_err(|e| malformed(format!("{} is not valid UTF-8: {}", path.display(), e)))
}

/// Reads a workflow file using the built-in registry.
#[instrument(level = "trace")]
pub fn read_workflow(path: &Path) -> Result<Workflow> {
  let source = read_source(path)?;
  let workflow = Workflow::from_xml_str(&source)?;
  info!(path = %path.display(), name = %workflow.name, "read workflow");
  Ok(workflow)
}

/// Reads a workflow file, dispatching tool kinds through `registry`.
#[instrument(level = "trace", skip(registry))]
pub fn read_workflow_with(path: &Path, registry: &ToolRegistry) -> Result<Workflow> {
  let source = read_source(path)?;
  Workflow::from_xml_str_with(&source, registry)
}

/// Writes `workflow` to `destination` (or its default file name) and returns the path.
///
/// Without `overwrite` the file is created exclusively, so an existing file is never
/// touched. A failure part-way through leaves the destination in an undefined state.
#[instrument(level = "trace", skip(workflow))]
pub fn write_workflow(
  workflow: &Workflow,
  destination: Option<&Path>,
  options: WriteOptions,
) -> Result<PathBuf> {
  let path = destination
    .map(Path::to_path_buf)
    .unwrap_or_else(|| PathBuf::from(default_file_name(workflow)));
  let xml = workflow.to_xml_string_with(options.indent)?;

  let mut open = OpenOptions::new();
  open.write(true);
  if options.overwrite {
    open.create(true).truncate(true);
  } else {
    open.create_new(true);
  }
  let mut file = open.open(&path).map_err(|e| match e.kind() {
    ErrorKind::AlreadyExists => WorkflowError::AlreadyExists(path.clone()),
    _ => WorkflowError::Io(e),
  })?;
  file.write_all(xml.as_bytes())?;
  file.flush()?;

  info!(
    path = %path.display(),
    tools = workflow.tool_count(),
    connections = workflow.connections().len(),
    "wrote workflow"
  );
  Ok(path)
}

impl Workflow {
  /// Reads a workflow file. See [`read_workflow`].
  pub fn read(path: impl AsRef<Path>) -> Result<Self> {
    read_workflow(path.as_ref())
  }

  /// Writes the workflow. See [`write_workflow`].
  pub fn write(&self, destination: Option<&Path>, overwrite: bool) -> Result<PathBuf> {
    write_workflow(self, destination, WriteOptions::overwrite(overwrite))
  }
}
