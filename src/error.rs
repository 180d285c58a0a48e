//! Errors raised while building, reading or writing a workflow document.

use std::path::PathBuf;

use thiserror::Error;

/// Which side of a tool a port operation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
  Input,
  Output,
}

impl std::fmt::Display for PortDirection {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      PortDirection::Input => f.write_str("input"),
      PortDirection::Output => f.write_str("output"),
    }
  }
}

/// Errors that can occur while editing or (de)serializing a workflow.
#[derive(Error, Debug)]
pub enum WorkflowError {
  #[error("Tool '{tool_id}' does not accept {direction} connections")]
  Capability {
    tool_id: String,
    direction: PortDirection,
  },

  #[error("Tool '{0}' is not part of the workflow")]
  UnknownNode(String),

  #[error(
    "No connection from '{origin_id}'.{origin_port} to '{destination_id}'.{destination_port}"
  )]
  UnknownConnection {
    origin_id: String,
    origin_port: String,
    destination_id: String,
    destination_port: String,
  },

  #[error("Attribute '{key}' does not exist on element '{element}'")]
  AttributeNotFound { element: String, key: String },

  #[error("File '{}' already exists and overwrite is false", .0.display())]
  AlreadyExists(PathBuf),

  #[error("Malformed workflow document: {0}")]
  MalformedDocument(String),

  #[error("Workflow is inconsistent: {0}")]
  Inconsistent(String),

  #[error("Tool configuration does not contain {0}")]
  MissingConfig(String),

  #[error("Invalid tool configuration: {0}")]
  InvalidConfig(String),

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error(transparent)]
  Xml(#[from] quick_xml::Error),
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
