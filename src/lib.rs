//! # yxmd-builder
//!
//! Build, read, edit and write Alteryx-style `.yxmd` workflow documents.
//!
//! ## Architecture
//!
//! - [`types`]: the in-memory document. [`PropertyTree`] holds any free-form payload,
//!   [`Tool`] is a positioned vertex with capability flags and port references,
//!   [`Connection`] is an edge, and [`Workflow`] owns them and keeps edges and port
//!   references in step.
//! - [`registry`]: plugin identifier to tool constructor; unknown kinds become generic tools.
//! - [`xml_tree`] / [`workflow_codec`]: XML text to tree to workflow, and back.
//! - [`workflow_io`]: files on disk, with an overwrite guard.
//! - [`kinds`]: typed accessors over the config of the built-in kinds.
//!
//! Removing a tool or connection does not cascade: [`Workflow::remove_tool`] and
//! [`Workflow::remove_connection`] only touch their own list. [`Workflow::detach_tool`] and
//! [`Workflow::disconnect`] do the full two-sided removal, and [`Workflow::validate`]
//! reports anything left dangling.

pub mod error;
pub mod kinds;
pub mod registry;
#[cfg(test)]
mod registry_test;
pub mod types;
pub mod workflow_codec;
#[cfg(test)]
mod workflow_codec_test;
pub mod workflow_io;
#[cfg(test)]
mod workflow_io_test;
pub mod xml_tree;

pub use error::{PortDirection, Result, WorkflowError};
pub use registry::{ToolRegistry, create_tool};
pub use types::{Connection, EngineBinding, PortRef, Position, PropertyTree, Tool, Workflow};
pub use workflow_io::{WriteOptions, read_workflow, write_workflow};
