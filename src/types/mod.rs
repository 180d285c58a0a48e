//! Workflow document types: the property tree, tools, connections and the workflow.

mod connection;
#[cfg(test)]
mod connection_test;
mod document_properties;
mod engine_binding;
mod port_ref;
mod position;
mod property_tree;
mod tool;
mod workflow;
#[cfg(test)]
mod workflow_test;

pub use connection::Connection;
pub use document_properties::default_properties;
pub use engine_binding::{ENGINE_DLL, ENGINE_ENTRY_POINT, EngineBinding};
pub use port_ref::PortRef;
pub use position::Position;
pub use property_tree::PropertyTree;
pub use tool::Tool;
pub use workflow::{ROW_SPACING, Workflow};

pub(crate) mod element {
  //! Element and attribute names of the document envelope.
  pub(crate) use super::connection::{CONNECTION, DESTINATION, ORIGIN};
  pub(crate) use super::document_properties::{META_INFO, NAME, PROPERTIES};
  pub(crate) use super::tool::{ENGINE_SETTINGS, GUI_SETTINGS, NODE, PLUGIN, POSITION, TOOL_ID};
}
