//! One end of a realized connection, as recorded on a tool.

/// Back-reference from a tool to the peer at the other end of a connection.
///
/// Carries no ownership; the workflow's connection list is the source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRef {
  pub peer_tool_id: String,
  pub peer_port: String,
  pub local_port: String,
}

impl PortRef {
  pub fn new(
    peer_tool_id: impl Into<String>,
    peer_port: impl Into<String>,
    local_port: impl Into<String>,
  ) -> Self {
    Self {
      peer_tool_id: peer_tool_id.into(),
      peer_port: peer_port.into(),
      local_port: local_port.into(),
    }
  }

  pub(crate) fn matches(&self, peer_tool_id: &str, peer_port: &str, local_port: &str) -> bool {
    self.peer_tool_id == peer_tool_id && self.peer_port == peer_port && self.local_port == local_port
  }
}
