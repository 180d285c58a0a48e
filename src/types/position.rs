//! Canvas position of a tool.

/// Canvas position. Tool containers also carry a size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
  pub x: i32,
  pub y: i32,
  pub width: Option<i32>,
  pub height: Option<i32>,
}

impl Position {
  pub fn new(x: i32, y: i32) -> Self {
    Self {
      x,
      y,
      width: None,
      height: None,
    }
  }

  pub fn with_size(self, width: i32, height: i32) -> Self {
    Self {
      width: Some(width),
      height: Some(height),
      ..self
    }
  }
}

impl From<(i32, i32)> for Position {
  fn from((x, y): (i32, i32)) -> Self {
    Self::new(x, y)
  }
}
