//! Reads and writes a [`PropertyTree`] as XML text.
//!
//! Whitespace-only text between child elements is formatting and is dropped. The text of
//! a leaf element is kept verbatim, so a tab delimiter or a single space survives.

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesDecl, BytesEnd, BytesRef, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use tracing::instrument;

use crate::error::{Result, WorkflowError};
use crate::types::PropertyTree;

/// Indentation width used when none is configured.
pub const DEFAULT_INDENT: usize = 2;

pub(crate) fn malformed(msg: impl Into<String>) -> WorkflowError {
  WorkflowError::MalformedDocument(msg.into())
}

/// An element whose closing tag has not been read yet.
struct OpenElement {
  tree: PropertyTree,
  text: String,
}

impl OpenElement {
  fn start(e: &BytesStart<'_>) -> Result<Self> {
    let qname = e.name();
    let name = utf8(qname.as_ref())?;
    let mut tree = PropertyTree::new(name);
    for attr in e.attributes() {
      let attr = attr.map_err(|err| malformed(format!("bad attribute on <{}>: {}", name, err)))?;
      let key = utf8(attr.key.as_ref())?;
      if tree.attribute(key).is_some() {
        return Err(malformed(format!("duplicate attribute '{}' on <{}>", key, name)));
      }
      let value = unescape(utf8(&attr.value)?)?;
      tree.insert_attribute(key, value);
    }
    Ok(Self {
      tree,
      text: String::new(),
    })
  }

  fn finish(self) -> PropertyTree {
    let Self { tree, text } = self;
    if tree.children().is_empty() {
      tree.set_text(text)
    } else {
      tree.set_text(text.trim())
    }
  }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
  std::str::from_utf8(bytes).map_err(|e| malformed(format!("invalid UTF-8: {}", e)))
}

fn unescape(raw: &str) -> Result<String> {
  quick_xml::escape::unescape(raw)
    .map(|s| s.into_owned())
    .map_err(|e| malformed(format!("bad escape in '{}': {}", raw, e)))
}

/// Resolves a `&name;` reference that the reader reports on its own: a character
/// reference or one of the five predefined entities.
pub(crate) fn resolve_reference(reference: &BytesRef<'_>) -> Result<String> {
  let name = utf8(reference)?;
  let resolved = reference
    .resolve_char_ref()
    .map_err(|e| malformed(format!("bad character reference '&{};': {}", name, e)))?;
  if let Some(ch) = resolved {
    return Ok(ch.to_string());
  }
  resolve_predefined_entity(name)
    .map(str::to_string)
    .ok_or_else(|| malformed(format!("unknown entity '&{};'", name)))
}

/// Hands a finished element to its parent, or makes it the document root.
fn attach(
  open: &mut [OpenElement],
  root: &mut Option<PropertyTree>,
  element: PropertyTree,
) -> Result<()> {
  match open.last_mut() {
    Some(parent) => {
      parent.tree.push_child(element);
      Ok(())
    }
    None if root.is_none() => {
      *root = Some(element);
      Ok(())
    }
    None => Err(malformed(format!(
      "second root element <{}>",
      element.name()
    ))),
  }
}

fn push_text(open: &mut [OpenElement], text: &str) -> Result<()> {
  match open.last_mut() {
    Some(parent) => {
      parent.text.push_str(text);
      Ok(())
    }
    None if text.trim().is_empty() => Ok(()),
    None => Err(malformed("text outside the root element")),
  }
}

/// Parses a complete XML document into its root element.
#[instrument(level = "trace", skip(source))]
pub fn parse_tree(source: &str) -> Result<PropertyTree> {
  let mut reader = Reader::from_str(source);
  let mut open: Vec<OpenElement> = Vec::new();
  let mut root: Option<PropertyTree> = None;

  loop {
    let event = reader
      .read_event()
      .map_err(|e| malformed(format!("at byte {}: {}", reader.buffer_position(), e)))?;
    match event {
      Event::Start(e) => open.push(OpenElement::start(&e)?),
      Event::Empty(e) => {
        let element = OpenElement::start(&e)?.finish();
        attach(&mut open, &mut root, element)?;
      }
      Event::End(_) => {
        let element = open
          .pop()
          .ok_or_else(|| malformed("closing tag without opening tag"))?;
        attach(&mut open, &mut root, element.finish())?;
      }
      Event::Text(e) => push_text(&mut open, &unescape(utf8(&e)?)?)?,
      Event::CData(e) => push_text(&mut open, utf8(&e)?)?,
      Event::GeneralRef(e) => push_text(&mut open, &resolve_reference(&e)?)?,
      Event::Eof => break,
      _ => {}
    }
  }

  if let Some(unclosed) = open.last() {
    return Err(malformed(format!("unclosed element <{}>", unclosed.tree.name())));
  }
  root.ok_or_else(|| malformed("document has no root element"))
}

/// Renders `tree` as a standalone XML document with an XML declaration.
///
/// `indent` is the number of spaces per level; 0 writes everything on one line.
#[instrument(level = "trace", skip(tree))]
pub fn render_tree(tree: &PropertyTree, indent: usize) -> Result<String> {
  let mut writer = if indent > 0 {
    Writer::new_with_indent(Vec::new(), b' ', indent)
  } else {
    Writer::new(Vec::new())
  };
  writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
  write_element(&mut writer, tree)?;
  String::from_utf8(writer.into_inner()).map_err(|e| malformed(e.to_string()))
}

fn write_element(writer: &mut Writer<Vec<u8>>, tree: &PropertyTree) -> Result<()> {
  let mut start = BytesStart::new(tree.name());
  for (k, v) in tree.attributes() {
    start.push_attribute((k.as_str(), v.as_str()));
  }
  if tree.text().is_empty() && tree.children().is_empty() {
    writer.write_event(Event::Empty(start))?;
    return Ok(());
  }
  writer.write_event(Event::Start(start))?;
  if !tree.text().is_empty() {
    writer.write_event(Event::Text(BytesText::new(tree.text())))?;
  }
  for child in tree.children() {
    write_element(writer, child)?;
  }
  writer.write_event(Event::End(BytesEnd::new(tree.name())))?;
  Ok(())
}
