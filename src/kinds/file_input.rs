//! File input tool (`DbFileInput`).
//!
//! The file path is the text of `Configuration/File`; search and format switches are
//! attributes of that element. Parsing options live under `FormatSpecificOptions`.

use crate::error::Result;
use crate::registry::FILE_INPUT;
use crate::types::Tool;

use super::{
  CONFIGURATION, attr_at, bool_text, ensure_kind, limit_text, parse_bool, parse_limit,
  parse_number, set_attr_at, set_text_at, text_at,
};

const FILE: &[&str] = &[CONFIGURATION, "File"];
const DELIMITER: &[&str] = &[CONFIGURATION, "FormatSpecificOptions", "Delimeter"];
const HEADER_ROW: &[&str] = &[CONFIGURATION, "FormatSpecificOptions", "HeaderRow"];
const CODE_PAGE: &[&str] = &[CONFIGURATION, "FormatSpecificOptions", "CodePage"];
const IGNORE_ERRORS: &[&str] = &[CONFIGURATION, "FormatSpecificOptions", "IgnoreErrors"];
const FIELD_LEN: &[&str] = &[CONFIGURATION, "FormatSpecificOptions", "FieldLen"];
const ALLOW_SHARE_WRITE: &[&str] = &[CONFIGURATION, "FormatSpecificOptions", "AllowShareWrite"];
const IGNORE_QUOTES: &[&str] = &[CONFIGURATION, "FormatSpecificOptions", "IgnoreQuotes"];
const IMPORT_LINE: &[&str] = &[CONFIGURATION, "FormatSpecificOptions", "ImportLine"];
const RECORD_LIMIT: &str = "RecordLimit";
const SEARCH_SUB_DIRS: &str = "SearchSubDirs";
const FILE_FORMAT: &str = "FileFormat";

pub fn file_name(tool: &Tool) -> Result<&str> {
  ensure_kind(tool, FILE_INPUT)?;
  text_at(tool, FILE)
}

pub fn set_file_name(tool: &mut Tool, path: &str) -> Result<()> {
  ensure_kind(tool, FILE_INPUT)?;
  set_text_at(tool, FILE, path);
  Ok(())
}

/// `File@RecordLimit`; an empty value means no limit.
pub fn record_limit(tool: &Tool) -> Result<Option<u64>> {
  ensure_kind(tool, FILE_INPUT)?;
  parse_limit(attr_at(tool, FILE, RECORD_LIMIT)?, RECORD_LIMIT)
}

pub fn set_record_limit(tool: &mut Tool, limit: Option<u64>) -> Result<()> {
  ensure_kind(tool, FILE_INPUT)?;
  set_attr_at(tool, FILE, RECORD_LIMIT, limit_text(limit));
  Ok(())
}

pub fn search_sub_dirs(tool: &Tool) -> Result<bool> {
  ensure_kind(tool, FILE_INPUT)?;
  parse_bool(attr_at(tool, FILE, SEARCH_SUB_DIRS)?)
}

pub fn set_search_sub_dirs(tool: &mut Tool, value: bool) -> Result<()> {
  ensure_kind(tool, FILE_INPUT)?;
  set_attr_at(tool, FILE, SEARCH_SUB_DIRS, bool_text(value));
  Ok(())
}

/// `File@FileFormat`, the numeric format code (0 is delimited text).
pub fn file_format(tool: &Tool) -> Result<i32> {
  ensure_kind(tool, FILE_INPUT)?;
  parse_number(attr_at(tool, FILE, FILE_FORMAT)?, FILE_FORMAT)
}

pub fn set_file_format(tool: &mut Tool, format: i32) -> Result<()> {
  ensure_kind(tool, FILE_INPUT)?;
  set_attr_at(tool, FILE, FILE_FORMAT, format.to_string());
  Ok(())
}

pub fn delimiter(tool: &Tool) -> Result<&str> {
  ensure_kind(tool, FILE_INPUT)?;
  text_at(tool, DELIMITER)
}

pub fn set_delimiter(tool: &mut Tool, delimiter: &str) -> Result<()> {
  ensure_kind(tool, FILE_INPUT)?;
  set_text_at(tool, DELIMITER, delimiter);
  Ok(())
}

pub fn header_row(tool: &Tool) -> Result<bool> {
  ensure_kind(tool, FILE_INPUT)?;
  parse_bool(text_at(tool, HEADER_ROW)?)
}

pub fn set_header_row(tool: &mut Tool, header_row: bool) -> Result<()> {
  ensure_kind(tool, FILE_INPUT)?;
  set_text_at(tool, HEADER_ROW, bool_text(header_row));
  Ok(())
}

pub fn code_page(tool: &Tool) -> Result<u32> {
  ensure_kind(tool, FILE_INPUT)?;
  parse_number(text_at(tool, CODE_PAGE)?, "CodePage")
}

pub fn set_code_page(tool: &mut Tool, code_page: u32) -> Result<()> {
  ensure_kind(tool, FILE_INPUT)?;
  set_text_at(tool, CODE_PAGE, code_page.to_string());
  Ok(())
}

pub fn ignore_errors(tool: &Tool) -> Result<bool> {
  ensure_kind(tool, FILE_INPUT)?;
  parse_bool(text_at(tool, IGNORE_ERRORS)?)
}

pub fn set_ignore_errors(tool: &mut Tool, value: bool) -> Result<()> {
  ensure_kind(tool, FILE_INPUT)?;
  set_text_at(tool, IGNORE_ERRORS, bool_text(value));
  Ok(())
}

/// Maximum field length for delimited text (`FieldLen`).
pub fn field_length(tool: &Tool) -> Result<u32> {
  ensure_kind(tool, FILE_INPUT)?;
  parse_number(text_at(tool, FIELD_LEN)?, "FieldLen")
}

pub fn set_field_length(tool: &mut Tool, length: u32) -> Result<()> {
  ensure_kind(tool, FILE_INPUT)?;
  set_text_at(tool, FIELD_LEN, length.to_string());
  Ok(())
}

pub fn allow_share_write(tool: &Tool) -> Result<bool> {
  ensure_kind(tool, FILE_INPUT)?;
  parse_bool(text_at(tool, ALLOW_SHARE_WRITE)?)
}

pub fn set_allow_share_write(tool: &mut Tool, value: bool) -> Result<()> {
  ensure_kind(tool, FILE_INPUT)?;
  set_text_at(tool, ALLOW_SHARE_WRITE, bool_text(value));
  Ok(())
}

/// Quote handling, e.g. `DoubleQuotes`. Kept as the raw document value.
pub fn ignore_quotes(tool: &Tool) -> Result<&str> {
  ensure_kind(tool, FILE_INPUT)?;
  text_at(tool, IGNORE_QUOTES)
}

pub fn set_ignore_quotes(tool: &mut Tool, value: &str) -> Result<()> {
  ensure_kind(tool, FILE_INPUT)?;
  set_text_at(tool, IGNORE_QUOTES, value);
  Ok(())
}

/// First line to import (1-based).
pub fn import_line(tool: &Tool) -> Result<u32> {
  ensure_kind(tool, FILE_INPUT)?;
  parse_number(text_at(tool, IMPORT_LINE)?, "ImportLine")
}

pub fn set_import_line(tool: &mut Tool, line: u32) -> Result<()> {
  ensure_kind(tool, FILE_INPUT)?;
  set_text_at(tool, IMPORT_LINE, line.to_string());
  Ok(())
}
