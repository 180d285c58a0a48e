//! File output tool (`DbFileOutput`).
//!
//! Individual accessors plus [`OutputConfiguration`], which reads or writes the whole
//! delimited-text configuration at once.

use crate::error::Result;
use crate::registry::FILE_OUTPUT;
use crate::types::Tool;

use super::{
  CONFIGURATION, attr_at, bool_text, ensure_kind, limit_text, parse_bool, parse_limit,
  parse_number, set_attr_at, set_text_at, text_at,
};

const FILE: &[&str] = &[CONFIGURATION, "File"];
const LINE_END_STYLE: &[&str] = &[CONFIGURATION, "FormatSpecificOptions", "LineEndStyle"];
const DELIMITER: &[&str] = &[CONFIGURATION, "FormatSpecificOptions", "Delimeter"];
const FORCE_QUOTES: &[&str] = &[CONFIGURATION, "FormatSpecificOptions", "ForceQuotes"];
const HEADER_ROW: &[&str] = &[CONFIGURATION, "FormatSpecificOptions", "HeaderRow"];
const CODE_PAGE: &[&str] = &[CONFIGURATION, "FormatSpecificOptions", "CodePage"];
const WRITE_BOM: &[&str] = &[CONFIGURATION, "FormatSpecificOptions", "WriteBOM"];
const MULTI_FILE: &[&str] = &[CONFIGURATION, "MultiFile"];
const MAX_RECORDS: &str = "MaxRecords";
const FILE_FORMAT: &str = "FileFormat";

/// Complete configuration of a delimited-text output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfiguration {
  pub file_name: String,
  /// `None` writes every record.
  pub max_records: Option<u64>,
  pub file_format: i32,
  pub line_end_style: String,
  pub delimiter: String,
  pub force_quotes: bool,
  pub header_row: bool,
  pub code_page: u32,
  pub write_bom: bool,
  pub multi_file: bool,
}

impl Default for OutputConfiguration {
  fn default() -> Self {
    Self {
      file_name: String::new(),
      max_records: None,
      file_format: 0,
      line_end_style: "CRLF".to_string(),
      delimiter: ",".to_string(),
      force_quotes: false,
      header_row: true,
      code_page: 28591,
      write_bom: true,
      multi_file: false,
    }
  }
}

/// Reads every field of the output configuration.
pub fn configuration(tool: &Tool) -> Result<OutputConfiguration> {
  Ok(OutputConfiguration {
    file_name: file_name(tool)?.to_string(),
    max_records: max_records(tool)?,
    file_format: file_format(tool)?,
    line_end_style: line_end_style(tool)?.to_string(),
    delimiter: delimiter(tool)?.to_string(),
    force_quotes: force_quotes(tool)?,
    header_row: header_row(tool)?,
    code_page: code_page(tool)?,
    write_bom: write_bom(tool)?,
    multi_file: multi_file(tool)?,
  })
}

/// Writes every field of `config`, creating missing elements.
pub fn configure(tool: &mut Tool, config: &OutputConfiguration) -> Result<()> {
  set_file_name(tool, &config.file_name)?;
  set_max_records(tool, config.max_records)?;
  set_file_format(tool, config.file_format)?;
  set_line_end_style(tool, &config.line_end_style)?;
  set_delimiter(tool, &config.delimiter)?;
  set_force_quotes(tool, config.force_quotes)?;
  set_header_row(tool, config.header_row)?;
  set_code_page(tool, config.code_page)?;
  set_write_bom(tool, config.write_bom)?;
  set_multi_file(tool, config.multi_file)
}

pub fn file_name(tool: &Tool) -> Result<&str> {
  ensure_kind(tool, FILE_OUTPUT)?;
  text_at(tool, FILE)
}

pub fn set_file_name(tool: &mut Tool, path: &str) -> Result<()> {
  ensure_kind(tool, FILE_OUTPUT)?;
  set_text_at(tool, FILE, path);
  Ok(())
}

/// `File@MaxRecords`; an empty value means no limit.
pub fn max_records(tool: &Tool) -> Result<Option<u64>> {
  ensure_kind(tool, FILE_OUTPUT)?;
  parse_limit(attr_at(tool, FILE, MAX_RECORDS)?, MAX_RECORDS)
}

pub fn set_max_records(tool: &mut Tool, limit: Option<u64>) -> Result<()> {
  ensure_kind(tool, FILE_OUTPUT)?;
  set_attr_at(tool, FILE, MAX_RECORDS, limit_text(limit));
  Ok(())
}

pub fn file_format(tool: &Tool) -> Result<i32> {
  ensure_kind(tool, FILE_OUTPUT)?;
  parse_number(attr_at(tool, FILE, FILE_FORMAT)?, FILE_FORMAT)
}

pub fn set_file_format(tool: &mut Tool, format: i32) -> Result<()> {
  ensure_kind(tool, FILE_OUTPUT)?;
  set_attr_at(tool, FILE, FILE_FORMAT, format.to_string());
  Ok(())
}

/// `CRLF`, `LF` or `CR`.
pub fn line_end_style(tool: &Tool) -> Result<&str> {
  ensure_kind(tool, FILE_OUTPUT)?;
  text_at(tool, LINE_END_STYLE)
}

pub fn set_line_end_style(tool: &mut Tool, style: &str) -> Result<()> {
  ensure_kind(tool, FILE_OUTPUT)?;
  set_text_at(tool, LINE_END_STYLE, style);
  Ok(())
}

pub fn delimiter(tool: &Tool) -> Result<&str> {
  ensure_kind(tool, FILE_OUTPUT)?;
  text_at(tool, DELIMITER)
}

pub fn set_delimiter(tool: &mut Tool, delimiter: &str) -> Result<()> {
  ensure_kind(tool, FILE_OUTPUT)?;
  set_text_at(tool, DELIMITER, delimiter);
  Ok(())
}

pub fn force_quotes(tool: &Tool) -> Result<bool> {
  ensure_kind(tool, FILE_OUTPUT)?;
  parse_bool(text_at(tool, FORCE_QUOTES)?)
}

pub fn set_force_quotes(tool: &mut Tool, value: bool) -> Result<()> {
  ensure_kind(tool, FILE_OUTPUT)?;
  set_text_at(tool, FORCE_QUOTES, bool_text(value));
  Ok(())
}

pub fn header_row(tool: &Tool) -> Result<bool> {
  ensure_kind(tool, FILE_OUTPUT)?;
  parse_bool(text_at(tool, HEADER_ROW)?)
}

pub fn set_header_row(tool: &mut Tool, value: bool) -> Result<()> {
  ensure_kind(tool, FILE_OUTPUT)?;
  set_text_at(tool, HEADER_ROW, bool_text(value));
  Ok(())
}

pub fn code_page(tool: &Tool) -> Result<u32> {
  ensure_kind(tool, FILE_OUTPUT)?;
  parse_number(text_at(tool, CODE_PAGE)?, "CodePage")
}

pub fn set_code_page(tool: &mut Tool, code_page: u32) -> Result<()> {
  ensure_kind(tool, FILE_OUTPUT)?;
  set_text_at(tool, CODE_PAGE, code_page.to_string());
  Ok(())
}

pub fn write_bom(tool: &Tool) -> Result<bool> {
  ensure_kind(tool, FILE_OUTPUT)?;
  parse_bool(text_at(tool, WRITE_BOM)?)
}

pub fn set_write_bom(tool: &mut Tool, value: bool) -> Result<()> {
  ensure_kind(tool, FILE_OUTPUT)?;
  set_text_at(tool, WRITE_BOM, bool_text(value));
  Ok(())
}

/// `MultiFile@value`: split output across files by a field.
pub fn multi_file(tool: &Tool) -> Result<bool> {
  ensure_kind(tool, FILE_OUTPUT)?;
  parse_bool(attr_at(tool, MULTI_FILE, "value")?)
}

pub fn set_multi_file(tool: &mut Tool, value: bool) -> Result<()> {
  ensure_kind(tool, FILE_OUTPUT)?;
  set_attr_at(tool, MULTI_FILE, "value", bool_text(value));
  Ok(())
}
