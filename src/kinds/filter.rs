//! Filter tool. Which fields are meaningful depends on the mode: `Custom` uses a free-form
//! expression, `Simple` a field/operator/operand predicate. Date operators (`DateRange`,
//! `PeriodAfter`, `PeriodBefore`) read the date and period operands instead of `Operand`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::{Result, WorkflowError};
use crate::registry::FILTER;
use crate::types::Tool;

use super::{CONFIGURATION, bool_text, ensure_kind, parse_bool, parse_number, set_text_at, text_at};

const MODE: &[&str] = &[CONFIGURATION, "Mode"];
const EXPRESSION: &[&str] = &[CONFIGURATION, "Expression"];
const FIELD: &[&str] = &[CONFIGURATION, "Simple", "Field"];
const OPERATOR: &[&str] = &[CONFIGURATION, "Simple", "Operator"];
const OPERAND: &[&str] = &[CONFIGURATION, "Simple", "Operands", "Operand"];
const IGNORE_TIME: &[&str] = &[CONFIGURATION, "Simple", "Operands", "IgnoreTimeInDateTime"];
const DATE_TYPE: &[&str] = &[CONFIGURATION, "Simple", "Operands", "DateType"];
const PERIOD_DATE: &[&str] = &[CONFIGURATION, "Simple", "Operands", "PeriodDate"];
const PERIOD_TYPE: &[&str] = &[CONFIGURATION, "Simple", "Operands", "PeriodType"];
const PERIOD_COUNT: &[&str] = &[CONFIGURATION, "Simple", "Operands", "PeriodCount"];
const START_DATE: &[&str] = &[CONFIGURATION, "Simple", "Operands", "StartDate"];
const END_DATE: &[&str] = &[CONFIGURATION, "Simple", "Operands", "EndDate"];

/// Timestamp format of the date operands.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn spelling<T: Copy + PartialEq>(table: &[(T, &'static str)], value: T) -> &'static str {
  table
    .iter()
    .find(|(v, _)| *v == value)
    .map(|(_, s)| *s)
    .unwrap_or_default()
}

fn from_spelling<T: Copy>(table: &[(T, &'static str)], raw: &str, what: &str) -> Result<T> {
  table
    .iter()
    .find(|(_, spelling)| *spelling == raw.trim())
    .map(|(v, _)| *v)
    .ok_or_else(|| WorkflowError::InvalidConfig(format!("unknown filter {} '{}'", what, raw)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
  Simple,
  Custom,
}

impl FilterMode {
  pub fn as_str(self) -> &'static str {
    match self {
      FilterMode::Simple => "Simple",
      FilterMode::Custom => "Custom",
    }
  }
}

impl fmt::Display for FilterMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for FilterMode {
  type Err = WorkflowError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim() {
      "Simple" => Ok(FilterMode::Simple),
      "Custom" => Ok(FilterMode::Custom),
      other => Err(WorkflowError::InvalidConfig(format!(
        "unknown filter mode '{}'",
        other
      ))),
    }
  }
}

/// Operators of a simple-mode predicate, with their document spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
  IsFalse,
  IsTrue,
  IsEmpty,
  IsNotEmpty,
  IsNull,
  IsNotNull,
  Equal,
  NotEqual,
  GreaterThan,
  GreaterThanOrEqual,
  LessThan,
  LessThanOrEqual,
  Contains,
  DoesNotContain,
  DateRange,
  PeriodAfter,
  PeriodBefore,
}

const OPERATORS: &[(FilterOperator, &str)] = &[
  (FilterOperator::IsFalse, "IsFalse"),
  (FilterOperator::IsTrue, "IsTrue"),
  (FilterOperator::IsEmpty, "IsEmpty"),
  (FilterOperator::IsNotEmpty, "IsNotEmpty"),
  (FilterOperator::IsNull, "IsNull"),
  (FilterOperator::IsNotNull, "IsNotNull"),
  (FilterOperator::Equal, "="),
  (FilterOperator::NotEqual, "!="),
  (FilterOperator::GreaterThan, ">"),
  (FilterOperator::GreaterThanOrEqual, ">="),
  (FilterOperator::LessThan, "<"),
  (FilterOperator::LessThanOrEqual, "<="),
  (FilterOperator::Contains, "Contains"),
  (FilterOperator::DoesNotContain, "NotContains"),
  (FilterOperator::DateRange, "DateRange"),
  (FilterOperator::PeriodAfter, "PeriodAfter"),
  (FilterOperator::PeriodBefore, "PeriodBefore"),
];

impl FilterOperator {
  pub fn as_str(self) -> &'static str {
    spelling(OPERATORS, self)
  }
}

impl FromStr for FilterOperator {
  type Err = WorkflowError;

  fn from_str(s: &str) -> Result<Self> {
    from_spelling(OPERATORS, s, "operator")
  }
}

/// Reference date of a period comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDateType {
  Fixed,
  Yesterday,
  Today,
  Tomorrow,
}

const DATE_TYPES: &[(FilterDateType, &str)] = &[
  (FilterDateType::Fixed, "Fixed"),
  (FilterDateType::Yesterday, "Yesterday"),
  (FilterDateType::Today, "Today"),
  (FilterDateType::Tomorrow, "Tomorrow"),
];

impl FilterDateType {
  pub fn as_str(self) -> &'static str {
    spelling(DATE_TYPES, self)
  }
}

impl FromStr for FilterDateType {
  type Err = WorkflowError;

  fn from_str(s: &str) -> Result<Self> {
    from_spelling(DATE_TYPES, s, "date type")
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPeriodType {
  Days,
  Weeks,
  Months,
  Quarters,
  Years,
}

const PERIOD_TYPES: &[(FilterPeriodType, &str)] = &[
  (FilterPeriodType::Days, "Days"),
  (FilterPeriodType::Weeks, "Weeks"),
  (FilterPeriodType::Months, "Months"),
  (FilterPeriodType::Quarters, "Quarters"),
  (FilterPeriodType::Years, "Years"),
];

impl FilterPeriodType {
  pub fn as_str(self) -> &'static str {
    spelling(PERIOD_TYPES, self)
  }
}

impl FromStr for FilterPeriodType {
  type Err = WorkflowError;

  fn from_str(s: &str) -> Result<Self> {
    from_spelling(PERIOD_TYPES, s, "period type")
  }
}

fn require_mode(tool: &Tool, wanted: FilterMode, what: &str) -> Result<()> {
  let current = mode(tool)?;
  if current == wanted {
    Ok(())
  } else {
    Err(WorkflowError::InvalidConfig(format!(
      "filter '{}' has no {} in {} mode",
      tool.id, what, current
    )))
  }
}

fn non_empty<'a>(value: &'a str, what: &str) -> Result<&'a str> {
  if value.is_empty() {
    Err(WorkflowError::InvalidConfig(format!("filter {} cannot be empty", what)))
  } else {
    Ok(value)
  }
}

pub fn mode(tool: &Tool) -> Result<FilterMode> {
  ensure_kind(tool, FILTER)?;
  text_at(tool, MODE)?.parse()
}

pub fn set_mode(tool: &mut Tool, mode: FilterMode) -> Result<()> {
  ensure_kind(tool, FILTER)?;
  set_text_at(tool, MODE, mode.as_str());
  Ok(())
}

pub fn expression(tool: &Tool) -> Result<&str> {
  require_mode(tool, FilterMode::Custom, "expression")?;
  text_at(tool, EXPRESSION)
}

pub fn set_expression(tool: &mut Tool, expression: &str) -> Result<()> {
  require_mode(tool, FilterMode::Custom, "expression")?;
  set_text_at(tool, EXPRESSION, non_empty(expression, "expression")?);
  Ok(())
}

pub fn field(tool: &Tool) -> Result<&str> {
  require_mode(tool, FilterMode::Simple, "field")?;
  text_at(tool, FIELD)
}

pub fn set_field(tool: &mut Tool, field: &str) -> Result<()> {
  require_mode(tool, FilterMode::Simple, "field")?;
  set_text_at(tool, FIELD, non_empty(field, "field")?);
  Ok(())
}

pub fn operator(tool: &Tool) -> Result<FilterOperator> {
  require_mode(tool, FilterMode::Simple, "operator")?;
  text_at(tool, OPERATOR)?.parse()
}

pub fn set_operator(tool: &mut Tool, operator: FilterOperator) -> Result<()> {
  require_mode(tool, FilterMode::Simple, "operator")?;
  set_text_at(tool, OPERATOR, operator.as_str());
  Ok(())
}

pub fn operand(tool: &Tool) -> Result<&str> {
  require_mode(tool, FilterMode::Simple, "operand")?;
  text_at(tool, OPERAND)
}

pub fn set_operand(tool: &mut Tool, operand: &str) -> Result<()> {
  require_mode(tool, FilterMode::Simple, "operand")?;
  set_text_at(tool, OPERAND, operand);
  Ok(())
}

fn date_at(tool: &Tool, path: &[&str]) -> Result<NaiveDateTime> {
  let raw = text_at(tool, path)?;
  NaiveDateTime::parse_from_str(raw.trim(), DATE_TIME_FORMAT).map_err(|e| {
    WorkflowError::InvalidConfig(format!("{} is not a date: '{}' ({})", path.join("/"), raw, e))
  })
}

fn set_date_at(tool: &mut Tool, path: &[&str], value: &NaiveDateTime) {
  set_text_at(tool, path, value.format(DATE_TIME_FORMAT).to_string());
}

pub fn ignore_time_in_datetime(tool: &Tool) -> Result<bool> {
  require_mode(tool, FilterMode::Simple, "date operands")?;
  parse_bool(text_at(tool, IGNORE_TIME)?)
}

pub fn set_ignore_time_in_datetime(tool: &mut Tool, value: bool) -> Result<()> {
  require_mode(tool, FilterMode::Simple, "date operands")?;
  set_text_at(tool, IGNORE_TIME, bool_text(value));
  Ok(())
}

pub fn date_type(tool: &Tool) -> Result<FilterDateType> {
  require_mode(tool, FilterMode::Simple, "date operands")?;
  text_at(tool, DATE_TYPE)?.parse()
}

pub fn set_date_type(tool: &mut Tool, date_type: FilterDateType) -> Result<()> {
  require_mode(tool, FilterMode::Simple, "date operands")?;
  set_text_at(tool, DATE_TYPE, date_type.as_str());
  Ok(())
}

pub fn period_date(tool: &Tool) -> Result<NaiveDateTime> {
  require_mode(tool, FilterMode::Simple, "date operands")?;
  date_at(tool, PERIOD_DATE)
}

pub fn set_period_date(tool: &mut Tool, date: &NaiveDateTime) -> Result<()> {
  require_mode(tool, FilterMode::Simple, "date operands")?;
  set_date_at(tool, PERIOD_DATE, date);
  Ok(())
}

pub fn period_type(tool: &Tool) -> Result<FilterPeriodType> {
  require_mode(tool, FilterMode::Simple, "date operands")?;
  text_at(tool, PERIOD_TYPE)?.parse()
}

pub fn set_period_type(tool: &mut Tool, period_type: FilterPeriodType) -> Result<()> {
  require_mode(tool, FilterMode::Simple, "date operands")?;
  set_text_at(tool, PERIOD_TYPE, period_type.as_str());
  Ok(())
}

pub fn period_count(tool: &Tool) -> Result<u32> {
  require_mode(tool, FilterMode::Simple, "date operands")?;
  parse_number(text_at(tool, PERIOD_COUNT)?, "PeriodCount")
}

pub fn set_period_count(tool: &mut Tool, count: u32) -> Result<()> {
  require_mode(tool, FilterMode::Simple, "date operands")?;
  set_text_at(tool, PERIOD_COUNT, count.to_string());
  Ok(())
}

pub fn start_date(tool: &Tool) -> Result<NaiveDateTime> {
  require_mode(tool, FilterMode::Simple, "date operands")?;
  date_at(tool, START_DATE)
}

pub fn set_start_date(tool: &mut Tool, date: &NaiveDateTime) -> Result<()> {
  require_mode(tool, FilterMode::Simple, "date operands")?;
  set_date_at(tool, START_DATE, date);
  Ok(())
}

pub fn end_date(tool: &Tool) -> Result<NaiveDateTime> {
  require_mode(tool, FilterMode::Simple, "date operands")?;
  date_at(tool, END_DATE)
}

pub fn set_end_date(tool: &mut Tool, date: &NaiveDateTime) -> Result<()> {
  require_mode(tool, FilterMode::Simple, "date operands")?;
  set_date_at(tool, END_DATE, date);
  Ok(())
}
