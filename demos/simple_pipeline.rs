//! Build a small file-to-file workflow and write it as a .yxmd document.
//!
//! Usage: `cargo run --example simple_pipeline -- [destination.yxmd]`
//! Without a destination the document goes to the system temp directory.

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;
use yxmd_builder::kinds::file_output::{self, OutputConfiguration};
use yxmd_builder::kinds::filter::{FilterMode, FilterOperator};
use yxmd_builder::kinds::{autofield, file_input, filter};
use yxmd_builder::registry::{AUTOFIELD, FILE_INPUT, FILE_OUTPUT, FILTER, SORT};
use yxmd_builder::workflow_io::default_file_name;
use yxmd_builder::{Workflow, create_tool};

fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let mut wf = Workflow::new("Simple Pipeline", "2019.1");
  wf.set_description("Reads customers, filters by region and sorts the rest")
    .set_author("demo");

  let mut input = create_tool(FILE_INPUT, "1").with_position((54, 66));
  file_input::set_file_name(&mut input, "C:\\data\\customers.csv")?;
  file_input::set_delimiter(&mut input, ",")?;
  file_input::set_header_row(&mut input, true)?;
  file_input::set_record_limit(&mut input, None)?;

  let mut auto = create_tool(AUTOFIELD, "2").with_position((150, 66));
  autofield::set_field(&mut auto, "Customer", true)?;
  autofield::set_field(&mut auto, "Region", true)?;

  let mut region = create_tool(FILTER, "3").with_position((246, 66));
  filter::set_mode(&mut region, FilterMode::Simple)?;
  filter::set_field(&mut region, "Region")?;
  filter::set_operator(&mut region, FilterOperator::Equal)?;
  filter::set_operand(&mut region, "West")?;

  wf.add_tool(input).add_tool(auto).add_tool(region);

  let mut west = create_tool(FILE_OUTPUT, &wf.next_tool_id()).with_position((342, 66));
  file_output::configure(
    &mut west,
    &OutputConfiguration {
      file_name: "C:\\data\\west.csv".to_string(),
      ..OutputConfiguration::default()
    },
  )?;
  let west_id = west.id.clone();
  wf.add_tool(west);

  let sort = create_tool(SORT, &wf.next_tool_id()).with_position(wf.position_below("3")?);
  let sort_id = sort.id.clone();
  wf.add_tool(sort);

  wf.add_connection("1", "Output", "2", "Input")?
    .add_connection("2", "Output", "3", "Input")?
    .add_connection("3", "True", &west_id, "Input")?
    .add_connection("3", "False", &sort_id, "Input")?;
  wf.validate()?;

  let destination = std::env::args()
    .nth(1)
    .map(PathBuf::from)
    .unwrap_or_else(|| std::env::temp_dir().join(default_file_name(&wf)));
  let path = wf.write(Some(destination.as_path()), true)?;

  let back = Workflow::read(&path)?;
  info!(
    path = %path.display(),
    tools = back.tool_count(),
    connections = back.connections().len(),
    "round trip complete"
  );
  println!("Wrote {}", path.display());
  for tool in back.tools() {
    println!(
      "  {:>2} {:<52} in={} out={}",
      tool.id,
      tool.kind_tag,
      tool.inputs().len(),
      tool.outputs().len()
    );
  }
  Ok(())
}
