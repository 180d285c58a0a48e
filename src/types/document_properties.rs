//! Default document-level `Properties` block of a new workflow.

use super::PropertyTree;

pub(crate) const PROPERTIES: &str = "Properties";
pub(crate) const META_INFO: &str = "MetaInfo";
pub(crate) const NAME: &str = "Name";

fn valued(name: &str, value: &str) -> PropertyTree {
  PropertyTree::new(name).set_attribute("value", value)
}

/// Global settings plus the `MetaInfo` block, as a fresh document carries them.
pub fn default_properties(display_name: &str) -> PropertyTree {
  PropertyTree::new(PROPERTIES)
    .add_children([
      PropertyTree::new("Memory").set_attribute("default", "True"),
      valued("GlobalRecordLimit", "0"),
      PropertyTree::new("TempFiles").set_attribute("default", "True"),
      PropertyTree::new("Annotation")
        .set_attribute("on", "True")
        .set_attribute("includeToolName", "False"),
      valued("ConvErrorLimit", "False"),
      valued("ConvErrorLimit_Stop", "False"),
      valued("CancelOnError", "False"),
      valued("DisableBrowse", "False"),
      valued("EnablePerformanceProfiling", "False"),
      valued("DisableAllOutput", "False"),
      valued("ShowAllMacroMessages", "False"),
      valued("ShowConnectionStatusIsOn", "True"),
      valued("ShowConnectionStatusOnlyWhenRunning", "True"),
      valued("ZoomLevel", "0"),
      PropertyTree::with_text("LayoutType", "Horizontal"),
    ])
    .add_child(default_meta_info(display_name))
}

fn default_meta_info(display_name: &str) -> PropertyTree {
  PropertyTree::new(META_INFO).add_children([
    valued("NameIsFileName", "True"),
    PropertyTree::with_text(NAME, display_name),
    PropertyTree::new("Description"),
    PropertyTree::new("RootToolName"),
    PropertyTree::new("ToolVersion"),
    valued("ToolInDb", "False"),
    PropertyTree::new("CategoryName"),
    PropertyTree::new("SearchTags"),
    PropertyTree::new("Author"),
    PropertyTree::new("Company"),
    PropertyTree::new("Copyright"),
    PropertyTree::new("DescriptionLink")
      .set_attribute("actual", "")
      .set_attribute("displayed", ""),
    PropertyTree::new("Example")
      .add_child(PropertyTree::new("Description"))
      .add_child(PropertyTree::new("File")),
  ])
}
