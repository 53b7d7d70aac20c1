//! This module renders a [`DeployReport`] as a table.

use comfy_table::{Cell, ContentArrangement};

use crate::deploy::DeployReport;

pub trait DeployReportExt {
    /// Renders one row per touched resource with columns "KIND", "NAME",
    /// "NAMESPACE" and "ACTION", followed by the deployed image.
    fn render_table(&self) -> String;
}

impl DeployReportExt for DeployReport {
    fn render_table(&self) -> String {
        let rows = self
            .resources
            .iter()
            .map(|resource| {
                [
                    Cell::new(resource.kind),
                    Cell::new(&resource.name),
                    Cell::new(&resource.namespace),
                    Cell::new(resource.action),
                ]
            })
            .collect::<Vec<_>>();

        let table = comfy_table::Table::new()
            .load_preset(comfy_table::presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["KIND", "NAME", "NAMESPACE", "ACTION"])
            .add_rows(rows)
            .to_string();

        format!("{table}\nimage: {}", self.image)
    }
}
