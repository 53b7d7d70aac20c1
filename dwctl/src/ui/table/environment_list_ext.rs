use comfy_table::{Cell, ContentArrangement};

use crate::config::Environment;

pub trait EnvironmentListExt {
    /// Renders the environments, marking `default_environment` with `*`.
    fn render_table(&self, default_environment: &str) -> String;
}

impl EnvironmentListExt for Vec<Environment> {
    fn render_table(&self, default_environment: &str) -> String {
        let rows = self
            .iter()
            .map(|environment| {
                let marker = if environment.name == default_environment { "*" } else { "" };
                [
                    Cell::new(marker),
                    Cell::new(&environment.name),
                    Cell::new(environment.namespace()),
                    Cell::new(environment.apollo_config_service.as_deref().unwrap_or("-")),
                    Cell::new(environment.extra_env.keys().cloned().collect::<Vec<_>>().join(",")),
                ]
            })
            .collect::<Vec<_>>();

        comfy_table::Table::new()
            .load_preset(comfy_table::presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["DEFAULT", "NAME", "NAMESPACE", "CONFIG SERVICE", "EXTRA ENV"])
            .add_rows(rows)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_environment_is_marked() {
        let table = vec![Environment::dev(), Environment::sit()].render_table("sit");
        let lines = table.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("dev") && !lines[1].trim_start().starts_with('*'));
        assert!(lines[2].trim_start().starts_with('*'));
        assert!(lines[2].contains("http://10.141.48.10:28080/"));
    }
}
