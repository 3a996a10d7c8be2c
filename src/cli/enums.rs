//! CLI enum types.

use clap::ValueEnum;

use crate::models::Cover;

/// How a generated cover is printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Full cover object as pretty JSON
    #[default]
    Json,
    /// Cover id only
    Id,
}

impl OutputFormat {
    pub fn render(&self, cover: &Cover) -> Result<String, serde_json::Error> {
        match self {
            OutputFormat::Json => serde_json::to_string_pretty(cover.as_value()),
            OutputFormat::Id => Ok(cover.id().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_id() {
        let cover = Cover::new(json!({"id": "c1", "img_url": "u"}));
        assert_eq!(OutputFormat::Id.render(&cover).unwrap(), "c1");
    }

    #[test]
    fn test_render_json() {
        let cover = Cover::new(json!({"id": "c1"}));
        let out = OutputFormat::Json.render(&cover).unwrap();
        assert_eq!(serde_json::from_str::<serde_json::Value>(&out).unwrap(), json!({"id": "c1"}));
    }

    #[test]
    fn test_default_is_json() {
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }
}
