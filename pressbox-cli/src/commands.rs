//! CLI commands
//!
//! Each subcommand maps to one library entry point. Inputs are read from disk: `.html`/`.htm`
//! files are taken as pre-rendered HTML, anything else is parsed as JSON (a stored record or a
//! bare tree) and falls back to HTML when it is not JSON at all.

use anyhow::{bail, Context, Result};
use pressbox::{
    analyze_content_with, calculate_read_time_range_with, calculate_read_time_with,
    extract_plain_text_with, extract_smart_excerpt_with, generate_seo_metadata_with,
    Content, HtmlSerializer, MaxLength,
};
use pressbox_config::PressboxConfig;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Subcommands that print a record rather than text
pub const RECORD_FORMATS: &[&str] = &["json", "yaml"];

/// Options shared by the subcommands, already merged with the configuration
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    pub max_length: Option<usize>,
    pub format: String,
    pub range: bool,
}

pub fn load_input(path: &Path) -> Result<Value> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;

    let is_html = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));
    if is_html {
        return Ok(Value::String(source));
    }

    match serde_json::from_str(&source) {
        Ok(value) => Ok(value),
        Err(err) => {
            log::debug!("{} is not JSON ({err}), reading it as HTML", path.display());
            Ok(Value::String(source))
        }
    }
}

/// Run a named command on an already loaded input.
///
/// Every command renders and walks trees under the configured `[render]` limits.
pub fn execute(
    command: &str,
    input: &Value,
    config: &PressboxConfig,
    options: &CommandOptions,
) -> Result<String> {
    let serializer = HtmlSerializer::with_options(config.serializer_options());
    match command {
        "html" => Ok(render_html(input, &serializer)),
        "text" => Ok(extract_plain_text_with(
            input,
            MaxLength::from(options.max_length),
            &serializer,
        )),
        "excerpt" => Ok(extract_smart_excerpt_with(
            input,
            options.max_length.unwrap_or(config.excerpt.max_length),
            &serializer,
        )),
        "analyze" => to_format(&analyze_content_with(input, &serializer), &options.format),
        "read-time" => {
            let read_time_options = config.read_time_options();
            if options.range {
                to_format(
                    &calculate_read_time_range_with(input, &read_time_options, &serializer),
                    &options.format,
                )
            } else {
                to_format(
                    &calculate_read_time_with(input, &read_time_options, &serializer),
                    &options.format,
                )
            }
        }
        "seo" => {
            let mut seo_options = config.seo_options();
            if let Some(max_length) = options.max_length {
                seo_options.description_length = max_length;
            }
            to_format(
                &generate_seo_metadata_with(input, &seo_options, &serializer),
                &options.format,
            )
        }
        _ => bail!("Unknown command: {command}"),
    }
}

/// Trees are serialized; HTML input is passed through.
fn render_html(input: &Value, serializer: &HtmlSerializer) -> String {
    Content::resolve(input).to_html_with(serializer).into_owned()
}

pub fn to_format<T: Serialize>(record: &T, format: &str) -> Result<String> {
    match format {
        "json" => serde_json::to_string_pretty(record).context("JSON serialization failed"),
        "yaml" => serde_yaml::to_string(record).context("YAML serialization failed"),
        other => bail!(
            "Unknown format '{other}' (available: {})",
            RECORD_FORMATS.join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(format: &str) -> CommandOptions {
        CommandOptions {
            format: format.to_string(),
            ..CommandOptions::default()
        }
    }

    fn article() -> Value {
        json!({ "body": { "root": { "children": [
            { "type": "paragraph", "children": [{ "type": "text", "text": "Kick-off at three." }] }
        ] } } })
    }

    #[test]
    fn test_html_command_renders_trees_and_passes_html_through() {
        let config = pressbox_config::load_defaults().unwrap();
        let html = execute("html", &article(), &config, &options("json")).unwrap();
        assert_eq!(html, r#"<p style="text-align: left;">Kick-off at three.</p>"#);

        let passthrough = execute("html", &json!("<p>kept</p>"), &config, &options("json")).unwrap();
        assert_eq!(passthrough, "<p>kept</p>");
    }

    #[test]
    fn test_text_command_honours_max_length() {
        let config = pressbox_config::load_defaults().unwrap();
        let mut opts = options("json");
        opts.max_length = Some(8);
        assert_eq!(
            execute("text", &article(), &config, &opts).unwrap(),
            "Kick-off..."
        );
    }

    #[test]
    fn test_record_formats() {
        let config = pressbox_config::load_defaults().unwrap();
        let json_out = execute("analyze", &article(), &config, &options("json")).unwrap();
        assert!(json_out.contains("\"wordCount\": 3"));
        let yaml_out = execute("analyze", &article(), &config, &options("yaml")).unwrap();
        assert!(yaml_out.contains("wordCount: 3"));
        assert!(execute("analyze", &article(), &config, &options("xml")).is_err());
    }

    #[test]
    fn test_render_limit_applies_to_every_command() {
        let config = pressbox_config::Loader::new()
            .set_override("render.max_depth", 1i64)
            .unwrap()
            .build()
            .unwrap();
        let opts = options("json");

        assert_eq!(execute("html", &article(), &config, &opts).unwrap(), "");
        assert_eq!(execute("text", &article(), &config, &opts).unwrap(), "");
        assert_eq!(execute("excerpt", &article(), &config, &opts).unwrap(), "");
        let analysis = execute("analyze", &article(), &config, &opts).unwrap();
        assert!(analysis.contains("\"wordCount\": 0"));
        assert!(analysis.contains("\"readingTime\": 0"));
        let read_time = execute("read-time", &article(), &config, &opts).unwrap();
        assert!(read_time.contains("\"words\": 0"));
    }

    #[test]
    fn test_unknown_command() {
        let config = pressbox_config::load_defaults().unwrap();
        assert!(execute("publish", &article(), &config, &options("json")).is_err());
    }
}
