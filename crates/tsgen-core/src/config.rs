use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Project configuration loaded from `.tsgen.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TsgenConfig {
    /// OpenAPI document to read (YAML or JSON).
    pub input: String,
    /// Directory the generated client is written to.
    pub output: String,
    /// Remove the output directory before writing.
    pub clear: bool,
    /// Directory whose `*.ts.j2` files replace the embedded templates.
    pub templates: Option<String>,
}

impl Default for TsgenConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: "./out".to_string(),
            clear: false,
            templates: None,
        }
    }
}

impl TsgenConfig {
    pub fn templates_dir(&self) -> Option<PathBuf> {
        self.templates.as_ref().map(PathBuf::from)
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".tsgen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<TsgenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: TsgenConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# tsgen configuration
input: openapi.yaml   # OpenAPI 3.x document, YAML or JSON
output: ./out         # where the TypeScript client is written
clear: false          # remove the output directory before writing

# templates: ./templates   # override dto/serializer/endpoint/client/index templates
"#
}
