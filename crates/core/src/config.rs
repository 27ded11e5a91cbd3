use std::path::Path;

use globset::{Glob, GlobMatcher};
use serde::Deserialize;

use crate::{GuextError, Result};

/// Environment variable consulted for a config file when no path is passed explicitly.
pub const CONFIG_ENV_VAR: &str = "GUEXT_CONFIG";

const DEFAULT_DESCRIPTOR_GLOB: &str = "*.csproj";
const DEFAULT_SOURCE_EXTENSION: &str = "cs";
const DEFAULT_DIRECTIVE_PREFIX: &str = "using ";
const DEFAULT_GLOBAL_MARKER: &str = "global";
const DEFAULT_AGGREGATE_FILE_NAME: &str = "GlobalUsings.cs";
const DEFAULT_STAGING_DIR_NAME: &str = ".guext-tmp";

/// Literals that drive discovery, extraction and aggregation.
#[derive(Clone, Debug)]
pub struct GuextConfig {
    descriptor_glob: String,
    descriptor_matcher: GlobMatcher,
    source_extension: String,
    directive_prefix: String,
    global_marker: String,
    aggregate_file_name: String,
    staging_dir_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    descriptor_glob: Option<String>,
    source_extension: Option<String>,
    directive_prefix: Option<String>,
    global_marker: Option<String>,
    aggregate_file_name: Option<String>,
    staging_dir_name: Option<String>,
}

impl Default for GuextConfig {
    fn default() -> Self {
        Self::from_raw(RawConfig::default())
            .unwrap_or_else(|err| unreachable!("built-in config is valid: {err}"))
    }
}

impl GuextConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|err| GuextError::io("read config", path, err))?;
        Self::from_toml_str(&text)
            .map_err(|err| GuextError::Config(format!("{}: {err}", path.display())))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: RawConfig =
            toml::from_str(text).map_err(|err| GuextError::Config(err.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self> {
        let descriptor_glob = non_empty(
            "descriptor_glob",
            raw.descriptor_glob,
            DEFAULT_DESCRIPTOR_GLOB,
        )?;
        let descriptor_matcher = Glob::new(&descriptor_glob)
            .map_err(|err| GuextError::Config(format!("descriptor_glob: {err}")))?
            .compile_matcher();

        let source_extension = non_empty(
            "source_extension",
            raw.source_extension,
            DEFAULT_SOURCE_EXTENSION,
        )?
        .trim_start_matches('.')
        .to_string();

        let aggregate_file_name = bare_file_name(
            "aggregate_file_name",
            raw.aggregate_file_name,
            DEFAULT_AGGREGATE_FILE_NAME,
        )?;
        let staging_dir_name = bare_file_name(
            "staging_dir_name",
            raw.staging_dir_name,
            DEFAULT_STAGING_DIR_NAME,
        )?;

        Ok(Self {
            descriptor_glob,
            descriptor_matcher,
            source_extension,
            directive_prefix: non_empty(
                "directive_prefix",
                raw.directive_prefix,
                DEFAULT_DIRECTIVE_PREFIX,
            )?,
            global_marker: non_empty("global_marker", raw.global_marker, DEFAULT_GLOBAL_MARKER)?,
            aggregate_file_name,
            staging_dir_name,
        })
    }

    pub fn descriptor_glob(&self) -> &str {
        &self.descriptor_glob
    }

    pub fn is_descriptor(&self, file_name: &str) -> bool {
        self.descriptor_matcher.is_match(file_name)
    }

    pub fn source_extension(&self) -> &str {
        &self.source_extension
    }

    pub fn directive_prefix(&self) -> &str {
        &self.directive_prefix
    }

    pub fn global_marker(&self) -> &str {
        &self.global_marker
    }

    pub fn aggregate_file_name(&self) -> &str {
        &self.aggregate_file_name
    }

    pub fn staging_dir_name(&self) -> &str {
        &self.staging_dir_name
    }
}

fn non_empty(field: &str, value: Option<String>, default: &str) -> Result<String> {
    match value {
        None => Ok(default.to_string()),
        Some(value) if value.trim().is_empty() => {
            Err(GuextError::Config(format!("{field} must not be empty")))
        }
        Some(value) => Ok(value),
    }
}

fn bare_file_name(field: &str, value: Option<String>, default: &str) -> Result<String> {
    let value = non_empty(field, value, default)?;
    let path = Path::new(&value);
    let is_bare = path.file_name().is_some_and(|name| name == path.as_os_str());
    if !is_bare || value == "." || value == ".." {
        return Err(GuextError::Config(format!(
            "{field} must be a plain file name, got {value:?}"
        )));
    }
    Ok(value)
}
