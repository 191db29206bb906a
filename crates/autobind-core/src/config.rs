//! Generator configuration (`autobind.toml`)
//!
//! Every field has a default, so an empty file is a valid configuration.
//!
//! ```toml
//! [parser]
//! namespace = "rpp"
//! front_end = "/usr/local/bin/autobind-clang"
//! include_dirs = ["libraries/core/include"]
//!
//! [markers]
//! binding = "python"
//!
//! [codegen]
//! module_name = "rpp"
//!
//! [[type_mappings]]
//! pattern = "Vec[23]"
//! tag = "tuple"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AutobindError, AutobindResult};
use crate::type_map::TypeMap;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub parser: ParserConfig,

    #[serde(default)]
    pub markers: MarkerConfig,

    #[serde(default)]
    pub codegen: CodegenConfig,

    /// Extra rules registered after the baseline mappings
    #[serde(default)]
    pub type_mappings: Vec<TypeMappingEntry>,
}

/// Front-end and walker settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Only declarations directly inside this namespace are extracted
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// External front-end executable; inputs are AST dumps when unset
    #[serde(default)]
    pub front_end: Option<PathBuf>,

    /// Arguments passed to the front end before the input path
    #[serde(default = "default_front_end_args")]
    pub args: Vec<String>,

    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,
}

/// Annotation markers recognized by the built-in templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerConfig {
    #[serde(default = "default_binding_marker")]
    pub binding: String,

    #[serde(default = "default_native_shim_marker")]
    pub native_shim: String,

    #[serde(default = "default_json_marker")]
    pub json: String,

    #[serde(default = "default_singleton_marker")]
    pub singleton: String,

    #[serde(default = "default_hide_marker")]
    pub hide: String,

    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

/// Output settings shared by the built-in templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Name of the generated extension module
    #[serde(default = "default_module_name")]
    pub module_name: String,

    /// Static accessor returning a singleton's shared instance
    #[serde(default = "default_singleton_accessor")]
    pub singleton_accessor: String,

    /// Member call producing a raw character pointer from a string
    #[serde(default = "default_string_view")]
    pub string_view: String,

    /// Headers included at the top of generated C++ sources
    #[serde(default)]
    pub includes: Vec<String>,

    /// Opaque integer handle types accepted by format-tag derivation
    #[serde(default = "default_handle_types")]
    pub handle_types: Vec<String>,
}

/// One `[[type_mappings]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeMappingEntry {
    pub pattern: String,
    pub tag: String,
}

fn default_namespace() -> String {
    "rpp".to_string()
}

fn default_front_end_args() -> Vec<String> {
    vec!["-x".to_string(), "c++".to_string(), "-std=c++17".to_string()]
}

fn default_binding_marker() -> String {
    "python".to_string()
}

fn default_native_shim_marker() -> String {
    "e2e".to_string()
}

fn default_json_marker() -> String {
    "json".to_string()
}

fn default_singleton_marker() -> String {
    "singleton".to_string()
}

fn default_hide_marker() -> String {
    "hide".to_string()
}

fn default_key_prefix() -> String {
    "key:".to_string()
}

fn default_module_name() -> String {
    "rpp".to_string()
}

fn default_singleton_accessor() -> String {
    "GetInstance".to_string()
}

fn default_string_view() -> String {
    "c_str()".to_string()
}

fn default_handle_types() -> Vec<String> {
    ["FileHandle", "EntityId", "ComponentId", "SystemId", "ECSId", "SignalId"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            front_end: None,
            args: default_front_end_args(),
            include_dirs: Vec::new(),
        }
    }
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            binding: default_binding_marker(),
            native_shim: default_native_shim_marker(),
            json: default_json_marker(),
            singleton: default_singleton_marker(),
            hide: default_hide_marker(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            module_name: default_module_name(),
            singleton_accessor: default_singleton_accessor(),
            string_view: default_string_view(),
            includes: Vec::new(),
            handle_types: default_handle_types(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> AutobindResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| AutobindError::io(path, e))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> AutobindResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reject settings that would make generation meaningless
    pub fn validate(&self) -> AutobindResult<()> {
        if self.parser.namespace.trim().is_empty() {
            return Err(AutobindError::Config("namespace cannot be empty".into()));
        }

        if self.markers.key_prefix.is_empty() {
            return Err(AutobindError::Config("key prefix cannot be empty".into()));
        }

        if self.codegen.singleton_accessor.trim().is_empty() {
            return Err(AutobindError::Config(
                "singleton accessor cannot be empty".into(),
            ));
        }

        for (idx, entry) in self.type_mappings.iter().enumerate() {
            if entry.pattern.is_empty() || entry.tag.is_empty() {
                return Err(AutobindError::Config(format!(
                    "type mapping #{} needs both a pattern and a tag",
                    idx + 1
                )));
            }
        }

        Ok(())
    }

    /// Build the type map for a run: baseline rules, then configured ones
    pub fn type_map(&self) -> AutobindResult<TypeMap> {
        let mut map = TypeMap::with_baseline();
        for entry in &self.type_mappings {
            map.add_mapping(&entry.pattern, &entry.tag)?;
        }
        Ok(map)
    }
}
