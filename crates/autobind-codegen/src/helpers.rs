//! Template helper functions
//!
//! Marshalling rules shared by the built-in targets: static classification,
//! parameter list flavors, JSON keys and positional format tags.

use autobind_core::type_map::{NONE_TAG, STRING_TAG, normalize};
use autobind_core::{
    Annotations, AutobindError, AutobindResult, Decl, DeclarationModel, GeneratorConfig, Method,
    Parameter, TypeMap,
};

/// Format tag for each canonical tag the type map produces.
fn tag_for(canonical: &str) -> Option<&'static str> {
    match canonical {
        "" | NONE_TAG => Some(""),
        "int" => Some("i"),
        "float" => Some("f"),
        STRING_TAG => Some("s"),
        "bool" => Some("b"),
        _ => None,
    }
}

/// Helpers bound to one type map and one configuration.
#[derive(Debug, Clone, Copy)]
pub struct Helpers<'a> {
    type_map: &'a TypeMap,
    config: &'a GeneratorConfig,
}

impl<'a> Helpers<'a> {
    pub fn new(type_map: &'a TypeMap, config: &'a GeneratorConfig) -> Self {
        Self { type_map, config }
    }

    pub fn type_map(&self) -> &'a TypeMap {
        self.type_map
    }

    pub fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    /// Canonical tag for a native spelling.
    pub fn convert(&self, native: &str) -> String {
        self.type_map.convert(native)
    }

    /// Whether `owner` carries the singleton marker.
    pub fn is_singleton(&self, owner: Decl<'_>) -> bool {
        owner.annotations().contains(&self.config.markers.singleton)
    }

    /// A method binds as static when it is static itself or its owner is a singleton.
    pub fn is_static(&self, method: &Method, owner: Decl<'_>) -> bool {
        method.is_static || self.is_singleton(owner)
    }

    /// Stub-style list: `self, a: int, b: float`.
    pub fn stub_params(&self, params: &[Parameter], is_static: bool) -> String {
        let receiver = (!is_static).then(|| "self".to_string());
        receiver
            .into_iter()
            .chain(
                params
                    .iter()
                    .map(|p| format!("{}: {}", p.name, self.type_map.convert(&p.ty))),
            )
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Native declaration list: `int level, const std::string &message`.
    ///
    /// String-tagged parameters are taken as `const std::string &`.
    pub fn native_params(&self, params: &[Parameter]) -> String {
        params
            .iter()
            .map(|p| {
                if self.type_map.is_string(&p.ty) {
                    format!("const std::string &{}", p.name)
                } else {
                    format!("{} {}", p.ty, p.name)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Forwarding list: `level, message.c_str()`.
    ///
    /// With `convert_strings` off, string arguments are forwarded untouched.
    pub fn forward_args(&self, params: &[Parameter], convert_strings: bool) -> String {
        params
            .iter()
            .map(|p| {
                if convert_strings && self.type_map.is_string(&p.ty) {
                    format!("{}.{}", p.name, self.config.codegen.string_view)
                } else {
                    p.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Bare native type list for overload disambiguation: `int, float`.
    pub fn param_types(&self, params: &[Parameter]) -> String {
        params
            .iter()
            .map(|p| p.ty.trim())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Wire name from the `key:` annotation, or `""`.
    pub fn json_key<'b>(&self, annotations: &'b Annotations) -> &'b str {
        annotations
            .value_of(&self.config.markers.key_prefix)
            .unwrap_or("")
    }

    /// Single-character positional format tag for a type spelling.
    ///
    /// The spelling is classified by the type map, so every native spelling it
    /// accepts has a tag. Returns `""` for `void`. Configured handle types pass
    /// as integers. Anything else is an error, never a guess.
    pub fn format_tag(&self, ty: &str) -> AutobindResult<&'static str> {
        let normalized = normalize(ty);

        if self
            .config
            .codegen
            .handle_types
            .iter()
            .any(|handle| *handle == normalized)
        {
            return Ok("i");
        }

        tag_for(&self.type_map.convert(&normalized))
            .ok_or_else(|| AutobindError::UnknownFormatType(ty.trim().to_string()))
    }

    /// Concatenated format tags of a parameter list.
    pub fn format_string(&self, params: &[Parameter]) -> AutobindResult<String> {
        params.iter().map(|p| self.format_tag(&p.ty)).collect()
    }

    /// Names of structs carrying the json marker, in model order.
    pub fn json_structs<'m>(&self, model: &'m DeclarationModel) -> Vec<&'m str> {
        model
            .structs
            .iter()
            .filter(|s| s.annotations.contains(&self.config.markers.json))
            .map(|s| s.name.as_str())
            .collect()
    }

    pub fn is_hidden(&self, decl: Decl<'_>) -> bool {
        decl.annotations().contains(&self.config.markers.hide)
    }

    pub fn is_bound(&self, decl: Decl<'_>, marker: &str) -> bool {
        decl.annotations().contains(marker)
    }
}
