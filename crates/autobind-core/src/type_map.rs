//! Type Mapping Engine.
//!
//! Converts a native type spelling into a target-agnostic canonical tag
//! through an ordered, user-extensible list of rules. Each rule pairs one or
//! more regular expressions with one tag; the first rule with a pattern that
//! matches the whole normalized spelling wins.
//!
//! Unknown spellings pass through unchanged. Consumers that cannot handle an
//! unmapped type report the failure themselves.
//!
//! # Baseline Mappings
//!
//! | Native | Tag |
//! |--------|-----|
//! | `void` | `None` |
//! | `bool`, `b8`, `b32` | `bool` |
//! | `int`, `long`, `i32`, `uint64_t`, `size_t`, ... | `int` |
//! | `float`, `double`, `f32`, `f64` | `float` |
//! | `std::string`, `String`, `char*` | `str` |
//! | `Array<T>`, `std::vector<T>` | `list` |

use regex::Regex;

use crate::error::{AutobindError, AutobindResult};

/// Canonical tag produced for textual types.
pub const STRING_TAG: &str = "str";

/// Canonical tag produced for `void`.
pub const NONE_TAG: &str = "None";

const BASELINE: &[(&[&str], &str)] = &[
    (&["void"], NONE_TAG),
    (&["bool", "b8", "b32"], "bool"),
    (
        &[
            r"(signed |unsigned )?(char|short|int|long|long long)( int)?",
            r"unsigned",
            r"u?int(8|16|32|64)_t",
            r"[iu](8|16|32|64)",
            r"size_t|ptrdiff_t",
        ],
        "int",
    ),
    (&["float", "double", "long double", "f32", "f64"], "float"),
    (
        &[
            r"std::string",
            r"std::string_view",
            r"String",
            r"(unsigned )?char\s*\*",
        ],
        STRING_TAG,
    ),
    (&[r"(std::vector|Array)<.+>"], "list"),
];

/// One compiled pattern, kept with its source text.
#[derive(Debug, Clone)]
struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    fn compile(source: &str) -> AutobindResult<Self> {
        let regex =
            Regex::new(&format!("^(?:{source})$")).map_err(|e| AutobindError::InvalidPattern {
                pattern: source.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }
}

/// A canonical tag and every pattern converging on it.
#[derive(Debug, Clone)]
struct TypeRule {
    patterns: Vec<Pattern>,
    tag: String,
}

/// Ordered registry of type-mapping rules.
#[derive(Debug, Clone, Default)]
pub struct TypeMap {
    rules: Vec<TypeRule>,
}

impl TypeMap {
    /// Create an empty registry. Every spelling passes through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry preloaded with the baseline rules.
    pub fn with_baseline() -> Self {
        let mut map = Self::new();
        map.load_mappings();
        map
    }

    /// Register `pattern` for `tag`.
    ///
    /// When the tag already has a rule the pattern joins it, otherwise a new
    /// rule is appended after the existing ones.
    pub fn add_mapping(&mut self, pattern: &str, tag: &str) -> AutobindResult<()> {
        let pattern = Pattern::compile(pattern)?;

        match self.rules.iter_mut().find(|rule| rule.tag == tag) {
            Some(rule) => rule.patterns.push(pattern),
            None => self.rules.push(TypeRule {
                patterns: vec![pattern],
                tag: tag.to_string(),
            }),
        }

        Ok(())
    }

    /// Load the baseline rules.
    ///
    /// Call once per registry: calling it again duplicates every pattern.
    pub fn load_mappings(&mut self) {
        for (patterns, tag) in BASELINE {
            for pattern in *patterns {
                #[allow(clippy::expect_used)] // Safe: baseline patterns are literals covered by tests
                self.add_mapping(pattern, tag)
                    .expect("baseline pattern compiles");
            }
        }
    }

    /// Convert a native spelling to its canonical tag, or return the
    /// normalized spelling when no rule matches.
    pub fn convert(&self, native: &str) -> String {
        let normalized = normalize(native);

        self.rules
            .iter()
            .find(|rule| rule.patterns.iter().any(|p| p.regex.is_match(&normalized)))
            .map(|rule| rule.tag.clone())
            .unwrap_or(normalized)
    }

    /// Whether `native` maps to the textual string tag.
    pub fn is_string(&self, native: &str) -> bool {
        self.convert(native) == STRING_TAG
    }

    /// Registered tags in rule order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.tag.as_str())
    }

    /// Patterns registered for `tag`, in registration order
    pub fn patterns(&self, tag: &str) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|rule| rule.tag == tag)
            .flat_map(|rule| rule.patterns.iter().map(|p| p.source.as_str()))
            .collect()
    }
}

/// Strip a leading `const ` qualifier, reference markers and surrounding
/// whitespace.
pub fn normalize(native: &str) -> String {
    let trimmed = native.trim();
    let unqualified = trimmed.strip_prefix("const ").unwrap_or(trimmed);
    unqualified.replace('&', "").trim().to_string()
}
