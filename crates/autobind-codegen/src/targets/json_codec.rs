//! JSON codec target
//!
//! Emits `ToString<T>` / `FromString<T>` specializations for every struct
//! carrying the json marker. Only fields with a `key:` annotation take part.
//! Fields whose type is another json struct are nested as objects, and
//! `Array<T>` fields as JSON arrays.

use once_cell::sync::Lazy;
use regex::Regex;

use autobind_core::type_map::normalize;
use autobind_core::{AutobindResult, Field, Struct};

use super::GENERATED_NOTICE;
use crate::helpers::Helpers;
use crate::template::RenderContext;

#[allow(clippy::expect_used)] // Safe: literal pattern
static ARRAY_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Array<\s*(.+?)\s*>$").expect("valid array regex"));

/// How one keyed field is written and read.
enum FieldKind {
    Plain,
    Nested,
    Array(String),
}

/// A field that participates in the codec, with its wire key.
struct KeyedField<'f> {
    field: &'f Field,
    key: &'f str,
    kind: FieldKind,
}

pub fn render(ctx: &RenderContext<'_>) -> AutobindResult<String> {
    let helpers = ctx.helpers();
    let config = ctx.config();
    let json_structs = helpers.json_structs(ctx.model());

    let mut code = format!("// {}\n\n", GENERATED_NOTICE);
    for include in &config.codegen.includes {
        code.push_str(&format!("#include \"{}\"\n", include));
    }
    if !config.codegen.includes.is_empty() {
        code.push('\n');
    }
    code.push_str(&format!("namespace {}\n{{\n", config.parser.namespace));

    for s in ctx.structs() {
        if !json_structs.contains(&s.name.as_str()) {
            continue;
        }
        code.push('\n');
        code.push_str(&codec(s, &json_structs, helpers));
    }

    code.push_str(&format!("\n}} // namespace {}\n", config.parser.namespace));
    Ok(code)
}

fn keyed_fields<'f>(
    s: &'f Struct,
    json_structs: &[&str],
    helpers: &Helpers<'_>,
) -> Vec<KeyedField<'f>> {
    s.fields
        .iter()
        .filter_map(|field| {
            let key = helpers.json_key(&field.annotations);
            if key.is_empty() {
                return None;
            }

            let normalized = normalize(&field.ty);
            let kind = if let Some(caps) = ARRAY_TYPE.captures(&normalized) {
                FieldKind::Array(caps[1].to_string())
            } else if json_structs.contains(&normalized.as_str()) {
                FieldKind::Nested
            } else {
                FieldKind::Plain
            };

            Some(KeyedField { field, key, kind })
        })
        .collect()
}

/// Both specializations for one struct.
pub(crate) fn codec(s: &Struct, json_structs: &[&str], helpers: &Helpers<'_>) -> String {
    let fields = keyed_fields(s, json_structs, helpers);
    let mut code = to_string(&s.name, &fields);
    code.push('\n');
    code.push_str(&from_string(&s.name, &fields));
    code
}

fn to_string(name: &str, fields: &[KeyedField<'_>]) -> String {
    let mut code = String::new();
    code.push_str("template<>\n");
    code.push_str(&format!(
        "const String ToString<{0}>(const {0} &value)\n{{\n",
        name
    ));
    code.push_str("    Json result;\n\n");

    for f in fields {
        let member = &f.field.name;
        match &f.kind {
            FieldKind::Plain => code.push_str(&format!(
                "    result.Set(String(\"{}\"), value.{});\n",
                f.key, member
            )),
            FieldKind::Nested => code.push_str(&format!(
                "    result.Set(String(\"{}\"), Json(ToString(value.{})));\n",
                f.key, member
            )),
            FieldKind::Array(element) => {
                code.push_str("\n    {\n");
                code.push_str(&format!(
                    "        u32 fieldsCount = value.{}.Size();\n",
                    member
                ));
                code.push_str("        Json fieldJson = Json(\"[]\");\n");
                code.push_str("        for (u32 i = 0; i < fieldsCount; i++)\n        {\n");
                code.push_str(&format!(
                    "            fieldJson.Append<{}>(value.{}[i]);\n",
                    element, member
                ));
                code.push_str("        }\n");
                code.push_str(&format!(
                    "        result.Set(String(\"{}\"), fieldJson);\n",
                    f.key
                ));
                code.push_str("    }\n\n");
            }
        }
    }

    code.push_str("    return result.ToString();\n}\n");
    code
}

fn from_string(name: &str, fields: &[KeyedField<'_>]) -> String {
    let mut code = String::new();
    code.push_str("template<>\n");
    code.push_str(&format!(
        "{0} FromString<{0}>(const String& str)\n{{\n",
        name
    ));
    code.push_str("    Json json(str);\n");
    code.push_str(&format!("    {} value = {{}};\n\n", name));

    for f in fields {
        let member = &f.field.name;
        match &f.kind {
            FieldKind::Plain => code.push_str(&format!(
                "    value.{0} = json.Get<{1}>(String(\"{2}\"), value.{0});\n",
                member,
                normalize(&f.field.ty),
                f.key
            )),
            FieldKind::Nested => code.push_str(&format!(
                "    FromString(json.Get<String>(String(\"{}\"), String(\"{{}}\")), value.{});\n",
                f.key, member
            )),
            FieldKind::Array(element) => {
                code.push_str("\n    {\n");
                code.push_str(&format!(
                    "        Json arrayField = json.Get<Json>(String(\"{}\"));\n",
                    f.key
                ));
                code.push_str(&format!(
                    "        RPP_ASSERT_MSG(arrayField.IsArray(), \"The field '{}' is not an array.\");\n",
                    f.key
                ));
                code.push_str("        u32 arraySize = arrayField.Size();\n");
                code.push_str("        for (u32 i = 0; i < arraySize; i++)\n        {\n");
                code.push_str(&format!(
                    "            value.{}.Push(arrayField.Get<{}>(i));\n",
                    member, element
                ));
                code.push_str("        }\n");
                code.push_str("    }\n\n");
            }
        }
    }

    code.push_str("    return value;\n}\n");
    code
}

#[cfg(test)]
#[path = "json_codec/json_codec_tests.rs"]
mod json_codec_tests;
