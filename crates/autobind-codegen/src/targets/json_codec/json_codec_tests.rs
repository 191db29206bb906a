#![allow(non_snake_case)]

use super::*;
use crate::test_support::{field, markers, squash, structure};
use autobind_core::{DeclarationModel, GeneratorConfig};

fn keyed(name: &str, ty: &str, key: &str) -> Field {
    let marker = format!("key:{key}");
    let mut f = field(name, ty);
    f.annotations = markers(&[marker.as_str()]);
    f
}

fn json_struct(name: &str, fields: Vec<Field>) -> Struct {
    let mut s = structure(name, fields);
    s.annotations = markers(&["json"]);
    s
}

fn render_model(model: &DeclarationModel) -> String {
    let config = GeneratorConfig::default();
    let map = config.type_map().unwrap();
    render(&RenderContext::new(model, Helpers::new(&map, &config))).unwrap()
}

#[test]
fn codec___simple_object_skips_unkeyed_fields() {
    let mut model = DeclarationModel::new();
    model.structs.push(json_struct(
        "Version",
        vec![
            keyed("major", "char", "major"),
            keyed("minor", "char", "minor"),
            keyed("patch", "char", "patch"),
            field("nonMapped", "int"),
        ],
    ));

    let code = render_model(&model);

    let expected = r#"template<>
const String ToString<Version>(const Version &value)
{
    Json result;

    result.Set(String("major"), value.major);
    result.Set(String("minor"), value.minor);
    result.Set(String("patch"), value.patch);
    return result.ToString();
}

template<>
Version FromString<Version>(const String& str)
{
    Json json(str);
    Version value = {};

    value.major = json.Get<char>(String("major"), value.major);
    value.minor = json.Get<char>(String("minor"), value.minor);
    value.patch = json.Get<char>(String("patch"), value.patch);
    return value;
}
"#;
    assert!(code.contains(expected), "unexpected output:\n{code}");
    assert!(!code.contains("nonMapped"));
}

#[test]
fn codec___nested_json_struct_is_written_as_object() {
    let mut model = DeclarationModel::new();
    model
        .structs
        .push(json_struct("Test", vec![keyed("count", "int", "count")]));
    model.structs.push(json_struct(
        "Container",
        vec![keyed("id", "int", "id"), keyed("test", "Test", "test")],
    ));

    let code = squash(&render_model(&model));

    assert!(code.contains(&squash(
        r#"result.Set(String("id"), value.id);
        result.Set(String("test"), Json(ToString(value.test)));
        return result.ToString();"#
    )));
    assert!(code.contains(&squash(
        r#"value.id = json.Get<int>(String("id"), value.id);
        FromString(json.Get<String>(String("test"), String("{}")), value.test);
        return value;"#
    )));
}

#[test]
fn codec___array_field_uses_append_and_push_loops() {
    let mut model = DeclarationModel::new();
    model.structs.push(json_struct(
        "Item",
        vec![
            keyed("id", "int", "id"),
            keyed("values", "Array<int>", "values"),
        ],
    ));

    let code = squash(&render_model(&model));

    assert!(code.contains(&squash(
        r#"{
            u32 fieldsCount = value.values.Size();
            Json fieldJson = Json("[]");
            for (u32 i = 0; i < fieldsCount; i++)
            {
                fieldJson.Append<int>(value.values[i]);
            }
            result.Set(String("values"), fieldJson);
        }"#
    )));
    assert!(code.contains(&squash(
        r#"{
            Json arrayField = json.Get<Json>(String("values"));
            RPP_ASSERT_MSG(arrayField.IsArray(), "The field 'values' is not an array.");
            u32 arraySize = arrayField.Size();
            for (u32 i = 0; i < arraySize; i++)
            {
                value.values.Push(arrayField.Get<int>(i));
            }
        }"#
    )));
}

#[test]
fn codec___const_reference_types_are_normalized_on_read() {
    let mut model = DeclarationModel::new();
    model.structs.push(json_struct(
        "Named",
        vec![keyed("name", "const String &", "name")],
    ));

    let code = render_model(&model);

    assert!(code.contains("value.name = json.Get<String>(String(\"name\"), value.name);"));
}

#[test]
fn render___wraps_output_in_namespace() {
    let mut model = DeclarationModel::new();
    model.structs.push(structure("Plain", vec![keyed("x", "int", "x")]));

    let code = render_model(&model);

    assert!(code.starts_with("// Generated by autobind. Do not edit.\n"));
    assert!(code.contains("namespace rpp\n{\n"));
    assert!(code.ends_with("} // namespace rpp\n"));
    assert!(!code.contains("Plain"));
}
