#![allow(non_snake_case)]

use super::*;
use crate::test_support::{
    class, constant, enumeration, field, function, markers, method, param, structure,
};
use autobind_core::DeclarationModel;

fn render_source(source: &str, model: &DeclarationModel) -> AutobindResult<String> {
    let config = GeneratorConfig::default();
    let map = config.type_map().unwrap();
    let template = FileTemplate::from_source("test.j2", source).unwrap();
    template.render(&RenderContext::new(model, Helpers::new(&map, &config)))
}

fn math_model() -> DeclarationModel {
    let mut model = DeclarationModel::new();
    model.enums.push(enumeration(
        "Color",
        vec![constant("RED", 0), constant("BLUE", 10)],
    ));
    model.functions.push(function(
        "Log",
        "void",
        vec![param("level", "int"), param("message", "const std::string &")],
    ));
    model
}

#[test]
fn FileTemplate___render___binds_model_collections() {
    let source = "{% for e in enums %}{{ e.name }}:{% for c in e.constants %} {{ c.name }}={{ c.value }}{% endfor %}{% endfor %}";

    let code = render_source(source, &math_model()).unwrap();

    assert_eq!(code, "Color: RED=0 BLUE=10");
}

#[test]
fn FileTemplate___render___parameter_helpers() {
    let source = "{% for f in functions %}\
void {{ f.name }}({{ native_params(f.parameters) }}) -> {{ f.name }}({{ forward_args(f.parameters) }});
def {{ f.name }}({{ stub_params(f.parameters, true) }}) -> {{ convert(f.returnType) }}: ...
({{ param_types(f.parameters) }}) \"{{ format_string(f.parameters) }}\"
{% endfor %}";

    let code = render_source(source, &math_model()).unwrap();

    assert_eq!(
        code,
        "void Log(int level, const std::string &message) -> Log(level, message.c_str());\n\
def Log(level: int, message: str) -> None: ...\n\
(int, const std::string &) \"is\"\n"
    );
}

#[test]
fn FileTemplate___render___declaration_predicates() {
    let mut model = DeclarationModel::new();
    let mut logging = class("Logging", vec![method("Log", "void", vec![])]);
    logging.annotations = markers(&["python", "singleton"]);
    let mut timer = class("Timer", vec![method("Start", "void", vec![])]);
    timer.annotations = markers(&["hide"]);
    model.classes.extend([logging, timer]);
    let mut version = structure("Version", vec![]);
    version.annotations = markers(&["json"]);
    model.structs.push(version);

    let source = "{% for c in classes %}{{ c.name }} \
singleton={{ is_singleton(c) }} static={{ is_static(c.methods[0], c) }} \
hidden={{ is_hidden(c) }} python={{ is_bound(c, \"python\") }}\n{% endfor %}\
{{ json_structs() | join(\",\") }}";

    let code = render_source(source, &model).unwrap();

    assert_eq!(
        code,
        "Logging singleton=true static=true hidden=false python=true\n\
Timer singleton=false static=false hidden=true python=false\n\
Version"
    );
}

#[test]
fn FileTemplate___render___json_key_and_format_tag() {
    let mut model = DeclarationModel::new();
    let mut major = field("major", "char");
    major.annotations = markers(&["key:maj"]);
    model.structs.push(structure("Version", vec![major]));

    let source = "{% for f in structs[0].fields %}{{ json_key(f) }}/{{ format_tag(f.type) }}{% endfor %}";

    assert_eq!(render_source(source, &model).unwrap(), "maj/i");
}

#[test]
fn FileTemplate___render___unknown_format_type_keeps_its_kind() {
    let mut model = DeclarationModel::new();
    model
        .functions
        .push(function("Spawn", "void", vec![param("at", "Vector3")]));

    let err = render_source("{{ format_string(functions[0].parameters) }}", &model).unwrap_err();

    assert!(matches!(err, AutobindError::UnknownFormatType(ref ty) if ty == "Vector3"));
}

#[test]
fn FileTemplate___render___undefined_function_is_template_error() {
    let err = render_source("{{ no_such_helper() }}", &DeclarationModel::new()).unwrap_err();

    assert!(matches!(err, AutobindError::Template(ref msg) if msg.starts_with("test.j2: ")));
}

#[test]
fn FileTemplate___load___missing_file_is_template_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = FileTemplate::load(&dir.path().join("gone.j2")).unwrap_err();

    assert_eq!(err.error_code(), 7);
}
