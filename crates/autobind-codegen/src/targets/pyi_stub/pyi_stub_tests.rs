#![allow(non_snake_case)]

use super::*;
use crate::test_support::{
    class, constant, enumeration, field, function, markers, method, param, structure,
};
use autobind_core::{DeclarationModel, GeneratorConfig};
use test_case::test_case;

fn with_helpers<R>(f: impl FnOnce(&Helpers<'_>) -> R) -> R {
    let config = GeneratorConfig::default();
    let map = config.type_map().unwrap();
    f(&Helpers::new(&map, &config))
}

fn render_model(model: &DeclarationModel) -> String {
    let config = GeneratorConfig::default();
    let map = config.type_map().unwrap();
    render(&RenderContext::new(model, Helpers::new(&map, &config))).unwrap()
}

#[test]
fn enum_stub___documents_enum_and_constants() {
    let mut color = enumeration(
        "Color",
        vec![constant("RED", 0), constant("GREEN", 1), constant("BLUE", 10)],
    );
    color.comment = Some("Color enumeration".to_string());
    color.constants[1].comment = Some("Green color".to_string());
    color.constants[2].annotations = markers(&["hide"]);

    let code = with_helpers(|h| enum_stub(&color, h));

    assert_eq!(
        code,
        r#"class Color(Enum):
    """
        Color enumeration
    """
    RED = 0
    GREEN = 1
    """
        Green color
    """"#
    );
}

#[test]
fn render___unbound_enum_is_omitted() {
    let mut model = DeclarationModel::new();
    model.enums.push(enumeration("Color", vec![constant("RED", 0)]));

    let code = render_model(&model);

    assert!(!code.contains("class Color"));
    assert!(code.starts_with("# Generated by autobind. Do not edit.\n"));
}

#[test]
fn struct_stub___fields_and_default_init() {
    let mut x = field("x", "int");
    x.comment = Some("X coordinate".to_string());
    let mut point = structure("Point", vec![x, field("y", "f32")]);
    point.comment = Some("Point structure".to_string());

    let code = with_helpers(|h| struct_stub(&point, h));

    assert_eq!(
        code,
        r#"class Point:
    """
        Point structure
    """
    x: int
    """
        X coordinate
    """
    y: float

    def __init__(self) -> None: ..."#
    );
}

#[test]
fn class_stub___static_singleton_and_documented_methods() {
    let mut log = method(
        "Log",
        "void",
        vec![param("level", "int"), param("message", "const std::string &")],
    );
    log.annotations = markers(&["python"]);
    log.comment = Some("Log a message.".to_string());
    log.parameters[0].comment = Some("Severity.".to_string());
    let mut logging = class("Logging", vec![log]);
    logging.annotations = markers(&["python", "singleton"]);

    let code = with_helpers(|h| class_stub(&logging, h));

    assert_eq!(
        code,
        r#"class Logging:
    @staticmethod
    def Log(level: int, message: str) -> None:
        """
            Log a message.

            :param level: Severity.
        """
        ..."#
    );
}

#[test]
fn class_stub___overloaded_constructors_and_methods() {
    let mut a = method("Move", "bool", vec![param("x", "f64")]);
    a.annotations = markers(&["python"]);
    let mut b = method("Move", "bool", vec![param("x", "f64"), param("y", "f64")]);
    b.annotations = markers(&["python"]);
    let mut body = class("Body", vec![a, b]);
    body.constructors = vec![
        method("Body", "", vec![]),
        method("Body", "", vec![param("mass", "float")]),
    ];

    let code = with_helpers(|h| class_stub(&body, h));

    assert_eq!(
        code,
        r#"class Body:
    @overload
    def __init__(self) -> None: ...
    @overload
    def __init__(self, mass: float) -> None: ...

    @overload
    def Move(self, x: float) -> bool: ...
    @overload
    def Move(self, x: float, y: float) -> bool: ..."#
    );
}

#[test]
fn class_stub___empty_singleton_has_ellipsis_body() {
    let mut registry = class("Registry", vec![]);
    registry.annotations = markers(&["singleton"]);

    let code = with_helpers(|h| class_stub(&registry, h));

    assert_eq!(code, "class Registry:\n    ...");
}

#[test]
fn render___function_with_doc_tags() {
    let mut model = DeclarationModel::new();
    let mut multiply = function(
        "Multiply",
        "int",
        vec![param("a", "int"), param("b", "int")],
    );
    multiply.annotations = markers(&["python"]);
    multiply.comment = Some("Multiplies two integers.".to_string());
    multiply.parameters[0].comment = Some("The first integer.".to_string());
    multiply.return_comment = Some("The product of a and b.".to_string());
    model.functions.push(multiply);

    let code = render_model(&model);

    assert!(code.contains(
        r#"def Multiply(a: int, b: int) -> int:
    """
        Multiplies two integers.

        :param a: The first integer.
        :return: The product of a and b.
    """
    ...
"#
    ));
}

#[test_case(true, Access::Public ; "hidden")]
#[test_case(false, Access::Private ; "private")]
fn class_stub___unexposed_default_constructor_means_no_init(hidden: bool, access: Access) {
    let mut ctor = method("Widget", "", vec![]);
    ctor.access = access;
    if hidden {
        ctor.annotations = markers(&["hide"]);
    }
    let mut widget = class("Widget", vec![]);
    widget.constructors = vec![ctor];

    let code = with_helpers(|h| class_stub(&widget, h));

    assert_eq!(code, "class Widget:\n    ...");
}
