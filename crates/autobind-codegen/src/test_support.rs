//! Builders for hand-made declaration models

use autobind_core::{
    Access, Annotations, Class, Enum, EnumConstant, Field, Function, Method, Parameter, Struct,
};

pub fn markers(names: &[&str]) -> Annotations {
    names.iter().copied().collect()
}

pub fn param(name: &str, ty: &str) -> Parameter {
    Parameter {
        name: name.to_string(),
        ty: ty.to_string(),
        ..Default::default()
    }
}

pub fn method(name: &str, return_type: &str, parameters: Vec<Parameter>) -> Method {
    Method {
        name: name.to_string(),
        return_type: return_type.to_string(),
        parameters,
        ..Default::default()
    }
}

pub fn function(name: &str, return_type: &str, parameters: Vec<Parameter>) -> Function {
    Function {
        name: name.to_string(),
        return_type: return_type.to_string(),
        parameters,
        ..Default::default()
    }
}

pub fn field(name: &str, ty: &str) -> Field {
    Field {
        name: name.to_string(),
        ty: ty.to_string(),
        access: Access::Public,
        ..Default::default()
    }
}

pub fn constant(name: &str, value: i64) -> EnumConstant {
    EnumConstant {
        name: name.to_string(),
        value,
        ..Default::default()
    }
}

pub fn enumeration(name: &str, constants: Vec<EnumConstant>) -> Enum {
    Enum {
        name: name.to_string(),
        constants,
        ..Default::default()
    }
}

pub fn structure(name: &str, fields: Vec<Field>) -> Struct {
    Struct {
        name: name.to_string(),
        fields,
        ..Default::default()
    }
}

pub fn class(name: &str, methods: Vec<Method>) -> Class {
    Class {
        name: name.to_string(),
        methods,
        has_default_constructor: true,
        ..Default::default()
    }
}

/// Collapse every whitespace run so layout differences do not matter.
pub fn squash(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
