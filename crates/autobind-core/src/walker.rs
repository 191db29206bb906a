//! AST Walker
//!
//! Visits the direct children of one designated namespace and appends the
//! declarations it finds to a [`DeclarationModel`]. Everything outside that
//! namespace, including the global scope, is ignored.
//!
//! The model is passed in and handed back by value so several translation
//! units can accumulate into one model, in file order, without shared state.

use tracing::{debug, trace};

use crate::ast::{Cursor, CursorKind};
use crate::doc_comment::{self, DocComment};
use crate::model::{
    Access, Annotations, Class, DeclarationModel, Enum, EnumConstant, Field, Function, Method,
    Parameter, Struct,
};

/// Walk one translation unit and append its declarations to `model`.
pub fn walk<C: Cursor>(root: C, namespace: &str, mut model: DeclarationModel) -> DeclarationModel {
    for scope in root.children() {
        if scope.kind() != CursorKind::Namespace || scope.spelling() != namespace {
            continue;
        }

        for cursor in scope.children() {
            match cursor.kind() {
                CursorKind::EnumDecl => {
                    let decl = extract_enum(&cursor);
                    debug!(name = %decl.name, constants = decl.constants.len(), "extracted enum");
                    model.enums.push(decl);
                }
                CursorKind::StructDecl => {
                    let decl = extract_struct(&cursor);
                    debug!(name = %decl.name, fields = decl.fields.len(), "extracted struct");
                    model.structs.push(decl);
                }
                CursorKind::ClassDecl => {
                    let decl = extract_class(&cursor);
                    debug!(name = %decl.name, methods = decl.methods.len(), "extracted class");
                    model.classes.push(decl);
                }
                CursorKind::FunctionDecl => {
                    let decl = extract_function(&cursor);
                    debug!(name = %decl.name, "extracted function");
                    model.functions.push(decl);
                }
                kind => trace!(?kind, name = %cursor.spelling(), "skipping declaration"),
            }
        }
    }

    model
}

fn annotations<C: Cursor>(cursor: &C) -> Annotations {
    cursor
        .children()
        .filter(|child| child.kind() == CursorKind::AnnotateAttr)
        .map(|child| child.spelling())
        .collect()
}

/// Brief comment from the front end, else the summary of the raw comment.
fn comment<C: Cursor>(cursor: &C) -> Option<String> {
    cursor
        .brief_comment()
        .filter(|brief| !brief.trim().is_empty())
        .or_else(|| cursor.raw_comment().and_then(|raw| doc_comment::summary(&raw)))
}

fn extract_enum<C: Cursor>(cursor: &C) -> Enum {
    let mut constants = Vec::new();
    let mut next_value: i64 = 0;

    for child in cursor.children() {
        if child.kind() != CursorKind::EnumConstantDecl {
            continue;
        }

        let value = child.enum_value().unwrap_or(next_value);
        next_value = value.wrapping_add(1);

        constants.push(EnumConstant {
            name: child.spelling(),
            annotations: annotations(&child),
            comment: comment(&child),
            value,
        });
    }

    Enum {
        name: cursor.spelling(),
        annotations: annotations(cursor),
        comment: comment(cursor),
        constants,
    }
}

/// Members shared by structs and classes.
#[derive(Default)]
struct Members {
    fields: Vec<Field>,
    methods: Vec<Method>,
    constructors: Vec<Method>,
    declared_constructors: usize,
    has_default_constructor: bool,
}

fn extract_members<C: Cursor>(cursor: &C, default_access: Access) -> Members {
    let owner = cursor.spelling();
    let mut members = Members::default();

    for child in cursor.children() {
        match child.kind() {
            CursorKind::FieldDecl => members.fields.push(extract_field(&child, default_access)),
            CursorKind::Method => members.methods.push(extract_method(&child, default_access)),
            CursorKind::Constructor => {
                members.declared_constructors += 1;
                let constructor = extract_method(&child, default_access);

                let is_copy = !owner.is_empty()
                    && constructor.parameters.iter().any(|p| p.ty.contains(&owner));
                if is_copy {
                    trace!(class = %owner, "skipping copy constructor");
                    continue;
                }

                if child.is_default_constructor() {
                    members.has_default_constructor = true;
                }
                members.constructors.push(constructor);
            }
            _ => {}
        }
    }

    members
}

fn extract_struct<C: Cursor>(cursor: &C) -> Struct {
    let members = extract_members(cursor, Access::Public);

    Struct {
        name: cursor.spelling(),
        annotations: annotations(cursor),
        comment: comment(cursor),
        fields: members.fields,
        methods: members.methods,
    }
}

fn extract_class<C: Cursor>(cursor: &C) -> Class {
    let members = extract_members(cursor, Access::Private);

    Class {
        name: cursor.spelling(),
        annotations: annotations(cursor),
        comment: comment(cursor),
        fields: members.fields,
        methods: members.methods,
        constructors: members.constructors,
        has_default_constructor: members.declared_constructors == 0
            || members.has_default_constructor,
    }
}

fn extract_field<C: Cursor>(cursor: &C, default_access: Access) -> Field {
    Field {
        name: cursor.spelling(),
        annotations: annotations(cursor),
        comment: comment(cursor),
        ty: cursor.type_spelling(),
        access: cursor.access().unwrap_or(default_access),
    }
}

fn extract_parameters<C: Cursor>(cursor: &C) -> Vec<Parameter> {
    cursor
        .children()
        .filter(|child| child.kind() == CursorKind::ParmDecl)
        .map(|child| Parameter {
            name: child.spelling(),
            annotations: annotations(&child),
            comment: None,
            ty: child.type_spelling(),
            has_default_value: child.children().any(|c| {
                let kind = c.kind();
                !kind.is_type_reference() && kind != CursorKind::AnnotateAttr
            }),
        })
        .collect()
}

/// Signature pieces shared by functions and methods, with doc tags applied.
struct Signature {
    comment: Option<String>,
    parameters: Vec<Parameter>,
    return_comment: Option<String>,
}

fn extract_signature<C: Cursor>(cursor: &C) -> Signature {
    let mut parameters = extract_parameters(cursor);
    let mut return_comment = None;

    let mined = cursor.raw_comment().map(|raw| DocComment::parse(&raw));
    if let Some(doc) = &mined {
        doc.apply(&mut parameters, &mut return_comment);
    }

    let comment = cursor
        .brief_comment()
        .filter(|brief| !brief.trim().is_empty())
        .or_else(|| mined.and_then(|doc| doc.summary));

    Signature {
        comment,
        parameters,
        return_comment,
    }
}

fn extract_function<C: Cursor>(cursor: &C) -> Function {
    let signature = extract_signature(cursor);

    Function {
        name: cursor.spelling(),
        annotations: annotations(cursor),
        comment: signature.comment,
        return_type: cursor.result_type_spelling(),
        parameters: signature.parameters,
        return_comment: signature.return_comment,
    }
}

fn extract_method<C: Cursor>(cursor: &C, default_access: Access) -> Method {
    let signature = extract_signature(cursor);

    Method {
        name: cursor.spelling(),
        annotations: annotations(cursor),
        comment: signature.comment,
        return_type: cursor.result_type_spelling(),
        parameters: signature.parameters,
        return_comment: signature.return_comment,
        access: cursor.access().unwrap_or(default_access),
        is_static: cursor.is_static_method(),
    }
}

#[cfg(test)]
#[path = "walker/walker_tests.rs"]
mod walker_tests;
