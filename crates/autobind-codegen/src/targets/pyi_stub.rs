//! Python stub (`.pyi`) target
//!
//! Mirrors the pybind11 module: the same declarations are selected, typed with
//! the canonical tags of the type map and documented with their doc comments.

use autobind_core::{
    Access, AutobindResult, Class, Decl, Enum, Field, Function, Method, Parameter, Struct,
};

use super::GENERATED_NOTICE;
use crate::helpers::Helpers;
use crate::template::RenderContext;

pub fn render(ctx: &RenderContext<'_>) -> AutobindResult<String> {
    let helpers = ctx.helpers();
    let marker = ctx.config().markers.binding.as_str();

    let mut blocks = Vec::new();
    for e in ctx.enums() {
        if helpers.is_bound(Decl::Enum(e), marker) {
            blocks.push(enum_stub(e, helpers));
        }
    }
    for s in ctx.structs() {
        if helpers.is_bound(Decl::Struct(s), marker) {
            blocks.push(struct_stub(s, helpers));
        }
    }
    for c in ctx.classes() {
        if helpers.is_bound(Decl::Class(c), marker) {
            blocks.push(class_stub(c, helpers));
        }
    }

    let functions: Vec<&Function> = ctx
        .functions()
        .iter()
        .filter(|f| helpers.is_bound(Decl::Function(f), marker))
        .filter(|f| !helpers.is_hidden(Decl::Function(f)))
        .collect();
    for f in &functions {
        let overloaded = functions.iter().filter(|o| o.name == f.name).count() > 1;
        let decorators: &[&str] = if overloaded { &["@overload"] } else { &[] };
        blocks.push(def_stub(
            &Signature {
                name: &f.name,
                params: helpers.stub_params(&f.parameters, true),
                returns: return_tag(&f.return_type, helpers),
                doc: signature_doc(f.comment.as_deref(), &f.parameters, f.return_comment.as_deref()),
            },
            decorators,
            0,
        ));
    }

    let mut code = format!("# {}\n", GENERATED_NOTICE);
    code.push_str("from __future__ import annotations\n\n");
    code.push_str("from enum import Enum\n");
    code.push_str("from typing import overload\n");
    for block in blocks {
        code.push_str("\n\n");
        code.push_str(&block);
        code.push('\n');
    }

    Ok(code)
}

/// Triple-quoted docstring, one line per entry, indented by `width`.
fn docstring(lines: &[String], width: usize) -> String {
    let pad = " ".repeat(width);
    let mut code = format!("{pad}\"\"\"\n");
    for line in lines {
        if line.is_empty() {
            code.push('\n');
        } else {
            code.push_str(&format!("{pad}    {}\n", line.replace("\"\"\"", "\\\"\\\"\\\"")));
        }
    }
    code.push_str(&format!("{pad}\"\"\"\n"));
    code
}

fn comment_lines(comment: Option<&str>) -> Vec<String> {
    comment
        .filter(|c| !c.trim().is_empty())
        .map(|c| c.lines().map(|l| l.trim().to_string()).collect())
        .unwrap_or_default()
}

fn return_tag(return_type: &str, helpers: &Helpers<'_>) -> String {
    if return_type.trim().is_empty() {
        "None".to_string()
    } else {
        helpers.convert(return_type)
    }
}

/// Summary followed by `:param:` / `:return:` lines for documented pieces.
fn signature_doc(
    summary: Option<&str>,
    params: &[Parameter],
    return_comment: Option<&str>,
) -> Vec<String> {
    let mut lines = comment_lines(summary);

    let mut tags: Vec<String> = params
        .iter()
        .filter_map(|p| {
            p.comment
                .as_deref()
                .map(|c| format!(":param {}: {}", p.name, c))
        })
        .collect();
    if let Some(returns) = return_comment {
        tags.push(format!(":return: {}", returns));
    }

    if !tags.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(tags);
    }
    lines
}

pub(crate) fn enum_stub(e: &Enum, helpers: &Helpers<'_>) -> String {
    let mut code = format!("class {}(Enum):\n", e.name);
    let doc = comment_lines(e.comment.as_deref());
    if !doc.is_empty() {
        code.push_str(&docstring(&doc, 4));
    }

    let mut constants = 0;
    for c in &e.constants {
        if helpers.is_hidden(Decl::EnumConstant(c)) {
            continue;
        }
        constants += 1;
        code.push_str(&format!("    {} = {}\n", c.name, c.value));
        let doc = comment_lines(c.comment.as_deref());
        if !doc.is_empty() {
            code.push_str(&docstring(&doc, 4));
        }
    }

    if constants == 0 && doc.is_empty() {
        code.push_str("    ...\n");
    }
    code.trim_end().to_string()
}

/// Parts of one `def` line and its docstring.
struct Signature<'s> {
    name: &'s str,
    params: String,
    returns: String,
    doc: Vec<String>,
}

fn def_stub(sig: &Signature<'_>, decorators: &[&str], width: usize) -> String {
    let pad = " ".repeat(width);
    let mut code = String::new();
    for decorator in decorators {
        code.push_str(&format!("{pad}{decorator}\n"));
    }

    let def = format!("{pad}def {}({}) -> {}", sig.name, sig.params, sig.returns);
    if sig.doc.is_empty() {
        code.push_str(&format!("{def}: ...\n"));
    } else {
        code.push_str(&format!("{def}:\n"));
        code.push_str(&docstring(&sig.doc, width + 4));
        code.push_str(&format!("{pad}    ...\n"));
    }
    code.trim_end().to_string()
}

fn field_stubs(fields: &[Field], helpers: &Helpers<'_>) -> Vec<String> {
    fields
        .iter()
        .filter(|f| f.access == Access::Public && !helpers.is_hidden(Decl::Field(f)))
        .map(|f| {
            let mut code = format!("    {}: {}\n", f.name, helpers.convert(&f.ty));
            let doc = comment_lines(f.comment.as_deref());
            if !doc.is_empty() {
                code.push_str(&docstring(&doc, 4));
            }
            code.trim_end().to_string()
        })
        .collect()
}

fn constructor_stubs(constructors: &[&Method], helpers: &Helpers<'_>) -> Vec<String> {
    let overloaded = constructors.len() > 1;
    constructors
        .iter()
        .map(|ctor| {
            let decorators: &[&str] = if overloaded { &["@overload"] } else { &[] };
            def_stub(
                &Signature {
                    name: "__init__",
                    params: helpers.stub_params(&ctor.parameters, false),
                    returns: "None".to_string(),
                    doc: signature_doc(ctor.comment.as_deref(), &ctor.parameters, None),
                },
                decorators,
                4,
            )
        })
        .collect()
}

fn method_stubs(owner: Decl<'_>, methods: &[Method], helpers: &Helpers<'_>) -> Vec<String> {
    let marker = helpers.config().markers.binding.as_str();
    let bound: Vec<&Method> = methods
        .iter()
        .filter(|m| m.access == Access::Public)
        .filter(|m| helpers.is_bound(Decl::Method(m), marker))
        .filter(|m| !helpers.is_hidden(Decl::Method(m)))
        .collect();

    bound
        .iter()
        .map(|m| {
            let is_static = helpers.is_static(m, owner);
            let overloaded = bound.iter().filter(|o| o.name == m.name).count() > 1;

            let mut decorators = Vec::new();
            if overloaded {
                decorators.push("@overload");
            }
            if is_static {
                decorators.push("@staticmethod");
            }

            def_stub(
                &Signature {
                    name: &m.name,
                    params: helpers.stub_params(&m.parameters, is_static),
                    returns: return_tag(&m.return_type, helpers),
                    doc: signature_doc(
                        m.comment.as_deref(),
                        &m.parameters,
                        m.return_comment.as_deref(),
                    ),
                },
                &decorators,
                4,
            )
        })
        .collect()
}

/// Class header, docstring and member sections separated by blank lines.
fn class_body(name: &str, comment: Option<&str>, sections: Vec<Vec<String>>) -> String {
    let mut code = format!("class {}:\n", name);
    let doc = comment_lines(comment);
    if !doc.is_empty() {
        code.push_str(&docstring(&doc, 4));
    }

    let members: Vec<String> = sections
        .into_iter()
        .filter(|section| !section.is_empty())
        .map(|section| section.join("\n"))
        .collect();

    if members.is_empty() {
        if doc.is_empty() {
            code.push_str("    ...\n");
        }
    } else {
        code.push_str(&members.join("\n\n"));
        code.push('\n');
    }
    code.trim_end().to_string()
}

pub(crate) fn struct_stub(s: &Struct, helpers: &Helpers<'_>) -> String {
    let init = def_stub(
        &Signature {
            name: "__init__",
            params: "self".to_string(),
            returns: "None".to_string(),
            doc: Vec::new(),
        },
        &[],
        4,
    );

    class_body(
        &s.name,
        s.comment.as_deref(),
        vec![
            field_stubs(&s.fields, helpers),
            vec![init],
            method_stubs(Decl::Struct(s), &s.methods, helpers),
        ],
    )
}

pub(crate) fn class_stub(c: &Class, helpers: &Helpers<'_>) -> String {
    let owner = Decl::Class(c);

    let constructors = if helpers.is_singleton(owner) {
        Vec::new()
    } else {
        let retained: Vec<&Method> = c
            .constructors
            .iter()
            .filter(|ctor| ctor.access == Access::Public)
            .filter(|ctor| !helpers.is_hidden(Decl::Method(ctor)))
            .collect();

        if c.constructors.is_empty() && c.has_default_constructor {
            vec![def_stub(
                &Signature {
                    name: "__init__",
                    params: "self".to_string(),
                    returns: "None".to_string(),
                    doc: Vec::new(),
                },
                &[],
                4,
            )]
        } else {
            constructor_stubs(&retained, helpers)
        }
    };

    class_body(
        &c.name,
        c.comment.as_deref(),
        vec![
            field_stubs(&c.fields, helpers),
            constructors,
            method_stubs(owner, &c.methods, helpers),
        ],
    )
}

#[cfg(test)]
#[path = "pyi_stub/pyi_stub_tests.rs"]
mod pyi_stub_tests;
