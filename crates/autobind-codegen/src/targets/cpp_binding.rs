//! pybind11 module target
//!
//! Emits one `PYBIND11_MODULE` holding every declaration that carries the
//! binding marker:
//!
//! ```text
//! py::class_<Point>(m, "Point", "Point structure")
//!     .def(py::init<>())
//!     .def_readwrite("x", &Point::x , "X coordinate" );
//! ```

use autobind_core::{Access, AutobindResult, Class, Decl, Enum, Field, Function, Method, Struct};

use super::{GENERATED_NOTICE, cpp_string, indent};
use crate::helpers::Helpers;
use crate::template::RenderContext;

pub fn render(ctx: &RenderContext<'_>) -> AutobindResult<String> {
    let helpers = ctx.helpers();
    let config = ctx.config();
    let marker = config.markers.binding.as_str();

    let mut blocks = Vec::new();
    for e in ctx.enums() {
        if helpers.is_bound(Decl::Enum(e), marker) {
            blocks.push(enum_binding(e, helpers));
        }
    }
    for s in ctx.structs() {
        if helpers.is_bound(Decl::Struct(s), marker) {
            blocks.push(struct_binding(s, helpers));
        }
    }
    for c in ctx.classes() {
        if helpers.is_bound(Decl::Class(c), marker) {
            blocks.push(class_binding(c, helpers));
        }
    }

    let functions: Vec<&Function> = ctx
        .functions()
        .iter()
        .filter(|f| helpers.is_bound(Decl::Function(f), marker))
        .filter(|f| !helpers.is_hidden(Decl::Function(f)))
        .collect();
    let function_lines: Vec<String> = functions
        .iter()
        .map(|f| {
            let overloaded = functions.iter().filter(|o| o.name == f.name).count() > 1;
            function_binding(f, overloaded, helpers)
        })
        .collect();
    if !function_lines.is_empty() {
        blocks.push(function_lines.join("\n"));
    }

    let mut code = format!("// {}\n\n", GENERATED_NOTICE);
    code.push_str("#include <pybind11/pybind11.h>\n");
    code.push_str("#include <pybind11/stl.h>\n");
    for include in &config.codegen.includes {
        code.push_str(&format!("#include \"{}\"\n", include));
    }
    code.push_str("\nnamespace py = pybind11;\n");
    code.push_str(&format!("using namespace {};\n\n", config.parser.namespace));
    code.push_str(&format!(
        "PYBIND11_MODULE({}, m)\n{{\n",
        config.codegen.module_name
    ));
    let body = blocks
        .iter()
        .map(|block| indent(block, 4))
        .collect::<Vec<_>>()
        .join("\n\n");
    if !body.is_empty() {
        code.push_str(&body);
        code.push('\n');
    }
    code.push_str("}\n");

    Ok(code)
}

/// Join a receiver expression and its `.method(...)` links into one statement.
fn chain(head: String, links: Vec<String>) -> String {
    let mut code = head;
    for link in links {
        code.push_str("\n    ");
        code.push_str(&link);
    }
    code.push(';');
    code
}

fn doc(comment: Option<&str>) -> String {
    cpp_string(comment.unwrap_or(""))
}

pub(crate) fn enum_binding(e: &Enum, helpers: &Helpers<'_>) -> String {
    let head = format!(
        "py::enum_<{0}>(m, \"{0}\", py::arithmetic(), \"{1}\")",
        e.name,
        doc(e.comment.as_deref())
    );

    let mut links: Vec<String> = e
        .constants
        .iter()
        .filter(|c| !helpers.is_hidden(Decl::EnumConstant(c)))
        .map(|c| {
            format!(
                ".value(\"{1}\", {0}::{1} , \"{2}\" )",
                e.name,
                c.name,
                doc(c.comment.as_deref())
            )
        })
        .collect();
    links.push(".export_values()".to_string());

    chain(head, links)
}

pub(crate) fn struct_binding(s: &Struct, helpers: &Helpers<'_>) -> String {
    let head = format!(
        "py::class_<{0}>(m, \"{0}\", \"{1}\")",
        s.name,
        doc(s.comment.as_deref())
    );

    let mut links = vec![".def(py::init<>())".to_string()];
    links.extend(field_links(&s.name, &s.fields, helpers));
    links.extend(method_links(&s.name, Decl::Struct(s), &s.methods, helpers));

    chain(head, links)
}

pub(crate) fn class_binding(c: &Class, helpers: &Helpers<'_>) -> String {
    let owner = Decl::Class(c);
    let head = format!(
        "py::class_<{0}>(m, \"{0}\", \"{1}\")",
        c.name,
        doc(c.comment.as_deref())
    );

    let mut links = Vec::new();
    if !helpers.is_singleton(owner) {
        let constructors: Vec<&Method> = c
            .constructors
            .iter()
            .filter(|ctor| ctor.access == Access::Public)
            .filter(|ctor| !helpers.is_hidden(Decl::Method(ctor)))
            .collect();

        // Only an implicit default constructor falls back to `py::init<>()`.
        if c.constructors.is_empty() && c.has_default_constructor {
            links.push(".def(py::init<>())".to_string());
        }
        for ctor in constructors {
            links.push(format!(
                ".def(py::init<{}>())",
                helpers.param_types(&ctor.parameters)
            ));
        }
    }
    links.extend(field_links(&c.name, &c.fields, helpers));
    links.extend(method_links(&c.name, owner, &c.methods, helpers));

    chain(head, links)
}

fn field_links(owner: &str, fields: &[Field], helpers: &Helpers<'_>) -> Vec<String> {
    fields
        .iter()
        .filter(|f| f.access == Access::Public && !helpers.is_hidden(Decl::Field(f)))
        .map(|f| {
            format!(
                ".def_readwrite(\"{1}\", &{0}::{1} , \"{2}\" )",
                owner,
                f.name,
                doc(f.comment.as_deref())
            )
        })
        .collect()
}

fn method_links(
    owner_name: &str,
    owner: Decl<'_>,
    methods: &[Method],
    helpers: &Helpers<'_>,
) -> Vec<String> {
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
            let overloaded = bound.iter().filter(|o| o.name == m.name).count() > 1;
            method_link(owner_name, owner, m, overloaded, helpers)
        })
        .collect()
}

fn method_link(
    owner_name: &str,
    owner: Decl<'_>,
    method: &Method,
    overloaded: bool,
    helpers: &Helpers<'_>,
) -> String {
    let comment = doc(method.comment.as_deref());

    if helpers.is_singleton(owner) && !method.is_static {
        let accessor = &helpers.config().codegen.singleton_accessor;
        return format!(
            ".def_static(\"{name}\", []({params}) {{\n        return {owner}::{accessor}()->{name}({args});\n    }} , \"{comment}\" )",
            name = method.name,
            params = helpers.native_params(&method.parameters),
            owner = owner_name,
            accessor = accessor,
            args = helpers.forward_args(&method.parameters, true),
            comment = comment,
        );
    }

    let def = if method.is_static { "def_static" } else { "def" };
    format!(
        ".{}(\"{}\", {} , \"{}\" )",
        def,
        method.name,
        member_pointer(owner_name, method, overloaded, helpers),
        comment
    )
}

fn member_pointer(
    owner_name: &str,
    method: &Method,
    overloaded: bool,
    helpers: &Helpers<'_>,
) -> String {
    let pointer = format!("&{}::{}", owner_name, method.name);
    if overloaded {
        format!(
            "py::overload_cast<{}>({})",
            helpers.param_types(&method.parameters),
            pointer
        )
    } else {
        pointer
    }
}

pub(crate) fn function_binding(f: &Function, overloaded: bool, helpers: &Helpers<'_>) -> String {
    let pointer = if overloaded {
        format!(
            "py::overload_cast<{}>(&{})",
            helpers.param_types(&f.parameters),
            f.name
        )
    } else {
        format!("&{}", f.name)
    };

    format!(
        "m.def(\"{}\", {} , \"{}\" );",
        f.name,
        pointer,
        doc(f.comment.as_deref())
    )
}
