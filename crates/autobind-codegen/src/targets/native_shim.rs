//! Python C-API shim target
//!
//! Emits plain `PyArg_ParseTuple` wrappers for test entry points: free
//! functions carrying the native-shim marker and static (or singleton) methods
//! of marked classes. Every json struct additionally gets a capsule-backed
//! object with `Create_`, `ToString_` and `FromString_` entry points.

use std::collections::HashSet;

use autobind_core::type_map::normalize;
use autobind_core::{Access, AutobindResult, Decl, Method, Parameter};

use super::{GENERATED_NOTICE, cpp_string};
use crate::helpers::Helpers;
use crate::template::RenderContext;

/// One generated `PyObject *(PyObject *, PyObject *)` entry point.
struct Wrapper<'m> {
    name: String,
    callee: String,
    params: &'m [Parameter],
    return_type: &'m str,
    doc: Option<&'m str>,
}

/// Row of the `PyMethodDef` table.
struct Entry {
    name: String,
    function: String,
    doc: String,
}

pub fn render(ctx: &RenderContext<'_>) -> AutobindResult<String> {
    let helpers = ctx.helpers();
    let config = ctx.config();
    let marker = config.markers.native_shim.as_str();
    let module = &config.codegen.module_name;

    let mut blocks = Vec::new();
    let mut entries = Vec::new();

    for name in helpers.json_structs(ctx.model()) {
        blocks.push(json_object(name, helpers));
        for (prefix, doc) in [
            ("Create", "Create a default"),
            ("ToString", "Serialize a"),
            ("FromString", "Deserialize a"),
        ] {
            entries.push(Entry {
                name: format!("{}_{}", prefix, name),
                function: format!("Py_{}_{}", prefix, name),
                doc: format!("{} {}.", doc, name),
            });
        }
    }

    let mut wrappers = Vec::new();
    for f in ctx.functions() {
        let decl = Decl::Function(f);
        if helpers.is_bound(decl, marker) && !helpers.is_hidden(decl) {
            wrappers.push(Wrapper {
                name: f.name.clone(),
                callee: f.name.clone(),
                params: &f.parameters,
                return_type: &f.return_type,
                doc: f.comment.as_deref(),
            });
        }
    }
    for s in ctx.structs() {
        wrappers.extend(method_wrappers(&s.name, Decl::Struct(s), &s.methods, helpers));
    }
    for c in ctx.classes() {
        wrappers.extend(method_wrappers(&c.name, Decl::Class(c), &c.methods, helpers));
    }

    // Numbered names skip every name a declaration already claims.
    let mut taken: HashSet<String> = entries
        .iter()
        .map(|e| e.name.clone())
        .chain(wrappers.iter().map(|w| w.name.clone()))
        .collect();
    let mut emitted: HashSet<String> = entries.iter().map(|e| e.name.clone()).collect();
    for mut w in wrappers {
        if !emitted.insert(w.name.clone()) {
            let mut n = 2;
            while taken.contains(&format!("{}_{}", w.name, n)) {
                n += 1;
            }
            w.name = format!("{}_{}", w.name, n);
            taken.insert(w.name.clone());
            emitted.insert(w.name.clone());
        }

        blocks.push(wrapper(&w, helpers)?);
        entries.push(Entry {
            function: format!("Py_{}", w.name),
            doc: cpp_string(w.doc.unwrap_or("")),
            name: w.name,
        });
    }

    let mut code = format!("// {}\n\n", GENERATED_NOTICE);
    code.push_str("#define PY_SSIZE_T_CLEAN\n");
    code.push_str("#include <Python.h>\n");
    for include in &config.codegen.includes {
        code.push_str(&format!("#include \"{}\"\n", include));
    }
    code.push_str(&format!("\nusing namespace {};\n", config.parser.namespace));

    for block in blocks {
        code.push('\n');
        code.push_str(&block);
    }

    code.push('\n');
    code.push_str(&method_table(module, &entries));
    code.push('\n');
    code.push_str(&module_init(module));
    Ok(code)
}

/// Static and singleton methods reachable through the shim.
///
/// A method qualifies when it or its owner carries the marker.
fn method_wrappers<'m>(
    owner_name: &str,
    owner: Decl<'m>,
    methods: &'m [Method],
    helpers: &Helpers<'_>,
) -> Vec<Wrapper<'m>> {
    let marker = helpers.config().markers.native_shim.as_str();
    let owner_marked = helpers.is_bound(owner, marker);
    let accessor = &helpers.config().codegen.singleton_accessor;

    methods
        .iter()
        .filter(|m| m.access == Access::Public)
        .filter(|m| owner_marked || helpers.is_bound(Decl::Method(m), marker))
        .filter(|m| !helpers.is_hidden(Decl::Method(m)))
        .filter(|m| helpers.is_static(m, owner))
        .map(|m| {
            let callee = if m.is_static {
                format!("{}::{}", owner_name, m.name)
            } else {
                format!("{}::{}()->{}", owner_name, accessor, m.name)
            };
            Wrapper {
                name: format!("{}_{}", owner_name, m.name),
                callee,
                params: &m.parameters,
                return_type: &m.return_type,
                doc: m.comment.as_deref(),
            }
        })
        .collect()
}

/// Local variable type that `PyArg_ParseTuple` writes for a format tag.
fn local_type(tag: &str) -> &'static str {
    match tag {
        "f" => "float ",
        "s" => "const char *",
        "b" => "unsigned char ",
        _ => "int ",
    }
}

fn parse_args(params: &[Parameter], helpers: &Helpers<'_>) -> AutobindResult<String> {
    let mut code = String::new();
    for p in params {
        let tag = helpers.format_tag(&p.ty)?;
        code.push_str(&format!("    {}{};\n", local_type(tag), p.name));
    }

    let targets: String = params.iter().map(|p| format!(", &{}", p.name)).collect();
    code.push_str(&format!(
        "    if (!PyArg_ParseTuple(args, \"{}\"{}))\n",
        helpers.format_string(params)?,
        targets
    ));
    code.push_str("    {\n        return nullptr;\n    }\n\n");
    Ok(code)
}

/// Conversion of `result` back into a Python object.
fn return_value(return_type: &str, helpers: &Helpers<'_>) -> AutobindResult<String> {
    let value = match helpers.format_tag(return_type)? {
        "i" => "PyLong_FromLongLong(static_cast<long long>(result))".to_string(),
        "f" => "PyFloat_FromDouble(static_cast<double>(result))".to_string(),
        "b" => "PyBool_FromLong(result ? 1 : 0)".to_string(),
        "s" => {
            let normalized = normalize(return_type);
            if normalized.starts_with("char") {
                "PyUnicode_FromString(result)".to_string()
            } else {
                format!(
                    "PyUnicode_FromString(result.{})",
                    helpers.config().codegen.string_view
                )
            }
        }
        _ => return Ok(String::new()),
    };
    Ok(value)
}

fn wrapper(w: &Wrapper<'_>, helpers: &Helpers<'_>) -> AutobindResult<String> {
    let mut code = format!(
        "static PyObject *Py_{}(PyObject *self, PyObject *args)\n{{\n",
        w.name
    );
    code.push_str(&parse_args(w.params, helpers)?);

    let call = format!("{}({})", w.callee, helpers.forward_args(w.params, false));
    let value = return_value(w.return_type, helpers)?;
    if value.is_empty() {
        code.push_str(&format!("    {};\n\n", call));
        code.push_str("    Py_RETURN_NONE;\n");
    } else {
        code.push_str(&format!("    auto result = {};\n", call));
        code.push_str(&format!("    return {};\n", value));
    }

    code.push_str("}\n");
    Ok(code)
}

fn json_object(name: &str, helpers: &Helpers<'_>) -> String {
    let config = helpers.config();
    let capsule = format!("{}.{}", config.parser.namespace, name);
    let string_view = &config.codegen.string_view;

    let mut code = String::new();
    code.push_str(&format!(
        "static void Destroy_{0}(PyObject *capsule)\n{{\n    delete static_cast<{0} *>(PyCapsule_GetPointer(capsule, \"{1}\"));\n}}\n\n",
        name, capsule
    ));

    code.push_str(&format!(
        "static PyObject *Py_Create_{}(PyObject *self, PyObject *args)\n{{\n",
        name
    ));
    code.push_str("    if (!PyArg_ParseTuple(args, \"\"))\n");
    code.push_str("    {\n        return nullptr;\n    }\n\n");
    code.push_str(&format!(
        "    return PyCapsule_New(new {0}{{}}, \"{1}\", Destroy_{0});\n}}\n\n",
        name, capsule
    ));

    code.push_str(&format!(
        "static PyObject *Py_ToString_{}(PyObject *self, PyObject *args)\n{{\n",
        name
    ));
    code.push_str("    PyObject *capsule;\n");
    code.push_str("    if (!PyArg_ParseTuple(args, \"O\", &capsule))\n");
    code.push_str("    {\n        return nullptr;\n    }\n\n");
    code.push_str(&format!(
        "    auto *value = static_cast<{}*>(PyCapsule_GetPointer(capsule, \"{}\"));\n",
        name, capsule
    ));
    code.push_str("    if (value == nullptr)\n    {\n        return nullptr;\n    }\n\n");
    code.push_str(&format!(
        "    const String text = ToString<{}>(*value);\n",
        name
    ));
    code.push_str(&format!(
        "    return PyUnicode_FromString(text.{});\n}}\n\n",
        string_view
    ));

    code.push_str(&format!(
        "static PyObject *Py_FromString_{}(PyObject *self, PyObject *args)\n{{\n",
        name
    ));
    code.push_str("    const char *text;\n");
    code.push_str("    if (!PyArg_ParseTuple(args, \"s\", &text))\n");
    code.push_str("    {\n        return nullptr;\n    }\n\n");
    code.push_str(&format!(
        "    auto *value = new {0}{{FromString<{0}>(String(text))}};\n",
        name
    ));
    code.push_str(&format!(
        "    return PyCapsule_New(value, \"{}\", Destroy_{});\n}}\n",
        capsule, name
    ));
    code
}

fn method_table(module: &str, entries: &[Entry]) -> String {
    let mut code = format!("static PyMethodDef {}Methods[] = {{\n", module);
    for e in entries {
        code.push_str(&format!(
            "    {{\"{}\", {}, METH_VARARGS, \"{}\"}},\n",
            e.name, e.function, e.doc
        ));
    }
    code.push_str("    {nullptr, nullptr, 0, nullptr}\n};\n");
    code
}

fn module_init(module: &str) -> String {
    let mut code = format!("static struct PyModuleDef {}Module = {{\n", module);
    code.push_str("    PyModuleDef_HEAD_INIT,\n");
    code.push_str(&format!("    \"{}\",\n", module));
    code.push_str("    nullptr,\n");
    code.push_str("    -1,\n");
    code.push_str(&format!("    {}Methods\n}};\n\n", module));
    code.push_str(&format!("PyMODINIT_FUNC PyInit_{}(void)\n{{\n", module));
    code.push_str(&format!("    return PyModule_Create(&{}Module);\n}}\n", module));
    code
}
