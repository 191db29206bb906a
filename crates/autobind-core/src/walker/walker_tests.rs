#![allow(non_snake_case)]

use super::*;

/// Hand-built syntax tree node.
#[derive(Debug, Clone)]
struct Node {
    kind: CursorKind,
    spelling: String,
    ty: String,
    result: String,
    access: Option<Access>,
    is_static: bool,
    is_default_constructor: bool,
    value: Option<i64>,
    brief: Option<String>,
    raw: Option<String>,
    children: Vec<Node>,
}

fn node(kind: CursorKind, spelling: &str) -> Node {
    Node {
        kind,
        spelling: spelling.to_string(),
        ty: String::new(),
        result: String::new(),
        access: None,
        is_static: false,
        is_default_constructor: false,
        value: None,
        brief: None,
        raw: None,
        children: Vec::new(),
    }
}

impl Node {
    fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    fn annotate(self, marker: &str) -> Self {
        self.child(node(CursorKind::AnnotateAttr, marker))
    }

    fn ty(mut self, ty: &str) -> Self {
        self.ty = ty.to_string();
        self
    }

    fn returns(mut self, ty: &str) -> Self {
        self.result = ty.to_string();
        self
    }

    fn access(mut self, access: Access) -> Self {
        self.access = Some(access);
        self
    }

    fn value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    fn brief(mut self, text: &str) -> Self {
        self.brief = Some(text.to_string());
        self
    }

    fn raw(mut self, text: &str) -> Self {
        self.raw = Some(text.to_string());
        self
    }

    fn default_constructor(mut self) -> Self {
        self.is_default_constructor = true;
        self
    }

    fn param(self, name: &str, ty: &str) -> Self {
        self.child(node(CursorKind::ParmDecl, name).ty(ty))
    }
}

impl<'a> Cursor for &'a Node {
    fn kind(&self) -> CursorKind {
        self.kind
    }

    fn spelling(&self) -> String {
        self.spelling.clone()
    }

    fn type_spelling(&self) -> String {
        self.ty.clone()
    }

    fn result_type_spelling(&self) -> String {
        self.result.clone()
    }

    fn access(&self) -> Option<Access> {
        self.access
    }

    fn is_static_method(&self) -> bool {
        self.is_static
    }

    fn is_default_constructor(&self) -> bool {
        self.is_default_constructor
    }

    fn enum_value(&self) -> Option<i64> {
        self.value
    }

    fn brief_comment(&self) -> Option<String> {
        self.brief.clone()
    }

    fn raw_comment(&self) -> Option<String> {
        self.raw.clone()
    }

    fn children(&self) -> impl Iterator<Item = Self> {
        let node: &'a Node = *self;
        node.children.iter()
    }
}

fn unit(declarations: Vec<Node>) -> Node {
    let namespace = declarations
        .into_iter()
        .fold(node(CursorKind::Namespace, "rpp"), Node::child);
    node(CursorKind::TranslationUnit, "test.h").child(namespace)
}

fn walk_unit(root: &Node) -> DeclarationModel {
    walk(root, "rpp", DeclarationModel::new())
}

#[test]
fn walk___enum_constants___default_to_previous_plus_one() {
    let root = unit(vec![
        node(CursorKind::EnumDecl, "Color")
            .child(node(CursorKind::EnumConstantDecl, "A"))
            .child(node(CursorKind::EnumConstantDecl, "B"))
            .child(node(CursorKind::EnumConstantDecl, "C").value(10)),
    ]);

    let model = walk_unit(&root);

    let values: Vec<i64> = model.enums[0].constants.iter().map(|c| c.value).collect();
    assert_eq!(values, vec![0, 1, 10]);
}

#[test]
fn walk___enum_constants___continue_after_explicit_value() {
    let root = unit(vec![
        node(CursorKind::EnumDecl, "Mode")
            .child(node(CursorKind::EnumConstantDecl, "Read").value(5))
            .child(node(CursorKind::EnumConstantDecl, "Write"))
            .child(node(CursorKind::EnumConstantDecl, "Both").value(-1))
            .child(node(CursorKind::EnumConstantDecl, "None")),
    ]);

    let model = walk_unit(&root);

    let values: Vec<i64> = model.enums[0].constants.iter().map(|c| c.value).collect();
    assert_eq!(values, vec![5, 6, -1, 0]);
}

#[test]
fn walk___enum___reads_annotations_and_comments() {
    let root = unit(vec![
        node(CursorKind::EnumDecl, "Color")
            .annotate("python")
            .annotate("javascript")
            .raw("/// @brief Color enum")
            .child(node(CursorKind::EnumConstantDecl, "RED"))
            .child(node(CursorKind::EnumConstantDecl, "GREEN").raw("///< Green color"))
            .child(
                node(CursorKind::EnumConstantDecl, "BLUE")
                    .annotate("hide")
                    .value(10),
            ),
    ]);

    let model = walk_unit(&root);

    let color = &model.enums[0];
    assert_eq!(color.comment.as_deref(), Some("Color enum"));
    assert_eq!(
        color.annotations.iter().collect::<Vec<_>>(),
        vec!["python", "javascript"]
    );
    assert_eq!(color.constants[0].comment, None);
    assert_eq!(color.constants[1].comment.as_deref(), Some("Green color"));
    assert!(color.constants[2].annotations.contains("hide"));
}

#[test]
fn walk___empty_enum___has_no_constants() {
    let root = unit(vec![node(CursorKind::EnumDecl, "EmptyEnum").annotate("python")]);

    let model = walk_unit(&root);

    assert!(model.enums[0].constants.is_empty());
}

#[test]
fn walk___copy_constructor___is_excluded() {
    let root = unit(vec![
        node(CursorKind::ClassDecl, "Point")
            .child(node(CursorKind::Constructor, "Point").default_constructor())
            .child(node(CursorKind::Constructor, "Point").param("other", "const Point &")),
    ]);

    let model = walk_unit(&root);

    let point = &model.classes[0];
    assert_eq!(point.constructors.len(), 1);
    assert!(point.constructors[0].parameters.is_empty());
    assert!(point.has_default_constructor);
}

#[test]
fn walk___class_without_constructors___has_default_constructor() {
    let root = unit(vec![node(CursorKind::ClassDecl, "Timer")]);

    let model = walk_unit(&root);

    assert!(model.classes[0].has_default_constructor);
    assert!(model.classes[0].constructors.is_empty());
}

#[test]
fn walk___class_with_only_parameterized_constructor___has_no_default() {
    let root = unit(vec![
        node(CursorKind::ClassDecl, "Buffer")
            .child(node(CursorKind::Constructor, "Buffer").param("size", "u32")),
    ]);

    let model = walk_unit(&root);

    assert!(!model.classes[0].has_default_constructor);
    assert_eq!(model.classes[0].constructors.len(), 1);
}

#[test]
fn walk___class_with_only_copy_constructor___has_no_default() {
    let root = unit(vec![
        node(CursorKind::ClassDecl, "Handle")
            .child(node(CursorKind::Constructor, "Handle").param("other", "const Handle &")),
    ]);

    let model = walk_unit(&root);

    assert!(!model.classes[0].has_default_constructor);
    assert!(model.classes[0].constructors.is_empty());
}

#[test]
fn walk___struct_members___keep_access_and_order() {
    let root = unit(vec![
        node(CursorKind::StructDecl, "Point")
            .annotate("python")
            .child(
                node(CursorKind::FieldDecl, "x")
                    .ty("int")
                    .access(Access::Public)
                    .annotate("hide"),
            )
            .child(node(CursorKind::FieldDecl, "y").ty("int").access(Access::Public))
            .child(
                node(CursorKind::FieldDecl, "protectedField")
                    .ty("float")
                    .access(Access::Protected),
            )
            .child(
                node(CursorKind::Method, "PrintHello")
                    .returns("void")
                    .access(Access::Protected),
            )
            .child(
                node(CursorKind::Method, "SetX")
                    .returns("void")
                    .access(Access::Protected)
                    .param("newX", "int"),
            )
            .child(node(CursorKind::FieldDecl, "z").ty("int").access(Access::Private)),
    ]);

    let model = walk_unit(&root);

    let point = &model.structs[0];
    let fields: Vec<(&str, &str, Access)> = point
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.ty.as_str(), f.access))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("x", "int", Access::Public),
            ("y", "int", Access::Public),
            ("protectedField", "float", Access::Protected),
            ("z", "int", Access::Private),
        ]
    );
    assert!(point.fields[0].annotations.contains("hide"));
    assert_eq!(point.methods.len(), 2);
    assert_eq!(point.methods[0].access, Access::Protected);
    assert_eq!(point.methods[1].parameters[0].name, "newX");
}

#[test]
fn walk___missing_access___defaults_by_declaration_kind() {
    let root = unit(vec![
        node(CursorKind::StructDecl, "S").child(node(CursorKind::FieldDecl, "a").ty("int")),
        node(CursorKind::ClassDecl, "C").child(node(CursorKind::FieldDecl, "b").ty("int")),
    ]);

    let model = walk_unit(&root);

    assert_eq!(model.structs[0].fields[0].access, Access::Public);
    assert_eq!(model.classes[0].fields[0].access, Access::Private);
}

#[test]
fn walk___function_doc_comment___fills_parameters_and_return() {
    let raw = "/** @brief Multiplies two integers, with an optional second parameter.
     * @param a The first integer.
     * @param b The second integer, default is 2.
     * @param ghost Not a parameter.
     * @return The product of a and b.
     */";
    let root = unit(vec![
        node(CursorKind::FunctionDecl, "Multiply")
            .annotate("python")
            .returns("int")
            .raw(raw)
            .param("a", "int")
            .child(
                node(CursorKind::ParmDecl, "b")
                    .ty("int")
                    .child(node(CursorKind::Expression, "")),
            ),
    ]);

    let model = walk_unit(&root);

    let multiply = &model.functions[0];
    assert_eq!(
        multiply.comment.as_deref(),
        Some("Multiplies two integers, with an optional second parameter.")
    );
    assert_eq!(multiply.return_type, "int");
    assert_eq!(
        multiply.parameters[0].comment.as_deref(),
        Some("The first integer.")
    );
    assert!(!multiply.parameters[0].has_default_value);
    assert_eq!(
        multiply.parameters[1].comment.as_deref(),
        Some("The second integer, default is 2.")
    );
    assert!(multiply.parameters[1].has_default_value);
    assert_eq!(
        multiply.return_comment.as_deref(),
        Some("The product of a and b.")
    );
}

#[test]
fn walk___type_reference_children___are_not_default_values() {
    let root = unit(vec![
        node(CursorKind::FunctionDecl, "Open").returns("FileHandle").child(
            node(CursorKind::ParmDecl, "path")
                .ty("const String &")
                .child(node(CursorKind::NamespaceRef, "rpp"))
                .child(node(CursorKind::TypeRef, "String")),
        ),
    ]);

    let model = walk_unit(&root);

    assert!(!model.functions[0].parameters[0].has_default_value);
}

#[test]
fn walk___brief_comment_from_front_end___wins_over_raw_text() {
    let root = unit(vec![
        node(CursorKind::FunctionDecl, "HelloWorld")
            .returns("void")
            .brief("Front end summary.")
            .raw("/// Raw summary."),
    ]);

    let model = walk_unit(&root);

    assert_eq!(
        model.functions[0].comment.as_deref(),
        Some("Front end summary.")
    );
}

#[test]
fn walk___declarations_outside_namespace___are_ignored() {
    let root = node(CursorKind::TranslationUnit, "test.h")
        .child(node(CursorKind::FunctionDecl, "Global").returns("void"))
        .child(
            node(CursorKind::Namespace, "other")
                .child(node(CursorKind::FunctionDecl, "Other").returns("void")),
        )
        .child(
            node(CursorKind::Namespace, "rpp")
                .child(node(CursorKind::FunctionDecl, "Inside").returns("void"))
                .child(
                    node(CursorKind::Namespace, "detail")
                        .child(node(CursorKind::FunctionDecl, "Nested").returns("void")),
                ),
        )
        .child(
            node(CursorKind::Namespace, "rpp")
                .child(node(CursorKind::FunctionDecl, "Reopened").returns("void")),
        );

    let model = walk_unit(&root);

    let names: Vec<_> = model.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Inside", "Reopened"]);
}

#[test]
fn walk___multiple_units___accumulate_in_file_order() {
    let first = unit(vec![
        node(CursorKind::FunctionDecl, "F1a").returns("void"),
        node(CursorKind::FunctionDecl, "F1b").returns("void"),
    ]);
    let second = unit(vec![node(CursorKind::FunctionDecl, "F2a").returns("void")]);

    let model = walk(&first, "rpp", DeclarationModel::new());
    let model = walk(&second, "rpp", model);

    let names: Vec<_> = model.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["F1a", "F1b", "F2a"]);
}

#[test]
fn walk___static_method___is_flagged() {
    let mut method = node(CursorKind::Method, "MoveMouseTo")
        .returns("b8")
        .access(Access::Public)
        .param("x", "f64")
        .param("y", "f64");
    method.is_static = true;
    let root = unit(vec![node(CursorKind::ClassDecl, "InputSystem").child(method)]);

    let model = walk_unit(&root);

    let method = &model.classes[0].methods[0];
    assert!(method.is_static);
    assert_eq!(method.return_type, "b8");
    assert_eq!(method.parameters.len(), 2);
}
