//! Targets command implementation

use autobind_codegen::BuiltinTemplate;

/// One line per built-in template: name and description
pub fn listing() -> String {
    let width = BuiltinTemplate::ALL
        .iter()
        .map(|t| t.as_str().len())
        .max()
        .unwrap_or(0);

    BuiltinTemplate::ALL
        .iter()
        .map(|t| format!("{:width$}  {}\n", t.as_str(), t.description(), width = width))
        .collect()
}
