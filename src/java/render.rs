//! Java source rendering
//!
//! Four-space indentation, imports sorted, one blank line between members.

use super::{ClassKind, JavaClass, JavaMethod, JavaParameter};
use std::fmt::Write;

const INDENT: &str = "    ";

/// Render a class or interface description as a complete compilation unit
#[must_use]
pub fn render(class: &JavaClass) -> String {
    let mut out = String::new();

    if let Some(package) = class.java_type.package() {
        let _ = writeln!(out, "package {package};");
        out.push('\n');
    }

    if !class.imports.is_empty() {
        for import in &class.imports {
            let _ = writeln!(out, "import {import};");
        }
        out.push('\n');
    }

    for annotation in &class.annotations {
        let _ = writeln!(out, "{annotation}");
    }
    let keyword = match class.kind {
        ClassKind::Class => "class",
        ClassKind::Interface => "interface",
    };
    let _ = writeln!(
        out,
        "public {keyword} {} {{",
        class.java_type.short_name_without_arguments()
    );

    let mut members: Vec<String> = Vec::new();
    for field in &class.fields {
        let mut member = String::new();
        for annotation in &field.annotations {
            let _ = writeln!(member, "{INDENT}{annotation}");
        }
        let _ = writeln!(
            member,
            "{INDENT}private {} {};",
            field.java_type.short_name(),
            field.name
        );
        members.push(member);
    }
    for method in &class.methods {
        members.push(render_method(method, class.kind));
    }
    out.push_str(&members.join("\n"));

    out.push_str("}\n");
    out
}

fn render_method(method: &JavaMethod, kind: ClassKind) -> String {
    let mut out = String::new();
    for annotation in &method.annotations {
        let _ = writeln!(out, "{INDENT}{annotation}");
    }

    let return_type = method
        .return_type
        .as_ref()
        .map_or_else(|| "void".to_string(), |t| t.short_name());
    let parameters: Vec<String> = method.parameters.iter().map(render_parameter).collect();
    let signature = format!("{return_type} {}({})", method.name, parameters.join(", "));

    match kind {
        ClassKind::Interface => {
            let _ = writeln!(out, "{INDENT}{signature};");
        }
        ClassKind::Class => {
            let _ = writeln!(out, "{INDENT}public {signature} {{");
            for line in &method.body {
                let _ = writeln!(out, "{INDENT}{INDENT}{line}");
            }
            let _ = writeln!(out, "{INDENT}}}");
        }
    }
    out
}

fn render_parameter(parameter: &JavaParameter) -> String {
    let mut parts: Vec<String> = parameter.annotations.clone();
    parts.push(parameter.java_type.short_name());
    parts.push(parameter.name.clone());
    parts.join(" ")
}
