//! Rendering declaration files to text and writing them to disk.
//!
//! Load directives render compactly on a single line; rule invocations
//! render one attribute per line with trailing commas, the shape build-file
//! formatters settle on, so regenerated files diff cleanly against
//! hand-edited ones.

use std::path::Path;

use anyhow::Result;

use crate::core::{AttrValue, BuildFile, CallStmt, LoadStmt, Stmt};
use crate::util::fs::write_string;

const INDENT: &str = "    ";

/// Render a file to its textual form.
pub fn render(file: &BuildFile) -> String {
    let mut out = String::new();
    for (i, stmt) in file.statements.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match stmt {
            Stmt::Load(load) => render_load(&mut out, load),
            Stmt::Call(call) => render_call(&mut out, call),
        }
    }
    out
}

/// Render and persist every file under `repo_root`.
pub fn write_files(repo_root: &Path, files: &[BuildFile]) -> Result<()> {
    for file in files {
        write_string(&repo_root.join(&file.output_path), &render(file))?;
    }
    Ok(())
}

fn render_load(out: &mut String, load: &LoadStmt) {
    out.push_str(&format!("load(\"{}\"", load.source));
    for kind in &load.kinds {
        out.push_str(&format!(", \"{kind}\""));
    }
    out.push_str(")\n");
}

fn render_call(out: &mut String, call: &CallStmt) {
    // A bare invocation like go_prefix("example.com/proj") stays on one line.
    if call.attrs.is_empty() && call.positional.len() <= 1 {
        out.push_str(&call.kind);
        out.push('(');
        if let Some(value) = call.positional.first() {
            render_value(out, value, 1);
        }
        out.push_str(")\n");
        return;
    }

    out.push_str(&call.kind);
    out.push_str("(\n");
    for value in &call.positional {
        out.push_str(INDENT);
        render_value(out, value, 1);
        out.push_str(",\n");
    }
    for (key, value) in &call.attrs {
        out.push_str(&format!("{INDENT}{key} = "));
        render_value(out, value, 1);
        out.push_str(",\n");
    }
    out.push_str(")\n");
}

fn render_value(out: &mut String, value: &AttrValue, depth: usize) {
    match value {
        AttrValue::String(s) => out.push_str(&format!("\"{s}\"")),
        AttrValue::List(items) if items.len() <= 1 => {
            out.push('[');
            if let Some(item) = items.first() {
                out.push_str(&format!("\"{item}\""));
            }
            out.push(']');
        }
        AttrValue::List(items) => {
            out.push_str("[\n");
            for item in items {
                out.push_str(&INDENT.repeat(depth + 1));
                out.push_str(&format!("\"{item}\",\n"));
            }
            out.push_str(&INDENT.repeat(depth));
            out.push(']');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_representative_file() {
        let mut file = BuildFile::new("pkg/BUILD");
        file.statements.push(Stmt::Load(LoadStmt::new(
            "@io_bazel_rules_go//go:def.bzl",
            vec!["go_library".to_string()],
        )));
        file.statements.push(Stmt::Call(
            CallStmt::new("go_library")
                .with_attr("name", "go_default_library")
                .with_list_attr("srcs", ["a.go", "b.go"])
                .with_list_attr("visibility", ["//visibility:public"])
                .with_list_attr("deps", ["//vendor/github.com/x/y:go_default_library"]),
        ));

        let expected = concat!(
            "load(\"@io_bazel_rules_go//go:def.bzl\", \"go_library\")\n",
            "\n",
            "go_library(\n",
            "    name = \"go_default_library\",\n",
            "    srcs = [\n",
            "        \"a.go\",\n",
            "        \"b.go\",\n",
            "    ],\n",
            "    visibility = [\"//visibility:public\"],\n",
            "    deps = [\"//vendor/github.com/x/y:go_default_library\"],\n",
            ")\n",
        );
        assert_eq!(render(&file), expected);
    }

    #[test]
    fn test_render_prefix_call_compact() {
        let mut file = BuildFile::new("BUILD");
        file.statements.push(Stmt::Load(LoadStmt::new(
            "@io_bazel_rules_go//go:def.bzl",
            vec!["go_prefix".to_string()],
        )));
        file.statements.push(Stmt::Call(
            CallStmt::new("go_prefix").with_positional("example.com/proj"),
        ));

        let expected = concat!(
            "load(\"@io_bazel_rules_go//go:def.bzl\", \"go_prefix\")\n",
            "\n",
            "go_prefix(\"example.com/proj\")\n",
        );
        assert_eq!(render(&file), expected);
    }

    #[test]
    fn test_write_files_creates_directories() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut file = BuildFile::new("deep/pkg/BUILD");
        file.statements
            .push(Stmt::Call(CallStmt::new("go_prefix").with_positional("p")));

        write_files(tmp.path(), std::slice::from_ref(&file)).unwrap();
        let written = std::fs::read_to_string(tmp.path().join("deep/pkg/BUILD")).unwrap();
        assert_eq!(written, "go_prefix(\"p\")\n");
    }
}
