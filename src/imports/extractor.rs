//! Import extraction from a Python syntax tree.
//!
//! The source is parsed with the full Python grammar, so imports that only
//! appear inside comments or string literals never produce a reference.
//! Traversal is unconditional: imports nested in functions, classes, or
//! conditional branches are collected just like top-level ones.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use pipr::imports::extract_references;
//!
//! let source = "import os.path as p\nfrom requests import get\n";
//! let refs = extract_references(source, Path::new("demo.py")).unwrap();
//! let names: Vec<&str> = refs.iter().map(|r| r.as_str()).collect();
//! assert_eq!(names, ["os.path", "requests"]);
//! ```

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use rustpython_parser::ast::{self, Stmt};
use rustpython_parser::Parse;

use crate::error::{PiprError, Result};

/// A module name declared by an import statement, as written in the source.
///
/// May be a dotted path (`a.b.c`); only the first segment matters when
/// resolving it against installed packages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleReference(String);

impl ModuleReference {
    /// Create a reference from a module path.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The full dotted path.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first path segment (`a` for `a.b.c`).
    pub fn top_level(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ModuleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read a source file and extract its module references.
pub fn read_references(path: &Path) -> Result<Vec<ModuleReference>> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PiprError::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => PiprError::SourceRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
    })?;

    // A non-UTF-8 file still declares its imports in ASCII; undecodable bytes
    // can only sit in comments and literals.
    let source = String::from_utf8_lossy(&bytes);
    let references = extract_references(&source, path)?;
    tracing::debug!(
        "Imported packages: {}",
        references
            .iter()
            .map(ModuleReference::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(references)
}

/// Extract module references from Python source, in order of appearance.
///
/// Duplicates are preserved. `path` is only used in diagnostics.
pub fn extract_references(source: &str, path: &Path) -> Result<Vec<ModuleReference>> {
    let suite = ast::Suite::parse(source, &path.to_string_lossy()).map_err(|e| {
        PiprError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    let mut references = Vec::new();
    collect_body(&suite, &mut references);
    Ok(references)
}

fn collect_body(body: &[Stmt], out: &mut Vec<ModuleReference>) {
    for stmt in body {
        collect_stmt(stmt, out);
    }
}

fn collect_stmt(stmt: &Stmt, out: &mut Vec<ModuleReference>) {
    match stmt {
        // `import a.b as c` binds `c` but depends on `a.b`
        Stmt::Import(ast::StmtImport { names, .. }) => {
            out.extend(names.iter().map(|alias| ModuleReference::new(alias.name.as_str())));
        }
        // The imported members are attributes, not modules. `from . import x`
        // has no module path and nothing to install.
        Stmt::ImportFrom(ast::StmtImportFrom { module, .. }) => {
            if let Some(module) = module {
                out.push(ModuleReference::new(module.as_str()));
            }
        }
        Stmt::FunctionDef(ast::StmtFunctionDef { body, .. })
        | Stmt::AsyncFunctionDef(ast::StmtAsyncFunctionDef { body, .. })
        | Stmt::ClassDef(ast::StmtClassDef { body, .. })
        | Stmt::With(ast::StmtWith { body, .. })
        | Stmt::AsyncWith(ast::StmtAsyncWith { body, .. }) => collect_body(body, out),
        Stmt::For(ast::StmtFor { body, orelse, .. })
        | Stmt::AsyncFor(ast::StmtAsyncFor { body, orelse, .. })
        | Stmt::While(ast::StmtWhile { body, orelse, .. })
        | Stmt::If(ast::StmtIf { body, orelse, .. }) => {
            collect_body(body, out);
            collect_body(orelse, out);
        }
        Stmt::Try(ast::StmtTry {
            body,
            handlers,
            orelse,
            finalbody,
            ..
        })
        | Stmt::TryStar(ast::StmtTryStar {
            body,
            handlers,
            orelse,
            finalbody,
            ..
        }) => {
            collect_body(body, out);
            for handler in handlers {
                match handler {
                    ast::ExceptHandler::ExceptHandler(handler) => collect_body(&handler.body, out),
                }
            }
            collect_body(orelse, out);
            collect_body(finalbody, out);
        }
        Stmt::Match(ast::StmtMatch { cases, .. }) => {
            for case in cases {
                collect_body(&case.body, out);
            }
        }
        _ => {}
    }
}
