//! Program host: parsing and identifier resolution on top of OXC.
//!
//! The resolution engine never assumes a concrete parser beyond two
//! capabilities: "parse a file into an AST" and "resolve an identifier to its
//! declaration". This module implements both with the OXC toolchain
//! (`oxc_parser` + `oxc_semantic`).
//!
//! OXC ASTs borrow from an arena allocator, so the parsed program is only
//! reachable through the scoped [`SourceUnit::analyze`] API: the arena lives
//! for the duration of a closure, and callers extract owned results before
//! it returns. Cross-file hops re-enter the host with a fresh unit; nothing
//! is cached between top-level resolutions.

use std::fs;
use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_ast::AstKind;
use oxc_ast::ast::{
    Class, Declaration, Expression, IdentifierReference, ImportDeclarationSpecifier, Program,
    Statement, VariableDeclarator,
};
use oxc_parser::Parser;
use oxc_semantic::{Semantic, SemanticBuilder};
use oxc_span::{GetSpan, SourceType, Span};

use crate::error::{ResolveError, Result};

/// One source file owned by the program host.
pub struct SourceUnit {
    path: PathBuf,
    source: String,
}

impl SourceUnit {
    /// Read a file from disk into a new unit.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let source = fs::read_to_string(&path).map_err(|source| ResolveError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, source })
    }

    /// Create a unit from in-memory source text.
    pub fn from_source(path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Parse the unit as TypeScript and run `f` against the borrowed AST and
    /// symbol table.
    ///
    /// Fails with [`ResolveError::Parse`] before `f` runs if the parser
    /// reported any diagnostic.
    pub fn analyze<T>(&self, f: impl FnOnce(&FileView<'_>) -> Result<T>) -> Result<T> {
        let allocator = Allocator::default();
        let parsed = Parser::new(&allocator, &self.source, SourceType::ts()).parse();

        if !parsed.errors.is_empty() {
            return Err(ResolveError::Parse {
                path: self.path.clone(),
                diagnostics: parsed.errors.iter().map(ToString::to_string).collect(),
            });
        }

        let semantic = SemanticBuilder::new().build(&parsed.program).semantic;
        let view = FileView {
            path: &self.path,
            source: &self.source,
            program: &parsed.program,
            semantic,
        };
        f(&view)
    }
}

/// Borrowed view of one parsed file: AST plus symbol table.
pub struct FileView<'a> {
    pub path: &'a Path,
    pub source: &'a str,
    pub program: &'a Program<'a>,
    semantic: Semantic<'a>,
}

/// Declaration classes the resolver understands.
///
/// Anything else reachable through the symbol table (function declarations,
/// parameters, ...) is outside the supported literal subset.
pub enum Binding<'a> {
    /// A `const x = ...` style declarator.
    Variable(&'a VariableDeclarator<'a>),
    /// A class declaration in the same file.
    Class(&'a Class<'a>),
    /// A plain named import from another module.
    Import {
        /// Name as exported by the source module.
        imported: String,
        /// Import specifier text, e.g. `./routing.module`.
        source: &'a str,
    },
}

/// A top-level declaration exported under a given name.
pub enum Export<'a> {
    Variable(&'a VariableDeclarator<'a>),
    Class(&'a Class<'a>),
}

impl<'a> FileView<'a> {
    /// Resolve an identifier to its declaration through the symbol table.
    pub fn declaration_of(&self, ident: &IdentifierReference<'a>) -> Result<Binding<'a>> {
        let scoping = self.semantic.scoping();
        let reference = scoping.get_reference(ident.reference_id());
        let Some(symbol_id) = reference.symbol_id() else {
            return Err(ResolveError::UnresolvedIdentifier(ident.name.to_string()));
        };

        let node_id = scoping.symbol_declaration(symbol_id);
        match self.semantic.nodes().get_node(node_id).kind() {
            AstKind::VariableDeclarator(declarator) => Ok(Binding::Variable(declarator)),
            AstKind::Class(class) => Ok(Binding::Class(class)),
            AstKind::ImportSpecifier(specifier) => {
                let source = self.import_source_of(specifier.span())?;
                Ok(Binding::Import {
                    imported: specifier.imported.name().to_string(),
                    source,
                })
            }
            AstKind::ImportDefaultSpecifier(_) | AstKind::ImportNamespaceSpecifier(_) => {
                Err(ResolveError::UnsupportedImport(ident.name.to_string()))
            }
            _ => Err(ResolveError::UnresolvedIdentifier(ident.name.to_string())),
        }
    }

    /// One identifier hop: if `expr` is an identifier bound to a variable in
    /// this file, return the variable's initializer; otherwise return `expr`
    /// unchanged.
    ///
    /// The hop is deliberately not transitive: deeply-aliased constants stay
    /// unresolved, matching the one-hop rule applied at every call site.
    pub fn hop_initializer(&self, expr: &'a Expression<'a>) -> Result<&'a Expression<'a>> {
        let Expression::Identifier(ident) = expr else {
            return Ok(expr);
        };
        match self.declaration_of(ident)? {
            Binding::Variable(declarator) => declarator
                .init
                .as_ref()
                .ok_or_else(|| ResolveError::MissingInitializer(ident.name.to_string())),
            _ => Ok(expr),
        }
    }

    /// Look up a top-level declaration exported under `name`.
    ///
    /// Both inline forms (`export const`, `export class`) and specifier
    /// lists (`export { Name }`) referring to a top-level declaration count.
    pub fn exported_declaration(&self, name: &str) -> Option<Export<'a>> {
        for statement in self.program.body.iter() {
            let Statement::ExportNamedDeclaration(export) = statement else {
                continue;
            };
            match &export.declaration {
                Some(Declaration::VariableDeclaration(variable)) => {
                    for declarator in variable.declarations.iter() {
                        if binding_name(declarator) == Some(name) {
                            return Some(Export::Variable(declarator));
                        }
                    }
                }
                Some(Declaration::ClassDeclaration(class)) => {
                    if class_name(class) == Some(name) {
                        return Some(Export::Class(class));
                    }
                }
                _ => {}
            }
        }

        if self.is_exported_by_specifier(name) {
            return self.top_level_declaration(name);
        }
        None
    }

    /// Whether `name` appears in an `export { ... }` specifier list.
    pub fn is_exported_by_specifier(&self, name: &str) -> bool {
        self.program.body.iter().any(|statement| {
            let Statement::ExportNamedDeclaration(export) = statement else {
                return false;
            };
            export
                .specifiers
                .iter()
                .any(|specifier| specifier.local.name() == name)
        })
    }

    fn top_level_declaration(&self, name: &str) -> Option<Export<'a>> {
        for statement in self.program.body.iter() {
            match statement {
                Statement::VariableDeclaration(variable) => {
                    for declarator in variable.declarations.iter() {
                        if binding_name(declarator) == Some(name) {
                            return Some(Export::Variable(declarator));
                        }
                    }
                }
                Statement::ClassDeclaration(class) => {
                    if class_name(class) == Some(name) {
                        return Some(Export::Class(class));
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Find the import declaration a specifier belongs to and return its
    /// source text.
    fn import_source_of(&self, specifier_span: Span) -> Result<&'a str> {
        for statement in self.program.body.iter() {
            let Statement::ImportDeclaration(import) = statement else {
                continue;
            };
            let Some(specifiers) = &import.specifiers else {
                continue;
            };
            for specifier in specifiers.iter() {
                if let ImportDeclarationSpecifier::ImportSpecifier(specifier) = specifier {
                    if specifier.span == specifier_span {
                        return Ok(import.source.value.as_str());
                    }
                }
            }
        }
        Err(ResolveError::UnsupportedSyntax(
            "import specifier without an enclosing import declaration".to_string(),
        ))
    }
}

/// Name of the binding introduced by a declarator, if it is a plain
/// identifier pattern.
pub fn binding_name<'a>(declarator: &'a VariableDeclarator<'a>) -> Option<&'a str> {
    match &declarator.id.kind {
        oxc_ast::ast::BindingPatternKind::BindingIdentifier(ident) => Some(ident.name.as_str()),
        _ => None,
    }
}

/// Name of a class declaration, if it has one.
pub fn class_name<'a>(class: &'a Class<'a>) -> Option<&'a str> {
    class.id.as_ref().map(|id| id.name.as_str())
}
