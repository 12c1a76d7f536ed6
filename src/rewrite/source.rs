//! Go source files parsed with tree-sitter.
//!
//! The whole file must parse cleanly. Only the package clause and the
//! import declarations are extracted; everything else is kept as the
//! original text plus the byte span of every import path literal, so
//! rendering a mutated file changes nothing but the rewritten literals.

use std::fmt;
use std::ops::Range;

use tree_sitter::{Node, Parser};

use crate::core::RewriteMapping;
use crate::rewrite::literal::{self, LiteralStyle};

/// A syntax error anywhere in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    fn at(text: &str, offset: usize, message: impl Into<String>) -> Self {
        let (line, column) = line_column(text, offset);
        ParseError {
            offset,
            line,
            column,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for ParseError {}

/// 1-based line and byte column of `offset`.
pub fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let before = &text.as_bytes()[..offset.min(text.len())];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map(|p| p + 1)
        .unwrap_or(0);
    (line, before.len() - line_start + 1)
}

/// One `[alias] "path"` entry of an import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    alias: Option<String>,
    path: String,
    span: Range<usize>,
    style: LiteralStyle,
    rewritten: bool,
}

impl ImportSpec {
    /// The local name: an identifier, `_` or `.`.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The decoded import path.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn set_path(&mut self, path: String) {
        self.path = path;
        self.rewritten = true;
    }
}

/// A parsed Go source file.
#[derive(Debug, Clone)]
pub struct GoSource {
    text: String,
    package: String,
    imports: Vec<ImportSpec>,
}

/// A mutated file that could not be turned back into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    pub import: String,
    pub message: String,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot write import {:?}: {}", self.import, self.message)
    }
}

impl std::error::Error for RenderError {}

impl GoSource {
    /// Parse `text`, rejecting files with any syntax error.
    pub fn parse(text: impl Into<String>) -> Result<Self, ParseError> {
        let text = text.into();
        let bom = if text.starts_with('\u{FEFF}') {
            '\u{FEFF}'.len_utf8()
        } else {
            0
        };

        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| ParseError::at(&text, 0, format!("failed to load Go grammar: {}", e)))?;
        let tree = parser
            .parse(&text[bom..], None)
            .ok_or_else(|| ParseError::at(&text, 0, "failed to parse Go source"))?;

        let (package, imports) = Extractor { text: &text, bom }.extract(tree.root_node())?;
        Ok(GoSource {
            text,
            package,
            imports,
        })
    }

    /// The package name from the package clause.
    pub fn package_name(&self) -> &str {
        &self.package
    }

    /// Import declarations in source order.
    pub fn imports(&self) -> &[ImportSpec] {
        &self.imports
    }

    /// Apply `mapping` to every import path, returning how many changed.
    pub fn rewrite_imports(&mut self, mapping: &RewriteMapping) -> usize {
        let mut changed = 0;
        for spec in &mut self.imports {
            if let Some(new_path) = mapping.rewrite(spec.path()) {
                tracing::trace!(
                    "rewriting import {}{:?} -> {:?}",
                    spec.alias().map(|a| format!("{} ", a)).unwrap_or_default(),
                    spec.path(),
                    new_path
                );
                spec.set_path(new_path);
                changed += 1;
            }
        }
        changed
    }

    /// Render the file, replacing only the literals that were rewritten.
    pub fn render(&self) -> Result<String, RenderError> {
        let mut out = String::with_capacity(self.text.len() + 64);
        let mut last = 0;
        for spec in self.imports.iter().filter(|s| s.rewritten) {
            let literal = literal::quote(&spec.path, spec.style).map_err(|e| RenderError {
                import: spec.path.clone(),
                message: e.message,
            })?;
            out.push_str(&self.text[last..spec.span.start]);
            out.push_str(&literal);
            last = spec.span.end;
        }
        out.push_str(&self.text[last..]);
        Ok(out)
    }
}

/// Pulls the package clause and import specs out of a syntax tree.
///
/// Node offsets are relative to the text after any byte order mark.
struct Extractor<'a> {
    text: &'a str,
    bom: usize,
}

impl Extractor<'_> {
    fn error(&self, node: Node<'_>, message: impl Into<String>) -> ParseError {
        ParseError::at(self.text, self.bom + node.start_byte(), message)
    }

    fn node_text(&self, node: Node<'_>) -> &str {
        self.text
            .get(self.bom + node.start_byte()..self.bom + node.end_byte())
            .unwrap_or_default()
    }

    fn extract(&self, root: Node<'_>) -> Result<(String, Vec<ImportSpec>), ParseError> {
        let mut cursor = root.walk();
        let decls: Vec<Node<'_>> = root
            .named_children(&mut cursor)
            .filter(|n| n.kind() != "comment")
            .collect();

        let package = match decls.first() {
            Some(clause) if clause.kind() == "package_clause" => self.package_name(*clause)?,
            Some(node) if node.is_error() => return Err(self.syntax_error(root)),
            Some(node) => return Err(self.error(*node, "expected 'package' clause")),
            None => {
                return Err(ParseError::at(
                    self.text,
                    self.text.len(),
                    "expected 'package' clause, found EOF",
                ))
            }
        };

        if root.has_error() {
            return Err(self.syntax_error(root));
        }

        let mut imports = Vec::new();
        let mut seen_declaration = false;
        for decl in &decls[1..] {
            if decl.kind() != "import_declaration" {
                seen_declaration = true;
                continue;
            }
            if seen_declaration {
                return Err(self.error(*decl, "imports must appear before other declarations"));
            }
            for spec in import_specs(*decl) {
                imports.push(self.import_spec(spec)?);
            }
        }

        Ok((package, imports))
    }

    fn package_name(&self, clause: Node<'_>) -> Result<String, ParseError> {
        let mut cursor = clause.walk();
        let ident = clause
            .named_children(&mut cursor)
            .find(|n| n.kind() == "package_identifier")
            .ok_or_else(|| self.error(clause, "expected package name"))?;
        match self.node_text(ident) {
            "_" => Err(self.error(ident, "invalid package name _")),
            name => Ok(name.to_string()),
        }
    }

    fn import_spec(&self, spec: Node<'_>) -> Result<ImportSpec, ParseError> {
        let alias = spec
            .child_by_field_name("name")
            .map(|name| self.node_text(name).to_string());
        let literal = spec
            .child_by_field_name("path")
            .ok_or_else(|| self.error(spec, "expected import path"))?;

        let raw = self.node_text(literal);
        let (path, style) = literal::unquote(raw)
            .and_then(|(path, style)| literal::check_import_path(&path).map(|_| (path, style)))
            .map_err(|e| self.error(literal, format!("invalid import path {}: {}", raw, e)))?;

        Ok(ImportSpec {
            alias,
            path,
            span: self.bom + literal.start_byte()..self.bom + literal.end_byte(),
            style,
            rewritten: false,
        })
    }

    /// Report the first error or missing node in source order.
    fn syntax_error(&self, root: Node<'_>) -> ParseError {
        let mut cursor = root.walk();
        loop {
            let node = cursor.node();
            if node.is_missing() {
                return self.error(node, format!("missing {}", node.kind()));
            }
            if node.is_error() {
                let snippet = self.node_text(node).lines().next().unwrap_or_default();
                return self.error(node, format!("syntax error near {:?}", snippet));
            }
            if node.has_error() && cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return self.error(root, "syntax error");
                }
            }
        }
    }
}

/// The `import_spec` nodes of a single or grouped import declaration.
fn import_specs(decl: Node<'_>) -> Vec<Node<'_>> {
    let mut specs = Vec::new();
    let mut cursor = decl.walk();
    for child in decl.named_children(&mut cursor) {
        match child.kind() {
            "import_spec" => specs.push(child),
            "import_spec_list" => {
                let mut inner = child.walk();
                specs.extend(
                    child
                        .named_children(&mut inner)
                        .filter(|n| n.kind() == "import_spec"),
                );
            }
            _ => {}
        }
    }
    specs
}
