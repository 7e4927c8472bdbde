//! Go language extractor using Tree-sitter.

use archtest_core::DeclKind;
use tree_sitter::{Language, Node, Parser};

use crate::extractor::{
    DeclInfo, ExtractError, FileAnalysis, ImportInfo, LanguageExtractor, PackageInfo,
};

/// Extracts the package clause, imports, and type declarations from Go source.
///
/// Only top-level declarations are visited; types declared inside function
/// bodies are invisible to architecture rules.
#[derive(Clone)]
pub struct GoExtractor {
    language: Language,
}

impl GoExtractor {
    /// Creates a new Go extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        src.get(node.byte_range())
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .unwrap_or("")
    }

    fn line(node: &Node<'_>) -> usize {
        node.start_position().row + 1
    }

    fn extract_package(node: &Node<'_>, src: &[u8]) -> Option<PackageInfo> {
        let mut cursor = node.walk();
        let ident = node
            .children(&mut cursor)
            .find(|c| c.kind() == "package_identifier")?;
        Some(PackageInfo {
            line: Self::line(node),
            name: Self::text(&ident, src).to_owned(),
        })
    }

    /// Handles both `import "x"` and the grouped `import ( ... )` form.
    fn extract_imports(node: &Node<'_>, src: &[u8], out: &mut Vec<ImportInfo>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "import_spec" => {
                    if let Some(path) = child.child_by_field_name("path") {
                        let raw = Self::text(&path, src);
                        out.push(ImportInfo {
                            line: Self::line(&child),
                            path: raw.trim_matches(|c| c == '"' || c == '`').to_owned(),
                        });
                    }
                }
                "import_spec_list" => Self::extract_imports(&child, src, out),
                _ => {}
            }
        }
    }

    /// `type_declaration` holds one spec, or several when parenthesized.
    fn extract_types(node: &Node<'_>, src: &[u8], out: &mut Vec<DeclInfo>) {
        let mut cursor = node.walk();
        for spec in node.children(&mut cursor) {
            if !matches!(spec.kind(), "type_spec" | "type_alias") {
                continue;
            }
            let Some(name) = spec.child_by_field_name("name") else {
                continue;
            };
            let body = spec.child_by_field_name("type");
            let (kind, methods) = match body {
                Some(ty) if spec.kind() == "type_spec" && ty.kind() == "struct_type" => {
                    (DeclKind::Struct, Vec::new())
                }
                Some(ty) if spec.kind() == "type_spec" && ty.kind() == "interface_type" => {
                    (DeclKind::Interface, Self::interface_methods(&ty, src))
                }
                _ => (DeclKind::Other, Vec::new()),
            };
            out.push(DeclInfo {
                line: Self::line(&spec),
                name: Self::text(&name, src).to_owned(),
                kind,
                methods,
            });
        }
    }

    /// Method names declared directly in an interface body. Embedded
    /// interfaces and type constraints contribute nothing.
    fn interface_methods(node: &Node<'_>, src: &[u8]) -> Vec<String> {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .filter(|c| matches!(c.kind(), "method_elem" | "method_spec"))
            .filter_map(|m| m.child_by_field_name("name"))
            .map(|n| Self::text(&n, src).to_owned())
            .collect()
    }

    fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            return None;
        }
        let mut cursor = node.walk();
        let found = node.children(&mut cursor).find_map(Self::first_error);
        found
    }
}

impl Default for GoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GoExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoExtractor").finish_non_exhaustive()
    }
}

impl LanguageExtractor for GoExtractor {
    fn language_id(&self) -> &'static str {
        "go"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".go"]
    }

    fn analyze(&self, source: &str) -> Result<FileAnalysis, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ExtractError::Language {
                language: "go",
                message: e.to_string(),
            })?;

        let src = source.as_bytes();
        let tree = parser.parse(src, None).ok_or(ExtractError::Parse)?;
        let root = tree.root_node();

        if root.has_error() {
            let line = Self::first_error(root).map_or(1, |n| Self::line(&n));
            return Err(ExtractError::Syntax { line });
        }

        let mut result = FileAnalysis::default();
        let mut cursor = root.walk();
        for node in root.children(&mut cursor) {
            match node.kind() {
                "package_clause" => result.package = Self::extract_package(&node, src),
                "import_declaration" => Self::extract_imports(&node, src, &mut result.imports),
                "type_declaration" => Self::extract_types(&node, src, &mut result.declarations),
                _ => {}
            }
        }

        if result.package.is_none() {
            return Err(ExtractError::MissingPackage);
        }
        Ok(result)
    }
}
