//! Normalized type model shared by every stage of an analysis run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One declared type (struct-like or interface-like) found in a compilation unit.
///
/// Records are immutable once built. Identity for set operations is the
/// `(module_path, name)` pair, see [`TypeRecord::key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRecord {
    name: String,
    module_name: String,
    module_path: String,
    imported_module_paths: Vec<String>,
    is_struct_like: bool,
    is_interface_like: bool,
    declared_method_names: Vec<String>,
    #[serde(default)]
    file: PathBuf,
    #[serde(default)]
    line: usize,
}

/// Borrowed identity of a [`TypeRecord`]: module path plus type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey<'a> {
    /// Full module path of the declaring module.
    pub module_path: &'a str,
    /// Type name.
    pub name: &'a str,
}

impl TypeRecord {
    /// Starts building a record with the given name and module path.
    ///
    /// The module name defaults to the last `/` segment of the path.
    #[must_use]
    pub fn builder(name: impl Into<String>, module_path: impl Into<String>) -> TypeRecordBuilder {
        let module_path = module_path.into();
        let module_name = module_path
            .rsplit('/')
            .next()
            .unwrap_or(module_path.as_str())
            .to_owned();
        TypeRecordBuilder {
            record: Self {
                name: name.into(),
                module_name,
                module_path,
                imported_module_paths: Vec::new(),
                is_struct_like: false,
                is_interface_like: false,
                declared_method_names: Vec::new(),
                file: PathBuf::new(),
                line: 0,
            },
        }
    }

    /// Type identifier, unique only within its module.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short name of the declaring module (the package clause).
    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Full hierarchical path of the declaring module.
    #[must_use]
    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    /// Module paths imported by the compilation unit that declared this type.
    #[must_use]
    pub fn imported_module_paths(&self) -> &[String] {
        &self.imported_module_paths
    }

    /// `true` for concrete struct-like declarations.
    #[must_use]
    pub fn is_struct_like(&self) -> bool {
        self.is_struct_like
    }

    /// `true` for interface-like declarations.
    #[must_use]
    pub fn is_interface_like(&self) -> bool {
        self.is_interface_like
    }

    /// Methods declared directly on an interface. Embedded interfaces are not expanded.
    #[must_use]
    pub fn declared_method_names(&self) -> &[String] {
        &self.declared_method_names
    }

    /// Source file of the declaring compilation unit. Empty when unknown.
    #[must_use]
    pub fn file(&self) -> &std::path::Path {
        &self.file
    }

    /// Declaration line (1-indexed), 0 when unknown.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Identity used to match original and filtered records.
    #[must_use]
    pub fn key(&self) -> RecordKey<'_> {
        RecordKey {
            module_path: &self.module_path,
            name: &self.name,
        }
    }
}

impl fmt::Display for TypeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in package {}", self.name, self.module_path)
    }
}

/// Builder for [`TypeRecord`]. Obtained from [`TypeRecord::builder`].
#[derive(Debug, Clone)]
#[must_use]
pub struct TypeRecordBuilder {
    record: TypeRecord,
}

impl TypeRecordBuilder {
    /// Overrides the short module name.
    pub fn module_name(mut self, module_name: impl Into<String>) -> Self {
        self.record.module_name = module_name.into();
        self
    }

    /// Sets the imported module paths of the declaring unit.
    pub fn imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record.imported_module_paths = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the record as struct-like. Clears the interface flag.
    pub fn struct_like(mut self) -> Self {
        self.record.is_struct_like = true;
        self.record.is_interface_like = false;
        self.record.declared_method_names.clear();
        self
    }

    /// Marks the record as interface-like with the given declared methods.
    pub fn interface_like<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record.is_interface_like = true;
        self.record.is_struct_like = false;
        self.record.declared_method_names = methods.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the source location of the declaration.
    pub fn location(mut self, file: impl Into<PathBuf>, line: usize) -> Self {
        self.record.file = file.into();
        self.record.line = line;
        self
    }

    /// Finishes the record.
    #[must_use]
    pub fn build(self) -> TypeRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_name_defaults_to_last_segment() {
        let r = TypeRecord::builder("User", "app/internal/domain").build();
        assert_eq!(r.module_name(), "domain");
        assert_eq!(r.module_path(), "app/internal/domain");
    }

    #[test]
    fn struct_and_interface_are_exclusive() {
        let r = TypeRecord::builder("Repo", "app/domain")
            .interface_like(["Save"])
            .struct_like()
            .build();
        assert!(r.is_struct_like());
        assert!(!r.is_interface_like());
        assert!(r.declared_method_names().is_empty());

        let r = TypeRecord::builder("Repo", "app/domain")
            .struct_like()
            .interface_like(["Save"])
            .build();
        assert!(!r.is_struct_like());
        assert!(r.is_interface_like());
    }

    #[test]
    fn key_ignores_location() {
        let a = TypeRecord::builder("User", "app/domain")
            .location("a.go", 3)
            .build();
        let b = TypeRecord::builder("User", "app/domain")
            .location("b.go", 9)
            .build();
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn display_names_package() {
        let r = TypeRecord::builder("User", "app/domain").build();
        assert_eq!(r.to_string(), "User in package app/domain");
    }
}
