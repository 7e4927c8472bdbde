//! The unfiltered record set of one analysis run and the model builder.

use crate::model::TypeRecord;
use crate::oracle::{CompilationUnit, DeclKind, SourceOracle};
use crate::outcome::Outcome;
use crate::type_set::TypeSet;

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Every record extracted from a source tree.
///
/// Cloning is cheap: the records live in a shared arena that no query mutates,
/// so one universe can seed any number of independent [`TypeSet`] chains,
/// including from several threads at once.
#[derive(Debug, Clone)]
pub struct Universe {
    records: Arc<[TypeRecord]>,
}

impl Default for Universe {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Universe {
    /// Wraps an already built record list.
    #[must_use]
    pub fn new(records: Vec<TypeRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// A universe with no records.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the universe for `root` using `oracle`.
    ///
    /// Oracle failures (missing path, unreadable tree) are logged and
    /// produce an empty universe instead of an error.
    pub fn build<O: SourceOracle + ?Sized>(oracle: &O, root: &Path) -> Self {
        match oracle.load(root) {
            Ok(units) => {
                let universe = Self::from_units(&units);
                info!(
                    "Extracted {} type(s) from {} {} unit(s) under {}",
                    universe.len(),
                    units.len(),
                    oracle.language_id(),
                    root.display()
                );
                universe
            }
            Err(e) => {
                warn!(
                    "Could not load sources under {}: {e}; continuing with an empty type set",
                    root.display()
                );
                Self::empty()
            }
        }
    }

    /// Flattens compilation units into records.
    ///
    /// Each unit's module identity and import list are read once and shared
    /// by every type declared in that unit.
    #[must_use]
    pub fn from_units(units: &[CompilationUnit]) -> Self {
        let mut records = Vec::new();
        for unit in units {
            debug!(
                "{}: {} declaration(s), {} import(s)",
                unit.file.display(),
                unit.declarations.len(),
                unit.imports.len()
            );
            for decl in &unit.declarations {
                let builder = TypeRecord::builder(decl.name.as_str(), unit.module_path.as_str())
                    .module_name(unit.module_name.as_str())
                    .imports(unit.imports.iter().map(String::as_str))
                    .location(unit.file.clone(), decl.line);
                let builder = match decl.kind {
                    DeclKind::Struct => builder.struct_like(),
                    DeclKind::Interface => {
                        builder.interface_like(decl.interface_methods.iter().map(String::as_str))
                    }
                    DeclKind::Other => builder,
                };
                records.push(builder.build());
            }
        }
        Self::new(records)
    }

    /// Starts a fresh query chain over every record.
    #[must_use]
    pub fn that(&self) -> TypeSet {
        TypeSet::new(Arc::clone(&self.records))
    }

    /// All records, unfiltered.
    #[must_use]
    pub fn records(&self) -> &[TypeRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Runs a caller-defined rule against this universe.
    pub fn check<F>(&self, rule: F) -> Outcome
    where
        F: FnOnce(&Universe) -> Outcome,
    {
        rule(self)
    }
}

impl From<Vec<TypeRecord>> for Universe {
    fn from(records: Vec<TypeRecord>) -> Self {
        Self::new(records)
    }
}
