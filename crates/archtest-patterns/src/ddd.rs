//! Domain-driven design with bounded contexts, each laid out as clean architecture.
//!
//! Contexts live under `internal/<context>/` with `domain`, `application`
//! and `infrastructure` sub-packages.

use crate::{forbid_all, require, require_distinct};
use archtest_core::{ArchitecturePattern, PatternError};
use tracing::debug;

const NAME: &str = "DDD with Clean Architecture";

/// Builds the DDD pattern for the given bounded contexts.
///
/// Rules, in order:
/// 1. per context: domain↛application, domain↛infrastructure,
///    application↛infrastructure
/// 2. per ordered pair of distinct contexts `(a, b)`: `internal/a`↛`internal/b`
/// 3. with a shared kernel, per context: application↛shared,
///    infrastructure↛shared (only the domain layer may use it); a blank
///    `shared` counts as no shared kernel
///
/// `pkg` names the utility namespace every layer may use and adds no rule.
///
/// # Errors
///
/// - [`PatternError::NoBoundedContexts`] for an empty context list
/// - [`PatternError::EmptyNamespace`] for a blank name
/// - [`PatternError::DuplicateLayer`] when a context repeats
pub fn ddd_with_clean_architecture<S: AsRef<str>>(
    contexts: &[S],
    shared: Option<&str>,
    pkg: Option<&str>,
) -> Result<ArchitecturePattern, PatternError> {
    if contexts.is_empty() {
        return Err(PatternError::NoBoundedContexts);
    }
    for ctx in contexts {
        require(NAME, "bounded context", ctx.as_ref())?;
    }
    require_distinct(contexts)?;
    let shared = shared.filter(|s| !s.trim().is_empty());
    if let Some(pkg) = pkg {
        debug!("ddd: '{pkg}' is usable from every layer");
    }

    let names: Vec<&str> = contexts.iter().map(AsRef::as_ref).collect();
    let layers: Vec<ContextLayers> = names.iter().map(|c| ContextLayers::new(c)).collect();

    let mut pairs: Vec<(String, String)> = Vec::new();
    for l in &layers {
        pairs.push((l.domain.clone(), l.application.clone()));
        pairs.push((l.domain.clone(), l.infrastructure.clone()));
        pairs.push((l.application.clone(), l.infrastructure.clone()));
    }
    for a in &layers {
        for b in &layers {
            if a.root != b.root {
                pairs.push((a.root.clone(), b.root.clone()));
            }
        }
    }
    if let Some(shared) = shared {
        for l in &layers {
            pairs.push((l.application.clone(), shared.to_owned()));
            pairs.push((l.infrastructure.clone(), shared.to_owned()));
        }
    }

    Ok(ArchitecturePattern::new(
        format!("{NAME} (domains: {})", names.join(", ")),
        forbid_all(pairs.iter().map(|(a, b)| (a.as_str(), b.as_str()))),
    ))
}

struct ContextLayers {
    root: String,
    domain: String,
    application: String,
    infrastructure: String,
}

impl ContextLayers {
    fn new(context: &str) -> Self {
        let root = format!("internal/{context}");
        Self {
            domain: format!("{root}/domain"),
            application: format!("{root}/application"),
            infrastructure: format!("{root}/infrastructure"),
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archtest_core::{TypeRecord, Universe};

    #[test]
    fn rule_counts() {
        let p = ddd_with_clean_architecture(&["user", "order"], Some("internal/shared"), Some("pkg"))
            .unwrap();
        assert_eq!(p.rules().len(), 3 * 2 + 2 + 2 * 2);
        assert_eq!(p.name(), "DDD with Clean Architecture (domains: user, order)");

        let p = ddd_with_clean_architecture(&["user", "order", "billing"], None, None).unwrap();
        assert_eq!(p.rules().len(), 3 * 3 + 6);
    }

    #[test]
    fn cross_context_dependency_fails() {
        let u = Universe::new(vec![
            TypeRecord::builder("Order", "shop/internal/order/domain")
                .imports(["shop/internal/user/domain"])
                .build(),
            TypeRecord::builder("User", "shop/internal/user/domain").build(),
        ]);
        let results = ddd_with_clean_architecture(&["user", "order"], None, None)
            .unwrap()
            .validate(&u);
        let failed: Vec<&str> = results
            .iter()
            .filter(|r| !r.succeeded)
            .map(|r| r.rule_description.as_str())
            .collect();
        assert_eq!(
            failed,
            ["types that reside in namespace 'internal/order' should not have dependency on 'internal/user'"]
        );
    }

    #[test]
    fn only_domain_may_use_shared_kernel() {
        let u = Universe::new(vec![
            TypeRecord::builder("Money", "shop/internal/user/domain")
                .imports(["shop/internal/shared"])
                .build(),
            TypeRecord::builder("Signup", "shop/internal/user/application")
                .imports(["shop/internal/shared"])
                .build(),
        ]);
        let results = ddd_with_clean_architecture(&["user"], Some("internal/shared"), None)
            .unwrap()
            .validate(&u);
        assert_eq!(results.len(), 5);
        let failed: Vec<usize> = results
            .iter()
            .filter(|r| !r.succeeded)
            .map(|r| r.rule_index)
            .collect();
        assert_eq!(failed, [3]);
    }

    #[test]
    fn blank_shared_kernel_adds_no_rules() {
        for blank in ["", "  "] {
            let p = ddd_with_clean_architecture(&["user", "order"], Some(blank), None).unwrap();
            assert_eq!(p.rules().len(), 3 * 2 + 2);
        }
    }

    #[test]
    fn rejects_bad_context_lists() {
        assert_eq!(
            ddd_with_clean_architecture::<&str>(&[], None, None).unwrap_err(),
            PatternError::NoBoundedContexts
        );
        assert_eq!(
            ddd_with_clean_architecture(&["user", "user"], None, None).unwrap_err(),
            PatternError::DuplicateLayer {
                name: "user".into()
            }
        );
    }
}
