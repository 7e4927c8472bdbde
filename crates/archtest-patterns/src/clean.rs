//! Clean (onion) architecture.

use crate::{forbid_all, require};
use archtest_core::{ArchitecturePattern, PatternError};

const NAME: &str = "Clean Architecture";

/// Dependencies point inward: presentation and infrastructure on the outside,
/// application in the middle, domain at the center.
///
/// Rules, in order: domain↛application, domain↛infrastructure,
/// domain↛presentation, application↛infrastructure,
/// application↛presentation, presentation↛infrastructure.
///
/// # Errors
///
/// Returns [`PatternError::EmptyNamespace`] for a blank namespace.
pub fn clean_architecture(
    domain: &str,
    application: &str,
    infrastructure: &str,
    presentation: &str,
) -> Result<ArchitecturePattern, PatternError> {
    require(NAME, "domain", domain)?;
    require(NAME, "application", application)?;
    require(NAME, "infrastructure", infrastructure)?;
    require(NAME, "presentation", presentation)?;

    Ok(ArchitecturePattern::new(
        NAME,
        forbid_all([
            (domain, application),
            (domain, infrastructure),
            (domain, presentation),
            (application, infrastructure),
            (application, presentation),
            (presentation, infrastructure),
        ]),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use archtest_core::{TypeRecord, Universe};

    #[test]
    fn outer_to_inner_is_allowed() {
        let u = Universe::new(vec![
            TypeRecord::builder("User", "app/domain").build(),
            TypeRecord::builder("Repo", "app/infrastructure")
                .imports(["app/domain"])
                .build(),
            TypeRecord::builder("Service", "app/application")
                .imports(["app/domain"])
                .build(),
        ]);
        let p = clean_architecture("app/domain", "app/application", "app/infrastructure", "app/presentation")
            .unwrap();
        assert_eq!(p.rules().len(), 6);
        assert!(p.validate(&u).iter().all(|r| r.succeeded));
    }

    #[test]
    fn presentation_reaching_into_infrastructure_fails() {
        let u = Universe::new(vec![TypeRecord::builder("Handler", "app/presentation")
            .imports(["app/infrastructure/db"])
            .build()]);
        let results = clean_architecture("domain", "application", "infrastructure", "presentation")
            .unwrap()
            .validate(&u);
        let failed: Vec<usize> = results
            .iter()
            .filter(|r| !r.succeeded)
            .map(|r| r.rule_index)
            .collect();
        assert_eq!(failed, [5]);
    }

    #[test]
    fn blank_namespace_is_rejected() {
        assert_eq!(
            clean_architecture("domain", "", "infra", "web").unwrap_err(),
            PatternError::EmptyNamespace {
                pattern: NAME,
                role: "application"
            }
        );
    }
}
