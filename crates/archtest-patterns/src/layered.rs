//! Traditional layered architecture.

use crate::{forbid_all, require, require_distinct};
use archtest_core::{ArchitecturePattern, PatternError};
use tracing::debug;

/// Layers listed in order; each layer must not depend on any layer after it.
///
/// Produces one rule per pair `(i, j)` with `i < j`, so `n` layers give
/// `n * (n - 1) / 2` rules.
///
/// # Errors
///
/// - [`PatternError::TooFewLayers`] with fewer than two layers
/// - [`PatternError::EmptyNamespace`] for a blank layer name
/// - [`PatternError::DuplicateLayer`] when a layer repeats
pub fn layered<S: AsRef<str>>(layers: &[S]) -> Result<ArchitecturePattern, PatternError> {
    if layers.len() < 2 {
        return Err(PatternError::TooFewLayers {
            count: layers.len(),
        });
    }
    for layer in layers {
        require("Layered Architecture", "layer", layer.as_ref())?;
    }
    require_distinct(layers)?;

    let names: Vec<&str> = layers.iter().map(AsRef::as_ref).collect();
    let pairs: Vec<(&str, &str)> = names
        .iter()
        .enumerate()
        .flat_map(|(i, &lower)| names[i + 1..].iter().map(move |&higher| (lower, higher)))
        .collect();
    debug!("layered: {} layer(s) -> {} rule(s)", names.len(), pairs.len());

    Ok(ArchitecturePattern::new(
        format!("Layered Architecture ({})", names.join(" -> ")),
        forbid_all(pairs),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_rule_per_ordered_pair() {
        let p = layered(&["a", "b", "c"]).unwrap();
        assert_eq!(p.name(), "Layered Architecture (a -> b -> c)");
        let descriptions: Vec<&str> = p.rules().iter().map(|r| r.description()).collect();
        insta::assert_debug_snapshot!(descriptions, @r###"
        [
            "types that reside in namespace 'a' should not have dependency on 'b'",
            "types that reside in namespace 'a' should not have dependency on 'c'",
            "types that reside in namespace 'b' should not have dependency on 'c'",
        ]
        "###);
    }

    #[test]
    fn rule_count_grows_quadratically() {
        assert_eq!(layered(&["a", "b"]).unwrap().rules().len(), 1);
        assert_eq!(layered(&["a", "b", "c", "d"]).unwrap().rules().len(), 6);
    }

    #[test]
    fn rejects_bad_layer_lists() {
        assert_eq!(
            layered(&["only"]).unwrap_err(),
            PatternError::TooFewLayers { count: 1 }
        );
        assert_eq!(
            layered::<&str>(&[]).unwrap_err(),
            PatternError::TooFewLayers { count: 0 }
        );
        assert!(matches!(
            layered(&["a", " "]).unwrap_err(),
            PatternError::EmptyNamespace { .. }
        ));
        assert_eq!(
            layered(&["a", "b", "a"]).unwrap_err(),
            PatternError::DuplicateLayer { name: "a".into() }
        );
    }
}
