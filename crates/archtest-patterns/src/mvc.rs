//! Model-View-Controller.

use crate::{forbid_all, require};
use archtest_core::{ArchitecturePattern, PatternError};

const NAME: &str = "MVC Architecture";

/// Rules, in order: model↛view, model↛controller, view↛controller.
///
/// # Errors
///
/// Returns [`PatternError::EmptyNamespace`] for a blank namespace.
pub fn mvc(model: &str, view: &str, controller: &str) -> Result<ArchitecturePattern, PatternError> {
    require(NAME, "model", model)?;
    require(NAME, "view", view)?;
    require(NAME, "controller", controller)?;

    Ok(ArchitecturePattern::new(
        NAME,
        forbid_all([(model, view), (model, controller), (view, controller)]),
    ))
}
