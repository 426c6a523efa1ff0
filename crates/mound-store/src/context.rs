//! Process-scoped store root.
//!
//! For programs that want a single store per process without threading a
//! [`StoreConfig`] through every call site. The context starts empty and
//! must be set with [`configure`] before [`Record::create`] is used.
//! Records capture their directory when created, so reconfiguring or
//! resetting the context does not move existing records.
//!
//! [`Record::create`]: crate::Record::create

use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::config::{validate_root, StoreConfig};
use crate::error::StoreResult;

static CONTEXT: RwLock<Option<PathBuf>> = RwLock::new(None);

/// Set the process-wide store root, replacing any previous value.
pub fn configure(root: impl Into<PathBuf>) -> StoreResult<()> {
    let root = root.into();
    validate_root(&root)?;
    debug!(root = %root.display(), "store context configured");
    *CONTEXT.write().expect("context lock poisoned") = Some(root);
    Ok(())
}

/// Install the root from a [`StoreConfig`]; an unconfigured value resets.
pub fn install(config: &StoreConfig) -> StoreResult<()> {
    match config.root {
        Some(ref root) => configure(root.clone()),
        None => {
            reset();
            Ok(())
        }
    }
}

/// Snapshot of the current context as a configuration value.
pub fn current() -> StoreConfig {
    StoreConfig {
        root: CONTEXT.read().expect("context lock poisoned").clone(),
    }
}

/// Return the context to the unconfigured state.
pub fn reset() {
    *CONTEXT.write().expect("context lock poisoned") = None;
}

pub fn is_configured() -> bool {
    CONTEXT.read().expect("context lock poisoned").is_some()
}
