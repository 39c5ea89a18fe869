//! `restyle build-rules`: write the bundled rule set as a table asset.

use std::path::PathBuf;

use tracing::debug;

use super::{CommandError, ScanOptions};
use crate::rules::RuleSet;

/// Encode the bundled rules and write the asset to `-o`.
///
/// Returns the path written and the asset size.
pub fn build_rules(options: &ScanOptions) -> Result<(PathBuf, usize), CommandError> {
    let Some(path) = options.output.clone() else {
        return Err(CommandError::Usage("build-rules needs an output file (-o <path>)"));
    };

    let rules = RuleSet::bundled()?;
    let bytes = rules.table().as_bytes();
    std::fs::write(&path, bytes).map_err(|source| CommandError::Write {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), rules = rules.len(), "wrote rule table");

    Ok((path, bytes.len()))
}
