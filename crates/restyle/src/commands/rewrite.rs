//! `restyle rewrite`: apply the bundled rules to a stylesheet.

use std::path::Path;

use super::{read_file, CommandError, Output, ScanOptions};
use crate::rewrite::rewrite_with_children;
use crate::rules::RuleSet;

/// Rewrite a file with the bundled rule set.
///
/// Children declarations go to `--children=<path>` when given and are
/// dropped otherwise.
///
/// `--rules` is rejected: a table asset carries ids only, and the rewriter
/// needs the side table that says what each id means.
pub fn rewrite_file(path: &Path, options: &ScanOptions) -> Result<(), CommandError> {
    if options.rules.is_some() {
        return Err(CommandError::Usage(
            "rewrite uses the bundled rules; --rules is only supported by scan",
        ));
    }
    let content = read_file(path)?;
    let rules = RuleSet::bundled()?;
    let rewritten = rewrite_with_children(&content, &rules);

    if let Some(children) = options.children.as_deref() {
        Output::open(Some(children))?
            .write_with(|out| out.write_all(rewritten.children.as_bytes()))?;
    }
    Output::open(options.output.as_deref())?
        .write_with(|out| out.write_all(rewritten.style.as_bytes()))
}
