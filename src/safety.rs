//! Guards against overwriting inputs with parsed output.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Validates that an output path is safe to write.
///
/// Checks:
/// - Output must be a `.json` file
/// - Output cannot be any of `protected` (the input file and the dictionaries),
///   comparing canonical paths when the files exist
pub fn validate_output_path(output: &Path, protected: &[&Path]) -> Result<()> {
    let is_json = output
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        bail!(
            "Safety check failed: output file '{}' must have a .json extension",
            output.display()
        );
    }

    let output_key = canonical_or_raw(output);
    for source in protected {
        if output_key == canonical_or_raw(source) {
            bail!(
                "Safety check failed: output '{}' cannot overwrite input '{}'",
                output.display(),
                source.display()
            );
        }
    }

    Ok(())
}

fn canonical_or_raw(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
