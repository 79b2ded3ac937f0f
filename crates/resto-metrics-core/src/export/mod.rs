//! Export serializers.
//!
//! Two artifact builders that re-derive the same analyses the screen shows
//! and must match it figure for figure. Only the data contracts live here;
//! binary workbook/document rendering is out of scope. Artifacts serialize
//! to JSON bodies written atomically — a failed write never leaves a
//! partial file behind.

#[cfg(feature = "report")]
pub mod report;
#[cfg(feature = "spreadsheet")]
pub mod spreadsheet;

use std::path::{Path, PathBuf};

use crate::RestoMetricsResult;

/// Write fully-serialized bytes through a temp file and rename, so the
/// target path either holds the complete artifact or is untouched.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> RestoMetricsResult<()> {
    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    std::fs::write(&tmp, bytes)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}
