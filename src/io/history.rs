use std::path::Path;

use tracing::{debug, info};

use crate::application::LedgerError;
use crate::domain::Payment;

use super::export::write_file;
use super::format::{self, Layout, PAYMENTS_FILE};

/// Records per history file when the caller has no preference.
pub const DEFAULT_HISTORY_CHUNK_SIZE: usize = 100;

/// Write `payments` under `dir` in files of at most `chunk_size` records.
///
/// A history that fits in one chunk goes to `payments.dump`. Longer histories
/// go to `payments1.dump`, `payments2.dump`, ... with every file full except
/// possibly the last; no empty trailing file is written. Nothing is written for
/// an empty history. Returns the number of files written.
pub fn history_to_files(
    payments: &[Payment],
    dir: impl AsRef<Path>,
    chunk_size: usize,
) -> Result<usize, LedgerError> {
    let dir = dir.as_ref();
    if chunk_size == 0 {
        return Err(LedgerError::InvalidChunkSize);
    }
    if payments.is_empty() {
        return Ok(0);
    }
    if payments.len() <= chunk_size {
        write_chunk(payments, &dir.join(PAYMENTS_FILE))?;
        info!(dir = %dir.display(), payments = payments.len(), files = 1, "history exported");
        return Ok(1);
    }

    let total = payments.len();
    let mut file_number = 1;
    let mut flushed = 0;
    let mut files = 0;

    for processed in 1..=total {
        let path = dir.join(format!("payments{}.dump", file_number));

        // Remainder at the end that does not fill a whole chunk
        if processed == total && processed - flushed != chunk_size {
            write_chunk(&payments[flushed..processed], &path)?;
            files += 1;
        }

        if processed - flushed == chunk_size {
            write_chunk(&payments[flushed..processed], &path)?;
            flushed += chunk_size;
            file_number += 1;
            files += 1;
        }
    }

    info!(
        dir = %dir.display(),
        format_version = format::FORMAT_VERSION,
        payments = total,
        files,
        "history exported"
    );
    Ok(files)
}

fn write_chunk(payments: &[Payment], path: &Path) -> Result<(), LedgerError> {
    let buffer = format::encode(payments, Layout::DUMP)?;
    write_file(path, &buffer)?;
    debug!(path = %path.display(), records = payments.len(), "history chunk written");
    Ok(())
}
