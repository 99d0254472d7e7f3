// Writing of the per-role ballot files.

use std::fs;
use std::path::Path;

use log::{debug, info};
use snafu::prelude::*;

use crate::split::*;

/// Writes one `<role>.csv` per role under `out_dir`, creating the directory if needed.
/// Existing ballot files are overwritten.
pub fn write_role_ballots(
    out_dir: &Path,
    roles: &[RoleColumns],
    rows: &[Vec<String>],
) -> BSplitResult<()> {
    fs::create_dir_all(out_dir).context(CreatingOutputDirSnafu {
        path: out_dir.display().to_string(),
    })?;
    for role in roles {
        let path = out_dir.join(format!("{}.csv", role.role));
        write_ballot_file(&path, role, rows)?;
        info!(
            "write_role_ballots: wrote {:?} ({} candidates, {} ballots)",
            path,
            role.candidates.len(),
            rows.len()
        );
    }
    Ok(())
}

fn write_ballot_file(path: &Path, role: &RoleColumns, rows: &[Vec<String>]) -> BSplitResult<()> {
    let display = path.display().to_string();
    let mut wtr = csv::Writer::from_path(path).context(BallotWriteSnafu {
        path: display.clone(),
    })?;
    wtr.write_record(&role.candidates).context(BallotWriteSnafu {
        path: display.clone(),
    })?;
    for (idx, row) in rows.iter().enumerate() {
        let prefs = row.get(role.start..role.end).context(CsvLineTooShortSnafu {
            // The ballots start at the fourth line of the export.
            lineno: idx + 4,
            width: row.len(),
        })?;
        debug!(
            "write_ballot_file: {:?} lineno: {:?} prefs: {:?}",
            role.role,
            idx + 4,
            prefs
        );
        wtr.write_record(prefs).context(BallotWriteSnafu {
            path: display.clone(),
        })?;
    }
    wtr.flush().context(BallotFlushSnafu { path: display })?;
    Ok(())
}
