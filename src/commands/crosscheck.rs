//! `pwdb crosscheck`

use std::io::Write;
use std::path::Path;

use pwdb_core::prelude::*;
use pwdb_data::crosscheck::{crosscheck, finish_renames, mark_mismatches, TopologyTables};

/// Report every model/geometry match below `pwdb_dir`
///
/// With `rename`, geometry directories that match another topology's
/// model are renamed after it. Returns whether every geometry matched
/// its own model.
pub fn run(pwdb_dir: &Path, rename: bool, out: &mut impl Write) -> Result<bool> {
    let tables = TopologyTables::load(pwdb_dir)
        .with_context(|| format!("loading topology tables from {}", pwdb_dir.display()))?;
    let matches = crosscheck(&tables);

    for found in &matches {
        writeln!(out, "{found}")?;
    }

    let ok = !matches.iter().any(|m| m.is_mismatch());
    if ok {
        writeln!(out, "models and geometries match OK")?;
    } else {
        writeln!(out, "models and geometries don't match")?;
    }

    if rename {
        mark_mismatches(pwdb_dir, &matches)?;
        for renamed in finish_renames(pwdb_dir)? {
            writeln!(
                out,
                "renaming {} as {}",
                renamed.from.display(),
                renamed.to.display()
            )?;
        }
    }

    info!("Crosscheck of {} finished, ok = {}", pwdb_dir.display(), ok);
    Ok(ok)
}
