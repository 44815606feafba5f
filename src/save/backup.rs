use crate::Result;
use std::path::Path;
use std::path::PathBuf;

/// sibling path a table is backed up to: `table.csv` -> `table.backup.csv`
pub fn backup_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}.backup.csv", stem))
}

/// copy an existing file to its backup path. nothing to back up is not an error.
pub fn backup(path: &Path) -> Result<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }
    let backup = backup_path(path);
    std::fs::copy(path, &backup)?;
    Ok(Some(backup))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_name() {
        assert_eq!(
            backup_path(Path::new("data/cashout.csv")),
            PathBuf::from("data/cashout.backup.csv")
        );
    }

    #[test]
    fn copies_existing_file() {
        let dir = std::env::temp_dir().join(format!("bjrtp-backup-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("table.csv");
        std::fs::write(&path, "hard\n").unwrap();
        let copied = backup(&path).unwrap().unwrap();
        assert_eq!(copied, dir.join("table.backup.csv"));
        assert_eq!(std::fs::read_to_string(copied).unwrap(), "hard\n");
        assert_eq!(backup(&dir.join("missing.csv")).unwrap(), None);
        std::fs::remove_dir_all(dir).unwrap();
    }
}
