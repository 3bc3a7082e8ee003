pub mod log;

use crate::Result;
use std::{fs, path::Path};

/// Creates `dir` and its parents when missing. Returns `true` if it was created.
pub fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        Ok(false)
    } else {
        fs::create_dir_all(dir)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::ensure_dir;

    #[test]
    fn creates_missing_output_dir() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("out").join("nested");

        assert_eq!(true, ensure_dir(&out).unwrap());
        assert!(out.is_dir());
        assert_eq!(false, ensure_dir(&out).unwrap());
    }

    #[test]
    fn fails_when_path_is_a_file() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("taken");
        std::fs::write(&file, "").unwrap();

        assert!(ensure_dir(&file).is_err());
    }
}
