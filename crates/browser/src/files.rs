use std::{
    fs, io,
    path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("could not open {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("could not save {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Source of user-picked paths. `None` means the dialog was cancelled.
pub trait FileDialogs {
    fn pick_open(&mut self) -> Option<PathBuf>;
    fn pick_save(&mut self) -> Option<PathBuf>;
}

/// Blocking OS dialogs.
#[derive(Debug, Default)]
pub struct NativeDialogs;

impl FileDialogs for NativeDialogs {
    fn pick_open(&mut self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Open Page")
            .add_filter("Hypertext Markup Language", &["htm", "html"])
            .add_filter("All files", &["*"])
            .pick_file()
    }

    fn pick_save(&mut self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Save Page As")
            .add_filter("Hypertext Markup Language", &["htm", "html"])
            .add_filter("All files", &["*"])
            .save_file()
    }
}

/// Raw file text; no HTML validation.
pub fn read_page(path: &Path) -> Result<String, FileError> {
    fs::read_to_string(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_page(path: &Path, html: &str) -> Result<(), FileError> {
    fs::write(path, html).map_err(|source| FileError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.html");
        let err = read_page(&path).unwrap_err();
        assert!(matches!(err, FileError::Read { .. }));
        assert!(err.to_string().contains("nope.html"));
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("out.html");
        assert!(matches!(
            write_page(&path, "<p>x</p>"),
            Err(FileError::Write { .. })
        ));
    }
}
