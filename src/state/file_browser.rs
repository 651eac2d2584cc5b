//! Directory listing state for the medical-record picker

use anyhow::Result;
use chrono::{DateTime, Local};
use std::fs;
use std::path::PathBuf;

/// Accept filter carried over from the intake form. The filter is a hint:
/// non-matching entries are dimmed in the listing but stay selectable, and
/// nothing downstream may assume the chosen file matches it.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "jpg", "png"];

/// A single entry in the directory listing
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub size: u64,
    pub modified: Option<DateTime<Local>>,
}

impl FileEntry {
    /// Whether the entry falls inside the advisory accept filter
    pub fn matches_accepted(&self) -> bool {
        if self.is_dir {
            return true;
        }
        match self.path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ACCEPTED_EXTENSIONS
                .iter()
                .any(|a| ext.eq_ignore_ascii_case(a)),
            None => false,
        }
    }
}

/// State of the record file picker
#[derive(Debug, Clone)]
pub struct FileBrowserState {
    pub current_dir: PathBuf,
    pub entries: Vec<FileEntry>,
    pub selected_index: usize,
    pub show_hidden: bool,
}

impl Default for FileBrowserState {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

impl FileBrowserState {
    pub fn new(start_dir: PathBuf) -> Self {
        Self {
            current_dir: start_dir,
            entries: Vec::new(),
            selected_index: 0,
            show_hidden: false,
        }
    }

    /// Re-read the current directory into `entries`.
    ///
    /// Lists a ".." parent entry unless at the filesystem root, then
    /// directories before files, each group sorted by name. Hidden entries
    /// are skipped unless `show_hidden` is set. The accept filter does NOT
    /// remove entries.
    pub fn read_directory(&mut self) -> Result<()> {
        self.entries.clear();
        self.selected_index = 0;

        if self.current_dir.parent().is_some() {
            self.entries.push(FileEntry {
                name: "..".to_string(),
                path: self.current_dir.join(".."),
                is_dir: true,
                size: 0,
                modified: None,
            });
        }

        let mut listed = Vec::new();
        for entry in fs::read_dir(&self.current_dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();

            if !self.show_hidden && name.starts_with('.') {
                continue;
            }

            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            listed.push(FileEntry {
                name,
                path: entry.path(),
                is_dir: metadata.is_dir(),
                size: metadata.len(),
                modified: metadata.modified().ok().map(DateTime::<Local>::from),
            });
        }

        listed.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
        self.entries.extend(listed);
        Ok(())
    }

    /// The entry under the cursor, if the listing is non-empty
    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.entries.get(self.selected_index)
    }

    /// Move the cursor up
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move the cursor down
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.entries.len() {
            self.selected_index += 1;
        }
    }

    /// Enter the selected entry.
    ///
    /// Descends into directories (".." ascends) and returns `None`;
    /// returns the path when the selection is a file.
    pub fn enter_selected(&mut self) -> Result<Option<PathBuf>> {
        let Some(entry) = self.selected_entry().cloned() else {
            return Ok(None);
        };
        if entry.is_dir {
            if entry.name == ".." {
                if let Some(parent) = self.current_dir.parent() {
                    self.current_dir = parent.to_path_buf();
                }
            } else {
                self.current_dir = entry.path;
            }
            self.read_directory()?;
            Ok(None)
        } else {
            Ok(Some(entry.path))
        }
    }

    /// Toggle hidden-file visibility and refresh the listing
    pub fn toggle_hidden(&mut self) -> Result<()> {
        self.show_hidden = !self.show_hidden;
        self.read_directory()
    }
}
