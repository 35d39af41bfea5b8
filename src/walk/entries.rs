//! Directory entry helpers shared by the walker

use std::fs::{self, DirEntry};
use std::path::Path;

/// What the walker does with a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Real directory: candidate for descent.
    Dir,
    /// Anything readable as a file, including symlinks to files and broken
    /// symlinks (which surface as read errors).
    File,
    /// Symlink to a directory: neither written nor descended.
    DirLink,
    /// FIFOs, sockets, devices.
    Special,
}

/// Classify an entry without following directory symlinks.
pub fn classify(entry: &DirEntry) -> EntryKind {
    let Ok(file_type) = entry.file_type() else {
        return EntryKind::File;
    };

    if file_type.is_dir() {
        EntryKind::Dir
    } else if file_type.is_file() {
        EntryKind::File
    } else if file_type.is_symlink() {
        match fs::metadata(entry.path()) {
            Ok(meta) if meta.is_dir() => EntryKind::DirLink,
            _ => EntryKind::File,
        }
    } else {
        EntryKind::Special
    }
}

/// Read a directory's entries, optionally sorted by file name.
pub fn read_entries(path: &Path, sort: bool) -> std::io::Result<Vec<DirEntry>> {
    let mut entries: Vec<_> = fs::read_dir(path)?.filter_map(|e| e.ok()).collect();
    if sort {
        entries.sort_by_key(|a| a.file_name());
    }
    Ok(entries)
}

/// Join a child name onto a root-relative path using forward slashes.
pub fn child_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}
