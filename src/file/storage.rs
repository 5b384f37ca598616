//! File storage for Sharebox.
//!
//! Items live directly on the host filesystem, one directory per user:
//! ```text
//! {base_path}/
//! ├── alice/
//! │   ├── notes.txt
//! │   ├── notes.txt.meta.json
//! │   └── photos/
//! │       ├── cat.png
//! │       └── cat.png.meta.json
//! └── bob/
//!     └── ...
//! ```
//!
//! Every operation is a plain filesystem call. Nothing is locked, so
//! concurrent requests touching the same path may race.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::metadata::{self, AccessMode, ItemMeta};
use super::path::{normalize_item, normalize_relative};
use super::VIEWABLE_EXTENSIONS;
use crate::auth::validate_username;
use crate::{Result, ShareError};

/// Kind of a stored item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Regular file.
    File,
    /// Directory.
    Folder,
}

/// A directory entry paired with its access mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEntry {
    /// Entry name.
    pub name: String,
    /// File or folder.
    pub kind: ItemKind,
    /// Access mode from the sidecar (public if none).
    pub mode: AccessMode,
    /// Size in bytes (0 for folders).
    pub size: u64,
    /// Last modification time, if the filesystem reports one.
    pub modified: Option<DateTime<Utc>>,
}

/// A file received for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Relative path of the file, including any folders.
    pub name: String,
    /// File content.
    pub content: Vec<u8>,
}

impl UploadFile {
    /// Create a new upload entry.
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A file loaded for download.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    /// File name (last path component).
    pub name: String,
    /// File content.
    pub content: Vec<u8>,
}

/// Per-user hierarchical file store.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Root directory containing one directory per user.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new FileStorage with the given base path.
    ///
    /// The base directory will be created if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Get the base path of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get a user's root directory.
    pub fn user_dir(&self, username: &str) -> Result<PathBuf> {
        validate_username(username).map_err(|e| ShareError::Validation(e.to_string()))?;
        Ok(self.base_path.join(username))
    }

    /// Resolve a client path inside a user's directory.
    ///
    /// An empty path resolves to the user's root.
    pub fn resolve(&self, username: &str, relative: &str) -> Result<PathBuf> {
        let relative = normalize_relative(relative)?;
        Ok(self.user_dir(username)?.join(relative))
    }

    /// Resolve a client path that must name an item below the user's root.
    ///
    /// Sidecars are not items; naming one reports it as missing.
    fn resolve_item(&self, username: &str, relative: &str) -> Result<PathBuf> {
        let relative = normalize_item(relative)?;
        if is_sidecar_path(&relative) {
            return Err(ShareError::NotFound("File".to_string()));
        }
        Ok(self.user_dir(username)?.join(relative))
    }

    /// Store uploaded files, each with a sidecar recording `mode`.
    ///
    /// Parent folders are created as needed and existing files are
    /// overwritten. All names are checked before anything is written.
    /// Returns the number of files stored.
    pub fn upload(&self, username: &str, files: &[UploadFile], mode: AccessMode) -> Result<usize> {
        if files.is_empty() {
            return Err(ShareError::Validation("No files uploaded".to_string()));
        }

        let user_dir = self.user_dir(username)?;
        let targets = files
            .iter()
            .map(|file| {
                let relative = normalize_item(&file.name)?;
                ensure_not_sidecar(&relative)?;
                Ok(user_dir.join(relative))
            })
            .collect::<Result<Vec<_>>>()?;

        fs::create_dir_all(&user_dir)?;

        let meta = ItemMeta::new(mode);
        for (file, target) in files.iter().zip(&targets) {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(target, &file.content)?;
            metadata::write_meta(target, &meta)?;

            tracing::debug!(
                username = %username,
                path = %file.name,
                size = file.content.len(),
                mode = %mode,
                "Stored file"
            );
        }

        Ok(files.len())
    }

    /// List a folder, skipping sidecar files.
    ///
    /// Entries are sorted by name. A user who has never uploaded anything
    /// gets an empty listing of their root.
    pub fn list(&self, username: &str, relative: &str) -> Result<Vec<ItemEntry>> {
        let dir = self.resolve(username, relative)?;

        if !dir.is_dir() {
            if normalize_relative(relative)?.as_os_str().is_empty() && !dir.exists() {
                return Ok(Vec::new());
            }
            return Err(ShareError::NotFound("Directory".to_string()));
        }

        let mut items = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if metadata::is_sidecar(&name) {
                continue;
            }

            let info = entry.metadata()?;
            let kind = if info.is_dir() {
                ItemKind::Folder
            } else {
                ItemKind::File
            };

            items.push(ItemEntry {
                mode: metadata::read_mode(&entry.path()),
                size: if kind == ItemKind::File { info.len() } else { 0 },
                modified: info.modified().ok().map(DateTime::<Utc>::from),
                name,
                kind,
            });
        }

        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    /// Load a file for download, honouring its access mode.
    pub fn download(&self, username: &str, relative: &str) -> Result<DownloadedFile> {
        let path = self.resolve_item(username, relative)?;

        if !path.exists() {
            return Err(ShareError::NotFound("File".to_string()));
        }
        if !path.is_file() {
            return Err(ShareError::Validation("Not a file".to_string()));
        }

        let mode = metadata::read_mode(&path);
        if let Some(reason) = mode.block_reason() {
            tracing::warn!(username = %username, path = %relative, mode = %mode, "Download blocked");
            return Err(ShareError::AccessBlocked(reason.to_string()));
        }

        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ShareError::NotFound("File".to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        Ok(DownloadedFile {
            name: file_name(&path),
            content,
        })
    }

    /// Read a text file for inline viewing.
    ///
    /// Only files with a viewable extension are served. The access mode
    /// is not consulted.
    pub fn view(&self, username: &str, relative: &str) -> Result<String> {
        let path = self.resolve_item(username, relative)?;

        if !path.exists() {
            return Err(ShareError::NotFound("File".to_string()));
        }
        if !is_viewable(&path) {
            return Err(ShareError::AccessBlocked(
                "File type not supported for viewing".to_string(),
            ));
        }

        let bytes = fs::read(&path)?;
        String::from_utf8(bytes)
            .map_err(|e| ShareError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Rename an item, carrying its sidecar along.
    pub fn rename(&self, username: &str, old: &str, new: &str) -> Result<()> {
        self.relocate(username, old, new)
    }

    /// Move an item to another folder, carrying its sidecar along.
    ///
    /// `new` is the full destination path; its parent folder must exist.
    pub fn move_item(&self, username: &str, old: &str, new: &str) -> Result<()> {
        self.relocate(username, old, new)
    }

    fn relocate(&self, username: &str, old: &str, new: &str) -> Result<()> {
        let from = self.resolve_item(username, old)?;
        let to_relative = normalize_item(new)?;
        ensure_not_sidecar(&to_relative)?;
        let to = self.user_dir(username)?.join(to_relative);

        fs::rename(&from, &to)?;
        // The item has already moved; a failed sidecar rename leaves it orphaned.
        metadata::rename_meta(&from, &to)?;

        Ok(())
    }

    /// Delete an item; folders are removed with everything inside them.
    pub fn delete(&self, username: &str, relative: &str) -> Result<()> {
        let path = self.resolve_item(username, relative)?;

        let info = match fs::symlink_metadata(&path) {
            Ok(info) => info,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ShareError::NotFound("File".to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        if info.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        metadata::remove_meta(&path)?;

        Ok(())
    }
}

/// Whether a file may be shown inline, judged by its extension.
pub fn is_viewable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            VIEWABLE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

fn is_sidecar_path(relative: &Path) -> bool {
    relative
        .file_name()
        .and_then(|name| name.to_str())
        .map(metadata::is_sidecar)
        .unwrap_or(false)
}

fn ensure_not_sidecar(relative: &Path) -> Result<()> {
    if is_sidecar_path(relative) {
        return Err(ShareError::Validation(format!(
            "Names ending in {} are reserved",
            metadata::META_SUFFIX
        )));
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::metadata::sidecar_path;
    use tempfile::TempDir;

    fn setup_storage() -> (TempDir, FileStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path()).unwrap();
        (temp_dir, storage)
    }

    fn upload_one(storage: &FileStorage, name: &str, content: &[u8], mode: AccessMode) {
        storage
            .upload("alice", &[UploadFile::new(name, content)], mode)
            .unwrap();
    }

    #[test]
    fn test_new_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let storage_path = temp_dir.path().join("uploads");

        assert!(!storage_path.exists());

        let storage = FileStorage::new(&storage_path).unwrap();

        assert!(storage_path.exists());
        assert_eq!(storage.base_path(), storage_path);
    }

    #[test]
    fn test_resolve_stays_in_user_dir() {
        let (_temp_dir, storage) = setup_storage();

        let path = storage.resolve("alice", "docs/a.txt").unwrap();
        assert_eq!(path, storage.base_path().join("alice").join("docs").join("a.txt"));

        assert_eq!(
            storage.resolve("alice", "").unwrap(),
            storage.base_path().join("alice")
        );
        assert!(storage.resolve("alice", "../bob").is_err());
        assert!(storage.resolve("..", "x").is_err());
    }

    #[test]
    fn test_upload_writes_file_and_sidecar() {
        let (_temp_dir, storage) = setup_storage();

        let count = storage
            .upload(
                "alice",
                &[UploadFile::new("hello.txt", b"Hello".to_vec())],
                AccessMode::Private,
            )
            .unwrap();

        assert_eq!(count, 1);
        let path = storage.base_path().join("alice").join("hello.txt");
        assert_eq!(fs::read(&path).unwrap(), b"Hello");
        assert_eq!(metadata::read_mode(&path), AccessMode::Private);
    }

    #[test]
    fn test_upload_folder_preserves_structure() {
        let (_temp_dir, storage) = setup_storage();

        let files = vec![
            UploadFile::new("project/README.md", b"# Readme".to_vec()),
            UploadFile::new("project/src/main.js", b"console.log(1)".to_vec()),
        ];
        storage.upload("alice", &files, AccessMode::Public).unwrap();

        let root = storage.base_path().join("alice").join("project");
        assert!(root.join("README.md").is_file());
        assert!(root.join("src").join("main.js").is_file());
        // Implicit folders carry no sidecar
        assert!(!sidecar_path(&root).exists());
        assert!(!sidecar_path(&root.join("src")).exists());
    }

    #[test]
    fn test_upload_overwrites_existing() {
        let (_temp_dir, storage) = setup_storage();

        upload_one(&storage, "a.txt", b"first", AccessMode::Private);
        upload_one(&storage, "a.txt", b"second", AccessMode::Public);

        let path = storage.base_path().join("alice").join("a.txt");
        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert_eq!(metadata::read_mode(&path), AccessMode::Public);
    }

    #[test]
    fn test_upload_empty_rejected() {
        let (_temp_dir, storage) = setup_storage();

        let result = storage.upload("alice", &[], AccessMode::Public);
        assert!(matches!(result, Err(ShareError::Validation(_))));
    }

    #[test]
    fn test_upload_rejects_traversal_without_writing() {
        let (_temp_dir, storage) = setup_storage();

        let files = vec![
            UploadFile::new("ok.txt", b"fine".to_vec()),
            UploadFile::new("../escape.txt", b"bad".to_vec()),
        ];
        let result = storage.upload("alice", &files, AccessMode::Public);

        assert!(matches!(result, Err(ShareError::Validation(_))));
        assert!(!storage.base_path().join("alice").join("ok.txt").exists());
        assert!(!storage.base_path().join("escape.txt").exists());
    }

    #[test]
    fn test_upload_rejects_sidecar_names() {
        let (_temp_dir, storage) = setup_storage();

        let result = storage.upload(
            "alice",
            &[UploadFile::new("x.meta.json", b"{}".to_vec())],
            AccessMode::Public,
        );
        assert!(matches!(result, Err(ShareError::Validation(_))));
    }

    #[test]
    fn test_list_hides_sidecars() {
        let (_temp_dir, storage) = setup_storage();

        upload_one(&storage, "b.txt", b"bb", AccessMode::Testing);
        upload_one(&storage, "a.txt", b"a", AccessMode::Public);
        upload_one(&storage, "docs/c.md", b"c", AccessMode::Private);

        let items = storage.list("alice", "").unwrap();

        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "docs"]);
        assert!(items.iter().all(|i| !metadata::is_sidecar(&i.name)));

        assert_eq!(items[1].mode, AccessMode::Testing);
        assert_eq!(items[1].kind, ItemKind::File);
        assert_eq!(items[1].size, 2);
        assert!(items[1].modified.is_some());

        assert_eq!(items[2].kind, ItemKind::Folder);
        assert_eq!(items[2].mode, AccessMode::Public);
        assert_eq!(items[2].size, 0);
    }

    #[test]
    fn test_list_subfolder() {
        let (_temp_dir, storage) = setup_storage();

        upload_one(&storage, "docs/c.md", b"c", AccessMode::Private);

        let items = storage.list("alice", "docs").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "c.md");
        assert_eq!(items[0].mode, AccessMode::Private);
    }

    #[test]
    fn test_list_missing_directory() {
        let (_temp_dir, storage) = setup_storage();
        upload_one(&storage, "a.txt", b"a", AccessMode::Public);

        let result = storage.list("alice", "nope");
        assert!(matches!(result, Err(ShareError::NotFound(_))));

        let result = storage.list("alice", "a.txt");
        assert!(matches!(result, Err(ShareError::NotFound(_))));
    }

    #[test]
    fn test_list_unknown_user_root_is_empty() {
        let (_temp_dir, storage) = setup_storage();

        assert!(storage.list("nobody", "").unwrap().is_empty());
        assert!(matches!(
            storage.list("nobody", "docs"),
            Err(ShareError::NotFound(_))
        ));
    }

    #[test]
    fn test_download_public() {
        let (_temp_dir, storage) = setup_storage();
        upload_one(&storage, "docs/report.pdf", b"%PDF", AccessMode::Public);

        let file = storage.download("alice", "docs/report.pdf").unwrap();

        assert_eq!(file.name, "report.pdf");
        assert_eq!(file.content, b"%PDF");
    }

    #[test]
    fn test_download_without_sidecar_is_public() {
        let (_temp_dir, storage) = setup_storage();
        let user_dir = storage.base_path().join("alice");
        fs::create_dir_all(&user_dir).unwrap();
        fs::write(user_dir.join("raw.bin"), [1u8, 2, 3]).unwrap();

        let file = storage.download("alice", "raw.bin").unwrap();
        assert_eq!(file.content, vec![1, 2, 3]);
    }

    #[test]
    fn test_download_blocked_modes() {
        let (_temp_dir, storage) = setup_storage();
        upload_one(&storage, "private.txt", b"p", AccessMode::Private);
        upload_one(&storage, "testing.txt", b"t", AccessMode::Testing);

        match storage.download("alice", "private.txt") {
            Err(ShareError::AccessBlocked(msg)) => {
                assert_eq!(msg, "Download blocked: private file")
            }
            other => panic!("Expected AccessBlocked, got {other:?}"),
        }
        match storage.download("alice", "testing.txt") {
            Err(ShareError::AccessBlocked(msg)) => {
                assert_eq!(msg, "Download blocked: testing mode")
            }
            other => panic!("Expected AccessBlocked, got {other:?}"),
        }
    }

    #[test]
    fn test_download_not_found_and_folder() {
        let (_temp_dir, storage) = setup_storage();
        upload_one(&storage, "docs/a.txt", b"a", AccessMode::Public);

        assert!(matches!(
            storage.download("alice", "missing.txt"),
            Err(ShareError::NotFound(_))
        ));
        assert!(matches!(
            storage.download("alice", "docs"),
            Err(ShareError::Validation(_))
        ));
    }

    #[test]
    fn test_view_text_file() {
        let (_temp_dir, storage) = setup_storage();
        upload_one(&storage, "notes/TODO.MD", "- ship it ✓".as_bytes(), AccessMode::Private);

        let content = storage.view("alice", "notes/TODO.MD").unwrap();
        assert_eq!(content, "- ship it ✓");
    }

    #[test]
    fn test_view_unsupported_extension() {
        let (_temp_dir, storage) = setup_storage();
        upload_one(&storage, "image.png", b"\x89PNG", AccessMode::Public);

        assert!(matches!(
            storage.view("alice", "image.png"),
            Err(ShareError::AccessBlocked(_))
        ));
        assert!(matches!(
            storage.view("alice", "missing.txt"),
            Err(ShareError::NotFound(_))
        ));
    }

    #[test]
    fn test_view_invalid_utf8() {
        let (_temp_dir, storage) = setup_storage();
        upload_one(&storage, "binary.txt", &[0xffu8, 0xfe, 0x00], AccessMode::Public);

        assert!(matches!(
            storage.view("alice", "binary.txt"),
            Err(ShareError::Io(_))
        ));
    }

    #[test]
    fn test_is_viewable() {
        assert!(is_viewable(Path::new("a.txt")));
        assert!(is_viewable(Path::new("a.JS")));
        assert!(is_viewable(Path::new("dir/package.json")));
        assert!(is_viewable(Path::new("README.md")));
        assert!(!is_viewable(Path::new("a.html")));
        assert!(!is_viewable(Path::new("txt")));
        assert!(!is_viewable(Path::new("archive.tar.gz")));
    }

    #[test]
    fn test_rename_moves_sidecar() {
        let (_temp_dir, storage) = setup_storage();
        upload_one(&storage, "old.txt", b"data", AccessMode::Testing);

        storage.rename("alice", "old.txt", "new.txt").unwrap();

        let user_dir = storage.base_path().join("alice");
        assert!(!user_dir.join("old.txt").exists());
        assert!(!sidecar_path(&user_dir.join("old.txt")).exists());
        assert_eq!(fs::read(user_dir.join("new.txt")).unwrap(), b"data");
        assert_eq!(metadata::read_mode(&user_dir.join("new.txt")), AccessMode::Testing);
    }

    #[test]
    fn test_rename_without_sidecar() {
        let (_temp_dir, storage) = setup_storage();
        upload_one(&storage, "docs/a.txt", b"a", AccessMode::Public);

        storage.rename("alice", "docs", "papers").unwrap();

        let user_dir = storage.base_path().join("alice");
        assert!(user_dir.join("papers").join("a.txt").is_file());
        assert!(!sidecar_path(&user_dir.join("papers")).exists());
        // Descendant sidecars travel with the folder
        assert!(sidecar_path(&user_dir.join("papers").join("a.txt")).exists());
    }

    #[test]
    fn test_rename_missing_source_fails() {
        let (_temp_dir, storage) = setup_storage();
        upload_one(&storage, "a.txt", b"a", AccessMode::Public);

        assert!(matches!(
            storage.rename("alice", "missing.txt", "b.txt"),
            Err(ShareError::Io(_))
        ));
    }

    #[test]
    fn test_rename_rejects_unsafe_destination() {
        let (_temp_dir, storage) = setup_storage();
        upload_one(&storage, "a.txt", b"a", AccessMode::Public);

        assert!(matches!(
            storage.rename("alice", "a.txt", "../../stolen.txt"),
            Err(ShareError::Validation(_))
        ));
        assert!(matches!(
            storage.rename("alice", "a.txt", "a.txt.meta.json"),
            Err(ShareError::Validation(_))
        ));
        assert!(storage.base_path().join("alice").join("a.txt").exists());
    }

    #[test]
    fn test_move_into_folder() {
        let (_temp_dir, storage) = setup_storage();
        upload_one(&storage, "a.txt", b"a", AccessMode::Private);
        upload_one(&storage, "archive/keep.txt", b"k", AccessMode::Public);

        storage.move_item("alice", "a.txt", "archive/a.txt").unwrap();

        let archive = storage.base_path().join("alice").join("archive");
        assert!(archive.join("a.txt").is_file());
        assert_eq!(metadata::read_mode(&archive.join("a.txt")), AccessMode::Private);
        assert!(!storage.base_path().join("alice").join("a.txt").exists());
    }

    #[test]
    fn test_move_to_missing_parent_fails() {
        let (_temp_dir, storage) = setup_storage();
        upload_one(&storage, "a.txt", b"a", AccessMode::Public);

        assert!(matches!(
            storage.move_item("alice", "a.txt", "nowhere/a.txt"),
            Err(ShareError::Io(_))
        ));
        assert!(storage.base_path().join("alice").join("a.txt").exists());
    }

    #[test]
    fn test_delete_file_and_sidecar() {
        let (_temp_dir, storage) = setup_storage();
        upload_one(&storage, "a.txt", b"a", AccessMode::Private);

        storage.delete("alice", "a.txt").unwrap();

        let path = storage.base_path().join("alice").join("a.txt");
        assert!(!path.exists());
        assert!(!sidecar_path(&path).exists());
    }

    #[test]
    fn test_delete_folder_recursively() {
        let (_temp_dir, storage) = setup_storage();
        let files = vec![
            UploadFile::new("album/one.jpg", b"1".to_vec()),
            UploadFile::new("album/nested/two.jpg", b"2".to_vec()),
        ];
        storage.upload("alice", &files, AccessMode::Testing).unwrap();
        let album = storage.base_path().join("alice").join("album");
        metadata::write_meta(&album, &ItemMeta::new(AccessMode::Private)).unwrap();

        storage.delete("alice", "album").unwrap();

        assert!(!album.exists());
        assert!(!sidecar_path(&album).exists());
        assert!(storage.list("alice", "").unwrap().is_empty());
    }

    #[test]
    fn test_delete_not_found() {
        let (_temp_dir, storage) = setup_storage();

        assert!(matches!(
            storage.delete("alice", "ghost.txt"),
            Err(ShareError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_refuses_user_root() {
        let (_temp_dir, storage) = setup_storage();
        upload_one(&storage, "a.txt", b"a", AccessMode::Public);

        assert!(matches!(
            storage.delete("alice", "/"),
            Err(ShareError::Validation(_))
        ));
        assert!(storage.base_path().join("alice").join("a.txt").exists());
    }

    #[test]
    fn test_sidecars_are_not_addressable() {
        let (_temp_dir, storage) = setup_storage();
        upload_one(&storage, "a.txt", b"secret", AccessMode::Private);
        let item = storage.base_path().join("alice").join("a.txt");

        for result in [
            storage.download("alice", "a.txt.meta.json").map(|_| ()),
            storage.view("alice", "a.txt.meta.json").map(|_| ()),
            storage.rename("alice", "a.txt.meta.json", "b.txt"),
            storage.move_item("alice", "a.txt.meta.json", "b.txt"),
            storage.delete("alice", "a.txt.meta.json"),
        ] {
            assert!(matches!(result, Err(ShareError::NotFound(_))));
        }

        assert!(sidecar_path(&item).exists());
        assert_eq!(metadata::read_mode(&item), AccessMode::Private);
    }

    #[test]
    fn test_users_are_isolated() {
        let (_temp_dir, storage) = setup_storage();
        upload_one(&storage, "mine.txt", b"a", AccessMode::Public);

        assert!(storage.list("bob", "").unwrap().is_empty());
        assert!(matches!(
            storage.download("bob", "mine.txt"),
            Err(ShareError::NotFound(_))
        ));
    }
}
