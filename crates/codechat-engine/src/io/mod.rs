use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use relative_path::{RelativePath, RelativePathBuf};

use crate::error::CodeChatError;
use crate::models::SourceFile;
use crate::syntax::CommentSyntaxRegistry;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid project directory: {0}")]
    InvalidProjectDir(String),
    #[error(transparent)]
    Engine(#[from] CodeChatError),
}

/// Raw text of a source file plus the language it should be classified as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSource {
    pub text: String,
    pub language: String,
}

/// Supplies source text for a path.
pub trait SourceLoader {
    fn load(&self, path: &RelativePath) -> Result<LoadedSource, IoError>;
}

/// Accepts reconstructed source for a path.
pub trait Persister {
    fn persist(&self, path: &RelativePath, contents: &str) -> Result<(), IoError>;
}

/// Loader and persister over a project directory on disk.
#[derive(Debug, Clone)]
pub struct FsProject {
    root: PathBuf,
    registry: Arc<CommentSyntaxRegistry>,
}

impl FsProject {
    pub fn open(root: impl Into<PathBuf>, registry: Arc<CommentSyntaxRegistry>) -> Result<Self, IoError> {
        let root = root.into();
        validate_project_dir(&root)?;
        Ok(Self { root, registry })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn registry(&self) -> &Arc<CommentSyntaxRegistry> {
        &self.registry
    }

    /// Source files under the root whose language the registry knows.
    pub fn source_files(&self) -> Result<Vec<SourceFile>, IoError> {
        scan_source_files(&self.root, &self.registry)
    }
}

impl SourceLoader for FsProject {
    fn load(&self, path: &RelativePath) -> Result<LoadedSource, IoError> {
        let text = read_file(path, &self.root)?;
        // Unregistered extensions still load; classification then degrades to
        // all code.
        let language = match self.registry.language_for_path(path.as_str()) {
            Some(id) => id.to_string(),
            None => path.extension().unwrap_or_default().to_string(),
        };
        Ok(LoadedSource { text, language })
    }
}

impl Persister for FsProject {
    fn persist(&self, path: &RelativePath, contents: &str) -> Result<(), IoError> {
        write_file(path, &self.root, contents)
    }
}

/// Read a source file and return its content
pub fn read_file(relative_path: &RelativePath, root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content to a source file
pub fn write_file(relative_path: &RelativePath, root: &Path, content: &str) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(root);

    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Scan for source files the registry recognises, skipping hidden directories.
pub fn scan_source_files(
    root: &Path,
    registry: &CommentSyntaxRegistry,
) -> Result<Vec<SourceFile>, IoError> {
    if !root.exists() {
        return Err(IoError::InvalidProjectDir(
            "project directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(root, root, registry, &mut files)?;
    files.sort_by(|a, b| a.relative_path().cmp(b.relative_path()));
    Ok(files)
}

fn scan_directory_recursive(
    root: &Path,
    dir: &Path,
    registry: &CommentSyntaxRegistry,
    files: &mut Vec<SourceFile>,
) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');

        if path.is_dir() {
            if !hidden {
                scan_directory_recursive(root, &path, registry, files)?;
            }
        } else if registry.language_for_path(&path).is_some()
            && let Ok(relative) = path.strip_prefix(root)
            && let Ok(relative) = RelativePathBuf::from_path(relative)
        {
            files.push(SourceFile::new(relative, registry));
        }
    }

    Ok(())
}

pub fn validate_project_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidProjectDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_file, create_test_project_dir};

    fn registry() -> Arc<CommentSyntaxRegistry> {
        Arc::new(CommentSyntaxRegistry::builtin())
    }

    #[test]
    fn test_scan_finds_recognised_sources() {
        let project = create_test_project_dir();
        create_test_file(&project, "main.c", "// doc\nint main() {}\n");
        create_test_file(&project, "tool.py", "# doc\n");
        create_test_file(&project, "notes.txt", "plain");

        let files = scan_source_files(project.path(), &registry()).unwrap();

        let names: Vec<&str> = files.iter().map(|f| f.relative_path().as_str()).collect();
        assert_eq!(names, vec!["main.c", "tool.py"]);
        assert_eq!(files[1].language(), Some("python"));
    }

    #[test]
    fn test_scan_nested_and_skips_hidden() {
        let project = create_test_project_dir();
        let sub_dir = project.path().join("src");
        std::fs::create_dir(&sub_dir).unwrap();
        std::fs::write(sub_dir.join("lib.rs"), "//! crate\n").unwrap();
        let hidden = project.path().join(".git");
        std::fs::create_dir(&hidden).unwrap();
        std::fs::write(hidden.join("hook.sh"), "# hook\n").unwrap();

        let files = scan_source_files(project.path(), &registry()).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path().as_str(), "src/lib.rs");
    }

    #[test]
    fn test_handle_invalid_project_directory() {
        let result = scan_source_files(Path::new("/this/path/does/not/exist"), &registry());
        assert!(result.unwrap_err().to_string().contains("project directory"));
        assert!(matches!(
            validate_project_dir(Path::new("/nonexistent/path")),
            Err(IoError::InvalidProjectDir(_))
        ));
    }

    #[test]
    fn test_read_file_not_found() {
        let project = create_test_project_dir();
        let result = read_file(RelativePath::new("missing.c"), project.path());
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_write_file_creates_parent_directories() {
        let project = create_test_project_dir();
        let relative_path = RelativePath::new("a/b/new.c");

        write_file(relative_path, project.path(), "int x;\n").unwrap();

        assert_eq!(
            read_file(relative_path, project.path()).unwrap(),
            "int x;\n"
        );
    }

    #[test]
    fn test_fs_project_loads_with_language() {
        let project = create_test_project_dir();
        create_test_file(&project, "x.go", "// doc\n");
        create_test_file(&project, "x.weird", "// doc\n");
        let fs_project = FsProject::open(project.path(), registry()).unwrap();

        let loaded = fs_project.load(RelativePath::new("x.go")).unwrap();
        assert_eq!(loaded.language, "go");
        assert_eq!(loaded.text, "// doc\n");

        let unknown = fs_project.load(RelativePath::new("x.weird")).unwrap();
        assert_eq!(unknown.language, "weird");
    }

    #[test]
    fn test_fs_project_persists() {
        let project = create_test_project_dir();
        let fs_project = FsProject::open(project.path(), registry()).unwrap();
        fs_project
            .persist(RelativePath::new("out.rs"), "// saved\n")
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(project.path().join("out.rs")).unwrap(),
            "// saved\n"
        );
    }
}
