use crate::generator::{DEFAULT_CONFIG, DEFAULT_TEMPLATE, GenerateRequest};
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) const THINGS_TEMPLATE: &str =
    "func Things() string {\n\treturn \"{{.Count}} items are made of {{.Material}}\"\n}\n";

pub(crate) const WOOL_CONFIG: &str = r#"{"Material":"wool","Count":17}"#;

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Scratch directory laid out like a project using the default paths.
pub(crate) fn create_fixture() -> TempDir {
    create_fixture_with(THINGS_TEMPLATE, WOOL_CONFIG)
}

pub(crate) fn create_fixture_with(template: &str, config: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    write(&path.join(DEFAULT_TEMPLATE), template);
    write(&path.join(DEFAULT_CONFIG), config);

    temp_dir
}

/// Request pointing at a fixture's files with absolute paths.
pub(crate) fn fixture_request(dir: &Path, package: &str) -> GenerateRequest {
    GenerateRequest {
        package: package.to_string(),
        template: dir.join(DEFAULT_TEMPLATE),
        config: dir.join(DEFAULT_CONFIG),
        out: dir.join("gen").join("things.go"),
    }
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}
