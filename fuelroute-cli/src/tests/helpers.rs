//! Test helpers for preparing CLI workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

use crate::ingest::{IngestArgs, run_ingest_with};

pub(super) const SAN_DIEGO: &str = "32.715736,-117.161087";
pub(super) const OKLAHOMA: &str = "34.052235,-95.08503";

/// Write `contents` to `path`, creating parent directories as needed.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent directories");
    }
    std::fs::write(path, contents).expect("write file");
}

/// Path to the bundled fuel price CSV fixture.
pub(super) fn fixture_csv() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fuel_stops.csv")
}

/// A temporary directory addressed through UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root =
            Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn database(&self) -> Utf8PathBuf {
        self.path("fuel_stops.db")
    }

    pub(super) fn cache(&self) -> Utf8PathBuf {
        self.path("route_cache.db")
    }

    /// Import the fixture CSV into [`Workspace::database`].
    pub(super) fn ingest_fixture(&self) {
        let args = IngestArgs {
            csv: Some(fixture_csv()),
            database: Some(self.database()),
        };
        let mut sink = Vec::new();
        run_ingest_with(args, &mut sink).expect("ingest fixture CSV");
    }
}
