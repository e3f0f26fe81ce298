//! Isolated test environment
//!
//! Builds a temp directory holding a build output tree (`site/`), a
//! directory-store environment (`www/`), and a `skylift.toml` pointing one
//! at the other. State (leases, manifests) stays inside the temp directory
//! so tests never touch the real home directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    /// Create an environment with an empty site and an empty store
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("site")).unwrap();
        fs::create_dir_all(dir.path().join("www")).unwrap();

        fs::write(
            dir.path().join("skylift.toml"),
            r#"
default_environment = "local"
state_dir = "state"

[environments.local]
root = "www"

[[environments.local.cache.rules]]
prefix = "assets/"
max_age = 31536000
"#,
        )
        .unwrap();

        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn site_dir(&self) -> PathBuf {
        self.dir.path().join("site")
    }

    /// Write one file into the build output
    pub fn write_artifact(&self, rel: &str, content: &str) {
        let path = self.site_dir().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Remove one file from the build output
    pub fn remove_artifact(&self, rel: &str) {
        fs::remove_file(self.site_dir().join(rel)).unwrap();
    }

    /// Path of a published object in the store
    pub fn published_path(&self, rel: &str) -> PathBuf {
        self.dir.path().join("www").join(rel)
    }

    /// Read a published object's content
    pub fn read_published(&self, rel: &str) -> String {
        fs::read_to_string(self.published_path(rel)).unwrap()
    }

    /// Run the skylift binary with the given arguments
    pub fn run(&self, args: &[&str]) -> Output {
        let bin = env!("CARGO_BIN_EXE_skylift");
        Command::new(bin)
            .current_dir(self.dir.path())
            .args(args)
            .output()
            .unwrap()
    }

    /// Run and assert the command exited successfully
    pub fn run_ok(&self, args: &[&str]) -> Output {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "command {:?} failed\nstdout:\n{}\nstderr:\n{}",
            args,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        output
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Stdout of an output as a string
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}
