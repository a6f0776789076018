use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

pub struct TestContext {
    pub _temp_dir: TempDir,
    pub cache_root: PathBuf,
    pub bin_path: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cache_root = temp_dir.path().join("tool-cache");

        let bin_path = PathBuf::from(env!("CARGO_BIN_EXE_setup-air"));

        Self {
            _temp_dir: temp_dir,
            cache_root,
            bin_path,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(&self.bin_path);
        cmd.env("AIR_TOOL_CACHE", &self.cache_root);
        cmd.env_remove("RUNNER_TOOL_CACHE");
        cmd.env_remove("GITHUB_TOKEN");
        // Isolate from the user's real cache directory
        cmd.env("HOME", self._temp_dir.path());
        cmd.env("XDG_CACHE_HOME", self._temp_dir.path().join("cache"));
        cmd
    }

    /// Seed a complete cache entry the way the installer would have left it.
    pub fn seed_cache_entry(&self, version: &str, arch: &str) {
        let version_dir = self.cache_root.join("air").join(version);
        let install_dir = version_dir.join(arch);
        std::fs::create_dir_all(&install_dir).expect("Failed to create cache entry");
        std::fs::write(install_dir.join("air"), "#!binary").expect("Failed to write binary");
        std::fs::write(version_dir.join(format!("{}.complete", arch)), "")
            .expect("Failed to write marker");
    }
}

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            status: output.status,
        }
    }
}

#[allow(dead_code)]
impl CommandOutput {
    pub fn assert_success(&self) -> &Self {
        if !self.status.success() {
            panic!(
                "Command failed with status {:?}\nstdout: {}\nstderr: {}",
                self.status.code(),
                self.stdout,
                self.stderr
            );
        }
        self
    }

    pub fn assert_failure(&self) -> &Self {
        if self.status.success() {
            panic!(
                "Command unexpectedly succeeded\nstdout: {}\nstderr: {}",
                self.stdout, self.stderr
            );
        }
        self
    }

    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Stdout did not contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }
}
