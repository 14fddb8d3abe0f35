//! Common test utilities and helpers
//!
//! Builds a sandbox with fake board tools on PATH and a profile that
//! points every device and mount point into a temporary directory, so
//! the full pipeline can run without touching real hardware.

use std::path::PathBuf;

use assert_fs::TempDir;

/// Sandbox for one integration test run
pub struct TestBench {
    /// Temporary directory holding the fake bin dir, devices and mounts
    pub dir: TempDir,
}

impl TestBench {
    /// Create a new sandbox with an empty fake bin directory
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        // set NANDBURN_TEST_KEEP to inspect the sandbox after a failure
        let dir = dir.into_persistent_if(std::env::var_os("NANDBURN_TEST_KEEP").is_some());
        std::fs::create_dir_all(dir.path().join("bin")).expect("Failed to create bin directory");
        Self { dir }
    }

    /// Path inside the sandbox
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Install a fake tool as a shell script on the sandbox bin dir.
    ///
    /// Every fake appends its name and arguments to the file named by
    /// `NANDBURN_TEST_LOG` before running `body`, so tests can assert
    /// which tools ran and in what order.
    pub fn fake_tool(&self, name: &str, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        let script = format!(
            "#!/bin/sh\n\
             if [ -n \"$NANDBURN_TEST_LOG\" ]; then echo \"{name} $*\" >> \"$NANDBURN_TEST_LOG\"; fi\n\
             {body}\n"
        );
        let path = self.path("bin").join(name);
        std::fs::write(&path, script).expect("Failed to write fake tool");
        let mut perms = std::fs::metadata(&path)
            .expect("Failed to stat fake tool")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("Failed to chmod fake tool");
    }

    /// PATH value with the fake bin dir first
    pub fn path_env(&self) -> String {
        format!(
            "{}:{}",
            self.path("bin").display(),
            std::env::var("PATH").unwrap_or_default()
        )
    }

    /// File the fake tools log their invocations to
    pub fn log_path(&self) -> PathBuf {
        self.path("calls.log")
    }

    /// Logged fake tool invocations, one per line, in order
    pub fn logged_calls(&self) -> Vec<String> {
        match std::fs::read_to_string(self.log_path()) {
            Ok(content) => content.lines().map(ToString::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Write a profile that points all devices and mounts into the
    /// sandbox, with a populated source tree.
    pub fn write_profile(&self) -> PathBuf {
        std::fs::write(self.path("nand"), b"").expect("Failed to create fake device node");

        let source_boot = self.path("mnt/boot");
        std::fs::create_dir_all(&source_boot).expect("Failed to create source boot dir");
        std::fs::write(source_boot.join("uImage"), b"kernel").expect("Failed to write kernel");
        std::fs::write(source_boot.join("script.bin"), b"blob").expect("Failed to write blob");

        let profile = format!(
            r#"
nand_device = "{nand}"
boot_device = "{boot_dev}"
root_device = "{root_dev}"
boot_mount = "{boot_mount}"
root_mount = "{root_mount}"
source_mount = "{source_mount}"
settle_delay_ms = 0
"#,
            nand = self.path("nand").display(),
            boot_dev = self.path("nanda").display(),
            root_dev = self.path("nandb").display(),
            boot_mount = self.path("media/boot").display(),
            root_mount = self.path("media/rootfs").display(),
            source_mount = self.path("mnt").display(),
        );
        let path = self.path("nandburn.toml");
        std::fs::write(&path, profile).expect("Failed to write profile");
        path
    }

    /// Install the full set of fake board tools the pipeline invokes
    pub fn install_standard_tools(&self) {
        // no arguments is the identification probe
        self.fake_tool(
            "mkfs.msdos",
            r#"if [ $# -eq 0 ]; then
    echo "mkfs.fat 4.2 (2021-01-31)"
    echo "No device specified."
    exit 1
fi
echo "unable to get drive geometry, using default 255/63""#,
        );
        self.fake_tool(
            "fdisk",
            r#"if [ "$1" = "-l" ]; then
    echo "Disk $2: 2 GiB, 2147483648 bytes, total 4194304 sectors"
    exit 0
fi
echo "Usage:"
echo " fdisk [options] <disk>"
exit 1"#,
        );
        self.fake_tool(
            "nand-part",
            r#"read -r answer
echo "answer=$answer" >> "${NANDBURN_TEST_LOG:-/dev/null}"
echo "rereading partition table... returned 0""#,
        );
        self.fake_tool("dd", r#"echo "1048576 bytes (1.0 MB) copied, 0.1 s" >&2"#);
        self.fake_tool(
            "mkfs.ext4",
            r#"echo "Writing superblocks and filesystem accounting information: done""#,
        );
        self.fake_tool("mount", "exit 0");
        self.fake_tool("umount", "exit 0");
        self.fake_tool("sync", "exit 0");
        self.fake_tool("tar", "exit 0");
        self.fake_tool("cp", "exit 0");
    }
}

impl Default for TestBench {
    fn default() -> Self {
        Self::new()
    }
}
