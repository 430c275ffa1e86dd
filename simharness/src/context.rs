//! Run context shared by all stages.

use std::path::{Path, PathBuf};

/// Relative path of the firmware sketch under the project root.
pub const SKETCH_RELATIVE: &str = "addon/esp32/miner_esp32.ino";

/// Immutable per-run configuration threaded through every stage.
///
/// Created once by the orchestrator and passed by reference; no stage
/// mutates it. All derived paths are anchored at the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    project_root: PathBuf,
    addon_dir: PathBuf,
    sketch_path: PathBuf,
    firmware_elf: PathBuf,
    firmware_bin: PathBuf,
    manifest_path: PathBuf,
    diagram_path: PathBuf,
}

impl RunContext {
    /// Builds a context rooted at the given project directory.
    #[must_use]
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let addon_dir = project_root.join("addon").join("esp32");
        Self {
            sketch_path: addon_dir.join("miner_esp32.ino"),
            firmware_elf: addon_dir.join("miner_esp32.ino.elf"),
            firmware_bin: addon_dir.join("miner_esp32.ino.bin"),
            manifest_path: project_root.join("wokwi.toml"),
            diagram_path: project_root.join("diagram.json"),
            addon_dir,
            project_root,
        }
    }

    /// The project root directory.
    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// The firmware addon directory (`addon/esp32`).
    #[must_use]
    pub fn addon_dir(&self) -> &Path {
        &self.addon_dir
    }

    /// The firmware sketch expected to exist before a run.
    #[must_use]
    pub fn sketch_path(&self) -> &Path {
        &self.sketch_path
    }

    /// The compiled firmware ELF produced by the build stage.
    #[must_use]
    pub fn firmware_elf(&self) -> &Path {
        &self.firmware_elf
    }

    /// The compiled firmware binary produced by the build stage.
    #[must_use]
    pub fn firmware_bin(&self) -> &Path {
        &self.firmware_bin
    }

    /// Destination of the generated simulator manifest (`wokwi.toml`).
    #[must_use]
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Destination of the generated circuit diagram (`diagram.json`).
    #[must_use]
    pub fn diagram_path(&self) -> &Path {
        &self.diagram_path
    }
}
