//! Project directory fixtures.

use std::path::{Path, PathBuf};

/// Creates the firmware sketch (and its addon directory) under the given
/// project root, returning the sketch path.
pub fn write_sketch(project_root: &Path) -> std::io::Result<PathBuf> {
    let addon = project_root.join("addon").join("esp32");
    std::fs::create_dir_all(&addon)?;
    let sketch = addon.join("miner_esp32.ino");
    std::fs::write(&sketch, "// firmware sketch placeholder\nvoid setup() {}\nvoid loop() {}\n")?;
    Ok(sketch)
}

/// Creates a temporary project directory containing the firmware sketch.
#[cfg(test)]
pub(crate) fn project_with_sketch() -> (tempfile::TempDir, crate::context::RunContext) {
    let dir = tempfile::tempdir().unwrap();
    write_sketch(dir.path()).unwrap();
    let ctx = crate::context::RunContext::new(dir.path());
    (dir, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_sketch_creates_expected_layout() {
        let dir = tempfile::tempdir().unwrap();
        let sketch = write_sketch(dir.path()).unwrap();
        assert!(sketch.ends_with("addon/esp32/miner_esp32.ino"));
        assert!(sketch.exists());
    }
}
