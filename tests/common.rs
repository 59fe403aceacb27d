use std::path::{Path, PathBuf};

use pathfinder_geometry::vector::Vector2F;

/// Largest difference tolerated between coordinates after lossy float transforms.
pub const TOLERANCE: f32 = 1e-3;

pub fn fixture_path<P: AsRef<Path>>(path: P) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(path)
}

/// Read a test fixture from a path relative to CARGO_MANIFEST_DIR
pub fn read_fixture<P: AsRef<Path>>(path: P) -> Vec<u8> {
    std::fs::read(&fixture_path(path)).expect("error reading file contents")
}

pub fn assert_vector_close(actual: Vector2F, expected: Vector2F) {
    assert!(
        (actual - expected).length() <= TOLERANCE,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}
