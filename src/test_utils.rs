use std::fs;
use std::path::PathBuf;

/// A scratch directory unique to the test and process, so concurrent runs never share files.
pub(crate) fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "solar_viability_{name}_{}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Path to a file under `tests/data`.
pub(crate) fn test_data(file_name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(file_name)
}
