#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use optab::{Database, render};

/// Path to a checked-in database under `tests/data`.
pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

/// A fresh, empty directory unique to this call.
pub fn scratch_dir(tag: &str) -> PathBuf {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("optab-{tag}-{}-{n}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Render a JSON database held in a string.
pub fn render_json(json: &str) -> String {
    render(&Database::from_json_str(json).unwrap()).unwrap()
}

/// Lines between `std::vector<Instruction> <table> = {` and the closing `};`.
pub fn table_lines<'a>(source: &'a str, table: &str) -> Vec<&'a str> {
    let open = format!("std::vector<Instruction> {table} = {{");
    source
        .lines()
        .skip_while(|l| *l != open)
        .skip(1)
        .take_while(|l| *l != "};")
        .collect()
}
