use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    // Askama reads templates at compile time; without explicit cargo hints a
    // template edit doesn't trigger a rebuild.
    rerun_if_changed_dir("templates");
}

fn rerun_if_changed_dir(dir: impl AsRef<Path>) {
    let dir = dir.as_ref();
    if !dir.exists() {
        return;
    }
    let mut stack: Vec<PathBuf> = vec![dir.to_path_buf()];
    while let Some(path) = stack.pop() {
        let Ok(entries) = fs::read_dir(&path) else {
            continue;
        };
        for entry in entries.flatten() {
            let p = entry.path();
            if p.is_dir() {
                stack.push(p);
                continue;
            }
            if p.extension().and_then(|s| s.to_str()) == Some("html") {
                println!("cargo:rerun-if-changed={}", p.display());
            }
        }
    }
}
