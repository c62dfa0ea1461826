// Stages the demo site from `static/` into `dist/`.
use std::path::Path;

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    let src = Path::new("static");
    if !src.exists() {
        return;
    }
    let out = Path::new("dist");
    if let Err(e) = std::fs::create_dir_all(out) {
        println!("cargo:warning=cannot create dist/: {e}");
        return;
    }

    let options = CopyOptions::new().overwrite(true).content_only(true);
    if let Err(e) = copy(src, out, &options) {
        println!("cargo:warning=copying static/ to dist/ failed: {e}");
    }
}
