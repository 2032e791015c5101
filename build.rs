// Build script that copies the static demo site (`static/`) to `dist/`.
use std::path::Path;
use std::{env, fs};

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    // The wasm bundle itself comes from wasm-pack; skip the copy while
    // wasm-pack drives this very build.
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return;
    }

    let static_dir = Path::new("static");
    if !static_dir.exists() {
        return;
    }

    let out_dir = Path::new("dist");
    if out_dir.exists() {
        if let Err(err) = fs::remove_dir_all(out_dir) {
            println!("cargo:warning=could not clear dist/: {err}");
            return;
        }
    }
    if let Err(err) = fs::create_dir_all(out_dir) {
        println!("cargo:warning=could not create dist/: {err}");
        return;
    }

    let options = CopyOptions::new().content_only(true).overwrite(true);
    if let Err(err) = copy(static_dir, out_dir, &options) {
        println!("cargo:warning=copying static/ to dist/ failed: {err}");
    }
}
