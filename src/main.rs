//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg` and
//! serves `static/` locally so the demo page can be opened in a browser.
//!
//! `cargo run -- 9000` picks another port.

use std::process::{Command, Stdio};
use std::{env, thread, time::Duration};

use anyhow::{bail, Context, Result};

const DEFAULT_PORT: u16 = 8000;

fn main() -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();

    let port = match env::args().nth(1) {
        Some(arg) => arg
            .parse::<u16>()
            .with_context(|| format!("invalid port {arg:?}"))?,
        None => DEFAULT_PORT,
    };

    // 1. Compile wasm via wasm-pack into static/pkg
    log::info!("building WASM pkg …");
    match Command::new("wasm-pack")
        .args([
            "build",
            "--release",
            "--target",
            "web",
            "--out-dir",
            "static/pkg",
        ])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(st) => bail!("wasm-pack finished with {st}"),
        Err(_) => log::warn!("wasm-pack not found in PATH; serving existing static/pkg"),
    }

    // 2. Serve `static/`
    log::info!("serving http://127.0.0.1:{port} …");
    let mut server = Command::new("python3")
        .args([
            "-m",
            "http.server",
            &port.to_string(),
            "--directory",
            "static",
        ])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("failed to start http server (python3 required)")?;

    loop {
        if let Some(status) = server.try_wait()? {
            bail!("http server exited with {status}");
        }
        thread::sleep(Duration::from_secs(1));
    }
}
