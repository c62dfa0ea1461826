//! Host-side helper: `cargo run` builds the wasm bundle into `static/pkg`
//! and serves `static/` for local testing.

use std::process::{Command, ExitCode, Stdio};
use std::{env, thread, time::Duration};

const DEFAULT_PORT: u16 = 8000;

fn port() -> u16 {
    env::var("FX_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

fn build_bundle() -> bool {
    println!("Building wasm bundle …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => true,
        Ok(_) => {
            eprintln!("wasm-pack finished with errors.");
            false
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH; serving whatever is already in static/pkg.");
            true
        }
    }
}

fn main() -> ExitCode {
    if !build_bundle() {
        return ExitCode::FAILURE;
    }

    let port = port();
    println!("Serving static/ at http://127.0.0.1:{port}");
    let server = Command::new("python3")
        .args(["-m", "http.server", &port.to_string(), "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn();

    match server {
        Ok(mut child) => {
            // Poll so a server that dies early (port taken) ends the helper too.
            loop {
                match child.try_wait() {
                    Ok(Some(status)) => {
                        eprintln!("http server exited: {status}");
                        return ExitCode::FAILURE;
                    }
                    Ok(None) => thread::sleep(Duration::from_secs(1)),
                    Err(e) => {
                        eprintln!("lost track of http server: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            }
        }
        Err(e) => {
            eprintln!("failed to start python3 http.server: {e}");
            ExitCode::FAILURE
        }
    }
}
