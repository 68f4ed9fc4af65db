//! Installs the `.env.example` template next to the `.env` that spotback
//! loads from the local data directory (`~/.local/share/spotback` on Linux).

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const TEMPLATE: &str = ".env.example";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={TEMPLATE}");

    let source = Path::new(&env::var("CARGO_MANIFEST_DIR")?).join(TEMPLATE);
    if !source.is_file() {
        println!("cargo:warning={TEMPLATE} not found at {}", source.display());
        return Ok(());
    }

    let Some(target_dir) = dirs::data_local_dir().map(|dir| dir.join("spotback")) else {
        println!("cargo:warning=no local data directory, {TEMPLATE} not installed");
        return Ok(());
    };

    install(&source, &target_dir)?;
    Ok(())
}

/// Copies `source` into `target_dir`, leaving an identical copy untouched.
fn install(source: &Path, target_dir: &Path) -> std::io::Result<PathBuf> {
    let target = target_dir.join(TEMPLATE);
    if fs::read(&target).ok() == Some(fs::read(source)?) {
        return Ok(target);
    }
    fs::create_dir_all(target_dir)?;
    fs::copy(source, &target)?;
    Ok(target)
}
