use std::env;
use std::fs;
use std::path::Path;

// Places the workspace config.toml next to the built binary, where the
// server looks for it first.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let profile = env::var("PROFILE").expect("PROFILE is set by cargo");

    // OUT_DIR is target/<profile>/build/<pkg>-<hash>/out
    let Some(target_dir) = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
    else {
        println!("cargo:warning=target/{} not found, config.toml not copied", profile);
        return;
    };

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("backend crate lives two levels below the workspace root");
    let source = workspace_root.join("config.toml");
    if !source.exists() {
        println!(
            "cargo:warning=config.toml not found at {:?}, the embedded default applies",
            source
        );
        return;
    }

    let dest = target_dir.join("config.toml");
    fs::copy(&source, &dest)
        .unwrap_or_else(|e| panic!("Failed to copy config.toml to {:?}: {}", dest, e));
}
