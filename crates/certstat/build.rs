// Build script for certstat - embeds version at compile time

fn main() {
    // Release builds may pin the version through the environment; default to Cargo.toml
    let version = std::env::var("CERTSTAT_VERSION")
        .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    // Read back with env!("CERTSTAT_VERSION") for `certstat --version`
    println!("cargo:rustc-env=CERTSTAT_VERSION={}", version);

    // Also rerun if Cargo.toml or the override changes
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-env-changed=CERTSTAT_VERSION");
}
