// RustLibCli - Build Script
//
// Host builds need nothing. Firmware builds forward the ESP-IDF environment.

fn main() {
    // ESP-IDF environment setup (MUST be first for firmware builds!)
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }

    println!("cargo:rerun-if-changed=build.rs");
}
