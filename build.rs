use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let schema_version_path = Path::new(&out_dir).join("schema_version.rs");

    // Read report schema version from Cargo.toml metadata
    let cargo_manifest = env::var("CARGO_MANIFEST_DIR").unwrap();
    let cargo_toml_path = Path::new(&cargo_manifest).join("Cargo.toml");
    let cargo_toml_content = fs::read_to_string(&cargo_toml_path)
        .expect("Failed to read Cargo.toml");

    let cargo_toml: toml::Value = cargo_toml_content.parse()
        .expect("Failed to parse Cargo.toml");

    let schema_version = cargo_toml
        .get("package")
        .and_then(|p| p.get("metadata"))
        .and_then(|m| m.get("stressgauge"))
        .and_then(|s| s.get("report_schema_version"))
        .and_then(|v| v.as_integer())
        .expect("Failed to find package.metadata.stressgauge.report_schema_version in Cargo.toml");

    let version_content = format!(
        "// Auto-generated report schema version from Cargo.toml metadata\n\
         // Source: package.metadata.stressgauge.report_schema_version = {}\n\
         pub const REPORT_SCHEMA_VERSION: i64 = {};\n",
        schema_version, schema_version
    );

    fs::write(&schema_version_path, version_content)
        .expect("Failed to write schema_version.rs");

    println!("cargo:rerun-if-changed=Cargo.toml");
}
