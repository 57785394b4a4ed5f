//! Developer tasks (schema generation, fixture conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};
use vmguard_test_util::normalize_nondeterministic;

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            // Fallback: assume we're in xtask dir or use current dir
            std::env::current_dir().expect("Cannot determine current directory")
        });

    // If we're in the xtask directory, go up one level
    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .expect("xtask has no parent")
            .to_path_buf()
    } else {
        manifest_dir
    }
}

/// Get the schemas directory path.
fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn test_fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(vmguard_types::AuditReceipt)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(vmguard_settings::VmguardConfigV1)
}

/// List of schemas to generate.
fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "vmguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "vmguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();

    if !dir.exists() {
        fs::create_dir_all(&dir).context("Failed to create schemas directory")?;
    }

    for spec in schema_specs() {
        let schema = (spec.generate)();
        let json = serialize_schema(&schema)?;
        let path = dir.join(spec.filename);

        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;

        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);

        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches the Rust types");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate fixture receipts against the receipt schema");
    eprintln!("  conform-full      conform + run the vmguard binary on every fixture");
    eprintln!("  explain-coverage  Validate all built-in rules have explanations");
}

fn receipt_validator() -> anyhow::Result<jsonschema::Validator> {
    let schema = serde_json::to_value(generate_report_schema()).context("serialize schema")?;
    jsonschema::validator_for(&schema).map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))
}

/// Fixture directories that carry an `expected.report.json`, sorted by name.
fn fixture_dirs() -> anyhow::Result<Vec<PathBuf>> {
    let root = test_fixtures_dir();
    let mut dirs = Vec::new();
    for entry in fs::read_dir(&root).context("Failed to read tests/fixtures/")? {
        let path = entry?.path();
        if path.join("expected.report.json").exists() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn fixture_name(dir: &Path) -> String {
    dir.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as JSON", path.display()))
}

/// Validate golden receipts against the generated receipt schema.
fn conform() -> anyhow::Result<()> {
    let validator = receipt_validator()?;
    println!("✓ vmguard.report.v1 schema compiles");

    let mut errors = Vec::new();
    let dirs = fixture_dirs()?;

    for dir in &dirs {
        let name = fixture_name(dir);
        let value = read_json(&dir.join("expected.report.json"))?;

        let before = errors.len();
        for err in validator.iter_errors(&value) {
            errors.push(format!("{}: schema validation: {}", name, err));
        }

        // Fail-closed: an error receipt never carries violations.
        if value.get("verdict").and_then(|v| v.as_str()) == Some("error")
            && value
                .get("violations")
                .and_then(|v| v.as_object())
                .is_some_and(|m| !m.is_empty())
        {
            errors.push(format!("{}: error receipt lists violations", name));
        }

        if errors.len() == before {
            println!("  ✓ {} validates", name);
        }
    }

    if dirs.is_empty() {
        bail!("No fixture receipts found in {}", test_fixtures_dir().display());
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {} fixture receipts pass conformance checks!", dirs.len());
    Ok(())
}

/// Full conformance: golden receipts + vmguard binary output validation.
fn conform_full() -> anyhow::Result<()> {
    conform()?;

    println!("\n--- Full conformance: vmguard binary output ---\n");

    let validator = receipt_validator()?;

    let vmguard_bin = project_root().join("target").join("debug").join("vmguard");

    #[cfg(target_os = "windows")]
    let vmguard_bin = vmguard_bin.with_extension("exe");

    if !vmguard_bin.exists() {
        bail!(
            "vmguard binary not found at {}.\n\
            Run `cargo build -p vmguard-cli` first.",
            vmguard_bin.display()
        );
    }

    let mut errors = Vec::new();

    for dir in fixture_dirs()? {
        let name = fixture_name(&dir);
        let inventory = if dir.join("inventory.json").exists() {
            dir.join("inventory.json")
        } else {
            dir.join("inventory")
        };

        let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let report_out = temp_dir.path().join("report.json");

        let output = std::process::Command::new(&vmguard_bin)
            .arg("--quiet")
            .arg("--config")
            .arg(dir.join("vmguard.toml"))
            .arg("check")
            .arg("--inventory")
            .arg(&inventory)
            .arg("--report-out")
            .arg(&report_out)
            .output()
            .with_context(|| format!("Failed to run vmguard on fixture '{}'", name))?;

        if !report_out.exists() {
            errors.push(format!(
                "fixture '{}': no receipt written (exit {:?}): {}",
                name,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            ));
            continue;
        }

        let report_value = read_json(&report_out)?;

        for err in validator.iter_errors(&report_value) {
            errors.push(format!("fixture '{}': schema validation: {}", name, err));
        }

        let golden_value = read_json(&dir.join("expected.report.json"))?;
        if normalize_nondeterministic(report_value) != normalize_nondeterministic(golden_value) {
            errors.push(format!(
                "fixture '{}': output differs from golden file expected.report.json",
                name
            ));
            continue;
        }

        println!("  ✓ fixture '{}' matches its golden receipt", name);
    }

    if !errors.is_empty() {
        eprintln!("\nFull conformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!(
            "Full conformance validation failed with {} errors",
            errors.len()
        );
    }

    println!("\n✓ Full conformance checks passed!");
    Ok(())
}

/// Validate that all built-in rules have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let rules = vmguard_types::explain::all_rule_names();

    let mut errors = Vec::new();

    for rule in rules {
        match vmguard_types::explain::lookup_explanation(rule) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("Rule '{}' has empty title", rule));
                }
                if exp.description.is_empty() {
                    errors.push(format!("Rule '{}' has empty description", rule));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("Rule '{}' has empty remediation", rule));
                }
            }
            None => {
                errors.push(format!("Rule '{}' has no explanation", rule));
            }
        }
    }

    if errors.is_empty() {
        println!("✓ {} built-in rules have explanations", rules.len());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "conform-full" => conform_full(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                let name = spec.filename.trim_end_matches(".json");
                println!("{}", name);
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
