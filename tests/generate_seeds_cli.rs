use std::path::Path;
use std::process::{Command, Output};

fn generate_seeds(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_generate-seeds"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch generate-seeds")
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

const SOURCE: &str = r#"{
    "sets": [
        {"name": "estate_category", "labels": {"en": "Category", "es": "Categoría"}},
        {"name": "estate_type", "labels": {"en": "Type", "es": "Tipo"}, "parent": "estate_category"},
        {"name": "country", "labels": {"en": "Country"}}
    ],
    "options": [
        {"set": "estate_type", "key": "house", "locale": "en", "labels": {"en": "House \"detached\""}, "parent_key": "residential"},
        {"set": "estate_category", "key": "residential", "locale": "en", "labels": {"en": "Residential"}},
        {"set": "country", "key": "ar", "locale": "en", "labels": {"en": "Argentina"}}
    ]
}"#;

#[test]
fn test_generates_module_and_reports_counts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dictionary.json");
    let output = dir.path().join("generated.rs");
    std::fs::write(&input, SOURCE).unwrap();

    let result = generate_seeds(&[path_str(&input), path_str(&output), "--exclude", "country"]);
    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
    assert_eq!(result.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains(&format!(
        "Generated {} with 2 sets and 2 options",
        output.display()
    )));

    let code = std::fs::read_to_string(&output).unwrap();
    assert!(code.starts_with("// @generated by generate-seeds from dictionary.json."));
    assert!(code.contains("// Excluded sets: country"));
    assert!(code.contains("pub fn real_estate_dictionary() -> SeedPlan {"));
    assert!(code.contains("let opt_1_residential_en = plan.push_option(OptionOp {"));
    assert!(code.contains("parent: Some(opt_1_residential_en.clone()),"));
    assert!(code.contains(r#"label: "House \"detached\"".to_string(),"#));
    assert!(!code.contains("Argentina"));
}

#[test]
fn test_custom_function_name() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dictionary.json");
    let output = dir.path().join("generated.rs");
    std::fs::write(&input, SOURCE).unwrap();

    let result = generate_seeds(&[path_str(&input), path_str(&output), "--fn", "listing_dictionary"]);
    assert_eq!(result.status.code(), Some(0));

    let code = std::fs::read_to_string(&output).unwrap();
    assert!(code.contains("pub fn listing_dictionary() -> SeedPlan {"));
}

#[test]
fn test_missing_arguments_exit_with_one() {
    let result = generate_seeds(&[]);
    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("Usage: generate-seeds"));

    let result = generate_seeds(&["only-input.json"]);
    assert_eq!(result.status.code(), Some(1));
}

#[test]
fn test_unreadable_input_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("generated.rs");

    let result = generate_seeds(&[path_str(&dir.path().join("missing.json")), path_str(&output)]);
    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("failed to read"));
    assert!(!output.exists());
}

#[test]
fn test_invalid_source_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.json");
    let output = dir.path().join("generated.rs");

    std::fs::write(&input, "{ not json").unwrap();
    let result = generate_seeds(&[path_str(&input), path_str(&output)]);
    assert_eq!(result.status.code(), Some(1));
    assert!(!output.exists());

    std::fs::write(
        &input,
        r#"{"options": [{"set": "t", "key": "a", "locale": "en", "parent_key": "missing"}]}"#,
    )
    .unwrap();
    let result = generate_seeds(&[path_str(&input), path_str(&output)]);
    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("unresolved parent references"));

    let result = generate_seeds(&[path_str(&input), path_str(&output), "--allow-missing-parents"]);
    assert_eq!(result.status.code(), Some(0));
    assert!(output.exists());
}

#[test]
fn test_unwritable_output_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dictionary.json");
    std::fs::write(&input, SOURCE).unwrap();

    let output = dir.path().join("no-such-dir").join("generated.rs");
    let result = generate_seeds(&[path_str(&input), path_str(&output)]);
    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("failed to write"));
}
