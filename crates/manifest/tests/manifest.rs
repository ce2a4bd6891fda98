use sqlguard_manifest::{check, generate, Config, ManifestError, CONFIG_FILE};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project(config: &str, scripts: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("sql/nested")).unwrap();
    fs::create_dir_all(dir.path().join("out")).unwrap();
    fs::write(dir.path().join(CONFIG_FILE), config).unwrap();
    for (name, content) in scripts {
        fs::write(dir.path().join("sql").join(name), content).unwrap();
    }
    dir
}

const CONFIG: &str = r#"
version = "1.0"

[scripts]
path = "sql/"

[output]
path = "out/statements.json"
pretty = true
"#;

fn load(dir: &Path) -> Config {
    let (config, found_in) = Config::find_and_load(&dir.join("sql/nested")).expect("config should load");
    assert_eq!(found_in, dir);
    config
}

#[test]
fn finds_config_in_parent_directory() {
    let dir = project(CONFIG, &[]);
    let config = load(dir.path());

    assert_eq!(config.version, "1.0");
    assert_eq!(config.scripts.extensions, vec!["sql"]);
    assert!(config.scripts.path.ends_with("sql/"));
}

#[test]
fn missing_config() {
    // Relative lookups stop at the package root, which has no config file.
    let start = Path::new("no-such-project/sql");
    let err = Config::find_and_load(start).unwrap_err();
    assert!(matches!(err, ManifestError::ConfigNotFound(path) if path == start));
}

#[test]
fn invalid_scripts_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILE), CONFIG).unwrap();
    let err = Config::load(&dir.path().join(CONFIG_FILE)).unwrap_err();
    assert!(matches!(err, ManifestError::InvalidPath(_)));
}

#[test]
fn empty_extension_list_is_rejected() {
    let dir = project(
        r#"
version = "1.0"
[scripts]
path = "sql/"
extensions = []
[output]
path = "out/statements.json"
"#,
        &[],
    );
    let err = Config::load(&dir.path().join(CONFIG_FILE)).unwrap_err();
    assert!(matches!(err, ManifestError::InvalidConfig(_)));
}

#[test]
fn check_collects_statements_in_file_order() {
    let dir = project(
        CONFIG,
        &[
            ("b.sql", "SELECT 2; SELECT ';';"),
            ("a.sql", "DO $$ BEGIN RAISE NOTICE 'x;y'; END $$;"),
            ("notes.txt", "DROP TABLE ignored;"),
            ("nested/c.sql", "SELECT 3"),
        ],
    );
    let config = load(dir.path());
    let scanner = check(&config).expect("check should pass");

    let paths: Vec<_> = scanner.entries().iter().map(|e| e.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            Path::new("a.sql").to_path_buf(),
            Path::new("b.sql").to_path_buf(),
            Path::new("nested").join("c.sql"),
        ]
    );
    assert_eq!(scanner.entries()[1].statements, vec!["SELECT 2;", "SELECT ';';"]);
    assert_eq!(scanner.entries()[2].statements, vec!["SELECT 3;"]);
}

#[test]
fn check_fails_on_destructive_script() {
    let dir = project(CONFIG, &[("cleanup.sql", "SELECT 1;\ntruncate audit_log;")]);
    let config = load(dir.path());

    match check(&config) {
        Err(ManifestError::Guard { path, source }) => {
            assert_eq!(path, Path::new("cleanup.sql"));
            assert_eq!(source.offending_statement(), Some("truncate audit_log;"));
        }
        other => panic!("expected guard failure, got {:?}", other.map(|s| s.entries().len())),
    }
}

#[test]
fn extra_keywords_from_config() {
    let config = format!("{CONFIG}\n[guard]\nextra = [\"delete from\"]\n");
    let dir = project(&config, &[("purge.sql", "DELETE FROM sessions;")]);
    let config = load(dir.path());

    assert!(matches!(check(&config), Err(ManifestError::Guard { .. })));
}

#[test]
fn generate_writes_manifest() {
    let dir = project(CONFIG, &[("a.sql", "SELECT 1; SELECT 'open")]);
    let config = load(dir.path());
    generate(&config).expect("generate should pass");

    let written = fs::read_to_string(dir.path().join("out/statements.json")).unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&written).unwrap();

    assert_eq!(manifest["version"], "1.0");
    assert_eq!(manifest["files"][0]["path"], "a.sql");
    assert_eq!(
        manifest["files"][0]["statements"],
        serde_json::json!(["SELECT 1;", "SELECT 'open;"])
    );
    assert_eq!(manifest["files"][0]["open_context"], "unterminated string literal");
}
