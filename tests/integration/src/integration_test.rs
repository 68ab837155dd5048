//! End-to-end tests across the extras crates
//!
//! These exercise the flows the crates exist for: loading a config file,
//! normalizing it, flattening it for lookup, and writing a derived file back.

use extras_fs::{Files, Format, ReadOptions, Resolver, Value};
use extras_test_utils::FixtureDir;
use extras_value::{TypeTag, clean, dot, transformed, type_of, undot};
use pretty_assertions::assert_eq;
use serde_json::json;

const CONFIG: &str = r#"
service:
  name: "  billing  "
  started: "2024-07-21T13:59:15.307"
  routes:
    match: '%r/^/api/v\d+/i'
    retired: null
  owners: [ops, null, finance]
limits:
  burst: 20
"#;

fn files_in(fixture: &FixtureDir) -> Files {
    Files::with_resolver(Resolver::new(fixture.root(), fixture.path("home")))
}

#[test]
fn test_config_load_normalize_flatten() {
    let fixture = FixtureDir::new().with_file("conf/service.yml", CONFIG);
    let files = files_in(&fixture);

    let mut doc = transformed(files.read_document("conf/service.yml").unwrap());
    clean(&mut doc, &[]);

    let flat = dot(&doc, ".");
    assert_eq!(flat.get("service.name"), Some(&Value::from("billing")));
    assert_eq!(flat.get("service.started").map(type_of), Some(TypeTag::Date));
    assert_eq!(flat.get("limits.burst"), Some(&Value::from(20)));
    assert!(!flat.contains_key("service.routes.retired"));
    assert_eq!(
        flat.get("service.owners"),
        Some(&Value::from(json!(["ops", "finance"])))
    );

    let pattern = flat
        .get("service.routes.match")
        .and_then(Value::as_pattern)
        .unwrap();
    assert!(pattern.is_match("/API/v2/users"));
}

#[test]
fn test_flat_overrides_written_as_json() {
    let fixture = FixtureDir::new().with_file("conf/service.yml", CONFIG);
    let files = files_in(&fixture);

    let doc = files.read_document("conf/service.yml").unwrap();
    let mut flat = dot(&doc, ".");
    flat.insert("limits.burst".into(), Value::from(50));
    flat.insert("limits.window.seconds".into(), Value::from(60));

    files
        .write("build/service.json", Value::Mapping(undot(&flat, ".")))
        .unwrap();
    fixture.assert_file_contains("build/service.json", "\"seconds\": 60");

    let written = files.read_document("build/service.json").unwrap();
    assert_eq!(
        written.get("limits"),
        Some(&Value::from(json!({"burst": 50, "window": {"seconds": 60}})))
    );
    // JSON has no date type, so compare after coercing leaves on both sides
    assert_eq!(
        transformed(Value::Mapping(dot(&written, "."))),
        transformed(Value::Mapping(flat))
    );
}

#[test]
fn test_yaml_to_toml_conversion() {
    let fixture = FixtureDir::new().with_file("limits.yaml", "burst: 20\nregions:\n  - eu\n  - us\n");
    let files = files_in(&fixture);

    let doc = files.read_document("limits.yaml").unwrap();
    files.write("~/limits.toml", doc.clone()).unwrap();

    fixture.assert_file_contains("home/limits.toml", "burst = 20");
    assert_eq!(files.read_document("~/limits.toml").unwrap(), doc);
}

#[test]
fn test_tree_feeds_reads() {
    let fixture = FixtureDir::new()
        .with_file("pages/10-end.yml", "title: End\n")
        .with_file("pages/2-middle.yml", "title: Middle\n")
        .with_file("pages/1-start.yml", "title: Start\n");
    let files = files_in(&fixture);

    let titles: Vec<String> = files
        .tree_sorted("pages")
        .unwrap()
        .iter()
        .map(|page| {
            let doc = files.read_document(page).unwrap();
            doc.get("title").and_then(Value::as_str).unwrap_or_default().to_string()
        })
        .collect();
    assert_eq!(titles, ["Start", "Middle", "End"]);
}

#[test]
fn test_edit_then_reparse() {
    let fixture = FixtureDir::new().with_file("app.toml", "port = 80\n");
    let files = files_in(&fixture);

    files
        .edit("app.toml", |text| Some(text.replace("80", "8080")))
        .unwrap();
    files.append("app.toml", "debug = true\n").unwrap();

    let doc = files.read_document("app.toml").unwrap();
    assert_eq!(doc, Value::from(json!({"port": 8080, "debug": true})));

    let raw = files
        .read_with("app.toml", ReadOptions::format(Format::Text))
        .unwrap();
    assert_eq!(raw.as_text(), Some("port = 8080\ndebug = true\n"));
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use extras_exec::sh;
    use extras_fs::InterpreterLoader;

    #[test]
    fn test_interpreter_loader_reads_stdout() {
        // `cat` stands in for an interpreter whose module prints JSON
        let fixture = FixtureDir::new().with_file("settings.mod", r#"{"mode": "fast", "level": 3}"#);
        let files = files_in(&fixture).with_loader(InterpreterLoader::new("cat", ["mod"]));

        let doc = files.read_document("settings.mod").unwrap();
        assert_eq!(doc, Value::from(json!({"mode": "fast", "level": 3})));
    }

    #[test]
    fn test_failing_interpreter_surfaces_module_error() {
        let fixture = FixtureDir::new().with_file("broken.mod", "{}");
        let files = files_in(&fixture).with_loader(InterpreterLoader::new("false", ["mod"]));

        let err = files.read_document("broken.mod").unwrap_err();
        assert!(matches!(err, extras_fs::Error::Module { .. }));
    }

    #[test]
    fn test_shell_helpers_reshape_tree() {
        let fixture = FixtureDir::new().with_file("src/a.txt", "a");
        let files = files_in(&fixture);

        let src = fixture.path_str("src");
        let out = fixture.path_str("out");
        sh::mkdir("-p", &[out.as_str()]).unwrap().into_result().unwrap();
        sh::cp("-r", &src, &fixture.path_str("out/copy")).unwrap().into_result().unwrap();
        sh::mv(&fixture.path_str("out/copy/a.txt"), &fixture.path_str("out/b.txt"))
            .unwrap()
            .into_result()
            .unwrap();
        sh::rm("-r", &[fixture.path_str("out/copy").as_str()]).unwrap().into_result().unwrap();

        let names: Vec<String> = files
            .tree("out")
            .unwrap()
            .iter()
            .filter_map(|p| p.file_name().map(str::to_string))
            .collect();
        assert_eq!(names, ["b.txt"]);
        assert_eq!(files.read_text("out/b.txt").unwrap(), "a");
    }
}
