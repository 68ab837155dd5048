use extras_exec::{CommandRunner, Output, SpawnOptions};
use extras_fs::{
    Content, Encoding, Error, Files, Format, InterpreterLoader, ReadOptions, Resolver, Value,
};
use extras_test_utils::FixtureDir;
use extras_value::TypeTag;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn files_in(fixture: &FixtureDir) -> Files {
    Files::with_resolver(Resolver::new(fixture.root(), fixture.path("home")))
}

fn sample() -> Value {
    Value::from(json!({
        "name": "extras",
        "port": 8080,
        "ratio": 0.5,
        "enabled": true,
        "tags": ["a", "b"],
        "nested": {"key": "value", "list": [1, 2, {"deep": false}]},
    }))
}

#[rstest]
#[case("out/config.json")]
#[case("out/config.yml")]
#[case("out/config.yaml")]
#[case("out/config.toml")]
fn structured_round_trip(#[case] name: &str) {
    let fixture = FixtureDir::new();
    let files = files_in(&fixture);

    files.write(name, sample()).unwrap();
    assert_eq!(files.read_document(name).unwrap(), sample());
}

#[rstest]
#[case("out/when.yml")]
#[case("out/when.yaml")]
fn yaml_round_trip_keeps_dates(#[case] name: &str) {
    let fixture = FixtureDir::new();
    let files = files_in(&fixture);

    let doc = extras_value::transformed(Value::from(json!({"when": "2020-11-02T08:22:31Z"})));
    files.write(name, doc.clone()).unwrap();

    let read = files.read_document(name).unwrap();
    assert_eq!(read.get("when").map(Value::type_tag), Some(TypeTag::Date));
    assert_eq!(read, doc);
}

#[test]
fn writes_create_missing_parent_directories() {
    let fixture = FixtureDir::new();
    let files = files_in(&fixture);

    files.write("a/b/c/file.txt", "deep").unwrap();
    fixture.assert_file_contains("a/b/c/file.txt", "deep");
}

#[test]
fn reads_relative_to_working_directory() {
    let fixture = FixtureDir::new()
        .with_file("assets/file.txt", "hello")
        .with_file("assets/file.yml", "hello: 1\n");
    let files = files_in(&fixture);

    assert_eq!(
        files.read("./assets/file.txt").unwrap(),
        Content::Text("hello".into())
    );
    assert_eq!(
        files.read_document("assets/file.yml").unwrap(),
        Value::from(json!({"hello": 1}))
    );
}

#[test]
fn reads_home_relative_paths() {
    let fixture = FixtureDir::new().with_file("home/.toolrc.json", r#"{"theme": "dark"}"#);
    let files = files_in(&fixture);

    let doc = files.read_document("~/.toolrc.json").unwrap();
    assert_eq!(doc.get("theme"), Some(&Value::from("dark")));
}

#[test]
fn json_keys_keep_file_order() {
    let fixture = FixtureDir::new().with_file("order.json", r#"{"z": 1, "a": 2, "m": 3}"#);
    let files = files_in(&fixture);

    let doc = files.read_document("order.json").unwrap();
    let keys: Vec<_> = doc.as_mapping().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[rstest]
#[case("broken.json", "{\"unterminated\": ")]
#[case("broken.yml", "key: [unclosed\n")]
#[case("broken.toml", "= no key")]
#[case("empty.yml", "")]
#[case("null.yaml", "~\n")]
fn undecodable_structured_files_read_as_empty_mapping(#[case] name: &str, #[case] content: &str) {
    let fixture = FixtureDir::new().with_file(name, content);
    let files = files_in(&fixture);

    assert_eq!(files.read_document(name).unwrap(), Value::mapping());
}

#[test]
fn structured_file_with_invalid_utf8_reads_as_empty_mapping() {
    let fixture = FixtureDir::new();
    std::fs::write(fixture.path("bad.json"), [b'{', b' ', 0xff, b' ', b'}']).unwrap();
    let files = files_in(&fixture);

    assert_eq!(files.read_document("bad.json").unwrap(), Value::mapping());
    assert!(matches!(
        files.read_text("bad.json").unwrap_err(),
        Error::Encoding { .. }
    ));
}

#[test]
fn missing_file_is_an_error() {
    let fixture = FixtureDir::new();
    let files = files_in(&fixture);

    let err = files.read("nope.json").unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.path().unwrap().ends_with("nope.json"));
}

#[test]
fn format_override_beats_extension() {
    let fixture = FixtureDir::new().with_file("settings.conf", "a: 1\n");
    let files = files_in(&fixture);

    assert_eq!(files.read("settings.conf").unwrap(), Content::Text("a: 1\n".into()));
    let doc = files
        .read_with("settings.conf", ReadOptions::format(Format::Yaml))
        .unwrap()
        .into_document();
    assert_eq!(doc, Value::from(json!({"a": 1})));

    let raw = files
        .read_with("settings.conf", ReadOptions::format(Format::Text))
        .unwrap();
    assert_eq!(raw.as_text(), Some("a: 1\n"));
}

#[test]
fn encoding_override_decodes_latin1() {
    let fixture = FixtureDir::new();
    std::fs::write(fixture.path("legacy.txt"), [0x63, 0x61, 0x66, 0xe9]).unwrap();
    let files = files_in(&fixture);

    assert!(matches!(
        files.read("legacy.txt").unwrap_err(),
        Error::Encoding { .. }
    ));
    let text = files
        .read_with("legacy.txt", ReadOptions::encoding(Encoding::Latin1))
        .unwrap();
    assert_eq!(text.as_text(), Some("café"));

    let lossy = files_in(&fixture).with_encoding(Encoding::Utf8Lossy);
    assert_eq!(lossy.read_text("legacy.txt").unwrap(), "caf\u{fffd}");
}

#[test]
fn composite_to_text_target_is_rejected() {
    let fixture = FixtureDir::new();
    let files = files_in(&fixture);

    let err = files.write("notes.md", sample()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { ref extension, .. } if extension == "md"));
    fixture.assert_file_not_exists("notes.md");
}

#[test]
fn scalars_and_text_are_written_as_is() {
    let fixture = FixtureDir::new();
    let files = files_in(&fixture);

    files.write("count.json", Value::from(42)).unwrap();
    files.write("raw.yml", "already: yaml\n").unwrap();

    assert_eq!(fixture.read("count.json"), "42");
    assert_eq!(fixture.read("raw.yml"), "already: yaml\n");
}

#[test]
fn append_creates_then_extends() {
    let fixture = FixtureDir::new();
    let files = files_in(&fixture);

    files.append("log/run.log", "one\n").unwrap();
    files.append("log/run.log", "two\n").unwrap();
    assert_eq!(fixture.read("log/run.log"), "one\ntwo\n");
}

#[test]
fn edit_rewrites_with_callback_result() {
    let fixture = FixtureDir::new().with_file("greeting.txt", "hello");
    let files = files_in(&fixture);

    files
        .edit("greeting.txt", |text| Some(text.to_uppercase()))
        .unwrap();
    assert_eq!(fixture.read("greeting.txt"), "HELLO");

    files.edit("greeting.txt", |_| None).unwrap();
    assert_eq!(fixture.read("greeting.txt"), "");
}

#[test]
fn edit_of_missing_file_is_an_error() {
    let fixture = FixtureDir::new();
    let files = files_in(&fixture);

    assert!(files.edit("missing.txt", Some).is_err());
    fixture.assert_file_not_exists("missing.txt");
}

#[test]
fn exists_and_is_dir() {
    let fixture = FixtureDir::new()
        .with_file("src/main.rs", "fn main() {}")
        .with_dir("target");
    let files = files_in(&fixture);

    assert!(files.exists("src/main.rs"));
    assert!(files.exists("target"));
    assert!(!files.exists("nope"));
    assert!(!files.exists(""));
    assert!(files.is_dir("target"));
    assert!(!files.is_dir("src/main.rs"));
}

#[test]
fn basext_resolves_before_splitting() {
    let fixture = FixtureDir::new();
    let files = files_in(&fixture);

    let record = files.basext("conf/app.settings.toml");
    assert_eq!(record.base, "app.settings");
    assert_eq!(record.extension, "toml");
    assert_eq!(record.name, "app.settings.toml");
    assert!(record.path.is_absolute());
    assert_eq!(files.format_of(&record), Format::Toml);
}

#[test]
fn dir_and_tree_resolve_their_roots() {
    let fixture = FixtureDir::new()
        .with_file("docs/2.md", "b")
        .with_file("docs/10.md", "c")
        .with_file("docs/1.md", "a");
    let files = files_in(&fixture);

    let names: Vec<_> = files
        .dir("docs")
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, ["1.md", "2.md", "10.md"]);

    assert_eq!(files.tree("docs").unwrap().len(), 3);
    assert_eq!(files.tree_sorted("docs").unwrap(), files.dir("docs").unwrap());
    assert!(files.tree("missing").unwrap().is_empty());

    let mut count = 0;
    files.walk("docs", |_, _| count += 1).unwrap();
    assert_eq!(count, 3);
}

#[test]
fn transform_after_read_coerces_leaves() {
    let fixture = FixtureDir::new().with_file(
        "release.yml",
        "published: ' 2024-07-21T13:59:15Z '\nmatch: '%r/^v\\d+/'\n",
    );
    let files = files_in(&fixture);

    let doc = extras_value::transformed(files.read_document("release.yml").unwrap());
    assert_eq!(doc.get("published").map(Value::type_tag), Some(TypeTag::Date));
    assert!(doc.get("match").and_then(Value::as_pattern).unwrap().is_match("v12"));
}

/// Stands in for an interpreter by echoing a fixed JSON export.
struct EchoRunner(&'static str);

impl CommandRunner for EchoRunner {
    fn spawn(&self, _program: &str, _args: &[&str], _options: &SpawnOptions) -> extras_exec::Result<Output> {
        Ok(Output {
            stdout: self.0.to_string(),
            stderr: None,
            code: Some(0),
        })
    }
}

#[test]
fn modules_require_an_installed_loader() {
    let fixture = FixtureDir::new().with_file("config.js", "module.exports = {a: 1}");
    let files = files_in(&fixture);

    // Without a loader a .js file is only text
    assert_eq!(
        files.read("config.js").unwrap(),
        Content::Text("module.exports = {a: 1}".into())
    );
    let err = files
        .read_with("config.js", ReadOptions::format(Format::Module))
        .unwrap_err();
    assert!(matches!(err, Error::UntrustedModule { .. }));
}

#[test]
fn installed_loader_evaluates_claimed_extensions() {
    let fixture = FixtureDir::new()
        .with_file("config.js", "module.exports = {a: 1}")
        .with_file("plain.txt", "text");
    let loader = InterpreterLoader::new("node", ["js"]).with_runner(EchoRunner(r#"{"a": 1}"#));
    let files = files_in(&fixture).with_loader(loader);

    assert_eq!(
        files.read_document("config.js").unwrap(),
        Value::from(json!({"a": 1}))
    );
    assert_eq!(files.read("plain.txt").unwrap(), Content::Text("text".into()));
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::os::unix::fs::{PermissionsExt, symlink};

    #[test]
    fn write_through_symlink_updates_the_target() {
        let fixture = FixtureDir::new().with_file("real/config.json", "{}");
        symlink(fixture.path("real/config.json"), fixture.path("link.json")).unwrap();
        let files = files_in(&fixture);

        files.write("link.json", Value::from(json!({"a": 1}))).unwrap();

        let link = fs::symlink_metadata(fixture.path("link.json")).unwrap();
        assert!(link.file_type().is_symlink());
        assert_eq!(
            files.read_document("real/config.json").unwrap(),
            Value::from(json!({"a": 1}))
        );
        assert_eq!(fs::read_dir(fixture.path("real")).unwrap().count(), 1);
    }

    #[test]
    fn edit_keeps_executable_bit() {
        let fixture = FixtureDir::new().with_file("run.sh", "#!/bin/sh\necho one\n");
        let script = fixture.path("run.sh");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        let files = files_in(&fixture);

        files
            .edit("run.sh", |text| Some(text.replace("one", "two")))
            .unwrap();

        assert_eq!(fixture.read("run.sh"), "#!/bin/sh\necho two\n");
        let mode = fs::metadata(&script).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
