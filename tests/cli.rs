//! End-to-end tests driving the `factory` binary, directly and through a rule.

use factory::error::FactoryError;
use factory::exit_codes;
use factory::rule::{GenerateRule, GeneratorCommand, RuleManifest};
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const TEMPLATE: &str =
    "func Things() string {\n\treturn \"{{.Count}} items are made of {{.Material}}\"\n}\n";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(config: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("things.tmpl"), TEMPLATE).unwrap();
        fs::write(dir.path().join("base.json"), config).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn rule(&self, package: &str) -> GenerateRule {
        GenerateRule::new(
            "things",
            GeneratorCommand::new(env!("CARGO_BIN_EXE_factory")),
            self.path("things.tmpl"),
            self.path("base.json"),
            self.path("out/things.go"),
        )
        .unwrap()
        .package(package)
    }
}

fn factory() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_factory"));
    command.env_remove("FACTORY_LOG");
    command
}

fn stderr_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[test]
fn generates_through_rule() {
    let fixture = Fixture::new(r#"{"Material":"wool","Count":17}"#);
    let rule = fixture.rule("main");

    let written = rule.run().unwrap();

    assert_eq!(written, fixture.path("out/things.go"));
    let output = fs::read_to_string(&written).unwrap();
    assert_eq!(
        output,
        "package main\n\nfunc Things() string {\n\treturn \"17 items are made of wool\"\n}\n"
    );
}

#[test]
fn accepts_single_dash_flags() {
    let fixture = Fixture::new(r#"{"Material":"oak","Count":2}"#);
    let out = fixture.path("single.go");

    let output = factory()
        .arg("-package")
        .arg("things")
        .arg(format!("-tmpl={}", fixture.path("things.tmpl").display()))
        .arg("-config")
        .arg(fixture.path("base.json"))
        .arg("-out")
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let source = fs::read_to_string(&out).unwrap();
    assert!(source.starts_with("package things\n\n"));
    assert!(source.contains("return \"2 items are made of oak\""));
}

#[test]
fn successful_run_is_quiet() {
    let fixture = Fixture::new(r#"{"Material":"wool","Count":17}"#);
    let output = fixture.rule("main").command().env_remove("FACTORY_LOG").output().unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr_lines(&output).is_empty());
}

#[test]
fn missing_config_exits_with_single_diagnostic() {
    let fixture = Fixture::new("{}");
    let out = fixture.path("never.go");

    let output = factory()
        .args(["--config".as_ref(), fixture.path("missing.json").as_os_str()])
        .args(["--tmpl".as_ref(), fixture.path("things.tmpl").as_os_str()])
        .args(["--out".as_ref(), out.as_os_str()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(exit_codes::IO_FAILURE));
    let lines = stderr_lines(&output);
    assert_eq!(lines.len(), 1, "stderr: {:?}", lines);
    assert!(lines[0].contains("failed to open config"));
    assert!(!out.exists());
}

#[test]
fn malformed_config_exits_with_parse_failure() {
    let fixture = Fixture::new(r#"{"Count": }"#);
    let rule = fixture.rule("main");

    let err = rule.run().unwrap_err();

    match err {
        FactoryError::GeneratorFailed {
            status, ref stderr, ..
        } => {
            assert_eq!(status.code(), Some(exit_codes::PARSE_FAILURE));
            assert!(stderr.contains("failed to parse config"));
        }
        ref other => panic!("unexpected error: {:?}", other),
    }
    assert!(!rule.output().exists());
}

#[test]
fn undefined_field_exits_with_render_failure() {
    let fixture = Fixture::new("{}");
    fs::write(fixture.path("things.tmpl"), "{{.Colour}}").unwrap();

    let output = fixture.rule("main").command().output().unwrap();

    assert_eq!(output.status.code(), Some(exit_codes::RENDER_FAILURE));
    assert!(!fixture.path("out/things.go").exists());
}

#[test]
fn any_package_string_is_accepted() {
    let fixture = Fixture::new(r#"{"Material":"wool","Count":17}"#);

    let written = fixture.rule("café").run().unwrap();

    let output = fs::read_to_string(&written).unwrap();
    assert!(output.starts_with("package café\n\n"));
}

#[test]
fn describe_prints_manifest_without_generating() {
    let fixture = Fixture::new("{}");
    let out = fixture.path("described.go");

    let output = factory()
        .args(["--describe".as_ref(), "--out".as_ref(), out.as_os_str()])
        .args(["--package", "main"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let manifest: RuleManifest = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(manifest.outputs, vec![out.clone()]);
    assert_eq!(
        manifest.inputs,
        vec![PathBuf::from("templates/things.tmpl"), PathBuf::from("config/base.json")]
    );
    assert_eq!(&manifest.args[..2], ["--package", "main"]);
    assert!(!out.exists());
}

#[test]
fn package_change_rewrites_only_declaration() {
    let fixture = Fixture::new(r#"{"Material":"wool","Count":17}"#);

    let main_path = fixture.rule("main").run().unwrap();
    let main_output = fs::read_to_string(&main_path).unwrap();
    let things_path = fixture.rule("things").run().unwrap();
    let things_output = fs::read_to_string(&things_path).unwrap();

    let main_lines: Vec<&str> = main_output.lines().collect();
    let things_lines: Vec<&str> = things_output.lines().collect();
    assert_eq!(main_lines[0], "package main");
    assert_eq!(things_lines[0], "package things");
    assert_eq!(main_lines[1..], things_lines[1..]);
}
