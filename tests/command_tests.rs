use flamebearer::commands::{
    execute_diff, execute_inspect, execute_subtract, DiffArgs, InspectArgs, SubtractArgs,
};
use flamebearer::output::{read_profile, write_profile};
use flamebearer::parser::schema::{Flamebearer, Format, Metadata, Profile};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn create_test_profile(names: &[&str], levels: Vec<Vec<i64>>, num_ticks: u64, max_self: u64, units: &str) -> Profile {
    Profile {
        version: 1,
        flamebearer: Flamebearer {
            names: names.iter().map(|s| s.to_string()).collect(),
            levels,
            num_ticks,
            max_self,
            format: None,
        },
        metadata: Metadata {
            units: Some(units.to_string()),
            ..Metadata::default()
        },
        left_ticks: None,
        right_ticks: None,
    }
}

fn write_fixtures(dir: &Path) {
    let base = create_test_profile(
        &["total", "a", "b"],
        vec![vec![0, 10, 0, 0], vec![0, 6, 6, 1, 0, 4, 4, 2]],
        10,
        6,
        "samples",
    );
    let target = create_test_profile(
        &["total", "a", "c"],
        vec![vec![0, 8, 0, 0], vec![0, 5, 5, 1, 0, 3, 3, 2]],
        8,
        5,
        "samples",
    );
    let bytes = create_test_profile(&["total"], vec![vec![0, 1, 1, 0]], 1, 1, "bytes");

    write_profile(&base, dir.join("base.json")).unwrap();
    write_profile(&target, dir.join("target.json")).unwrap();
    write_profile(&bytes, dir.join("bytes.json")).unwrap();
}

fn setup() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    dir
}

#[test]
fn test_inspect_single_and_double() {
    let dir = setup();
    let args = InspectArgs {
        file: dir.path().join("base.json"),
        top: 5,
        config: None,
    };
    assert!(execute_inspect(args).is_ok());

    execute_diff(DiffArgs {
        left: dir.path().join("base.json"),
        right: dir.path().join("target.json"),
        output: dir.path().join("diff.json"),
        config: None,
    })
    .unwrap();

    let args = InspectArgs {
        file: dir.path().join("diff.json"),
        top: 5,
        config: None,
    };
    assert!(execute_inspect(args).is_ok());
}

#[test]
fn test_diff_writes_double_profile() {
    let dir = setup();
    let output = dir.path().join("out/diff.json");
    execute_diff(DiffArgs {
        left: dir.path().join("base.json"),
        right: dir.path().join("target.json"),
        output: output.clone(),
        config: None,
    })
    .unwrap();

    let diff = read_profile(&output).unwrap();
    assert_eq!(diff.format().unwrap(), Format::Double);
    assert_eq!(diff.left_ticks, Some(10));
    assert_eq!(diff.right_ticks, Some(8));
    assert_eq!(diff.flamebearer.names, vec!["total", "a", "b", "c"]);
}

#[test]
fn test_diff_rejects_unit_mismatch() {
    let dir = setup();
    let result = execute_diff(DiffArgs {
        left: dir.path().join("base.json"),
        right: dir.path().join("bytes.json"),
        output: dir.path().join("diff.json"),
        config: None,
    });
    assert!(result.is_err());
    assert!(!dir.path().join("diff.json").exists());
}

#[test]
fn test_subtract_writes_residual() {
    let dir = setup();
    let output = dir.path().join("residual.json");
    execute_subtract(SubtractArgs {
        total: dir.path().join("base.json"),
        selection: dir.path().join("target.json"),
        output: output.clone(),
        config: None,
    })
    .unwrap();

    let residual = read_profile(&output).unwrap();
    assert_eq!(residual.format().unwrap(), Format::Single);
    assert_eq!(residual.flamebearer.num_ticks, 2);
}

#[test]
fn test_config_file_is_honoured() {
    let dir = setup();
    let config = dir.path().join("engine.toml");
    fs::write(&config, "allow_empty_units = false\n").unwrap();

    let mut unitless = read_profile(dir.path().join("target.json")).unwrap();
    unitless.metadata.units = None;
    write_profile(&unitless, dir.path().join("unitless.json")).unwrap();

    let args = |config: Option<&Path>| DiffArgs {
        left: dir.path().join("base.json"),
        right: dir.path().join("unitless.json"),
        output: dir.path().join("diff.json"),
        config: config.map(Path::to_path_buf),
    };
    assert!(execute_diff(args(None)).is_ok());
    assert!(execute_diff(args(Some(config.as_path()))).is_err());
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = setup();
    let result = execute_inspect(InspectArgs {
        file: dir.path().join("nope.json"),
        top: 5,
        config: None,
    });
    assert!(result.is_err());
}
