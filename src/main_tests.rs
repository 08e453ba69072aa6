//! Unit tests for the `scenario-harness` CLI binary implementation.
//!
//! Keeping these tests in a separate module helps keep `src/main.rs` focused
//! on dispatch.

use super::*;
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use scenario_harness::test_support::write_artifact;
use tempfile::TempDir;

fn run_args(scenario: Option<&str>, all: bool) -> RunCommand {
    RunCommand {
        scenario: scenario.map(str::to_owned),
        all,
        artifact_dir: None,
        iterations: None,
        report_dir: None,
        partition_count: None,
        partition_index: None,
    }
}

fn partitioned(count: Option<u32>, index: Option<u32>) -> RunCommand {
    RunCommand {
        partition_count: count,
        partition_index: index,
        ..run_args(None, true)
    }
}

#[fixture]
fn base_config() -> HarnessConfig {
    HarnessConfig {
        artifact_dir: String::from("pub"),
        iterations: 1,
        timeout_secs: 60,
        gui_settle_ms: 5000,
        report_dir: None,
    }
}

struct ArtifactDir {
    path: Utf8PathBuf,
    _tmp: TempDir,
}

#[fixture]
fn artifact_dir() -> ArtifactDir {
    let tmp = TempDir::new().unwrap_or_else(|err| panic!("temp dir: {err}"));
    let path = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf())
        .unwrap_or_else(|path| panic!("temp dir should be utf8: {}", path.display()));
    ArtifactDir { path, _tmp: tmp }
}

fn settings_for(dir: &ArtifactDir) -> RunSettings {
    RunSettings {
        artifact_dir: dir.path.clone(),
        ..RunSettings::default()
    }
}

#[test]
fn list_writes_one_line_per_scenario() {
    let mut buf = Vec::new();
    list_scenarios(&mut buf).expect("list should succeed");
    let rendered = String::from_utf8(buf).expect("utf8");

    assert_eq!(rendered.lines().count(), SCENARIOS.len());
    assert!(rendered.contains("NetCoreApp(Library)\tfalse\t.NET Core 2.0 Library Template"));
    assert!(rendered.contains("windowsforms\tfalse\tWindows Forms Template"));
}

#[rstest]
#[case::by_exename("windowsforms")]
#[case::by_name("Windows Forms Template")]
fn select_resolves_single_scenario(#[case] key: &str) {
    let selected = select_scenarios(&run_args(Some(key), false)).expect("scenario should resolve");
    let exenames: Vec<_> = selected.iter().map(|entry| entry.exename).collect();
    assert_eq!(exenames, vec!["windowsforms"]);
}

#[test]
fn select_all_returns_registry_in_order() {
    let selected = select_scenarios(&run_args(None, true)).expect("all should resolve");
    let exenames: Vec<_> = selected.iter().map(|entry| entry.exename).collect();
    assert_eq!(exenames, vec!["NetCoreApp(Library)", "windowsforms"]);
}

#[test]
fn select_rejects_unknown_scenario() {
    let err = select_scenarios(&run_args(Some("console"), false))
        .expect_err("unknown scenario should fail");
    assert!(
        matches!(err, CliError::UnknownScenario(ref key) if key == "console"),
        "unexpected error: {err}"
    );
}

#[rstest]
#[case::count_only(Some(2), None, "must be given together")]
#[case::index_only(None, Some(0), "must be given together")]
#[case::single_partition(Some(1), Some(0), "at least 2")]
#[case::zero_partitions(Some(0), Some(0), "at least 2")]
#[case::index_equals_count(Some(2), Some(2), "less than --partition-count")]
#[case::index_beyond_count(Some(3), Some(7), "less than --partition-count")]
fn select_rejects_invalid_partition(
    #[case] count: Option<u32>,
    #[case] index: Option<u32>,
    #[case] expected: &str,
) {
    let err = select_scenarios(&partitioned(count, index))
        .expect_err("partition should be rejected");
    assert!(
        matches!(err, CliError::InvalidPartition { reason } if reason.contains(expected)),
        "unexpected error: {err}"
    );
}

#[rstest]
#[case::first(0, vec!["NetCoreApp(Library)"])]
#[case::second(1, vec!["windowsforms"])]
fn select_all_keeps_only_the_requested_partition(
    #[case] index: u32,
    #[case] expected: Vec<&str>,
) {
    let selected = select_scenarios(&partitioned(Some(2), Some(index)))
        .expect("partition should resolve");
    let exenames: Vec<_> = selected.iter().map(|entry| entry.exename).collect();
    assert_eq!(exenames, expected);
}

#[test]
fn partitions_cover_the_registry_exactly_once() {
    let mut seen: Vec<&str> = (0..3)
        .flat_map(|index| {
            select_scenarios(&partitioned(Some(3), Some(index)))
                .expect("partition should resolve")
                .into_iter()
                .map(|entry| entry.exename)
        })
        .collect();
    seen.sort_unstable();

    let mut registry: Vec<&str> = SCENARIOS.iter().map(|entry| entry.exename).collect();
    registry.sort_unstable();
    assert_eq!(seen, registry);
}

#[rstest]
fn run_overrides_replace_loaded_values(base_config: HarnessConfig) {
    let command = RunCommand {
        artifact_dir: Some(String::from("/opt/published")),
        iterations: Some(5),
        report_dir: Some(String::from("/tmp/reports")),
        ..run_args(Some("windowsforms"), false)
    };

    let config = apply_run_overrides(base_config, &command);

    assert_eq!(config.artifact_dir, "/opt/published");
    assert_eq!(config.iterations, 5);
    assert_eq!(config.report_dir.as_deref(), Some("/tmp/reports"));
}

#[rstest]
fn run_overrides_keep_loaded_values_when_absent(base_config: HarnessConfig) {
    let config = apply_run_overrides(base_config.clone(), &run_args(Some("windowsforms"), false));
    assert_eq!(config, base_config);
}

#[rstest]
fn check_passes_when_every_artifact_exists(artifact_dir: ArtifactDir) {
    for entry in SCENARIOS {
        write_artifact(&artifact_dir.path, entry.exename, "exit 0")
            .unwrap_or_else(|err| panic!("write artifact: {err}"));
    }
    let mut buf = Vec::new();

    check_scenarios(SCENARIOS, &settings_for(&artifact_dir), &mut buf)
        .expect("check should pass");

    let rendered = String::from_utf8(buf).expect("utf8");
    assert_eq!(rendered.lines().filter(|line| line.starts_with("ok\t")).count(), 2);
    assert!(
        rendered.contains("warning\tWindows Forms Template"),
        "rendered: {rendered}"
    );
}

#[rstest]
fn check_counts_missing_and_invalid_records(artifact_dir: ArtifactDir) {
    let entries = [
        Scenario {
            name: "Published",
            exename: "published",
            guiapp: "false",
        },
        Scenario {
            name: "Unpublished",
            exename: "unpublished",
            guiapp: "false",
        },
        Scenario {
            name: "Malformed",
            exename: "malformed",
            guiapp: "maybe",
        },
    ];
    write_artifact(&artifact_dir.path, "published", "exit 0")
        .unwrap_or_else(|err| panic!("write artifact: {err}"));
    let mut buf = Vec::new();

    let err = check_scenarios(&entries, &settings_for(&artifact_dir), &mut buf)
        .expect_err("check should fail");

    assert!(
        matches!(err, CliError::CheckFailed { missing: 1, invalid: 1 }),
        "unexpected error: {err}"
    );
    let rendered = String::from_utf8(buf).expect("utf8");
    assert!(rendered.contains("missing\tUnpublished"), "rendered: {rendered}");
    assert!(rendered.contains("invalid\tMalformed"), "rendered: {rendered}");
}

#[test]
fn write_error_writes_cli_error() {
    let mut buf = Vec::new();
    let err = CliError::UnknownScenario(String::from("console"));
    write_error(&mut buf, &err);
    let rendered = String::from_utf8(buf).expect("utf8");
    assert!(
        rendered.contains("run `scenario-harness list`"),
        "rendered: {rendered}"
    );
}
