//! Integration tests for argument parsing and configuration loading.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use suplementor_cli::cli::{Cli, Command, ExportFormatArg, LogLevelArg, PresetCommand};
use suplementor_cli::config::Config;
use suplementor_cli::logging::LogFormat;
use suplementor_model::{
    FilterState, NumericRange, SortDirection, SortKey, SortState, SupplementCategory,
};
use tracing::level_filters::LevelFilter;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("suplementor").chain(args.iter().copied()))
        .expect("arguments should parse")
}

#[test]
fn test_list_filters_build_patch() {
    let cli = parse(&[
        "list",
        "data.json",
        "--category",
        "herb",
        "--category",
        "ADAPTOGEN",
        "--safety",
        "8-10",
        "--has-studies",
        "--tag",
        "sleep",
        "--sort",
        "price",
        "--desc",
    ]);
    let Command::List(args) = cli.command else {
        panic!("expected list command");
    };
    assert_eq!(args.view.data, PathBuf::from("data.json"));

    let mut state = FilterState::default();
    state.merge(args.view.filters.patch());
    assert_eq!(state.categories.len(), 2);
    assert!(state.categories.contains(&SupplementCategory::Herb));
    assert_eq!(state.safety_range, NumericRange::new(8.0, 10.0));
    assert!(state.has_studies_only);
    assert!(!state.natural_only);
    assert!(state.tags.contains("sleep"));
    assert_eq!(
        args.view.sort.sort_state(),
        Some(SortState::new(SortKey::Price, SortDirection::Descending))
    );
}

#[test]
fn test_multi_select_flags_build_patch() {
    let cli = parse(&[
        "share",
        "--condition",
        "insomnia",
        "--mechanism",
        "GABA",
        "--exclude-side-effect",
        "nausea",
        "--exclude-side-effect",
        "headache",
        "--safety",
        "-5-10",
    ]);
    let Command::Share(args) = cli.command else {
        panic!("expected share command");
    };

    let mut state = FilterState::default();
    state.merge(args.filters.patch());
    assert!(state.clinical_conditions.contains("insomnia"));
    assert!(state.mechanisms.contains("GABA"));
    assert_eq!(state.side_effects.len(), 2);
    assert_eq!(state.safety_range, NumericRange::new(-5.0, 10.0));
    assert_eq!(state.active_count(), 4);
}

#[test]
fn test_no_filter_flags_give_empty_patch() {
    let cli = parse(&["list", "data.json"]);
    let Command::List(args) = cli.command else {
        panic!("expected list command");
    };
    assert!(args.view.filters.patch().is_empty());
    assert_eq!(args.view.sort.sort_state(), None);
}

#[test]
fn test_invalid_values_rejected() {
    assert!(Cli::try_parse_from(["suplementor", "list", "data.json", "--desc"]).is_err());
    assert!(
        Cli::try_parse_from(["suplementor", "list", "data.json", "--category", "candy"]).is_err()
    );
    assert!(
        Cli::try_parse_from(["suplementor", "list", "data.json", "--price", "50-10"]).is_err()
    );
    assert!(Cli::try_parse_from(["suplementor", "compare", "data.json"]).is_err());
}

#[test]
fn test_export_columns_split_on_commas() {
    let cli = parse(&[
        "export",
        "data.json",
        "--format",
        "tsv",
        "--columns",
        "id,name,safetyRating",
        "-o",
        "out.tsv",
    ]);
    let Command::Export(args) = cli.command else {
        panic!("expected export command");
    };
    assert_eq!(args.format, Some(ExportFormatArg::Tsv));
    assert_eq!(args.columns, vec!["id", "name", "safetyRating"]);
    assert_eq!(args.output, Some(PathBuf::from("out.tsv")));
    assert!(!args.all_columns);
}

#[test]
fn test_preset_save_arguments() {
    let cli = parse(&[
        "presets",
        "save",
        "Calm evenings",
        "--description",
        "Sleep support",
        "--evidence",
        "strong",
        "--preset-dir",
        "/tmp/presets",
    ]);
    let Command::Presets(PresetCommand::Save(args)) = cli.command else {
        panic!("expected presets save command");
    };
    assert_eq!(args.name, "Calm evenings");
    assert_eq!(args.description.as_deref(), Some("Sleep support"));
    assert_eq!(args.dir.preset_dir, Some(PathBuf::from("/tmp/presets")));
    assert_eq!(args.filters.patch().evidence_levels.map(|levels| levels.len()), Some(1));
}

#[test]
fn test_global_config_flag_after_subcommand() {
    let cli = parse(&["share", "--natural", "--config", "custom.toml"]);
    assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    assert!(matches!(cli.command, Command::Share(_)));
}

#[test]
fn test_log_arguments_convert() {
    let cli = parse(&["--log-level", "debug", "--log-format", "json", "share"]);
    assert_eq!(cli.log_level, Some(LogLevelArg::Debug));
    assert_eq!(LevelFilter::from(LogLevelArg::Debug), LevelFilter::DEBUG);
    assert_eq!(LogFormat::from(cli.log_format), LogFormat::Json);
}

#[test]
fn test_config_file_loading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("suplementor.toml");
    fs::write(
        &path,
        "max_selection = 3\npreset_dir = \"presets\"\ndefault_export_format = \"html\"\n",
    )
    .unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(config.max_selection, 3);
    assert_eq!(config.preset_dir, PathBuf::from("presets"));
    assert_eq!(config.default_export_format, "html");
}

#[test]
fn test_missing_explicit_config_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(Config::load(Some(missing.as_path())).is_err());
}
