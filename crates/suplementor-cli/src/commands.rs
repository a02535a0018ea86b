use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use tracing::{debug, info, info_span, warn};

use suplementor_export::{ExportFormat, ExportOptions, format_view};
use suplementor_model::{FilterPatch, FilterState, SortState};
use suplementor_query::{
    FilePresetStore, PresetLibrary, QueryEngine, RecordStore, Selection, SelectionChange, share,
};

use suplementor_cli::cli::{
    CompareArgs, ExportArgs, FilterArgs, ListArgs, PresetCommand, PresetDirArgs, SavePresetArgs,
    ShareArgs, SortArgs, ViewArgs,
};
use suplementor_cli::config::Config;

use crate::summary::{print_comparison, print_preset, print_preset_list, print_view};

pub fn run_list(args: &ListArgs, config: &Config) -> Result<()> {
    let preset_dir = preset_dir(args.preset_dir.as_ref(), config);
    let engine = build_engine(&args.view, &preset_dir)?;
    print_view(
        &engine.derived_view(),
        engine.store().len(),
        engine.active_filter_count(),
        engine.sort(),
    );
    Ok(())
}

pub fn run_export(args: &ExportArgs, config: &Config) -> Result<()> {
    let preset_dir = preset_dir(args.preset_dir.as_ref(), config);
    let format = match args.format {
        Some(format) => ExportFormat::from(format),
        None => config.export_format()?,
    };
    let mut options = ExportOptions::new(format);
    if args.all_columns {
        options = options.all_columns();
    }
    if !args.columns.is_empty() {
        options = options.columns(args.columns.iter().map(|column| column.trim()));
    }
    if let Some(title) = &args.title {
        options = options.title(title);
    }

    let engine = build_engine(&args.view, &preset_dir)?;
    let view = engine.derived_view();
    let span = info_span!("export", format = %format, records = view.len());
    let _guard = span.enter();
    let output = format_view(&view, &options)?;

    match &args.output {
        Some(path) => {
            fs::write(path, output).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "export written");
        }
        None => print!("{output}"),
    }
    Ok(())
}

pub fn run_compare(args: &CompareArgs, config: &Config) -> Result<()> {
    let store = load_store(&args.data)?;
    let max = args.max.unwrap_or(config.max_selection);
    if max == 0 {
        bail!("--max must be at least 1");
    }
    let mut selection = Selection::new(max);
    for id in &args.ids {
        if !store.contains(id) {
            warn!(%id, "unknown supplement id skipped");
            continue;
        }
        if selection.contains(id) {
            debug!(%id, "duplicate supplement id skipped");
            continue;
        }
        if selection.toggle(id) == SelectionChange::Ignored {
            warn!(%id, max, "comparison is full, supplement skipped");
        }
    }
    if selection.is_empty() {
        bail!("none of the requested supplements exist in {}", args.data.display());
    }
    print_comparison(&selection.selected_records(&store));
    Ok(())
}

pub fn run_presets(command: &PresetCommand, config: &Config) -> Result<()> {
    match command {
        PresetCommand::List(dir) => {
            let (_, library) = open_presets(dir, config)?;
            print_preset_list(library.list());
        }
        PresetCommand::Show { id, dir } => {
            let (_, library) = open_presets(dir, config)?;
            let preset = library
                .get(id)
                .ok_or_else(|| anyhow!("unknown preset: {id}"))?;
            print_preset(preset);
        }
        PresetCommand::Save(args) => save_preset(args, config)?,
        PresetCommand::Delete { id, dir } => {
            let (mut store, mut library) = open_presets(dir, config)?;
            let removed = library.delete(id)?;
            library
                .persist(&mut store)
                .with_context(|| format!("write presets to {}", store.dir().display()))?;
            println!("Deleted preset {} ({})", removed.name, removed.id);
        }
    }
    Ok(())
}

pub fn run_share(args: &ShareArgs) -> Result<()> {
    let (filters, sort) = resolve_filters(&args.filters, &args.sort);
    println!("{}", share::encode(&filters, sort.as_ref()));
    Ok(())
}

fn save_preset(args: &SavePresetArgs, config: &Config) -> Result<()> {
    let (mut store, mut library) = open_presets(&args.dir, config)?;
    let (filters, sort) = resolve_filters(&args.filters, &args.sort);
    let id = library
        .save_snapshot(
            &args.name,
            args.description.clone(),
            filters,
            sort,
            Utc::now(),
        )?
        .id
        .clone();
    library
        .persist(&mut store)
        .with_context(|| format!("write presets to {}", store.dir().display()))?;
    println!("Saved preset {id}");
    Ok(())
}

/// Query string first, then explicit flags on top.
fn resolve_filters(filters: &FilterArgs, sort: &SortArgs) -> (FilterState, Option<SortState>) {
    let (mut state, mut resolved_sort) = match &filters.query_string {
        Some(query) => share::decode(query),
        None => (FilterState::default(), None),
    };
    state.merge(filters.patch());
    if let Some(explicit) = sort.sort_state() {
        resolved_sort = Some(explicit);
    }
    (state, resolved_sort)
}

fn build_engine(args: &ViewArgs, preset_dir: &Path) -> Result<QueryEngine> {
    let span = info_span!("view", data = %args.data.display());
    let _guard = span.enter();

    let store = load_store(&args.data)?;
    let mut engine = QueryEngine::new(Arc::new(store));

    if let Some(id) = &args.preset {
        let library = PresetLibrary::load(&FilePresetStore::new(preset_dir))
            .with_context(|| format!("read presets from {}", preset_dir.display()))?;
        let preset = library
            .get(id)
            .ok_or_else(|| anyhow!("unknown preset: {id}"))?;
        engine.apply_preset(preset);
    }

    if let Some(query) = &args.filters.query_string {
        let (filters, sort) = share::decode(query);
        engine.set_filter(FilterPatch::from(filters));
        if sort.is_some() {
            engine.set_sort(sort);
        }
    }

    let patch = args.filters.patch();
    if !patch.is_empty() {
        engine.set_filter(patch);
    }
    if let Some(sort) = args.sort.sort_state() {
        engine.set_sort(Some(sort));
    }

    info!(
        records = engine.store().len(),
        visible = engine.derived_view().len(),
        active_filters = engine.active_filter_count(),
        "view ready"
    );
    Ok(engine)
}

fn load_store(path: &Path) -> Result<RecordStore> {
    let file = File::open(path).with_context(|| format!("open dataset {}", path.display()))?;
    let store = RecordStore::from_json_reader(BufReader::new(file))
        .with_context(|| format!("load dataset {}", path.display()))?;
    info!(path = %path.display(), records = store.len(), "dataset loaded");
    Ok(store)
}

fn open_presets(
    dir: &PresetDirArgs,
    config: &Config,
) -> Result<(FilePresetStore, PresetLibrary)> {
    let store = FilePresetStore::new(preset_dir(dir.preset_dir.as_ref(), config));
    let library = PresetLibrary::load(&store)
        .with_context(|| format!("read presets from {}", store.dir().display()))?;
    Ok((store, library))
}

fn preset_dir(explicit: Option<&PathBuf>, config: &Config) -> PathBuf {
    explicit.cloned().unwrap_or_else(|| config.preset_dir.clone())
}
