//! `docket`: list, edit, export and import practice records from the shell.

mod data;
mod error;
mod kind;
mod paths;
mod render;

use std::fs::File;
use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use docket_lib::config::ExportConfig;
use docket_lib::config::TableConfig;
use docket_lib::edit::CommitOutcome;
use docket_lib::edit::EditController;
use docket_lib::edit::MemoryUpdater;
use docket_lib::export::BrowserViewer;
use docket_lib::export::DirectorySink;
use docket_lib::import::records_from_delimited;
use docket_lib::model::Column;
use docket_lib::model::EditType;
use docket_lib::model::TableRow;
use docket_lib::notify::Toasts;
use docket_lib::view::TableView;
use log::info;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::error::CliError;
use crate::kind::RowKind;
use crate::kind::RowsAction;

#[derive(Parser)]
#[command(name = "docket")]
#[command(about = "Search, edit and export practice records")]
struct Cli {
    /// Table config file (JSON). Defaults to the user config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log at debug level.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

/// Rows, columns and the view state shared by `view` and `export`.
#[derive(clap::Args)]
struct Source {
    /// JSON array of records.
    data: PathBuf,
    /// JSON array of column descriptors. Defaults to the preset of `--kind`,
    /// or for plain records to one column per field.
    #[arg(long)]
    columns: Option<PathBuf>,
    /// Read the file as this kind of row.
    #[arg(long, value_enum, default_value_t = RowKind::Records)]
    kind: RowKind,
    /// Search text, matched against the configured search field.
    #[arg(long)]
    search: Option<String>,
    /// Field to search. Overrides the config.
    #[arg(long)]
    search_field: Option<String>,
    /// Column to sort by.
    #[arg(long)]
    sort: Option<String>,
    /// Sort descending.
    #[arg(long, default_value_t = false, requires = "sort")]
    desc: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print one page of records, or a status board.
    View {
        #[command(flatten)]
        source: Source,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Group rows by this option column instead of listing them.
        #[arg(long)]
        board: Option<String>,
    },
    /// Export every matching record.
    Export {
        #[command(flatten)]
        source: Source,
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        #[arg(long, default_value = "Export")]
        title: String,
        /// Output directory. CSV defaults to the working directory, print
        /// documents to the temp directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Set one field of one record and save the file.
    Edit {
        data: PathBuf,
        #[arg(long)]
        columns: Option<PathBuf>,
        #[arg(long)]
        id: String,
        #[arg(long)]
        field: String,
        #[arg(long)]
        value: String,
    },
    /// Convert delimited text into a JSON record file.
    Import {
        input: PathBuf,
        #[arg(long)]
        columns: Option<PathBuf>,
        /// Column holding the record ids.
        #[arg(long, default_value = "id")]
        id_key: String,
        /// Write here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ExportFormat {
    Csv,
    Print,
}

fn init_logging(verbose: bool) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    let Ok(file) = File::create(&path) else { return };
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = WriteLogger::init(level, Config::default(), file);
}

fn open_view<R: TableRow>(
    source: &Source,
    rows: Vec<R>,
    columns: Vec<Column>,
    mut config: TableConfig,
) -> Result<TableView<R>, CliError> {
    if let Some(field) = &source.search_field {
        config = config.with_search_field(field);
    }

    let mut view = TableView::new(columns, config).with_rows(rows);
    if let Some(search) = &source.search {
        view.set_search(search);
    }
    if let Some(key) = &source.sort {
        if view.column(key).is_none() {
            return Err(CliError::UnknownColumn(key.clone()));
        }
        if view.toggle_sort(key).is_none() {
            return Err(CliError::NotSortable(key.clone()));
        }
        if source.desc {
            view.toggle_sort(key);
        }
    }
    Ok(view)
}

struct ViewPage<'a> {
    source: &'a Source,
    config: TableConfig,
    page: usize,
    board: Option<&'a str>,
}

impl RowsAction for ViewPage<'_> {
    fn run<R: TableRow>(self, rows: Vec<R>, columns: Vec<Column>) -> Result<(), CliError> {
        let mut view = open_view(self.source, rows, columns, self.config)?;

        if let Some(key) = self.board {
            let board = view
                .board(key)
                .ok_or_else(|| CliError::NotABoard(key.to_string()))?;
            let title = view
                .columns()
                .iter()
                .find(|c| c.key != key)
                .or_else(|| view.column(key))
                .ok_or_else(|| CliError::UnknownColumn(key.to_string()))?;
            print!("{}", render::render_board(&board, title));
            return Ok(());
        }

        view.set_page(self.page);
        print!("{}", render::render_table(&view.visible(), view.columns()));
        println!("{}", view.page_info());
        Ok(())
    }
}

struct ExportRows<'a> {
    source: &'a Source,
    config: TableConfig,
    format: ExportFormat,
    title: &'a str,
    out: Option<PathBuf>,
}

impl RowsAction for ExportRows<'_> {
    fn run<R: TableRow>(self, rows: Vec<R>, columns: Vec<Column>) -> Result<(), CliError> {
        let view = open_view(self.source, rows, columns, self.config)?;
        match self.format {
            ExportFormat::Csv => {
                let sink = DirectorySink::new(self.out.unwrap_or_else(|| PathBuf::from(".")));
                let path = view
                    .export_csv(self.title, &sink)
                    .ok_or(CliError::ExportFailed)?;
                println!("{}", path.display());
            }
            ExportFormat::Print => {
                let viewer = self.out.map(BrowserViewer::in_dir).unwrap_or_default();
                if !view.export_print(self.title, &viewer) {
                    return Err(CliError::ExportFailed);
                }
            }
        }
        Ok(())
    }
}

fn with_source(source: &Source, action: impl RowsAction) -> Result<(), CliError> {
    kind::dispatch(source.kind, &source.data, source.columns.as_deref(), action)
}

async fn edit(
    data_path: &Path,
    columns: Option<&Path>,
    id: &str,
    field: &str,
    value: &str,
) -> Result<(), CliError> {
    let records = data::load_records(data_path)?;
    let columns = data::load_columns(columns, &records)?;
    let column = columns
        .iter()
        .find(|c| c.key == field)
        .ok_or_else(|| CliError::UnknownColumn(field.to_string()))?;
    let row = records
        .iter()
        .find(|r| r.id() == id)
        .cloned()
        .ok_or_else(|| CliError::UnknownRecord(id.to_string()))?;

    let updater = MemoryUpdater::new(records);
    let toasts = Toasts::new();
    let editor = EditController::new();

    let outcome = if column.edit_type == EditType::Status {
        editor
            .apply_option(&row, column, value, &updater, &toasts)
            .await
    } else if editor.begin_edit(&row, column) {
        editor.set_draft(value);
        editor.commit(&updater, &toasts).await
    } else {
        CommitOutcome::Idle
    };

    for toast in toasts.drain() {
        eprintln!("[{:?}] {}", toast.level, toast.message);
    }

    match outcome {
        CommitOutcome::Committed { cell, value } => {
            data::save_records(data_path, &updater.records())?;
            info!("Saved {} = {} to {}", cell, value, data_path.display());
            println!("Updated {cell}");
            Ok(())
        }
        CommitOutcome::Unchanged => {
            println!("No change");
            Ok(())
        }
        CommitOutcome::Invalid(e) => Err(e.into()),
        CommitOutcome::Failed(e) => Err(e.into()),
        CommitOutcome::Idle | CommitOutcome::Busy => Err(CliError::NotEditable {
            id: id.to_string(),
            field: field.to_string(),
        }),
    }
}

fn import(
    input: &Path,
    columns: Option<&Path>,
    id_key: &str,
    export: &ExportConfig,
    out: Option<&Path>,
) -> Result<(), CliError> {
    let text = data::read_text(input)?;
    let columns = data::load_columns(columns, &[])?;
    let records = records_from_delimited(&text, &columns, id_key, export)?;

    match out {
        Some(path) => {
            data::save_records(path, &records)?;
            println!("Imported {} records into {}", records.len(), path.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&records).map_err(|source| CliError::Json {
                path: input.to_path_buf(),
                source,
            })?;
            println!("{json}");
        }
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = data::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::View { source, page, board } => with_source(
            &source,
            ViewPage {
                source: &source,
                config,
                page,
                board: board.as_deref(),
            },
        ),
        Command::Export {
            source,
            format,
            title,
            out,
        } => with_source(
            &source,
            ExportRows {
                source: &source,
                config,
                format,
                title: &title,
                out,
            },
        ),
        Command::Edit {
            data,
            columns,
            id,
            field,
            value,
        } => edit(&data, columns.as_deref(), &id, &field, &value).await,
        Command::Import {
            input,
            columns,
            id_key,
            out,
        } => import(
            &input,
            columns.as_deref(),
            &id_key,
            &config.export,
            out.as_deref(),
        ),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
