//! `promptform`: manage schema-defined prompt records from the command line.
//!
//! Records and schemas live in a single JSON store file (`--store`, or the
//! `PROMPTFORM_STORE` environment variable). Logging goes to stderr and is
//! controlled through `RUST_LOG`.

use std::fmt::Write as FmtWrite;
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use promptform::{
    Control, DocumentFormat, FieldPath, FileStore, FormState, MemoryStore, NoticeLevel,
    OutputDestination, OutputOptions, PromptError, PromptLibrary, Record, RecordStore,
    SchemaSaveOutcome, StoreSnapshot, document_meta_schema, emit, parse_document_str,
};

const DEFAULT_STORE_FILE: &str = "prompts.json";

#[derive(Debug, Parser)]
#[command(
    name = "promptform",
    version,
    about = "Create, edit and validate prompt records against editable schemas"
)]
struct Cli {
    /// Store file holding schemas and records
    #[arg(
        long = "store",
        env = "PROMPTFORM_STORE",
        value_name = "PATH",
        default_value = DEFAULT_STORE_FILE,
        global = true
    )]
    store: PathBuf,

    /// Output format for printed documents (json, yaml, toml)
    #[arg(long = "format", value_name = "FORMAT", global = true)]
    format: Option<DocumentFormat>,

    /// Destinations for printed documents ("-" writes to stdout)
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append, global = true)]
    outputs: Vec<String>,

    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty", global = true)]
    no_pretty: bool,

    /// Keep the store empty instead of seeding the built-in prompt types
    #[arg(long = "no-seed", global = true)]
    no_seed: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the available prompt types
    Types,
    /// List the records of a prompt type
    List {
        /// Prompt type; defaults to the first available type
        #[arg(value_name = "TYPE")]
        prompt_type: Option<String>,
    },
    /// Print a stored record
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Print the form rendered for a prompt type, or for editing a record
    Form {
        #[arg(value_name = "TYPE")]
        prompt_type: Option<String>,
        /// Render the edit form of this record instead
        #[arg(long = "id", value_name = "ID", conflicts_with = "prompt_type")]
        id: Option<String>,
    },
    /// Create a record through the form of a prompt type
    Create {
        #[arg(value_name = "TYPE")]
        prompt_type: String,
        #[command(flatten)]
        values: FieldValues,
    },
    /// Edit a stored record through its form
    Edit {
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        values: FieldValues,
    },
    /// Delete a stored record
    Delete {
        #[arg(value_name = "ID")]
        id: String,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
    /// Copy schemas and records from a document into the store, skipping
    /// prompt types and record ids that already exist
    Import {
        /// File path, inline payload, or "-" for stdin
        #[arg(value_name = "SPEC")]
        spec: String,
    },
    /// Inspect and edit prompt type schemas
    #[command(subcommand)]
    Schema(SchemaCommand),
}

#[derive(Debug, Subcommand)]
enum SchemaCommand {
    /// Print the schema of a prompt type, or an empty template for a new one
    Show {
        #[arg(value_name = "TYPE")]
        prompt_type: String,
    },
    /// Save a schema document: file path, inline payload, or "-" for stdin
    Save {
        #[arg(value_name = "SPEC")]
        spec: String,
    },
    /// Check stored records of a prompt type against its schema
    Reconcile {
        #[arg(value_name = "TYPE")]
        prompt_type: String,
    },
    /// Print the JSON Schema that schema documents must satisfy
    Meta,
}

#[derive(Debug, Args)]
struct FieldValues {
    /// Field value as NAME=VALUE; nested fields use parent.child
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    set: Vec<(FieldPath, String)>,
}

#[derive(Debug)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();
    let cli = Cli::parse();

    let store = FileStore::open(&cli.store)
        .await
        .wrap_err_with(|| format!("failed to open store {}", cli.store.display()))?;
    let options = promptform::LibraryOptions::default().with_seed_builtin_schemas(!cli.no_seed);
    let mut library = PromptLibrary::with_options(store, options);
    library.bootstrap().await?;

    let outcome = run(&cli, &mut library).await;
    report_notices(&mut library);
    outcome
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: &Cli, library: &mut PromptLibrary<FileStore>) -> Result<()> {
    let printer = Printer::from_cli(cli)?;

    match &cli.command {
        Command::Types => {
            for prompt_type in library.prompt_types().await? {
                println!("{prompt_type}");
            }
        }
        Command::List { prompt_type } => {
            if let Some(prompt_type) = prompt_type {
                library.select_type(prompt_type).await?;
            }
            let rows = library.records_for_active_type().await?;
            if rows.is_empty() {
                println!("No prompts found.");
            }
            for row in rows {
                println!("{}\t{}", row.id, row.title);
            }
        }
        Command::Show { id } => {
            let record = find_record(library, id).await?;
            printer.print(&serde_json::to_value(&record)?)?;
        }
        Command::Form { prompt_type, id } => {
            let form = match (prompt_type, id) {
                (_, Some(id)) => library.open_edit_form(id).await?,
                (Some(prompt_type), None) => {
                    library.select_type(prompt_type).await?;
                    library.open_create_form().await?
                }
                (None, None) => library.open_create_form().await?,
            };
            print!("{}", describe_form(form));
        }
        Command::Create {
            prompt_type,
            values,
        } => {
            library.select_type(prompt_type).await?;
            library.open_create_form().await?;
            let record = fill_and_submit(library, values).await?;
            println!("{}", record.id);
        }
        Command::Edit { id, values } => {
            library.open_edit_form(id).await?;
            let record = fill_and_submit(library, values).await?;
            println!("{}", record.id);
        }
        Command::Delete { id, yes } => {
            let approved = *yes;
            let deleted = library
                .delete_record(id, |record| approved || confirm_delete(record))
                .await?;
            if !deleted {
                println!("Deletion cancelled.");
            }
        }
        Command::Import { spec } => {
            let text = load_spec(spec, "import", printer.format)?;
            let document = parse_document_str(&text.contents, text.format)
                .map_err(|err| eyre!("failed to parse import document: {err:#}"))?;
            let snapshot = StoreSnapshot::from_document(document)
                .wrap_err("import document is neither a store document nor schema/record lists")?;
            let source = MemoryStore::from_snapshot(snapshot);
            let report = library.import_from(&source).await?;
            printer.print(&serde_json::to_value(&report)?)?;
        }
        Command::Schema(command) => run_schema(command, library, &printer).await?,
    }
    Ok(())
}

async fn run_schema(
    command: &SchemaCommand,
    library: &mut PromptLibrary<FileStore>,
    printer: &Printer,
) -> Result<()> {
    match command {
        SchemaCommand::Show { prompt_type } => {
            let text = library.schema_editor_text(Some(prompt_type)).await?;
            let document: Value = serde_json::from_str(&text)?;
            printer.print(&document)?;
        }
        SchemaCommand::Save { spec } => {
            let text = load_spec(spec, "schema", printer.format)?;
            match library.save_schema_text(&text.contents, text.format).await? {
                SchemaSaveOutcome::Unchanged { prompt_type } => {
                    tracing::debug!(%prompt_type, "schema unchanged");
                }
                SchemaSaveOutcome::Saved {
                    prompt_type,
                    created,
                    issues,
                    ..
                } => {
                    let verb = if created { "created" } else { "updated" };
                    println!("{prompt_type}: schema {verb}, {} record(s) need attention", issues.len());
                }
            }
        }
        SchemaCommand::Reconcile { prompt_type } => {
            let issues = library.reconcile(prompt_type).await?;
            if issues.is_empty() {
                println!("All {prompt_type} prompts satisfy the schema.");
            } else {
                printer.print(&serde_json::to_value(&issues)?)?;
            }
        }
        SchemaCommand::Meta => {
            let schema = document_meta_schema().map_err(|err| eyre!("{err:#}"))?;
            printer.print(&schema)?;
        }
    }
    Ok(())
}

async fn find_record(library: &PromptLibrary<FileStore>, id: &str) -> Result<Record> {
    library
        .store()
        .record_by_id(id)
        .await?
        .ok_or_else(|| eyre!("prompt {id} not found"))
}

/// Applies each `--set` assignment the way the form would receive it:
/// dropdowns and checkboxes fire change events, everything else input.
async fn fill_and_submit(
    library: &mut PromptLibrary<FileStore>,
    values: &FieldValues,
) -> Result<Record> {
    for (path, value) in &values.set {
        let selects = library
            .form()
            .and_then(|form| form.field(path))
            .is_some_and(|field| {
                matches!(field.control, Control::Dropdown { .. } | Control::Checkbox(_))
            });
        let update = if selects {
            library.change(path.clone(), value.as_str())?
        } else {
            library.input(path.clone(), value.as_str())?
        };
        for change in &update.visibility {
            tracing::debug!(path = %change.path, visible = change.visible, "visibility changed");
        }
    }

    match library.submit().await {
        Ok(record) => Ok(record),
        Err(PromptError::Submit(err)) => Err(eyre!("{err}")),
        Err(err) => Err(err.into()),
    }
}

/// Visible fields one per line; hidden ones are only named at the end.
fn describe_form(form: &FormState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", form.heading(), form.prompt_type());
    for field in form.visible_fields() {
        let indent = "  ".repeat(field.path.depth());
        let disabled = if field.is_disabled() { " [disabled]" } else { "" };
        let _ = write!(
            out,
            "{indent}{} <{}> {}{disabled}",
            field.caption(),
            field.control.widget(),
            field.path
        );
        let value = field.live_value();
        if !value.is_empty() {
            let _ = write!(out, " = {value}");
        } else if let Some(placeholder) = field.placeholder() {
            let _ = write!(out, " ({placeholder})");
        }
        out.push('\n');
    }

    let hidden: Vec<String> = form
        .fields()
        .into_iter()
        .filter(|field| !field.visible)
        .map(|field| field.path.to_string())
        .collect();
    if !hidden.is_empty() {
        let _ = writeln!(out, "hidden until their condition matches: {}", hidden.join(", "));
    }
    out
}

fn confirm_delete(record: &Record) -> bool {
    eprint!("Delete \"{}\"? [y/N] ", record.title());
    let _ = io::stderr().flush();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn report_notices(library: &mut PromptLibrary<FileStore>) {
    for notice in library.status_mut().drain() {
        match notice.level {
            NoticeLevel::Error | NoticeLevel::Warning => eprintln!("{}", notice.message),
            NoticeLevel::Info | NoticeLevel::Success => println!("{}", notice.message),
        }
    }
}

fn parse_assignment(raw: &str) -> std::result::Result<(FieldPath, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let path = FieldPath::from(name.trim());
    if path.is_root() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((path, value.to_string()))
}

struct Printer {
    format: DocumentFormat,
    options: OutputOptions,
}

impl Printer {
    fn from_cli(cli: &Cli) -> Result<Self> {
        let mut diagnostics = DiagnosticCollector::default();
        let mut destinations = Vec::new();
        for raw in &cli.outputs {
            if raw.trim().is_empty() {
                diagnostics.push_output("output destination cannot be empty");
            } else if raw == "-" {
                destinations.push(OutputDestination::Stdout);
            } else {
                destinations.push(OutputDestination::file(raw));
            }
        }
        if destinations.is_empty() {
            destinations.push(OutputDestination::Stdout);
        }

        let format = match cli.format {
            Some(format) => format,
            None => infer_output_format(&destinations, &mut diagnostics),
        };
        diagnostics.into_result()?;
        Ok(Self {
            format,
            options: OutputOptions::new(format)
                .with_pretty(!cli.no_pretty)
                .with_destinations(destinations),
        })
    }

    fn print(&self, value: &Value) -> Result<()> {
        emit(value, &self.options).map_err(|err| eyre!("{err:#}"))
    }
}

fn infer_output_format(
    destinations: &[OutputDestination],
    diagnostics: &mut DiagnosticCollector,
) -> DocumentFormat {
    let mut detected: Option<DocumentFormat> = None;
    for destination in destinations {
        let OutputDestination::File(path) = destination else {
            continue;
        };
        match format_from_extension(path) {
            ExtensionFormat::Known(format) => match detected {
                Some(existing) if existing != format => diagnostics.push_output(format!(
                    "output file {} uses {format} but other destinations use {existing}; align extensions",
                    path.display()
                )),
                Some(_) => {}
                None => detected = Some(format),
            },
            ExtensionFormat::UnsupportedFeature {
                format_name,
                feature_flag,
            } => diagnostics.push_output(format!(
                "output file {} requires {format_name} support, but this build was compiled without the '{feature_flag}' feature",
                path.display()
            )),
            ExtensionFormat::Unknown => {}
        }
    }
    detected.unwrap_or_default()
}

struct LoadedSpec {
    contents: String,
    format: DocumentFormat,
}

/// Reads a file, stdin or inline spec; the file extension picks the format.
fn load_spec(spec: &str, label: &str, fallback: DocumentFormat) -> Result<LoadedSpec> {
    let mut diagnostics = DiagnosticCollector::default();
    let format = resolve_format(spec, label, fallback, &mut diagnostics);
    let contents = match read_spec(spec, label) {
        Ok(contents) => contents,
        Err(err) => {
            diagnostics.push_input(label, format!("{err:#}"));
            String::new()
        }
    };
    diagnostics.into_result()?;
    Ok(LoadedSpec { contents, format })
}

fn resolve_format(
    spec: &str,
    label: &str,
    fallback: DocumentFormat,
    diagnostics: &mut DiagnosticCollector,
) -> DocumentFormat {
    if spec == "-" {
        return fallback;
    }
    match format_from_extension(Path::new(spec)) {
        ExtensionFormat::Known(format) => format,
        ExtensionFormat::UnsupportedFeature {
            format_name,
            feature_flag,
        } => {
            diagnostics.push_input(
                label,
                format!(
                    "'{spec}' requires {format_name} support, but this build lacks the '{feature_flag}' feature"
                ),
            );
            fallback
        }
        ExtensionFormat::Unknown => fallback,
    }
}

fn read_spec(spec: &str, label: &str) -> Result<String> {
    if spec == "-" {
        return read_from_source(&InputSource::Stdin);
    }
    let path = PathBuf::from(spec);
    match read_from_source(&InputSource::File(path.clone())) {
        Ok(contents) => Ok(contents),
        Err(err) if is_not_found(&err) => Ok(spec.to_string()),
        Err(err) => Err(err.wrap_err(format!("failed to load {label} from {}", path.display()))),
    }
}

fn read_from_source(source: &InputSource) -> Result<String> {
    match source {
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("failed to read from stdin")?;
            Ok(buffer)
        }
        InputSource::File(path) => fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read file {}", path.display())),
    }
}

fn is_not_found(err: &color_eyre::eyre::Report) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|io_err| io_err.kind() == io::ErrorKind::NotFound)
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_input(&mut self, label: &str, message: impl Into<String>) {
        self.messages
            .push(format!("input ({label}): {}", message.into()));
    }

    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered input/output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}

fn format_from_extension(path: &Path) -> ExtensionFormat {
    let Some(ext) = path.extension() else {
        return ExtensionFormat::Unknown;
    };
    let normalized = ext.to_string_lossy().to_ascii_lowercase();
    match normalized.as_str() {
        "json" => ExtensionFormat::Known(DocumentFormat::Json),
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => ExtensionFormat::Known(DocumentFormat::Yaml),
        #[cfg(not(feature = "yaml"))]
        "yaml" | "yml" => ExtensionFormat::UnsupportedFeature {
            format_name: "yaml",
            feature_flag: "yaml",
        },
        #[cfg(feature = "toml")]
        "toml" => ExtensionFormat::Known(DocumentFormat::Toml),
        #[cfg(not(feature = "toml"))]
        "toml" => ExtensionFormat::UnsupportedFeature {
            format_name: "toml",
            feature_flag: "toml",
        },
        _ => ExtensionFormat::Unknown,
    }
}

#[derive(Debug)]
enum ExtensionFormat {
    Known(DocumentFormat),
    #[allow(dead_code)]
    UnsupportedFeature {
        format_name: &'static str,
        feature_flag: &'static str,
    },
    Unknown,
}
