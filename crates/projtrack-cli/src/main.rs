//! Projtrack CLI - create projects and watch the lists update

use anyhow::Context;
use clap::{Parser, Subcommand};
use projtrack_core::Error;
use projtrack_core::config::Config;
use projtrack_core::context::AppContext;
use projtrack_core::form::{ProjectInput, Rejection};
use projtrack_core::intake::{self, ProjectRecord};
use projtrack_core::project::Project;
use projtrack_core::validation::{FieldValue, Validatable};
use projtrack_core::view::ProjectList;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use serde_json::json;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

#[cfg(test)]
mod main_tests;

#[derive(Parser)]
#[command(name = "projtrack")]
#[command(author, version, about = "Reactive project tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log store activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and add one project, then show the lists
    Add {
        /// Project title
        #[arg(short, long, default_value = "")]
        title: String,
        /// Project description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Number of people
        #[arg(short, long, default_value = "")]
        people: String,
    },

    /// Submit JSON-lines project records from a file or stdin
    Batch {
        /// Input file (reads stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Interactive session: enter projects and watch the lists redraw
    Session,

    /// Check a single value against a set of constraints
    Validate {
        /// Value under test
        #[arg(allow_negative_numbers = true)]
        value: String,
        /// Treat the value as a number
        #[arg(long)]
        number: bool,
        /// Value must not be blank
        #[arg(long)]
        required: bool,
        /// Trimmed length must be greater than this
        #[arg(long)]
        min_length: Option<usize>,
        /// Trimmed length must be less than this
        #[arg(long)]
        max_length: Option<usize>,
        /// Minimum numeric value (inclusive)
        #[arg(long, allow_negative_numbers = true)]
        min: Option<f64>,
        /// Maximum numeric value (inclusive)
        #[arg(long, allow_negative_numbers = true)]
        max: Option<f64>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Reset configuration to defaults
    Reset,
    /// Show configuration file path
    Path,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let default_directive = if cli.verbose { "projtrack=info" } else { "projtrack=warn" };
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match default_directive.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

/// Print an error, with its code and suggestion when it is a Projtrack error
fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<Error>() {
        Some(e) => {
            eprintln!("Error [{}]: {:#}", e.code(), err);
            if let Some(suggestion) = e.suggestion() {
                eprintln!("  Suggestion: {}", suggestion);
            }
        }
        None => eprintln!("Error: {:#}", err),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Add {
            title,
            description,
            people,
        } => cmd_add(&title, &description, &people, cli.format, cli.quiet),

        Commands::Batch { file } => cmd_batch(file, cli.format, cli.quiet),

        Commands::Session => cmd_session(cli.quiet),

        Commands::Validate {
            value,
            number,
            required,
            min_length,
            max_length,
            min,
            max,
        } => {
            let value = if number {
                let n: f64 = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Not a number: {}", value))?;
                FieldValue::Number(n)
            } else {
                FieldValue::Text(value)
            };
            let validatable = Validatable {
                value,
                required,
                min_length,
                max_length,
                min,
                max,
            };
            cmd_validate(&validatable, cli.format)
        }

        Commands::Config { action } => cmd_config(action, cli.quiet),
    }
}

fn load_context() -> anyhow::Result<AppContext> {
    let config = Config::load()?;
    Ok(AppContext::init(config))
}

fn render_lists(lists: &[ProjectList]) -> String {
    lists
        .iter()
        .map(ProjectList::render)
        .collect::<Vec<_>>()
        .join("\n")
}

fn lists_json(lists: &[ProjectList]) -> serde_json::Value {
    let mut out = serde_json::Map::new();
    for list in lists {
        out.insert(list.kind().as_str().to_string(), json!(list.items()));
    }
    serde_json::Value::Object(out)
}

fn print_created(project: &Project) {
    println!("Project created: {} ({} people)", project.title, project.people);
    println!("  ID: {}", project.id);
}

fn cmd_add(
    title: &str,
    description: &str,
    people: &str,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let ctx = load_context()?;
    let lists = ctx.project_lists();
    let mut form = ctx.project_input();

    form.fill(title, description, people);
    let project = form.submit(&ctx.store()).map_err(Error::from)?;

    match format {
        OutputFormat::Json => {
            let out = json!({ "project": project, "lists": lists_json(&lists) });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            if !quiet {
                print_created(&project);
                println!();
            }
            print!("{}", render_lists(&lists));
        }
    }
    Ok(())
}

fn cmd_batch(file: Option<PathBuf>, format: OutputFormat, quiet: bool) -> anyhow::Result<()> {
    let records = match &file {
        Some(path) => {
            let f = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            intake::read_records(BufReader::new(f))?
        }
        None => intake::read_records(io::stdin().lock())?,
    };
    debug!(records = records.len(), "Read batch input");

    let ctx = load_context()?;
    let lists = ctx.project_lists();
    let store = ctx.store();
    let mut form = ctx.project_input();

    let mut rejected: Vec<(&ProjectRecord, Rejection)> = Vec::new();
    for record in &records {
        record.fill(&mut form);
        if let Err(rejection) = form.submit(&store) {
            rejected.push((record, rejection));
            form.clear();
        }
    }
    info!(
        accepted = store.len(),
        rejected = rejected.len(),
        "Batch finished"
    );

    match format {
        OutputFormat::Json => {
            let rejected: Vec<_> = rejected
                .iter()
                .map(|(record, rejection)| json!({ "line": record.line, "fields": rejection.fields }))
                .collect();
            let out = json!({
                "accepted": store.len(),
                "rejected": rejected,
                "lists": lists_json(&lists),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            for (record, rejection) in &rejected {
                eprintln!("line {}: {}", record.line, rejection);
            }
            if !quiet {
                println!(
                    "Added {} of {} projects.\n",
                    store.len(),
                    records.len()
                );
            }
            print!("{}", render_lists(&lists));
        }
    }
    Ok(())
}

fn cmd_session(quiet: bool) -> anyhow::Result<()> {
    let ctx = load_context()?;
    let lists = ctx.project_lists();
    let store = ctx.store();

    // Subscribed after the lists, so they have redrawn by the time this runs.
    {
        let lists = lists.clone();
        store.subscribe(move |_| {
            println!();
            print!("{}", render_lists(&lists));
            println!();
        });
    }

    let form = std::rc::Rc::new(std::cell::RefCell::new(ctx.project_input()));
    let submit = ProjectInput::submit_handler(form.clone(), store.clone());
    let mut editor = DefaultEditor::new()?;

    if !quiet {
        println!("Enter projects. Press Ctrl-D to finish.");
        println!();
        print!("{}", render_lists(&lists));
        println!();
    }

    loop {
        let mut fields = Vec::with_capacity(3);
        for prompt in ["Title: ", "Description: ", "People: "] {
            match editor.readline(prompt) {
                Ok(line) => fields.push(line),
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                    if !quiet {
                        println!("{} project(s) added.", store.len());
                    }
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
        }

        form.borrow_mut()
            .fill(fields[0].as_str(), fields[1].as_str(), fields[2].as_str());
        if let Err(rejection) = submit() {
            println!("{}", rejection);
        }
    }
}

fn cmd_validate(validatable: &Validatable, format: OutputFormat) -> anyhow::Result<()> {
    let violations = validatable.violations();
    let valid = violations.is_empty();

    match format {
        OutputFormat::Json => {
            let out = json!({ "valid": valid, "violations": violations });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!("{}", if valid { "valid" } else { "invalid" });
            for violation in &violations {
                println!("  - {}", violation);
            }
        }
    }

    if !valid {
        return Err(Error::InvalidInput(format!(
            "Invalid input! value failed {} constraint(s)",
            violations.len()
        ))
        .into());
    }
    Ok(())
}

fn cmd_config(action: ConfigAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key)?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            if !quiet {
                println!("Set {} = {}", key, value);
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let items = config.list()?;
            for (key, value) in items {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Reset => {
            Config::reset()?;
            if !quiet {
                println!("Configuration reset to defaults.");
            }
        }
        ConfigAction::Path => {
            let path = Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
