use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;
use xlate_core::config::session::{SessionConfig, SettingValue};
use xlate_core::engine::session::{Session, SessionBuilder};
use xlate_core::expr::Expression;
use xlate_error::{OptionExt, Result, ResultExt, XlateError};
use xlate_ext_default::{DEFAULT_EXTENSIONS, DefaultSessionBuilderExt, find_extension};

#[derive(Parser)]
#[clap(name = "xlate")]
struct Arguments {
    /// Read expressions from JSON files.
    #[clap(short = 'f', long)]
    files: Vec<PathBuf>,
    /// Extensions to use. Defaults to all bundled extensions.
    #[clap(short = 'm', long = "module")]
    modules: Vec<String>,
    /// Session settings as `name=value`.
    #[clap(short = 's', long = "set")]
    settings: Vec<String>,
    /// Print available settings and exit.
    #[clap(long)]
    list_settings: bool,
    /// Print bundled extensions and exit.
    #[clap(long)]
    list_modules: bool,
    /// Emit logs as JSON.
    #[clap(long, env = "XLATE_JSON_LOGS")]
    json_logs: bool,
    /// Expressions as inline JSON.
    #[clap(trailing_var_arg = true)]
    exprs: Vec<String>,
}

/// Compiles JSON encoded host expressions and prints the resulting SQL.
fn main() {
    let args = Arguments::parse();
    let format = if args.json_logs {
        logutil::LogFormat::Json
    } else {
        logutil::LogFormat::HumanReadable
    };
    logutil::configure_global_logger(tracing::Level::WARN, format, io::stderr);

    if let Err(err) = inner(args) {
        println!("ERROR: {err}");
        std::process::exit(1);
    }
}

fn inner(args: Arguments) -> Result<()> {
    let mut stdout = BufWriter::new(io::stdout());

    if args.list_settings {
        for (name, description) in SessionConfig::describe_settings() {
            writeln!(stdout, "{name:<24} {description}")?;
        }
        stdout.flush()?;
        return Ok(());
    }

    if args.list_modules {
        for ext in DEFAULT_EXTENSIONS {
            writeln!(stdout, "{}", ext.name())?;
        }
        stdout.flush()?;
        return Ok(());
    }

    let session = build_session(&args)?;

    let mut sources = Vec::new();
    for path in &args.files {
        let content = std::fs::read_to_string(path)
            .context_fn(|| format!("Failed to read '{}'", path.display()))?;
        sources.push(content);
    }
    sources.extend(args.exprs.iter().cloned());

    for source in sources {
        let expr: Expression =
            serde_json::from_str(&source).context("Failed to parse expression JSON")?;
        debug!(%expr, "compiling expression");

        let compiled = session.compile(expr)?;
        writeln!(stdout, "{}", compiled.sql)?;
        for name in &compiled.untranslated {
            writeln!(stdout, "-- untranslated: {name}")?;
        }
    }
    stdout.flush()?;

    Ok(())
}

fn build_session(args: &Arguments) -> Result<Session> {
    let mut builder = if args.modules.is_empty() {
        SessionBuilder::new().use_all()
    } else {
        let mut builder = SessionBuilder::new();
        for name in &args.modules {
            let ext = find_extension(name).ok_or_else(|| {
                XlateError::configuration(format!("Unknown extension '{name}'"))
                    .with_field("module", name)
            })?;
            builder = builder.with_extension(ext);
        }
        builder
    };

    for setting in &args.settings {
        let (name, value) = setting.split_once('=').required("'=' in setting")?;
        builder = builder.with_setting(name.trim(), SettingValue::parse(value.trim()))?;
    }

    builder.build()
}
