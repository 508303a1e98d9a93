use anyhow::Context;
use clap::Parser;
use dynform::adapters::{FormSession, SchemaLoader, SubmitOutcome, TerminalRenderer};
use dynform::cli::Cli;
use dynform::config::Settings;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Exit status when the form was loaded but did not pass validation.
const EXIT_REJECTED: u8 = 2;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    // Logs go to stderr; stdout carries only the submitted values
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log.level)))
        .with_writer(io::stderr)
        .init();

    let schema_path = settings
        .schema
        .path
        .clone()
        .context("No schema given; pass --schema or set schema.path in the config file")?;

    let definition = SchemaLoader::new(settings.schema.format)
        .load(&schema_path)
        .with_context(|| format!("Failed to load form from {}", schema_path.display()))?;
    let mut session = FormSession::with_definition(definition);

    for (key, raw) in &cli.assignments {
        if !session.edit_key(*key, raw.as_str()) {
            warn!(field = %key, fields = session.definition().len(), "No field at this position, ignoring --set");
        }
    }

    let renderer = TerminalRenderer::new(settings.output.pretty);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut stderr = io::stderr();

    let mut pending = None;
    let outcome = loop {
        if settings.input.interactive {
            let keys: Option<&[_]> = pending.as_deref();
            if !renderer.prompt(&mut session, keys, &mut input, &mut stderr)? {
                info!("Input closed before the form was complete");
                break session.submit();
            }
        }

        match session.submit() {
            SubmitOutcome::Rejected { failed } if settings.input.interactive => {
                writeln!(stderr, "{} field(s) failed validation, please correct them", failed.len())?;
                pending = Some(failed);
            }
            outcome => break outcome,
        }
    };

    match outcome {
        SubmitOutcome::Submitted(snapshot) => {
            renderer.write_snapshot(&snapshot, &mut out)?;
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Rejected { .. } => {
            renderer.write_form(&session.render(), &mut stderr)?;
            Ok(ExitCode::from(EXIT_REJECTED))
        }
    }
}
