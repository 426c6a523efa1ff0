use std::path::PathBuf;

use anyhow::Context;
use colored::Colorize;
use mound_store::{Mound, RecordDocument, RecordId, StoreConfig};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Demo(args) => {
            let mound = open_store(cli.root)?;
            let doc = run_demo(&mound, &args).await?;
            print_document(&mound, &doc, &format)
        }
        Command::Show(args) => {
            let mound = open_store(cli.root)?;
            let id: RecordId = args.id.parse()?;
            let doc = mound
                .load(&id)
                .await
                .with_context(|| format!("reading record {id}"))?;
            print_document(&mound, &doc, &format)
        }
        Command::Semver(args) => {
            println!("{}", mound_types::semver(args.major, args.minor, args.patch));
            Ok(())
        }
    }
}

fn open_store(root: Option<PathBuf>) -> anyhow::Result<Mound> {
    let config = match root {
        Some(root) => StoreConfig::new(root)?,
        None => StoreConfig::unconfigured(),
    };
    Mound::new(&config).context("pass --root or set MOUND_DATA_DIR")
}

/// Write the sample record and return its stored document.
async fn run_demo(mound: &Mound, args: &DemoArgs) -> anyhow::Result<RecordDocument> {
    let record = mound.create(&args.program, &args.version)?;
    record.await_ready().await?;

    for source in &args.link {
        record.link(source).await?;
    }

    let greeting = record.create_stream(None).await?;
    greeting.append_line("Hello, mound!").await?;
    greeting.append_line("Hello, mound!").await?;

    let test = record.create_stream(Some("test")).await?;
    test.append_line("This is a test").await?;

    record.finalize(args.status).await?;
    tracing::info!(did = %record.id(), "demo record written");

    Ok(mound.load(&record.id()).await?)
}

fn print_document(mound: &Mound, doc: &RecordDocument, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(doc)?);
        }
        OutputFormat::Text => {
            let status = if doc.status.is_success() {
                doc.status.to_string().green()
            } else if doc.status.is_finished() {
                doc.status.to_string().red()
            } else {
                doc.status.to_string().yellow()
            };
            println!("{} {}", "Record".bold(), doc.did.to_string().cyan());
            println!("  Program: {} {}", doc.program, doc.version.dimmed());
            println!("  Status: {status}");
            println!("  Path: {}", mound.record_dir(&doc.did).display());
            for (slot, blob) in doc.blobs.iter().enumerate() {
                println!("  Blob {}: {}", slot.to_string().yellow(), blob);
            }
            for source in &doc.sources {
                println!("  Source: {}", source.blue());
            }
        }
    }
    Ok(())
}
