use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use qrda_cli::output::{OutputFormat, apply_table_style, header_cell, log_rows, write_rows};
use qrda_core::{ShapeDescriptor, default_registry, process_documents};
use qrda_ingest::{IngestOptions, collect_input_files, load_documents};
use qrda_model::{EntryConsistency, ExtractOptions};

use crate::cli::{ExtractArgs, OutputFormatArg};
use crate::types::ExtractResult;

pub fn run_shapes() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Shape"),
        header_cell("Description"),
        header_cell("Patient"),
        header_cell("Observation"),
    ]);
    apply_table_style(&mut table);
    for descriptor in default_registry().descriptors() {
        let layout = descriptor.layout();
        table.add_row(vec![
            descriptor.shape().to_string(),
            descriptor.description().to_string(),
            format!("{} {}", layout.patient.scope(), layout.patient.path()),
            format!("{} {}", layout.observation.scope(), layout.observation.path()),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_extract(args: &ExtractArgs) -> Result<ExtractResult> {
    let span = info_span!("extract", input_count = args.inputs.len());
    let _guard = span.enter();
    let start = Instant::now();

    let ingest_options = IngestOptions::default().with_row_tag(args.row_tag.clone());
    let options = extract_options(args);

    // =========================================================================
    // Stage 1: Ingest - discover files and decode documents
    // =========================================================================
    let files = collect_input_files(&args.inputs).context("collect input files")?;
    if files.is_empty() {
        bail!("no XML files found in the given paths");
    }
    let mut documents = Vec::new();
    let mut ingest_errors = Vec::new();
    for path in &files {
        match load_documents(path, &ingest_options) {
            Ok(mut loaded) => documents.append(&mut loaded),
            Err(error) => {
                warn!(path = %path.display(), %error, "file skipped");
                ingest_errors.push(error.to_string());
            }
        }
    }
    info!(
        file_count = files.len(),
        document_count = documents.len(),
        "ingest complete"
    );

    // =========================================================================
    // Stage 2: Flatten - detect, extract, combine, format
    // =========================================================================
    let batch = process_documents(&documents, default_registry(), &options);
    log_rows(&batch);

    // =========================================================================
    // Stage 3: Output
    // =========================================================================
    let format = output_format(args.format);
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create output file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_rows(&batch, format, &mut writer)?;
            writer.flush().context("flush output file")?;
        }
        None => {
            let stdout = io::stdout();
            write_rows(&batch, format, stdout.lock())?;
        }
    }
    info!(
        row_count = batch.row_count(),
        failed = batch.failures.len(),
        duration_ms = start.elapsed().as_millis(),
        "extract complete"
    );

    Ok(ExtractResult {
        file_count: files.len(),
        document_count: documents.len(),
        batch,
        ingest_errors,
        output: args.output.clone(),
    })
}

fn extract_options(args: &ExtractArgs) -> ExtractOptions {
    let entry_consistency = if args.reject_inconsistent_entries {
        EntryConsistency::Reject
    } else {
        EntryConsistency::Tolerate
    };
    ExtractOptions::new()
        .with_shape(args.shape)
        .with_entry_consistency(entry_consistency)
}

fn output_format(format: OutputFormatArg) -> OutputFormat {
    match format {
        OutputFormatArg::Table => OutputFormat::Table,
        OutputFormatArg::Csv => OutputFormat::Csv,
        OutputFormatArg::Json => OutputFormat::Json,
    }
}
