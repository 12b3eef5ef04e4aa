//! Import pipeline stages.
//!
//! `read → prepare → emit`, where emit is one of preview, file append, or a
//! single live transaction. Each stage is a plain function so the binary and
//! the integration tests drive the exact same code.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{Instrument, info, info_span, trace, warn};

use catalog_ingest::{CsvTable, read_csv_table};
use catalog_map::map_records;
use catalog_model::{CanonicalRow, RunConfig, RunMode};
use catalog_sql::{
    BatchSink, MAX_PARAMETERIZED_BATCH, SqlFileWriter, batch_count, batches, literal_insert,
    parameterized_insert,
};
use catalog_transform::{CoercedRows, CoercionWarning, coerce_records};

use crate::logging::redact_value;
use crate::state::{RunState, RunTracker, TxState};

/// Rows shown per batch in preview mode.
pub const PREVIEW_ROW_LIMIT: usize = 20;

/// Outcome of a finished run.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub mode: RunMode,
    pub input_path: PathBuf,
    pub rows_read: usize,
    pub rows_written: usize,
    pub batches: usize,
    pub warnings: Vec<CoercionWarning>,
    /// Set in file-emit mode.
    pub output_path: Option<PathBuf>,
    pub final_state: RunState,
}

// =============================================================================
// Stage 1: Read
// =============================================================================

/// Drains the whole input file into memory.
pub fn read(config: &RunConfig) -> Result<CsvTable> {
    let path = &config.input_path;
    let table = read_csv_table(path, config.encoding)
        .with_context(|| format!("read {}", path.display()))?;
    Ok(table)
}

// =============================================================================
// Stage 2: Prepare (map + coerce)
// =============================================================================

/// Maps headers to fields and coerces every record.
pub fn prepare(table: &CsvTable, config: &RunConfig) -> Result<CoercedRows> {
    let mapped = map_records(&table.records, &config.field_map);
    let coerced = coerce_records(&mapped, config).context("coerce rows")?;
    for row in &coerced.rows {
        trace!(
            id = %row.id,
            code = redact_value(row.code.as_deref().unwrap_or_default()),
            description = redact_value(row.description.as_deref().unwrap_or_default()),
            "row prepared"
        );
    }
    Ok(coerced)
}

// =============================================================================
// Stage 3: Emit
// =============================================================================

/// Prints a notice and a sample of every batch without writing anything.
pub fn preview(rows: &[CanonicalRow], config: &RunConfig, out: &mut dyn Write) -> Result<()> {
    let total = batch_count(rows.len(), config.batch_size);
    for batch in batches(rows, config.batch_size) {
        let shown = batch.len().min(PREVIEW_ROW_LIMIT);
        writeln!(
            out,
            "Test mode: batch {}/{} ({} rows) was not written. First {} rows:",
            batch.index + 1,
            total,
            batch.len(),
            shown
        )?;
        let sample = serde_json::to_string_pretty(&batch.rows[..shown])
            .context("serialize preview rows")?;
        writeln!(out, "{sample}")?;
        info!(batch = batch.index + 1, total, rows = batch.len(), "batch previewed");
    }
    Ok(())
}

/// Appends one literal INSERT per batch to the output file.
///
/// Returns the number of rows written. A failure part way leaves earlier
/// batches in the file.
pub fn emit_to_file(
    rows: &[CanonicalRow],
    config: &RunConfig,
    out: &mut dyn Write,
) -> Result<usize> {
    let mut writer = SqlFileWriter::open(&config.output_path)
        .with_context(|| format!("open {}", config.output_path.display()))?;
    let total = batch_count(rows.len(), config.batch_size);
    let mut written = 0;
    for batch in batches(rows, config.batch_size) {
        let sql = literal_insert(&batch, &config.table)
            .with_context(|| format!("render batch {}", batch.index + 1))?;
        writer.append(&sql)?;
        written += batch.len();
        info!(batch = batch.index + 1, total, rows = batch.len(), "batch appended");
        writeln!(
            out,
            "Batch {}/{}: {} rows appended to {}",
            batch.index + 1,
            total,
            batch.len(),
            writer.path().display()
        )?;
    }
    Ok(written)
}

/// Inserts every batch inside one transaction and commits once.
///
/// Any failure after `begin` rolls the transaction back; a rollback failure
/// is logged and the original error returned.
pub async fn insert_batches(
    rows: &[CanonicalRow],
    config: &RunConfig,
    sink: &mut dyn BatchSink,
    out: &mut dyn Write,
    tracker: &mut RunTracker,
) -> Result<usize> {
    let largest = config.batch_size.min(rows.len());
    if largest > MAX_PARAMETERIZED_BATCH {
        bail!(
            "batch size {} exceeds the {MAX_PARAMETERIZED_BATCH} rows one parameterized INSERT can carry",
            config.batch_size
        );
    }

    sink.begin().await.context("begin transaction")?;
    tracker.advance(RunState::Transacting(TxState::Begun));

    match insert_all(rows, config, sink, out, tracker).await {
        Ok(inserted) => {
            sink.commit().await.context("commit transaction")?;
            tracker.advance(RunState::Transacting(TxState::Committed));
            writeln!(out, "Committed {inserted} rows")?;
            Ok(inserted)
        }
        Err(error) => {
            if let Err(rollback_error) = sink.rollback().await {
                warn!(error = %rollback_error, "rollback failed");
            }
            tracker.advance(RunState::Transacting(TxState::RolledBack));
            Err(error)
        }
    }
}

async fn insert_all(
    rows: &[CanonicalRow],
    config: &RunConfig,
    sink: &mut dyn BatchSink,
    out: &mut dyn Write,
    tracker: &mut RunTracker,
) -> Result<usize> {
    let total = batch_count(rows.len(), config.batch_size);
    let mut inserted = 0usize;
    for batch in batches(rows, config.batch_size) {
        let number = batch.index + 1;
        let statement = parameterized_insert(&batch, &config.table)
            .with_context(|| format!("build batch {number}"))?;
        let affected = sink
            .insert(&statement)
            .await
            .with_context(|| format!("insert batch {number}/{total}"))?;
        tracker.advance(RunState::Transacting(TxState::Inserting(number)));
        inserted += usize::try_from(affected).unwrap_or(batch.len());
        info!(batch = number, total, rows = batch.len(), "batch inserted");
        writeln!(out, "Batch {number}/{total}: {} rows inserted", batch.len())?;
    }
    Ok(inserted)
}

// =============================================================================
// Driver
// =============================================================================

/// Awaits the live connection, failing `tracker` when it cannot be made.
pub async fn open_sink<S, E>(
    connect: impl Future<Output = std::result::Result<S, E>>,
    tracker: &mut RunTracker,
) -> Result<S>
where
    E: std::error::Error + Send + Sync + 'static,
{
    match connect.await {
        Ok(sink) => Ok(sink),
        Err(error) => {
            tracker.fail();
            Err(anyhow::Error::new(error).context("connect to database"))
        }
    }
}

/// Runs every stage for `config`.
///
/// `sink` is required in live mode and ignored otherwise. On error the
/// tracker ends in [`RunState::Failed`].
pub async fn run_import(
    config: &RunConfig,
    sink: Option<&mut dyn BatchSink>,
    out: &mut dyn Write,
    tracker: &mut RunTracker,
) -> Result<ImportReport> {
    let span = info_span!(
        "import",
        mode = %config.mode,
        input = %config.input_path.display()
    );
    let result = run_stages(config, sink, out, tracker)
        .instrument(span)
        .await;
    if result.is_err() {
        tracker.fail();
    }
    result
}

async fn run_stages(
    config: &RunConfig,
    sink: Option<&mut dyn BatchSink>,
    out: &mut dyn Write,
    tracker: &mut RunTracker,
) -> Result<ImportReport> {
    config.validate().context("invalid run configuration")?;
    tracker.advance(RunState::Reading);

    let read_span = info_span!("read", path = %config.input_path.display());
    let read_start = Instant::now();
    let table = read_span.in_scope(|| read(config))?;
    info!(
        rows = table.len(),
        columns = table.headers.len(),
        duration_ms = read_start.elapsed().as_millis(),
        "read complete"
    );
    writeln!(
        out,
        "Read {} rows from {}",
        table.len(),
        config.input_path.display()
    )?;

    let prepare_start = Instant::now();
    let prepared = info_span!("prepare").in_scope(|| prepare(&table, config))?;
    info!(
        rows = prepared.rows.len(),
        warnings = prepared.warnings.len(),
        duration_ms = prepare_start.elapsed().as_millis(),
        "prepare complete"
    );

    let total = batch_count(prepared.rows.len(), config.batch_size);
    let emit_span = info_span!("emit", mode = %config.mode, batches = total);
    let emit_start = Instant::now();
    let (rows_written, output_path) = match config.mode {
        RunMode::Preview => {
            tracker.advance(RunState::Previewing);
            emit_span.in_scope(|| preview(&prepared.rows, config, out))?;
            (0, None)
        }
        RunMode::FileEmit => {
            tracker.advance(RunState::FileEmitting);
            let written = emit_span.in_scope(|| emit_to_file(&prepared.rows, config, out))?;
            (written, Some(config.output_path.clone()))
        }
        RunMode::Live => {
            let sink = sink.ok_or_else(|| anyhow!("live mode requires a database connection"))?;
            let written = insert_batches(&prepared.rows, config, sink, out, tracker)
                .instrument(emit_span)
                .await?;
            (written, None)
        }
    };
    info!(
        rows_written,
        duration_ms = emit_start.elapsed().as_millis(),
        "emit complete"
    );

    tracker.advance(RunState::Done);
    Ok(ImportReport {
        mode: config.mode,
        input_path: config.input_path.clone(),
        rows_read: table.len(),
        rows_written,
        batches: total,
        warnings: prepared.warnings,
        output_path,
        final_state: tracker.current(),
    })
}
