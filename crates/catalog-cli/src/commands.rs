use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::debug;

use catalog_cli::pipeline::{self, ImportReport};
use catalog_cli::state::{RunTracker, TxState};
use catalog_model::{DecimalSeparator, FieldMap, InputEncoding, NumericPolicy, RunConfig, RunMode};
use catalog_sql::{BatchSink, PostgresSink};

use crate::cli::{DecimalArg, EncodingArg, FieldsArgs, ImportArgs};
use crate::summary::{apply_table_style, header_cell, kind_label};

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let field_map = load_field_map(args.field_map.as_deref())?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("CSV header"),
        header_cell("Field"),
        header_cell("Type"),
    ]);
    apply_table_style(&mut table);
    for (header, field) in field_map.iter() {
        table.add_row(vec![
            header.to_string(),
            field.to_string(),
            kind_label(field.column().kind()).to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_import(args: &ImportArgs) -> Result<ImportReport> {
    let config = build_run_config(args)?;
    debug!(
        mode = %config.mode,
        batch_size = config.batch_size,
        table = %config.table,
        "run configuration"
    );

    let database_url = match config.mode {
        RunMode::Live => Some(
            std::env::var("DATABASE_URL")
                .context("DATABASE_URL must be set unless --dry-run or --emit-sql is given")?,
        ),
        RunMode::Preview | RunMode::FileEmit => None,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;

    let mut tracker = RunTracker::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = runtime.block_on(async {
        let mut sink = match &database_url {
            Some(url) => {
                Some(pipeline::open_sink(PostgresSink::connect(url), &mut tracker).await?)
            }
            None => None,
        };
        let result = pipeline::run_import(
            &config,
            sink.as_mut().map(|sink| sink as &mut dyn BatchSink),
            &mut out,
            &mut tracker,
        )
        .await;
        if let Some(sink) = sink {
            sink.close().await;
        }
        result
    });

    match result {
        Ok(report) => Ok(report),
        Err(error) if tracker.transaction() == Some(TxState::RolledBack) => {
            Err(error.context("transaction rolled back, no rows were written"))
        }
        Err(error) => Err(error),
    }
}

fn build_run_config(args: &ImportArgs) -> Result<RunConfig> {
    let merchant_id = match &args.merchant_id {
        Some(id) => id.clone(),
        None => std::env::var("MERCHANT_ID")
            .context("no merchant: pass --merchant-id or set MERCHANT_ID")?,
    };
    let field_map = load_field_map(args.field_map.as_deref())?;
    let mode = RunMode::from_flags(args.dry_run, args.emit_sql);
    let numeric_policy = if args.strict_numbers {
        NumericPolicy::Strict
    } else {
        NumericPolicy::Lenient
    };

    let config = RunConfig::new(mode, args.csv.clone(), merchant_id)
        .with_output_path(args.output.clone())
        .with_field_map(field_map)
        .with_batch_size(args.batch_size)
        .with_table(args.table.clone())
        .with_decimal_separator(decimal_separator(args.decimal))
        .with_numeric_policy(numeric_policy)
        .with_encoding(input_encoding(args.encoding));
    config.validate().context("invalid import options")?;
    Ok(config)
}

fn load_field_map(path: Option<&Path>) -> Result<FieldMap> {
    let Some(path) = path else {
        return Ok(FieldMap::default());
    };
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    FieldMap::from_json(&text).with_context(|| format!("parse field map {}", path.display()))
}

fn decimal_separator(arg: DecimalArg) -> DecimalSeparator {
    match arg {
        DecimalArg::Auto => DecimalSeparator::Auto,
        DecimalArg::Comma => DecimalSeparator::Comma,
        DecimalArg::Period => DecimalSeparator::Period,
    }
}

fn input_encoding(arg: EncodingArg) -> InputEncoding {
    match arg {
        EncodingArg::Utf8 => InputEncoding::Utf8,
        EncodingArg::Windows1252 => InputEncoding::Windows1252,
    }
}
