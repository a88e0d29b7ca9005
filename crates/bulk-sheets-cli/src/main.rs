//! Bulk Sheets CLI - streaming CSV to XLSX conversion

use anyhow::{bail, Context, Result};
use bulk_sheets::prelude::*;
use bulk_sheets::{plan_pages, InternerOptions, SheetPaginator, MAX_ROWS, MAX_SHEET_NAME_LEN};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "bulk")]
#[command(
    author,
    version,
    about = "Stream large tabular data into paginated XLSX workbooks"
)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a CSV file to XLSX
    Convert {
        /// Input CSV file
        input: PathBuf,

        /// Output XLSX file
        #[arg(short, long)]
        output: PathBuf,

        /// Sheet name (default: input file stem)
        #[arg(long)]
        sheet_name: Option<String>,

        /// Physical rows per sheet, header included
        #[arg(long, default_value_t = MAX_ROWS as usize)]
        max_rows: usize,

        /// Rows per fill/write cycle
        #[arg(long, default_value_t = bulk_sheets::DEFAULT_ROW_BLOCK_SIZE)]
        block_size: usize,

        /// Field delimiter
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// The input has no header row
        #[arg(long)]
        no_header: bool,

        /// Directory for the shared string temp files
        #[arg(long)]
        temp_dir: Option<PathBuf>,
    },

    /// Show how a row count would be split into sheets
    Plan {
        /// Number of data records
        #[arg(long)]
        rows: usize,

        /// Physical rows per sheet
        #[arg(long, default_value_t = MAX_ROWS as usize)]
        limit: usize,

        /// Each sheet starts with a header row
        #[arg(long)]
        header: bool,

        /// Sheet name used for the page names
        #[arg(long, default_value = "Sheet")]
        name: String,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert {
            input,
            output,
            sheet_name,
            max_rows,
            block_size,
            delimiter,
            no_header,
            temp_dir,
        } => {
            let options = ConvertOptions {
                sheet_name,
                max_rows,
                block_size,
                delimiter: delimiter_byte(delimiter)?,
                has_header: !no_header,
                temp_dir,
            };
            convert(&input, &output, &options)
        }
        Commands::Plan {
            rows,
            limit,
            header,
            name,
            json,
        } => {
            let plan = build_plan(&name, rows, limit, header)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                for page in &plan {
                    println!("{}\t{}..{}\t{} rows", page.name, page.start, page.end, page.rows);
                }
            }
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

struct ConvertOptions {
    sheet_name: Option<String>,
    max_rows: usize,
    block_size: usize,
    delimiter: u8,
    has_header: bool,
    temp_dir: Option<PathBuf>,
}

fn convert(input: &Path, output: &Path, options: &ConvertOptions) -> Result<()> {
    let mut workbook = Workbook::with_settings(WorkbookSettings {
        max_rows_per_sheet: options.max_rows,
        row_block_size: options.block_size.max(1),
        ..Default::default()
    });

    let name = match &options.sheet_name {
        Some(name) => name.clone(),
        None => default_sheet_name(input),
    };
    let csv_options = CsvReadOptions {
        delimiter: options.delimiter,
        has_header: options.has_header,
        ..Default::default()
    };
    workbook
        .add_csv_sheet(&name, input, &csv_options)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    let write_options = XlsxWriteOptions {
        interner: InternerOptions {
            temp_dir: options.temp_dir.clone(),
            ..Default::default()
        },
        ..Default::default()
    };
    let report = workbook
        .save_with(output, &write_options)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    info!(
        sheets = report.stats.sheets,
        rows = report.stats.rows,
        unique_strings = report.strings.unique_count,
        "conversion finished"
    );
    eprintln!(
        "Wrote {} records in {} sheet(s) to '{}'",
        report.stats.records,
        report.stats.sheets,
        output.display()
    );
    Ok(())
}

/// File stem cut to the sheet name limit, "Sheet1" when unusable
fn default_sheet_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.chars().take(MAX_SHEET_NAME_LEN).collect::<String>())
        .unwrap_or_default();
    let stem = stem.trim();
    if stem.is_empty() {
        "Sheet1".to_string()
    } else {
        stem.to_string()
    }
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
    }
    Ok(delimiter as u8)
}

/// One physical sheet of a pagination plan
#[derive(Debug, Serialize, PartialEq)]
struct PlannedPage {
    name: String,
    start: usize,
    end: usize,
    rows: usize,
}

fn build_plan(name: &str, rows: usize, limit: usize, header: bool) -> Result<Vec<PlannedPage>> {
    let header_rows = usize::from(header);
    let ranges = plan_pages(rows, header_rows, limit)?;

    let mut paginator = SheetPaginator::new(name);
    let plan = ranges
        .into_iter()
        .enumerate()
        .map(|(i, range)| {
            let end = range.end.unwrap_or(range.start);
            PlannedPage {
                name: if i == 0 {
                    name.to_string()
                } else {
                    paginator.next_name(|_| false)
                },
                start: range.start,
                end,
                rows: header_rows + (end - range.start),
            }
        })
        .collect();
    Ok(plan)
}
