// Copyright 2025 Windowkit Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Windowkit CLI - evaluate window functions over a JSON table
//!

use std::io::{self, Read};
use std::time::Instant;

use clap::Parser;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use windowkit::api::{table_from_json, value_to_json, write_table_file};
use windowkit::{global_registry, ExecutorConfig, Value, WindowQuery};

/// Version string constant
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION_MAJOR"),
    ".",
    env!("CARGO_PKG_VERSION_MINOR"),
    ".",
    env!("CARGO_PKG_VERSION_PATCH")
);

/// Windowkit CLI
#[derive(Parser, Debug)]
#[command(name = "windowkit")]
#[command(author = "Windowkit Contributors")]
#[command(version = VERSION)]
#[command(about = "Evaluate SQL window functions over a JSON table")]
#[command(
    long_about = "Reads a table as JSON, evaluates one or more SQL window calls over it and\n\
prints the input columns followed by one column per call.\n\n\
TABLE FORMAT:\n\
  {\"columns\": [\"grp\", {\"name\": \"v\", \"type\": \"INTEGER\"}], \
\"rows\": [[\"A\", 1], ...]}\n\n\
EXAMPLES:\n\
  windowkit -i sales.json -w \"RANK() OVER (PARTITION BY region ORDER BY amount DESC) AS r\"\n\
  windowkit -i sales.json -w \"LAG(amount, 1, 0) OVER (ORDER BY day)\" --json\n\
  cat sales.json | windowkit -w \"ROW_NUMBER() OVER (ORDER BY day) AS rn\"\n\n\
Set RUST_LOG=debug to trace evaluation."
)]
struct Args {
    /// JSON table to read (stdin when omitted)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: Option<String>,

    /// Window call, e.g. "RANK() OVER (ORDER BY v) AS r" (repeatable)
    #[arg(short = 'w', long = "window", value_name = "SQL")]
    windows: Vec<String>,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", default_value = "false")]
    json_output: bool,

    /// Write the result table to a JSON file instead of printing it
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<String>,

    /// Maximum number of rows to display (0 for unlimited)
    #[arg(short = 'l', long = "limit", default_value = "40")]
    limit: usize,

    /// Evaluate partitions on the current thread only
    #[arg(long = "sequential", default_value = "false")]
    sequential: bool,

    /// List the available window functions and exit
    #[arg(long = "list-functions", default_value = "false")]
    list_functions: bool,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if args.list_functions {
        print_functions();
        return;
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), String> {
    if args.windows.is_empty() {
        return Err("no window calls given, use -w \"FUNC() OVER (...)\"".to_string());
    }

    let text = match &args.input {
        Some(path) => {
            std::fs::read_to_string(path).map_err(|e| format!("reading {}: {}", path, e))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| e.to_string())?;
            buf
        }
    };
    let document: serde_json::Value = serde_json::from_str(&text).map_err(|e| e.to_string())?;
    let table = table_from_json(&document).map_err(|e| e.to_string())?;

    let config = if args.sequential {
        ExecutorConfig::sequential()
    } else {
        ExecutorConfig::default()
    };

    let mut query = WindowQuery::new(&table).with_config(config);
    for sql in &args.windows {
        query = query.window_sql(sql).map_err(|e| e.to_string())?;
    }

    let start = Instant::now();
    let result = query.execute().map_err(|e| e.to_string())?;
    debug!(
        rows = result.len(),
        windows = query.specs().len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "window query finished"
    );

    if let Some(path) = &args.output {
        return write_table_file(path, &result).map_err(|e| e.to_string());
    }

    let columns: Vec<String> = result
        .schema()
        .columns()
        .iter()
        .map(|c| c.name.clone())
        .collect();
    let rows: Vec<&[Value]> = result.rows().iter().map(|r| r.as_slice()).collect();

    if args.json_output {
        output_json(&columns, &rows)
    } else {
        output_table(&columns, &rows, args.limit);
        Ok(())
    }
}

fn print_functions() {
    let registry = global_registry();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Function", "Arguments", "ORDER BY", "Description"]);

    for name in registry.list_windows() {
        if let Some(info) = registry.get_info(&name) {
            let signature = info.signature();
            let arguments = if signature.min_args == signature.max_args {
                signature.min_args.to_string()
            } else {
                format!("{}-{}", signature.min_args, signature.max_args)
            };
            let ordered = if info.requires_order_by {
                "required"
            } else {
                "optional"
            };
            table.add_row(vec![
                Cell::new(info.name()),
                Cell::new(arguments),
                Cell::new(ordered),
                Cell::new(info.description()),
            ]);
        }
    }

    println!("{table}");
}

fn output_json(columns: &[String], rows: &[&[Value]]) -> Result<(), String> {
    let json_rows: Vec<Vec<serde_json::Value>> = rows
        .iter()
        .map(|row| row.iter().map(value_to_json).collect())
        .collect();

    let result = serde_json::json!({
        "columns": columns,
        "rows": json_rows,
        "count": rows.len()
    });

    println!(
        "{}",
        serde_json::to_string(&result).map_err(|e| e.to_string())?
    );
    Ok(())
}

fn output_table(columns: &[String], rows: &[&[Value]], limit: usize) {
    let row_count = rows.len();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(columns.iter().map(Cell::new));

    // Keep the head and tail, elide the middle
    if limit > 0 && row_count > limit {
        let top_rows = limit / 2;
        let bottom_rows = limit - top_rows;

        for row in rows.iter().take(top_rows) {
            table.add_row(row.iter().map(|v| Cell::new(format_value(v))));
        }

        let hidden_rows = row_count - limit;
        let message = format!("... ({} more rows) ...", hidden_rows);
        let truncation_row: Vec<Cell> = (0..columns.len())
            .map(|i| {
                if i == columns.len() / 2 {
                    Cell::new(&message)
                } else {
                    Cell::new("")
                }
            })
            .collect();
        table.add_row(truncation_row);

        let start_idx = row_count.saturating_sub(bottom_rows).max(top_rows);
        for row in rows.iter().skip(start_idx) {
            table.add_row(row.iter().map(|v| Cell::new(format_value(v))));
        }
    } else {
        for row in rows {
            table.add_row(row.iter().map(|v| Cell::new(format_value(v))));
        }
    }

    println!("{table}");

    let row_text = if row_count == 1 { "row" } else { "rows" };
    if limit > 0 && row_count > limit {
        println!(
            "\x1b[1;32m{} {} (showing {})\x1b[0m",
            row_count, row_text, limit
        );
    } else {
        println!("\x1b[1;32m{} {}\x1b[0m", row_count, row_text);
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Float(f) if f.is_finite() && *f != f.trunc() => format!("{:.4}", f)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string(),
        Value::Float(f) if f.is_finite() => format!("{:.1}", f),
        other => other.to_string(),
    }
}
