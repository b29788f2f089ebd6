use crate::generator::{Generator, BATCH_ORDER};
use crate::profile::{CountOverrides, RowCounts, Scale};
use crate::writer::{ScriptWriter, TableCount};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Serialize)]
struct GenerateJsonOutput {
    seed: u64,
    scale: String,
    output_file: Option<String>,
    statistics: GenerateStatistics,
    tables: Vec<TableCount>,
}

#[derive(Serialize)]
struct GenerateStatistics {
    total_rows: usize,
    skipped_rows: usize,
    elapsed_secs: f64,
}

pub fn run(
    output: Option<PathBuf>,
    seed: u64,
    scale: String,
    counts: Option<PathBuf>,
    progress: bool,
    json: bool,
) -> anyhow::Result<()> {
    let scale: Scale = scale.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let mut row_counts = RowCounts::for_scale(scale);
    if let Some(ref path) = counts {
        let overrides = CountOverrides::load(path)?;
        row_counts.apply(&overrides);
    }

    let mut writer = if let Some(ref out_path) = output {
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        ScriptWriter::to_file(out_path)?
    } else {
        ScriptWriter::new(Box::new(io::stdout().lock()))
    };

    writer.write_comment(&format!(
        "Generated by sql-seeder (seed {}, scale {})",
        seed, scale
    ))?;
    writer.write_blank()?;

    // The bar draws to stderr, so it is safe alongside stdout output.
    let pb = if progress && !json {
        let pb = ProgressBar::new(BATCH_ORDER.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap()
            .progress_chars("█▓▒░  ")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        Some(pb)
    } else {
        None
    };

    let start_time = Instant::now();
    let mut generator = Generator::new(seed, row_counts);
    generator.run(&mut writer, |table| {
        if let Some(ref pb) = pb {
            pb.set_message(table);
            pb.inc(1);
        }
    })?;
    let stats = writer.finish()?;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let elapsed = start_time.elapsed();

    if json {
        let output_json = GenerateJsonOutput {
            seed,
            scale: scale.to_string(),
            output_file: output.as_ref().map(|p| p.display().to_string()),
            statistics: GenerateStatistics {
                total_rows: stats.total_rows(),
                skipped_rows: stats.skipped_rows,
                elapsed_secs: elapsed.as_secs_f64(),
            },
            tables: stats.tables.clone(),
        };
        // Only print JSON to stdout if the script itself went to a file;
        // otherwise it would be mixed with the SQL output.
        if output.is_some() {
            println!("{}", serde_json::to_string_pretty(&output_json)?);
        } else {
            eprintln!("{}", serde_json::to_string_pretty(&output_json)?);
        }
    } else if output.is_some() {
        println!("✓ Generation completed successfully!");
        println!("\nStatistics:");
        println!("  Total rows: {}", stats.total_rows());
        if stats.skipped_rows > 0 {
            println!("  Skipped rows: {}", stats.skipped_rows);
        }
        println!("  Elapsed: {:.2}s", elapsed.as_secs_f64());
        println!("\nRows per table:");
        for table in &stats.tables {
            println!("  {}: {}", table.table, table.rows);
        }
    } else {
        eprintln!(
            "Generated {} rows across {} tables",
            stats.total_rows(),
            stats.tables.len()
        );
    }

    Ok(())
}
