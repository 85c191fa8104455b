//! Convert a raw WDBC-style export (`id,diagnosis,feature...` with M/B
//! diagnosis letters) into the breastcancer on-disk format the ingester
//! expects: `id,feature...,label` with labels 4 (malignant) and 2 (benign).
//!
//! Unknown diagnosis tokens pass through unchanged so the ingester's strict
//! label check can surface them.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "prepare_wdbc", about = "Rewrite a WDBC export into breastcancer format")]
struct Args {
    /// Raw WDBC data file.
    input: PathBuf,

    /// Converted output file.
    output: PathBuf,
}

fn convert_line(line: &str) -> Option<String> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() < 2 {
        return None;
    }
    let id = parts[0];
    let label = match parts[1] {
        "M" => "4",
        "B" => "2",
        other => other,
    };
    let mut out = String::from(id);
    for feature in &parts[2..] {
        out.push(',');
        out.push_str(feature);
    }
    out.push(',');
    out.push_str(label);
    Some(out)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let input = File::open(&args.input)
        .with_context(|| format!("cannot open {}", args.input.display()))?;
    let output = File::create(&args.output)
        .with_context(|| format!("cannot create {}", args.output.display()))?;
    let mut writer = BufWriter::new(output);

    let mut converted = 0usize;
    for line in BufReader::new(input).lines() {
        let line = line.context("reading input")?;
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            continue;
        }
        if let Some(out) = convert_line(trimmed) {
            writeln!(writer, "{out}").context("writing output")?;
            converted += 1;
        }
    }
    writer.flush().context("flushing output")?;

    println!(
        "Converted {converted} records from {} to {}",
        args.input.display(),
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_label_to_the_last_column() {
        let out = convert_line("842302,M,17.99,10.38").unwrap();
        assert_eq!(out, "842302,17.99,10.38,4");
        let out = convert_line("8510426,B,13.54,14.36").unwrap();
        assert_eq!(out, "8510426,13.54,14.36,2");
    }

    #[test]
    fn unknown_diagnosis_passes_through() {
        let out = convert_line("1,X,2.0").unwrap();
        assert_eq!(out, "1,2.0,X");
    }

    #[test]
    fn short_lines_are_dropped() {
        assert!(convert_line("842302").is_none());
    }

    #[test]
    fn missing_values_are_preserved() {
        let out = convert_line("99,M,1.0,?,3.0").unwrap();
        assert_eq!(out, "99,1.0,?,3.0,4");
    }
}
