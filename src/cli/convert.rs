use anyhow::bail;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::models::LegacyDocument;
use crate::parser::parse_document;
use crate::{Context, Result};

const OUTPUT_SUFFIX: &str = ".parsed.json";

/// Convert one document, or every document in a folder, to canonical JSON.
///
/// A failing document in a folder run is reported and skipped; the rest of
/// the batch keeps going.
pub fn run(input: &Path, out_dir: Option<&Path>) -> Result<()> {
    if let Some(dir) = out_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }

    if input.is_dir() {
        return run_folder(input, out_dir);
    }

    let out_path = convert_file(input, out_dir)?;
    println!("{}", format!("✅ Wrote {}", out_path.display()).green());
    Ok(())
}

fn run_folder(dir: &Path, out_dir: Option<&Path>) -> Result<()> {
    let files: Vec<PathBuf> = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_input_document(path))
        .collect();

    if files.is_empty() {
        bail!("no .json documents found under {}", dir.display());
    }

    println!(
        "{}",
        format!("📄 Converting {} document(s) from {}", files.len(), dir.display()).cyan()
    );

    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{bar:30.cyan} {pos}/{len} {msg}")
            .unwrap(),
    );

    let mut failed = 0usize;
    for file in &files {
        bar.set_message(
            file.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
        if let Err(e) = convert_file(file, out_dir) {
            failed += 1;
            bar.suspend(|| {
                eprintln!("{}", format!("Failed on {}: {:#}", file.display(), e).red());
            });
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    let converted = files.len() - failed;
    println!("{}", format!("✅ Converted {} document(s)", converted).green());
    if failed > 0 {
        println!("{}", format!("⚠️  {} document(s) failed", failed).yellow());
    }
    Ok(())
}

fn is_input_document(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".json") && !name.ends_with(OUTPUT_SUFFIX)
}

fn convert_file(path: &Path, out_dir: Option<&Path>) -> Result<PathBuf> {
    let doc = LegacyDocument::from_json_file(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let parsed = parse_document(&doc)?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());
    let file_name = format!("{stem}{OUTPUT_SUFFIX}");
    let out_path = match out_dir {
        Some(dir) => dir.join(file_name),
        None => path.with_file_name(file_name),
    };

    let json = serde_json::to_string_pretty(&parsed)?;
    fs::write(&out_path, json)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_document_filter() {
        assert!(is_input_document(Path::new("doc.json")));
        assert!(!is_input_document(Path::new("doc.parsed.json")));
        assert!(!is_input_document(Path::new("doc.docx")));
    }
}
