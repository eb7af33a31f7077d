use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use html_escape::encode_text;

use crate::app_config::Config;
use crate::citation::{self, CitationStats, CleaningResult, HighlightStyle};
use crate::clipboard::ClipboardSink;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::html_formatter;

// @module: Application controller for citation cleaning

/// Result of cleaning one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Cleaned text was written to `output_path`
    Cleaned { output_path: PathBuf, stats: CitationStats },
    /// Output already existed and overwriting was not forced
    Skipped { output_path: PathBuf },
}

impl FileOutcome {
    /// Cleaned file, whether written now or by an earlier run
    pub fn output_path(&self) -> &Path {
        match self {
            Self::Cleaned { output_path, .. } | Self::Skipped { output_path } => output_path,
        }
    }
}

/// Totals for a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    /// Citations removed across all processed files
    pub stats: CitationStats,
}

/// Main application controller for citation cleaning
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()
            .map_err(|e| AppError::Config(format!("{:#}", e)))
            .context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn highlight_style(&self) -> HighlightStyle {
        self.config.highlight_style()
    }

    /// Clean pasted text; empty or whitespace-only input is rejected
    pub fn clean_text(&self, text: &str) -> Result<CleaningResult, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::EmptyInput);
        }

        let result = citation::clean_document(text);
        debug!("Cleaned pasted text: {}", result.stats);
        Ok(result)
    }

    /// Read an HTML file and clean it in memory
    pub fn read_and_clean(&self, input_file: &Path) -> Result<CleaningResult> {
        Self::ensure_html(input_file)?;
        let content = FileManager::read_to_string(input_file)?;
        Ok(citation::clean_document(&content))
    }

    /// Read and count the citations in an HTML file without modifying it
    pub fn count_file(&self, input_file: &Path) -> Result<CitationStats> {
        Self::ensure_html(input_file)?;
        let content = FileManager::read_to_string(input_file)?;
        Ok(citation::count(&content))
    }

    /// Directory cleaned files go to when none is given explicitly
    pub fn default_output_dir(&self, input_file: &Path) -> PathBuf {
        match &self.config.output.output_dir {
            Some(dir) => dir.clone(),
            None => input_file.parent().unwrap_or(Path::new(".")).to_path_buf(),
        }
    }

    /// Output directory for a file found under `input_dir`.
    ///
    /// With a configured output directory the file's subdirectory below
    /// `input_dir` is kept, so equal names in different folders stay apart.
    pub fn folder_output_dir(&self, input_dir: &Path, input_file: &Path) -> PathBuf {
        let parent = input_file.parent().unwrap_or(Path::new("."));
        match &self.config.output.output_dir {
            Some(dir) => match parent.strip_prefix(input_dir) {
                Ok(relative) => dir.join(relative),
                Err(_) => dir.clone(),
            },
            None => parent.to_path_buf(),
        }
    }

    /// Clean one HTML file into `<output_dir>/<stem><suffix>.html`
    pub fn clean_file(&self, input_file: &Path, output_dir: &Path, force_overwrite: bool) -> Result<FileOutcome> {
        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }
        Self::ensure_html(input_file)?;

        let output_path = FileManager::cleaned_output_path(input_file, output_dir, &self.config.output.suffix);
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, cleaned file already exists (use -f to force overwrite)", input_file);
            return Ok(FileOutcome::Skipped { output_path });
        }

        let result = self.read_and_clean(input_file)?;
        FileManager::write_to_file(&output_path, &result.cleaned)?;

        if result.stats.is_empty() {
            info!("No citations found in {}, copied as-is", input_file.display());
        } else {
            info!("Removed {} from {}", result.stats, input_file.display());
        }
        info!("Success: {}", output_path.display());

        Ok(FileOutcome::Cleaned { output_path, stats: result.stats })
    }

    /// Clean every HTML file below `input_dir`, writing each next to its source
    /// (or into the configured output directory)
    pub fn clean_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !input_dir.exists() {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let html_files = FileManager::find_html_files(input_dir, &self.config.output.suffix)?;
        if html_files.is_empty() {
            return Err(anyhow::anyhow!("No HTML files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(html_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("#>-"));

        let mut summary = FolderSummary::default();

        for html_file in &html_files {
            let file_name = html_file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = self.folder_output_dir(input_dir, html_file);
            match self.clean_file(html_file, &output_dir, force_overwrite) {
                Ok(FileOutcome::Cleaned { stats, .. }) => {
                    summary.processed += 1;
                    summary.stats += stats;
                }
                Ok(FileOutcome::Skipped { .. }) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    summary.errors += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_and_clear();

        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors ({} removed) in {}",
            summary.processed,
            summary.skipped,
            summary.errors,
            summary.stats,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    /// Put cleaned text on the clipboard
    pub fn copy_to_clipboard(&self, clipboard: &dyn ClipboardSink, text: &str) -> Result<(), AppError> {
        clipboard.copy_text(text)?;
        info!("Cleaned text copied to clipboard");
        Ok(())
    }

    /// Put the cleaned file behind `outcome` on the clipboard without cleaning again
    pub fn copy_output(&self, clipboard: &dyn ClipboardSink, outcome: &FileOutcome) -> Result<()> {
        let content = FileManager::read_to_string(outcome.output_path())?;
        self.copy_to_clipboard(clipboard, &content)?;
        Ok(())
    }

    /// Build a standalone before/after report page for `original`
    pub fn render_preview(&self, title: &str, original: &str) -> (String, CleaningResult) {
        let result = citation::clean_document(original);
        let style = self.highlight_style();
        let indent_width = self.config.preview.indent_width;

        let before = citation::annotate_escaped(&html_formatter::reindent(original, indent_width), &style);
        let after = encode_text(&html_formatter::reindent(&result.cleaned, indent_width)).into_owned();

        let page = format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Citation preview - {title}</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
pre {{ background: #f6f8fa; padding: 1rem; overflow-x: auto; white-space: pre-wrap; }}
.{class} {{ background: #ffe08a; color: #8a2b06; border-radius: 3px; }}
.columns {{ display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }}
</style>
</head>
<body>
<h1>{title}</h1>
<table>
<tr><th>Total citations</th><td>{total}</td></tr>
<tr><th>Numbered citations</th><td>{numbered}</td></tr>
<tr><th>Start markers</th><td>{start}</td></tr>
</table>
<div class="columns">
<section><h2>Before</h2><pre>{before}</pre></section>
<section><h2>After</h2><pre>{after}</pre></section>
</div>
</body>
</html>
"#,
            title = encode_text(title),
            class = style.class_name,
            total = result.stats.total,
            numbered = result.stats.numbered,
            start = result.stats.start,
            before = before,
            after = after,
        );

        (page, result)
    }

    /// Write the before/after report for an HTML file to `report_path`
    pub fn write_preview(&self, input_file: &Path, report_path: &Path) -> Result<CleaningResult> {
        Self::ensure_html(input_file)?;
        let content = FileManager::read_to_string(input_file)?;
        let title = input_file.file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string());

        let (page, result) = self.render_preview(&title, &content);
        FileManager::write_to_file(report_path, &page)?;
        info!("Preview written to {}", report_path.display());

        Ok(result)
    }

    fn ensure_html(input_file: &Path) -> Result<(), AppError> {
        if FileManager::is_html_file(input_file) {
            Ok(())
        } else {
            Err(AppError::InvalidExtension(input_file.display().to_string()))
        }
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
