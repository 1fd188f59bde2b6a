//! Progress reporting for scans

use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::time::Duration;

/// Totals of a finished scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Files matched against a book
    pub scanned: usize,
    /// Files skipped without matching
    pub skipped: usize,
    /// Match rows produced
    pub matches: usize,
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} matches in {} files", self.matches, self.scanned)?;
        if self.skipped > 0 {
            write!(f, " ({} skipped)", self.skipped)?;
        }
        Ok(())
    }
}

/// Per-file progress of a scan with running match totals
pub struct ScanProgress {
    bar: Option<ProgressBar>,
    quiet: bool,
    summary: ScanSummary,
}

impl ScanProgress {
    /// Start tracking `total_files` files; `quiet` hides the bar and messages
    pub fn start(total_files: u64, quiet: bool) -> Self {
        let bar = (!quiet).then(|| {
            let bar = ProgressBar::new(total_files);
            match ProgressStyle::with_template(
                "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files {msg}",
            ) {
                Ok(style) => bar.set_style(style.progress_chars("##-")),
                Err(e) => log::debug!("default progress style in use: {e}"),
            }
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        });

        Self {
            bar,
            quiet,
            summary: ScanSummary::default(),
        }
    }

    /// Record a scanned file and the rows it produced
    pub fn scanned(&mut self, file: &str, matches: usize) {
        self.summary.scanned += 1;
        self.summary.matches += matches;
        log::debug!("{file}: {matches} matches");
        if let Some(bar) = &self.bar {
            bar.set_message(format!("{} matches so far", self.summary.matches));
            bar.inc(1);
        }
    }

    /// Record a file left out of the scan, telling the user why
    pub fn skipped(&mut self, file: &str, reason: impl fmt::Display) {
        self.summary.skipped += 1;
        let message = format!("Skipping {file}: {reason}");
        log::warn!("{message}");
        match &self.bar {
            Some(bar) => {
                bar.println(&message);
                bar.inc(1);
            }
            None if !self.quiet => eprintln!("{message}"),
            None => {}
        }
    }

    /// Close the bar and hand back the totals
    pub fn finish(self) -> ScanSummary {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(self.summary.to_string());
        }
        self.summary
    }
}
