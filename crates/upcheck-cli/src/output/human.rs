//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use upcheck_core::Extension;
use upcheck_core::Rejection;
use upcheck_core::StoredUpload;
use upcheck_core::UploadRequest;
use upcheck_core::inspection::EffectiveLimits;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_allowed(allowed: &[String]) -> String {
        if allowed.is_empty() {
            "any".to_string()
        } else {
            allowed.join(", ")
        }
    }

    fn headline(&self, text: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {text}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(text);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_accepted(
        &self,
        request: &UploadRequest,
        extension: &Extension,
        limits: &EffectiveLimits,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!("Upload accepted: {}", request.original_name));
        let _ = self.term.write_line(&format!(
            "  Size:        {}",
            Self::format_size(request.size_bytes)
        ));
        let _ = self
            .term
            .write_line(&format!("  Limit:       {}M", limits.max_size_mb));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Field:       {}", request.field_name));
            let _ = self
                .term
                .write_line(&format!("  Extension:   {extension}"));
            let _ = self.term.write_line(&format!(
                "  Threshold:   {} bytes",
                limits.threshold_bytes
            ));
            let _ = self.term.write_line(&format!(
                "  Allowed:     {}",
                Self::format_allowed(&limits.allowed_extensions)
            ));
        }

        Ok(())
    }

    fn format_stored(&self, stored: &StoredUpload) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!("Upload stored: {}", stored.path.display()));
        let _ = self
            .term
            .write_line(&format!("  Size:        {}", Self::format_size(stored.bytes)));

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "  Name:        {}{}",
                stored.file_name,
                if stored.has_generated_name() {
                    " (generated)"
                } else {
                    ""
                }
            ));
            let _ = self
                .term
                .write_line(&format!("  Duration:    {:?}", stored.duration));
        }

        Ok(())
    }

    // The converted error is printed to stderr when the command returns.
    fn format_rejection(&self, _operation: &str, _rejection: &Rejection) {}
}
