pub use indicatif::ProgressBar;
use indicatif::ProgressStyle;

pub fn default(size: usize) -> ProgressBar {
    with_prefix(size, "")
}

pub fn with_prefix(size: usize, prefix: &str) -> ProgressBar {
    let template = format!("{}{}", prefix, "{wide_bar} [{elapsed} elapsed; {eta} left]");

    let progress = ProgressBar::new(size as u64);
    progress.set_draw_delta(size as u64 / 10000);
    progress.set_style(ProgressStyle::default_bar().template(&template));

    progress
}

/// Progress for work of unknown size, e.g. reading a table of variants.
pub fn counter(label: &str) -> ProgressBar {
    let template = format!("{{spinner}} {} {{pos}} [{{elapsed}}]", label);

    let progress = ProgressBar::new_spinner();
    progress.set_draw_delta(10_000);
    progress.set_style(ProgressStyle::default_spinner().template(&template));

    progress
}
