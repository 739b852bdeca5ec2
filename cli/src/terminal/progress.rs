use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const JOB_TEMPLATE: &str =
    "{spinner:.blue} searching [{bar:32.green/bright_black}] {pos}/{len} jobs · {elapsed_precise} · eta {eta}";

/// Creates the span carrying the job progress bar.
///
/// At quiet level 2 and above no bar is drawn and the span is disabled.
pub fn job_progress(total_jobs: u64, q_level: u8) -> Span {
    if q_level > 1 {
        return Span::none();
    }

    let span = info_span!("search", indicatif.pb_show = true);
    let style = ProgressStyle::with_template(JOB_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ])
        .progress_chars("━╸ ");

    span.pb_set_style(&style);
    span.pb_set_length(total_jobs);
    span
}
