use indicatif::{ProgressBar, ProgressStyle};

pub fn get_progressbar(job_name: &str, len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    bar.set_style(
        ProgressStyle::with_template(" {msg} {wide_bar} {human_pos}/{human_len} eta: {eta_precise}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}
