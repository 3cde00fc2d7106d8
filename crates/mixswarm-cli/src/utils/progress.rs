use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use mixswarm::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

const SPINNER_TICK_MS: u64 = 80;
const NO_INCUMBENT: &str = "-";

/// Renders optimizer progress on stderr: a spinner per phase, then an iteration bar
/// carrying the incumbent fitness.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr())
            .with_style(Self::phase_style());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb) = pb.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    pb.reset();
                    pb.set_length(0);
                    pb.set_style(Self::phase_style());
                    pb.set_prefix(name);
                    pb.set_message("");
                    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                }
                Progress::PhaseFinish => {
                    pb.disable_steady_tick();
                    pb.finish_with_message("done");
                }
                Progress::TaskStart { total_steps } => {
                    pb.disable_steady_tick();
                    pb.reset();
                    pb.set_length(total_steps);
                    pb.set_style(Self::iteration_style());
                    pb.set_message(NO_INCUMBENT);
                }
                Progress::TaskIncrement => pb.inc(1),
                Progress::TaskFinish => {
                    if let Some(length) = pb.length() {
                        pb.set_position(length);
                    }
                    pb.finish();
                }
                Progress::IterationFinished {
                    iteration,
                    incumbent,
                } => {
                    debug!(iteration, ?incumbent, "Iteration finished.");
                    pb.set_message(format_incumbent(incumbent));
                }
                Progress::Message(msg) => {
                    if pb.is_finished() {
                        pb.set_message(msg);
                    } else {
                        pb.println(format!("  {}", msg));
                    }
                }
            }
        })
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn iteration_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{prefix:.bold} [{bar:40.cyan/blue}] iter {pos}/{len} best {msg} ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key(
            "eta",
            |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
            },
        )
        .progress_chars("=>-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn format_incumbent(fitness: Option<f64>) -> String {
    fitness.map_or_else(|| NO_INCUMBENT.to_string(), |f| format!("{:.6e}", f))
}
