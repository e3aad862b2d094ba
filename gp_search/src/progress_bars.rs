#[cfg(feature = "progress")]
mod imp {
    use std::io::IsTerminal;
    use std::time::Duration;

    use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

    use crate::evolution::GenerationStats;

    pub(crate) struct SearchProgress {
        show: bool,
        bar: ProgressBar,
    }

    impl SearchProgress {
        pub(crate) fn new(enabled: bool, label: &str, total_generations: usize) -> Self {
            let show = enabled && std::io::stderr().is_terminal();

            let bar = if show {
                let pb = ProgressBar::new(total_generations as u64);
                pb.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
                pb.set_prefix(label.to_string());
                if let Ok(style) = ProgressStyle::with_template(
                    "{prefix} {wide_bar} {pos:>5}/{len:5} [{elapsed_precise}<{eta_precise}]\n{msg}",
                ) {
                    pb.set_style(style);
                }
                pb.enable_steady_tick(Duration::from_millis(200));
                pb
            } else {
                ProgressBar::hidden()
            };

            Self { show, bar }
        }

        pub(crate) fn on_generation(&mut self, stats: &GenerationStats) {
            if !self.show {
                return;
            }
            self.bar.inc(1);
            let mut msg = format!(
                "best fitness {:.6e}  mean size {:.1}",
                stats.best_fitness, stats.mean_size
            );
            if let Some(score) = stats.validation_score {
                msg.push_str(&format!("  validation {score:.6e}"));
            }
            self.bar.set_message(msg);
        }

        pub(crate) fn finish(&self) {
            if self.show {
                self.bar.finish();
            }
        }
    }
}

#[cfg(not(feature = "progress"))]
mod imp {
    use crate::evolution::GenerationStats;

    pub(crate) struct SearchProgress;

    impl SearchProgress {
        pub(crate) fn new(_enabled: bool, _label: &str, _total_generations: usize) -> Self {
            Self
        }

        pub(crate) fn on_generation(&mut self, _stats: &GenerationStats) {}

        pub(crate) fn finish(&self) {}
    }
}

pub(crate) use imp::SearchProgress;
