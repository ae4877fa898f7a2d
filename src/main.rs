//! Space Hop entry point
//!
//! Native builds run headless demo runs with the autopilot and persist the
//! best score. The browser build is driven from JS through `space_hop::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use space_hop::sim::{GameState, RunPhase, TickInput, tick};
    use space_hop::{BestScore, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "space-hop")]
    #[command(about = "Headless Space Hop demo runs driven by the autopilot")]
    pub struct Options {
        /// Seed for the platform generator
        #[arg(long, default_value_t = 1)]
        pub seed: u64,
        /// Tick limit per run
        #[arg(long = "ticks", default_value_t = 20_000)]
        pub max_ticks: u64,
        #[arg(long, default_value_t = 3)]
        pub runs: u32,
        /// JSON file holding the best score
        #[arg(long)]
        pub best_file: Option<PathBuf>,
        /// JSON file overriding game balance
        #[arg(long = "tuning")]
        pub tuning_file: Option<PathBuf>,
    }

    pub fn run(options: &Options) {
        let tuning = options
            .tuning_file
            .as_deref()
            .map(Tuning::load_or_default)
            .unwrap_or_default();
        let mut stored = options
            .best_file
            .as_deref()
            .map(BestScore::load_from)
            .unwrap_or_default();

        let mut state = GameState::with_tuning(options.seed, tuning).with_best(stored.best);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        for run in 1..=options.runs {
            let mut ticks = 0;
            while ticks < options.max_ticks && state.phase() != RunPhase::GameOver {
                tick(&mut state, &input, None);
                ticks += 1;
            }
            state.drain_events();
            log::info!(
                "Run {run}: score {} after {ticks} ticks, climbed {:.0}px ({})",
                state.run.score,
                state.camera.climbed,
                state.phase().as_str()
            );
            state.restart();
        }

        log::info!("Best: {}", state.run.best);
        if stored.record(state.run.best) {
            if let Some(path) = &options.best_file {
                if let Err(e) = stored.save_to(path) {
                    log::error!("Failed to save best score: {e}");
                }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Space Hop (native, headless) starting...");

    let options = <headless::Options as clap::Parser>::parse();
    headless::run(&options);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is space_hop::web::wasm_start, this is just to satisfy the compiler
}
