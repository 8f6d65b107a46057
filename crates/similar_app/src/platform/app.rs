use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use page_logging::{page_debug, page_info, page_warn};
use similar_core::{update, AppState, ConnectionState, Msg, PageVariant, RatingAction};
use similar_engine::EngineHandle;

use super::cli::Args;
use super::effects::{EffectRunner, RowKind};
use super::input::{self, HostEvent};
use super::logging;
use super::settings;
use super::ui::{render, surface::TextSurface};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn run_app() -> anyhow::Result<()> {
    let args = Args::parse();
    let file_settings = settings::load_file_settings(&args.config)?;
    let config = settings::resolve(&args, file_settings)?;
    logging::initialize(config.log, config.log_level);

    let url = config
        .client
        .events_url(&config.query)
        .context("failed to build the progress stream url")?;
    let rows = match config.variant {
        PageVariant::Ratings => RowKind::Ratings,
        PageVariant::Reactions { .. } => RowKind::Reactions,
    };
    let engine = EngineHandle::new(config.client.clone()).context("failed to start engine")?;
    page_info!("similar_app starting for {:?} ({:?})", config.query.file, rows);

    let (host_tx, host_rx) = mpsc::channel::<HostEvent>();
    input::spawn_stdin_reader(host_tx);
    println!("{}", input::HELP);

    let mut app = App {
        state: AppState::new(config.variant),
        runner: EffectRunner::new(engine, rows),
        surface: TextSurface::new(),
    };
    app.runner.engine().open_stream(url);

    let mut input_closed = false;
    loop {
        while let Some(event) = app.runner.engine().try_recv() {
            let msg = app.runner.translate(event);
            app.dispatch(msg);
        }

        match host_rx.recv_timeout(POLL_INTERVAL) {
            Ok(HostEvent::Msg(msg)) => app.dispatch(msg),
            Ok(HostEvent::Rate { candidate, action }) => app.rate(&candidate, action),
            Ok(HostEvent::Quit) => break,
            Ok(HostEvent::InputClosed) | Err(mpsc::RecvTimeoutError::Disconnected) => {
                input_closed = true;
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }

        if input_closed && app.is_settled() {
            page_debug!("Input closed and nothing left in flight");
            break;
        }
    }

    app.runner.engine().close_stream();
    page_info!("similar_app exiting");
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
    surface: TextSurface,
}

impl App {
    fn dispatch(&mut self, msg: Msg) {
        let mut inbox = vec![msg];
        while let Some(msg) = inbox.pop() {
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            let was_dirty = state.consume_dirty();
            let view = was_dirty.then(|| state.view());
            self.state = state;

            if let Some(view) = view {
                self.surface.apply(render::render(&view));
                self.surface.draw();
            }
            let mut follow_ups = self.runner.run(effects, &self.surface);
            follow_ups.reverse();
            inbox.extend(follow_ups);
        }
    }

    fn rate(&mut self, candidate: &str, action: RatingAction) {
        match self.state.rating_key(candidate) {
            Some(key) => self.dispatch(Msg::RatingClicked { key, action }),
            None => {
                page_warn!("No rating row for {}", candidate);
                self.surface.alert(&format!("no rating row for {candidate}"));
            }
        }
    }

    fn is_settled(&self) -> bool {
        self.state.connection() == ConnectionState::Closed && self.runner.in_flight() == 0
    }
}
