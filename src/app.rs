use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui;

use crate::config::ViewerConfig;
use crate::data::loader::{self, LoadError};
use crate::data::model::Series;
use crate::state::{AppState, LoadStatus};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BacViewerApp {
    pub state: AppState,
    /// Pending dataset load; dropped once the result has been taken.
    pending: Option<Receiver<Result<Series, LoadError>>>,
}

impl BacViewerApp {
    /// Build the app and start loading the dataset in the background.
    pub fn new(config: ViewerConfig, ctx: &egui::Context) -> Self {
        let (tx, rx) = mpsc::channel();
        let path = config.data_path.clone();
        let ctx = ctx.clone();
        thread::spawn(move || {
            log::debug!("loading {}", path.display());
            // The receiver only disappears when the window is already closed.
            let _ = tx.send(loader::load_file(&path));
            ctx.request_repaint();
        });

        Self {
            state: AppState::new(config),
            pending: Some(rx),
        }
    }

    fn poll_load(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => {
                self.state.finish_load(result);
                self.pending = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                log::error!("dataset loader exited without a result");
                self.state.load_status = LoadStatus::Failed("loader thread exited".to_string());
                self.pending = None;
            }
        }
    }
}

impl eframe::App for BacViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_load();

        // ---- Top panel: title + language toggle ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: footer ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            panels::footer(ui, &self.state);
        });

        // ---- Left side panel: year query ----
        egui::SidePanel::left("query_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::success_rate_chart(ui, &self.state);
        });
    }
}
