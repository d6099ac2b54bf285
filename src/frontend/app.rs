//! Main application window
//!
//! Hosts the query bar (date inputs, query button, progress) and the four
//! stacked channel plots. All archive work happens on the backend worker
//! thread; this module only sends commands, drains messages, and renders
//! the latest published state.

use crate::backend::{BackendMessage, FrontendReceiver};
use crate::config::{AppConfig, AppState};
use crate::frontend::plot::ChannelPlot;
use crate::types::{empty_channel_series, Channel, ChannelSeries};
use egui::{CentralPanel, Context, ProgressBar, RichText, TopBottomPanel};

/// Outcome of the most recent query, for the status line
enum QueryStatus {
    /// No query has run yet
    Idle,
    /// A query is in flight
    Running,
    /// Last query completed; channels that came back empty are listed
    Complete { empty_channels: Vec<Channel> },
    /// Last query was rejected or failed
    Failed(String),
}

/// The SensorScope application window
pub struct SensorScopeApp {
    /// Handle to the backend worker
    frontend: FrontendReceiver,
    /// Session state persisted across launches
    app_state: AppState,
    /// UI preferences
    config: AppConfig,
    /// Query input fields
    start_input: String,
    end_input: String,
    /// Latest progress percentage while a query runs
    progress: Option<u8>,
    status: QueryStatus,
    /// Latest published query result
    data: ChannelSeries,
    /// One plot per channel, in channel order
    plots: Vec<ChannelPlot>,
}

impl SensorScopeApp {
    /// Create the application
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        frontend: FrontendReceiver,
        config: AppConfig,
        app_state: AppState,
    ) -> Self {
        if app_state.dark_mode {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
        } else {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
        }

        Self {
            frontend,
            start_input: app_state.last_start_date.clone(),
            end_input: app_state.last_end_date.clone(),
            app_state,
            config,
            progress: None,
            status: QueryStatus::Idle,
            data: empty_channel_series(),
            plots: Channel::ALL.iter().map(|&ch| ChannelPlot::new(ch)).collect(),
        }
    }

    fn submit_query(&mut self) {
        self.app_state.last_start_date = self.start_input.trim().to_string();
        self.app_state.last_end_date = self.end_input.trim().to_string();

        self.status = QueryStatus::Running;
        self.progress = Some(0);
        self.frontend
            .query(self.start_input.trim(), self.end_input.trim());
    }

    fn drain_messages(&mut self) {
        while let Some(msg) = self.frontend.try_recv() {
            match msg {
                BackendMessage::QueryStarted => {
                    self.progress = Some(0);
                }
                BackendMessage::Progress(percent) => {
                    self.progress = Some(percent);
                }
                BackendMessage::QueryFinished(channels) => {
                    let empty_channels = channels
                        .iter()
                        .filter(|(_, store)| store.is_empty())
                        .map(|(&ch, _)| ch)
                        .collect();
                    self.data = channels;
                    self.status = QueryStatus::Complete { empty_channels };
                    self.progress = Some(100);
                    for plot in &mut self.plots {
                        plot.clear_pick();
                    }
                }
                BackendMessage::QueryFailed(message) => {
                    self.status = QueryStatus::Failed(message);
                    self.progress = None;
                }
                BackendMessage::QueryCancelled => {
                    // A newer query is already on its way; keep showing
                    // the running state.
                }
                BackendMessage::Shutdown => {}
            }
        }
    }

    fn query_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Start date:");
            ui.add(
                egui::TextEdit::singleline(&mut self.start_input)
                    .hint_text("YYYYMMDD")
                    .desired_width(90.0),
            );
            ui.label("End date:");
            ui.add(
                egui::TextEdit::singleline(&mut self.end_input)
                    .hint_text("YYYYMMDD")
                    .desired_width(90.0),
            );

            if ui.button("Query").clicked() {
                self.submit_query();
            }

            if let Some(percent) = self.progress {
                ui.label("Progress:");
                ui.add(
                    ProgressBar::new(percent as f32 / 100.0)
                        .desired_width(180.0)
                        .show_percentage(),
                );
            }

            match &self.status {
                QueryStatus::Idle => {}
                QueryStatus::Running => {
                    ui.label("Querying...");
                }
                QueryStatus::Complete { empty_channels } if empty_channels.is_empty() => {
                    ui.label("Done");
                }
                QueryStatus::Complete { .. } => {
                    ui.label("Done (some channels empty)");
                }
                QueryStatus::Failed(message) => {
                    ui.colored_label(egui::Color32::LIGHT_RED, format!("Query failed: {message}"));
                }
            }
        });
    }

    /// Channels the last completed query returned no rows for
    fn empty_channels(&self) -> Vec<Channel> {
        match &self.status {
            QueryStatus::Complete { empty_channels } => empty_channels.clone(),
            _ => Vec::new(),
        }
    }
}

impl eframe::App for SensorScopeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.drain_messages();

        TopBottomPanel::top("query_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.query_bar(ui);
            ui.add_space(4.0);
        });

        let empty_channels = self.empty_channels();
        CentralPanel::default().show(ctx, |ui| {
            let spacing = ui.spacing().item_spacing.y;
            let title_height = 20.0;
            let plot_height = (ui.available_height() / Channel::ALL.len() as f32
                - title_height
                - 2.0 * spacing)
                .max(80.0);

            for plot in &mut self.plots {
                let channel = plot.channel();
                ui.horizontal(|ui| {
                    ui.label(RichText::new(channel.display_name()).strong());
                    if empty_channels.contains(&channel) {
                        ui.label(RichText::new("no data in range").weak());
                    }
                });
                if let Some(store) = self.data.get(&channel) {
                    plot.show(ui, store, &self.config.ui, plot_height);
                }
            }
        });

        // Keep draining backend messages while a query runs.
        if matches!(self.status, QueryStatus::Running) {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }

    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        if let Err(e) = self.app_state.save() {
            tracing::warn!(error = %e, "failed to persist app state");
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.frontend.shutdown();
    }
}
