//! Channel plot rendering using egui_plot
//!
//! Each channel gets one plot showing the raw curve and, overlaid on the
//! same axis, the compensation curve rescaled onto the raw curve's range.
//! Clicking near a curve picks the nearest sample and pins a marker with
//! its value and acquisition timestamp.
//!
//! The rescale mapping is recomputed from the series on demand — once per
//! frame for drawing and again per click — rather than cached, so a click
//! always inspects exactly what is on screen.

use crate::analysis::{pick_sample, scale_to_range, ScaleMapping};
use crate::config::UiConfig;
use crate::types::{Channel, PickResult, SeriesStore};
use egui::{Align2, Color32, Ui};
use egui_plot::{Corner, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text};

/// Color of the raw measurement curve
const COLOR_RAW: Color32 = Color32::YELLOW;
/// Color of the rescaled compensation curve
const COLOR_COMPENSATION: Color32 = Color32::RED;
/// Color of the pick marker
const COLOR_PICK: Color32 = Color32::RED;

/// Plot state for one channel
pub struct ChannelPlot {
    channel: Channel,
    /// Last pick, pinned until the next click or query
    pick: Option<PickResult>,
}

impl ChannelPlot {
    /// Create the plot for one channel
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            pick: None,
        }
    }

    /// The channel this plot renders
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Drop the pinned pick (called when new query results replace the data)
    pub fn clear_pick(&mut self) {
        self.pick = None;
    }

    /// Render the plot and handle click inspection
    pub fn show(&mut self, ui: &mut Ui, store: &SeriesStore, ui_config: &UiConfig, height: f32) {
        let mapping = self.display_mapping(store);

        let mut plot = Plot::new(self.channel.key())
            .height(height)
            .allow_drag(true)
            .allow_zoom(true)
            .allow_scroll(false);
        if ui_config.show_legend {
            plot = plot.legend(Legend::default().position(Corner::LeftTop));
        }

        let response = plot.show(ui, |plot_ui| {
            if !store.is_empty() {
                plot_ui.line(
                    Line::new(
                        format!("{} raw", self.channel.display_name()),
                        PlotPoints::from(store.raw_plot_points()),
                    )
                    .color(COLOR_RAW)
                    .width(ui_config.line_width),
                );
            }

            if let Some(mapping) = &mapping {
                let points: Vec<[f64; 2]> = mapping
                    .scaled
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| [i as f64, v])
                    .collect();
                plot_ui.line(
                    Line::new(
                        format!("{} compensation", self.channel.display_name()),
                        PlotPoints::from(points),
                    )
                    .color(COLOR_COMPENSATION)
                    .width(ui_config.line_width),
                );
            }

            if let Some(pick) = &self.pick {
                let position = PlotPoint::new(pick.index as f64, pick.display_value);
                plot_ui.points(
                    Points::new("picked", vec![[position.x, position.y]])
                        .radius(5.0)
                        .color(COLOR_PICK),
                );
                plot_ui.text(
                    Text::new(
                        "picked-label",
                        position,
                        format!(" {:.3},  {}", pick.label_value(), pick.timestamp),
                    )
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });

        if response.response.clicked() {
            if let Some(screen_pos) = response.response.interact_pointer_pos() {
                let cursor = response.transform.value_from_position(screen_pos);
                self.handle_click(store, cursor.x, cursor.y);
            }
        }
    }

    /// Mapping of the compensation series onto the raw series' range
    ///
    /// `None` when the store is empty; a degenerate mapping still draws
    /// (constant midline) but carries no inverse parameters.
    fn display_mapping(&self, store: &SeriesStore) -> Option<ScaleMapping> {
        if store.is_empty() {
            return None;
        }
        scale_to_range(store.compensation(), store.raw()).ok()
    }

    fn handle_click(&mut self, store: &SeriesStore, cursor_x: f64, cursor_y: f64) {
        let mapping = self.display_mapping(store);
        match pick_sample(store, cursor_x, cursor_y, mapping.as_ref()) {
            Ok(pick) => {
                tracing::debug!(
                    channel = %self.channel,
                    index = pick.index,
                    value = pick.label_value(),
                    "picked sample"
                );
                self.pick = Some(pick);
            }
            Err(e) => {
                tracing::debug!(channel = %self.channel, error = %e, "nothing to pick");
                self.pick = None;
            }
        }
    }
}
