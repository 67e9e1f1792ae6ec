use egui::{Align2, RichText, Ui, Window};
use pose_publisher::{CanvasMemory, LocalTransport, PosePublisherPlugin};

/// The plugin's config panel.
pub fn panel(ui: &Ui, plugin: &mut PosePublisherPlugin) {
    Window::new("Pose publisher")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(Align2::RIGHT_TOP, [-10., 10.])
        .show(ui.ctx(), |ui| {
            plugin.show(ui);
        });
}

/// Simple GUI to zoom in and out.
pub fn zoom(ui: &Ui, memory: &mut CanvasMemory) {
    Window::new("Map")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(Align2::LEFT_BOTTOM, [10., -10.])
        .show(ui.ctx(), |ui| {
            ui.horizontal(|ui| {
                if ui.button(RichText::new("➕").heading()).clicked() {
                    let _ = memory.zoom_in();
                }

                if ui.button(RichText::new("➖").heading()).clicked() {
                    let _ = memory.zoom_out();
                }
            });
        });
}

/// Journal of the poses which went out through the local transport.
pub fn published(ui: &Ui, transport: &LocalTransport) {
    Window::new("Published")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(Align2::RIGHT_BOTTOM, [-10., -10.])
        .show(ui.ctx(), |ui| {
            let published = transport.published();
            if published.is_empty() {
                ui.label("nothing published yet");
            }

            for (topic, pose) in published.iter().rev().take(5) {
                let position = &pose.pose.pose.position;
                ui.label(format!(
                    "{}: ({:.2}, {:.2}) yaw {:.0}° in {}",
                    topic,
                    position.x,
                    position.y,
                    pose.pose.pose.orientation.yaw().to_degrees(),
                    pose.header.frame_id,
                ));
            }
        });
}
