use egui::{
    Color32, Painter, PointerButton, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2, Widget,
};

use crate::{memory::CanvasMemory, position::map_point, projector::Projector};

/// Pointer event on the canvas, in screen coordinates. Only the primary button is reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed(Pos2),
    Moved(Pos2),
    Released(Pos2),
}

/// Plugins draw custom shapes on the canvas and may intercept pointer events before the canvas
/// acts on them itself. Add them to the canvas with [`MapCanvas::with_plugin`].
pub trait Plugin {
    /// Filter a pointer event. Returning `true` consumes it; `false` lets the canvas (and the
    /// plugins later in the chain) see it.
    fn handle_event(&mut self, _event: &PointerEvent, _projector: &Projector) -> bool {
        false
    }

    /// Called at each frame, after the canvas background is drawn.
    fn draw(&self, ui: &Ui, painter: Painter, projector: &Projector);
}

/// Map canvas widget working in a metric fixed frame. Instances are to be created on each
/// frame, as all necessary state lives in [`CanvasMemory`].
pub struct MapCanvas<'a, 'b> {
    memory: &'a mut CanvasMemory,
    plugins: Vec<&'b mut dyn Plugin>,
}

impl<'a, 'b> MapCanvas<'a, 'b> {
    pub fn new(memory: &'a mut CanvasMemory) -> Self {
        Self {
            memory,
            plugins: Vec::default(),
        }
    }

    /// Add a plugin to the event and drawing pipeline.
    pub fn with_plugin(mut self, plugin: &'b mut dyn Plugin) -> Self {
        self.plugins.push(plugin);
        self
    }
}

impl MapCanvas<'_, '_> {
    /// Zoom around the cursor with the scroll wheel or a pinch gesture.
    fn zoom(&mut self, ui: &Ui, rect: Rect, response: &Response) {
        let zoom_delta = ui.input(|input| input.zoom_delta());

        if (0.99..=1.01).contains(&zoom_delta) || !ui.ui_contains_pointer() {
            return;
        }

        let anchor = response.hover_pos();
        let before = anchor.map(|hover| Projector::new(rect, self.memory).unproject(hover.to_vec2()));

        self.memory.zoom_by(zoom_delta as f64);

        // Keep the location under the cursor fixed on the screen.
        if let (Some(hover), Some(before)) = (anchor, before) {
            let after = Projector::new(rect, self.memory).unproject(hover.to_vec2());
            let center = self.memory.center();
            self.memory.center_at(map_point(
                center.x() + before.x() - after.x(),
                center.y() + before.y() - after.y(),
            ));
        }
    }
}

impl Widget for MapCanvas<'_, '_> {
    fn ui(mut self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());

        // Events are filtered against the state the frame started with.
        let event_projector = Projector::new(rect, self.memory);
        for event in pointer_events(ui, &response, &mut self.memory.captured) {
            let consumed = self
                .plugins
                .iter_mut()
                .any(|plugin| plugin.handle_event(&event, &event_projector));

            if !consumed {
                match event {
                    // An unconsumed press anchors a pan; a consumed one must never start it.
                    PointerEvent::Pressed(_) => self.memory.panning = true,
                    PointerEvent::Moved(_) => {}
                    PointerEvent::Released(_) => self.memory.panning = false,
                }
            }
        }

        if self.memory.panning && response.dragged_by(PointerButton::Primary) {
            self.memory.pan(response.drag_delta());
        }

        self.zoom(ui, rect, &response);

        let painter = ui.painter().with_clip_rect(rect);
        let projector = Projector::new(rect, self.memory);
        draw_grid(&painter, rect, &projector);

        for plugin in &self.plugins {
            plugin.draw(ui, painter.to_owned(), &projector);
        }

        response
    }
}

/// Raw primary-button events on the canvas during this frame, in the order they happened.
///
/// A press starts a gesture only while the canvas is the layer under the pointer, so clicks
/// on windows floating above the map stay theirs. Once a gesture has started, moves and
/// releases follow it wherever the pointer goes, `captured` carrying that state between
/// frames.
fn pointer_events(ui: &Ui, response: &Response, captured: &mut bool) -> Vec<PointerEvent> {
    let hovered = ui
        .ctx()
        .rect_contains_pointer(response.layer_id, response.rect);

    ui.input(|input| {
        let pointer = &input.pointer;
        let mut events = Vec::new();

        if pointer.primary_pressed() && hovered {
            if let Some(position) = pointer.interact_pos() {
                events.push(PointerEvent::Pressed(position));
                *captured = true;
            }
        }

        if *captured && pointer.primary_down() && pointer.delta() != Vec2::ZERO {
            if let Some(position) = pointer.latest_pos() {
                events.push(PointerEvent::Moved(position));
            }
        }

        if pointer.primary_released() {
            if *captured {
                if let Some(position) = pointer.latest_pos() {
                    events.push(PointerEvent::Released(position));
                }
            }
            *captured = false;
        }

        events
    })
}

const BACKGROUND: Color32 = Color32::from_gray(27);
const GRID: Color32 = Color32::from_gray(45);
const AXES: Color32 = Color32::from_gray(80);

fn draw_grid(painter: &Painter, rect: Rect, projector: &Projector) {
    painter.rect_filled(rect, 0., BACKGROUND);

    // Grid pitch in meters: the power of ten which keeps lines at least 40 pixels apart.
    let meters_per_pixel = projector.meters_per_pixel();
    let pitch = 10_f64.powf((40. * meters_per_pixel).log10().ceil());

    let min = projector.unproject(rect.left_bottom().to_vec2());
    let max = projector.unproject(rect.right_top().to_vec2());

    let mut x = (min.x() / pitch).floor() * pitch;
    while x <= max.x() {
        let top = projector.project(map_point(x, max.y())).to_pos2();
        let bottom = projector.project(map_point(x, min.y())).to_pos2();
        let color = if x.abs() < pitch / 2. { AXES } else { GRID };
        painter.line_segment([top, bottom], Stroke::new(1., color));
        x += pitch;
    }

    let mut y = (min.y() / pitch).floor() * pitch;
    while y <= max.y() {
        let left = projector.project(map_point(min.x(), y)).to_pos2();
        let right = projector.project(map_point(max.x(), y)).to_pos2();
        let color = if y.abs() < pitch / 2. { AXES } else { GRID };
        painter.line_segment([left, right], Stroke::new(1., color));
        y += pitch;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::CanvasMemory;
    use egui::{Align2, CentralPanel, Context, Event, Modifiers, RawInput, Window};

    #[derive(Default)]
    struct RecordingPlugin {
        events: Vec<PointerEvent>,
    }

    impl Plugin for RecordingPlugin {
        fn handle_event(&mut self, event: &PointerEvent, _projector: &Projector) -> bool {
            self.events.push(*event);
            true
        }

        fn draw(&self, _ui: &Ui, _painter: Painter, _projector: &Projector) {}
    }

    /// Run one frame with the canvas filling the screen and a window floating over its
    /// top-right corner, returning the window's rect.
    fn frame(
        ctx: &Context,
        events: Vec<Event>,
        memory: &mut CanvasMemory,
        plugin: &mut RecordingPlugin,
    ) -> Rect {
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800., 600.))),
            events,
            ..Default::default()
        };

        let mut window_rect = Rect::NOTHING;
        ctx.run(input, |ctx| {
            CentralPanel::default().show(ctx, |ui| {
                ui.add(MapCanvas::new(memory).with_plugin(plugin));
            });

            if let Some(response) = Window::new("floating")
                .anchor(Align2::RIGHT_TOP, [-10., 10.])
                .show(ctx, |ui| {
                    ui.label("covers a corner of the canvas");
                })
            {
                window_rect = response.response.rect;
            }
        });

        window_rect
    }

    fn press(position: Pos2) -> Event {
        Event::PointerButton {
            pos: position,
            button: PointerButton::Primary,
            pressed: true,
            modifiers: Modifiers::default(),
        }
    }

    fn release(position: Pos2) -> Event {
        Event::PointerButton {
            pos: position,
            button: PointerButton::Primary,
            pressed: false,
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn presses_on_the_open_canvas_reach_the_plugins() {
        let ctx = Context::default();
        let mut memory = CanvasMemory::default();
        let mut plugin = RecordingPlugin::default();
        let at = Pos2::new(100., 300.);

        frame(&ctx, Vec::new(), &mut memory, &mut plugin);
        frame(&ctx, vec![press(at)], &mut memory, &mut plugin);
        frame(&ctx, vec![release(at)], &mut memory, &mut plugin);

        assert_eq!(
            vec![PointerEvent::Pressed(at), PointerEvent::Released(at)],
            plugin.events
        );
    }

    #[test]
    fn presses_over_a_floating_window_never_reach_the_plugins() {
        let ctx = Context::default();
        let mut memory = CanvasMemory::default();
        let mut plugin = RecordingPlugin::default();

        let window = frame(&ctx, Vec::new(), &mut memory, &mut plugin);
        assert!(window.is_positive());

        let at = window.center();
        frame(&ctx, vec![press(at)], &mut memory, &mut plugin);
        frame(&ctx, vec![release(at)], &mut memory, &mut plugin);

        assert!(plugin.events.is_empty());
    }
}
