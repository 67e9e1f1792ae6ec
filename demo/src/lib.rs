//! Demo host application for the pose publisher plugin.

mod windows;

use std::sync::Arc;
use std::time::{Duration, Instant};

use pose_publisher::{
    CanvasMemory, FrameRegistry, LocalTransport, MapCanvas, PluginConfig, PosePublisherPlugin,
    StaticFrames, Transport,
};

const CONFIG_KEY: &str = "pose_publisher";

struct Backends {
    transport: Arc<dyn Transport>,
    registry: Arc<dyn FrameRegistry>,
    /// Set when publishing in-process, so the journal window has something to show.
    local: Option<LocalTransport>,
}

#[cfg(feature = "rosbridge")]
fn rosbridge_backends() -> Option<Backends> {
    use pose_publisher::rosbridge::{RosbridgeTransport, TfFrameRegistry};

    let url = std::env::var("ROSBRIDGE_URL").ok()?;
    match RosbridgeTransport::connect(&url).and_then(|transport| {
        let registry = TfFrameRegistry::new(&transport)?;
        Ok((transport, registry))
    }) {
        Ok((transport, registry)) => {
            log::info!("publishing through rosbridge at {url}");
            Some(Backends {
                transport: Arc::new(transport),
                registry: Arc::new(registry),
                local: None,
            })
        }
        Err(error) => {
            log::warn!("rosbridge setup failed ({error}), falling back to the local transport");
            None
        }
    }
}

fn backends() -> Backends {
    #[cfg(feature = "rosbridge")]
    if let Some(backends) = rosbridge_backends() {
        return backends;
    }

    log::info!("publishing through the in-process local transport");
    let local = LocalTransport::new();
    Backends {
        transport: Arc::new(local.clone()),
        registry: Arc::new(StaticFrames::new(["map", "odom", "base_link"], true)),
        local: Some(local),
    }
}

pub struct MyApp {
    memory: CanvasMemory,
    plugin: PosePublisherPlugin,
    local: Option<LocalTransport>,
}

impl MyApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let Backends {
            transport,
            registry,
            local,
        } = backends();

        let mut plugin = PosePublisherPlugin::new(transport, registry);

        let config = cc
            .storage
            .and_then(|storage| storage.get_string(CONFIG_KEY))
            .and_then(|raw| serde_json::from_str::<PluginConfig>(&raw).ok())
            .unwrap_or_default();
        plugin.load_config(&config);

        if config.topic.is_none() {
            plugin.set_topic("/selected_pose");
        }

        Self {
            memory: CanvasMemory::default(),
            plugin,
            local,
        }
    }
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.plugin.tick(Instant::now());

        let rimless = egui::Frame {
            fill: ctx.style().visuals.panel_fill,
            ..Default::default()
        };

        egui::CentralPanel::default().frame(rimless).show(ctx, |ui| {
            ui.add(MapCanvas::new(&mut self.memory).with_plugin(&mut self.plugin));

            windows::panel(ui, &mut self.plugin);
            windows::zoom(ui, &mut self.memory);
            if let Some(local) = &self.local {
                windows::published(ui, local);
            }
        });

        // Keep the periodic jobs running even without input events.
        ctx.request_repaint_after(Duration::from_millis(250));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(raw) = serde_json::to_string(&self.plugin.save_config()) {
            storage.set_string(CONFIG_KEY, raw);
        }
    }
}
