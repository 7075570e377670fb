//! Energy-exchange atom simulation.
//!
//! Two hundred atoms wander a box, trading energy on contact and soaking it
//! up from the walls. Colour tracks energy (blue cold, red hot), speed does
//! too, and the side panel shows a rolling-average energy distribution next
//! to the live-tunable sliders.

use eframe::egui::{self, Color32, Pos2, pos2};
use egui_plot::{Line, Plot, PlotPoints};

use particle_lab::Bounds;
use particle_lab::atom::{Atom, AtomParams, MAX_ENERGY, step};
use particle_lab::connections::{CONNECT_RANGE, neighbor_lists};
use particle_lab::panel::ControlPanel;
use particle_lab::rolling::RollingHistogram;
use particle_lab::slider::PointerEvent;
use particle_lab::trail::{TRAIL_FRAMES, TrailBuffer, draw_connector};

// ===================================================================================
// Layout and population constants
// ===================================================================================

const SIM_WIDTH: f32 = 800.0;
const SIM_HEIGHT: f32 = 600.0;
const PANEL_WIDTH: f32 = 300.0;
const NUM_ATOMS: usize = 200;

const HIST_BINS: usize = 50;
const HIST_FRAMES: usize = 120;

// Slider order in the control panel.
const SLIDER_TEMPERATURE: usize = 0;
const SLIDER_GRAVITY: usize = 1;
const SLIDER_RADIUS: usize = 2;
const SLIDER_TRAIL: usize = 3;

// ===================================================================================
// Application
// ===================================================================================

struct AtomsApp {
    atoms: Vec<Atom>,
    params: AtomParams,
    panel: ControlPanel,
    trails: TrailBuffer,
    energy_hist: RollingHistogram,
    /// Panel top-left in window coordinates, captured each frame so pointer
    /// events can be translated into panel space.
    panel_origin: Pos2,
}

impl AtomsApp {
    fn new() -> Self {
        let params = AtomParams {
            bounds: Bounds::new(SIM_WIDTH, SIM_HEIGHT),
            ..AtomParams::default()
        };

        let mut rng = rand::rng();
        let atoms: Vec<Atom> = (0..NUM_ATOMS)
            .map(|_| Atom::spawn(&mut rng, params.bounds))
            .collect();

        let mut panel = ControlPanel::new();
        panel.push(1.0, 100.0, params.wall_energy, "Wall temperature");
        panel.push(0.0, 1.0, params.gravity, "Gravity");
        panel.push(5.0, 15.0, params.radius, "Radius");
        panel.push(0.0, 100.0, 20.0, "Trail fade");

        log::info!("spawned {NUM_ATOMS} atoms in {SIM_WIDTH}x{SIM_HEIGHT}");

        Self {
            atoms,
            params,
            panel,
            trails: TrailBuffer::new(TRAIL_FRAMES),
            energy_hist: RollingHistogram::new(HIST_BINS, MAX_ENERGY, HIST_FRAMES),
            panel_origin: pos2(SIM_WIDTH, 0.0),
        }
    }

    /// Turn this frame's egui input into the discrete pointer events the
    /// sliders consume.
    fn pointer_events(ctx: &egui::Context) -> Vec<PointerEvent> {
        ctx.input(|input| {
            input
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::PointerButton {
                        pos,
                        button: egui::PointerButton::Primary,
                        pressed,
                        ..
                    } => Some(if *pressed {
                        PointerEvent::Down(*pos)
                    } else {
                        PointerEvent::Up
                    }),
                    egui::Event::PointerMoved(pos) => Some(PointerEvent::Moved(*pos)),
                    egui::Event::PointerGone => Some(PointerEvent::Up),
                    _ => None,
                })
                .collect()
        })
    }
}

impl eframe::App for AtomsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // --------------------------
        // Input and slider binding
        // --------------------------
        let events = Self::pointer_events(ctx);
        self.panel.handle_events(&events, self.panel_origin);

        self.params.wall_energy = self.panel.value(SLIDER_TEMPERATURE);
        self.params.gravity = self.panel.value(SLIDER_GRAVITY);
        self.params.radius = self.panel.value(SLIDER_RADIUS);
        let trail_alpha = self.panel.value(SLIDER_TRAIL) as u8;

        // --------------------------
        // Simulation step
        // --------------------------
        step(&mut self.atoms, &self.params);

        self.energy_hist.record(self.atoms.iter().map(|a| a.energy));
        self.trails
            .push_frame(self.atoms.iter().map(|a| (a.pos, a.color)).collect());

        let bodies: Vec<(Pos2, f32)> = self.atoms.iter().map(|a| (a.pos, a.radius)).collect();
        let connected = neighbor_lists(&bodies, CONNECT_RANGE);

        // --------------------------
        // Control panel: sliders, then the energy distribution underneath
        // --------------------------
        egui::SidePanel::right("controls")
            .exact_width(PANEL_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                self.panel_origin = ui.max_rect().min;
                self.panel.draw(ui.painter(), self.panel_origin);
                ui.add_space(self.panel.content_height());

                ui.label("Energy distribution (rolling average)");
                let bin_width = self.energy_hist.bin_width();
                let points: Vec<[f64; 2]> = self
                    .energy_hist
                    .smoothed()
                    .iter()
                    .enumerate()
                    .map(|(i, &count)| [(i as f32 * bin_width) as f64, count as f64])
                    .collect();
                Plot::new("energy_histogram")
                    .height(220.0)
                    .allow_scroll(false)
                    .allow_drag(false)
                    .show(ui, |plot_ui| {
                        plot_ui.line(Line::new(PlotPoints::from(points)));
                    });
            });

        // --------------------------
        // Simulation view
        // --------------------------
        egui::CentralPanel::default().show(ctx, |ui| {
            let painter = ui.painter();
            let rect = ui.max_rect();
            painter.rect_filled(rect, 0.0, Color32::BLACK);

            let scale = (rect.width() / SIM_WIDTH).min(rect.height() / SIM_HEIGHT);
            let to_screen = |p: Pos2| rect.min + (p.to_vec2() * scale);

            self.trails
                .draw(painter, to_screen, self.params.radius * scale, trail_alpha);

            for (i, near) in connected.iter().enumerate() {
                for &j in near {
                    if j > i {
                        draw_connector(
                            painter,
                            to_screen(self.atoms[i].pos),
                            to_screen(self.atoms[j].pos),
                            self.atoms[i].color,
                            self.atoms[j].color,
                        );
                    }
                }
            }

            for atom in &self.atoms {
                painter.circle_filled(to_screen(atom.pos), atom.radius * scale, atom.color);
            }
        });

        ctx.request_repaint();
    }
}

// ===================================================================================
// main
// ===================================================================================

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_cpus::get_physical())
        .build_global()
        .unwrap();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([SIM_WIDTH + PANEL_WIDTH, SIM_HEIGHT])
            .with_title("Atoms"),
        ..Default::default()
    };

    eframe::run_native(
        "Atoms",
        native_options,
        Box::new(|_cc| Ok(Box::new(AtomsApp::new()))),
    )
}
