//! Kind-interaction particle simulation ("particle life").
//!
//! Two hundred particles of four kinds chase and flee each other according
//! to a signed interaction matrix, with a heavy invisible cursor particle
//! pinned to the pointer stirring the mix. The right-hand panel exposes the
//! matrix and the physical constants as sliders; trails, glow, and gradient
//! connector lines dress up the view.

use eframe::egui::{self, Color32, Pos2, Rect, pos2, vec2};

use particle_lab::Bounds;
use particle_lab::connections::{CONNECT_RANGE, neighbor_lists};
use particle_lab::interaction::{InteractionMatrix, Kind};
use particle_lab::life::{LifeParams, Particle, step};
use particle_lab::panel::ControlPanel;
use particle_lab::slider::PointerEvent;
use particle_lab::trail::{TRAIL_FRAMES, TrailBuffer, draw_connector, draw_glow};

// ===================================================================================
// Layout and population constants
// ===================================================================================

const WINDOW_WIDTH: f32 = 1024.0;
const SIM_HEIGHT: f32 = 600.0;
const PANEL_WIDTH: f32 = 300.0;
const SIM_WIDTH: f32 = WINDOW_WIDTH - PANEL_WIDTH;
const NUM_PARTICLES: usize = 200;

// Slider order in the control panel: the ten matrix pairs come first (their
// indices match MATRIX_SLIDERS), then the physics.
const SLIDER_SPEED: usize = 10;
const SLIDER_RADIUS: usize = 11;
const SLIDER_RESTITUTION: usize = 12;
const SLIDER_FORCE: usize = 13;
const SLIDER_TRAIL: usize = 14;

/// The slider-exposed matrix cells, in panel order. Each slider writes one
/// ordered cell; the mirrored cell keeps its configured value, so the
/// matrix asymmetries survive retuning.
const MATRIX_SLIDERS: [(Kind, Kind, &str); 10] = [
    (Kind::Red, Kind::Red, "RED-RED"),
    (Kind::Red, Kind::Green, "RED-GREEN"),
    (Kind::Red, Kind::Blue, "RED-BLUE"),
    (Kind::Red, Kind::Yellow, "RED-YELLOW"),
    (Kind::Green, Kind::Green, "GREEN-GREEN"),
    (Kind::Green, Kind::Blue, "GREEN-BLUE"),
    (Kind::Green, Kind::Yellow, "GREEN-YELLOW"),
    (Kind::Blue, Kind::Blue, "BLUE-BLUE"),
    (Kind::Blue, Kind::Yellow, "BLUE-YELLOW"),
    (Kind::Yellow, Kind::Yellow, "YELLOW-YELLOW"),
];

// ===================================================================================
// Application
// ===================================================================================

struct LifeApp {
    /// All particles; the cursor sits at the last index.
    particles: Vec<Particle>,
    matrix: InteractionMatrix,
    params: LifeParams,
    panel: ControlPanel,
    trails: TrailBuffer,
    panel_origin: Pos2,
    /// Simulation viewport from the previous frame, for mapping the pointer
    /// into simulation space.
    sim_rect: Rect,
    sim_scale: f32,
}

impl LifeApp {
    fn new() -> Self {
        let params = LifeParams {
            bounds: Bounds::new(SIM_WIDTH, SIM_HEIGHT),
            ..LifeParams::default()
        };
        let matrix = InteractionMatrix::default();

        let mut rng = rand::rng();
        let mut particles: Vec<Particle> = (0..NUM_PARTICLES)
            .map(|_| Particle::spawn(&mut rng, params.bounds))
            .collect();
        particles.push(Particle::cursor(&mut rng, params.bounds));

        let mut panel = ControlPanel::new();
        for group in MATRIX_SLIDERS.chunks(4) {
            for &(of, on, label) in group {
                panel.push(-100.0, 100.0, matrix[(of, on)], label);
            }
            panel.gap();
        }
        panel.push(0.1, 5.0, params.speed_mult, "Speed");
        panel.push(1.0, 20.0, params.radius, "Radius");
        panel.push(0.1, 2.0, params.restitution, "Restitution");
        panel.push(1.0, 100.0, params.force_mult, "Force strength");
        panel.push(0.0, 100.0, 20.0, "Trail fade");

        log::info!(
            "spawned {NUM_PARTICLES} particles plus cursor in {SIM_WIDTH}x{SIM_HEIGHT}"
        );

        Self {
            particles,
            matrix,
            params,
            panel,
            trails: TrailBuffer::new(TRAIL_FRAMES),
            panel_origin: pos2(SIM_WIDTH, 0.0),
            sim_rect: Rect::from_min_size(pos2(0.0, 0.0), vec2(SIM_WIDTH, SIM_HEIGHT)),
            sim_scale: 1.0,
        }
    }

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

    /// Pin the cursor particle to the pointer, clamped into the simulation
    /// area so it cannot hide under the control panel.
    fn drive_cursor(&mut self, ctx: &egui::Context) {
        let Some(screen_pos) = ctx.input(|input| input.pointer.latest_pos()) else {
            return;
        };
        let sim = (screen_pos - self.sim_rect.min) / self.sim_scale;
        let cursor = self
            .particles
            .last_mut()
            .expect("population always holds the cursor");
        cursor.pos = pos2(sim.x.clamp(0.0, SIM_WIDTH), sim.y);
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // --------------------------
        // Input and slider binding
        // --------------------------
        let events = Self::pointer_events(ctx);
        self.panel.handle_events(&events, self.panel_origin);

        for (idx, &(of, on, _)) in MATRIX_SLIDERS.iter().enumerate() {
            self.matrix[(of, on)] = self.panel.value(idx);
        }
        self.params.speed_mult = self.panel.value(SLIDER_SPEED);
        self.params.radius = self.panel.value(SLIDER_RADIUS);
        self.params.restitution = self.panel.value(SLIDER_RESTITUTION);
        self.params.force_mult = self.panel.value(SLIDER_FORCE);
        let trail_alpha = self.panel.value(SLIDER_TRAIL) as u8;

        self.drive_cursor(ctx);

        // --------------------------
        // Simulation step
        // --------------------------
        step(&mut self.particles, &self.matrix, &self.params);

        let visible = &self.particles[..self.particles.len() - 1];
        self.trails
            .push_frame(visible.iter().map(|p| (p.pos, p.color)).collect());
        let bodies: Vec<(Pos2, f32)> = visible.iter().map(|p| (p.pos, p.radius)).collect();
        let connected = neighbor_lists(&bodies, CONNECT_RANGE);

        // --------------------------
        // Control panel
        // --------------------------
        egui::SidePanel::right("controls")
            .exact_width(PANEL_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                self.panel_origin = ui.max_rect().min;
                self.panel.draw(ui.painter(), self.panel_origin);
            });

        // --------------------------
        // Simulation view
        // --------------------------
        egui::CentralPanel::default().show(ctx, |ui| {
            let painter = ui.painter();
            let rect = ui.max_rect();
            painter.rect_filled(rect, 0.0, Color32::BLACK);

            let scale = (rect.width() / SIM_WIDTH).min(rect.height() / SIM_HEIGHT);
            self.sim_rect = rect;
            self.sim_scale = scale;
            let to_screen = |p: Pos2| rect.min + (p.to_vec2() * scale);

            let visible = &self.particles[..self.particles.len() - 1];

            self.trails
                .draw(painter, to_screen, self.params.radius * scale, trail_alpha);

            for (i, near) in connected.iter().enumerate() {
                for &j in near {
                    if j > i {
                        draw_connector(
                            painter,
                            to_screen(visible[i].pos),
                            to_screen(visible[j].pos),
                            visible[i].color,
                            visible[j].color,
                        );
                    }
                }
            }

            for particle in visible {
                let center = to_screen(particle.pos);
                draw_glow(painter, center, particle.radius * scale, particle.color);
                painter.circle_filled(center, particle.radius * scale, particle.color);
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
            .with_inner_size([WINDOW_WIDTH, SIM_HEIGHT])
            .with_title("Particle life"),
        ..Default::default()
    };

    eframe::run_native(
        "Particle life",
        native_options,
        Box::new(|_cc| Ok(Box::new(LifeApp::new()))),
    )
}
