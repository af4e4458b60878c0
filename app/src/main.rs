use anyhow::anyhow;
use clap::Parser;
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints};
use std::{
    f64::consts::TAU,
    time::{Duration, Instant},
};
use superpose_core::{
    AxisConfig, ChartRenderer, Curve, LineWeight, SurfaceId,
};
use superpose_interactive::{Config, ControlEvent, Session};

#[derive(Parser)]
#[command(name = "superpose")]
struct Args {
    #[arg(long, default_value_t = 1280)]
    width: u32,
    #[arg(long, default_value_t = 800)]
    height: u32,
    /// Delay between progressive-animation steps in milliseconds.
    #[arg(long, default_value_t = 800)]
    step_delay_ms: u64,
    /// Initial time span in periods.
    #[arg(long, default_value_t = 2.0)]
    duration: f64,
}

/// Retained curves for one plot surface. `axes: None` means the surface has
/// been purged and draws nothing.
#[derive(Default)]
struct SurfacePlot {
    grid: Vec<f64>,
    curves: Vec<Curve>,
    axes: Option<AxisConfig>,
}

/// Adapts the retained render/purge calls of [`ChartRenderer`] to egui's
/// immediate mode: the session replaces these buffers whenever it redraws and
/// every frame paints whatever they currently hold.
#[derive(Default)]
struct SurfaceBuffers {
    individual: SurfacePlot,
    combined: SurfacePlot,
}

impl SurfaceBuffers {
    fn surface_mut(&mut self, surface: SurfaceId) -> &mut SurfacePlot {
        match surface {
            SurfaceId::Individual => &mut self.individual,
            SurfaceId::Combined => &mut self.combined,
        }
    }
}

impl ChartRenderer for SurfaceBuffers {
    fn render(
        &mut self,
        surface: SurfaceId,
        grid: &[f64],
        curves: &[Curve],
        axes: &AxisConfig,
    ) {
        let surface = self.surface_mut(surface);
        surface.grid = grid.to_vec();
        surface.curves = curves.to_vec();
        surface.axes = Some(axes.clone());
    }

    fn purge(&mut self, surface: SurfaceId) {
        *self.surface_mut(surface) = SurfacePlot::default();
    }
}

fn line_width(weight: LineWeight) -> f32 {
    match weight {
        LineWeight::Normal => 2.0,
        LineWeight::Emphasized => 4.0,
    }
}

fn show_surface(ui: &mut egui::Ui, id: &str, surface: &SurfacePlot, height: f32) {
    let Some(axes) = &surface.axes else {
        return;
    };
    ui.label(egui::RichText::new(&axes.title).strong());
    Plot::new(id.to_string())
        .legend(Legend::default())
        .height(height)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_label(axes.x_title.clone())
        .y_axis_label(axes.y_title.clone())
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [0.0, axes.y_range.0],
                [axes.x_max, axes.y_range.1],
            ));
            for curve in &surface.curves {
                let points: PlotPoints = surface
                    .grid
                    .iter()
                    .zip(&curve.samples)
                    .map(|(&t, &y)| [t, y])
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(&curve.name)
                        .width(line_width(curve.weight)),
                );
            }
        });
}

struct App {
    session: Session,
    buffers: SurfaceBuffers,
}

impl App {
    fn new(config: Config) -> Self {
        Self {
            session: Session::new(config),
            buffers: SurfaceBuffers::default(),
        }
    }

    fn handle(&mut self, event: ControlEvent) {
        self.session.handle(event, &mut self.buffers);
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Controls");
        let mut sliders = self.session.sliders();
        if ui
            .add(
                egui::Slider::new(&mut sliders.amplitude, 0.0..=10.0)
                    .text("Amplitude"),
            )
            .changed()
        {
            self.handle(ControlEvent::SetAmplitude(sliders.amplitude));
        }
        if ui
            .add(
                egui::Slider::new(&mut sliders.frequency_hz, 0.1..=10.0)
                    .text("Frequency (Hz)"),
            )
            .changed()
        {
            self.handle(ControlEvent::SetFrequency(sliders.frequency_hz));
        }
        if ui
            .add(
                egui::Slider::new(&mut sliders.phase_rads, 0.0..=TAU)
                    .text("Phase (rad)"),
            )
            .changed()
        {
            self.handle(ControlEvent::SetPhase(sliders.phase_rads));
        }
        if ui
            .add(
                egui::Slider::new(&mut sliders.duration, 1.0..=10.0)
                    .text("Periods"),
            )
            .changed()
        {
            self.handle(ControlEvent::SetDuration(sliders.duration));
        }
        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Add").clicked() {
                self.handle(ControlEvent::Add);
            }
            if ui.button("Delete selected").clicked() {
                self.handle(ControlEvent::DeleteSelected);
            }
            if ui.button("Clear").clicked() {
                self.handle(ControlEvent::Clear);
            }
            if ui.button("Animate").clicked() {
                self.handle(ControlEvent::Animate);
            }
        });
        ui.separator();
        ui.heading("Signals");
        let selected = self.session.registry().selected_index();
        for (index, label) in
            self.session.selector_labels().into_iter().enumerate()
        {
            if ui.selectable_label(selected == Some(index), label).clicked() {
                self.handle(ControlEvent::Select(index));
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        if let Some(deadline) = self.session.tick(now, &mut self.buffers) {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
        egui::SidePanel::left("controls").show(ctx, |ui| self.controls(ui));
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.registry().is_empty()
                && !self.session.is_animating()
            {
                ui.weak("No signals yet. Set the sliders and press Add.");
                return;
            }
            let plot_height = (ui.available_height() / 2.0) - 24.0;
            show_surface(ui, "individual", &self.buffers.individual, plot_height);
            show_surface(ui, "combined", &self.buffers.combined, plot_height);
        });
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!(
        "starting superpose ({}x{}, step delay {}ms)",
        args.width,
        args.height,
        args.step_delay_ms
    );
    let config = Config {
        step_delay: Duration::from_millis(args.step_delay_ms),
        initial_duration: args.duration,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([args.width as f32, args.height as f32]),
        ..Default::default()
    };
    eframe::run_native(
        "Superpose",
        options,
        Box::new(move |_cc| Ok(Box::new(App::new(config)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
