use gridflow::{AnalysisRecorder, FlowMetrics, ImageExporter, SceneDescriptor, SimConfig, Simulation};
use std::path::{Path, PathBuf};

struct Options {
    command: Option<String>,
    scene: Option<String>,
    scene_file: Option<PathBuf>,
    config: Option<PathBuf>,
    frames: usize,
}

fn parse_args() -> Options {
    let mut options = Options {
        command: None,
        scene: None,
        scene_file: None,
        config: None,
        frames: 20,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--scene" => options.scene = args.next(),
            "--scene-file" => options.scene_file = args.next().map(PathBuf::from),
            "--config" => options.config = args.next().map(PathBuf::from),
            "--frames" => {
                if let Some(frames) = args.next().and_then(|f| f.parse().ok()) {
                    options.frames = frames;
                }
            }
            _ => options.command = Some(arg),
        }
    }
    options
}

fn load_scene(options: &Options) -> Result<SceneDescriptor, gridflow::SimError> {
    if let Some(path) = &options.scene_file {
        return SceneDescriptor::from_json_file(path);
    }
    match &options.scene {
        Some(name) => SceneDescriptor::by_name(name),
        None => Ok(SceneDescriptor::waterfall()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let options = parse_args();
    let config = match &options.config {
        Some(path) => SimConfig::from_json_file(path)?,
        None => SimConfig::default(),
    };

    match options.command.as_deref() {
        Some("test") => run_headless_test(&options, config)?,
        Some("scenes") => {
            for scene in gridflow::presets() {
                println!("{}", scene.to_json()?);
            }
        }
        _ => run_gui_app(&options, config)?,
    }

    Ok(())
}

fn run_headless_test(options: &Options, config: SimConfig) -> Result<(), Box<dyn std::error::Error>> {
    let scene = load_scene(options)?;
    println!(
        "Running headless scene `{}` ({}x{}) for {} frames...",
        scene.name, scene.cols, scene.rows, options.frames
    );

    let mut simulation = Simulation::with_config(scene, config)?;
    let exporter = ImageExporter::new(600, 600).with_particles(true);
    let mut recorder = AnalysisRecorder::new();

    recorder.record_frame(&simulation, 0);
    FlowMetrics::analyze(&simulation, 0).print_summary();
    exporter.export_color_png(&simulation, Path::new("test_frame_0000.png"))?;

    for frame in 1..=options.frames {
        simulation.step();
        recorder.record_frame(&simulation, frame);

        let color_path = format!("test_frame_{:04}.png", frame);
        let flow_path = format!("test_flow_{:04}.png", frame);
        exporter.export_color_png(&simulation, Path::new(&color_path))?;
        exporter.export_flow_png(&simulation, Path::new(&flow_path))?;

        if frame % 5 == 0 {
            FlowMetrics::analyze(&simulation, frame).print_summary();
        }
    }

    recorder.print_trends();
    simulation.shutdown();

    println!("Test completed! Generated {} frames.", options.frames + 1);
    Ok(())
}

fn run_gui_app(options: &Options, config: SimConfig) -> Result<(), Box<dyn std::error::Error>> {
    let scene = load_scene(options)?;
    let simulation = Simulation::with_config(scene, config)?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 900.0])
            .with_title("gridflow"),
        ..Default::default()
    };

    eframe::run_native(
        "gridflow",
        native_options,
        Box::new(|_cc| Box::new(gridflow::DesktopApp::new(simulation))),
    )?;
    Ok(())
}
