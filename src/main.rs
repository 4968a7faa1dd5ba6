use clap::Parser;
use eframe::egui;

use statepainter::app::StatePainterApp;
use statepainter::cli::CliArgs;
use statepainter::{log_info, logger};

fn main() -> Result<(), eframe::Error> {
    let args = CliArgs::parse();

    // Session log (overwrites the previous session's log)
    logger::init();
    log_info!("starting (map: {:?}, export: {:?})", args.map, args.export);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1800.0, 1000.0])
            .with_title("State Painter"),
        ..Default::default()
    };

    eframe::run_native(
        "State Painter",
        options,
        Box::new(move |cc| Box::new(StatePainterApp::new(cc, args))),
    )
}
