mod app;
mod glyph;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the exported code-structure graph document (JSON).
    #[arg(long)]
    graph: String,

    /// Initial theme: "dark" or "light".
    #[arg(long, default_value = "dark")]
    theme: String,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "codeglyph",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::GlyphApp::new(
                cc,
                args.graph.clone(),
                app::theme::Theme::by_name(&args.theme),
            )))
        }),
    )
}
