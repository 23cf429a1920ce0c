// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use arcade_board::{cli::{self, Command}, config::state::AppState, gui};
use eframe::egui::{ IconData, ViewportBuilder };
use image::{Rgba, RgbaImage};

/// Three rising bars on a rounded tile.
fn app_icon() -> IconData {
    const N: u32 = 64;
    let bg = Rgba([0x26, 0x32, 0x38, 0xff]);
    let bars = [
        (10, 36, Rgba([0x9e, 0x9e, 0x9e, 0xff])),
        (26, 20, Rgba([0xf0, 0xd2, 0x3c, 0xff])),
        (42, 8, Rgba([0x4c, 0xaf, 0x50, 0xff])),
    ];

    let img = RgbaImage::from_fn(N, N, |x, y| {
        let corner = |c: u32| c.min(N - 1 - c);
        if corner(x) + corner(y) < 6 {
            return Rgba([0, 0, 0, 0]);
        }
        for &(left, top, color) in &bars {
            if (left..left + 12).contains(&x) && (top..N - 8).contains(&y) {
                return color;
            }
        }
        bg
    });

    let (width, height) = img.dimensions();
    IconData { rgba: img.into_raw(), width, height }
}

fn main() {
    let mut state = AppState::default();
    match cli::parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(params)) => {
            state.options = params.options;
            state.gui.query = params.query;
        }
        Ok(Command::Help) => {
            eprintln!("{}", cli::HELP);
            return;
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_icon(app_icon())
            .with_inner_size([state.gui.window_w as f32, state.gui.window_h as f32]),
        ..Default::default()
    };

    if let Err(e) = gui::run(options, state) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
