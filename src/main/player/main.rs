use colored::{Color, Colorize};
use log::{error, info};
use selflib::audio::CpalOutput;
use selflib::bands::{parse_button, Band, OctaveStep};
use selflib::config::TONE_DURATION_US;
use selflib::player::PlaybackController;
use selflib::settings::Settings;
use selflib::utils::{clear_terminal, init_logger, read_command};

fn band_color(band: Band) -> Color {
    match band {
        Band::InfraredRed => Color::TrueColor { r: 140, g: 0, b: 0 },
        Band::Red => Color::Red,
        Band::RedOrange => Color::TrueColor { r: 255, g: 80, b: 0 },
        Band::Orange => Color::TrueColor { r: 255, g: 150, b: 0 },
        Band::Yellow => Color::Yellow,
        Band::YellowGreen => Color::TrueColor { r: 170, g: 220, b: 0 },
        Band::Green => Color::Green,
        Band::GreenBlue => Color::Cyan,
        Band::Blue => Color::Blue,
        Band::BlueViolet => Color::TrueColor { r: 90, g: 60, b: 220 },
        Band::Violet => Color::Magenta,
        Band::UltravioletViolet => Color::TrueColor { r: 190, g: 120, b: 255 },
    }
}

fn print_panel() {
    println!("{}", "Light Player".bold());
    for band in Band::ALL {
        let buttons: Vec<String> = OctaveStep::ALL
            .iter()
            .map(|step| format!("{:>5} {:>5} Hz", band.button(*step), band.frequency(*step)))
            .collect();
        println!(
            "{:<20}{}",
            band.name().color(band_color(band)).bold(),
            buttons.join("   ")
        );
    }
    println!();
    println!("Type a button (e.g. O0) to press it, an empty line to release, 'list' or 'quit'.");
}

fn main() {
    init_logger();

    let settings = match Settings::get_default_settings() {
        Ok(settings) => settings,
        Err(e) => {
            error!("PLAYER: {}", e);
            eprintln!("{} {}", "No audio output:".red(), e);
            std::process::exit(1);
        }
    };
    let format = settings.get_format();
    let mut player = PlaybackController::new(CpalOutput::new(settings), format, TONE_DURATION_US);

    clear_terminal();
    print_panel();

    let mut held: Option<(Band, OctaveStep)> = None;
    while let Some(command) = read_command() {
        match command.as_str() {
            "" => match held.take() {
                Some((band, step)) => {
                    player.release(band, step);
                    println!("{} released", band.button(step));
                }
                None => println!("Nothing is held"),
            },
            "list" => print_panel(),
            "quit" | "exit" => break,
            label => match parse_button(label) {
                Some((band, step)) => match player.press(band, step) {
                    Ok(()) => {
                        held = Some((band, step));
                        let line = format!("{} {} Hz", band.button(step), band.frequency(step));
                        println!("{}", line.color(band_color(band)).bold());
                    }
                    Err(e) => {
                        held = None;
                        eprintln!("{} {}", "Playback failed:".red(), e);
                    }
                },
                None => println!("Not a button: {}", label),
            },
        }
    }

    player.stop();
    info!("PLAYER: Shutting down");
}
