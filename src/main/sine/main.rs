use std::env;
use std::time::Duration;
use log::error;
use selflib::audio::CpalOutput;
use selflib::config::TONE_DURATION_US;
use selflib::player::PlaybackController;
use selflib::settings::Settings;
use selflib::utils::init_logger;

const DEFAULT_SECONDS: u64 = 3;

fn main() {
    init_logger();

    let args: Vec<String> = env::args().collect();
    let Some(frequency) = args.get(1).and_then(|arg| arg.parse::<u32>().ok()) else {
        eprintln!("Usage: sine <frequency_hz> [seconds]");
        std::process::exit(2);
    };
    let seconds = args
        .get(2)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(DEFAULT_SECONDS);

    let settings = match Settings::get_default_settings() {
        Ok(settings) => settings,
        Err(e) => {
            error!("SINE: {}", e);
            std::process::exit(1);
        }
    };
    let format = settings.get_format();
    let mut player = PlaybackController::new(CpalOutput::new(settings), format, TONE_DURATION_US);

    if let Err(e) = player.press_frequency(frequency) {
        error!("SINE: {}", e);
        std::process::exit(1);
    }
    println!("Playing {} Hz for {} s", frequency, seconds);
    std::thread::sleep(Duration::from_secs(seconds));
    player.stop();
}
