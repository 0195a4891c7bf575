use std::io::Write;
use chrono::Local;

/// Logger for the binaries; level comes from `RUST_LOG`, warnings by default.
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();
}

pub fn clear_terminal() {
    print!("\x1B[2J");
    let _ = std::io::stdout().flush();
}

/// Next trimmed line from stdin, `None` once input is closed.
pub fn read_command() -> Option<String> {
    let mut buffer = String::new();
    match std::io::stdin().read_line(&mut buffer) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buffer.trim().to_string()),
    }
}
