use clap::Parser;
use rrbctl::cli::{self, Command};
use rrbctl::core::config::{self, StartupLog};
use rrbctl::device::HttpTransport;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "rrbctl", about = "Control panel for a RasPiRobot Board V3 server")]
struct Args {
    /// Device base URL, e.g. http://raspberrypi.local:8080
    #[arg(short, long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let mut startup = StartupLog::new();
    let file_config = match config::load_config(&mut startup) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(&file_config, args.url.as_deref(), &mut startup);

    // Initialize file logger; stdout belongs to the panel or command output
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }
    startup.replay();

    log::info!("rrbctl starting against {}", resolved.base_url);

    let command = args.command.unwrap_or(Command::Panel);
    match command {
        Command::Panel => match rrbctl::tui::run(&resolved) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Terminal error: {e}");
                ExitCode::FAILURE
            }
        },
        Command::Ping => cli::run_ping(&HttpTransport::new(resolved.base_url)).await,
        other => match other.as_action() {
            Some((kind, inputs)) => {
                let transport = Arc::new(HttpTransport::new(resolved.base_url));
                cli::run_action(transport, kind, &inputs).await
            }
            None => ExitCode::FAILURE,
        },
    }
}
