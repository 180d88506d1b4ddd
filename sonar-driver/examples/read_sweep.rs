use clap::Parser;
use log::error;
use sonar_driver::{available_ports, run_driver, SonarConfig, SonarError};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "Sonar sweep receiver.", about = "Reads sweeps from an ultrasonic sonar.")]
struct Args {
    /// The device path to a serial port. Defaults to the first port found.
    port: Option<String>,
    #[arg(long, default_value_t = 115200)]
    baud_rate: u32,
    /// Display ceiling in centimeters
    #[arg(long, default_value_t = 50.)]
    max_range: f64,
    /// Print each snapshot as JSON instead of a summary
    #[arg(long)]
    json: bool,
    #[arg(long, default_value_t = 200)]
    interval_ms: u64,
}

fn select_port(args: &Args) -> Result<String, SonarError> {
    if let Some(port) = &args.port {
        return Ok(port.clone());
    }
    available_ports()?
        .into_iter()
        .next()
        .ok_or_else(|| SonarError::InvalidConfiguration("no serial port available".to_string()))
}

fn run(args: Args) -> Result<(), SonarError> {
    let port_name = select_port(&args)?;
    let config = SonarConfig::new(&port_name)
        .with_baud_rate(args.baud_rate)
        .with_max_range(args.max_range);
    let (acquisition, view) = run_driver(&config)?;

    while !acquisition.is_finished() {
        std::thread::sleep(Duration::from_millis(args.interval_ms));
        if args.json {
            match serde_json::to_string(&view.polar_points()) {
                Ok(json) => println!("{json}"),
                Err(e) => error!("{e}"),
            }
        } else if let Some(latest) = view.latest() {
            println!(
                "Sweep #{}: {} points. Angle: {:.1} deg, Distance: {:.1} cm",
                view.sweep_index(),
                view.len(),
                latest.angle,
                latest.distance
            );
        }
    }

    acquisition.stop()
}

fn main() {
    env_logger::init();
    if let Err(e) = run(Args::parse()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
