use tracing::{debug, error};
use logger_depot::cli::{build_cli, config_path, execute, parse_command};
use logger_depot::internal::config::AppConfig;
use logger_depot::LoggerDepot;

fn main() -> anyhow::Result<()> {
    // Parse command line arguments first
    let matches = build_cli().get_matches();
    let config = match AppConfig::load(config_path(&matches).as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    if let Err(e) = logger_depot::internal::logger::init_logger(&config.logging) {
        eprintln!("Failed to initialize logger: {}", e);
        std::process::exit(1);
    }

    debug!("Version: {}", logger_depot::internal::config::get_version_info());

    let command = parse_command(&matches)?;

    let depot = LoggerDepot::global();
    if let Err(e) = depot.populate(&config.loggers) {
        error!("Failed to build logger depot: {}", e);
        std::process::exit(1);
    }
    debug!("Depot holds {} loggers", depot.len());

    for line in execute(depot, &command)? {
        println!("{}", line);
    }
    Ok(())
}
