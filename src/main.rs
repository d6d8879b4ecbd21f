use clap::Parser;
use meal_planner::domain::ports::ConfigProvider;
use meal_planner::utils::error::ErrorSeverity;
use meal_planner::utils::logger;
use meal_planner::{CliConfig, LocalStorage, PlannerError, Session, SpoonacularClient};

async fn run(config: &CliConfig) -> Result<(), PlannerError> {
    let settings = config.resolve()?;
    tracing::debug!(
        "Using {} with data directory {}",
        settings.base_url(),
        settings.data_dir()
    );

    let provider = SpoonacularClient::new(&settings)?;
    let storage = LocalStorage::new(settings.data_dir().to_string());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(&settings, provider, storage, stdin.lock(), stdout.lock());
    session.run().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::info!("Starting meal-planner");

    if let Err(e) = run(&config).await {
        tracing::error!(
            "Session failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}
