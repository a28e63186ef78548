use anyhow::Result;
use hyperspace::{init_tracing, SdkConfig};
use hyperspace_avax_sdk::bin_common::{load_config_from_env, parse_args, ConfigType, QueryCommand, USAGE};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let mut args = parse_args();
    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return Ok(());
    }

    let config_type = match ConfigType::from_args(&mut args) {
        Ok(config_type) => config_type,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let invocation = match QueryCommand::parse(&args) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    // Missing default config falls back to defaults + environment
    let config_path = load_config_from_env(&config_type);
    let config = if config_path.exists() || config_type.is_required() {
        SdkConfig::load(&config_path)?
    } else {
        info!("No config at {}, using defaults", config_path.display());
        SdkConfig::from_env()?
    };
    config.log();

    let client = config.query_client();
    let response = invocation
        .command
        .run(&client, invocation.pagination)
        .await?;

    println!("{}", serde_json::to_string_pretty(&response.data)?);
    Ok(())
}
