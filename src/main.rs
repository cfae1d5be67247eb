use anyhow::Context;
use clap::Parser;
use small_arcade::app::console::{ScriptedConsole, StdConsole};
use small_arcade::domain::ports::Console;
use small_arcade::utils::{error::ArcadeError, logger, validation::Validate};
use small_arcade::{build_session, ArcadeConfig, ArcadeEngine, CliConfig, Command, Game};

fn report_failure(e: &ArcadeError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let mut config = match ArcadeConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            report_failure(&e);
        }
    };

    // 初始化日誌
    if config.logging.format == "json" {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::info!("Starting arcade CLI");
    tracing::debug!("CLI config: {:?}", cli);

    // 命令列參數優先於設定檔
    if let Some(seed) = cli.seed {
        config.general.seed = Some(seed);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        report_failure(&e);
    }

    let game = match cli.command {
        Command::ShowConfig => {
            print!("{}", config.to_masked_toml_string()?);
            return Ok(());
        }
        Command::Battle => Game::Battle,
        Command::Atm => Game::Atm,
        Command::Donations => Game::Donations,
        Command::Guessing => Game::Guessing,
        Command::Hangman => Game::Hangman,
    };

    let mut console: Box<dyn Console> = match &cli.script {
        Some(path) => {
            let script = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read input script `{}`", path))?;
            tracing::info!("📜 Replaying {} input lines from {}", script.lines().count(), path);
            Box::new(ScriptedConsole::from_script(&script).echoing())
        }
        None => Box::new(StdConsole::new()),
    };

    let session = match build_session(game, &config, cli.export) {
        Ok(session) => session,
        Err(e) => report_failure(&e),
    };
    let mut engine = ArcadeEngine::new(session);

    if let Err(e) = engine.run(console.as_mut()).await {
        report_failure(&e);
    }

    Ok(())
}
