use std::process::ExitCode;

use haptic_chess::shell::{self, HELP};
use haptic_chess::{
    CloseSignal, Config, Error, GameSession, LogActuator, MoveSuggester, OnlineSuggester,
    RandomSuggester, StandardBoard, SuggesterKind,
};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    let code = runtime.block_on(run());
    // A pending stdin read would otherwise hold up shutdown.
    runtime.shutdown_background();
    code
}

async fn run() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let suggester: Box<dyn MoveSuggester> = match config.suggester {
        SuggesterKind::Online => Box::new(OnlineSuggester::from_config(&config)),
        SuggesterKind::Random => Box::new(RandomSuggester::new()),
    };
    log::info!("suggestions from {:?}, pulse unit {:?}", config.suggester, config.unit);

    let close = CloseSignal::new();
    let mut session = GameSession::new(
        StandardBoard::new(),
        &config,
        suggester,
        Box::new(LogActuator),
        close.clone(),
    );

    println!("{HELP}");
    let console = tokio::spawn(shell::run_console(
        tokio::io::BufReader::new(tokio::io::stdin()),
        session.sink(),
        close.clone(),
    ));

    let result = tokio::select! {
        result = session.run() => result,
        _ = tokio::signal::ctrl_c() => {
            log::info!("interrupted");
            close.close();
            Err(Error::Cancelled)
        }
    };
    console.abort();

    match result {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(Error::Cancelled) => {
            log::info!("session closed: {}", session.summary());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
