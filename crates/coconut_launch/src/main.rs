use anyhow::Result;
use clap::Parser;
use coconut_launch::cli::LaunchArgs;
use coconut_launch::{
    ConfigTable, LaunchError, LaunchRequest, Launcher, LauncherSettings, SystemRunner, TrainedModel,
};

// Events on this target go to the log file only; stderr already shows the user message.
const REPORT_TARGET: &str = "coconut_launch::report";

fn main() -> Result<()> {
    let args = LaunchArgs::parse();

    std::fs::create_dir_all(&args.log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&args.log_dir, "coconut_launch.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::Layer;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer().with_filter(tracing_subscriber::filter::filter_fn(
                |meta| meta.target() != REPORT_TARGET,
            )),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    std::panic::set_hook(Box::new(|panic_info| {
        let payload = panic_info.payload();
        let msg = if let Some(s) = payload.downcast_ref::<&str>() {
            *s
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.as_str()
        } else {
            "Unknown panic"
        };

        let location = panic_info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        tracing::error!(target: "panic", "🔥 CRASH detected at {}: {}", location, msg);
        eprintln!("🔥 CRASH detected at {}: {}", location, msg);
    }));

    tracing::info!("🚀 coconut_launch started.");

    let result = launch(&args);
    if let Err(err) = &result {
        match err.log_detail() {
            Some(detail) => tracing::error!(target: REPORT_TARGET, "{} ({})", err, detail),
            None => tracing::error!(target: REPORT_TARGET, "{}", err),
        }
        eprintln!("{}", err.user_message());
        if let Some(hint) = err.remedy() {
            eprintln!("{}", hint);
        }
    }

    // process::exit skips destructors; flush the log file first
    drop(guard);

    if let Err(err) = result {
        std::process::exit(err.exit_code());
    }
    Ok(())
}

fn launch(args: &LaunchArgs) -> Result<Vec<TrainedModel>, LaunchError> {
    let settings = match &args.settings {
        Some(path) => {
            tracing::info!("Loading launcher settings from {}", path.display());
            LauncherSettings::load(path)?
        }
        None => LauncherSettings::default(),
    };
    let table = ConfigTable::standard()?;

    let mut launcher = Launcher::new(settings, table, SystemRunner);
    launcher.run(&LaunchRequest::from(args))
}
