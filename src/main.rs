use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
mod config;
mod error;
mod events;
mod host;
mod services;
mod utils;

use config::Config;
use services::title_filter::apply_filter;
use services::{create_display_sink, create_window_enumerator, CycleSettings, Monitor, UpdateCycle};

#[derive(Parser, Debug)]
#[command(name = "title-bridge")]
#[command(about = "Выводит отфильтрованный заголовок окна в текстовый источник оверлея")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "title-bridge.toml")]
    config: String,

    /// Режим сухого запуска (эмуляция окон, запись только в лог)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (по умолчанию из конфигурации)
    #[arg(long)]
    log_level: Option<String>,

    /// Показать описание и список настроек и выйти
    #[arg(long)]
    describe: bool,

    /// Один раз собрать текст по текущим окнам, вывести его и выйти
    #[arg(long)]
    once: bool,

    /// Применить префикс и правило фильтрации к заданному заголовку, вывести результат и выйти
    #[arg(long, value_name = "TITLE")]
    title: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.describe {
        print!("{}", host::describe());
        return Ok(());
    }

    // Загрузка конфигурации
    let config = Config::load(&args.config)?;

    // Инициализация системы логирования
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, &config.logging.format)?;

    info!("Запуск title-bridge v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {}", args.config);

    if let Some(title) = &args.title {
        println!("{}{}", config.monitor.prefix, apply_filter(title, &config.monitor.filter_rule));
        return Ok(());
    }

    if args.dry_run {
        warn!("Режим сухого запуска - реальные окна и источники не используются");
    }

    // Инициализация компонентов
    let enumerator = create_window_enumerator(&config.window, args.dry_run)?;
    let sink = create_display_sink(&config.sink, args.dry_run)?;
    let cycle = Arc::new(UpdateCycle::new(enumerator, sink));

    if args.once {
        let settings = CycleSettings::from_config(&config.monitor);
        println!("{}", cycle.compose_text(&settings).await);
        return Ok(());
    }

    let mut monitor = Monitor::new(cycle);
    monitor.reconfigure(&config.monitor);

    info!("Все компоненты инициализированы");

    run_until_shutdown(&mut monitor, &args.config).await;

    info!("Завершение работы...");
    monitor.shutdown();

    info!("title-bridge завершил работу");
    Ok(())
}

/// Перечитывает конфигурацию; при ошибке остаются прежние настройки
fn reload_config(monitor: &mut Monitor, config_path: &str) {
    match Config::load(config_path) {
        Ok(config) => {
            info!("Конфигурация перечитана из: {}", config_path);
            monitor.reconfigure(&config.monitor);
        }
        Err(e) => {
            error!("Не удалось перечитать конфигурацию, оставляем прежнюю: {:#}", e);
        }
    }
}

#[cfg(unix)]
async fn run_until_shutdown(monitor: &mut Monitor, config_path: &str) {
    use tokio::signal::unix::{signal as unix_signal, SignalKind};

    let mut hangup = match unix_signal(SignalKind::hangup()) {
        Ok(stream) => Some(stream),
        Err(e) => {
            warn!("SIGHUP недоступен, перечитывание конфигурации отключено: {}", e);
            None
        }
    };
    let mut terminate = unix_signal(SignalKind::terminate()).ok();

    loop {
        tokio::select! {
            result = signal::ctrl_c() => {
                match result {
                    Ok(()) => info!("Получен сигнал завершения (Ctrl+C)"),
                    Err(err) => error!("Ошибка при ожидании сигнала завершения: {}", err),
                }
                return;
            }
            Some(_) = async { terminate.as_mut()?.recv().await } => {
                info!("Получен сигнал завершения (SIGTERM)");
                return;
            }
            Some(_) = async { hangup.as_mut()?.recv().await } => {
                info!("Получен SIGHUP - перечитываем конфигурацию");
                reload_config(monitor, config_path);
            }
        }
    }
}

#[cfg(not(unix))]
async fn run_until_shutdown(_monitor: &mut Monitor, _config_path: &str) {
    match signal::ctrl_c().await {
        Ok(()) => info!("Получен сигнал завершения (Ctrl+C)"),
        Err(err) => error!("Ошибка при ожидании сигнала завершения: {}", err),
    }
}

fn init_tracing(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        "pretty" => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        _ => registry.with(tracing_subscriber::fmt::layer().compact()).init(),
    }

    Ok(())
}
