use crate::config::MonitorConfig;
use crate::debug_if_enabled;
use crate::services::update_cycle::{CycleSettings, UpdateCycle};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::info;

/// Период обновления текста
pub const UPDATE_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Stopped,
    Running,
}

/// Планировщик цикла обновления.
///
/// Держит снимок настроек и не более одной периодической задачи. Реконфигурация
/// всегда сначала останавливает задачу, затем запускает новую со свежим снимком.
pub struct Monitor {
    cycle: Arc<UpdateCycle>,
    period: Duration,
    settings: Arc<CycleSettings>,
    task: Option<JoinHandle<()>>,
}

impl Monitor {
    pub fn new(cycle: Arc<UpdateCycle>) -> Self {
        Self::with_period(cycle, UPDATE_INTERVAL)
    }

    pub fn with_period(cycle: Arc<UpdateCycle>, period: Duration) -> Self {
        Self {
            cycle,
            period,
            settings: Arc::new(CycleSettings::default()),
            task: None,
        }
    }

    #[allow(dead_code)]
    pub fn state(&self) -> MonitorState {
        if self.task.is_some() {
            MonitorState::Running
        } else {
            MonitorState::Stopped
        }
    }

    #[allow(dead_code)]
    pub fn settings(&self) -> &CycleSettings {
        &self.settings
    }

    /// Применяет новые настройки целиком
    pub fn reconfigure(&mut self, config: &MonitorConfig) {
        self.stop();

        self.settings = Arc::new(CycleSettings::from_config(config));
        info!(
            "Реконфигурация: enabled={}, источник='{}', ключевое слово='{}', правило='{}'",
            self.settings.enabled,
            self.settings.source_name,
            self.settings.keyword,
            self.settings.rule.source()
        );

        if self.settings.should_run() {
            self.start();
        }
    }

    pub fn shutdown(&mut self) {
        self.stop();
    }

    fn start(&mut self) {
        let cycle = Arc::clone(&self.cycle);
        let settings = Arc::clone(&self.settings);
        let period = self.period;

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            // Тики не накапливаются, если перечисление окон затянулось
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                let outcome = cycle.tick(&settings).await;
                debug_if_enabled!("Тик: {}", outcome);
            }
        });

        self.task = Some(handle);
        info!("Обновление запущено с периодом {:?}", period);
    }

    fn stop(&mut self) {
        if let Some(handle) = self.task.take() {
            handle.abort();
            info!("Обновление остановлено");
        }
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        self.stop();
    }
}
