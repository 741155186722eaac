use crate::bridge_error;
use crate::config::WindowConfig;
use crate::error::{BridgeError, Result};
use crate::events::WindowTitle;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use super::backend::TitleBackend;
use super::r#trait::WindowEnumerator;
use super::sway::SwayEnumerator;
#[cfg(windows)]
use super::win32::Win32Enumerator;
use super::wmctrl::WmctrlEnumerator;
use super::xdotool::XdotoolEnumerator;

/// Пауза перед повторным определением метода, если ни один не сработал
pub const REDETECT_BACKOFF: Duration = Duration::from_secs(10);

enum Strategy {
    Fixed(Arc<dyn TitleBackend>),
    Auto(Vec<Arc<dyn TitleBackend>>),
}

#[derive(Debug, Default)]
struct AutoState {
    // Индекс первого сработавшего кандидата
    working: Option<usize>,
    retry_at: Option<Instant>,
    // Последнее определение закончилось неудачей; повторные неудачи не шумят в логе
    detection_failed: bool,
}

pub struct RealWindowEnumerator {
    strategy: Strategy,
    state: Mutex<AutoState>,
}

impl RealWindowEnumerator {
    pub fn new(config: &WindowConfig) -> Result<Self> {
        info!("Инициализация RealWindowEnumerator (режим: {})", config.detection_mode);

        let enumerator = match config.detection_mode.as_str() {
            "auto" => Self::auto(Self::auto_candidates()),
            "wmctrl" => Self::fixed(Arc::new(WmctrlEnumerator::new())),
            "xdotool" => Self::fixed(Arc::new(XdotoolEnumerator::new())),
            "sway" => Self::fixed(Arc::new(SwayEnumerator::new())),
            #[cfg(windows)]
            "win32" => Self::fixed(Arc::new(Win32Enumerator::new())),
            other => {
                return Err(bridge_error!(internal, "Неизвестный режим детекции: {}", other));
            }
        };

        Ok(enumerator)
    }

    /// Фиксированный способ перечисления без определения
    pub fn fixed(backend: Arc<dyn TitleBackend>) -> Self {
        Self::with_strategy(Strategy::Fixed(backend))
    }

    /// Определение первого работающего способа из `candidates` в указанном порядке
    pub fn auto(candidates: Vec<Arc<dyn TitleBackend>>) -> Self {
        Self::with_strategy(Strategy::Auto(candidates))
    }

    fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            state: Mutex::new(AutoState::default()),
        }
    }

    #[cfg(windows)]
    fn auto_candidates() -> Vec<Arc<dyn TitleBackend>> {
        vec![Arc::new(Win32Enumerator::new())]
    }

    #[cfg(not(windows))]
    fn auto_candidates() -> Vec<Arc<dyn TitleBackend>> {
        vec![
            Arc::new(WmctrlEnumerator::new()),
            Arc::new(XdotoolEnumerator::new()),
            Arc::new(SwayEnumerator::new()),
        ]
    }

    async fn detect_working_method(&self, candidates: &[Arc<dyn TitleBackend>]) -> Result<usize> {
        {
            let state = self.state.lock();
            if let Some(index) = state.working {
                return Ok(index);
            }
            if let Some(retry_at) = state.retry_at {
                if Instant::now() < retry_at {
                    return BridgeError::enumeration("Рабочий метод перечисления окон не найден");
                }
            }
        }

        let repeated = self.state.lock().detection_failed;
        if repeated {
            debug!("Повторно определяем рабочий метод перечисления окон...");
        } else {
            info!("Определяем рабочий метод перечисления окон...");
        }

        for (index, backend) in candidates.iter().enumerate() {
            match backend.probe().await {
                Ok(()) => {
                    info!("Используем {}", backend.name());
                    *self.state.lock() = AutoState {
                        working: Some(index),
                        ..AutoState::default()
                    };
                    return Ok(index);
                }
                Err(e) => debug!("{} недоступен: {}", backend.name(), e),
            }
        }

        {
            let mut state = self.state.lock();
            state.retry_at = Some(Instant::now() + REDETECT_BACKOFF);
            state.detection_failed = true;
        }
        if repeated {
            debug!("Ни один метод перечисления окон по-прежнему не работает");
        } else {
            error!(
                "Ни один метод перечисления окон не работает, повтор через {:?}",
                REDETECT_BACKOFF
            );
        }

        BridgeError::enumeration("Ни один метод перечисления окон не работает")
    }

    async fn enumerate_auto(&self, candidates: &[Arc<dyn TitleBackend>]) -> Result<Vec<WindowTitle>> {
        let index = self.detect_working_method(candidates).await?;
        let backend = &candidates[index];

        match backend.enumerate().await {
            Ok(titles) => Ok(titles),
            Err(e) => {
                warn!(
                    "Рабочий метод {} перестал работать: {}. Переопределяем на следующем тике",
                    backend.name(),
                    e
                );
                self.state.lock().working = None;
                Err(e)
            }
        }
    }
}

#[async_trait::async_trait]
impl WindowEnumerator for RealWindowEnumerator {
    async fn enumerate_visible_titles(&self) -> Result<Vec<WindowTitle>> {
        let mut titles = match &self.strategy {
            Strategy::Auto(candidates) => self.enumerate_auto(candidates).await?,
            Strategy::Fixed(backend) => backend.enumerate().await?,
        };

        titles.retain(|title| !title.is_empty());
        Ok(titles)
    }
}
