use crate::error::Result;
use crate::events::WindowTitle;

/// Один способ получить список окон: утилита командной строки или API системы
#[async_trait::async_trait]
pub trait TitleBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Быстрая проверка, что способ работает в текущей сессии
    async fn probe(&self) -> Result<()>;

    async fn enumerate(&self) -> Result<Vec<WindowTitle>>;
}
