use crate::bridge_error;
use crate::error::Result;
use crate::trace_if_enabled;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::r#trait::{DisplaySink, SinkHandle};
use super::settings::{SinkSettings, TEXT_FIELD};

/// Текстовые источники как файлы `<directory>/<name>.txt`.
///
/// Источник существует, только если файл уже создан; приложение записи читает его
/// в режиме "read from file".
pub struct FileSink {
    directory: PathBuf,
}

impl FileSink {
    pub fn new(directory: PathBuf) -> Result<Self> {
        info!("Инициализация FileSink в каталоге {:?}", directory);

        if !directory.is_dir() {
            warn!("Каталог источников {:?} не существует, источники не будут найдены до его создания", directory);
        }

        Ok(Self { directory })
    }

    fn path_for(&self, name: &str) -> Option<PathBuf> {
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\']);

        if valid {
            Some(self.directory.join(format!("{}.txt", name)))
        } else {
            None
        }
    }
}

impl DisplaySink for FileSink {
    fn resolve(&self, name: &str) -> Option<Box<dyn SinkHandle>> {
        let Some(path) = self.path_for(name) else {
            warn!("Недопустимое имя источника: '{}'", name);
            return None;
        };

        if !path.is_file() {
            debug!("Файл источника {:?} не найден", path);
            return None;
        }

        Some(Box::new(FileSinkHandle {
            name: name.to_string(),
            path,
        }))
    }
}

struct FileSinkHandle {
    name: String,
    path: PathBuf,
}

impl FileSinkHandle {
    fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

impl SinkHandle for FileSinkHandle {
    fn name(&self) -> &str {
        &self.name
    }

    fn settings(&self) -> Result<SinkSettings> {
        let text = fs::read_to_string(&self.path)?;
        let mut settings = SinkSettings::new();
        settings.set_string(TEXT_FIELD, text);
        Ok(settings)
    }

    fn update(&mut self, settings: &SinkSettings) -> Result<()> {
        // Пишем во временный файл рядом и переименовываем, чтобы читатель не увидел половину строки
        let mut temp = tempfile::NamedTempFile::new_in(self.directory())?;
        temp.write_all(settings.text().as_bytes())?;
        temp.flush()?;
        temp.persist(&self.path)
            .map_err(|e| bridge_error!(sink, "Не удалось заменить {:?}: {}", self.path, e.error))?;
        Ok(())
    }
}

impl Drop for FileSinkHandle {
    fn drop(&mut self) {
        trace_if_enabled!("Источник '{}' освобождён", self.name);
    }
}
