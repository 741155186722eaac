use crate::error::Result;
use crate::events::WindowTitle;
use crate::utils::run_tool;

use super::backend::TitleBackend;

pub struct WmctrlEnumerator;

/// Строка `wmctrl -l`: `<id> <desktop> <host> <title...>`
fn parse_line(line: &str) -> Option<&str> {
    let mut rest = line.trim_start();
    for _ in 0..3 {
        let end = rest.find(char::is_whitespace)?;
        rest = rest[end..].trim_start();
    }

    let title = rest.trim_end();
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

pub(super) fn parse_window_list(stdout: &str) -> Vec<WindowTitle> {
    stdout
        .lines()
        .filter_map(parse_line)
        .map(WindowTitle::from)
        .collect()
}

impl WmctrlEnumerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl TitleBackend for WmctrlEnumerator {
    fn name(&self) -> &'static str {
        "wmctrl"
    }

    async fn probe(&self) -> Result<()> {
        run_tool("wmctrl", &["-l"]).await.map(|_| ())
    }

    async fn enumerate(&self) -> Result<Vec<WindowTitle>> {
        let stdout = run_tool("wmctrl", &["-l"]).await?;
        Ok(parse_window_list(&stdout))
    }
}
