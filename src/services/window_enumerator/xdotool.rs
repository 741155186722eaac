use crate::error::Result;
use crate::events::WindowTitle;
use crate::utils::{run_tool, run_tool_output};
use tracing::debug;

use super::backend::TitleBackend;

pub struct XdotoolEnumerator;

/// Идентификаторы окон из вывода `xdotool search`, по одному в строке
fn parse_window_ids(stdout: &str) -> Vec<&str> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
        .collect()
}

/// Заголовок из вывода `xdotool getwindowname`; пустой заголовок отбрасывается
fn parse_window_name(stdout: &str) -> Option<WindowTitle> {
    let title = stdout.trim_end_matches(['\r', '\n']);
    if title.is_empty() {
        None
    } else {
        Some(WindowTitle::from(title))
    }
}

impl XdotoolEnumerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl TitleBackend for XdotoolEnumerator {
    fn name(&self) -> &'static str {
        "xdotool"
    }

    async fn probe(&self) -> Result<()> {
        run_tool("xdotool", &["version"]).await.map(|_| ())
    }

    async fn enumerate(&self) -> Result<Vec<WindowTitle>> {
        let output = run_tool_output("xdotool", &["search", "--onlyvisible", "--name", "."]).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        // xdotool завершается с кодом 1, если ничего не нашёл
        if !output.status.success() && stdout.trim().is_empty() {
            debug!("xdotool не нашёл видимых окон");
            return Ok(Vec::new());
        }

        let mut titles = Vec::new();
        for window_id in parse_window_ids(&stdout) {
            // Окно могло закрыться между search и getwindowname
            match run_tool("xdotool", &["getwindowname", window_id]).await {
                Ok(name) => titles.extend(parse_window_name(&name)),
                Err(e) => debug!("xdotool getwindowname {} не удался: {}", window_id, e),
            }
        }

        Ok(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_window_ids_in_order() {
        let stdout = "65011713\n  71303175 \n\nDefaulting to search window name\n58720263\n";
        assert_eq!(parse_window_ids(stdout), vec!["65011713", "71303175", "58720263"]);
    }

    #[test]
    fn parses_window_name_keeping_inner_spaces() {
        assert_eq!(
            parse_window_name("foobar2000 - Song  Name [foobar2000 v2.1]\n"),
            Some(WindowTitle::from("foobar2000 - Song  Name [foobar2000 v2.1]"))
        );
        assert_eq!(parse_window_name("  padded  \r\n").unwrap().as_str(), "  padded  ");
    }

    #[test]
    fn empty_window_name_is_dropped() {
        assert_eq!(parse_window_name("\n"), None);
        assert_eq!(parse_window_name(""), None);
    }
}
