use crate::bridge_error;
use crate::error::Result;
use crate::events::WindowTitle;
use crate::utils::run_tool;
use serde_json::Value;

use super::backend::TitleBackend;

pub struct SwayEnumerator;

/// Обходит дерево `swaymsg -t get_tree` в порядке узлов и собирает видимые окна приложений
fn collect_visible(node: &Value, titles: &mut Vec<WindowTitle>) {
    let is_view = node.get("pid").is_some_and(|pid| !pid.is_null());
    let visible = node.get("visible").and_then(Value::as_bool).unwrap_or(false);

    if is_view && visible {
        if let Some(name) = node.get("name").and_then(Value::as_str) {
            if !name.is_empty() {
                titles.push(WindowTitle::from(name));
            }
        }
    }

    for key in ["nodes", "floating_nodes"] {
        if let Some(children) = node.get(key).and_then(Value::as_array) {
            for child in children {
                collect_visible(child, titles);
            }
        }
    }
}

pub(super) fn parse_tree(stdout: &str) -> Result<Vec<WindowTitle>> {
    let tree: Value = serde_json::from_str(stdout)
        .map_err(|e| bridge_error!(enumeration, "Не удалось разобрать дерево sway: {}", e))?;

    let mut titles = Vec::new();
    collect_visible(&tree, &mut titles);
    Ok(titles)
}

impl SwayEnumerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl TitleBackend for SwayEnumerator {
    fn name(&self) -> &'static str {
        "sway"
    }

    async fn probe(&self) -> Result<()> {
        run_tool("swaymsg", &["-t", "get_version"]).await.map(|_| ())
    }

    async fn enumerate(&self) -> Result<Vec<WindowTitle>> {
        let stdout = run_tool("swaymsg", &["-t", "get_tree"]).await?;
        parse_tree(&stdout)
    }
}
