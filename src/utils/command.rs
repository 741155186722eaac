use crate::bridge_error;
use crate::error::Result;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::process::Output;
use tokio::process::Command;
use tracing::debug;

/// Окружение сессии не меняется за время работы процесса, поэтому `id -u` вызывается один раз
static ENV_OVERRIDES: Lazy<HashMap<String, String>> = Lazy::new(build_env_overrides);

/// Переменные окружения пользовательской сессии, если процесс запущен через sudo
fn build_env_overrides() -> HashMap<String, String> {
    let mut env_vars = HashMap::new();

    if std::env::var("USER").unwrap_or_default() == "root" {
        if let Ok(sudo_user) = std::env::var("SUDO_USER") {
            if let Ok(output) = std::process::Command::new("id").args(["-u", sudo_user.as_str()]).output() {
                if let Ok(uid_str) = String::from_utf8(output.stdout) {
                    let uid = uid_str.trim();
                    let user_runtime_dir = format!("/run/user/{}", uid);

                    debug!("Подставляем переменные окружения для пользователя {}: uid={}", sudo_user, uid);
                    env_vars.insert("XDG_RUNTIME_DIR".to_string(), user_runtime_dir);
                    env_vars.insert("USER".to_string(), sudo_user);
                }
            }
        }
    }

    if let Ok(display_var) = std::env::var("DISPLAY") {
        env_vars.insert("DISPLAY".to_string(), display_var);
    }

    env_vars
}

/// Запускает внешнюю утилиту и возвращает сырой результат без проверки кода возврата
pub async fn run_tool_output(program: &str, args: &[&str]) -> Result<Output> {
    let mut cmd = Command::new(program);
    cmd.args(args).kill_on_drop(true);

    for (key, value) in ENV_OVERRIDES.iter() {
        cmd.env(key, value);
    }

    cmd.output()
        .await
        .map_err(|e| bridge_error!(enumeration, "{} не найден: {}", program, e))
}

/// Запускает внешнюю утилиту и возвращает её stdout.
///
/// Ненулевой код возврата и отсутствие утилиты превращаются в `BridgeError::Enumeration`.
pub async fn run_tool(program: &str, args: &[&str]) -> Result<String> {
    let output = run_tool_output(program, args).await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("{} {:?} вернул ошибку: {}", program, args, stderr.trim());
        return Err(bridge_error!(enumeration, "{} вернул ошибку: {}", program, stderr.trim()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
