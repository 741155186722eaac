use crate::bridge_error;
use crate::error::Result;
use crate::events::WindowTitle;
use windows::core::BOOL;
use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowTextLengthW, GetWindowTextW, IsWindowVisible,
};

use super::backend::TitleBackend;

pub struct Win32Enumerator;

unsafe extern "system" fn collect_visible_title(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let titles = &mut *(lparam.0 as *mut Vec<WindowTitle>);

    if IsWindowVisible(hwnd).as_bool() {
        let length = GetWindowTextLengthW(hwnd);
        if length > 0 {
            let mut buffer = vec![0u16; length as usize + 1];
            let copied = GetWindowTextW(hwnd, &mut buffer);
            if copied > 0 {
                titles.push(WindowTitle::from(String::from_utf16_lossy(
                    &buffer[..copied as usize],
                )));
            }
        }
    }

    // Продолжаем перечисление
    BOOL::from(true)
}

impl Win32Enumerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl TitleBackend for Win32Enumerator {
    fn name(&self) -> &'static str {
        "win32"
    }

    async fn probe(&self) -> Result<()> {
        Ok(())
    }

    async fn enumerate(&self) -> Result<Vec<WindowTitle>> {
        let mut titles: Vec<WindowTitle> = Vec::new();

        unsafe {
            EnumWindows(
                Some(collect_visible_title),
                LPARAM(&mut titles as *mut Vec<WindowTitle> as isize),
            )
        }
        .map_err(|e| bridge_error!(enumeration, "EnumWindows вернул ошибку: {}", e))?;

        Ok(titles)
    }
}
