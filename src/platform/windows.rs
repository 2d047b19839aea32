use std::io;

use windows_sys::Win32::Foundation::INVALID_HANDLE_VALUE;
use windows_sys::Win32::System::Console::{
    GetConsoleMode, GetStdHandle, SetConsoleMode, CONSOLE_MODE, ENABLE_PROCESSED_OUTPUT,
    ENABLE_VIRTUAL_TERMINAL_PROCESSING, STD_OUTPUT_HANDLE,
};

use super::PlatformError;

pub(super) fn enable_virtual_terminal() -> Result<(), PlatformError> {
    // SAFETY: the handle comes from GetStdHandle and is only passed back to
    // console APIs; `mode` outlives the call that writes it.
    unsafe {
        let handle = GetStdHandle(STD_OUTPUT_HANDLE);
        if handle.is_null() || handle == INVALID_HANDLE_VALUE {
            return Err(PlatformError::NoConsole);
        }

        let mut mode: CONSOLE_MODE = 0;
        if GetConsoleMode(handle, &mut mode) == 0 {
            return Err(PlatformError::QueryMode(io::Error::last_os_error()));
        }

        let wanted = mode | ENABLE_PROCESSED_OUTPUT | ENABLE_VIRTUAL_TERMINAL_PROCESSING;
        if wanted != mode && SetConsoleMode(handle, wanted) == 0 {
            return Err(PlatformError::SetMode(io::Error::last_os_error()));
        }
    }

    tracing::debug!("Virtual terminal processing enabled");
    Ok(())
}
