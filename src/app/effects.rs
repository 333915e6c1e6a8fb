use tracing::warn;

use crate::app::{Model, ToastLevel};

/// Perform side effects queued by [`update`](crate::app::update).
pub(super) fn run_pending_effects(model: &mut Model) {
    let Some(url) = model.take_external() else {
        return;
    };
    match open_external_link(&url) {
        Ok(()) => model.show_toast(ToastLevel::Info, format!("Opened {url}")),
        Err(err) => {
            warn!(url = %url, error = %err, "failed to open external link");
            model.show_toast(ToastLevel::Error, format!("Open failed: {err}"));
        }
    }
}

fn open_external_link(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()?
            .wait()?;
        Ok(())
    }
    #[cfg(target_os = "windows")]
    {
        use std::process::Stdio;
        std::process::Command::new("cmd")
            .args(["/C", "start", "", url])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        return Ok(());
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        use std::process::Stdio;
        std::process::Command::new("xdg-open")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?
            .wait()?;
        Ok(())
    }
}
