use std::path::Path;

use anyhow::Context as _;
use log::{error, info};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    event_loop::EventLoop,
    shutdown,
    tray::{self, ChannelTray, LogTray},
};

/// Serves the mail client on stdin/stdout until it goes away.
pub fn serve(manifest: &Path, extension_id: &str, config: &Config) -> anyhow::Result<()> {
    info!(
        "started by extension {extension_id} with manifest {}",
        manifest.display()
    );
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .build()
        .context("tokio runtime should be buildable")?;

    let result = rt.block_on(async {
        let shutdown_token = CancellationToken::new();
        let (menu_actions, menu_receiver) = mpsc::unbounded_channel();
        shutdown::listen(shutdown_token.clone(), menu_actions)
            .context("signal handlers should be installable")?;

        let (tray, updates) = ChannelTray::new();
        let backend = tokio::spawn(tray::drive(LogTray::new(config), updates));

        let event_loop = EventLoop::new(
            tokio::io::stdin(),
            tokio::io::stdout(),
            tray,
            menu_receiver,
            shutdown_token.clone(),
            config,
        );
        let exit = event_loop.run().await;
        shutdown_token.cancel();
        if let Err(e) = backend.await {
            error!("tray backend failed: {e}");
        }
        exit.context("connection to the mail client broke")
    });
    // stdin is read on a blocking thread that only returns with the next byte
    rt.shutdown_background();

    let exit = result.inspect_err(|e| error!("{e:#}"))?;
    info!("stopped: {exit}");
    Ok(())
}
