use std::fmt::Display;

use futures::{SinkExt as _, StreamExt as _};
use log::{debug, error, info, warn};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    sync::mpsc,
};
use tokio_util::{
    codec::{FramedRead, FramedWrite},
    sync::CancellationToken,
};

use crate::{
    config::Config,
    notification::{NotificationStateMachine, Outcome, StateUpdate},
    protocol::{ACKNOWLEDGEMENT, Event, FrameCodec, FrameError},
    tray::{MenuAction, Tray},
};

/// Why the event loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The mail client closed its end of the pipe.
    PeerClosed,
    /// The mail client sent a `quit` event.
    QuitEvent,
    /// A termination signal arrived.
    Terminated,
    /// The user chose "Quit" in the tray menu.
    QuitMenu,
}

impl Display for Exit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Exit::PeerClosed => write!(f, "mail client closed the connection"),
            Exit::QuitEvent => write!(f, "mail client quit"),
            Exit::Terminated => write!(f, "termination requested"),
            Exit::QuitMenu => write!(f, "quit from tray menu"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Running,
    Draining(Exit),
    Stopped(Exit),
}

#[derive(Debug, Clone, Copy)]
struct Options {
    reset_menu: bool,
    quit_menu: bool,
    log_payloads: bool,
}

/// Reads events from the mail client one frame at a time, keeps the tray in
/// sync and acknowledges every processed event.
pub struct EventLoop<R, W, T> {
    frames: FramedRead<R, FrameCodec>,
    acknowledgements: FramedWrite<W, FrameCodec>,
    machine: NotificationStateMachine,
    tray: T,
    menu_actions: mpsc::UnboundedReceiver<MenuAction>,
    shutdown: CancellationToken,
    options: Options,
    state: LoopState,
}

impl<R, W, T> EventLoop<R, W, T>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    T: Tray,
{
    pub fn new(
        reader: R,
        writer: W,
        tray: T,
        menu_actions: mpsc::UnboundedReceiver<MenuAction>,
        shutdown: CancellationToken,
        config: &Config,
    ) -> Self {
        Self {
            frames: FramedRead::new(reader, FrameCodec::default()),
            acknowledgements: FramedWrite::new(writer, FrameCodec::default()),
            machine: NotificationStateMachine::new(config),
            tray,
            menu_actions,
            shutdown,
            options: Options {
                reset_menu: MenuAction::Reset.is_enabled(config),
                quit_menu: MenuAction::Quit.is_enabled(config),
                log_payloads: config.log_payloads(),
            },
            state: LoopState::Running,
        }
    }

    /// Runs until the mail client goes away or shutdown is requested.
    ///
    /// A framing error is returned as it leaves the stream without trustworthy
    /// message boundaries. All other errors only drop the affected message.
    pub async fn run(mut self) -> Result<Exit, FrameError> {
        info!("waiting for events");
        let initial = self.machine.current().clone();
        self.forward(&initial);
        loop {
            match self.state {
                LoopState::Running => {
                    if let Err(e) = self.step().await {
                        error!("message boundaries lost: {e}");
                        self.tray.shutdown();
                        return Err(e);
                    }
                }
                LoopState::Draining(exit) => {
                    info!("shutting down: {exit}");
                    self.tray.shutdown();
                    self.state = LoopState::Stopped(exit);
                }
                LoopState::Stopped(exit) => return Ok(exit),
            }
        }
    }

    async fn step(&mut self) -> Result<(), FrameError> {
        tokio::select! {
            biased;
            () = self.shutdown.cancelled() => {
                self.state = LoopState::Draining(Exit::Terminated);
            }
            Some(action) = self.menu_actions.recv() => self.handle_menu_action(action),
            frame = self.frames.next() => match frame {
                None => self.state = LoopState::Draining(Exit::PeerClosed),
                Some(Ok(payload)) => self.handle_frame(&payload).await?,
                Some(Err(e)) => return Err(e),
            },
        }
        Ok(())
    }

    async fn handle_frame(&mut self, payload: &[u8]) -> Result<(), FrameError> {
        if self.options.log_payloads {
            debug!("received {}", String::from_utf8_lossy(payload));
        }
        let event = match Event::from_payload(payload) {
            Ok(event) => event,
            Err(e) => {
                error!("dropping message: {e}: {}", error_source(&e));
                return Ok(());
            }
        };
        match self.machine.apply(&event) {
            Ok(Outcome::Update(update)) => {
                self.forward(&update);
                self.acknowledge().await
            }
            Ok(Outcome::Quit) => {
                self.acknowledge().await?;
                self.state = LoopState::Draining(Exit::QuitEvent);
                Ok(())
            }
            Err(e) => {
                warn!("ignoring {} event: {e}: {}", event.name(), error_source(&e));
                Ok(())
            }
        }
    }

    fn handle_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::Reset if self.options.reset_menu => {
                let update = self.machine.reset();
                self.forward(&update);
            }
            MenuAction::Quit if self.options.quit_menu => {
                self.state = LoopState::Draining(Exit::QuitMenu);
            }
            _ => warn!("ignoring disabled menu action {action:?}"),
        }
    }

    fn forward(&mut self, update: &StateUpdate) {
        if let Err(e) = self.tray.apply(update) {
            error!("tray did not accept {update}: {e}");
        }
    }

    async fn acknowledge(&mut self) -> Result<(), FrameError> {
        self.acknowledgements.send(ACKNOWLEDGEMENT).await
    }
}

fn error_source(error: &dyn std::error::Error) -> String {
    error
        .source()
        .map_or_else(String::new, ToString::to_string)
}
