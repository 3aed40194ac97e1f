//! The AT channel: a single-owner event loop multiplexing one cooperative
//! command/response exchange with any number of unsolicited indications.
//!
//! The loop owns the write half of the byte stream and all command and
//! indication state. At each iteration it awaits one of: the next framed
//! line, cancellation of the active command, or a periodic tick. Line
//! classification runs in this order:
//!
//! 1. An active indication absorbs the line.
//! 2. With a command active, the line may still start an indication; lines an
//!    indication consumes are never attributed to the command. Otherwise the
//!    line feeds the command (a terminator resolves it).
//! 3. Idle lines either start an indication or are dropped.
//!
//! After each iteration, if no command is active, one queued command is
//! dequeued non-blockingly and written out: request plus `\r\n`, unless the
//! request already ends with ctrl-Z (`0x1A`) or ESC (`0x1B`) -- the PDU
//! terminators used by `AT+CMGS` -- in which case it goes out verbatim.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use tetralib_core::{Error, Requester, Result};

use crate::command::{ActiveCommand, QueuedCommand};
use crate::indication::{find_indication, Indication, IndicationConfig, IndicationHandler};
use crate::reader::read_lines;

/// How long a caller waits for a slot in the sending queue.
const SEND_QUEUE_TIMEOUT: Duration = Duration::from_millis(500);
/// Periodic wakeup of the channel loop.
const TICK_INTERVAL: Duration = Duration::from_millis(100);
/// Back-off between retries in [`AtChannel::clear_syntax_errors`].
const SYNTAX_ERROR_RETRY: Duration = Duration::from_millis(200);

/// The syntax-error line the terminal produces while it is still flushing a
/// half-received command.
const CME_ERROR_SYNTAX: &str = "+CME ERROR: 35";

type IndicationRegistry = Arc<RwLock<HashMap<String, IndicationConfig>>>;

/// Handle to the AT transport multiplexer.
///
/// Created with [`AtChannel::new`], which spawns the reader and loop tasks.
/// The handle is shared by reference; all commands funnel through its single
/// queue, and at most one command is in flight at any time.
pub struct AtChannel {
    commands: mpsc::Sender<QueuedCommand>,
    indications: IndicationRegistry,
    closed: CancellationToken,
}

impl AtChannel {
    /// Wrap a bidirectional byte stream and start the transport tasks.
    ///
    /// Must be called from within a tokio runtime. The stream's read half is
    /// handed to the line-reader task; the write half is owned by the channel
    /// loop.
    pub fn new<S>(stream: S) -> Self
    where
        S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
    {
        let (read_half, write_half) = tokio::io::split(stream);
        let lines = read_lines(read_half);
        let (command_tx, command_rx) = mpsc::channel(1);
        let indications: IndicationRegistry = Arc::new(RwLock::new(HashMap::new()));
        let closed = CancellationToken::new();

        tokio::spawn(run_loop(
            write_half,
            lines,
            command_rx,
            Arc::clone(&indications),
            closed.clone(),
        ));

        AtChannel {
            commands: command_tx,
            indications,
            closed,
        }
    }

    /// Register an unsolicited indication.
    ///
    /// `prefix` is matched case-insensitively against the beginning of each
    /// line; `trailing_lines` further lines belong to the indication. The
    /// handler receives `trailing_lines + 1` lines in arrival order.
    pub fn add_indication<F>(&self, prefix: &str, trailing_lines: usize, handler: F)
    where
        F: Fn(Vec<String>) + Send + Sync + 'static,
    {
        let config = IndicationConfig {
            prefix: prefix.to_uppercase(),
            trailing_lines,
            handler: Arc::new(handler) as IndicationHandler,
        };
        self.indications
            .write()
            .expect("indication registry poisoned")
            .insert(config.prefix.clone(), config);
    }

    /// Submit one AT request and await its disposition.
    ///
    /// Returns the accumulated data lines on `OK` (possibly empty), the
    /// verbatim error line as [`Error::Command`], [`Error::Cancelled`] when
    /// `token` fires, or [`Error::QueueTimeout`] when the command cannot be
    /// enqueued within the sending-queue timeout.
    pub async fn at(&self, token: &CancellationToken, request: &str) -> Result<Vec<String>> {
        let (respond, mut response) = oneshot::channel();
        let queued = QueuedCommand {
            request: request.to_string(),
            token: token.clone(),
            respond,
        };

        tokio::select! {
            biased;

            _ = token.cancelled() => return Err(Error::Cancelled),
            sent = self.commands.send_timeout(queued, SEND_QUEUE_TIMEOUT) => match sent {
                Ok(()) => {}
                Err(mpsc::error::SendTimeoutError::Timeout(_)) => return Err(Error::QueueTimeout),
                Err(mpsc::error::SendTimeoutError::Closed(_)) => return Err(Error::Closed),
            },
        }

        tokio::select! {
            _ = token.cancelled() => Err(Error::Cancelled),
            disposition = &mut response => match disposition {
                Ok(result) => result,
                // The loop dropped the command: either the caller's token
                // fired or the stream closed underneath us.
                Err(_) if token.is_cancelled() => Err(Error::Cancelled),
                Err(_) => Err(Error::Closed),
            },
        }
    }

    /// Issue a sequence of requests, short-circuiting on the first failure.
    ///
    /// The error names the request that failed.
    pub async fn ats<I, S>(&self, token: &CancellationToken, requests: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for request in requests {
            let request = request.as_ref();
            if let Err(e) = self.at(token, request).await {
                return Err(Error::CommandFailed {
                    request: request.to_string(),
                    source: Box::new(e),
                });
            }
        }
        Ok(())
    }

    /// Repeatedly issue `AT` until the terminal accepts it.
    ///
    /// While the terminal is still flushing a half-received command it
    /// answers `+CME ERROR: 35`; that exact line triggers a retry after a
    /// short back-off. Any other error aborts.
    pub async fn clear_syntax_errors(&self, token: &CancellationToken) -> Result<()> {
        loop {
            match self.at(token, "AT").await {
                Ok(_) => return Ok(()),
                Err(Error::Command(line)) if line == CME_ERROR_SYNTAX => {
                    debug!("terminal still reports a syntax error, retrying");
                    tokio::time::sleep(SYNTAX_ERROR_RETRY).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Whether the channel has shut down (the byte stream ended).
    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    /// Wait until the channel has shut down.
    pub async fn closed(&self) {
        self.closed.cancelled().await
    }
}

#[async_trait]
impl Requester for AtChannel {
    async fn request(&self, token: &CancellationToken, request: &str) -> Result<Vec<String>> {
        self.at(token, request).await
    }
}

async fn run_loop<W>(
    mut writer: W,
    mut lines: mpsc::Receiver<String>,
    mut commands: mpsc::Receiver<QueuedCommand>,
    indications: IndicationRegistry,
    closed: CancellationToken,
) where
    W: AsyncWrite + Unpin,
{
    debug!("entering AT channel loop");

    let mut active_command: Option<ActiveCommand> = None;
    let mut active_indication: Option<Indication> = None;
    let mut tick = tokio::time::interval(TICK_INTERVAL);
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        let cancellation = active_command.as_ref().map(|cmd| cmd.token.clone());
        let command_active = cancellation.is_some();

        tokio::select! {
            received = lines.recv() => {
                let Some(line) = received else {
                    debug!("line sequence ended");
                    break;
                };
                trace!(line = %line, "rx");

                if let Some(indication) = active_indication.as_mut() {
                    if indication.add_line(&line) {
                        active_indication = None;
                    }
                } else {
                    // Look the template up under the lock, dispatch outside
                    // it so handlers may register further indications.
                    let matched = {
                        let registry =
                            indications.read().expect("indication registry poisoned");
                        find_indication(&registry, &line)
                    };
                    match (matched, active_command.as_mut()) {
                        // A matching line starts an indication even while a
                        // command is active; it is never attributed to the
                        // command.
                        (Some(config), _) => active_indication = config.start(&line),
                        (None, Some(command)) => {
                            if command.add_line(&line) {
                                active_command = None;
                            }
                        }
                        (None, None) => trace!(line = %line, "dropping unclassified line"),
                    }
                }
            }
            _ = async move { cancellation.unwrap().cancelled().await }, if command_active => {
                debug!("active command cancelled");
                active_command = None;
            }
            _ = tick.tick() => {}
        }

        if active_command.is_none() {
            if let Ok(queued) = commands.try_recv() {
                if queued.request.is_empty() {
                    continue;
                }
                write_request(&mut writer, &queued.request).await;
                active_command = Some(ActiveCommand::new(queued));
            }
        }
    }

    closed.cancel();
    debug!("exiting AT channel loop");
}

/// Frame and write one outgoing request.
///
/// Writer failures are logged and otherwise ignored; the disconnect surfaces
/// through the read side.
async fn write_request<W>(writer: &mut W, request: &str)
where
    W: AsyncWrite + Unpin,
{
    let mut tx_bytes = Vec::with_capacity(request.len() + 2);
    tx_bytes.extend_from_slice(request.as_bytes());
    let last = *tx_bytes.last().expect("empty requests are filtered out");
    if last != 0x1A && last != 0x1B {
        tx_bytes.extend_from_slice(b"\r\n");
    }

    trace!(bytes = tx_bytes.len(), "tx");
    if let Err(e) = writer.write_all(&tx_bytes).await {
        warn!(error = %e, "write failed, awaiting read-side disconnect");
        return;
    }
    if let Err(e) = writer.flush().await {
        warn!(error = %e, "flush failed");
    }
}
