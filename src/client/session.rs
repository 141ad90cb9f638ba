//! Client Session
//!
//! Dials the server, then runs a reader thread alongside the console loop.

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;

use crate::config::{Config, DisconnectPolicy};
use crate::error::{Result, SockError};
use crate::protocol::{is_quit, read_line, write_line};

/// Console prompt shown before every input line
pub const PROMPT: &str = "请输入消息 (输入quit退出): ";

/// How a session finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// User typed a quit token (or the console hit EOF)
    Quit,

    /// The server went away first
    Disconnected,
}

/// Echo client
pub struct Client {
    config: Config,
}

impl Client {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Dial `config.server_addr`.
    ///
    /// Fails with [`SockError::Dial`] before any I/O happens.
    pub fn connect(&self) -> Result<Session> {
        let addr = &self.config.server_addr;
        let stream = TcpStream::connect(addr).map_err(|source| SockError::Dial {
            addr: addr.clone(),
            source,
        })?;
        stream.set_nodelay(self.config.nodelay)?;
        stream.set_read_timeout(self.config.read_timeout())?;
        stream.set_write_timeout(self.config.write_timeout())?;

        tracing::info!("已连接到服务器: {}", addr);

        Ok(Session {
            stream,
            config: self.config.clone(),
        })
    }
}

/// One connected session. Owns the stream until [`Session::run`] returns.
pub struct Session {
    stream: TcpStream,
    config: Config,
}

impl Session {
    /// Run the session until the user quits or the server disconnects.
    ///
    /// Server lines and the prompt both go to `output`; console lines come
    /// from `input`. Under [`DisconnectPolicy::ExitProcess`] a server
    /// disconnect terminates the process from the reader thread and this
    /// call never returns.
    pub fn run<R, W>(self, mut input: R, output: W) -> Result<SessionEnd>
    where
        R: BufRead,
        W: Write + Send + 'static,
    {
        let output = Arc::new(Mutex::new(output));
        let closing = Arc::new(AtomicBool::new(false));
        let (disconnect_tx, disconnect_rx) = channel::bounded(1);

        let reader = spawn_reader(
            self.stream.try_clone()?,
            Arc::clone(&output),
            Arc::clone(&closing),
            self.config.disconnect_policy,
            disconnect_tx,
        )?;

        let mut writer = BufWriter::new(self.stream.try_clone()?);
        let end = self.foreground(&mut input, &mut writer, &output, &closing, &disconnect_rx)?;

        // From here on an EOF on the reader is expected
        closing.store(true, Ordering::SeqCst);
        let how = match end {
            // let the reader drain the farewell, then see the server's close
            SessionEnd::Quit => Shutdown::Write,
            SessionEnd::Disconnected => Shutdown::Both,
        };
        if let Err(e) = self.stream.shutdown(how) {
            tracing::debug!("Shutdown after session end: {}", e);
        }

        if reader.join().is_err() {
            tracing::warn!("Reader thread panicked");
        }

        Ok(end)
    }

    fn foreground<R, W>(
        &self,
        input: &mut R,
        writer: &mut BufWriter<TcpStream>,
        output: &Mutex<W>,
        closing: &AtomicBool,
        disconnected: &Receiver<()>,
    ) -> Result<SessionEnd>
    where
        R: BufRead,
        W: Write,
    {
        loop {
            if disconnected.try_recv().is_ok() {
                return Ok(SessionEnd::Disconnected);
            }

            let prompted = {
                let mut out = output.lock();
                out.write_all(PROMPT.as_bytes()).and_then(|()| out.flush())
            };
            if let Err(e) = prompted {
                // no console to talk to; tear down like a quit
                tracing::warn!("Console output failed: {}", e);
                return Ok(SessionEnd::Quit);
            }

            let line = match read_line(input) {
                Ok(Some(line)) => line,
                Ok(None) => {
                    tracing::debug!("Console closed, ending session");
                    "quit".to_string()
                }
                Err(e) => {
                    tracing::warn!("读取输入失败: {}", e);
                    "quit".to_string()
                }
            };
            let text = line.trim();
            let quitting = is_quit(text);
            if quitting {
                // the server closes right after the farewell
                closing.store(true, Ordering::SeqCst);
            }

            if let Err(e) = write_line(writer, text) {
                tracing::warn!("发送消息失败: {}", e);
                return Ok(SessionEnd::Disconnected);
            }

            if quitting {
                return Ok(SessionEnd::Quit);
            }

            thread::sleep(self.config.input_pace());
        }
    }
}

fn spawn_reader<W>(
    stream: TcpStream,
    output: Arc<Mutex<W>>,
    closing: Arc<AtomicBool>,
    policy: DisconnectPolicy,
    disconnected: Sender<()>,
) -> Result<JoinHandle<()>>
where
    W: Write + Send + 'static,
{
    let handle = thread::Builder::new()
        .name("client-reader".to_string())
        .spawn(move || {
            let mut reader = BufReader::new(stream);
            loop {
                let reason = match read_line(&mut reader) {
                    Ok(Some(line)) => {
                        let mut out = output.lock();
                        let _ = out.write_all(line.as_bytes());
                        if !line.ends_with('\n') {
                            let _ = out.write_all(b"\n");
                        }
                        let _ = out.flush();
                        continue;
                    }
                    Ok(None) => "EOF".to_string(),
                    Err(e) => e.to_string(),
                };

                if closing.load(Ordering::SeqCst) {
                    return;
                }

                {
                    let mut out = output.lock();
                    let _ = writeln!(out, "与服务器的连接断开: {}", reason);
                    let _ = out.flush();
                }

                match policy {
                    DisconnectPolicy::ExitProcess => std::process::exit(0),
                    DisconnectPolicy::Notify => {
                        // fail the foreground's next write instead of letting it land
                        if let Err(e) = reader.get_ref().shutdown(Shutdown::Both) {
                            tracing::debug!("Shutdown after disconnect: {}", e);
                        }
                        let _ = disconnected.send(());
                        return;
                    }
                }
            }
        })?;

    Ok(handle)
}
