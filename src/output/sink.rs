//! Line-oriented result and error sinks
//!
//! Each sink is one consumer task draining an unbounded channel into a writer,
//! one value per line. Producers never wait on the writer. Whatever is already
//! queued is written as a batch and flushed once the channel runs dry, so
//! output streams steadily during a long crawl without a syscall per line.

use crate::RippleError;
use std::fmt::Display;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Sending half held by task processing
pub type SinkSender<T> = UnboundedSender<T>;

/// A running sink consumer
///
/// The consumer stops once every `SinkSender` has been dropped; `finish`
/// waits for that and hands the writer back.
pub struct LineSink<W> {
    name: &'static str,
    handle: JoinHandle<std::io::Result<W>>,
}

impl<W> LineSink<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    /// Spawns a consumer writing every received value to `writer`
    pub fn spawn<T>(name: &'static str, writer: W) -> (SinkSender<T>, Self)
    where
        T: Display + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(drain(rx, writer));
        (tx, Self { name, handle })
    }

    /// Waits for the consumer to drain and returns the writer
    ///
    /// Only returns once all senders are gone, so callers must drop theirs
    /// first.
    pub async fn finish(self) -> Result<W, RippleError> {
        match self.handle.await {
            Ok(Ok(writer)) => Ok(writer),
            Ok(Err(e)) => {
                tracing::warn!("{} sink stopped early: {}", self.name, e);
                Err(RippleError::Sink(format!("{}: {}", self.name, e)))
            }
            Err(e) => Err(RippleError::Sink(format!("{}: {}", self.name, e))),
        }
    }
}

async fn drain<T, W>(mut rx: UnboundedReceiver<T>, writer: W) -> std::io::Result<W>
where
    T: Display,
    W: AsyncWrite + Unpin,
{
    let mut out = BufWriter::new(writer);

    while let Some(value) = rx.recv().await {
        out.write_all(render(value).as_bytes()).await?;
        while let Ok(value) = rx.try_recv() {
            out.write_all(render(value).as_bytes()).await?;
        }
        out.flush().await?;
    }

    out.flush().await?;
    Ok(out.into_inner())
}

fn render<T: Display>(value: T) -> String {
    format!("{}\n", value)
}
