// src/exec/drainer.rs

//! Stream draining for child process output.
//!
//! Each [`StreamDrainer`] owns one pipe and one private buffer and reads the
//! pipe until end-of-stream in its own Tokio task. A [`DrainSet`] groups the
//! drainers of one invocation and acts as the completion barrier: its
//! [`DrainSet::wait`] only returns once every drainer has reported back and
//! its task has been joined.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::types::{CaptureMode, StreamKind};

/// One line (including its `\n`, if any) read from a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedLine {
    pub stream: StreamKind,
    pub bytes: Vec<u8>,
}

/// Everything a drainer captured from its stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrainOutput {
    pub stream: StreamKind,
    pub bytes: Vec<u8>,
    pub lines: usize,

    /// Set when the drain stopped before end-of-stream (read error or
    /// cancellation).
    pub error: Option<String>,
}

impl DrainOutput {
    fn empty(stream: StreamKind) -> Self {
        Self {
            stream,
            bytes: Vec::new(),
            lines: 0,
            error: None,
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Read `reader` to end-of-stream into a fresh buffer.
///
/// - Lines are split on `\n` but kept byte-for-byte, so non UTF-8 data and a
///   missing trailing newline survive.
/// - A read error stops the drain; bytes read so far are kept.
/// - When `tee` is given every line is also forwarded there, tagged with
///   `stream`.
/// - When `cancel` flips to `true` the drain stops early. A closed `cancel`
///   channel is ignored.
pub async fn drain<R>(
    stream: StreamKind,
    reader: R,
    tee: Option<&mpsc::UnboundedSender<TaggedLine>>,
    mut cancel: watch::Receiver<bool>,
) -> DrainOutput
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut out = DrainOutput::empty(stream);
    let mut line = Vec::new();

    loop {
        line.clear();

        let read = tokio::select! {
            res = reader.read_until(b'\n', &mut line) => res,
            // Only `true` is ever sent, so any change means stop.
            Ok(()) = cancel.changed() => {
                // Partially read bytes are already in `line`.
                keep_partial(&mut out, tee, &line);
                out.error = Some("drain cancelled before end-of-stream".to_string());
                debug!(%stream, lines = out.lines, "drain cancelled");
                break;
            }
        };

        match read {
            Ok(0) => break,
            Ok(_) => {
                debug!(%stream, "{}", String::from_utf8_lossy(&line).trim_end());
                out.lines += 1;
                out.bytes.extend_from_slice(&line);
                if let Some(tx) = tee {
                    let _ = tx.send(TaggedLine {
                        stream,
                        bytes: line.clone(),
                    });
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                keep_partial(&mut out, tee, &line);
            }
            Err(e) => {
                keep_partial(&mut out, tee, &line);
                warn!(%stream, error = %e, "read error while draining; keeping partial output");
                out.error = Some(e.to_string());
                break;
            }
        }
    }

    out
}

fn keep_partial(
    out: &mut DrainOutput,
    tee: Option<&mpsc::UnboundedSender<TaggedLine>>,
    partial: &[u8],
) {
    if partial.is_empty() {
        return;
    }
    out.bytes.extend_from_slice(partial);
    if let Some(tx) = tee {
        let _ = tx.send(TaggedLine {
            stream: out.stream,
            bytes: partial.to_vec(),
        });
    }
}

/// Handle to a drainer running in its own Tokio task.
pub struct StreamDrainer {
    stream: StreamKind,
    handle: JoinHandle<()>,
}

impl StreamDrainer {
    /// Start draining `reader`. The captured [`DrainOutput`] is sent on
    /// `done_tx` once the drain ends.
    pub fn spawn<R>(
        stream: StreamKind,
        reader: R,
        done_tx: mpsc::Sender<DrainOutput>,
        tee: Option<mpsc::UnboundedSender<TaggedLine>>,
        cancel: watch::Receiver<bool>,
    ) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let output = drain(stream, reader, tee.as_ref(), cancel).await;
            // Close the tee before reporting so the merged channel is
            // complete once every drainer has reported.
            drop(tee);
            debug!(%stream, bytes = output.bytes.len(), lines = output.lines, "drain finished");
            let _ = done_tx.send(output).await;
        });

        Self { stream, handle }
    }
}

/// Result of waiting on a [`DrainSet`].
#[derive(Debug, Default)]
pub struct Drained {
    /// Per-stream outputs in the order the drainers finished.
    pub outputs: Vec<DrainOutput>,

    /// All lines in arrival order, only in [`CaptureMode::Interleaved`].
    pub merged: Option<Vec<TaggedLine>>,

    /// True if drainers had to be cancelled after the grace period.
    pub cancelled: bool,
}

impl Drained {
    pub fn output_for(&self, stream: StreamKind) -> Option<&DrainOutput> {
        self.outputs.iter().find(|o| o.stream == stream)
    }

    /// Concatenate captured text according to the capture mode.
    ///
    /// Each stream is decoded on its own, so a truncated multi-byte sequence
    /// at the end of one stream never fuses with bytes of the other.
    pub fn combined_output(&self) -> String {
        match self.merged {
            Some(ref lines) => {
                let mut stdout = Vec::new();
                let mut stderr = Vec::new();
                let mut text = String::new();
                // Decode runs of consecutive lines from the same stream.
                for line in lines {
                    let (run, other) = match line.stream {
                        StreamKind::Stdout => (&mut stdout, &mut stderr),
                        StreamKind::Stderr => (&mut stderr, &mut stdout),
                    };
                    if !other.is_empty() {
                        text.push_str(&String::from_utf8_lossy(other));
                        other.clear();
                    }
                    run.extend_from_slice(&line.bytes);
                }
                text.push_str(&String::from_utf8_lossy(&stdout));
                text.push_str(&String::from_utf8_lossy(&stderr));
                text
            }
            None => self.outputs.iter().map(DrainOutput::text).collect(),
        }
    }
}

/// The drainers of one invocation plus their completion barrier.
pub struct DrainSet {
    done_tx: Option<mpsc::Sender<DrainOutput>>,
    done_rx: mpsc::Receiver<DrainOutput>,
    tee_tx: Option<mpsc::UnboundedSender<TaggedLine>>,
    tee_rx: Option<mpsc::UnboundedReceiver<TaggedLine>>,
    cancel_tx: watch::Sender<bool>,
    drainers: Vec<StreamDrainer>,
}

impl DrainSet {
    pub fn new(capture: CaptureMode) -> Self {
        // Capacity covers both streams, so reporting never blocks a drainer.
        let (done_tx, done_rx) = mpsc::channel(2);
        let (tee_tx, tee_rx) = match capture {
            CaptureMode::Interleaved => {
                let (tx, rx) = mpsc::unbounded_channel();
                (Some(tx), Some(rx))
            }
            CaptureMode::Completion => (None, None),
        };
        let (cancel_tx, _) = watch::channel(false);

        Self {
            done_tx: Some(done_tx),
            done_rx,
            tee_tx,
            tee_rx,
            cancel_tx,
            drainers: Vec::new(),
        }
    }

    /// Start a drainer for `reader`.
    pub fn start<R>(&mut self, stream: StreamKind, reader: R)
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let Some(ref done_tx) = self.done_tx else {
            warn!(%stream, "drain set already waited on; ignoring stream");
            return;
        };

        self.drainers.push(StreamDrainer::spawn(
            stream,
            reader,
            done_tx.clone(),
            self.tee_tx.clone(),
            self.cancel_tx.subscribe(),
        ));
    }

    /// Block until every drainer has reached end-of-stream and its task has
    /// been joined.
    ///
    /// With `grace = Some(d)`, drainers still running after `d` are cancelled
    /// (keeping what they captured) and then joined.
    pub async fn wait(mut self, grace: Option<Duration>) -> Drained {
        // Only the drainers' own senders remain, so `recv` yields `None` once
        // they are all gone, even if one panicked.
        self.done_tx.take();
        self.tee_tx.take();

        let expected = self.drainers.len();
        let mut outputs = Vec::with_capacity(expected);
        let mut cancelled = false;

        let timed_out = {
            let collect = collect_outputs(&mut self.done_rx, &mut outputs, expected);
            match grace {
                Some(limit) => tokio::time::timeout(limit, collect).await.is_err(),
                None => {
                    collect.await;
                    false
                }
            }
        };

        if timed_out {
            warn!(
                pending = expected - outputs.len(),
                "drainers still running after grace period; cancelling"
            );
            cancelled = true;
            let _ = self.cancel_tx.send(true);
            collect_outputs(&mut self.done_rx, &mut outputs, expected).await;
        }

        for drainer in std::mem::take(&mut self.drainers) {
            let stream = drainer.stream;
            if let Err(e) = drainer.handle.await {
                warn!(%stream, error = %e, "drainer task did not complete cleanly");
                if !outputs.iter().any(|o| o.stream == stream) {
                    let mut lost = DrainOutput::empty(stream);
                    lost.error = Some(e.to_string());
                    outputs.push(lost);
                }
            }
        }

        let merged = match self.tee_rx.take() {
            Some(mut rx) => {
                let mut lines = Vec::new();
                while let Some(line) = rx.recv().await {
                    lines.push(line);
                }
                Some(lines)
            }
            None => None,
        };

        Drained {
            outputs,
            merged,
            cancelled,
        }
    }
}

impl Drop for DrainSet {
    fn drop(&mut self) {
        // Only reached with drainers left if the owning future was dropped
        // before `wait` finished.
        for drainer in &self.drainers {
            drainer.handle.abort();
        }
    }
}

async fn collect_outputs(
    rx: &mut mpsc::Receiver<DrainOutput>,
    outputs: &mut Vec<DrainOutput>,
    expected: usize,
) {
    while outputs.len() < expected {
        match rx.recv().await {
            Some(output) => outputs.push(output),
            None => break,
        }
    }
}
