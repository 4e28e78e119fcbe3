//! Line relay from the child's stdout.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::io::{
    self, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};

/// Longest run of bytes buffered before it is written out, newline or not.
pub const MAX_CHUNK_BYTES: usize = 64 * 1024;

/// Copy `reader` to `sink` one line at a time until EOF.
///
/// Each line is written with a single `\n` terminator (a trailing `\r` is
/// dropped) and flushed immediately. A line longer than [`MAX_CHUNK_BYTES`]
/// is written in chunks of at most that size. `relayed` counts completed
/// lines as they are written, so it stays meaningful if the task is aborted.
///
/// If the sink fails, the rest of the stream is still drained so the child
/// never blocks on a full pipe; the first sink error is returned once the
/// stream ends.
pub async fn relay_lines<R, W>(reader: R, mut sink: W, relayed: Arc<AtomicU64>) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut chunk = Vec::with_capacity(8 * 1024);
    let mut mid_line = false;
    let mut sink_error = None;

    loop {
        chunk.clear();
        let read = (&mut reader)
            .take(MAX_CHUNK_BYTES as u64)
            .read_until(b'\n', &mut chunk)
            .await?;

        let complete = if read == 0 {
            if !mid_line {
                break;
            }
            // Unterminated last line
            chunk.push(b'\n');
            true
        } else if chunk.last() == Some(&b'\n') {
            terminate(&mut chunk);
            true
        } else {
            false
        };
        mid_line = !complete;

        if sink_error.is_none() {
            match write_chunk(&mut sink, &chunk).await {
                Ok(()) if complete => {
                    relayed.fetch_add(1, Ordering::Relaxed);
                }
                Ok(()) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Output sink failed, discarding remaining child output");
                    sink_error = Some(e);
                }
            }
        }

        if read == 0 {
            break;
        }
    }

    match sink_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

async fn write_chunk<W: AsyncWrite + Unpin>(sink: &mut W, chunk: &[u8]) -> io::Result<()> {
    sink.write_all(chunk).await?;
    sink.flush().await
}

fn terminate(line: &mut Vec<u8>) {
    line.pop();
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    line.push(b'\n');
}
