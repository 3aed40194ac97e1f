//! Line framing for the incoming byte stream.
//!
//! The terminal terminates lines with `\r\n` but the PEI specification only
//! guarantees the `\n`; stray control bytes (most notably the `\r`) are
//! dropped. Empty lines between frames are suppressed so downstream
//! classification never sees them.

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tracing::debug;

const READ_BUFFER_SIZE: usize = 1024;

/// Spawn the read loop on `reader` and return the resulting line sequence.
///
/// The channel is single-slot buffered: the reader task suspends until the
/// consumer has taken the previous line. It closes when the stream reaches
/// end-of-stream or fails, after emitting any final partial line.
pub fn read_lines<R>(reader: R) -> mpsc::Receiver<String>
where
    R: AsyncRead + Send + Unpin + 'static,
{
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(read_loop(reader, tx));
    rx
}

async fn read_loop<R>(mut reader: R, lines: mpsc::Sender<String>)
where
    R: AsyncRead + Unpin,
{
    debug!("entering read loop");

    let mut buf = [0u8; READ_BUFFER_SIZE];
    let mut current_line: Vec<u8> = Vec::with_capacity(READ_BUFFER_SIZE);

    loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                debug!(error = %e, "read error");
                break;
            }
        };

        for &b in &buf[..n] {
            match b {
                b'\n' => {
                    if current_line.is_empty() {
                        continue;
                    }
                    let line = String::from_utf8_lossy(&current_line).into_owned();
                    current_line.clear();
                    if lines.send(line).await.is_err() {
                        debug!("line consumer dropped, exiting read loop");
                        return;
                    }
                }
                b if b < b' ' => continue,
                _ => current_line.push(b),
            }
        }
    }

    if !current_line.is_empty() {
        let _ = lines
            .send(String::from_utf8_lossy(&current_line).into_owned())
            .await;
    }

    debug!("exiting read loop");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn close_ends_sequence() {
        let (device, stream) = tetralib_test_harness::mock_device();
        let (read_half, _write_half) = tokio::io::split(stream);
        let mut lines = read_lines(read_half);

        device.close();

        assert!(lines.recv().await.is_none());
    }

    #[tokio::test]
    async fn frames_lines_with_embedded_crs_and_empties() {
        let (mut device, stream) = tetralib_test_harness::mock_device();
        let (read_half, _write_half) = tokio::io::split(stream);
        let mut lines = read_lines(read_half);

        device.feed(b"hello\r\n\nworld").await;

        assert_eq!(lines.recv().await.unwrap(), "hello");

        // The trailing partial line is only emitted once the stream closes.
        device.close();
        assert_eq!(lines.recv().await.unwrap(), "world");
        assert!(lines.recv().await.is_none());
    }

    #[tokio::test]
    async fn drops_control_bytes_inside_lines() {
        let (mut device, stream) = tetralib_test_harness::mock_device();
        let (read_half, _write_half) = tokio::io::split(stream);
        let mut lines = read_lines(read_half);

        device.feed(b"he\x01l\x08lo\r\n").await;

        assert_eq!(lines.recv().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn suppresses_runs_of_empty_lines() {
        let (mut device, stream) = tetralib_test_harness::mock_device();
        let (read_half, _write_half) = tokio::io::split(stream);
        let mut lines = read_lines(read_half);

        device.feed(b"\r\n\r\n\nfirst\r\n\r\nsecond\r\n").await;

        assert_eq!(lines.recv().await.unwrap(), "first");
        assert_eq!(lines.recv().await.unwrap(), "second");
    }
}
