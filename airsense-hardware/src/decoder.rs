//! Line-oriented reading decoder
//!
//! The hub's wire protocol is one JSON object per newline-terminated UTF-8
//! line, best effort: no framing beyond the terminator, no checksum, no
//! acknowledgment. Malformed lines are per-line errors the caller skips;
//! fields missing from a record decode as zero because some firmware
//! revisions omit them.

use airsense_core::{AirsenseError, DecodeReason, Reading, Result};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::time::timeout;
use tracing::trace;

/// Outcome of one successful decoder poll.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// One complete reading was decoded
    Reading(Reading),
    /// No complete line was available (timeout or blank line)
    Empty,
}

/// Longest line accepted before the buffer is discarded.
///
/// Real records are well under 100 bytes; anything near this limit is a
/// terminator-free byte stream (wrong baud rate, binary noise) that would
/// otherwise grow the buffer without bound.
const MAX_LINE_LEN: usize = 8 * 1024;

/// Reads newline-delimited readings from an open transport.
///
/// Generic over the underlying stream so tests can feed byte slices or duplex
/// pipes instead of a serial port.
pub struct LineDecoder<R> {
    reader: BufReader<R>,
    // Persistent line buffer: bytes read before a timeout stay here and the
    // next poll picks up where the last one stopped.
    buf: Vec<u8>,
    read_timeout: Duration,
}

impl<R: AsyncRead + Unpin> LineDecoder<R> {
    /// Create a decoder over an open transport with the given read timeout.
    pub fn new(transport: R, read_timeout: Duration) -> Self {
        Self {
            reader: BufReader::new(transport),
            buf: Vec::new(),
            read_timeout,
        }
    }

    /// Read and decode at most one reading.
    ///
    /// - A timeout with no line terminator yields `Ok(Decoded::Empty)`;
    ///   partial bytes stay buffered for the next call.
    /// - A blank line yields `Ok(Decoded::Empty)`.
    /// - EOF means the device went away: `Err(DeviceDisconnected)`.
    /// - Invalid UTF-8 or malformed JSON yield a per-line `Decode` error the
    ///   caller is expected to absorb.
    pub async fn read_one(&mut self) -> Result<Decoded> {
        match timeout(self.read_timeout, self.reader.read_until(b'\n', &mut self.buf)).await {
            // No terminator within the timeout; whatever arrived stays in buf.
            Err(_) => {
                if self.buf.len() > MAX_LINE_LEN {
                    return Err(self.discard_overlong());
                }
                Ok(Decoded::Empty)
            }
            Ok(Ok(0)) => Err(AirsenseError::DeviceDisconnected(
                "serial stream returned EOF".to_string(),
            )),
            Ok(Ok(_)) => {
                if self.buf.len() > MAX_LINE_LEN {
                    return Err(self.discard_overlong());
                }
                let raw = std::mem::take(&mut self.buf);
                decode_line(&raw)
            }
            Ok(Err(e)) => Err(AirsenseError::Serial(format!("Read error: {}", e))),
        }
    }

    fn discard_overlong(&mut self) -> AirsenseError {
        let len = self.buf.len();
        self.buf = Vec::new();
        AirsenseError::decode(
            DecodeReason::Format,
            format!("line exceeded {} bytes ({} buffered), discarding", MAX_LINE_LEN, len),
        )
    }
}

/// Decode one raw line into a reading.
fn decode_line(raw: &[u8]) -> Result<Decoded> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| AirsenseError::decode(DecodeReason::Encoding, e.to_string()))?;

    let line = text.trim();
    if line.is_empty() {
        return Ok(Decoded::Empty);
    }

    trace!("RX: {:?}", line);

    let reading: Reading = serde_json::from_str(line)
        .map_err(|e| AirsenseError::decode(DecodeReason::Format, e.to_string()))?;

    Ok(Decoded::Reading(reading))
}
