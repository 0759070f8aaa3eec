//! Server-Sent Events (SSE) parsing for streamed replies.
//!
//! The Generative Language API streams responses as SSE when asked with
//! `alt=sse`. Only `data:` fields are meaningful there; event names, ids,
//! retry hints, and comment lines are skipped.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use shyn_common::BrainError;

/// Read an SSE byte stream and invoke `on_data` with the joined data payload
/// of each complete event.
///
/// Multi-line `data:` fields are joined with `\n` per the SSE spec. CRLF
/// line endings are tolerated.
pub async fn read_sse_data<R>(
    reader: R,
    mut on_data: impl FnMut(&str),
) -> Result<(), BrainError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut payload = String::new();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| BrainError::Network(e.to_string()))?
    {
        let line = line.trim_end_matches('\r');

        if line.is_empty() {
            // Blank line terminates the event.
            if !payload.is_empty() {
                on_data(&payload);
                payload.clear();
            }
            continue;
        }

        if line.starts_with(':') {
            continue;
        }

        if let Some(data) = line.strip_prefix("data:") {
            if !payload.is_empty() {
                payload.push('\n');
            }
            payload.push_str(data.strip_prefix(' ').unwrap_or(data));
        }
        // event:, id:, retry: are not used by this provider.
    }

    // Flush a trailing event that was not followed by a blank line.
    if !payload.is_empty() {
        on_data(&payload);
    }

    Ok(())
}
