use serde::de::DeserializeOwned;

/// One event block of a `text/event-stream`, with its `data` decoded as JSON.
#[derive(Debug, PartialEq)]
pub struct ServerSentEvent<T> {
    pub id: Option<String>,
    pub event: Option<String>,
    pub retry: Option<usize>,
    pub comment: Option<String>,
    pub data: Option<T>,
}

impl<T> ServerSentEvent<T>
where
    T: DeserializeOwned,
{
    pub fn from_str(s: &str) -> Result<ServerSentEvent<T>, serde_json::Error> {
        let mut id = None;
        let mut event = None;
        let mut retry = None;
        let mut comment = None;
        let mut data_lines: Vec<&str> = Vec::new();

        for line in s.lines() {
            if let Some(value) = line.strip_prefix("id:") {
                id = Some(value.trim().to_string());
            } else if let Some(value) = line.strip_prefix("event:") {
                event = Some(value.trim().to_string());
            } else if let Some(value) = line.strip_prefix("retry:") {
                retry = value.trim().parse::<usize>().ok();
            } else if let Some(value) = line.strip_prefix(':') {
                comment = Some(value.trim().to_string());
            } else if let Some(value) = line.strip_prefix("data:") {
                data_lines.push(value.trim());
            }
        }

        // Multiple data lines form one payload
        let data = if data_lines.is_empty() {
            None
        } else {
            Some(serde_json::from_str(&data_lines.join("\n"))?)
        };

        Ok(ServerSentEvent {
            id,
            event,
            retry,
            comment,
            data,
        })
    }
}

const BLOCK_TERMINATORS: [&[u8]; 3] = [b"\r\n\r\n", b"\n\n", b"\r\r"];

/// Splits a growing stream buffer into complete event blocks, leaving any trailing partial block in place.
///
/// Bytes are only decoded once a whole block has arrived, so a line ending or a multibyte
/// character split across network chunks survives intact.
pub fn drain_blocks(buffer: &mut Vec<u8>) -> Vec<String> {
    let mut blocks = Vec::new();
    while let Some((end, terminator_len)) = find_block_end(buffer) {
        let raw: Vec<u8> = buffer.drain(..end + terminator_len).collect();
        let block = String::from_utf8_lossy(&raw[..end]).replace("\r\n", "\n").replace('\r', "\n");
        let block = block.trim_end();
        if !block.is_empty() {
            blocks.push(block.to_string());
        }
    }
    blocks
}

fn find_block_end(buffer: &[u8]) -> Option<(usize, usize)> {
    (0..buffer.len()).find_map(|start| {
        BLOCK_TERMINATORS
            .iter()
            .find(|terminator| buffer[start..].starts_with(terminator))
            .map(|terminator| (start, terminator.len()))
    })
}
