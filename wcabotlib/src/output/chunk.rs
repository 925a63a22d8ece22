//! Splitting rendered text into chat messages.
//!
//! Chat transports cap message length, so a long table goes out as several
//! sequential messages, each wrapped in its own preformatted fence. Lengths
//! are counted in chars because that is what the transport limits.

/// Hard per-message limit of the chat transport.
pub const MESSAGE_LIMIT: usize = 2000;

/// Size of each piece when a block has to be split.
pub const CHUNK_SIZE: usize = 1900;

const FENCE_OPEN: &str = "```\n";
const FENCE_CLOSE: &str = "\n```";

/// Wrap text in a preformatted block.
pub fn fence(text: &str) -> String {
    format!("{}{}{}", FENCE_OPEN, text, FENCE_CLOSE)
}

/// Split `text` into pieces of at most `chunk_size` chars.
///
/// Pieces break at line boundaries (the newline is dropped at the break).
/// A single line longer than `chunk_size` is cut mid-line.
pub fn split_chunks(text: &str, chunk_size: usize) -> Vec<String> {
    let chunk_size = chunk_size.max(1);
    let mut chunks = Vec::new();
    let mut current: Option<(String, usize)> = None;

    for line in text.split('\n') {
        let len = line.chars().count();

        if let Some((buf, buf_len)) = current.as_mut() {
            if *buf_len + 1 + len <= chunk_size {
                buf.push('\n');
                buf.push_str(line);
                *buf_len += 1 + len;
                continue;
            }
        }
        if let Some((buf, _)) = current.take() {
            chunks.push(buf);
        }

        if len <= chunk_size {
            current = Some((line.to_string(), len));
            continue;
        }

        let chars: Vec<char> = line.chars().collect();
        let mut pieces = chars.chunks(chunk_size).peekable();
        while let Some(piece) = pieces.next() {
            let piece: String = piece.iter().collect();
            if pieces.peek().is_some() {
                chunks.push(piece);
            } else {
                let piece_len = piece.chars().count();
                current = Some((piece, piece_len));
            }
        }
    }

    if let Some((buf, _)) = current {
        chunks.push(buf);
    }
    chunks
}

/// Turn a rendered block into fenced chat messages.
///
/// A block that fits in one message (fence included) is sent as-is;
/// anything longer is split into `CHUNK_SIZE` pieces.
pub fn to_messages(text: &str) -> Vec<String> {
    let overhead = FENCE_OPEN.len() + FENCE_CLOSE.len();
    if text.chars().count() + overhead <= MESSAGE_LIMIT {
        return vec![fence(text)];
    }

    split_chunks(text, CHUNK_SIZE)
        .iter()
        .map(|chunk| fence(chunk))
        .collect()
}
