//! Length-prefixed frame I/O.

use crate::error::{FrameError, FrameResult};
use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Maximum bytes consumed by a single read while draining a frame body.
///
/// Bodies can declare up to `u32::MAX` bytes; reading them in bounded
/// chunks keeps any one read call from blocking on the whole body.
pub const MAX_CHUNK: usize = 16 * 1024;

/// Initial buffer capacity for an incoming body. The declared length is not
/// trusted for preallocation.
const INITIAL_CAPACITY: usize = 64 * 1024;

/// Reads one frame body from `reader`.
///
/// Reads the 4-byte big-endian length prefix, then accumulates body bytes
/// in chunks of at most [`MAX_CHUNK`] until the declared length is fully
/// consumed.
///
/// # Errors
///
/// Returns [`FrameError::Io`] if the prefix cannot be read and
/// [`FrameError::Truncated`] if the stream ends mid-body.
pub async fn read_frame<R>(reader: &mut R) -> FrameResult<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut prefix = [0u8; 4];
    reader.read_exact(&mut prefix).await?;
    let declared = u32::from_be_bytes(prefix) as usize;

    let mut body = BytesMut::with_capacity(declared.min(INITIAL_CAPACITY));
    let mut chunk = [0u8; MAX_CHUNK];
    let mut remaining = declared;
    while remaining > 0 {
        let want = remaining.min(MAX_CHUNK);
        let read = reader.read(&mut chunk[..want]).await?;
        if read == 0 {
            return Err(FrameError::Truncated {
                declared,
                received: declared - remaining,
            });
        }
        body.extend_from_slice(&chunk[..read]);
        remaining -= read;
    }

    Ok(body.to_vec())
}

/// Writes `body` to `writer` as one frame.
///
/// # Errors
///
/// Returns [`FrameError::Oversize`] if the body cannot be described by a
/// 4-byte length prefix.
pub async fn write_frame<W>(writer: &mut W, body: &[u8]) -> FrameResult<()>
where
    W: AsyncWrite + Unpin,
{
    let length = u32::try_from(body.len()).map_err(|_| FrameError::Oversize(body.len() as u64))?;
    writer.write_all(&length.to_be_bytes()).await?;
    writer.write_all(body).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trip_small_frame() {
        let (mut client, mut server) = tokio::io::duplex(1024);

        write_frame(&mut client, b"hello").await.unwrap();
        let body = read_frame(&mut server).await.unwrap();
        assert_eq!(body, b"hello");
    }

    #[tokio::test]
    async fn round_trip_empty_frame() {
        let (mut client, mut server) = tokio::io::duplex(64);

        write_frame(&mut client, b"").await.unwrap();
        let body = read_frame(&mut server).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn body_larger_than_one_chunk_is_accumulated() {
        let (mut client, mut server) = tokio::io::duplex(4096);
        let body: Vec<u8> = (0..MAX_CHUNK * 3 + 17).map(|i| (i % 251) as u8).collect();

        let expected = body.clone();
        let writer = tokio::spawn(async move {
            write_frame(&mut client, &body).await.unwrap();
        });

        let received = read_frame(&mut server).await.unwrap();
        writer.await.unwrap();
        assert_eq!(received, expected);
    }

    #[tokio::test]
    async fn truncated_body_is_reported() {
        let (mut client, mut server) = tokio::io::duplex(1024);

        // Declare 10 bytes but deliver only 4, then close the write side.
        client.write_all(&10u32.to_be_bytes()).await.unwrap();
        client.write_all(b"abcd").await.unwrap();
        drop(client);

        let result = read_frame(&mut server).await;
        assert!(matches!(
            result,
            Err(FrameError::Truncated {
                declared: 10,
                received: 4
            })
        ));
    }

    #[tokio::test]
    async fn missing_prefix_is_an_io_error() {
        let (client, mut server) = tokio::io::duplex(64);
        drop(client);

        let result = read_frame(&mut server).await;
        assert!(matches!(result, Err(FrameError::Io(_))));
    }
}
