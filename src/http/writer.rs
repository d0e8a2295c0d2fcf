use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::{Response, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.1";

fn status_line(status: StatusCode) -> String {
    format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        status.as_u16(),
        status.reason_phrase()
    )
}

pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    buf.extend_from_slice(status_line(resp.status).as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf.extend_from_slice(&resp.body);

    buf
}

/// Sends the interim `100 Continue` line owed to a client that sent
/// `Expect: 100-continue`.
pub async fn write_continue<W>(stream: &mut W) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = status_line(StatusCode::Continue);
    line.push_str("\r\n");
    stream.write_all(line.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
