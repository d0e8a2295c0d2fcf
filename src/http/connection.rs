use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use crate::config::{Config, Limits};
use crate::http::context::ConnectionContext;
use crate::http::parser::{ParseError, parse_request_head};
use crate::http::physical::Physical;
use crate::http::rejection::{Malformed, Rejection};
use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::http::validate::Validator;
use crate::http::writer::{ResponseWriter, write_continue};

const READ_CHUNK: usize = 4096;

pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    request: Request,
    physical: Physical,
    ctx: ConnectionContext,
    validator: Validator,
    limits: Limits,
}

pub enum ConnectionState {
    Reading,
    Processing,
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

enum HeadRead {
    Complete,
    Closed,
    Invalid(ParseError),
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, cfg: &Config) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::Reading,
            request: Request::new(),
            physical: Physical::new(),
            ctx: ConnectionContext::new(),
            validator: Validator::new(cfg.validation.clone()),
            limits: cfg.limits.clone(),
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let result = self.drive().await;

        // the slot is gone with the connection
        self.request.clear();
        self.physical.clear();

        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.request.reset();
                    self.physical.reset();
                    self.ctx.reset();

                    self.state = match self.read_request_head().await? {
                        HeadRead::Complete => ConnectionState::Processing,
                        HeadRead::Closed => ConnectionState::Closed,
                        HeadRead::Invalid(e) => {
                            let rejection =
                                Rejection::from(Malformed::UnparsableHead(format!("{:?}", e)));
                            let response = self.ctx.reject(&rejection);
                            ConnectionState::Writing(ResponseWriter::new(&response), false)
                        }
                    };
                }

                ConnectionState::Processing => {
                    let (response, keep_alive) = self.process().await?;
                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer, keep_alive);
                }

                ConnectionState::Writing(writer, keep_alive) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if *keep_alive {
                        self.state = ConnectionState::Reading; // go back for next request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn process(&mut self) -> anyhow::Result<(Response, bool)> {
        if let Err(rejection) = self
            .validator
            .validate_header(&mut self.request, &mut self.ctx)
        {
            return Ok((self.ctx.reject(&rejection), false));
        }

        let body_len = self.request.body_len();
        if body_len > self.limits.max_body_bytes {
            let rejection = Rejection::EntityTooLarge(body_len.to_string());
            return Ok((self.ctx.reject(&rejection), false));
        }

        if self.ctx.expect_100_continue {
            write_continue(&mut self.stream).await?;
        }

        let body = self.read_body(usize::try_from(body_len)?).await?;

        tracing::debug!(
            method = %self.request.method_token,
            version = self.request.version.as_str(),
            path = %self.request.uri.path,
            host = %self.request.uri.host,
            content_length = self.request.content_length,
            keep_alive = self.ctx.keep_alive,
            "Request accepted"
        );

        let mut response = handle_request(&self.request, &body);
        if !self.ctx.keep_alive {
            response = response.close();
        }
        Ok((response, self.ctx.keep_alive))
    }

    async fn read_request_head(&mut self) -> anyhow::Result<HeadRead> {
        loop {
            match parse_request_head(&self.buffer, self.limits.max_head_bytes, &mut self.request) {
                Ok(consumed) => {
                    self.buffer.advance(consumed);
                    return Ok(HeadRead::Complete);
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => return Ok(HeadRead::Invalid(e)),
            }

            self.buffer.reserve(READ_CHUNK);
            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                // Client closed connection
                return Ok(HeadRead::Closed);
            }
        }
    }

    async fn read_body(&mut self, len: usize) -> anyhow::Result<Vec<u8>> {
        while self.buffer.len() < len {
            self.buffer.reserve(READ_CHUNK.min(len - self.buffer.len()));
            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                anyhow::bail!("connection closed before complete body received");
            }
        }

        Ok(self.buffer.split_to(len).to_vec())
    }
}

/// Answers an accepted request. Routing is not this server's concern; every
/// known method gets a short description of what was accepted.
fn handle_request(req: &Request, body: &[u8]) -> Response {
    match req.method {
        Method::Unset => Response::for_status(StatusCode::NotImplemented),
        Method::Head => ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "text/plain")
            .build(),
        _ => Response::ok(format!(
            "{} {} ({} body bytes)\n",
            req.method.as_str(),
            req.uri.path,
            body.len()
        )),
    }
}
