use crate::http::request::{Request, Version};

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    InvalidRequest,
    InvalidHeader,
    HeadTooLarge,
    Incomplete,
}

/// Tokenizes a request head into `req`.
///
/// `req` should be freshly reset. Returns the number of bytes the head
/// occupied, terminator included. The body is left in `buf`; how much of
/// it belongs to this request is only known after validation.
///
/// Unknown methods and versions are not errors here: they are recorded as
/// `Method::Unset` / `Version::Unset` and left to the validator.
pub fn parse_request_head(
    buf: &[u8],
    max_head_bytes: usize,
    req: &mut Request,
) -> Result<usize, ParseError> {
    let headers_end = match find_headers_end(buf) {
        Some(end) => end,
        None if buf.len() > max_head_bytes => return Err(ParseError::HeadTooLarge),
        None => return Err(ParseError::Incomplete),
    };
    if headers_end + 4 > max_head_bytes {
        return Err(ParseError::HeadTooLarge);
    }

    let headers_str =
        std::str::from_utf8(&buf[..headers_end]).map_err(|_| ParseError::InvalidRequest)?;

    let mut lines = headers_str.split("\r\n");

    // Request line
    let request_line = lines.next().ok_or(ParseError::InvalidRequest)?;
    let mut parts = request_line.split(' ');

    let method = parts.next().ok_or(ParseError::InvalidRequest)?;
    let target = parts.next().ok_or(ParseError::InvalidRequest)?;
    let version = parts.next().ok_or(ParseError::InvalidRequest)?;
    if method.is_empty() || parts.next().is_some() {
        return Err(ParseError::InvalidRequest);
    }

    req.set_method(method);
    req.uri.raw.push_str(target);
    req.version = Version::from_token(version);

    // Headers
    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once(':').ok_or(ParseError::InvalidHeader)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ParseError::InvalidHeader);
        }

        req.headers.append(key, value.trim());
    }

    Ok(headers_end + 4)
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
