//! Request URI value and the grammar used to split it.
//!
//! `Uri` holds the raw request-target exactly as received alongside the
//! derived components. The splitting itself sits behind [`UriGrammar`] so
//! the validator can be driven with another grammar; [`StandardGrammar`]
//! is the one the server uses.

use thiserror::Error;

/// Errors produced while splitting or canonicalizing a request-target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    #[error("empty request-target")]
    Empty,
    #[error("invalid character {0:?} in request-target")]
    InvalidCharacter(char),
    #[error("unsupported request-target form: {0}")]
    UnsupportedForm(String),
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),
    #[error("invalid host: {0}")]
    InvalidHost(String),
    #[error("invalid port: {0}")]
    InvalidPort(String),
    #[error("asterisk-form is only allowed for OPTIONS")]
    AsteriskNotAllowed,
    #[error("path does not decode to valid text")]
    InvalidEncoding,
}

/// The URI of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Uri {
    /// Request-target exactly as it appeared on the request line
    pub raw: String,
    /// Lower-cased scheme, only set for absolute-form targets
    pub scheme: String,
    /// `[userinfo@]host[:port]` from the target or the Host header
    pub authority: String,
    /// Host without port
    pub host: String,
    pub port: Option<u16>,
    /// Decoded, simplified path; rewritten by internal redirects
    pub path: String,
    /// Path as first canonicalized for this request; never overwritten
    pub orig_path: String,
    /// Query without the leading `?`, kept undecoded
    pub query: String,
}

impl Uri {
    pub fn new() -> Self {
        Self::default()
    }

    /// Truncates every component in place, including `orig_path`.
    pub fn reset(&mut self) {
        self.raw.clear();
        self.scheme.clear();
        self.authority.clear();
        self.host.clear();
        self.port = None;
        self.path.clear();
        self.orig_path.clear();
        self.query.clear();
    }

    /// Like `reset`, but gives the buffers back to the allocator.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Capability to split request-targets and parse authorities.
pub trait UriGrammar {
    /// Splits `uri.raw` into scheme, authority, path and query.
    ///
    /// Callers truncate `path` and `query` beforehand. Implementations
    /// that find an authority in the target overwrite `authority`, `host`
    /// and `port`.
    fn parse_raw(&self, uri: &mut Uri) -> Result<(), UriError>;

    /// Parses `uri.authority` into `host` and `port`.
    fn parse_hostname(&self, uri: &mut Uri) -> Result<(), UriError>;
}

/// Origin-form, absolute-form (`http`/`https`) and asterisk-form targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardGrammar;

struct Target<'a> {
    scheme: Option<&'a str>,
    authority: Option<&'a str>,
    path: &'a str,
    query: &'a str,
}

fn split_target(raw: &str) -> Result<Target<'_>, UriError> {
    if raw.is_empty() {
        return Err(UriError::Empty);
    }

    if let Some(c) = raw.chars().find(|c| !matches!(*c, '\x21'..='\x7e')) {
        return Err(UriError::InvalidCharacter(c));
    }

    // fragments are never sent by conforming clients; drop them
    let raw = raw.split_once('#').map_or(raw, |(before, _)| before);

    if raw == "*" {
        return Ok(Target {
            scheme: None,
            authority: None,
            path: "*",
            query: "",
        });
    }

    let (scheme, authority, rest) = if raw.starts_with('/') {
        (None, None, raw)
    } else if let Some((scheme, after)) = raw.split_once("://") {
        if !is_scheme(scheme) {
            return Err(UriError::UnsupportedForm(raw.to_string()));
        }
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(UriError::UnsupportedScheme(scheme.to_string()));
        }

        let end = after.find(['/', '?']).unwrap_or(after.len());
        let (authority, rest) = after.split_at(end);
        if authority.is_empty() {
            return Err(UriError::InvalidHost(raw.to_string()));
        }
        (Some(scheme), Some(authority), rest)
    } else {
        return Err(UriError::UnsupportedForm(raw.to_string()));
    };

    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
    let path = if path.is_empty() { "/" } else { path };

    Ok(Target {
        scheme,
        authority,
        path,
        query,
    })
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

impl UriGrammar for StandardGrammar {
    fn parse_raw(&self, uri: &mut Uri) -> Result<(), UriError> {
        let has_authority = {
            let target = split_target(&uri.raw)?;

            uri.path.push_str(target.path);
            uri.query.push_str(target.query);

            if let Some(scheme) = target.scheme {
                uri.scheme.clear();
                uri.scheme.push_str(&scheme.to_ascii_lowercase());
            }

            match target.authority {
                Some(authority) => {
                    uri.authority.clear();
                    uri.authority.push_str(authority);
                    true
                }
                None => false,
            }
        };

        if has_authority {
            self.parse_hostname(uri)?;
        }

        Ok(())
    }

    fn parse_hostname(&self, uri: &mut Uri) -> Result<(), UriError> {
        uri.host.clear();
        uri.port = None;

        if uri.authority.is_empty() {
            return Ok(());
        }

        let host_port = uri
            .authority
            .rsplit_once('@')
            .map_or(uri.authority.as_str(), |(_, hp)| hp);

        let (host, port) = if host_port.starts_with('[') {
            let close = host_port
                .find(']')
                .ok_or_else(|| UriError::InvalidHost(host_port.to_string()))?;
            let (host, after) = host_port.split_at(close + 1);
            match after.strip_prefix(':') {
                Some(port) => (host, Some(port)),
                None if after.is_empty() => (host, None),
                None => return Err(UriError::InvalidHost(host_port.to_string())),
            }
        } else {
            match host_port.rsplit_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (host_port, None),
            }
        };

        let port = match port {
            None | Some("") => None,
            Some(p) => {
                if !p.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(UriError::InvalidPort(p.to_string()));
                }
                Some(p.parse::<u16>().map_err(|_| UriError::InvalidPort(p.to_string()))?)
            }
        };

        let host = url::Host::parse(host).map_err(|_| UriError::InvalidHost(host.to_string()))?;

        uri.host = host.to_string();
        uri.port = port;
        Ok(())
    }
}
