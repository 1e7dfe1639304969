use percent_encoding::percent_decode_str;
use reqwest::Url;

use crate::error::{ClientError, Result};

pub const DEFAULT_PORT: u16 = 4200;

/// Parsed connection target for the CrateDB HTTP endpoint.
///
/// Accepts SQLAlchemy-style `crate://` URIs as well as plain `http://` and
/// `https://` URLs. `crate://` connects over plain HTTP unless `ssl=true` is
/// given in the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionUri {
    pub host: String,
    pub port: u16,
    pub tls: bool,
    pub verify_ssl_cert: bool,
    pub username: Option<String>,
    pub password: Option<String>,
    pub schema: Option<String>,
}

impl ConnectionUri {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let url = Url::parse(raw).map_err(|e| invalid(raw, e.to_string()))?;

        let mut tls = match url.scheme() {
            "crate" | "http" => false,
            "https" => true,
            other => return Err(invalid(raw, format!("unsupported scheme {other:?}"))),
        };

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| invalid(raw, "missing host".to_string()))?
            .to_string();
        // `http(s)://` follows the usual URL defaults; `crate://` targets the CrateDB port.
        let port = if url.scheme() == "crate" {
            url.port().unwrap_or(DEFAULT_PORT)
        } else {
            url.port_or_known_default().unwrap_or(DEFAULT_PORT)
        };

        let username = Some(url.username())
            .filter(|u| !u.is_empty())
            .map(|u| decode_userinfo(raw, "username", u))
            .transpose()?;
        let password = url
            .password()
            .map(|p| decode_userinfo(raw, "password", p))
            .transpose()?;

        let mut verify_ssl_cert = true;
        let mut schema = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "ssl" => tls = parse_flag(raw, &key, &value)?,
                "verify_ssl_cert" => verify_ssl_cert = parse_flag(raw, &key, &value)?,
                "schema" => schema = Some(value.into_owned()).filter(|s| !s.is_empty()),
                _ => {}
            }
        }

        Ok(Self {
            host,
            port,
            tls,
            verify_ssl_cert,
            username,
            password,
            schema,
        })
    }

    /// URL of the `/_sql` endpoint, asking the server to report column types.
    pub fn sql_endpoint(&self) -> Result<Url> {
        let scheme = if self.tls { "https" } else { "http" };
        let raw = format!("{scheme}://{}:{}/_sql?types", self.host, self.port);
        Url::parse(&raw).map_err(|e| invalid(&raw, e.to_string()))
    }

    /// Connection target without credentials, safe to log.
    pub fn display_target(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }
}

/// Credentials arrive percent-encoded in the URI.
fn decode_userinfo(raw: &str, field: &str, encoded: &str) -> Result<String> {
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| invalid(raw, format!("{field} is not valid UTF-8: {e}")))
}

fn parse_flag(raw: &str, key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(invalid(raw, format!("{key} expects a boolean, got {value:?}"))),
    }
}

fn invalid(uri: &str, reason: String) -> ClientError {
    ClientError::InvalidUri {
        uri: uri.to_string(),
        reason,
    }
}
