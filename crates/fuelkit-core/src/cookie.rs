//! Cookie helper.
//!
//! Reads the request `Cookie` header and queues `Set-Cookie` writes using
//! the configured defaults.

use crate::config::CookieConfig;
use crate::http::Response;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

/// Lifetime used to expire a cookie on delete.
const DELETE_OFFSET_SECS: i64 = 86_400;

/// Latest `Expires` date written, 9999-12-31T23:59:59Z.
const MAX_EXPIRES_TIMESTAMP: i64 = 253_402_300_799;

/// One queued `Set-Cookie` write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub expires: Option<DateTime<Utc>>,
    pub max_age: Option<i64>,
    pub path: String,
    pub domain: Option<String>,
    pub secure: bool,
    pub http_only: bool,
}

impl SetCookie {
    /// Renders the `Set-Cookie` header value.
    pub fn to_header(&self) -> String {
        let mut header = format!("{}={}", self.name, encode(&self.value));
        if let Some(expires) = self.expires {
            header.push_str(&format!(
                "; Expires={}",
                expires.format("%a, %d %b %Y %H:%M:%S GMT")
            ));
        }
        if let Some(max_age) = self.max_age {
            header.push_str(&format!("; Max-Age={}", max_age.max(0)));
        }
        header.push_str(&format!("; Path={}", self.path));
        if let Some(domain) = &self.domain {
            header.push_str(&format!("; Domain={domain}"));
        }
        if self.secure {
            header.push_str("; Secure");
        }
        if self.http_only {
            header.push_str("; HttpOnly");
        }
        header
    }
}

/// Request cookies plus the writes queued for the response.
#[derive(Debug, Clone)]
pub struct CookieJar {
    config: CookieConfig,
    values: BTreeMap<String, String>,
    pending: Vec<SetCookie>,
}

impl CookieJar {
    pub fn new(config: CookieConfig) -> Self {
        Self {
            config,
            values: BTreeMap::new(),
            pending: Vec::new(),
        }
    }

    /// Builds a jar from a request `Cookie` header (`a=1; b=2`).
    pub fn from_header(config: CookieConfig, header: &str) -> Self {
        let mut jar = Self::new(config);
        for pair in header.split(';') {
            if let Some((name, value)) = pair.split_once('=') {
                let name = name.trim();
                if !name.is_empty() {
                    jar.values.insert(name.to_string(), decode(value.trim()));
                }
            }
        }
        jar
    }

    /// Value of `name`, or `default` when unset.
    pub fn get<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.values.get(name).map(String::as_str).unwrap_or(default)
    }

    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Queues a cookie. `expiration` overrides the configured lifetime in
    /// seconds; `0` writes a session cookie.
    pub fn set(&mut self, name: &str, value: &str, expiration: Option<i64>) {
        self.set_at(name, value, expiration, Utc::now());
    }

    /// [`CookieJar::set`] with an explicit clock.
    pub fn set_at(&mut self, name: &str, value: &str, expiration: Option<i64>, now: DateTime<Utc>) {
        let lifetime = expiration.unwrap_or(self.config.expiration);
        let (expires, max_age) = if lifetime != 0 {
            (expires_after(now, lifetime), Some(lifetime))
        } else {
            (None, None)
        };
        self.values.insert(name.to_string(), value.to_string());
        self.queue(name, value, expires, max_age);
    }

    /// Queues an expired, empty cookie for `name`.
    pub fn delete(&mut self, name: &str) {
        self.delete_at(name, Utc::now());
    }

    /// [`CookieJar::delete`] with an explicit clock.
    pub fn delete_at(&mut self, name: &str, now: DateTime<Utc>) {
        self.values.remove(name);
        self.queue(
            name,
            "",
            Some(now - Duration::seconds(DELETE_OFFSET_SECS)),
            Some(0),
        );
    }

    fn queue(&mut self, name: &str, value: &str, expires: Option<DateTime<Utc>>, max_age: Option<i64>) {
        self.pending.retain(|c| c.name != name);
        self.pending.push(SetCookie {
            name: name.to_string(),
            value: value.to_string(),
            expires,
            max_age,
            path: self.config.path.clone(),
            domain: self.config.domain.clone(),
            secure: self.config.secure,
            http_only: self.config.http_only,
        });
    }

    /// Writes queued for the response, in order; a later write to the same
    /// name replaces the earlier one.
    pub fn pending(&self) -> &[SetCookie] {
        &self.pending
    }

    /// Adds one `Set-Cookie` header per queued write.
    pub fn apply(&self, response: Response) -> Response {
        self.pending
            .iter()
            .fold(response, |r, c| r.with_header("Set-Cookie", c.to_header()))
    }
}

fn encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
            && let Ok(byte) = u8::from_str_radix(&value[i + 1..i + 3], 16)
        {
            out.push(byte);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// `now + lifetime`, clamped between the epoch and year 9999.
fn expires_after(now: DateTime<Utc>, lifetime: i64) -> Option<DateTime<Utc>> {
    Duration::try_seconds(lifetime)
        .and_then(|delta| now.checked_add_signed(delta))
        .filter(|at| (0..=MAX_EXPIRES_TIMESTAMP).contains(&at.timestamp()))
        .or_else(|| {
            let bound = if lifetime > 0 { MAX_EXPIRES_TIMESTAMP } else { 0 };
            DateTime::from_timestamp(bound, 0)
        })
}
