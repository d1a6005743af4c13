//! 支付回调签名校验
//!
//! 签名头格式: `t=<unix秒>,v1=<hex>[,v1=<hex>...]`，
//! 签名内容为 `"<t>.<原始请求体>"` 的 HMAC-SHA256。

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// 允许的时间偏差（秒）
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Malformed signature header")]
    MalformedHeader,

    #[error("Signature timestamp outside tolerance")]
    TimestampOutOfTolerance,

    #[error("No matching signature")]
    Mismatch,

    #[error("Invalid signing secret")]
    InvalidSecret,
}

struct ParsedHeader<'a> {
    timestamp: i64,
    signatures: Vec<&'a str>,
}

fn parse_header(header: &str) -> Result<ParsedHeader<'_>, SignatureError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let (key, value) = part.trim().split_once('=').ok_or(SignatureError::MalformedHeader)?;
        match key {
            "t" => timestamp = Some(value.parse::<i64>().map_err(|_| SignatureError::MalformedHeader)?),
            "v1" => signatures.push(value),
            // v0 等其他方案忽略
            _ => {}
        }
    }

    match timestamp {
        Some(timestamp) if !signatures.is_empty() => Ok(ParsedHeader { timestamp, signatures }),
        _ => Err(SignatureError::MalformedHeader),
    }
}

fn mac_for(secret: &str, timestamp: i64, payload: &[u8]) -> Result<HmacSha256, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| SignatureError::InvalidSecret)?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(mac)
}

/// 计算签名（hex），发送方和测试使用
pub fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> Result<String, SignatureError> {
    Ok(hex::encode(mac_for(secret, timestamp, payload)?.finalize().into_bytes()))
}

pub fn verify_signature(
    secret: &str,
    header: &str,
    payload: &[u8],
    now: i64,
    tolerance_secs: i64,
) -> Result<(), SignatureError> {
    let parsed = parse_header(header)?;

    // t 来自请求头，不能直接相减
    if now.abs_diff(parsed.timestamp) > tolerance_secs.unsigned_abs() {
        return Err(SignatureError::TimestampOutOfTolerance);
    }

    let mut matched = false;
    for candidate in &parsed.signatures {
        let Ok(bytes) = hex::decode(candidate) else {
            continue;
        };
        if mac_for(secret, parsed.timestamp, payload)?.verify_slice(&bytes).is_ok() {
            matched = true;
            break;
        }
    }

    if matched {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}
