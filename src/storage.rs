//! S3 object store.
//!
//! Downloads and uploads objects using the S3 REST API with AWS Signature
//! V4 authentication, and issues time-limited presigned GET/PUT URLs via
//! SigV4 query-string signing. Supports custom endpoints for S3-compatible
//! services (MinIO, LocalStack), which use path-style addressing.
//!
//! Uses only pure-Rust dependencies (`hmac`, `sha2`) for AWS signing — no
//! C library dependencies.
//!
//! # Environment Variables
//!
//! Credentials are read from environment variables:
//! - `AWS_ACCESS_KEY_ID` — required
//! - `AWS_SECRET_ACCESS_KEY` — required
//! - `AWS_SESSION_TOKEN` — optional (for temporary credentials / IAM roles)

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::config::StorageConfig;
use crate::traits::ObjectStore;

type HmacSha256 = Hmac<Sha256>;

pub struct S3ObjectStore {
    bucket: String,
    region: String,
    endpoint_url: Option<String>,
    client: reqwest::Client,
}

impl S3ObjectStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            bucket: config.bucket.clone(),
            region: config.region.clone(),
            endpoint_url: config.endpoint_url.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// Scheme, host, and canonical URI for an object key.
    ///
    /// Standard AWS uses virtual-host addressing
    /// (`<bucket>.s3.<region>.amazonaws.com/<key>`); custom endpoints use
    /// path-style (`<endpoint>/<bucket>/<key>`).
    fn object_location(&self, key: &str) -> (String, String, String) {
        let encoded_key: String = key.split('/').map(uri_encode).collect::<Vec<_>>().join("/");
        match self.endpoint_url {
            Some(ref endpoint) => {
                let scheme = if endpoint.starts_with("http://") {
                    "http"
                } else {
                    "https"
                };
                let host = endpoint
                    .trim_start_matches("https://")
                    .trim_start_matches("http://")
                    .trim_end_matches('/')
                    .to_string();
                let uri = format!("/{}/{}", uri_encode(&self.bucket), encoded_key);
                (scheme.to_string(), host, uri)
            }
            None => {
                let host = format!("{}.s3.{}.amazonaws.com", self.bucket, self.region);
                (String::from("https"), host, format!("/{}", encoded_key))
            }
        }
    }

    /// Build a signed request for `method` on `key` with the given payload
    /// hash, returning the full URL and the headers to attach.
    fn signed_request(
        &self,
        method: &str,
        key: &str,
        payload_hash: &str,
        creds: &AwsCredentials,
        now: DateTime<Utc>,
    ) -> (String, Vec<(String, String)>) {
        let (scheme, host, canonical_uri) = self.object_location(key);

        let date_stamp = now.format("%Y%m%d").to_string();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();

        let mut headers = vec![
            ("host".to_string(), host.clone()),
            ("x-amz-content-sha256".to_string(), payload_hash.to_string()),
            ("x-amz-date".to_string(), amz_date.clone()),
        ];
        if let Some(ref token) = creds.session_token {
            headers.push(("x-amz-security-token".to_string(), token.clone()));
        }
        headers.sort_by(|a, b| a.0.cmp(&b.0));

        let signed_headers: String = headers
            .iter()
            .map(|(k, _)| k.as_str())
            .collect::<Vec<_>>()
            .join(";");
        let canonical_headers: String = headers
            .iter()
            .map(|(k, v)| format!("{}:{}\n", k, v))
            .collect();

        let canonical_request = format!(
            "{}\n{}\n\n{}\n{}\n{}",
            method, canonical_uri, canonical_headers, signed_headers, payload_hash
        );

        let credential_scope = format!("{}/{}/s3/aws4_request", date_stamp, self.region);
        let string_to_sign = format!(
            "AWS4-HMAC-SHA256\n{}\n{}\n{}",
            amz_date,
            credential_scope,
            hex_sha256(canonical_request.as_bytes())
        );

        let signing_key =
            derive_signing_key(&creds.secret_access_key, &date_stamp, &self.region, "s3");
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let authorization = format!(
            "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
            creds.access_key_id, credential_scope, signed_headers, signature
        );

        // `host` is set by the HTTP client; everything else goes on the wire.
        let mut request_headers: Vec<(String, String)> = headers
            .into_iter()
            .filter(|(k, _)| k != "host")
            .collect();
        request_headers.push(("Authorization".to_string(), authorization));

        let url = format!("{}://{}{}", scheme, host, canonical_uri);
        (url, request_headers)
    }

    /// Build a presigned URL for `method` on `key`, valid for
    /// `expires_secs` from `now`. Only the `host` header is signed; the
    /// payload is `UNSIGNED-PAYLOAD`, so any body may be sent on PUT.
    fn presigned_url(
        &self,
        method: &str,
        key: &str,
        expires_secs: u64,
        creds: &AwsCredentials,
        now: DateTime<Utc>,
    ) -> String {
        let (scheme, host, canonical_uri) = self.object_location(key);

        let date_stamp = now.format("%Y%m%d").to_string();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let credential_scope = format!("{}/{}/s3/aws4_request", date_stamp, self.region);

        let mut query: Vec<(String, String)> = vec![
            (
                "X-Amz-Algorithm".to_string(),
                "AWS4-HMAC-SHA256".to_string(),
            ),
            (
                "X-Amz-Credential".to_string(),
                format!("{}/{}", creds.access_key_id, credential_scope),
            ),
            ("X-Amz-Date".to_string(), amz_date.clone()),
            ("X-Amz-Expires".to_string(), expires_secs.to_string()),
            ("X-Amz-SignedHeaders".to_string(), "host".to_string()),
        ];
        if let Some(ref token) = creds.session_token {
            query.push(("X-Amz-Security-Token".to_string(), token.clone()));
        }
        query.sort_by(|a, b| a.0.cmp(&b.0));

        let canonical_querystring: String = query
            .iter()
            .map(|(k, v)| format!("{}={}", uri_encode(k), uri_encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let canonical_request = format!(
            "{}\n{}\n{}\nhost:{}\n\nhost\nUNSIGNED-PAYLOAD",
            method, canonical_uri, canonical_querystring, host
        );

        let string_to_sign = format!(
            "AWS4-HMAC-SHA256\n{}\n{}\n{}",
            amz_date,
            credential_scope,
            hex_sha256(canonical_request.as_bytes())
        );

        let signing_key =
            derive_signing_key(&creds.secret_access_key, &date_stamp, &self.region, "s3");
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        format!(
            "{}://{}{}?{}&X-Amz-Signature={}",
            scheme, host, canonical_uri, canonical_querystring, signature
        )
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        let creds = AwsCredentials::from_env()?;
        let payload_hash = hex_sha256(b"");
        let (url, headers) = self.signed_request("GET", key, &payload_hash, &creds, Utc::now());

        let mut req = self.client.get(&url);
        for (k, v) in headers {
            req = req.header(k, v);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get s3://{}/{}: {}", self.bucket, key, e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            bail!("S3 GetObject failed (HTTP {}) for key '{}'", status, key);
        }

        Ok(resp.bytes().await?.to_vec())
    }

    async fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        let creds = AwsCredentials::from_env()?;
        let payload_hash = hex_sha256(&body);
        let (url, headers) = self.signed_request("PUT", key, &payload_hash, &creds, Utc::now());

        // content-type is sent but not signed; SigV4 only verifies the
        // headers listed in SignedHeaders.
        let mut req = self
            .client
            .put(&url)
            .header("Content-Type", content_type)
            .body(body);
        for (k, v) in headers {
            req = req.header(k, v);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to put s3://{}/{}: {}", self.bucket, key, e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp.text().await.unwrap_or_default();
            bail!(
                "S3 PutObject failed (HTTP {}) for key '{}': {}",
                status,
                key,
                body_text.chars().take(500).collect::<String>()
            );
        }

        Ok(())
    }

    async fn presign_get(&self, key: &str, expires_secs: u64) -> Result<String> {
        let creds = AwsCredentials::from_env()?;
        Ok(self.presigned_url("GET", key, expires_secs, &creds, Utc::now()))
    }

    async fn presign_put(&self, key: &str, expires_secs: u64) -> Result<String> {
        let creds = AwsCredentials::from_env()?;
        Ok(self.presigned_url("PUT", key, expires_secs, &creds, Utc::now()))
    }
}

// ============ AWS Credentials ============

/// AWS credentials loaded from environment variables.
struct AwsCredentials {
    access_key_id: String,
    secret_access_key: String,
    session_token: Option<String>,
}

impl AwsCredentials {
    fn from_env() -> Result<Self> {
        let access_key_id = std::env::var("AWS_ACCESS_KEY_ID")
            .context("AWS_ACCESS_KEY_ID environment variable not set")?;
        let secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY")
            .context("AWS_SECRET_ACCESS_KEY environment variable not set")?;
        let session_token = std::env::var("AWS_SESSION_TOKEN").ok();

        Ok(Self {
            access_key_id,
            secret_access_key,
            session_token,
        })
    }
}

// ============ AWS SigV4 Helpers ============

/// Compute the hex-encoded SHA-256 hash of data.
fn hex_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compute HMAC-SHA256 of data with the given key.
fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// Compute hex-encoded HMAC-SHA256.
fn hex_hmac_sha256(key: &[u8], data: &[u8]) -> String {
    hex::encode(hmac_sha256(key, data))
}

/// Derive the AWS SigV4 signing key for a given date, region, and service.
///
/// ```text
/// kDate    = HMAC("AWS4" + secret, dateStamp)
/// kRegion  = HMAC(kDate, region)
/// kService = HMAC(kRegion, service)
/// kSigning = HMAC(kService, "aws4_request")
/// ```
fn derive_signing_key(secret_key: &str, date_stamp: &str, region: &str, service: &str) -> Vec<u8> {
    let k_date = hmac_sha256(
        format!("AWS4{}", secret_key).as_bytes(),
        date_stamp.as_bytes(),
    );
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

/// URI-encode a string per RFC 3986 (used in SigV4 canonical requests).
///
/// Encodes all characters except unreserved characters:
/// `A-Z a-z 0-9 - _ . ~`
fn uri_encode(s: &str) -> String {
    let mut result = String::new();
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(byte as char);
            }
            _ => {
                result.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    result
}
