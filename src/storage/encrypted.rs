//! SQLite-backed audit store with AES-GCM encryption of decision payloads.
//! Key derived from a deployment secret (in production: KMS / vault-managed).

use crate::error::ScoreError;
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::RngCore;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

fn derive_key(seed: &[u8]) -> [u8; KEY_LEN] {
    use ring::digest;
    let mut out = [0u8; KEY_LEN];
    let h = digest::digest(&digest::SHA256, seed);
    out[..h.as_ref().len().min(KEY_LEN)].copy_from_slice(h.as_ref());
    out
}

fn encrypt(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<String, ScoreError> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| ScoreError::Crypto(format!("key: {:?}", e)))?;
    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| ScoreError::Crypto("encrypt failed".to_string()))?;
    let mut out = nonce.to_vec();
    out.extend(ciphertext);
    Ok(BASE64.encode(&out))
}

fn decrypt(key: &[u8; KEY_LEN], encoded: &str) -> Result<Vec<u8>, ScoreError> {
    let raw = BASE64
        .decode(encoded)
        .map_err(|e| ScoreError::Crypto(e.to_string()))?;
    if raw.len() < NONCE_LEN {
        return Err(ScoreError::Crypto("payload too short".to_string()));
    }
    let (nonce, ct) = raw.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| ScoreError::Crypto(format!("key: {:?}", e)))?;
    cipher
        .decrypt(Nonce::from_slice(nonce), ct)
        .map_err(|_| ScoreError::Crypto("decrypt failed".to_string()))
}

/// One persisted scoring decision, payload already decrypted.
#[derive(Debug, Clone)]
pub struct StoredDecision {
    pub ts: i64,
    pub kind: String,
    pub payload: String,
    pub score: Option<f64>,
}

pub struct DecisionStore {
    conn: Mutex<Connection>,
    key: [u8; KEY_LEN],
}

impl DecisionStore {
    /// Open or create the store at `path`. Key is derived from `secret`.
    pub fn open(path: &Path, secret: &[u8]) -> Result<Self, ScoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS decisions (
                id TEXT PRIMARY KEY,
                ts INTEGER NOT NULL,
                kind TEXT NOT NULL,
                payload_enc TEXT NOT NULL,
                score REAL
            );
            CREATE INDEX IF NOT EXISTS idx_decisions_ts ON decisions(ts);
            CREATE TABLE IF NOT EXISTS meta (k TEXT PRIMARY KEY, v TEXT);
            "#,
        )?;
        let key = derive_key(secret);
        Ok(Self {
            conn: Mutex::new(conn),
            key,
        })
    }

    /// Record a decision (payload stored encrypted). `kind` is the request
    /// kind: credit, fraud, or business.
    pub fn record(
        &self,
        id: &str,
        ts: i64,
        kind: &str,
        payload_json: &str,
        score: Option<f64>,
    ) -> Result<(), ScoreError> {
        let enc = encrypt(&self.key, payload_json.as_bytes())?;
        self.conn
            .lock()
            .map_err(|_| ScoreError::Crypto("store lock poisoned".to_string()))?
            .execute(
                "INSERT OR REPLACE INTO decisions (id, ts, kind, payload_enc, score) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, ts, kind, enc, score],
            )?;
        Ok(())
    }

    /// Read a decision by id (decrypts the payload).
    pub fn get(&self, id: &str) -> Result<Option<StoredDecision>, ScoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| ScoreError::Crypto("store lock poisoned".to_string()))?;
        let mut stmt =
            conn.prepare("SELECT ts, kind, payload_enc, score FROM decisions WHERE id = ?1")?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            let ts: i64 = row.get(0)?;
            let kind: String = row.get(1)?;
            let enc: String = row.get(2)?;
            let score: Option<f64> = row.get(3)?;
            let plain = decrypt(&self.key, &enc)?;
            let payload = String::from_utf8(plain)
                .map_err(|e| ScoreError::Crypto(e.to_string()))?;
            return Ok(Some(StoredDecision {
                ts,
                kind,
                payload,
                score,
            }));
        }
        Ok(None)
    }

    /// Retention: delete decisions older than the given timestamp.
    pub fn prune_before(&self, ts: i64) -> Result<u64, ScoreError> {
        let n = self
            .conn
            .lock()
            .map_err(|_| ScoreError::Crypto("store lock poisoned".to_string()))?
            .execute("DELETE FROM decisions WHERE ts < ?1", params![ts])?;
        Ok(n as u64)
    }
}
