//! Ledger transport abstraction.
//!
//! The external substrate that serializes and persists transactions is
//! consumed through [`LedgerTransport`]: raw byte get/put on string keys,
//! nothing else. No range scans, no multi-key transactions. Implementations
//! must execute invocations with a single effective writer and observe
//! read-your-writes within one invocation; the index's read-modify-write
//! depends on both.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use snafu::{ResultExt, Snafu};

/// Errors surfaced by transport implementations.
#[derive(Debug, Snafu)]
pub enum TransportError {
    /// Filesystem I/O failed.
    #[snafu(display("I/O error on {path}: {source}"))]
    Io {
        /// Path the operation touched.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Raw byte access to the ledger's persisted store.
pub trait LedgerTransport: Send + Sync {
    /// Reads the bytes stored under `key`, `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Io` if the underlying store cannot be read.
    fn raw_get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Writes `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Io` if the underlying store rejects the write.
    fn raw_put(&self, key: &str, value: &[u8]) -> Result<()>;
}

/// In-memory transport for tests and examples.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    slots: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryTransport {
    /// Creates an empty transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    /// Whether nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }
}

impl LedgerTransport for MemoryTransport {
    fn raw_get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.slots.read().get(key).cloned())
    }

    fn raw_put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.slots.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// One-file-per-key transport rooted at a directory.
///
/// Stands in for the external substrate at the same interface so the shell
/// binary has something durable to run against. Key names are hex-encoded
/// so arbitrary ids stay path-safe; writes go to a temp file first and are
/// renamed into place after fsync.
pub struct DirTransport {
    root: PathBuf,
}

impl DirTransport {
    /// Opens the transport rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Io` if the directory cannot be created.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).context(IoSnafu { path: root.display().to_string() })?;
        Ok(Self { root })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(hex_name(key))
    }
}

impl LedgerTransport for DirTransport {
    fn raw_get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.key_path(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(TransportError::Io { path: path.display().to_string(), source: err }),
        }
    }

    fn raw_put(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.key_path(key);
        let tmp = path.with_extension("tmp");
        let tmp_display = tmp.display().to_string();

        let mut file = fs::File::create(&tmp).context(IoSnafu { path: tmp_display.clone() })?;
        file.write_all(value).context(IoSnafu { path: tmp_display.clone() })?;
        file.sync_all().context(IoSnafu { path: tmp_display.clone() })?;
        drop(file);

        fs::rename(&tmp, &path).context(IoSnafu { path: path.display().to_string() })
    }
}

/// Lowercase hex of the key bytes; collision-free and path-safe.
fn hex_name(key: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut name = String::with_capacity(key.len() * 2);
    for byte in key.as_bytes() {
        name.push(HEX[usize::from(byte >> 4)] as char);
        name.push(HEX[usize::from(byte & 0x0F)] as char);
    }
    name
}
