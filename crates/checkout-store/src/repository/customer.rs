//! # Customer Store
//!
//! Customers in one flat file, loaded whole and rewritten whole.
//!
//! ## Rewrite
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    write_all(map)                                       │
//! │                                                                         │
//! │  atomic_writes = true (default)                                        │
//! │  ─────────────────────────────                                         │
//! │  customers.txt.<uuid>.tmp ◄── encoded lines, fsync                     │
//! │       │                                                                 │
//! │       ▼ rename                                                          │
//! │  customers.txt              (old or new contents, never half of each)  │
//! │                                                                         │
//! │  atomic_writes = false                                                 │
//! │  ─────────────────────                                                 │
//! │  customers.txt ◄── truncate + write in place                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! One store instance serialises its own callers with a mutex held from load
//! to rewrite. Two instances over the same path, or two processes, can still
//! interleave and lose updates.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use checkout_core::{CoreResult, Customer, CustomerRepository};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::codec::{decode_record, encode_customer};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// Customer repository backed by a pipe-delimited text file.
///
/// Only scalar fields are persisted: customers come back with an empty cart
/// and no address.
///
/// ## Usage
/// ```rust,no_run
/// use checkout_store::{FileCustomerStore, StoreConfig};
///
/// let store = FileCustomerStore::open(StoreConfig::new("customers.txt"))?;
/// if let Some(customer) = store.find_by_id("C1001") {
///     println!("{} has {} points", customer.id(), customer.points());
/// }
/// # Ok::<(), checkout_store::StoreError>(())
/// ```
#[derive(Debug)]
pub struct FileCustomerStore {
    config: StoreConfig,
    lock: Mutex<()>,
}

impl FileCustomerStore {
    /// Opens the store, creating an empty data file if none exists.
    ///
    /// ## Errors
    /// `CreateFailed` if the file (or, with `create_parent_dirs`, its
    /// directory) cannot be created.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        let path = config.data_file.clone();
        let create_failed = |source: std::io::Error| StoreError::CreateFailed {
            path: path.clone(),
            source,
        };

        if config.create_parent_dirs {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(create_failed)?;
            }
        }

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => info!(path = %path.display(), "Created empty customer data file"),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {}
            Err(err) => return Err(create_failed(err)),
        }

        info!(
            path = %path.display(),
            atomic_writes = config.atomic_writes,
            "Customer store opened"
        );

        Ok(FileCustomerStore {
            config,
            lock: Mutex::new(()),
        })
    }

    /// Path of the data file.
    pub fn path(&self) -> &Path {
        &self.config.data_file
    }

    /// Looks up a customer. A miss, or an unreadable file, is `None`.
    pub fn find_by_id(&self, customer_id: &str) -> Option<Customer> {
        let _guard = self.lock();
        self.read_all().remove(customer_id)
    }

    /// Returns every stored customer, ordered by identifier.
    pub fn find_all(&self) -> Vec<Customer> {
        let _guard = self.lock();
        self.read_all().into_values().collect()
    }

    /// Inserts or overwrites the customer and rewrites the file.
    ///
    /// ## Errors
    /// `WriteFailed` if the rewrite fails.
    pub fn save(&self, customer: &Customer) -> StoreResult<()> {
        let _guard = self.lock();
        let mut customers = self.read_all();
        customers.insert(customer.id().to_string(), customer.clone());
        self.write_all(&customers)?;

        debug!(customer_id = %customer.id(), "Customer saved");
        Ok(())
    }

    /// Removes the customer and rewrites the file.
    ///
    /// ## Errors
    /// - `CustomerNotFound` if the id is absent; the file is not touched
    /// - `WriteFailed` if the rewrite fails
    pub fn delete(&self, customer_id: &str) -> StoreResult<()> {
        let _guard = self.lock();
        let mut customers = self.read_all();
        if customers.remove(customer_id).is_none() {
            return Err(StoreError::CustomerNotFound(customer_id.to_string()));
        }
        self.write_all(&customers)?;

        debug!(customer_id = %customer_id, "Customer deleted");
        Ok(())
    }

    // =========================================================================
    // Whole-File Load / Rewrite
    // =========================================================================

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads every decodable line. Unreadable file → empty map.
    ///
    /// Lines are decoded one at a time from raw bytes, so a line that is not
    /// UTF-8 is skipped like any other malformed record.
    fn read_all(&self) -> BTreeMap<String, Customer> {
        let path = self.path();
        let contents = match fs::read(path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Failed to read customer data file");
                return BTreeMap::new();
            }
        };

        let mut customers = BTreeMap::new();
        for raw in contents.split(|&byte| byte == b'\n') {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            if raw.trim_ascii().is_empty() {
                continue;
            }
            let Some(customer) = decode_record(raw) else {
                continue;
            };
            let id = customer.id().to_string();
            if customers.insert(id.clone(), customer).is_some() {
                warn!(customer_id = %id, "Duplicate customer record, keeping the later line");
            }
        }

        debug!(path = %path.display(), count = customers.len(), "Loaded customers");
        customers
    }

    fn write_all(&self, customers: &BTreeMap<String, Customer>) -> StoreResult<()> {
        let path = self.path();
        let contents = customers
            .values()
            .map(encode_customer)
            .collect::<Vec<_>>()
            .join("\n");

        let result = if self.config.atomic_writes {
            atomic_write(path, contents.as_bytes())
        } else {
            fs::write(path, contents.as_bytes())
        };

        result.map_err(|source| StoreError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), count = customers.len(), "Rewrote customer data file");
        Ok(())
    }
}

impl CustomerRepository for FileCustomerStore {
    fn find_by_id(&self, customer_id: &str) -> CoreResult<Option<Customer>> {
        Ok(FileCustomerStore::find_by_id(self, customer_id))
    }

    fn save(&self, customer: &Customer) -> CoreResult<()> {
        Ok(FileCustomerStore::save(self, customer)?)
    }

    fn delete(&self, customer_id: &str) -> CoreResult<()> {
        Ok(FileCustomerStore::delete(self, customer_id)?)
    }
}

/// Writes `data` to a unique temp file beside `path`, syncs it, renames it
/// over `path`, then syncs the directory so the rename itself is durable.
fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let temp = temp_path(path);

    if let Err(err) = write_synced(&temp, data) {
        let _ = fs::remove_file(&temp);
        return Err(err);
    }

    let renamed = match fs::rename(&temp, path) {
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            fs::remove_file(path).and_then(|()| fs::rename(&temp, path))
        }
        other => other,
    };
    if renamed.is_err() {
        let _ = fs::remove_file(&temp);
        return renamed;
    }

    sync_parent_dir(path);
    Ok(())
}

/// Best effort: some platforms refuse to open or sync a directory.
fn sync_parent_dir(path: &Path) {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if let Err(err) = fs::File::open(parent).and_then(|dir| dir.sync_all()) {
        debug!(path = %parent.display(), error = %err, "Directory sync skipped");
    }
}

fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    file.write_all(data)?;
    file.sync_all()
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}.{}.tmp", name, Uuid::new_v4()))
}

// =============================================================================
// Unit Tests
// =============================================================================
