//! Local event record storage.
//!
//! Event records live in a single JSON file under the data directory. The
//! store loads the whole file, mutates in memory, and writes it back through
//! a temporary file so a crash mid-write never truncates existing records.

mod error;

pub use error::StoreError;

use chrono::prelude::*;
use fake::Dummy;
use log::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "events.json";

/// Specifying the kind of an attached file.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Pdf,
    Audio,
}

impl AttachmentKind {
    /// Infer the kind from a file extension. Returns None for extensions the
    /// application does not handle.
    ///
    pub fn from_path(path: &str) -> Option<AttachmentKind> {
        let extension = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())?;
        match extension.as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "webp" => Some(AttachmentKind::Image),
            "pdf" => Some(AttachmentKind::Pdf),
            "mp3" | "wav" | "m4a" | "ogg" | "flac" => Some(AttachmentKind::Audio),
            _ => None,
        }
    }

    /// Short marker used in list rendering.
    ///
    pub fn marker(&self) -> &'static str {
        match self {
            AttachmentKind::Image => "IMG",
            AttachmentKind::Pdf => "PDF",
            AttachmentKind::Audio => "AUD",
        }
    }
}

/// Defines attached file metadata.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub path: String,
    pub kind: AttachmentKind,
}

impl Attachment {
    /// Build attachment metadata from a path, inferring the kind from the
    /// extension. Returns None for unsupported extensions.
    ///
    pub fn from_path(path: &str) -> Option<Attachment> {
        let kind = AttachmentKind::from_path(path)?;
        let name = Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path)
            .to_string();
        Some(Attachment {
            name,
            path: path.to_string(),
            kind,
        })
    }
}

/// Defines a stored event record.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub attachments: Vec<Attachment>,
    pub created_at: String,
}

/// A new record before the store has assigned it an id.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEventRecord {
    pub title: String,
    pub description: String,
    pub attachments: Vec<Attachment>,
}

/// File shape: records plus the last assigned id.
///
#[derive(Serialize, Deserialize, Default)]
struct FileSpec {
    #[serde(default)]
    next_id: i64,
    #[serde(default)]
    records: Vec<EventRecord>,
}

/// Oversees persistence of event records to the data file.
///
pub struct Store {
    file_path: PathBuf,
}

impl Store {
    /// Return a store rooted at the given data directory, creating the
    /// directory if necessary.
    ///
    pub fn open(data_dir: &Path) -> Result<Store, StoreError> {
        if !data_dir.exists() {
            fs::create_dir_all(data_dir).map_err(|e| StoreError::CreateDirectoryFailed {
                path: data_dir.to_path_buf(),
                source: e,
            })?;
        }
        Ok(Store {
            file_path: data_dir.join(FILE_NAME),
        })
    }

    /// Return all records, newest first.
    ///
    pub fn list(&self) -> Result<Vec<EventRecord>, StoreError> {
        let mut records = self.read()?.records;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    /// Insert a new record, assigning the next id and the creation
    /// timestamp. Returns the stored record.
    ///
    pub fn insert(&self, new: NewEventRecord) -> Result<EventRecord, StoreError> {
        let mut spec = self.read()?;
        spec.next_id += 1;
        let record = EventRecord {
            id: spec.next_id,
            title: new.title,
            description: new.description,
            attachments: new.attachments,
            created_at: Utc::now().to_rfc3339(),
        };
        spec.records.push(record.clone());
        self.write(&spec)?;
        info!("Stored event record {} ({}).", record.id, record.title);
        Ok(record)
    }

    /// Delete the record with the given id.
    ///
    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut spec = self.read()?;
        let before = spec.records.len();
        spec.records.retain(|record| record.id != id);
        if spec.records.len() == before {
            return Err(StoreError::RecordNotFound { id });
        }
        self.write(&spec)?;
        info!("Deleted event record {}.", id);
        Ok(())
    }

    fn read(&self) -> Result<FileSpec, StoreError> {
        if !self.file_path.exists() {
            return Ok(FileSpec::default());
        }
        let contents = fs::read_to_string(&self.file_path).map_err(|e| StoreError::ReadFailed {
            path: self.file_path.clone(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| StoreError::ParseFailed {
            path: self.file_path.clone(),
            message: e.to_string(),
        })
    }

    fn write(&self, spec: &FileSpec) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(spec)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;
        // Write to a sibling temp file first, then rename over the target.
        let suffix: u32 = rand::thread_rng().gen();
        let tmp_path = self.file_path.with_extension(format!("json.{:08x}", suffix));
        let result = fs::File::create(&tmp_path)
            .and_then(|mut file| file.write_all(contents.as_bytes()))
            .and_then(|_| fs::rename(&tmp_path, &self.file_path));
        result.map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            StoreError::WriteFailed {
                path: self.file_path.clone(),
                source: e,
            }
        })
    }
}
