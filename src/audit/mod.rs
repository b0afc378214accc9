//! Audit logging for flashdeck
//!
//! Records every create and delete of sets and cards, and every deck save,
//! in an append-only audit log.
//!
//! - `AuditEntry`: a single log entry with timestamp, operation, entity
//!   information, and optional before/after values.
//! - `AuditLogger`: appends entries to the log file as line-delimited JSON
//!   (JSONL) and reads them back.
//!
//! # Example
//!
//! ```rust,ignore
//! use flashdeck::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! let entry = AuditEntry::create(EntityType::Set, "set-1", Some("Spanish".into()), &set);
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
