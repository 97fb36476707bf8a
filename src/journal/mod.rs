//! The journal is organized through [store::Journal].
//! The basic idea is:
//!  - One append-only text file, one `DD.MM.YYYY,HH:MM:SS,LABEL` line per
//!    arrive/leave event, in local wall-clock time.
//!  - A snapshot file next to it that always holds the latest tick's
//!    departure line; it turns into real journal lines when a crashed
//!    tracker's session has to be recovered.
//!  - Reading is a single linear pass that pairs arrives with leaves.

pub mod entry;
pub mod event;
pub mod sessions;
pub mod store;
