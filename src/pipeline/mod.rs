//! Pipeline stages for one autofill submission.
//!
//! Each submodule implements exactly one step and is testable on its own.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ validate ──▶ encode ──▶ transport ──▶ bind
//! (file)    (type/size)  (base64)   (POST+timeout) (form)
//! ```
//!
//! 1. [`input`]     — describe a picked or dropped file (`FileCandidate`)
//! 2. [`validate`]  — MIME type and size checks; the only way to get a
//!    `SelectedFile`
//! 3. [`encode`]    — read the bytes and base64 them off the async workers
//! 4. [`transport`] — the single HTTP exchange, bounded by a timeout
//! 5. [`bind`]      — map `personalInfo` keys onto form controls

pub mod bind;
pub mod encode;
pub mod input;
pub mod transport;
pub mod validate;
