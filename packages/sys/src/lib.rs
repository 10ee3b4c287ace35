//! # dirstore-sys
//!
//! Host statistics for the `systeminfo` action.
//!
//! A [`HostInfo`] is a read-only snapshot taken on demand; nothing is cached
//! between calls. Snapshots come from a [`HostProbe`]: [`SystemProbe`] asks the
//! running host, and a `HostInfo` is itself a probe that always answers with a
//! copy of itself, which keeps dispatcher tests deterministic.
//!
//! ## Example
//!
//! ```rust
//! use dirstore_sys::{HostProbe, SystemProbe};
//!
//! let info = SystemProbe::new().snapshot();
//! assert!(info.cpu_cores >= 1);
//! println!("{info}");
//! ```

mod info;
mod probe;

pub use info::{arch_name, os_type, HostInfo};
pub use probe::{HostProbe, SystemProbe};
