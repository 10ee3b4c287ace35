//! Host probing abstraction for testing.

use std::num::NonZeroUsize;

use sysinfo::{System, Users};

use crate::info::{arch_name, os_type, HostInfo};

/// Trait for taking host snapshots.
///
/// Implementations can query the real host or return canned values in tests.
pub trait HostProbe: Send + Sync {
    fn snapshot(&self) -> HostInfo;
}

/// Production probe backed by `sysinfo`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl SystemProbe {
    pub fn new() -> Self {
        Self
    }
}

impl HostProbe for SystemProbe {
    fn snapshot(&self) -> HostInfo {
        let mut system = System::new();
        system.refresh_memory();
        system.refresh_cpu();

        let cpu_cores = match system.cpus().len() {
            0 => std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
            n => n,
        };

        HostInfo {
            username: current_username(&mut system),
            os_type: os_type(std::env::consts::OS),
            arch: arch_name(std::env::consts::ARCH),
            cpu_cores,
            free_memory_bytes: system.free_memory(),
            uptime_secs: System::uptime(),
        }
    }
}

impl HostProbe for HostInfo {
    fn snapshot(&self) -> HostInfo {
        self.clone()
    }
}

/// Owner of this process, falling back to the login environment.
fn current_username(system: &mut System) -> String {
    process_owner(system)
        .or_else(|| env_username("USER"))
        .or_else(|| env_username("USERNAME"))
        .unwrap_or_else(|| "unknown".to_string())
}

fn process_owner(system: &mut System) -> Option<String> {
    let pid = match sysinfo::get_current_pid() {
        Ok(pid) => pid,
        Err(err) => {
            tracing::debug!(error = err, "current pid unavailable");
            return None;
        }
    };

    system.refresh_process(pid);
    let uid = system.process(pid)?.user_id()?.clone();
    let users = Users::new_with_refreshed_list();
    users
        .get_user_by_id(&uid)
        .map(|user| user.name().to_string())
        .filter(|name| !name.is_empty())
}

fn env_username(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|name| !name.is_empty())
}
