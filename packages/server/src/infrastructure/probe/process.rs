//! Process introspection via `sysinfo`.

use std::sync::Mutex;

use sysinfo::{Pid, ProcessRefreshKind, System};

/// Read-only view of the running processes
pub trait ProcessInspector: Send + Sync {
    /// Name of the process with `pid`, if it is still running
    fn process_name(&self, pid: u32) -> Option<String>;

    /// Names of all running processes
    fn process_names(&self) -> Vec<String>;
}

/// ProcessInspector backed by a reused `sysinfo::System`
pub struct SysinfoProcessInspector {
    system: Mutex<System>,
}

impl SysinfoProcessInspector {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for SysinfoProcessInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessInspector for SysinfoProcessInspector {
    fn process_name(&self, pid: u32) -> Option<String> {
        let mut system = self.system.lock().ok()?;
        let sys_pid = Pid::from_u32(pid);
        if !system.refresh_process_specifics(sys_pid, ProcessRefreshKind::new()) {
            return None;
        }
        system.process(sys_pid).map(|p| p.name().to_string())
    }

    fn process_names(&self) -> Vec<String> {
        let Ok(mut system) = self.system.lock() else {
            return Vec::new();
        };
        system.refresh_processes_specifics(ProcessRefreshKind::new());
        system
            .processes()
            .values()
            .map(|p| p.name().to_string())
            .collect()
    }
}
