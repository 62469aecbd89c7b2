//! # Platform Support
//!
//! Kernel-mediated probing of the process's own address space, plus the
//! signal-mask guard that scopes a traceback.
//!
//! - **Linux**: `process_vm_readv()` against our own PID
//! - **macOS**: `mach_vm_read_overwrite()` against `mach_task_self()`
//!
//! Both primitives report an unreadable address as an error code rather
//! than delivering SIGSEGV/SIGBUS, which is exactly the guarantee the
//! guarded-read contract needs.

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
mod unsupported;

#[cfg(target_os = "linux")]
pub use linux::ProcessMemory;
#[cfg(target_os = "macos")]
pub use macos::ProcessMemory;
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
pub use unsupported::ProcessMemory;

#[cfg(unix)]
mod scope
{
    use std::io;
    use std::mem;
    use std::ptr;

    use crate::error::TraceError;

    /// RAII guard that quiets signal delivery for the duration of a walk.
    ///
    /// A traceback must not be interleaved with asynchronous signal handlers
    /// poking at the same stack it is reading, so on entry the guard saves
    /// the current mask and blocks every signal except `SIGSEGV` (which the
    /// kernel must still be able to deliver should a probe ever escape the
    /// guarded-read path). The previous mask is restored when the guard is
    /// dropped, on every exit path.
    ///
    /// The mask is process-wide configuration; only the traceback driver
    /// touches it, and only through this guard.
    pub struct SignalScope
    {
        saved: libc::sigset_t,
    }

    impl SignalScope
    {
        /// Save the current mask and install the walk-time mask.
        pub fn acquire() -> Result<Self, TraceError>
        {
            unsafe {
                let mut saved: libc::sigset_t = mem::zeroed();
                let mut blocked: libc::sigset_t = mem::zeroed();
                libc::sigfillset(&mut blocked);
                libc::sigdelset(&mut blocked, libc::SIGSEGV);
                if libc::sigprocmask(libc::SIG_SETMASK, &blocked, &mut saved) != 0 {
                    return Err(TraceError::Signal(io::Error::last_os_error()));
                }
                Ok(Self { saved })
            }
        }
    }

    impl Drop for SignalScope
    {
        fn drop(&mut self)
        {
            // Best effort restore - there is no way to report failure from here
            unsafe {
                let _ = libc::sigprocmask(libc::SIG_SETMASK, &self.saved, ptr::null_mut());
            }
        }
    }
}

#[cfg(not(unix))]
mod scope
{
    use crate::error::TraceError;

    /// No-op stand-in on targets without POSIX signal masks.
    pub struct SignalScope;

    impl SignalScope
    {
        pub fn acquire() -> Result<Self, TraceError>
        {
            Ok(Self)
        }
    }
}

pub use scope::SignalScope;
