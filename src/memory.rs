//! Host memory probing.
//!
//! The probe is an injected capability: the engine consumes it exactly once
//! per run and derives the batch size from the sample. Samples are
//! best-effort and may race with other processes on the host.

use sysinfo::System;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Capability that reports currently available host memory.
pub trait MemoryProbe {
    /// Available memory in megabytes at call time.
    fn available_mb(&self) -> f64;
}

/// Probe backed by the host OS.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemMemoryProbe;

impl MemoryProbe for SystemMemoryProbe {
    fn available_mb(&self) -> f64 {
        let mut system = System::new();
        system.refresh_memory();
        system.available_memory() as f64 / BYTES_PER_MB
    }
}

/// Fixed-value probe for tests and simulated memory-pressure runs.
#[derive(Clone, Copy, Debug)]
pub struct FixedMemoryProbe {
    mb: f64,
}

impl FixedMemoryProbe {
    /// Create a probe that always reports `mb` megabytes available.
    pub fn new(mb: f64) -> Self {
        Self { mb }
    }
}

impl MemoryProbe for FixedMemoryProbe {
    fn available_mb(&self) -> f64 {
        self.mb
    }
}
