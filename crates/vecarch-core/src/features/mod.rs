//! Runtime CPU feature probe and the process-wide capability snapshot.
//!
//! This module provides:
//! - [`SupportedArch`], the immutable record of usable instruction sets
//! - [`available_architectures`], the lazily computed, cached snapshot
//! - [`initialize`], for publishing a configured snapshot explicitly
//!
//! A feature is reported only when the CPU implements it *and* the OS has
//! enabled the register state it needs.

use std::sync::OnceLock;

use serde::Serialize;

use crate::arch::ArchId;
use crate::config::ProbeConfig;
use crate::error::{Error, Result};

mod auxv;
mod x86;

pub use auxv::{HWCAP2_I8MM, HWCAP_NEON, HWCAP_SVE, HWCAP_V};
pub use x86::{CpuidRegs, X86Registers};

#[cfg(test)]
mod probe_tests;

/// Snapshot of the instruction sets usable on this machine.
///
/// Derived fields (`fma3_avx`, `fma3_avx2`, `avx512vnni_vbmi2`) are
/// conjunctions of primitive probe results, not hardware bits of their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SupportedArch {
    /// SSE2.
    pub sse2: bool,
    /// SSE3.
    pub sse3: bool,
    /// SSSE3.
    pub ssse3: bool,
    /// SSE4.1.
    pub sse4_1: bool,
    /// SSE4.2.
    pub sse4_2: bool,
    /// FMA3 with SSE register state.
    pub fma3_sse42: bool,
    /// AMD FMA4.
    pub fma4: bool,
    /// AVX.
    pub avx: bool,
    /// `avx && fma3_sse42`.
    pub fma3_avx: bool,
    /// AVX2.
    pub avx2: bool,
    /// AVX-VNNI.
    pub avxvnni: bool,
    /// `avx2 && fma3_avx`.
    pub fma3_avx2: bool,
    /// AVX-512F.
    pub avx512f: bool,
    /// AVX-512CD.
    pub avx512cd: bool,
    /// AVX-512DQ.
    pub avx512dq: bool,
    /// AVX-512BW.
    pub avx512bw: bool,
    /// AVX-512ER.
    pub avx512er: bool,
    /// AVX-512PF.
    pub avx512pf: bool,
    /// AVX-512IFMA.
    pub avx512ifma: bool,
    /// AVX-512VBMI.
    pub avx512vbmi: bool,
    /// AVX-512VBMI2.
    pub avx512vbmi2: bool,
    /// AVX-512 VNNI (the hardware bit).
    pub avx512vnni_bw: bool,
    /// `avx512vbmi2 && avx512vnni_bw`.
    pub avx512vnni_vbmi2: bool,
    /// NEON.
    pub neon: bool,
    /// AArch64 NEON.
    pub neon64: bool,
    /// AArch64 8-bit integer matrix multiply.
    pub i8mm_neon64: bool,
    /// SVE, shared by every SVE width tag.
    pub sve: bool,
    /// RISC-V V, shared by every RVV width tag.
    pub rvv: bool,
    /// WebAssembly SIMD128.
    pub wasm: bool,
}

impl SupportedArch {
    /// A snapshot with every feature unsupported.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            sse2: false,
            sse3: false,
            ssse3: false,
            sse4_1: false,
            sse4_2: false,
            fma3_sse42: false,
            fma4: false,
            avx: false,
            fma3_avx: false,
            avx2: false,
            avxvnni: false,
            fma3_avx2: false,
            avx512f: false,
            avx512cd: false,
            avx512dq: false,
            avx512bw: false,
            avx512er: false,
            avx512pf: false,
            avx512ifma: false,
            avx512vbmi: false,
            avx512vbmi2: false,
            avx512vnni_bw: false,
            avx512vnni_vbmi2: false,
            neon: false,
            neon64: false,
            i8mm_neon64: false,
            sve: false,
            rvv: false,
            wasm: false,
        }
    }

    /// Probes the executing CPU and OS.
    ///
    /// Never fails: anything the platform cannot report is left unsupported.
    #[must_use]
    pub fn detect() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            return Self::from_x86_registers(&X86Registers::read());
        }

        #[cfg(target_arch = "aarch64")]
        {
            let (hwcap, hwcap2) = auxv::read_hwcaps();
            return Self::from_aarch64_hwcaps(hwcap, hwcap2);
        }

        #[cfg(target_arch = "arm")]
        {
            let (hwcap, _) = auxv::read_hwcaps();
            return Self::from_arm_hwcap(hwcap);
        }

        #[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
        {
            let (hwcap, _) = auxv::read_hwcaps();
            return Self::from_riscv_hwcap(hwcap);
        }

        #[allow(unreachable_code)]
        Self {
            wasm: cfg!(all(target_family = "wasm", target_feature = "simd128")),
            ..Self::none()
        }
    }

    /// Returns `true` if the tag is usable according to this snapshot.
    #[inline]
    #[must_use]
    pub fn has(&self, id: ArchId) -> bool {
        let mut flags = *self;
        *flags.flag_mut(id)
    }

    // The one table from tag to snapshot field; reads and masking both go
    // through it. SVE and RVV widths share a single presence flag.
    fn flag_mut(&mut self, id: ArchId) -> &mut bool {
        match id {
            ArchId::Sse2 => &mut self.sse2,
            ArchId::Sse3 => &mut self.sse3,
            ArchId::Ssse3 => &mut self.ssse3,
            ArchId::Sse4_1 => &mut self.sse4_1,
            ArchId::Sse4_2 => &mut self.sse4_2,
            ArchId::Fma3Sse4_2 => &mut self.fma3_sse42,
            ArchId::Fma4 => &mut self.fma4,
            ArchId::Avx => &mut self.avx,
            ArchId::Fma3Avx => &mut self.fma3_avx,
            ArchId::Avx2 => &mut self.avx2,
            ArchId::AvxVnni => &mut self.avxvnni,
            ArchId::Fma3Avx2 => &mut self.fma3_avx2,
            ArchId::Avx512f => &mut self.avx512f,
            ArchId::Avx512cd => &mut self.avx512cd,
            ArchId::Avx512dq => &mut self.avx512dq,
            ArchId::Avx512bw => &mut self.avx512bw,
            ArchId::Avx512er => &mut self.avx512er,
            ArchId::Avx512pf => &mut self.avx512pf,
            ArchId::Avx512ifma => &mut self.avx512ifma,
            ArchId::Avx512vbmi => &mut self.avx512vbmi,
            ArchId::Avx512vbmi2 => &mut self.avx512vbmi2,
            ArchId::Avx512VnniAvx512bw => &mut self.avx512vnni_bw,
            ArchId::Avx512VnniAvx512vbmi2 => &mut self.avx512vnni_vbmi2,
            ArchId::Neon => &mut self.neon,
            ArchId::Neon64 => &mut self.neon64,
            ArchId::I8mmNeon64 => &mut self.i8mm_neon64,
            ArchId::Sve128 | ArchId::Sve256 | ArchId::Sve512 => &mut self.sve,
            ArchId::Rvv128 | ArchId::Rvv256 | ArchId::Rvv512 => &mut self.rvv,
            ArchId::Wasm => &mut self.wasm,
        }
    }

    /// Returns a copy with `disabled` switched off, along with every tag that
    /// builds on one of them.
    #[must_use]
    pub fn without(&self, disabled: &[ArchId]) -> Self {
        let mut masked = *self;
        for id in ArchId::ALL {
            if disabled.iter().any(|&off| id.implies(off)) {
                *masked.flag_mut(id) = false;
            }
        }
        masked
    }

    /// Usable tags, in catalogue order.
    pub fn available(&self) -> impl Iterator<Item = ArchId> {
        let snapshot = *self;
        ArchId::ALL.into_iter().filter(move |&id| snapshot.has(id))
    }

    /// The most capable usable tag, if any.
    #[must_use]
    pub fn best(&self) -> Option<ArchId> {
        ArchId::ALL.into_iter().rev().find(|&id| self.has(id))
    }
}

/// Published snapshot - probed once at first use.
static SUPPORTED: OnceLock<SupportedArch> = OnceLock::new();

/// Returns the process-wide feature snapshot.
///
/// The first call probes the CPU and applies any `VECARCH_DISABLED` mask;
/// later calls return the cached value without locking.
#[inline]
#[must_use]
pub fn available_architectures() -> SupportedArch {
    *SUPPORTED.get_or_init(probe_with_env_config)
}

fn probe_with_env_config() -> SupportedArch {
    let detected = SupportedArch::detect();
    let snapshot = match ProbeConfig::from_env().and_then(|config| config.disabled_archs()) {
        Ok(disabled) => detected.without(&disabled),
        Err(err) => {
            tracing::warn!(error = %err, "Ignoring invalid vecarch probe configuration");
            detected
        }
    };
    tracing::debug!(best = ?snapshot.best(), "CPU feature snapshot published");
    snapshot
}

/// Probes the CPU, applies `config` and publishes the result as the
/// process-wide snapshot.
///
/// # Errors
///
/// - [`Error::Config`] if a disabled name is not a known tag.
/// - [`Error::AlreadyInitialized`] if the snapshot was already published,
///   either by an earlier `initialize` or by a capability query.
pub fn initialize(config: &ProbeConfig) -> Result<SupportedArch> {
    let disabled = config.disabled_archs()?;
    let snapshot = SupportedArch::detect().without(&disabled);
    SUPPORTED
        .set(snapshot)
        .map_err(|_| Error::AlreadyInitialized)?;
    tracing::debug!(
        best = ?snapshot.best(),
        disabled = disabled.len(),
        "CPU feature snapshot published"
    );
    Ok(snapshot)
}
