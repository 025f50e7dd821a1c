//! ARM and RISC-V feature decode from the ELF auxiliary vector.
//!
//! The kernel publishes hardware capabilities as bitmasks under `AT_HWCAP`
//! and `AT_HWCAP2`; bit meanings are architecture specific.

use super::SupportedArch;

/// 32-bit ARM `AT_HWCAP` bit for NEON.
pub const HWCAP_NEON: u64 = 1 << 12;
/// AArch64 `AT_HWCAP` bit for SVE.
pub const HWCAP_SVE: u64 = 1 << 22;
/// AArch64 `AT_HWCAP2` bit for the 8-bit integer matrix multiply extension.
pub const HWCAP2_I8MM: u64 = 1 << 13;
/// RISC-V `AT_HWCAP` bit for the V extension (one bit per ISA letter).
pub const HWCAP_V: u64 = 1 << (b'V' - b'A');

impl SupportedArch {
    /// Decodes AArch64 capabilities. NEON is architectural on AArch64.
    #[must_use]
    pub const fn from_aarch64_hwcaps(hwcap: u64, hwcap2: u64) -> Self {
        Self {
            neon: true,
            neon64: true,
            i8mm_neon64: hwcap2 & HWCAP2_I8MM != 0,
            sve: hwcap & HWCAP_SVE != 0,
            ..Self::none()
        }
    }

    /// Decodes 32-bit ARM capabilities.
    #[must_use]
    pub const fn from_arm_hwcap(hwcap: u64) -> Self {
        Self {
            neon: hwcap & HWCAP_NEON != 0,
            ..Self::none()
        }
    }

    /// Decodes RISC-V capabilities.
    #[must_use]
    pub const fn from_riscv_hwcap(hwcap: u64) -> Self {
        Self {
            rvv: hwcap & HWCAP_V != 0,
            ..Self::none()
        }
    }
}

/// Returns `(AT_HWCAP, AT_HWCAP2)`, or zeros where the OS has no auxiliary
/// vector to query.
#[cfg(any(
    target_arch = "aarch64",
    target_arch = "arm",
    target_arch = "riscv32",
    target_arch = "riscv64"
))]
#[allow(clippy::useless_conversion)] // c_ulong is 32 bits wide on arm and riscv32
pub(super) fn read_hwcaps() -> (u64, u64) {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    {
        const AT_HWCAP: libc::c_ulong = 16;
        const AT_HWCAP2: libc::c_ulong = 26;

        // SAFETY: getauxval has no preconditions; absent keys read as 0.
        let hwcap = unsafe { libc::getauxval(AT_HWCAP) };
        let hwcap2 = unsafe { libc::getauxval(AT_HWCAP2) };
        return (u64::from(hwcap), u64::from(hwcap2));
    }

    #[allow(unreachable_code)]
    (0, 0)
}
