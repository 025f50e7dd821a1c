//! x86 feature decode: CPUID leaves and the XCR0 OS-enablement mask.

use super::SupportedArch;

/// The four result words of one CPUID query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CpuidRegs {
    /// EAX.
    pub eax: u32,
    /// EBX.
    pub ebx: u32,
    /// ECX.
    pub ecx: u32,
    /// EDX.
    pub edx: u32,
}

/// Raw CPUID/XGETBV results consumed by [`SupportedArch::from_x86_registers`].
///
/// Leaves the CPU does not implement read as all-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct X86Registers {
    /// Leaf 1.
    pub leaf1: CpuidRegs,
    /// Leaf 7, sub-leaf 0.
    pub leaf7: CpuidRegs,
    /// Leaf 7, sub-leaf 1.
    pub leaf7_sub1: CpuidRegs,
    /// Extended leaf `0x8000_0001`.
    pub ext_leaf1: CpuidRegs,
    /// Low word of XCR0. Only consulted when leaf 1 reports OSXSAVE.
    pub xcr0: u32,
}

#[inline]
const fn bit(word: u32, index: u32) -> bool {
    (word >> index) & 1 == 1
}

/// Register state the OS saves and restores on context switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OsEnabledState {
    sse: bool,
    avx: bool,
    avx512: bool,
}

impl X86Registers {
    /// Leaf 1 ECX bit 27: the OS has enabled XSAVE/XGETBV.
    #[must_use]
    pub const fn osxsave(&self) -> bool {
        bit(self.leaf1.ecx, 27)
    }

    fn os_enabled_state(&self) -> OsEnabledState {
        if !self.osxsave() {
            // No XGETBV: assume the legacy behaviour of an OS saving everything.
            return OsEnabledState {
                sse: true,
                avx: true,
                avx512: true,
            };
        }
        let sse = bit(self.xcr0, 1);
        let avx = sse && bit(self.xcr0, 2);
        let avx512 = avx && bit(self.xcr0, 6);
        OsEnabledState { sse, avx, avx512 }
    }

    /// Reads the registers of the executing CPU.
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    #[must_use]
    pub fn read() -> Self {
        // SAFETY: every CPU the x86 and x86_64 targets run on implements CPUID;
        // leaves are only queried when the reported maximum covers them.
        let max_leaf = unsafe { cpuid(0, 0) }.eax;
        let max_ext_leaf = unsafe { cpuid(0x8000_0000, 0) }.eax;

        let leaf1 = if max_leaf >= 1 {
            unsafe { cpuid(1, 0) }
        } else {
            CpuidRegs::default()
        };
        let leaf7 = if max_leaf >= 7 {
            unsafe { cpuid(7, 0) }
        } else {
            CpuidRegs::default()
        };
        // Leaf 7 sub-leaf 0 EAX reports the highest sub-leaf.
        let leaf7_sub1 = if max_leaf >= 7 && leaf7.eax >= 1 {
            unsafe { cpuid(7, 1) }
        } else {
            CpuidRegs::default()
        };
        let ext_leaf1 = if max_ext_leaf >= 0x8000_0001 {
            unsafe { cpuid(0x8000_0001, 0) }
        } else {
            CpuidRegs::default()
        };

        let mut registers = Self {
            leaf1,
            leaf7,
            leaf7_sub1,
            ext_leaf1,
            xcr0: 0,
        };
        if registers.osxsave() {
            // SAFETY: OSXSAVE set means the OS enabled XGETBV.
            registers.xcr0 = unsafe { xcr0_low() };
        }
        registers
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[inline]
unsafe fn cpuid(leaf: u32, sub_leaf: u32) -> CpuidRegs {
    #[cfg(target_arch = "x86")]
    use std::arch::x86::__cpuid_count;
    #[cfg(target_arch = "x86_64")]
    use std::arch::x86_64::__cpuid_count;

    let result = __cpuid_count(leaf, sub_leaf);
    CpuidRegs {
        eax: result.eax,
        ebx: result.ebx,
        ecx: result.ecx,
        edx: result.edx,
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[target_feature(enable = "xsave")]
#[allow(clippy::cast_possible_truncation)] // Only the low word carries the state bits we read.
unsafe fn xcr0_low() -> u32 {
    #[cfg(target_arch = "x86")]
    use std::arch::x86::_xgetbv;
    #[cfg(target_arch = "x86_64")]
    use std::arch::x86_64::_xgetbv;

    _xgetbv(0) as u32
}

impl SupportedArch {
    /// Decodes x86 CPUID/XCR0 results into a snapshot.
    ///
    /// Every ISA bit is ANDed with the OS-enablement state of the registers
    /// it uses: SSE state for the legacy 128-bit sets, AVX state for the
    /// VEX-encoded sets (FMA3 and FMA4 included), AVX-512 state for the
    /// EVEX-encoded sets.
    #[must_use]
    pub fn from_x86_registers(regs: &X86Registers) -> Self {
        let os = regs.os_enabled_state();
        let leaf1 = regs.leaf1;
        let leaf7 = regs.leaf7;

        // FMA3 is VEX-encoded, so even the 128-bit forms need AVX state.
        let fma3_sse42 = bit(leaf1.ecx, 12) && os.avx;
        let avx = bit(leaf1.ecx, 28) && os.avx;
        let fma3_avx = avx && fma3_sse42;
        let avx2 = bit(leaf7.ebx, 5) && os.avx;
        let avx512vbmi2 = bit(leaf7.ecx, 6) && os.avx512;
        let avx512vnni_bw = bit(leaf7.ecx, 11) && os.avx512;

        Self {
            sse2: bit(leaf1.edx, 26) && os.sse,
            sse3: bit(leaf1.ecx, 0) && os.sse,
            ssse3: bit(leaf1.ecx, 9) && os.sse,
            sse4_1: bit(leaf1.ecx, 19) && os.sse,
            sse4_2: bit(leaf1.ecx, 20) && os.sse,
            fma3_sse42,
            fma4: bit(regs.ext_leaf1.ecx, 16) && os.avx,
            avx,
            fma3_avx,
            avx2,
            avxvnni: bit(regs.leaf7_sub1.eax, 4) && os.avx,
            fma3_avx2: avx2 && fma3_avx,
            avx512f: bit(leaf7.ebx, 16) && os.avx512,
            avx512cd: bit(leaf7.ebx, 28) && os.avx512,
            avx512dq: bit(leaf7.ebx, 17) && os.avx512,
            avx512bw: bit(leaf7.ebx, 30) && os.avx512,
            avx512er: bit(leaf7.ebx, 27) && os.avx512,
            avx512pf: bit(leaf7.ebx, 26) && os.avx512,
            avx512ifma: bit(leaf7.ebx, 21) && os.avx512,
            avx512vbmi: bit(leaf7.ecx, 1) && os.avx512,
            avx512vbmi2,
            avx512vnni_bw,
            avx512vnni_vbmi2: avx512vbmi2 && avx512vnni_bw,
            ..Self::none()
        }
    }
}
