//! Architecture tag catalogue.
//!
//! Every instruction-set family/generation the probe knows about has:
//!
//! - an [`ArchId`] variant, the runtime identity used by the feature snapshot
//!   table and by configuration;
//! - a zero-sized marker type implementing [`Arch`] (see [`tags`]), the
//!   compile-time identity kernels are selected by.
//!
//! Tags form a partial order through [`ArchId::bases`]: `fma3<avx2>` implies
//! both `avx2` and `fma3<avx>`, `fma3<avx>` implies `avx`, and so on down to
//! the family roots (`sse2`, `neon`, the SVE/RVV widths and `wasm`).

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownArch;

pub mod tags;

pub use tags::{
    Arch, Avx, Avx2, Avx512Vnni, Avx512bw, Avx512cd, Avx512dq, Avx512er, Avx512f, Avx512ifma,
    Avx512pf, Avx512vbmi, Avx512vbmi2, AvxVnni, Fma3, Fma3Base, Fma4, I8mm, I8mmBase, Neon, Neon64,
    Rvv, Sse2, Sse3, Sse4_1, Sse4_2, Ssse3, Sve, VnniBase, Wasm,
};


/// Identity of one concrete architecture tag.
///
/// Variants are declared in increasing order of capability within each
/// family, so the derived `Ord` ranks `avx512f` above `fma3<avx2>` above `avx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArchId {
    /// SSE2 (128-bit).
    Sse2,
    /// SSE3.
    Sse3,
    /// Supplemental SSE3.
    Ssse3,
    /// SSE4.1.
    Sse4_1,
    /// SSE4.2.
    Sse4_2,
    /// FMA3 on top of SSE4.2 (128-bit fused multiply-add).
    Fma3Sse4_2,
    /// AMD FMA4.
    Fma4,
    /// AVX (256-bit floating point).
    Avx,
    /// FMA3 on top of AVX.
    Fma3Avx,
    /// AVX2 (256-bit integer).
    Avx2,
    /// AVX-VNNI (VEX-encoded dot-product instructions).
    AvxVnni,
    /// FMA3 on top of AVX2.
    Fma3Avx2,
    /// AVX-512 Foundation.
    Avx512f,
    /// AVX-512 Conflict Detection.
    Avx512cd,
    /// AVX-512 Doubleword and Quadword.
    Avx512dq,
    /// AVX-512 Byte and Word.
    Avx512bw,
    /// AVX-512 Exponential and Reciprocal (Xeon Phi).
    Avx512er,
    /// AVX-512 Prefetch (Xeon Phi).
    Avx512pf,
    /// AVX-512 Integer Fused Multiply-Add.
    Avx512ifma,
    /// AVX-512 Vector Byte Manipulation.
    Avx512vbmi,
    /// AVX-512 Vector Byte Manipulation 2.
    Avx512vbmi2,
    /// AVX-512 VNNI on top of AVX-512BW.
    Avx512VnniAvx512bw,
    /// AVX-512 VNNI on top of AVX-512VBMI2.
    Avx512VnniAvx512vbmi2,
    /// ARM NEON (32-bit ARM).
    Neon,
    /// ARM NEON on AArch64 (adds double precision lanes).
    Neon64,
    /// 8-bit integer matrix multiply on top of AArch64 NEON.
    I8mmNeon64,
    /// Scalable Vector Extension at 128 bits.
    Sve128,
    /// Scalable Vector Extension at 256 bits.
    Sve256,
    /// Scalable Vector Extension at 512 bits.
    Sve512,
    /// RISC-V vector extension at 128 bits.
    Rvv128,
    /// RISC-V vector extension at 256 bits.
    Rvv256,
    /// RISC-V vector extension at 512 bits.
    Rvv512,
    /// WebAssembly 128-bit SIMD.
    Wasm,
}

/// Instruction-set family a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchFamily {
    /// x86 / x86_64 (SSE, AVX, AVX-512, FMA).
    X86,
    /// ARM / AArch64 (NEON, SVE).
    Arm,
    /// RISC-V vector extension.
    RiscV,
    /// WebAssembly SIMD.
    Wasm,
}

impl ArchId {
    /// Every tag, in catalogue order.
    pub const ALL: [ArchId; 33] = [
        ArchId::Sse2,
        ArchId::Sse3,
        ArchId::Ssse3,
        ArchId::Sse4_1,
        ArchId::Sse4_2,
        ArchId::Fma3Sse4_2,
        ArchId::Fma4,
        ArchId::Avx,
        ArchId::Fma3Avx,
        ArchId::Avx2,
        ArchId::AvxVnni,
        ArchId::Fma3Avx2,
        ArchId::Avx512f,
        ArchId::Avx512cd,
        ArchId::Avx512dq,
        ArchId::Avx512bw,
        ArchId::Avx512er,
        ArchId::Avx512pf,
        ArchId::Avx512ifma,
        ArchId::Avx512vbmi,
        ArchId::Avx512vbmi2,
        ArchId::Avx512VnniAvx512bw,
        ArchId::Avx512VnniAvx512vbmi2,
        ArchId::Neon,
        ArchId::Neon64,
        ArchId::I8mmNeon64,
        ArchId::Sve128,
        ArchId::Sve256,
        ArchId::Sve512,
        ArchId::Rvv128,
        ArchId::Rvv256,
        ArchId::Rvv512,
        ArchId::Wasm,
    ];

    /// Canonical name, as accepted by [`FromStr`] and configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ArchId::Sse2 => "sse2",
            ArchId::Sse3 => "sse3",
            ArchId::Ssse3 => "ssse3",
            ArchId::Sse4_1 => "sse4.1",
            ArchId::Sse4_2 => "sse4.2",
            ArchId::Fma3Sse4_2 => "fma3+sse4.2",
            ArchId::Fma4 => "fma4",
            ArchId::Avx => "avx",
            ArchId::Fma3Avx => "fma3+avx",
            ArchId::Avx2 => "avx2",
            ArchId::AvxVnni => "avxvnni",
            ArchId::Fma3Avx2 => "fma3+avx2",
            ArchId::Avx512f => "avx512f",
            ArchId::Avx512cd => "avx512cd",
            ArchId::Avx512dq => "avx512dq",
            ArchId::Avx512bw => "avx512bw",
            ArchId::Avx512er => "avx512er",
            ArchId::Avx512pf => "avx512pf",
            ArchId::Avx512ifma => "avx512ifma",
            ArchId::Avx512vbmi => "avx512vbmi",
            ArchId::Avx512vbmi2 => "avx512vbmi2",
            ArchId::Avx512VnniAvx512bw => "avx512vnni+avx512bw",
            ArchId::Avx512VnniAvx512vbmi2 => "avx512vnni+avx512vbmi2",
            ArchId::Neon => "neon",
            ArchId::Neon64 => "neon64",
            ArchId::I8mmNeon64 => "i8mm+neon64",
            ArchId::Sve128 => "sve128",
            ArchId::Sve256 => "sve256",
            ArchId::Sve512 => "sve512",
            ArchId::Rvv128 => "rvv128",
            ArchId::Rvv256 => "rvv256",
            ArchId::Rvv512 => "rvv512",
            ArchId::Wasm => "wasm",
        }
    }

    /// Family this tag belongs to.
    #[must_use]
    pub const fn family(self) -> ArchFamily {
        match self {
            ArchId::Neon
            | ArchId::Neon64
            | ArchId::I8mmNeon64
            | ArchId::Sve128
            | ArchId::Sve256
            | ArchId::Sve512 => ArchFamily::Arm,
            ArchId::Rvv128 | ArchId::Rvv256 | ArchId::Rvv512 => ArchFamily::RiscV,
            ArchId::Wasm => ArchFamily::Wasm,
            _ => ArchFamily::X86,
        }
    }

    /// Register width in bits.
    #[must_use]
    pub const fn width_bits(self) -> usize {
        match self {
            ArchId::Avx
            | ArchId::Fma3Avx
            | ArchId::Avx2
            | ArchId::AvxVnni
            | ArchId::Fma3Avx2
            | ArchId::Sve256
            | ArchId::Rvv256 => 256,
            ArchId::Avx512f
            | ArchId::Avx512cd
            | ArchId::Avx512dq
            | ArchId::Avx512bw
            | ArchId::Avx512er
            | ArchId::Avx512pf
            | ArchId::Avx512ifma
            | ArchId::Avx512vbmi
            | ArchId::Avx512vbmi2
            | ArchId::Avx512VnniAvx512bw
            | ArchId::Avx512VnniAvx512vbmi2
            | ArchId::Sve512
            | ArchId::Rvv512 => 512,
            _ => 128,
        }
    }

    /// Tags this one directly builds on.
    #[must_use]
    pub const fn bases(self) -> &'static [ArchId] {
        match self {
            ArchId::Sse2
            | ArchId::Neon
            | ArchId::Sve128
            | ArchId::Sve256
            | ArchId::Sve512
            | ArchId::Rvv128
            | ArchId::Rvv256
            | ArchId::Rvv512
            | ArchId::Wasm => &[],
            ArchId::Sse3 => &[ArchId::Sse2],
            ArchId::Ssse3 => &[ArchId::Sse3],
            ArchId::Sse4_1 => &[ArchId::Ssse3],
            ArchId::Sse4_2 => &[ArchId::Sse4_1],
            ArchId::Fma3Sse4_2 | ArchId::Fma4 | ArchId::Avx => &[ArchId::Sse4_2],
            ArchId::Fma3Avx => &[ArchId::Avx, ArchId::Fma3Sse4_2],
            ArchId::Avx2 => &[ArchId::Avx],
            ArchId::AvxVnni => &[ArchId::Avx2],
            ArchId::Fma3Avx2 => &[ArchId::Avx2, ArchId::Fma3Avx],
            ArchId::Avx512f => &[ArchId::Fma3Avx2],
            ArchId::Avx512cd => &[ArchId::Avx512f],
            ArchId::Avx512dq => &[ArchId::Avx512cd],
            ArchId::Avx512bw => &[ArchId::Avx512dq],
            ArchId::Avx512er => &[ArchId::Avx512cd],
            ArchId::Avx512pf => &[ArchId::Avx512er],
            ArchId::Avx512ifma => &[ArchId::Avx512bw],
            ArchId::Avx512vbmi => &[ArchId::Avx512ifma],
            ArchId::Avx512vbmi2 => &[ArchId::Avx512vbmi],
            ArchId::Avx512VnniAvx512bw => &[ArchId::Avx512bw],
            ArchId::Avx512VnniAvx512vbmi2 => &[ArchId::Avx512vbmi2, ArchId::Avx512VnniAvx512bw],
            ArchId::Neon64 => &[ArchId::Neon],
            ArchId::I8mmNeon64 => &[ArchId::Neon64],
        }
    }

    /// Returns `true` if `self` is `other` or builds on it, directly or
    /// transitively.
    #[must_use]
    pub fn implies(self, other: ArchId) -> bool {
        self == other || self.bases().iter().any(|base| base.implies(other))
    }
}

impl fmt::Display for ArchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ArchId {
    type Err = UnknownArch;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ArchId::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownArch(wanted.to_string()))
    }
}

impl fmt::Display for ArchFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchFamily::X86 => write!(f, "x86"),
            ArchFamily::Arm => write!(f, "arm"),
            ArchFamily::RiscV => write!(f, "riscv"),
            ArchFamily::Wasm => write!(f, "wasm"),
        }
    }
}
