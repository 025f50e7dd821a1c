//! Zero-sized marker types, one per architecture tag.
//!
//! A tag value is a proof token: safe code can only obtain one through
//! [`Arch::detect`], which consults the process-wide feature snapshot. Kernels
//! take the token (or batches carrying it) and run the matching instructions
//! unconditionally.

use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use super::ArchId;
use crate::features::available_architectures;

mod sealed {
    pub trait Sealed {}
}

/// Compile-time identity of one instruction-set family/generation.
pub trait Arch: Copy + Debug + Eq + Hash + Send + Sync + 'static + sealed::Sealed {
    /// Runtime identity of this tag in the feature snapshot table.
    const ID: ArchId;

    /// Returns a token for this tag if the running CPU and OS support it.
    #[inline]
    #[must_use]
    fn detect() -> Option<Self> {
        if available_architectures().has(Self::ID) {
            // SAFETY: the process-wide snapshot reports the tag as usable.
            Some(unsafe { Self::new_unchecked() })
        } else {
            None
        }
    }

    /// Creates a token without consulting the feature snapshot.
    ///
    /// # Safety
    ///
    /// The instructions covered by `Self::ID` must be usable on the executing
    /// CPU for as long as the token (or any batch holding it) is alive.
    unsafe fn new_unchecked() -> Self;

    /// Runtime identity of this tag.
    #[inline]
    #[must_use]
    fn id(self) -> ArchId {
        Self::ID
    }

    /// Register width in bits.
    #[inline]
    #[must_use]
    fn width_bits(self) -> usize {
        Self::ID.width_bits()
    }
}

macro_rules! marker_tags {
    ($($(#[$doc:meta])* $name:ident => $id:ident;)+) => {$(
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            _private: (),
        }

        impl sealed::Sealed for $name {}

        impl Arch for $name {
            const ID: ArchId = ArchId::$id;

            #[inline]
            unsafe fn new_unchecked() -> Self {
                Self { _private: () }
            }
        }
    )+};
}

marker_tags! {
    /// SSE2.
    Sse2 => Sse2;
    /// SSE3.
    Sse3 => Sse3;
    /// Supplemental SSE3.
    Ssse3 => Ssse3;
    /// SSE4.1.
    Sse4_1 => Sse4_1;
    /// SSE4.2.
    Sse4_2 => Sse4_2;
    /// AMD FMA4.
    Fma4 => Fma4;
    /// AVX.
    Avx => Avx;
    /// AVX2.
    Avx2 => Avx2;
    /// AVX-VNNI.
    AvxVnni => AvxVnni;
    /// AVX-512F.
    Avx512f => Avx512f;
    /// AVX-512CD.
    Avx512cd => Avx512cd;
    /// AVX-512DQ.
    Avx512dq => Avx512dq;
    /// AVX-512BW.
    Avx512bw => Avx512bw;
    /// AVX-512ER.
    Avx512er => Avx512er;
    /// AVX-512PF.
    Avx512pf => Avx512pf;
    /// AVX-512IFMA.
    Avx512ifma => Avx512ifma;
    /// AVX-512VBMI.
    Avx512vbmi => Avx512vbmi;
    /// AVX-512VBMI2.
    Avx512vbmi2 => Avx512vbmi2;
    /// 32-bit ARM NEON.
    Neon => Neon;
    /// AArch64 NEON.
    Neon64 => Neon64;
    /// WebAssembly SIMD128.
    Wasm => Wasm;
}

/// Base architectures FMA3 can be layered on.
pub trait Fma3Base: Arch {
    /// Identity of `Fma3<Self>`.
    const FMA3: ArchId;
}

impl Fma3Base for Sse4_2 {
    const FMA3: ArchId = ArchId::Fma3Sse4_2;
}

impl Fma3Base for Avx {
    const FMA3: ArchId = ArchId::Fma3Avx;
}

impl Fma3Base for Avx2 {
    const FMA3: ArchId = ArchId::Fma3Avx2;
}

/// Fused multiply-add (FMA3) available on top of architecture `A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fma3<A> {
    _base: PhantomData<A>,
}

impl<A: Fma3Base> sealed::Sealed for Fma3<A> {}

impl<A: Fma3Base> Arch for Fma3<A> {
    const ID: ArchId = A::FMA3;

    #[inline]
    unsafe fn new_unchecked() -> Self {
        Self { _base: PhantomData }
    }
}

/// Base architectures AVX-512 VNNI can be layered on.
pub trait VnniBase: Arch {
    /// Identity of `Avx512Vnni<Self>`.
    const VNNI: ArchId;
}

impl VnniBase for Avx512bw {
    const VNNI: ArchId = ArchId::Avx512VnniAvx512bw;
}

impl VnniBase for Avx512vbmi2 {
    const VNNI: ArchId = ArchId::Avx512VnniAvx512vbmi2;
}

/// AVX-512 VNNI available on top of architecture `A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Avx512Vnni<A> {
    _base: PhantomData<A>,
}

impl<A: VnniBase> sealed::Sealed for Avx512Vnni<A> {}

impl<A: VnniBase> Arch for Avx512Vnni<A> {
    const ID: ArchId = A::VNNI;

    #[inline]
    unsafe fn new_unchecked() -> Self {
        Self { _base: PhantomData }
    }
}

/// Base architectures the 8-bit integer matrix multiply extension can be
/// layered on.
pub trait I8mmBase: Arch {
    /// Identity of `I8mm<Self>`.
    const I8MM: ArchId;
}

impl I8mmBase for Neon64 {
    const I8MM: ArchId = ArchId::I8mmNeon64;
}

/// 8-bit integer matrix multiply on top of architecture `A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct I8mm<A> {
    _base: PhantomData<A>,
}

impl<A: I8mmBase> sealed::Sealed for I8mm<A> {}

impl<A: I8mmBase> Arch for I8mm<A> {
    const ID: ArchId = A::I8MM;

    #[inline]
    unsafe fn new_unchecked() -> Self {
        Self { _base: PhantomData }
    }
}

/// ARM Scalable Vector Extension at a fixed vector length of `BITS`.
///
/// Only 128, 256 and 512 are valid; naming any other width fails to compile
/// as soon as the tag's identity is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sve<const BITS: usize> {
    _private: (),
}

impl<const BITS: usize> sealed::Sealed for Sve<BITS> {}

impl<const BITS: usize> Arch for Sve<BITS> {
    const ID: ArchId = match BITS {
        128 => ArchId::Sve128,
        256 => ArchId::Sve256,
        512 => ArchId::Sve512,
        _ => panic!("SVE tags exist for 128, 256 and 512-bit vectors only"),
    };

    #[inline]
    unsafe fn new_unchecked() -> Self {
        Self { _private: () }
    }
}

/// RISC-V vector extension at a fixed vector length of `BITS`.
///
/// Only 128, 256 and 512 are valid, as for [`Sve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rvv<const BITS: usize> {
    _private: (),
}

impl<const BITS: usize> sealed::Sealed for Rvv<BITS> {}

impl<const BITS: usize> Arch for Rvv<BITS> {
    const ID: ArchId = match BITS {
        128 => ArchId::Rvv128,
        256 => ArchId::Rvv256,
        512 => ArchId::Rvv512,
        _ => panic!("RVV tags exist for 128, 256 and 512-bit vectors only"),
    };

    #[inline]
    unsafe fn new_unchecked() -> Self {
        Self { _private: () }
    }
}
