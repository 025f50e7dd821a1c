//! Fused multiply-add kernels selected by architecture tag.
//!
//! Each (operation, element type, tag) triple has at most one implementation:
//! a trait impl on the tag's marker type. The caller passes the tag token it
//! obtained from [`Arch::detect`](crate::arch::Arch::detect) and the compiler
//! picks the kernel; there is no branching on the architecture at the call
//! site and no runtime fallback. Asking for a triple that has no kernel is a
//! compile error.
//!
//! | Tag              | Width | `fma`/`fms`/`fnma`/`fnms` | `fmas` |
//! |------------------|-------|---------------------------|--------|
//! | `Fma3<Sse4_2>`   | 128   | yes                       | yes    |
//! | `Fma3<Avx>`      | 256   | yes                       | yes    |
//! | `Fma3<Avx2>`     | 256   | yes                       | yes    |
//! | `Avx512f`        | 512   | yes                       | yes    |
//! | `Neon64`         | 128   | yes                       | no     |
//!
//! All kernels round once: the result equals `x * y + z` (with the signs
//! below) computed exactly and rounded to the element type.

use crate::batch::{Batch, Element, Register};

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86_avx512;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86_fma3;


/// Fused multiply-add family for `T` lanes under tag `Self`.
pub trait FusedMulAdd<T: Element>: Register<T> {
    /// `x * y + z`.
    fn fma(self, x: Self::Native, y: Self::Native, z: Self::Native) -> Self::Native;

    /// `x * y - z`.
    fn fms(self, x: Self::Native, y: Self::Native, z: Self::Native) -> Self::Native;

    /// `-(x * y) + z`.
    fn fnma(self, x: Self::Native, y: Self::Native, z: Self::Native) -> Self::Native;

    /// `-(x * y) - z`.
    fn fnms(self, x: Self::Native, y: Self::Native, z: Self::Native) -> Self::Native;
}

/// Alternating fused multiply-add/subtract, where the hardware has a single
/// instruction for it.
pub trait FusedMulAddSub<T: Element>: FusedMulAdd<T> {
    /// `x * y - z` in even lanes (lane 0 included), `x * y + z` in odd lanes.
    fn fmas(self, x: Self::Native, y: Self::Native, z: Self::Native) -> Self::Native;
}

/// Fused `x * y + z`.
#[inline]
#[must_use]
pub fn fma<T: Element, A: FusedMulAdd<T>>(
    x: Batch<T, A>,
    y: Batch<T, A>,
    z: Batch<T, A>,
    arch: A,
) -> Batch<T, A> {
    Batch::from_native(arch, arch.fma(x.native(), y.native(), z.native()))
}

/// Fused `x * y - z`.
#[inline]
#[must_use]
pub fn fms<T: Element, A: FusedMulAdd<T>>(
    x: Batch<T, A>,
    y: Batch<T, A>,
    z: Batch<T, A>,
    arch: A,
) -> Batch<T, A> {
    Batch::from_native(arch, arch.fms(x.native(), y.native(), z.native()))
}

/// Fused `-(x * y) + z`.
#[inline]
#[must_use]
pub fn fnma<T: Element, A: FusedMulAdd<T>>(
    x: Batch<T, A>,
    y: Batch<T, A>,
    z: Batch<T, A>,
    arch: A,
) -> Batch<T, A> {
    Batch::from_native(arch, arch.fnma(x.native(), y.native(), z.native()))
}

/// Fused `-(x * y) - z`.
#[inline]
#[must_use]
pub fn fnms<T: Element, A: FusedMulAdd<T>>(
    x: Batch<T, A>,
    y: Batch<T, A>,
    z: Batch<T, A>,
    arch: A,
) -> Batch<T, A> {
    Batch::from_native(arch, arch.fnms(x.native(), y.native(), z.native()))
}

/// Fused `x * y - z` in even lanes and `x * y + z` in odd lanes.
#[inline]
#[must_use]
pub fn fmas<T: Element, A: FusedMulAddSub<T>>(
    x: Batch<T, A>,
    y: Batch<T, A>,
    z: Batch<T, A>,
    arch: A,
) -> Batch<T, A> {
    Batch::from_native(arch, arch.fmas(x.native(), y.native(), z.native()))
}

/// Generates `#[target_feature]` wrappers around three-operand intrinsics.
#[allow(unused_macros)]
macro_rules! fused_intrinsics {
    ($feature:tt, $native:ty; $($name:ident = $intrinsic:ident),+ $(,)?) => {$(
        #[target_feature(enable = $feature)]
        #[inline]
        unsafe fn $name(x: $native, y: $native, z: $native) -> $native {
            $intrinsic(x, y, z)
        }
    )+};
}

/// Implements [`FusedMulAdd`] for tags sharing one set of feature-gated
/// wrappers.
#[allow(unused_macros)]
macro_rules! impl_fused {
    ($elem:ty => $native:ty; fma = $fma:ident, fms = $fms:ident,
     fnma = $fnma:ident, fnms = $fnms:ident; $($tag:ty),+ $(,)?) => {$(
        impl $crate::kernel::FusedMulAdd<$elem> for $tag {
            #[inline]
            fn fma(self, x: $native, y: $native, z: $native) -> $native {
                // SAFETY: the token proves the tag's instructions are usable.
                unsafe { $fma(x, y, z) }
            }

            #[inline]
            fn fms(self, x: $native, y: $native, z: $native) -> $native {
                // SAFETY: as for `fma`.
                unsafe { $fms(x, y, z) }
            }

            #[inline]
            fn fnma(self, x: $native, y: $native, z: $native) -> $native {
                // SAFETY: as for `fma`.
                unsafe { $fnma(x, y, z) }
            }

            #[inline]
            fn fnms(self, x: $native, y: $native, z: $native) -> $native {
                // SAFETY: as for `fma`.
                unsafe { $fnms(x, y, z) }
            }
        }
    )+};
}

/// Implements [`FusedMulAddSub`] alongside `impl_fused!`.
#[allow(unused_macros)]
macro_rules! impl_fused_addsub {
    ($elem:ty => $native:ty; fmas = $fmas:ident; $($tag:ty),+ $(,)?) => {$(
        impl $crate::kernel::FusedMulAddSub<$elem> for $tag {
            #[inline]
            fn fmas(self, x: $native, y: $native, z: $native) -> $native {
                // SAFETY: the token proves the tag's instructions are usable.
                unsafe { $fmas(x, y, z) }
            }
        }
    )+};
}

#[allow(unused_imports)]
pub(crate) use {fused_intrinsics, impl_fused, impl_fused_addsub};
