//! Minimal fixed-width vector container.
//!
//! A [`Batch<T, A>`] holds one native SIMD register of element type `T` for
//! architecture tag `A`, together with the tag token that proves the register
//! state is usable. It offers only what the kernels need: moving lanes in and
//! out of slices.
//!
//! # Example
//!
//! ```rust
//! use vecarch_core::arch::{Arch, Fma3, Avx};
//! use vecarch_core::batch::Batch;
//!
//! if let Some(arch) = Fma3::<Avx>::detect() {
//!     let ones = Batch::<f32, _>::splat(arch, 1.0);
//!     assert_eq!(ones.to_vec(), vec![1.0; 8]);
//! }
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::arch::Arch;

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86;

#[cfg(test)]
mod batch_tests;

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Floating-point lane types with SIMD registers.
pub trait Element:
    Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static + sealed::Sealed
{
}

impl Element for f32 {}
impl Element for f64 {}

/// A native register of `T` lanes under architecture tag `Self`.
///
/// Implemented once per (element type, tag) pair for which the tag has
/// registers of its own.
pub trait Register<T: Element>: Arch {
    /// Native register type, e.g. `__m256` for `f32` under AVX.
    type Native: Copy;

    /// Number of `T` lanes in one register.
    const LANES: usize;

    /// Loads the first [`Self::LANES`] elements of `src`.
    ///
    /// # Panics
    ///
    /// Panics if `src` is shorter than one register.
    fn load(self, src: &[T]) -> Self::Native;

    /// Stores every lane of `value` to the front of `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than one register.
    fn store(self, value: Self::Native, dst: &mut [T]);

    /// Broadcasts `value` to every lane.
    fn splat(self, value: T) -> Self::Native;
}

#[inline]
#[track_caller]
pub(crate) fn check_lanes(len: usize, lanes: usize) {
    assert!(
        len >= lanes,
        "slice of {len} elements is shorter than one batch of {lanes} lanes"
    );
}

/// One SIMD register of `T` lanes, tagged with the architecture it runs on.
pub struct Batch<T: Element, A: Register<T>> {
    native: A::Native,
    arch: A,
    _lane: PhantomData<T>,
}

impl<T: Element, A: Register<T>> Batch<T, A> {
    /// Number of lanes.
    pub const LANES: usize = A::LANES;

    /// Loads one batch from the front of `src`.
    ///
    /// # Panics
    ///
    /// Panics if `src.len() < Self::LANES`.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn load(arch: A, src: &[T]) -> Self {
        Self::from_native(arch, arch.load(src))
    }

    /// A batch with every lane set to `value`.
    #[inline]
    #[must_use]
    pub fn splat(arch: A, value: T) -> Self {
        Self::from_native(arch, arch.splat(value))
    }

    /// Wraps a native register.
    #[inline]
    #[must_use]
    pub fn from_native(arch: A, native: A::Native) -> Self {
        Self {
            native,
            arch,
            _lane: PhantomData,
        }
    }

    /// The native register.
    #[inline]
    #[must_use]
    pub fn native(self) -> A::Native {
        self.native
    }

    /// The architecture token this batch was built under.
    #[inline]
    #[must_use]
    pub fn arch(self) -> A {
        self.arch
    }

    /// Stores every lane to the front of `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst.len() < Self::LANES`.
    #[inline]
    #[track_caller]
    pub fn store(self, dst: &mut [T]) {
        self.arch.store(self.native, dst);
    }

    /// Copies the lanes out into a `Vec`.
    #[must_use]
    pub fn to_vec(self) -> Vec<T> {
        let mut lanes = vec![T::default(); Self::LANES];
        self.store(&mut lanes);
        lanes
    }
}

impl<T: Element, A: Register<T>> Clone for Batch<T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Element, A: Register<T>> Copy for Batch<T, A> {}

impl<T: Element, A: Register<T>> fmt::Debug for Batch<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Batch")
            .field("arch", &A::ID)
            .field("lanes", &self.to_vec())
            .finish()
    }
}
