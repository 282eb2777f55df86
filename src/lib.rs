//! Package-build test fixtures for embedded targets
//!
//! This crate collects the small single-responsibility fixtures used to
//! exercise a package build pipeline on microcontroller targets: a bump
//! allocator over a fixed-size arena, a bounded integer stack backed by
//! it, and a UART wrapper with a printf-style interface.
//!
//! The arena and the format buffer sizes are supplied by the build
//! system and checked against the expected literals at compile time, so
//! a configuration mismatch never reaches a running target.
#![warn(missing_docs)]
#![cfg_attr(not(test), no_std)]

use core::marker::PhantomData;

/// Error data types
pub mod error;

/// Bump allocator functions and data structures
pub mod malloc;

/// Bounded stack functions and data structures
pub mod list;

/// UART wrapper functions and data structures
pub mod uart;

/// The arena size in bytes, supplied by the build system through the
/// `WIO_PKG_ARENA_SIZE` environment variable.
pub const ARENA_SIZE: usize = parse_usize(env!(
    "WIO_PKG_ARENA_SIZE",
    "WIO_PKG_ARENA_SIZE must be defined by the build system"
));

const _: () = assert!(ARENA_SIZE == 256, "Expected WIO_PKG_ARENA_SIZE to be 256");

/// The UART format buffer size in bytes, supplied by the build system
/// through the `WIO_PKG_BUFFER_SIZE` environment variable.
pub const UART_BUFFER_SIZE: usize = parse_usize(env!(
    "WIO_PKG_BUFFER_SIZE",
    "WIO_PKG_BUFFER_SIZE must be defined by the build system"
));

const _: () = assert!(
    UART_BUFFER_SIZE == 256,
    "Expected WIO_PKG_BUFFER_SIZE to be 256"
);

/// The canonical arena backing buffer.
///
/// The original fixture kept this as a process-wide static.  Here the
/// caller owns the buffer and injects it into a
/// [`malloc::BumpAllocator`], so there is no hidden mutable state.
pub type Arena = [u8; ARENA_SIZE];

/// Parse a decimal integer in const context.
///
/// Used on the size constants the build system supplies, so a malformed
/// value is a compile-time failure.
const fn parse_usize(s: &str) -> usize {
    let bytes = s.as_bytes();
    assert!(!bytes.is_empty(), "expected a decimal integer");

    let mut value: usize = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        assert!(b.is_ascii_digit(), "expected a decimal integer");
        value = value * 10 + (b - b'0') as usize;
        i += 1;
    }

    value
}

/// A handle to an array to manage lifetimes
pub struct ArrayHandle<'a, T> {
    /// Pointer to the array
    pub ptr: *mut T,

    /// Length of the array
    ///
    /// This is the number of elements of type T the array can hold,
    /// not necessarily the number of bytes.
    pub len: usize,

    /// We want to have a lifetime on an ArrayHandle tied to the data
    pub _marker: PhantomData<&'a T>,
}

impl<'a, T> ArrayHandle<'a, T> {
    /// Create a new ArrayHandle from an array pointer and length.
    ///
    /// ptr points to an array of data of type T.
    /// len is the length of the array, the number of elements of type
    /// T it can hold.
    ///
    /// # Safety
    ///
    /// ptr must point to a valid array of length len.  It is the
    /// responsibility of the caller to allocate and deallocate this
    /// array.  The array must live as long as the ArrayHandle.
    ///
    /// # Examples
    ///
    /// ```
    /// use wio_pkg::ArrayHandle;
    ///
    /// let mut arr: [u8; 4] = [0; 4];
    /// let _handle = ArrayHandle::new(arr.as_mut_ptr(), arr.len());
    /// ```
    pub fn new(ptr: *mut T, len: usize) -> Self {
        ArrayHandle {
            ptr,
            len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> core::fmt::Debug for ArrayHandle<'a, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "  array 0x{:x}, len: {}", self.ptr as usize, self.len)
    }
}
