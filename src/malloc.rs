//! Bump allocator functions and data structures
//!
//! A bump allocator hands out monotonically increasing, non-overlapping
//! byte ranges from one fixed-size arena.  It never reclaims individual
//! ranges; the only way to free is [`BumpAllocatorImpl::reset`], which
//! releases the whole arena at once.
//!
//! This crate does not own the arena.  The caller allocates the backing
//! buffer and passes it in, so the allocator can be injected into its
//! consumers instead of living in a process-wide static.
#![warn(missing_docs)]

use core::marker::PhantomData;

use crate::{
    error::{Error, ErrorKind},
    ArrayHandle,
};
use ufmt::{uDebug, uWrite};

/// A bump allocator over a caller-owned arena.
///
/// The cursor is the high-water mark: everything below it has been
/// handed out since the last reset, everything above it is free.
pub struct BumpAllocator<'a> {
    /// The start of the arena
    arena: *mut u8,

    /// The arena length in bytes
    len: usize,

    /// Offset of the next free byte.  Monotonically non-decreasing
    /// between resets.
    cursor: usize,

    /// We want this structure to last as long as the lifetime of the
    /// array it is based on.
    _marker: PhantomData<&'a u8>,
}

/// Basic functions for a bump allocator
pub trait BumpAllocatorImpl<'a> {
    /// Create a new BumpAllocator over an arena.
    ///
    /// arena points to the backing buffer, len is its length in bytes.
    /// The buffer must stay valid for the lifetime of the allocator;
    /// that is the caller's responsibility, the same contract as
    /// [`ArrayHandle::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use wio_pkg::{ArrayHandle, malloc::{BumpAllocator, BumpAllocatorImpl}};
    ///
    /// let mut arena: [u8; 16] = [0; 16];
    /// let handle = ArrayHandle::new(arena.as_mut_ptr(), arena.len());
    /// let allocator_res = BumpAllocator::new(&handle.ptr, handle.len);
    ///
    /// assert!(allocator_res.is_ok());
    /// ```
    #[allow(clippy::new_ret_no_self)]
    fn new(arena: &'a *mut u8, len: usize) -> Result<BumpAllocator<'a>, Error>;

    /// Create a new BumpAllocator from an ArrayHandle
    ///
    /// # Examples
    ///
    /// ```
    /// use wio_pkg::{ArrayHandle, malloc::{BumpAllocator, BumpAllocatorImpl}};
    ///
    /// let mut arena: [u8; 16] = [0; 16];
    /// let handle = ArrayHandle::new(arena.as_mut_ptr(), arena.len());
    /// let allocator_res = BumpAllocator::new_from_array_handle(&handle);
    ///
    /// assert!(allocator_res.is_ok());
    /// ```
    fn new_from_array_handle(handle: &'a ArrayHandle<'a, u8>) -> Result<BumpAllocator<'a>, Error>;

    /// Allocate size bytes from the arena.
    ///
    /// Returns a view of exactly size bytes starting at the cursor and
    /// advances the cursor.  If size exceeds the remaining capacity the
    /// allocation fails with ArenaExhausted and the cursor does not
    /// move.  A zero-size allocation succeeds with an empty view.
    ///
    /// The view stays valid until the next [`reset`].  Using it after
    /// that is a caller error the allocator does not track.
    ///
    /// [`reset`]: BumpAllocatorImpl::reset
    ///
    /// # Examples
    ///
    /// ```
    /// use wio_pkg::{ArrayHandle, malloc::{BumpAllocator, BumpAllocatorImpl}};
    ///
    /// let mut arena: [u8; 16] = [0; 16];
    /// let handle = ArrayHandle::new(arena.as_mut_ptr(), arena.len());
    /// let mut allocator = BumpAllocator::new_from_array_handle(&handle).unwrap();
    ///
    /// let view = allocator.alloc(8).unwrap();
    /// assert_eq!(view.len, 8);
    /// assert_eq!(allocator.remaining(), 8);
    /// ```
    fn alloc(&mut self, size: usize) -> Result<ArrayHandle<'a, u8>, Error>;

    /// Allocate size bytes aligned to align.
    ///
    /// align must be a power of two.  The cursor is first padded up to
    /// the alignment; the padding is only committed when the allocation
    /// as a whole fits.
    fn alloc_aligned(&mut self, size: usize, align: usize) -> Result<ArrayHandle<'a, u8>, Error>;

    /// Set the cursor back to zero.
    ///
    /// This releases the whole arena at once.  All previously issued
    /// views become logically invalid; the allocator keeps no record of
    /// them, so this is a documented caller contract rather than an
    /// enforced one.
    fn reset(&mut self);

    /// The number of bytes left in the arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use wio_pkg::{ArrayHandle, malloc::{BumpAllocator, BumpAllocatorImpl}};
    ///
    /// let mut arena: [u8; 16] = [0; 16];
    /// let handle = ArrayHandle::new(arena.as_mut_ptr(), arena.len());
    /// let mut allocator = BumpAllocator::new_from_array_handle(&handle).unwrap();
    ///
    /// assert_eq!(allocator.remaining(), 16);
    /// allocator.alloc(4).unwrap();
    /// assert_eq!(allocator.remaining(), 12);
    /// ```
    fn remaining(&self) -> usize;

    /// The total arena size in bytes
    fn capacity(&self) -> usize;
}

impl<'a> BumpAllocatorImpl<'a> for BumpAllocator<'a> {
    fn new(arena: &'a *mut u8, len: usize) -> Result<Self, Error> {
        if arena.is_null() {
            return Err(Error::new(ErrorKind::NullPointer));
        }
        if len == 0 {
            return Err(Error::new(ErrorKind::InvalidArguments));
        }

        Ok(Self {
            arena: *arena,
            len,
            cursor: 0,
            _marker: PhantomData,
        })
    }

    fn new_from_array_handle(handle: &'a ArrayHandle<'a, u8>) -> Result<Self, Error> {
        BumpAllocator::new(&handle.ptr, handle.len)
    }

    fn alloc(&mut self, size: usize) -> Result<ArrayHandle<'a, u8>, Error> {
        if size > self.remaining() {
            return Err(Error::new(ErrorKind::ArenaExhausted));
        }

        let ptr = unsafe { self.arena.add(self.cursor) };
        self.cursor += size;

        Ok(ArrayHandle::new(ptr, size))
    }

    fn alloc_aligned(&mut self, size: usize, align: usize) -> Result<ArrayHandle<'a, u8>, Error> {
        if !align.is_power_of_two() {
            return Err(Error::new(ErrorKind::InvalidArguments));
        }

        let addr = self.arena as usize + self.cursor;
        let pad = addr.wrapping_neg() & (align - 1);

        match pad.checked_add(size) {
            Some(total) if total <= self.remaining() => {
                self.cursor += pad;
                self.alloc(size)
            }
            _ => Err(Error::new(ErrorKind::ArenaExhausted)),
        }
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }

    fn remaining(&self) -> usize {
        self.len - self.cursor
    }

    fn capacity(&self) -> usize {
        self.len
    }
}

impl<'a> uDebug for BumpAllocator<'a> {
    fn fmt<T>(&self, f: &mut ufmt::Formatter<'_, T>) -> core::result::Result<(), T::Error>
    where
        T: uWrite + ?Sized,
    {
        f.write_str("  arena 0x")?;
        ufmt::uDisplay::fmt(&(self.arena as usize), f)?;
        f.write_str(", len: ")?;
        ufmt::uDisplay::fmt(&self.len, f)?;
        f.write_str(", cursor: ")?;
        ufmt::uDisplay::fmt(&self.cursor, f)
    }
}

impl<'a> core::fmt::Debug for BumpAllocator<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "  arena 0x{:x}", self.arena as usize)?;
        write!(f, ", len: {}", self.len)?;
        write!(f, ", cursor: {}", self.cursor)
    }
}
