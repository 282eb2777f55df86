//! Bounded stack functions and data structures
//!
//! A fixed-capacity LIFO stack of 16-bit integers backed by a single
//! allocation from a [`BumpAllocator`].  The stack claims its storage
//! once at construction and releases it by resetting the whole arena
//! when it is dropped.
//!
//! Resetting the arena on drop clears every allocation in it, not just
//! the stack's own region.  The fixture assumes one stack per arena
//! lifetime; holding the allocator by exclusive borrow makes that
//! single-consumer assumption compiler-enforced.
#![warn(missing_docs)]

use core::mem::{align_of, size_of};

use crate::{
    error::{Error, ErrorKind},
    malloc::{BumpAllocator, BumpAllocatorImpl},
};
use ufmt::{uDebug, uWrite};

/// A fixed-capacity stack of 16-bit integers over allocator-provided
/// memory.
///
/// Elements are 16 bits wide, the native `int` width on the 8-bit AVR
/// targets this fixture is built for.
pub struct BoundedStack<'a, 'b: 'a> {
    /// The element storage, one allocation from the arena
    data: *mut i16,

    /// The number of elements the stack can hold
    capacity: usize,

    /// The number of elements currently on the stack
    size: usize,

    /// The allocator the storage came from.  Held exclusively so the
    /// arena cannot be handed to a second consumer, and reset when the
    /// stack is dropped.
    allocator: &'a mut BumpAllocator<'b>,
}

/// Basic functions for a bounded stack
pub trait BoundedStackImpl<'a, 'b> {
    /// Create a new BoundedStack with room for capacity elements.
    ///
    /// Requests one allocation sized for capacity 16-bit integers from
    /// the allocator.  A zero capacity fails with InvalidArguments; an
    /// arena without enough room left fails with ArenaExhausted.
    ///
    /// # Examples
    ///
    /// ```
    /// use wio_pkg::{
    ///     list::{BoundedStack, BoundedStackImpl},
    ///     malloc::{BumpAllocator, BumpAllocatorImpl},
    ///     ArrayHandle,
    /// };
    ///
    /// let mut arena: [u8; 16] = [0; 16];
    /// let handle = ArrayHandle::new(arena.as_mut_ptr(), arena.len());
    /// let mut allocator = BumpAllocator::new_from_array_handle(&handle).unwrap();
    ///
    /// let stack_res = BoundedStack::new(&mut allocator, 4);
    /// assert!(stack_res.is_ok());
    /// ```
    #[allow(clippy::new_ret_no_self)]
    fn new(
        allocator: &'a mut BumpAllocator<'b>,
        capacity: usize,
    ) -> Result<BoundedStack<'a, 'b>, Error>;

    /// Push a value onto the stack
    ///
    /// # Examples
    ///
    /// ```
    /// use wio_pkg::{
    ///     list::{BoundedStack, BoundedStackImpl},
    ///     malloc::{BumpAllocator, BumpAllocatorImpl},
    ///     ArrayHandle,
    /// };
    ///
    /// let mut arena: [u8; 16] = [0; 16];
    /// let handle = ArrayHandle::new(arena.as_mut_ptr(), arena.len());
    /// let mut allocator = BumpAllocator::new_from_array_handle(&handle).unwrap();
    /// let mut stack = BoundedStack::new(&mut allocator, 4).unwrap();
    ///
    /// let push_res = stack.push(3);
    /// assert!(push_res.is_ok());
    /// ```
    fn push(&mut self, value: i16) -> Result<(), Error>;

    /// Pop a value from the stack
    ///
    /// # Examples
    ///
    /// ```
    /// use wio_pkg::{
    ///     list::{BoundedStack, BoundedStackImpl},
    ///     malloc::{BumpAllocator, BumpAllocatorImpl},
    ///     ArrayHandle,
    /// };
    ///
    /// let mut arena: [u8; 16] = [0; 16];
    /// let handle = ArrayHandle::new(arena.as_mut_ptr(), arena.len());
    /// let mut allocator = BumpAllocator::new_from_array_handle(&handle).unwrap();
    /// let mut stack = BoundedStack::new(&mut allocator, 4).unwrap();
    ///
    /// stack.push(3).unwrap();
    /// assert_eq!(stack.pop().unwrap(), 3);
    /// ```
    fn pop(&mut self) -> Result<i16, Error>;

    /// The number of elements currently on the stack
    fn len(&self) -> usize;

    /// Whether the stack is empty
    fn is_empty(&self) -> bool;

    /// The number of elements the stack can hold
    fn capacity(&self) -> usize;
}

impl<'a, 'b> BoundedStackImpl<'a, 'b> for BoundedStack<'a, 'b> {
    fn new(allocator: &'a mut BumpAllocator<'b>, capacity: usize) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::new(ErrorKind::InvalidArguments));
        }

        let bytes = capacity
            .checked_mul(size_of::<i16>())
            .ok_or(Error::new(ErrorKind::InvalidArguments))?;

        let view = allocator.alloc_aligned(bytes, align_of::<i16>())?;

        Ok(Self {
            data: view.ptr as *mut i16,
            capacity,
            size: 0,
            allocator,
        })
    }

    fn push(&mut self, value: i16) -> Result<(), Error> {
        if self.size == self.capacity {
            return Err(Error::new(ErrorKind::StackOverflow));
        }

        unsafe {
            self.data.add(self.size).write(value);
        }
        self.size += 1;

        Ok(())
    }

    fn pop(&mut self) -> Result<i16, Error> {
        if self.size == 0 {
            return Err(Error::new(ErrorKind::StackUnderflow));
        }

        self.size -= 1;
        let value = unsafe { self.data.add(self.size).read() };

        Ok(value)
    }

    fn len(&self) -> usize {
        self.size
    }

    fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<'a, 'b> Drop for BoundedStack<'a, 'b> {
    /// Release the stack's storage by resetting the whole arena.
    ///
    /// Single-owner fixture semantics: every allocation in the arena is
    /// invalidated, not just this stack's region.
    fn drop(&mut self) {
        self.allocator.reset();
    }
}

impl<'a, 'b> uDebug for BoundedStack<'a, 'b> {
    fn fmt<T>(&self, f: &mut ufmt::Formatter<'_, T>) -> core::result::Result<(), T::Error>
    where
        T: uWrite + ?Sized,
    {
        f.write_str("  stack data 0x")?;
        ufmt::uDisplay::fmt(&(self.data as usize), f)?;
        f.write_str(", capacity: ")?;
        ufmt::uDisplay::fmt(&self.capacity, f)?;
        f.write_str(", size: ")?;
        ufmt::uDisplay::fmt(&self.size, f)
    }
}

impl<'a, 'b> core::fmt::Debug for BoundedStack<'a, 'b> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "  stack data 0x{:x}", self.data as usize)?;
        write!(f, ", capacity: {}", self.capacity)?;
        write!(f, ", size: {}", self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArrayHandle;

    #[test]
    fn test_stack_new_works() {
        let mut arena: [u8; 16] = [0; 16];
        let handle = ArrayHandle::new(arena.as_mut_ptr(), arena.len());
        let mut allocator = BumpAllocator::new_from_array_handle(&handle).unwrap();

        let stack = BoundedStack::new(&mut allocator, 4).unwrap();

        assert_eq!(stack.capacity(), 4);
        assert_eq!(stack.len(), 0);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_stack_new_zero_capacity_fails() {
        let mut arena: [u8; 16] = [0; 16];
        let handle = ArrayHandle::new(arena.as_mut_ptr(), arena.len());
        let mut allocator = BumpAllocator::new_from_array_handle(&handle).unwrap();

        let res = BoundedStack::new(&mut allocator, 0);

        assert_eq!(
            res.unwrap_err(),
            Error::new(ErrorKind::InvalidArguments)
        );
    }

    #[test]
    fn test_stack_new_exhausted_arena_fails() {
        let mut arena: [u8; 16] = [0; 16];
        let handle = ArrayHandle::new(arena.as_mut_ptr(), arena.len());
        let mut allocator = BumpAllocator::new_from_array_handle(&handle).unwrap();

        // 9 elements need 18 bytes, two more than the arena holds
        let res = BoundedStack::new(&mut allocator, 9);

        assert_eq!(res.unwrap_err(), Error::new(ErrorKind::ArenaExhausted));
    }

    #[test]
    fn test_stack_push_pop_works() {
        let mut arena: [u8; 16] = [0; 16];
        let handle = ArrayHandle::new(arena.as_mut_ptr(), arena.len());
        let mut allocator = BumpAllocator::new_from_array_handle(&handle).unwrap();
        let mut stack = BoundedStack::new(&mut allocator, 4).unwrap();

        stack.push(5).unwrap();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.pop().unwrap(), 5);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_stack_pops_in_reverse_push_order() {
        let mut arena: [u8; 32] = [0; 32];
        let handle = ArrayHandle::new(arena.as_mut_ptr(), arena.len());
        let mut allocator = BumpAllocator::new_from_array_handle(&handle).unwrap();
        let mut stack = BoundedStack::new(&mut allocator, 8).unwrap();

        for value in [1, 2, 3, 4, 5] {
            stack.push(value).unwrap();
        }

        for expected in [5, 4, 3, 2, 1] {
            assert_eq!(stack.pop().unwrap(), expected);
        }
    }

    #[test]
    fn test_stack_interleaved_push_pop_works() {
        let mut arena: [u8; 16] = [0; 16];
        let handle = ArrayHandle::new(arena.as_mut_ptr(), arena.len());
        let mut allocator = BumpAllocator::new_from_array_handle(&handle).unwrap();
        let mut stack = BoundedStack::new(&mut allocator, 4).unwrap();

        stack.push(10).unwrap();
        stack.push(20).unwrap();
        stack.push(30).unwrap();

        assert_eq!(stack.pop().unwrap(), 30);
        assert_eq!(stack.pop().unwrap(), 20);

        stack.push(40).unwrap();
        assert_eq!(stack.pop().unwrap(), 40);
    }

    #[test]
    fn test_stack_empty_pop_fails() {
        let mut arena: [u8; 16] = [0; 16];
        let handle = ArrayHandle::new(arena.as_mut_ptr(), arena.len());
        let mut allocator = BumpAllocator::new_from_array_handle(&handle).unwrap();
        let mut stack = BoundedStack::new(&mut allocator, 4).unwrap();

        let res = stack.pop();

        assert_eq!(res.unwrap_err(), Error::new(ErrorKind::StackUnderflow));
    }

    #[test]
    fn test_stack_push_full_stack_fails() {
        let mut arena: [u8; 16] = [0; 16];
        let handle = ArrayHandle::new(arena.as_mut_ptr(), arena.len());
        let mut allocator = BumpAllocator::new_from_array_handle(&handle).unwrap();
        let mut stack = BoundedStack::new(&mut allocator, 4).unwrap();

        for i in 0..4 {
            stack.push(i).unwrap();
        }

        let res = stack.push(4);

        assert_eq!(res.unwrap_err(), Error::new(ErrorKind::StackOverflow));
        assert_eq!(stack.len(), 4);
    }

    #[test]
    fn test_stack_push_full_stack_pop_full_works() {
        let mut arena: [u8; 32] = [0; 32];
        let handle = ArrayHandle::new(arena.as_mut_ptr(), arena.len());
        let mut allocator = BumpAllocator::new_from_array_handle(&handle).unwrap();
        let mut stack = BoundedStack::new(&mut allocator, 8).unwrap();

        for i in 0..8 {
            stack.push(i).unwrap();
        }
        assert!(stack.push(8).is_err());

        for i in (0..8).rev() {
            assert_eq!(stack.pop().unwrap(), i);
        }
        assert!(stack.pop().is_err());
    }

    #[test]
    fn test_stack_drop_resets_arena() {
        let mut arena: [u8; 16] = [0; 16];
        let handle = ArrayHandle::new(arena.as_mut_ptr(), arena.len());
        let mut allocator = BumpAllocator::new_from_array_handle(&handle).unwrap();

        {
            let mut stack = BoundedStack::new(&mut allocator, 4).unwrap();
            stack.push(1).unwrap();
        }

        assert_eq!(allocator.remaining(), 16);
    }
}
