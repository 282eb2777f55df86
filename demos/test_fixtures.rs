//! Exercise the package fixtures end to end against a console port
//!
//! The device builds drive a real UART; this demo stands in a console
//! port so the same checks can run on a development host.
#![warn(missing_docs)]

use std::io::Write as _;

use wio_pkg::{
    error::Error,
    list::{BoundedStack, BoundedStackImpl},
    malloc::{BumpAllocator, BumpAllocatorImpl},
    uart::{SerialPort, Uart},
    Arena, ArrayHandle, ARENA_SIZE,
};

/// A serial port that forwards everything to standard output
struct ConsolePort;

impl SerialPort for ConsolePort {
    fn begin(&mut self, _baud_rate: u32) -> Result<(), Error> {
        Ok(())
    }

    fn write(&mut self, buffer: &[u8]) -> Result<(), Error> {
        std::io::stdout()
            .write_all(buffer)
            .map_err(|_| Error::new(wio_pkg::error::ErrorKind::Serial))
    }
}

/// Write a test result status and message about the test
fn write_test_result<P: SerialPort>(uart: &mut Uart<P>, test_result: bool, status_msg: &str) {
    if test_result {
        uart.printf(|w| ufmt::uwrite!(w, "SUCCESS")).unwrap();
    } else {
        uart.printf(|w| ufmt::uwrite!(w, "FAILURE")).unwrap();
    }
    uart.printf(|w| ufmt::uwriteln!(w, " {}", status_msg)).unwrap();
}

fn main() {
    let mut uart = Uart::new(ConsolePort);
    uart.init(57600).unwrap();

    let mut arena: Arena = [0; ARENA_SIZE];
    let handle = ArrayHandle::new(arena.as_mut_ptr(), arena.len());
    let mut allocator = BumpAllocator::new_from_array_handle(&handle).unwrap();

    let view = allocator.alloc(64).unwrap();
    write_test_result(
        &mut uart,
        view.len == 64 && allocator.remaining() == 192,
        "allocating 64 bytes should leave 192",
    );

    let res = allocator.alloc(193);
    write_test_result(
        &mut uart,
        res.is_err() && allocator.remaining() == 192,
        "allocating past the remaining capacity should fail without moving the cursor",
    );

    allocator.reset();
    write_test_result(
        &mut uart,
        allocator.remaining() == ARENA_SIZE,
        "reset should restore the full arena",
    );

    {
        let mut stack = BoundedStack::new(&mut allocator, 4).unwrap();

        stack.push(10).unwrap();
        stack.push(20).unwrap();
        stack.push(30).unwrap();

        let first = stack.pop().unwrap();
        let second = stack.pop().unwrap();
        stack.push(40).unwrap();
        let third = stack.pop().unwrap();

        write_test_result(
            &mut uart,
            first == 30 && second == 20 && third == 40,
            "stack should pop values in reverse push order",
        );
    }

    write_test_result(
        &mut uart,
        allocator.remaining() == ARENA_SIZE,
        "dropping the stack should reset the arena",
    );
}
