//! An in-process test harness: runs a source string through the full
//! pipeline and captures `print` output into a `Vec<u8>` standing in for
//! stdout. There is no separate compiled artifact to spawn, so the
//! pipeline is driven in-process instead.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use pythia::{run_source, InterpreterError};

/// A `Write` sink that appends into a shared, clonable buffer so the test
/// can keep a handle to the bytes after handing the sink's other half to
/// the interpreter.
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `src` to completion and returns everything it printed.
pub fn run_and_capture(src: &str) -> Result<String, InterpreterError> {
    let buffer = Rc::new(RefCell::new(Vec::new()));
    run_source(src, Box::new(SharedBuffer(buffer.clone())))?;
    let bytes = buffer.borrow().clone();
    Ok(String::from_utf8(bytes).expect("interpreter output must be valid utf-8"))
}

/// Runs `src` and asserts its captured stdout equals `expected`.
pub fn assert_prints(src: &str, expected: &str) {
    match run_and_capture(src) {
        Ok(actual) => assert_eq!(actual, expected, "unexpected output for:\n{src}"),
        Err(e) => panic!("expected {src:?} to run cleanly, got error: {e}"),
    }
}

/// Runs `src` and asserts it fails with a runtime/lex/parse error.
pub fn assert_fails(src: &str) -> InterpreterError {
    run_and_capture(src).expect_err("expected this source to fail")
}
