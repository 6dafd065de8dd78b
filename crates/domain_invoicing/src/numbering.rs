//! Sequential invoice numbering
//!
//! Invoice numbers are strictly increasing and gapless. A number is reserved
//! only after the invoice has passed validation and computation; callers must
//! not draw a number for a request that can still fail.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

/// A sequential invoice number, printed zero-padded to four digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceNumber(u64);

impl InvoiceNumber {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Pads to 4 digits; numbers past 9999 print at natural width.
        write!(f, "{:04}", self.0)
    }
}

/// A source of invoice numbers
///
/// Implementations must hand out 1, 2, 3, ... with no repeats and no gaps.
/// When a database is configured the draw happens inside the persistence
/// transaction instead, so this trait is only consulted in memory-only mode.
pub trait InvoiceSequence: Send + Sync {
    fn next(&self) -> InvoiceNumber;
}

/// An in-process sequence for running without a database
///
/// Numbering restarts at 1 on process restart, matching a fresh counter.
#[derive(Debug)]
pub struct MemorySequence {
    last: Mutex<u64>,
}

impl MemorySequence {
    pub fn new() -> Self {
        Self {
            last: Mutex::new(0),
        }
    }
}

impl Default for MemorySequence {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceSequence for MemorySequence {
    fn next(&self) -> InvoiceNumber {
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        *last += 1;
        InvoiceNumber(*last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_zero_padded() {
        assert_eq!(InvoiceNumber::new(1).to_string(), "0001");
        assert_eq!(InvoiceNumber::new(42).to_string(), "0042");
        assert_eq!(InvoiceNumber::new(12345).to_string(), "12345");
    }

    #[test]
    fn test_memory_sequence_starts_at_one() {
        let seq = MemorySequence::new();
        assert_eq!(seq.next(), InvoiceNumber::new(1));
        assert_eq!(seq.next(), InvoiceNumber::new(2));
        assert_eq!(seq.next(), InvoiceNumber::new(3));
    }

    #[test]
    fn test_sequence_is_gapless_across_threads() {
        use std::sync::Arc;

        let seq = Arc::new(MemorySequence::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let seq = Arc::clone(&seq);
            handles.push(std::thread::spawn(move || {
                (0..100).map(|_| seq.next().value()).collect::<Vec<_>>()
            }));
        }

        let mut drawn: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        drawn.sort_unstable();

        let expected: Vec<u64> = (1..=800).collect();
        assert_eq!(drawn, expected);
    }
}
