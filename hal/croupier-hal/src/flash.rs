//! Flash storage abstractions
//!
//! The dealer keeps a single fixed-size settings record in a reserved page
//! at the tail of program flash. Each save erases the page and programs the
//! record again; there is no wear levelling.

/// Size of the persisted record in bytes
///
/// A multiple of the 8-byte flash programming granularity.
pub const BLOB_SIZE: usize = 32;

/// A persisted record
pub type Blob = [u8; BLOB_SIZE];

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Page erase failed
    Erase,
    /// Programming failed
    Write,
    /// Read back failed
    Read,
    /// Reserved range lies outside the flash
    OutOfBounds,
}

/// Fixed-size record storage
///
/// Failures are reported but never fatal; callers log them and keep
/// running from memory.
pub trait BlobStore {
    /// Erase the reserved range and program `blob` into it
    fn save(&mut self, blob: &Blob) -> Result<(), FlashError>;

    /// Copy the reserved range into `blob`
    ///
    /// Erased flash reads back as `0xFF`.
    fn load(&mut self, blob: &mut Blob) -> Result<(), FlashError>;
}
