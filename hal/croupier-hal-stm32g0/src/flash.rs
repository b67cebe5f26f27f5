//! Tail-page settings storage for STM32G0
//!
//! The last 2KB page of the 64KB flash is reserved for the settings record.
//! The linker script must keep program code out of it.

use croupier_hal::flash::{Blob, BlobStore, FlashError, BLOB_SIZE};
use embassy_stm32::flash::{Blocking, Flash};

/// Total program flash on the STM32G031K8
pub const FLASH_SIZE: u32 = 64 * 1024;

/// Erase granularity
pub const FLASH_PAGE_SIZE: u32 = 2 * 1024;

/// Offset of the reserved page, relative to the flash base
pub const SETTINGS_OFFSET: u32 = FLASH_SIZE - FLASH_PAGE_SIZE;

/// Settings record kept in the last flash page
pub struct TailPageStore<'d> {
    flash: Flash<'d, Blocking>,
}

impl<'d> TailPageStore<'d> {
    pub fn new(flash: Flash<'d, Blocking>) -> Self {
        Self { flash }
    }
}

impl BlobStore for TailPageStore<'_> {
    fn save(&mut self, blob: &Blob) -> Result<(), FlashError> {
        self.flash
            .blocking_erase(SETTINGS_OFFSET, SETTINGS_OFFSET + FLASH_PAGE_SIZE)
            .map_err(|_| FlashError::Erase)?;
        self.flash
            .blocking_write(SETTINGS_OFFSET, blob)
            .map_err(|_| FlashError::Write)
    }

    fn load(&mut self, blob: &mut Blob) -> Result<(), FlashError> {
        if SETTINGS_OFFSET + BLOB_SIZE as u32 > FLASH_SIZE {
            return Err(FlashError::OutOfBounds);
        }
        self.flash
            .blocking_read(SETTINGS_OFFSET, blob)
            .map_err(|_| FlashError::Read)
    }
}
