//! Persisted settings codec
//!
//! The committed menu is stored as one fixed-size record:
//!
//! ```text
//! [ version | length | postcard payload ... | 0xFF padding ]
//! ```
//!
//! Erased flash reads back as all `0xFF`, which decodes as [`SettingsError::Blank`].

use croupier_hal::flash::{Blob, FlashError, BLOB_SIZE};
use croupier_hal::BlobStore;

use crate::console::{MenuItem, SettingItem};

/// Record layout version
pub const LAYOUT_VERSION: u8 = 1;

const HEADER_LEN: usize = 2;
const ERASED: u8 = 0xFF;

/// Settings persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Payload did not fit the record
    Encode,
    /// Payload is corrupt
    Decode,
    /// Written by an incompatible layout
    UnknownVersion(u8),
    /// Nothing has been saved yet
    Blank,
    Flash(FlashError),
}

impl From<FlashError> for SettingsError {
    fn from(err: FlashError) -> Self {
        SettingsError::Flash(err)
    }
}

/// Serialize the committed menu into a record
///
/// The settings cursor is not persisted.
pub fn encode(menu: &MenuItem) -> Result<Blob, SettingsError> {
    let menu = MenuItem {
        setting: SettingItem::None,
        ..*menu
    };

    let mut blob = [ERASED; BLOB_SIZE];
    let len = postcard::to_slice(&menu, &mut blob[HEADER_LEN..])
        .map_err(|_| SettingsError::Encode)?
        .len();

    blob[0] = LAYOUT_VERSION;
    blob[1] = len as u8;
    Ok(blob)
}

/// Parse a record back into a menu
pub fn decode(blob: &Blob) -> Result<MenuItem, SettingsError> {
    if blob.iter().all(|&b| b == ERASED) {
        return Err(SettingsError::Blank);
    }
    if blob[0] != LAYOUT_VERSION {
        return Err(SettingsError::UnknownVersion(blob[0]));
    }

    let len = blob[1] as usize;
    let payload = blob
        .get(HEADER_LEN..HEADER_LEN + len)
        .ok_or(SettingsError::Decode)?;
    let menu: MenuItem = postcard::from_bytes(payload).map_err(|_| SettingsError::Decode)?;

    Ok(MenuItem {
        setting: SettingItem::None,
        ..menu.clamped()
    })
}

/// Write the committed menu to storage
pub fn save<S: BlobStore>(store: &mut S, menu: &MenuItem) -> Result<(), SettingsError> {
    let blob = encode(menu)?;
    store.save(&blob)?;
    Ok(())
}

/// Read the committed menu from storage
pub fn load<S: BlobStore>(store: &mut S) -> Result<MenuItem, SettingsError> {
    let mut blob = [0; BLOB_SIZE];
    store.load(&mut blob)?;
    decode(&blob)
}
