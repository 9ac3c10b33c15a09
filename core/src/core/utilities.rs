/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::error::CommandError;

/// Block size every exported command record is padded to.
pub const ALIGNMENT: usize = 16;

pub fn align_up(len: usize) -> usize {
    len.div_ceil(ALIGNMENT) * ALIGNMENT
}

/// Zero-pads `data` in place up to the next alignment boundary.
pub fn pad_to_alignment(data: &mut Vec<u8>) {
    data.resize(align_up(data.len()), 0);
}

/// Ensures `data` holds at least `needed` bytes starting at `offset`.
pub fn require(data: &[u8], offset: usize, needed: usize) -> Result<(), CommandError> {
    let available = data.len().saturating_sub(offset);
    if available < needed {
        return Err(CommandError::Truncated {
            offset,
            needed,
            available,
        });
    }
    Ok(())
}

/// Reads the little-endian word at `data[pos..pos + 4]`. Callers check bounds first.
pub fn read_u32_le(data: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
}

pub fn u32_len(field: &'static str, len: usize) -> Result<u32, CommandError> {
    u32::try_from(len)
        .map_err(|_| CommandError::out_of_range(field, len as u64, u64::from(u32::MAX)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_up_keeps_aligned_lengths() {
        assert_eq!(align_up(0), 0);
        assert_eq!(align_up(16), 16);
        assert_eq!(align_up(17), 32);
        assert_eq!(align_up(36), 48);
    }

    #[test]
    fn require_reports_available_bytes() {
        let data = [0u8; 20];
        assert!(require(&data, 4, 16).is_ok());
        assert_eq!(
            require(&data, 8, 16),
            Err(CommandError::Truncated {
                offset: 8,
                needed: 16,
                available: 12
            })
        );
        assert!(require(&data, 40, 1).is_err());
    }
}
