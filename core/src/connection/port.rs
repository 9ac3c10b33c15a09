/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::error::ProbeError;

/// Register access provided by a vendor debug probe library.
///
/// `addr` for access port calls already includes the AP select bits.
#[async_trait::async_trait]
pub trait ProbeBackend: Send + std::fmt::Debug {
    async fn open(&mut self) -> Result<(), ProbeError>;
    async fn close(&mut self) -> Result<(), ProbeError>;

    async fn read_ap(&mut self, ap: u8, addr: u32) -> Result<u32, ProbeError>;
    async fn write_ap(&mut self, ap: u8, addr: u32, value: u32) -> Result<(), ProbeError>;
    async fn read_dp(&mut self, addr: u32) -> Result<u32, ProbeError>;
    async fn write_dp(&mut self, addr: u32, value: u32) -> Result<(), ProbeError>;

    fn hardware_id(&self) -> String;
}
