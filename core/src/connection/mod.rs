/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
pub mod port;
use crate::connection::port::ProbeBackend;
use crate::error::ProbeError;
use log::{debug, error, info};

pub const APSEL_SHIFT: u32 = 24;
pub const APSEL_APBANKSEL: u32 = 0xFF00_00F0;

// IDR register of an access port and the value identifying the debug mailbox
const IDR_ADDRESS: u32 = 0xFC;
const DEBUG_MAILBOX_IDR: u32 = 0x002A_0000;

/// Combines an AP register address with the AP select bits.
pub fn ap_address(ap: u8, addr: u32) -> u32 {
    addr | ((u32::from(ap) << APSEL_SHIFT) & APSEL_APBANKSEL)
}

#[derive(Debug)]
pub struct DebugProbe {
    pub backend: Box<dyn ProbeBackend>,
    /// Debug mailbox access port index, either configured or found on open.
    pub mailbox_ap: Option<u8>,
    is_open: bool,
}

impl DebugProbe {
    pub fn new(backend: Box<dyn ProbeBackend>) -> Self {
        DebugProbe {
            backend,
            mailbox_ap: None,
            is_open: false,
        }
    }

    pub fn with_mailbox_ap(backend: Box<dyn ProbeBackend>, mailbox_ap: u8) -> Self {
        DebugProbe {
            backend,
            mailbox_ap: Some(mailbox_ap),
            is_open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub async fn open(&mut self) -> Result<(), ProbeError> {
        self.backend.open().await?;
        self.is_open = true;

        let found = self.find_mailbox_ap().await?;
        match (self.mailbox_ap, found) {
            (None, Some(ap)) => self.mailbox_ap = Some(ap),
            (None, None) => {
                self.close().await?;
                return Err(ProbeError::NotFound(
                    "debug mailbox access port is not available".into(),
                ));
            }
            (Some(configured), found) if found != Some(configured) => {
                info!(
                    "Detected debug mailbox AP {:?} differs from configured AP {}",
                    found, configured
                );
            }
            _ => {}
        }

        info!(
            "Opened debug probe {} (mailbox AP {:?})",
            self.backend.hardware_id(),
            self.mailbox_ap
        );
        Ok(())
    }

    pub async fn close(&mut self) -> Result<(), ProbeError> {
        if self.is_open {
            self.backend.close().await?;
            self.is_open = false;
            info!("Closed debug probe {}", self.backend.hardware_id());
        }
        Ok(())
    }

    fn selected_ap(&self) -> Result<u8, ProbeError> {
        if !self.is_open {
            return Err(ProbeError::NotOpen);
        }
        self.mailbox_ap.ok_or_else(|| {
            ProbeError::NotFound("no debug mailbox access port selected".into())
        })
    }

    /// Reads an access port register of the mailbox AP, or a debug port register.
    pub async fn coresight_read(
        &mut self,
        access_port: bool,
        addr: u32,
    ) -> Result<u32, ProbeError> {
        let result = if access_port {
            let ap = self.selected_ap()?;
            self.backend.read_ap(ap, ap_address(ap, addr)).await
        } else {
            if !self.is_open {
                return Err(ProbeError::NotOpen);
            }
            self.backend.read_dp(addr).await
        };

        result.map_err(|e| {
            error!("Coresight read at 0x{:08X} failed: {}", addr, e);
            ProbeError::Transfer(format!("coresight read at 0x{:08X} failed: {}", addr, e))
        })
    }

    pub async fn coresight_write(
        &mut self,
        access_port: bool,
        addr: u32,
        value: u32,
    ) -> Result<(), ProbeError> {
        let result = if access_port {
            let ap = self.selected_ap()?;
            self.backend.write_ap(ap, ap_address(ap, addr), value).await
        } else {
            if !self.is_open {
                return Err(ProbeError::NotOpen);
            }
            self.backend.write_dp(addr, value).await
        };

        result.map_err(|e| {
            error!("Coresight write at 0x{:08X} failed: {}", addr, e);
            ProbeError::Transfer(format!("coresight write at 0x{:08X} failed: {}", addr, e))
        })
    }

    pub async fn mailbox_read(&mut self, addr: u32) -> Result<u32, ProbeError> {
        self.coresight_read(true, addr).await
    }

    pub async fn mailbox_write(&mut self, addr: u32, value: u32) -> Result<(), ProbeError> {
        self.coresight_write(true, addr, value).await
    }

    /// Scans every AP index and returns the first one identifying as the debug mailbox.
    pub async fn find_mailbox_ap(&mut self) -> Result<Option<u8>, ProbeError> {
        if !self.is_open {
            return Err(ProbeError::NotOpen);
        }

        debug!("Looking for debug mailbox access port");
        for ap in 0..=u8::MAX {
            match self.backend.read_ap(ap, ap_address(ap, IDR_ADDRESS)).await {
                Ok(DEBUG_MAILBOX_IDR) => {
                    debug!("Found debug mailbox AP {}", ap);
                    return Ok(Some(ap));
                }
                Ok(0) => debug!("AP {} is not available", ap),
                Ok(idr) => debug!("Found general AP {} (IDR 0x{:08X})", ap, idr),
                Err(e) => debug!("AP {} is not available: {}", ap, e),
            }
        }

        Ok(None)
    }
}
