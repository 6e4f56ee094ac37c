use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use icc_core::CardAppType;

/// SMS codec settings
#[derive(Debug, Clone)]
pub struct CfgSms {
    /// Timezone offset written into SMS timestamps, in minutes east of UTC.
    /// When None, the local offset of the host is used.
    pub timezone_offset_minutes: Option<i32>,
    /// Set TP-SRR in outgoing SMS-SUBMIT PDUs
    pub status_report_request: bool,
    /// Use the 16 bit reference concatenation IE (0x08) instead of 0x00 for segmented messages
    pub segment_ref_16bit: bool,
}

impl Default for CfgSms {
    fn default() -> Self {
        Self {
            timezone_offset_minutes: None,
            status_report_request: false,
            segment_ref_16bit: false,
        }
    }
}

/// SIM Toolkit settings
#[derive(Debug, Clone)]
pub struct CfgStk {
    /// Send a terminal response to the card when a proactive command lacks mandatory data
    pub terminal_response_on_missing: bool,
}

impl Default for CfgStk {
    fn default() -> Self {
        Self { terminal_response_on_missing: true }
    }
}

#[derive(Debug, Clone)]
pub struct IccConfig {
    /// Card application selected at startup
    pub app_type: CardAppType,
    /// Optional verbose log file
    pub debug_log: Option<String>,

    pub sms: CfgSms,
    pub stk: CfgStk,
}

impl IccConfig {
    pub fn new(app_type: CardAppType) -> Self {
        Self {
            app_type,
            debug_log: None,
            sms: CfgSms::default(),
            stk: CfgStk::default(),
        }
    }

    pub fn validate(&self) -> Result<(), &str> {
        if let Some(offset) = self.sms.timezone_offset_minutes {
            // Timezone is coded in quarter hours, two BCD digits
            if offset % 15 != 0 {
                return Err("sms.timezone_offset_minutes must be a multiple of 15");
            }
            if offset.abs() > 79 * 15 {
                return Err("sms.timezone_offset_minutes out of range");
            }
        }
        Ok(())
    }
}

/// Mutable runtime state (lock-protected).
#[derive(Debug, Clone)]
pub struct IccState {
    /// Active card application. Switched by the RIL session.
    pub app_type: CardAppType,
    /// Incremented on every application switch. Caches keyed on card content compare against it.
    pub app_generation: u32,
    /// Raw EF_SST / EF_UST / EF_CST contents, once read
    pub service_table: Option<Vec<u8>>,
    pub iccid: Option<String>,
}

impl IccState {
    pub fn new(app_type: CardAppType) -> Self {
        Self {
            app_type,
            app_generation: 0,
            service_table: None,
            iccid: None,
        }
    }

    /// Select another card application. Card derived state is dropped.
    pub fn switch_app_type(&mut self, app_type: CardAppType) {
        self.app_type = app_type;
        self.app_generation = self.app_generation.wrapping_add(1);
        self.service_table = None;
    }
}

/// Global shared configuration: immutable config + mutable state.
#[derive(Debug, Clone)]
pub struct SharedConfig {
    /// Read-only configuration (immutable after construction).
    cfg: Arc<IccConfig>,
    /// Mutable state guarded with RwLock.
    state: Arc<RwLock<IccState>>,
}

impl SharedConfig {
    pub fn new(app_type: CardAppType) -> Self {
        Self::from_config(IccConfig::new(app_type))
    }

    pub fn from_config(cfg: IccConfig) -> Self {
        let state = IccState::new(cfg.app_type);
        Self::from_parts(cfg, state)
    }

    pub fn from_parts(cfg: IccConfig, state: IccState) -> Self {
        // Check config for validity before returning the SharedConfig object
        if let Err(e) = cfg.validate() {
            panic!("Invalid ICC configuration: {}", e);
        }

        Self {
            cfg: Arc::new(cfg),
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Access immutable config.
    pub fn config(&self) -> Arc<IccConfig> {
        Arc::clone(&self.cfg)
    }

    /// Read guard for mutable state.
    pub fn state_read(&self) -> RwLockReadGuard<'_, IccState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Write guard for mutable state.
    pub fn state_write(&self) -> RwLockWriteGuard<'_, IccState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
