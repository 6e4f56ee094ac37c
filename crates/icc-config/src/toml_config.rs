use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use icc_core::CardAppType;
use serde::Deserialize;
use toml::Value;

use super::stack_config::{CfgSms, CfgStk, IccConfig, IccState, SharedConfig};

/// Build `SharedConfig` from a TOML configuration file
pub fn from_toml_str(toml_str: &str) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let root: TomlConfigRoot = toml::from_str(toml_str)?;

    // Various sanity checks
    let expected_config_version = "0.1";
    if !root.config_version.eq(expected_config_version) {
        return Err(format!(
            "Unrecognized config_version: {}, expect {}",
            root.config_version, expected_config_version
        )
        .into());
    }
    if !root.extra.is_empty() {
        return Err(format!("Unrecognized top-level fields: {:?}", sorted_keys(&root.extra)).into());
    }
    if let Some(ref sms) = root.sms {
        if !sms.extra.is_empty() {
            return Err(format!("Unrecognized fields in sms: {:?}", sorted_keys(&sms.extra)).into());
        }
    }
    if let Some(ref stk) = root.stk {
        if !stk.extra.is_empty() {
            return Err(format!("Unrecognized fields in stk: {:?}", sorted_keys(&stk.extra)).into());
        }
    }
    if let Some(ref st) = root.state {
        if !st.extra.is_empty() {
            return Err(format!("Unrecognized fields in state: {:?}", sorted_keys(&st.extra)).into());
        }
    }

    let mut cfg = IccConfig::new(root.app_type);
    cfg.debug_log = root.debug_log;
    if let Some(sms) = root.sms {
        apply_sms_patch(&mut cfg.sms, sms);
    }
    if let Some(stk) = root.stk {
        apply_stk_patch(&mut cfg.stk, stk);
    }
    cfg.validate()?;

    let mut state = IccState::new(cfg.app_type);
    if let Some(st) = root.state {
        if let Some(app_type) = st.app_type {
            state.app_type = app_type;
        }
    }

    Ok(SharedConfig::from_parts(cfg, state))
}

/// Build `SharedConfig` from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let mut contents = String::new();
    let mut reader = BufReader::new(reader);
    reader.read_to_string(&mut contents)?;
    from_toml_str(&contents)
}

/// Build `SharedConfig` from a file path.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let f = File::open(path)?;
    let r = BufReader::new(f);
    let cfg = from_reader(r)?;
    Ok(cfg)
}

fn apply_sms_patch(dst: &mut CfgSms, src: SmsDto) {
    dst.timezone_offset_minutes = src.timezone_offset_minutes;
    if let Some(v) = src.status_report_request {
        dst.status_report_request = v;
    }
    if let Some(v) = src.segment_ref_16bit {
        dst.segment_ref_16bit = v;
    }
}

fn apply_stk_patch(dst: &mut CfgStk, src: StkDto) {
    if let Some(v) = src.terminal_response_on_missing {
        dst.terminal_response_on_missing = v;
    }
}

fn sorted_keys(map: &HashMap<String, Value>) -> Vec<&str> {
    let mut v: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
    v.sort_unstable();
    v
}

/// ----------------------- DTOs for input shape -----------------------

#[derive(Deserialize)]
struct TomlConfigRoot {
    config_version: String,
    app_type: CardAppType,
    debug_log: Option<String>,

    #[serde(default)]
    sms: Option<SmsDto>,

    #[serde(default)]
    stk: Option<StkDto>,

    #[serde(default)]
    state: Option<StatePatch>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Default, Deserialize)]
struct SmsDto {
    pub timezone_offset_minutes: Option<i32>,
    pub status_report_request: Option<bool>,
    pub segment_ref_16bit: Option<bool>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Default, Deserialize)]
struct StkDto {
    pub terminal_response_on_missing: Option<bool>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Default, Deserialize)]
struct StatePatch {
    pub app_type: Option<CardAppType>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CONFIG: &str = r#"
config_version = "0.1"
app_type = "Sim"
debug_log = "icc.log"

[sms]
timezone_offset_minutes = 60
status_report_request = true

[stk]
terminal_response_on_missing = false

[state]
app_type = "Usim"
"#;

    #[test]
    fn test_full_config() {
        let shared = from_toml_str(FULL_CONFIG).unwrap();
        let cfg = shared.config();
        assert_eq!(cfg.app_type, CardAppType::Sim);
        assert_eq!(cfg.debug_log.as_deref(), Some("icc.log"));
        assert_eq!(cfg.sms.timezone_offset_minutes, Some(60));
        assert!(cfg.sms.status_report_request);
        assert!(!cfg.sms.segment_ref_16bit);
        assert!(!cfg.stk.terminal_response_on_missing);
        assert_eq!(shared.state_read().app_type, CardAppType::Usim);
    }

    #[test]
    fn test_minimal_config() {
        let shared = from_toml_str("config_version = \"0.1\"\napp_type = \"Ruim\"\n").unwrap();
        assert_eq!(shared.state_read().app_type, CardAppType::Ruim);
        assert!(shared.config().stk.terminal_response_on_missing);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = from_toml_str("config_version = \"0.1\"\napp_type = \"Sim\"\n[sms]\nfoo = 1\n").unwrap_err();
        assert!(err.to_string().contains("Unrecognized fields in sms"));

        let err = from_toml_str("config_version = \"0.1\"\napp_type = \"Sim\"\nbar = true\n").unwrap_err();
        assert!(err.to_string().contains("bar"));
    }

    #[test]
    fn test_rejects_version_and_invalid_values() {
        assert!(from_toml_str("config_version = \"0.5\"\napp_type = \"Sim\"\n").is_err());
        assert!(
            from_toml_str("config_version = \"0.1\"\napp_type = \"Sim\"\n[sms]\ntimezone_offset_minutes = 7\n").is_err()
        );
    }
}
