//! Bridge and manager configuration, with environment overrides.

use crate::domain::{
    invariant_template_counts, BridgeResult, QuorumPolicy, DEFAULT_PROTOCOL_VERSION,
};
use serde::{Deserialize, Serialize};
use std::env;

/// Relay bridge configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Minimum corroborating sources.
    pub min_count: u64,
    /// Corroborating sources requested.
    pub ask_count: u64,
    /// Protocol version of the request template.
    pub protocol_version: u64,
    /// Whether the counts gate admission.
    pub quorum_policy: QuorumPolicy,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            min_count: 1,
            ask_count: 1,
            protocol_version: DEFAULT_PROTOCOL_VERSION,
            quorum_policy: QuorumPolicy::Advisory,
        }
    }
}

impl BridgeConfig {
    /// Configuration with the given quorum counts and defaults elsewhere.
    pub fn with_counts(min_count: u64, ask_count: u64) -> Self {
        Self {
            min_count,
            ask_count,
            ..Self::default()
        }
    }

    /// Check `0 < min_count <= ask_count`.
    pub fn validate(&self) -> BridgeResult<()> {
        invariant_template_counts(self.min_count, self.ask_count)
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_BRIDGE_MIN_COUNT`: Minimum count (default: 1)
    /// - `QC_BRIDGE_ASK_COUNT`: Ask count (default: 1)
    /// - `QC_BRIDGE_PROTOCOL_VERSION`: Protocol version (default: 42)
    /// - `QC_BRIDGE_QUORUM_POLICY`: `advisory` or `enforced` (default: advisory)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_count: parse_var("QC_BRIDGE_MIN_COUNT").unwrap_or(defaults.min_count),
            ask_count: parse_var("QC_BRIDGE_ASK_COUNT").unwrap_or(defaults.ask_count),
            protocol_version: parse_var("QC_BRIDGE_PROTOCOL_VERSION")
                .unwrap_or(defaults.protocol_version),
            quorum_policy: env::var("QC_BRIDGE_QUORUM_POLICY")
                .ok()
                .and_then(|v| parse_quorum_policy(&v))
                .unwrap_or(defaults.quorum_policy),
        }
    }
}

/// How DEPOSIT syncs obtain their relay outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepositMode {
    /// The proof must already be relayed; otherwise `UnrelayedDeposit`.
    #[default]
    RequirePriorRelay,
    /// Relay the embedded proof first, then credit.
    RelayThrough,
}

/// Child chain manager configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Deposit admission mode.
    pub deposit_mode: DepositMode,
}

impl ManagerConfig {
    /// Create configuration from environment variables.
    ///
    /// - `QC_MANAGER_DEPOSIT_MODE`: `require-prior-relay` or `relay-through`
    pub fn from_env() -> Self {
        Self {
            deposit_mode: env::var("QC_MANAGER_DEPOSIT_MODE")
                .ok()
                .and_then(|v| parse_deposit_mode(&v))
                .unwrap_or_default(),
        }
    }
}

fn parse_var(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_quorum_policy(value: &str) -> Option<QuorumPolicy> {
    match value.trim().to_lowercase().as_str() {
        "advisory" => Some(QuorumPolicy::Advisory),
        "enforced" => Some(QuorumPolicy::Enforced),
        _ => None,
    }
}

fn parse_deposit_mode(value: &str) -> Option<DepositMode> {
    match value.trim().to_lowercase().as_str() {
        "require-prior-relay" => Some(DepositMode::RequirePriorRelay),
        "relay-through" => Some(DepositMode::RelayThrough),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENV_VARS: [&str; 5] = [
        "QC_BRIDGE_MIN_COUNT",
        "QC_BRIDGE_ASK_COUNT",
        "QC_BRIDGE_PROTOCOL_VERSION",
        "QC_BRIDGE_QUORUM_POLICY",
        "QC_MANAGER_DEPOSIT_MODE",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let config = BridgeConfig::default();
        assert_eq!(config.min_count, 1);
        assert_eq!(config.ask_count, 1);
        assert_eq!(config.protocol_version, 42);
        assert_eq!(config.quorum_policy, QuorumPolicy::Advisory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_counts_validation() {
        assert!(BridgeConfig::with_counts(3, 4).validate().is_ok());
        assert!(BridgeConfig::with_counts(5, 4).validate().is_err());
        assert!(BridgeConfig::with_counts(0, 0).validate().is_err());
    }

    #[test]
    fn test_parse_policies() {
        assert_eq!(parse_quorum_policy("Enforced"), Some(QuorumPolicy::Enforced));
        assert_eq!(parse_quorum_policy(" advisory "), Some(QuorumPolicy::Advisory));
        assert_eq!(parse_quorum_policy("strict"), None);
        assert_eq!(
            parse_deposit_mode("relay-through"),
            Some(DepositMode::RelayThrough)
        );
        assert_eq!(parse_deposit_mode("later"), None);
    }

    #[test]
    fn test_config_json_shape() {
        let config = BridgeConfig {
            quorum_policy: QuorumPolicy::Enforced,
            ..BridgeConfig::with_counts(3, 4)
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"quorum_policy\":\"enforced\""));
        let back: BridgeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        let manager: ManagerConfig =
            serde_json::from_str(r#"{"deposit_mode":"relay-through"}"#).unwrap();
        assert_eq!(manager.deposit_mode, DepositMode::RelayThrough);
    }

    #[test]
    #[serial]
    fn test_from_env_without_vars_uses_defaults() {
        clear_env();
        assert_eq!(BridgeConfig::from_env(), BridgeConfig::default());
        assert_eq!(ManagerConfig::from_env(), ManagerConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        env::set_var("QC_BRIDGE_MIN_COUNT", "3");
        env::set_var("QC_BRIDGE_ASK_COUNT", " 4 ");
        env::set_var("QC_BRIDGE_PROTOCOL_VERSION", "77");
        env::set_var("QC_BRIDGE_QUORUM_POLICY", "ENFORCED");
        env::set_var("QC_MANAGER_DEPOSIT_MODE", "relay-through");

        let bridge = BridgeConfig::from_env();
        let manager = ManagerConfig::from_env();
        clear_env();

        assert_eq!(
            bridge,
            BridgeConfig {
                min_count: 3,
                ask_count: 4,
                protocol_version: 77,
                quorum_policy: QuorumPolicy::Enforced,
            }
        );
        assert_eq!(manager.deposit_mode, DepositMode::RelayThrough);
    }

    #[test]
    #[serial]
    fn test_from_env_unparsable_falls_back() {
        clear_env();
        env::set_var("QC_BRIDGE_MIN_COUNT", "abc");
        env::set_var("QC_BRIDGE_ASK_COUNT", "-1");
        env::set_var("QC_BRIDGE_PROTOCOL_VERSION", "");
        env::set_var("QC_BRIDGE_QUORUM_POLICY", "strict");
        env::set_var("QC_MANAGER_DEPOSIT_MODE", "later");

        let bridge = BridgeConfig::from_env();
        let manager = ManagerConfig::from_env();
        clear_env();

        assert_eq!(bridge, BridgeConfig::default());
        assert_eq!(manager.deposit_mode, DepositMode::RequirePriorRelay);
    }

    #[test]
    #[serial]
    fn test_parse_var() {
        clear_env();
        assert_eq!(parse_var("QC_BRIDGE_MIN_COUNT"), None);
        env::set_var("QC_BRIDGE_MIN_COUNT", "12");
        assert_eq!(parse_var("QC_BRIDGE_MIN_COUNT"), Some(12));
        env::set_var("QC_BRIDGE_MIN_COUNT", "12x");
        assert_eq!(parse_var("QC_BRIDGE_MIN_COUNT"), None);
        clear_env();
    }
}
