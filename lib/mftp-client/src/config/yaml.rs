/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use humanize_rs::ParseError;
use humanize_rs::bytes::Bytes;
use yaml_rust::{Yaml, yaml};

use super::{FtpClientConfig, FtpControlConfig, FtpPassiveMode, FtpTransferConfig};

fn normalize_key(raw: &str) -> String {
    raw.to_lowercase().replace('-', "_")
}

fn foreach_kv<F>(table: &yaml::Hash, mut f: F) -> anyhow::Result<()>
where
    F: FnMut(&str, &Yaml) -> anyhow::Result<()>,
{
    for (k, v) in table.iter() {
        if let Yaml::String(key) = k {
            f(key, v).context(format!("failed to parse value of key {key}"))?;
        } else {
            return Err(anyhow!("key in hash should be string"));
        }
    }
    Ok(())
}

fn as_humanize_usize(v: &Yaml) -> anyhow::Result<usize> {
    match v {
        Yaml::String(value) => {
            let v = value.parse::<Bytes>()?;
            Ok(v.size())
        }
        Yaml::Integer(value) => Ok(usize::try_from(*value)?),
        _ => Err(anyhow!(
            "yaml value type for humanize usize should be 'string' or 'integer'"
        )),
    }
}

fn as_usize(v: &Yaml) -> anyhow::Result<usize> {
    match v {
        Yaml::String(s) => Ok(usize::from_str(s)?),
        Yaml::Integer(i) => Ok(usize::try_from(*i)?),
        _ => Err(anyhow!(
            "yaml value type for 'usize' should be 'string' or 'integer'"
        )),
    }
}

fn as_duration(v: &Yaml) -> anyhow::Result<Duration> {
    match v {
        Yaml::String(value) => match humanize_rs::duration::parse(value) {
            Ok(v) => Ok(v),
            Err(ParseError::MissingUnit) => {
                let u = u64::from_str(value).map_err(|_| anyhow!("invalid duration string"))?;
                Ok(Duration::from_secs(u))
            }
            Err(e) => Err(anyhow!("invalid humanize duration string: {e}")),
        },
        Yaml::Integer(value) => {
            let u = u64::try_from(*value).map_err(|_| anyhow!("unsupported duration value"))?;
            Ok(Duration::from_secs(u))
        }
        _ => Err(anyhow!(
            "yaml value type for 'duration' should be 'string' or 'integer'"
        )),
    }
}

fn as_passive_mode(v: &Yaml) -> anyhow::Result<FtpPassiveMode> {
    if let Yaml::String(s) = v {
        match s.to_lowercase().as_str() {
            "pasv" => Ok(FtpPassiveMode::Pasv),
            "cpsv" => Ok(FtpPassiveMode::Cpsv),
            _ => Err(anyhow!("unsupported passive mode {s}")),
        }
    } else {
        Err(anyhow!("yaml value type for passive mode should be 'string'"))
    }
}

impl FtpControlConfig {
    pub fn parse_yaml(value: &Yaml) -> anyhow::Result<Self> {
        if let Yaml::Hash(map) = value {
            let mut config = FtpControlConfig::default();
            foreach_kv(map, |k, v| match normalize_key(k).as_str() {
                "max_line_len" | "max_line_length" => {
                    let len = as_humanize_usize(v)
                        .context(format!("invalid humanize usize value for key {k}"))?;
                    config.set_max_line_len(len);
                    Ok(())
                }
                "max_multi_lines" => {
                    let lines =
                        as_usize(v).context(format!("invalid usize value for key {k}"))?;
                    config.set_max_multi_lines(lines);
                    Ok(())
                }
                "command_timeout" => {
                    config.command_timeout = as_duration(v)
                        .context(format!("invalid humanize duration value for key {k}"))?;
                    Ok(())
                }
                _ => Err(anyhow!("invalid key {k}")),
            })?;
            Ok(config)
        } else {
            Err(anyhow!("invalid yaml type"))
        }
    }
}

impl FtpTransferConfig {
    pub fn parse_yaml(value: &Yaml) -> anyhow::Result<Self> {
        if let Yaml::Hash(map) = value {
            let mut config = FtpTransferConfig::default();
            foreach_kv(map, |k, v| match normalize_key(k).as_str() {
                "max_download_size" => {
                    config.max_download_size = as_humanize_usize(v)
                        .context(format!("invalid humanize usize value for key {k}"))?;
                    Ok(())
                }
                "connect_timeout" => {
                    config.connect_timeout = as_duration(v)
                        .context(format!("invalid humanize duration value for key {k}"))?;
                    Ok(())
                }
                "transfer_timeout" => {
                    config.transfer_timeout = as_duration(v)
                        .context(format!("invalid humanize duration value for key {k}"))?;
                    Ok(())
                }
                _ => Err(anyhow!("invalid key {k}")),
            })?;
            Ok(config)
        } else {
            Err(anyhow!("invalid yaml type"))
        }
    }
}

impl FtpClientConfig {
    pub fn parse_yaml(value: &Yaml) -> anyhow::Result<Self> {
        if let Yaml::Hash(map) = value {
            let mut config = FtpClientConfig::default();
            foreach_kv(map, |k, v| match normalize_key(k).as_str() {
                "control" => {
                    config.control = FtpControlConfig::parse_yaml(v).context(format!(
                        "invalid ftp control connection config value for key {k}"
                    ))?;
                    Ok(())
                }
                "transfer" => {
                    config.transfer = FtpTransferConfig::parse_yaml(v).context(format!(
                        "invalid ftp transfer connection config value for key {k}"
                    ))?;
                    Ok(())
                }
                "connect_timeout" => {
                    config.connect_timeout = as_duration(v)
                        .context(format!("invalid humanize duration value for key {k}"))?;
                    Ok(())
                }
                "greeting_timeout" => {
                    config.greeting_timeout = as_duration(v)
                        .context(format!("invalid humanize duration value for key {k}"))?;
                    Ok(())
                }
                "passive_mode" => {
                    config.passive_mode =
                        as_passive_mode(v).context(format!("invalid value for key {k}"))?;
                    Ok(())
                }
                _ => Err(anyhow!("invalid key {k}")),
            })?;
            Ok(config)
        } else {
            Err(anyhow!("invalid yaml type"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yaml_rust::YamlLoader;

    fn yaml_doc(s: &str) -> Yaml {
        YamlLoader::load_from_str(s).unwrap().remove(0)
    }

    #[test]
    fn ftp_control_config_parse_ok() {
        let yaml = yaml_doc(
            r#"
                max_line_len: "2KB"
                max_multi_lines: 256
                command_timeout: "30s"
            "#,
        );
        let config = FtpControlConfig::parse_yaml(&yaml).unwrap();
        assert_eq!(config.max_line_len, 2000);
        assert_eq!(config.max_multi_lines, 256);
        assert_eq!(config.command_timeout, Duration::from_secs(30));

        let yaml = yaml_doc(
            r#"
                max-line-length: "1KiB"
            "#,
        );
        let config = FtpControlConfig::parse_yaml(&yaml).unwrap();
        assert_eq!(config.max_line_len, 1024);
    }

    #[test]
    fn ftp_control_config_parse_err() {
        let yaml = yaml_doc(
            r#"
                invalid_key: "value"
            "#,
        );
        assert!(FtpControlConfig::parse_yaml(&yaml).is_err());

        let yaml = yaml_doc(
            r#"
                max_line_len: "2KBX"
            "#,
        );
        assert!(FtpControlConfig::parse_yaml(&yaml).is_err());

        let yaml = yaml_doc(
            r#"
                max_multi_lines: -1
            "#,
        );
        assert!(FtpControlConfig::parse_yaml(&yaml).is_err());

        let yaml = yaml_doc(
            r#"
                command_timeout: "invalid_duration"
            "#,
        );
        assert!(FtpControlConfig::parse_yaml(&yaml).is_err());

        let yaml = Yaml::String("invalid".to_string());
        assert!(FtpControlConfig::parse_yaml(&yaml).is_err());
    }

    #[test]
    fn ftp_transfer_config_parse_ok() {
        let yaml = yaml_doc(
            r#"
                max_download_size: "1MiB"
                connect_timeout: "5s"
                transfer_timeout: "5m"
            "#,
        );
        let config = FtpTransferConfig::parse_yaml(&yaml).unwrap();
        assert_eq!(config.max_download_size, 1024 * 1024);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.transfer_timeout, Duration::from_secs(300));
    }

    #[test]
    fn ftp_transfer_config_parse_err() {
        let yaml = yaml_doc(
            r#"
                max_download_size: -4096
            "#,
        );
        assert!(FtpTransferConfig::parse_yaml(&yaml).is_err());

        let yaml = yaml_doc(
            r#"
                transfer_timeout: "5x"
            "#,
        );
        assert!(FtpTransferConfig::parse_yaml(&yaml).is_err());

        let yaml = Yaml::Array(vec![]);
        assert!(FtpTransferConfig::parse_yaml(&yaml).is_err());
    }

    #[test]
    fn ftp_client_config_parse_ok() {
        let yaml = yaml_doc(
            r#"
                control:
                  max_line_len: "4KB"
                  max_multi_lines: 64
                  command_timeout: "15s"
                transfer:
                  max_download_size: 65536
                  transfer_timeout: "2m"
                connect_timeout: 10
                greeting_timeout: "5s"
                passive_mode: cpsv
            "#,
        );
        let config = FtpClientConfig::parse_yaml(&yaml).unwrap();
        assert_eq!(config.control.max_line_len, 4000);
        assert_eq!(config.control.max_multi_lines, 64);
        assert_eq!(config.control.command_timeout, Duration::from_secs(15));
        assert_eq!(config.transfer.max_download_size, 65536);
        assert_eq!(config.transfer.transfer_timeout, Duration::from_secs(120));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.greeting_timeout, Duration::from_secs(5));
        assert_eq!(config.passive_mode, FtpPassiveMode::Cpsv);
    }

    #[test]
    fn ftp_client_config_parse_err() {
        let yaml = yaml_doc(
            r#"
                control: "invalid"
            "#,
        );
        assert!(FtpClientConfig::parse_yaml(&yaml).is_err());

        let yaml = yaml_doc(
            r#"
                passive_mode: "port"
            "#,
        );
        assert!(FtpClientConfig::parse_yaml(&yaml).is_err());

        let yaml = yaml_doc(
            r#"
                connect_timeout: "-10s"
            "#,
        );
        assert!(FtpClientConfig::parse_yaml(&yaml).is_err());

        let yaml = Yaml::Null;
        assert!(FtpClientConfig::parse_yaml(&yaml).is_err());
    }
}
