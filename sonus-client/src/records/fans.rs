//! Fan tray status.

use std::num::ParseFloatError;

use serde::Deserialize;

/// Body of `/operational/system/fanStatus/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FanCollection {
    #[serde(rename = "fanStatus", default)]
    pub fans: Vec<FanStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FanStatus {
    pub server_name: String,
    pub fan_id: String,
    /// Reported as e.g. `"5632 RPM"`.
    pub speed: String,
}

impl FanStatus {
    /// Speed in RPM.
    pub fn rpm(&self) -> Result<f64, ParseFloatError> {
        self.speed.trim().trim_end_matches("RPM").trim().parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpm_parsing() {
        let fan = FanStatus {
            speed: "5632 RPM".to_string(),
            ..Default::default()
        };
        assert_eq!(fan.rpm().unwrap(), 5632.0);

        let fan = FanStatus {
            speed: "unknown".to_string(),
            ..Default::default()
        };
        assert!(fan.rpm().is_err());
    }

    #[test]
    fn test_decode_fans() {
        let xml = r#"
            <collection xmlns:y="http://tail-f.com/ns/rest">
              <fanStatus xmlns="http://sonusnet.com/ns/mibs/SONUS-SYSTEM-MIB/1.0">
                <serverName>densbc01a</serverName>
                <fanId>FAN1/BOT</fanId>
                <speed>5632 RPM</speed>
              </fanStatus>
            </collection>
        "#;

        let fans: FanCollection = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(fans.fans.len(), 1);
        assert_eq!(fans.fans[0].fan_id, "FAN1/BOT");
        assert_eq!(fans.fans[0].rpm().unwrap(), 5632.0);
    }
}
