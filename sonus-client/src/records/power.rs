//! Power supply status.

use serde::Deserialize;

/// Body of `/operational/system/powerSupplyStatus/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PowerSupplyCollection {
    #[serde(rename = "powerSupplyStatus", default)]
    pub supplies: Vec<PowerSupplyStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PowerSupplyStatus {
    pub server_name: String,
    pub power_supply_id: String,
    pub present: bool,
    pub product_name: String,
    pub power_fault: bool,
    pub voltage_fault: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_power_supplies() {
        let xml = r#"
            <collection xmlns:y="http://tail-f.com/ns/rest">
              <powerSupplyStatus xmlns="http://sonusnet.com/ns/mibs/SONUS-SYSTEM-MIB/1.0">
                <serverName>densbc01a</serverName>
                <powerSupplyId>PSA</powerSupplyId>
                <present>true</present>
                <productName>TECTROL  TC92S-1525R</productName>
                <serialNum>00000000</serialNum>
                <powerFault>false</powerFault>
                <voltageFault>true</voltageFault>
              </powerSupplyStatus>
            </collection>
        "#;

        let psus: PowerSupplyCollection = quick_xml::de::from_str(xml).unwrap();
        let psu = &psus.supplies[0];
        assert_eq!(psu.power_supply_id, "PSA");
        assert!(psu.present);
        assert!(!psu.power_fault);
        assert!(psu.voltage_fault);
    }
}
