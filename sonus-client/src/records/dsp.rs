//! DSP resource usage.

use serde::Deserialize;

/// Body of `/operational/system/dspStatus/dspUsage/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DspUsageCollection {
    #[serde(rename = "dspUsage", default)]
    pub usage: Option<DspUsage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DspUsage {
    pub system_name: String,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub slot1_resources_utilized: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub slot2_resources_utilized: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub slot3_resources_utilized: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub slot4_resources_utilized: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub compression_total: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub compression_available: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub compression_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub g711_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub g711_ss_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub g726_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub g7231_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub g722_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub g7221_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub g729_ab_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub ecm_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub ilbc_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub amr_nb_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub amr_wb_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub tone_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub g711_v8_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub g711_ss_v8_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub g726_v8_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub g7231_v8_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub g722_v8_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub g7221_v8_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub g729_ab_v8_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub ecm_v34_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub ilbc_v8_utilization: f64,
    #[serde(deserialize_with = "crate::schema::lenient_f64")]
    pub opus_utilization: f64,
}

impl DspUsage {
    /// Utilization of each slot, keyed by slot number.
    pub fn slot_utilization(&self) -> [(&'static str, f64); 4] {
        [
            ("1", self.slot1_resources_utilized),
            ("2", self.slot2_resources_utilized),
            ("3", self.slot3_resources_utilized),
            ("4", self.slot4_resources_utilized),
        ]
    }

    /// Utilization per codec, keyed by the codec's display name.
    pub fn codec_utilization(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("G.711", self.g711_utilization),
            ("G.711 Silence Suppression", self.g711_ss_utilization),
            ("G.726", self.g726_utilization),
            ("G.723.1", self.g7231_utilization),
            ("G.722", self.g722_utilization),
            ("G.722.1", self.g7221_utilization),
            ("G.729", self.g729_ab_utilization),
            ("ECM", self.ecm_utilization),
            ("iLBC", self.ilbc_utilization),
            ("AMR-NB", self.amr_nb_utilization),
            ("AMR-WB", self.amr_wb_utilization),
            ("Tone", self.tone_utilization),
            ("G.711 V8", self.g711_v8_utilization),
            ("G.711 Silence Suppression V8", self.g711_ss_v8_utilization),
            ("G.726 V8", self.g726_v8_utilization),
            ("G.723.1 V8", self.g7231_v8_utilization),
            ("G.722 V8", self.g722_v8_utilization),
            ("G.722.1 V8", self.g7221_v8_utilization),
            ("G.729 V8", self.g729_ab_v8_utilization),
            ("ECM V.34", self.ecm_v34_utilization),
            ("iLBC V8", self.ilbc_v8_utilization),
            ("Opus", self.opus_utilization),
        ]
    }
}
