use serde::{Deserialize, Serialize};

use crate::api::FetchError;

/// One black-spot entry returned by the accident API.
///
/// Field names on the wire are kept as-is when the record is serialized
/// again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentRecord {
    #[serde(rename = "spot_nm")]
    pub location_name: String,
    #[serde(rename = "occrrnc_cnt", deserialize_with = "lenient::count")]
    pub occurrence_count: u32,
    #[serde(rename = "wnd_dnv_cnt", deserialize_with = "lenient::count")]
    pub injury_count: u32,
    #[serde(rename = "se_dnv_cnt", deserialize_with = "lenient::count")]
    pub serious_injury_count: u32,
    #[serde(rename = "dth_dnv_cnt", deserialize_with = "lenient::count")]
    pub death_count: u32,
    #[serde(rename = "la_crd", deserialize_with = "lenient::coordinate")]
    pub latitude: f64,
    #[serde(rename = "lo_crd", deserialize_with = "lenient::coordinate")]
    pub longitude: f64,
}

/// Top-level response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    result_code: Option<String>,
    result_msg: Option<String>,
    total_count: Option<u64>,
    #[serde(default)]
    items: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct Items {
    item: OneOrMany,
}

// The API collapses single-element lists into a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<AccidentRecord>),
    One(Box<AccidentRecord>),
}

const RESULT_OK: &str = "00";

/// Parses a response body into records.
///
/// A `totalCount` of zero is the "no data" case and yields an empty list
/// whatever `items` and `resultCode` hold (the API pairs it with
/// `03 NODATA_ERROR`).
pub fn parse_envelope(body: &str) -> Result<Vec<AccidentRecord>, FetchError> {
    let envelope: Envelope = serde_json::from_str(body)?;

    if envelope.total_count == Some(0) {
        return Ok(Vec::new());
    }

    if let Some(code) = envelope.result_code.filter(|code| code != RESULT_OK) {
        return Err(FetchError::Upstream {
            code,
            message: envelope.result_msg.unwrap_or_default(),
        });
    }

    if envelope.total_count.is_none() {
        return Err(<serde_json::Error as serde::de::Error>::missing_field("totalCount").into());
    }

    let items: Items = serde_json::from_value(envelope.items)?;
    Ok(match items.item {
        OneOrMany::Many(records) => records,
        OneOrMany::One(record) => vec![*record],
    })
}

mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(serde_json::Number),
        Text(String),
    }

    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Number(number) => number
                .as_u64()
                .or_else(|| number.as_f64().and_then(whole))
                .and_then(|value| u32::try_from(value).ok())
                .ok_or_else(|| D::Error::custom(format!("invalid count: {number}"))),
            Raw::Text(text) => text.trim().parse().map_err(D::Error::custom),
        }
    }

    // `5.0` counts as 5; `5.5` and negatives do not.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn whole(value: f64) -> Option<u64> {
        (value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value))
            .then(|| value as u64)
    }

    pub fn coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Number(number) => number
                .as_f64()
                .ok_or_else(|| D::Error::custom(format!("invalid coordinate: {number}"))),
            Raw::Text(text) => text.trim().parse().map_err(D::Error::custom),
        }
    }
}
