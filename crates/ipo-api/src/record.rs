use {
    serde::{Deserialize, Deserializer, Serialize, Serializer},
    std::{collections::BTreeMap, fmt},
};

/// A single value of an IPO record as delivered by the API.
///
/// The backend is a thin wrapper around a CSV export, so any column can turn
/// up as a number, a string or `null`. Every JSON shape is accepted here so
/// one odd cell never fails the whole list.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldValue {
    #[default]
    Absent,
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Absent,
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => FieldValue::Number(f),
                None => FieldValue::Text(n.to_string()),
            },
            serde_json::Value::String(s) => FieldValue::Text(s),
            serde_json::Value::Bool(b) => FieldValue::Text(b.to_string()),
            other => FieldValue::Text(other.to_string()),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(FieldValue::from(value))
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Absent => serializer.serialize_none(),
            FieldValue::Number(n) => serializer.serialize_f64(*n),
            FieldValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Absent => Ok(()),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// One row of `GET /api/ipos`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpoRecord {
    #[serde(default)]
    pub ipo_name: FieldValue,
    #[serde(default)]
    pub status: FieldValue,
    #[serde(default)]
    pub subscription_percent: FieldValue,
    #[serde(default)]
    pub ipo_price: FieldValue,
    #[serde(default)]
    pub ipo_gmp: FieldValue,
    #[serde(default)]
    pub ipo_size: FieldValue,
    #[serde(default)]
    pub lot_size: FieldValue,
    #[serde(default)]
    pub open_date: FieldValue,
    #[serde(default)]
    pub close_date: FieldValue,
    #[serde(default)]
    pub gmp_updated_date: FieldValue,
    /// Columns the client does not know about yet
    #[serde(flatten)]
    pub extra: BTreeMap<String, FieldValue>,
}

impl IpoRecord {
    /// Display name of the IPO; empty when the row has none
    pub fn name(&self) -> String {
        self.ipo_name.to_string()
    }

    /// Raw status text, if the row carries one
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_str()
    }

    /// Every field shown in the detail card, i.e. everything except the
    /// name and status which make up the card header.
    ///
    /// Known columns come first in the backend's column order, followed by
    /// unknown columns sorted by key.
    pub fn detail_fields(&self) -> Vec<(&str, &FieldValue)> {
        let mut fields: Vec<(&str, &FieldValue)> = vec![
            ("subscription_percent", &self.subscription_percent),
            ("ipo_price", &self.ipo_price),
            ("ipo_gmp", &self.ipo_gmp),
            ("ipo_size", &self.ipo_size),
            ("lot_size", &self.lot_size),
            ("open_date", &self.open_date),
            ("close_date", &self.close_date),
            ("gmp_updated_date", &self.gmp_updated_date),
        ];
        fields.extend(self.extra.iter().map(|(k, v)| (k.as_str(), v)));
        fields
    }

    /// Look up any field by its API name
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        match key {
            "ipo_name" => Some(&self.ipo_name),
            "status" => Some(&self.status),
            _ => self
                .detail_fields()
                .into_iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v),
        }
    }
}
