use chrono::{DateTime, NaiveDateTime};
use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Either encoding the monitor has ever written for `time`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawTime {
  EpochMillis(i64),
  Text(String),
}

impl RawTime {
  pub fn to_naive(&self) -> Result<NaiveDateTime, String> {
    match self {
      RawTime::EpochMillis(millis) => {
        return DateTime::from_timestamp_millis(*millis)
          .map(|parsed| parsed.naive_utc())
          .ok_or_else(|| format!("epoch millis out of range: {millis}"));
      }
      RawTime::Text(text) => {
        return parse_time_str(text);
      }
    }
  }
}

pub fn parse_time_str(input: &str) -> Result<NaiveDateTime, String> {
  let trimmed = input.trim();
  if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, TIME_FORMAT) {
    return Ok(parsed);
  }
  // some writers emit rfc3339 instead
  return DateTime::parse_from_rfc3339(trimmed)
    .map(|parsed| parsed.naive_utc())
    .map_err(|err| format!("invalid time {trimmed:?}: {err}"));
}

pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
  return time.format(TIME_FORMAT).to_string().serialize(serializer);
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
  let raw = RawTime::deserialize(deserializer)?;
  return raw.to_naive().map_err(D::Error::custom);
}
