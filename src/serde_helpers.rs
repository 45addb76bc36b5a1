use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a quantity permissively: numbers and numeric strings are accepted,
/// anything else (null, text, negative, NaN) reads as 0.
pub fn lenient_quantity<'de, D>(d: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(d)?;
    Ok(quantity_from_value(&value).unwrap_or(0.0))
}

/// Like [`lenient_quantity`] but keeps "absent" distinct for partial updates.
pub fn lenient_quantity_opt<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(d)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(quantity_from_value(&value).unwrap_or(0.0)))
}

/// Reads text permissively: a string is kept, anything else (null,
/// numbers, objects) reads as empty.
pub fn lenient_text<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

fn quantity_from_value(value: &Value) -> Option<f64> {
    let q = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (q.is_finite() && q >= 0.0).then_some(q)
}

/// `YYYY-MM-DD` dates.
pub mod iso_date {
    use serde::{de::Error as _, ser::Error as _, Deserialize, Deserializer, Serializer};
    use time::{format_description::FormatItem, macros::format_description, Date};

    pub(crate) const FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S: Serializer>(date: &Date, s: S) -> Result<S::Ok, S::Error> {
        let text = date.format(FORMAT).map_err(S::Error::custom)?;
        s.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Date, D::Error> {
        let text = String::deserialize(d)?;
        Date::parse(text.trim(), FORMAT).map_err(D::Error::custom)
    }

    pub mod option {
        use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
        use time::Date;

        pub fn serialize<S: Serializer>(date: &Option<Date>, s: S) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, s),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Date>, D::Error> {
            match Option::<String>::deserialize(d)? {
                Some(text) if !text.trim().is_empty() => Date::parse(text.trim(), super::FORMAT)
                    .map(Some)
                    .map_err(D::Error::custom),
                _ => Ok(None),
            }
        }
    }

    /// Formats a date the same way it travels over the wire.
    pub fn display(date: Date) -> String {
        date.format(FORMAT).unwrap_or_else(|_| date.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use time::macros::date;

    #[derive(Debug, Deserialize)]
    struct Line {
        #[serde(default, deserialize_with = "lenient_quantity")]
        quantity: f64,
    }

    #[derive(Debug, Deserialize)]
    struct Named {
        #[serde(default, deserialize_with = "lenient_text")]
        name: String,
    }

    #[derive(Debug, Deserialize)]
    struct Dated {
        #[serde(with = "iso_date")]
        day: time::Date,
        #[serde(default, with = "iso_date::option")]
        expiry: Option<time::Date>,
    }

    fn qty(json: &str) -> f64 {
        serde_json::from_str::<Line>(json).unwrap().quantity
    }

    #[test]
    fn quantities_are_read_permissively() {
        assert_eq!(qty(r#"{"quantity": 2.5}"#), 2.5);
        assert_eq!(qty(r#"{"quantity": "3"}"#), 3.0);
        assert_eq!(qty(r#"{"quantity": " 1.5 "}"#), 1.5);
        assert_eq!(qty(r#"{"quantity": "少々"}"#), 0.0);
        assert_eq!(qty(r#"{"quantity": null}"#), 0.0);
        assert_eq!(qty(r#"{"quantity": -4}"#), 0.0);
        assert_eq!(qty(r#"{"quantity": "NaN"}"#), 0.0);
        assert_eq!(qty(r#"{}"#), 0.0);
    }

    #[test]
    fn text_fields_tolerate_null_and_non_strings() {
        let name = |json: &str| serde_json::from_str::<Named>(json).unwrap().name;
        assert_eq!(name(r#"{"name": "塩"}"#), "塩");
        assert_eq!(name(r#"{"name": null}"#), "");
        assert_eq!(name(r#"{"name": 42}"#), "");
        assert_eq!(name(r#"{}"#), "");
    }

    #[test]
    fn dates_use_iso_calendar_format() {
        let d: Dated = serde_json::from_str(r#"{"day": "2024-03-09", "expiry": ""}"#).unwrap();
        assert_eq!(d.day, date!(2024 - 03 - 09));
        assert_eq!(d.expiry, None);

        let d: Dated = serde_json::from_str(r#"{"day": "2024-03-09", "expiry": "2024-04-01"}"#)
            .unwrap();
        assert_eq!(d.expiry, Some(date!(2024 - 04 - 01)));
        assert_eq!(iso_date::display(d.day), "2024-03-09");

        assert!(serde_json::from_str::<Dated>(r#"{"day": "03/09/2024"}"#).is_err());
    }
}
