//! Row decoding
//!
//! Turns dynamically-shaped `movies` rows into JSON objects without a fixed
//! schema. Date/time columns become ISO-8601 strings; everything else maps
//! to its native JSON form.

use crate::error::AppError;
use crate::models::MovieRow;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Map, Number, Value};
use tokio_postgres::Row;
use uuid::Uuid;

/// Convert one database row into a JSON object keyed by column name
pub fn row_to_movie(row: &Row) -> Result<MovieRow, AppError> {
    let mut movie = Map::with_capacity(row.len());

    for (idx, column) in row.columns().iter().enumerate() {
        let value = cell_to_json(row, idx, column.name(), column.type_().name())?;
        movie.insert(column.name().to_string(), value);
    }

    Ok(movie)
}

/// Decode a single cell according to its column type. NULL decodes to JSON
/// null for every supported type; a type outside this set is an error rather
/// than a silent placeholder.
fn cell_to_json(row: &Row, idx: usize, name: &str, ty: &str) -> Result<Value, AppError> {
    let value = match ty {
        "bool" => row.try_get::<_, Option<bool>>(idx)?.map(Value::Bool),
        "int2" => row.try_get::<_, Option<i16>>(idx)?.map(Value::from),
        "int4" => row.try_get::<_, Option<i32>>(idx)?.map(Value::from),
        "int8" => row.try_get::<_, Option<i64>>(idx)?.map(Value::from),
        // NaN and infinities have no JSON representation; they decode to null
        "float4" => row.try_get::<_, Option<f32>>(idx)?.map(|v| {
            Number::from_f64(f64::from(v))
                .map(Value::Number)
                .unwrap_or(Value::Null)
        }),
        "float8" => row.try_get::<_, Option<f64>>(idx)?.map(|v| {
            Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
        }),
        "text" | "varchar" | "bpchar" | "name" => {
            row.try_get::<_, Option<String>>(idx)?.map(Value::String)
        }
        "timestamp" => row
            .try_get::<_, Option<NaiveDateTime>>(idx)?
            .map(|v| Value::String(iso_naive_datetime(&v))),
        "timestamptz" => row
            .try_get::<_, Option<DateTime<Utc>>>(idx)?
            .map(|v| Value::String(iso_datetime(&v))),
        "date" => row
            .try_get::<_, Option<NaiveDate>>(idx)?
            .map(|v| Value::String(iso_date(&v))),
        "time" => row
            .try_get::<_, Option<NaiveTime>>(idx)?
            .map(|v| Value::String(iso_time(&v))),
        "json" | "jsonb" => row.try_get::<_, Option<Value>>(idx)?,
        "uuid" => row
            .try_get::<_, Option<Uuid>>(idx)?
            .map(|v| Value::String(v.to_string())),
        other => {
            return Err(AppError::UnsupportedColumn {
                column: name.to_string(),
                ty: other.to_string(),
            })
        }
    };

    Ok(value.unwrap_or(Value::Null))
}

/// Convert a pagination value to the driver's bind type.
///
/// Values pass through from the event untouched until this seam. Negatives
/// still reach the database (which rejects them); non-numeric input fails
/// here and joins the same error channel.
pub fn page_bind(name: &'static str, value: &Value) -> Result<i64, AppError> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| AppError::PageParameter {
            name,
            value: value.to_string(),
        }),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| AppError::PageParameter {
            name,
            value: value.to_string(),
        }),
        _ => Err(AppError::PageParameter {
            name,
            value: value.to_string(),
        }),
    }
}

/// ISO-8601 for a naive timestamp; fraction appears only when present
pub fn iso_naive_datetime(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// ISO-8601 with offset for a timezone-aware timestamp
pub fn iso_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339()
}

/// ISO-8601 calendar date
pub fn iso_date(value: &NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// ISO-8601 time of day
pub fn iso_time(value: &NaiveTime) -> String {
    value.format("%H:%M:%S%.f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_iso_naive_datetime() {
        let dt = NaiveDate::from_ymd_opt(2023, 1, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(iso_naive_datetime(&dt), "2023-01-05T14:30:00");
    }

    #[test]
    fn test_iso_naive_datetime_with_fraction() {
        let dt = NaiveDate::from_ymd_opt(2023, 1, 5)
            .unwrap()
            .and_hms_milli_opt(14, 30, 0, 250)
            .unwrap();
        assert_eq!(iso_naive_datetime(&dt), "2023-01-05T14:30:00.250");
    }

    #[test]
    fn test_iso_datetime_keeps_offset() {
        let dt = Utc.with_ymd_and_hms(2023, 1, 5, 14, 30, 0).unwrap();
        assert_eq!(iso_datetime(&dt), "2023-01-05T14:30:00+00:00");
    }

    #[test]
    fn test_iso_date() {
        let d = NaiveDate::from_ymd_opt(1995, 7, 21).unwrap();
        assert_eq!(iso_date(&d), "1995-07-21");
    }

    #[test]
    fn test_iso_time() {
        let t = NaiveTime::from_hms_opt(23, 5, 9).unwrap();
        assert_eq!(iso_time(&t), "23:05:09");
    }

    #[test]
    fn test_page_bind_integers() {
        assert_eq!(page_bind("limit", &json!(100)).unwrap(), 100);
        assert_eq!(page_bind("offset", &json!(0)).unwrap(), 0);
    }

    #[test]
    fn test_page_bind_numeric_strings() {
        assert_eq!(page_bind("limit", &json!("25")).unwrap(), 25);
        assert_eq!(page_bind("offset", &json!(" 7 ")).unwrap(), 7);
    }

    #[test]
    fn test_page_bind_negative_passes_through() {
        // The database is what rejects negatives, not this seam
        assert_eq!(page_bind("limit", &json!(-5)).unwrap(), -5);
        assert_eq!(page_bind("offset", &json!("-1")).unwrap(), -1);
    }

    #[test]
    fn test_page_bind_rejects_garbage() {
        assert!(page_bind("limit", &json!("abc")).is_err());
        assert!(page_bind("limit", &json!(2.5)).is_err());
        assert!(page_bind("offset", &json!([1, 2])).is_err());
        assert!(page_bind("offset", &json!(null)).is_err());
    }

    #[test]
    fn test_page_bind_error_names_the_parameter() {
        let err = page_bind("limit", &json!("abc")).unwrap_err();
        assert_eq!(err.kind(), "page_parameter");
        assert!(err.to_string().contains("limit"));
    }
}
