//! Serde helpers for backend fields that may arrive as explicit `null`.

use serde::{Deserialize, Deserializer};

/// Deserialize `T`, treating `null` like a missing field.
pub fn or_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Row {
        #[serde(deserialize_with = "or_default")]
        name: String,
        #[serde(deserialize_with = "or_default")]
        amount: Decimal,
        #[serde(deserialize_with = "or_default")]
        count: u64,
    }

    #[test]
    fn test_null_reads_as_default() {
        let row: Row =
            serde_json::from_str(r#"{"name":null,"amount":null,"count":null}"#).unwrap();
        assert_eq!(row.name, "");
        assert_eq!(row.amount, Decimal::ZERO);
        assert_eq!(row.count, 0);
    }

    #[test]
    fn test_values_and_missing_fields() {
        let row: Row = serde_json::from_str(r#"{"name":"Asha","amount":12.5}"#).unwrap();
        assert_eq!(row.name, "Asha");
        assert_eq!(row.amount, dec!(12.5));
        assert_eq!(row.count, 0);
    }
}
