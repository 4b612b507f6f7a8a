//! Serde adapters for [`JacsUid`](crate::id::JacsUid).
//!
//! The type itself serializes transparently as its raw `u64`. JSON consumers
//! that lose precision above 2^53 can use [`as_string_uid`] instead:
//!
//! ```
//! use neuronbridge::{id::JacsUid, serde::as_string_uid};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Image {
//!     #[serde(with = "as_string_uid")]
//!     id: JacsUid,
//! }
//! ```

pub mod as_string_uid {
    use core::fmt;

    use serde::{Deserializer, Serializer, de};

    use crate::id::JacsUid;

    /// Serialize a UID as its decimal string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &JacsUid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(id)
    }

    /// Deserialize a UID from a decimal string. Plain integers are accepted
    /// too, so documents written with the default representation still load.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the string is
    /// not an unsigned 64-bit decimal.
    pub fn deserialize<'de, D>(d: D) -> Result<JacsUid, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct UidVisitor;

        impl de::Visitor<'_> for UidVisitor {
            type Value = JacsUid;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a JACS UID as a decimal string or integer")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse().map_err(de::Error::custom)
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(JacsUid::from_raw(v))
            }
        }

        d.deserialize_any(UidVisitor)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::as_string_uid;
    use crate::{Error, id::JacsUid};

    #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
    struct Row {
        #[serde(with = "as_string_uid")]
        id: JacsUid,
    }

    #[test]
    fn transparent_uid_is_a_number() {
        let uid = JacsUid::from_components(1_000, 3, 2, 17);
        let json = serde_json::to_value(uid).expect("serialize");
        assert_eq!(json, json!(uid.to_raw()));
        let back: JacsUid = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, uid);
    }

    #[test]
    fn string_uid_roundtrip() {
        let row = Row {
            id: JacsUid::from_raw(2_757_170_844_311_125_522),
        };
        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(json, r#"{"id":"2757170844311125522"}"#);
        let back: Row = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, row);
    }

    #[test]
    fn string_uid_accepts_integers() {
        let row: Row = serde_json::from_value(json!({"id": 42})).expect("deserialize");
        assert_eq!(row.id, JacsUid::from_raw(42));
    }

    #[test]
    fn string_uid_rejects_garbage() {
        let err = serde_json::from_value::<Row>(json!({"id": "not-a-uid"})).expect_err("should fail");
        assert_eq!(
            err.to_string(),
            Error::ParseUid {
                input: "not-a-uid".to_owned()
            }
            .to_string()
        );
    }
}
