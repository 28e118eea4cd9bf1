//! Serde representation for floats that may hold the fold sentinels.
//!
//! JSON has no infinity or NaN, and `serde_json` writes them as `null`.
//! Finite values stay plain numbers; non-finite ones are written as the
//! strings `"inf"`, `"-inf"` and `"nan"`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FloatRepr {
    Number(f64),
    Text(String),
}

fn to_repr(value: f64) -> FloatRepr {
    if value.is_finite() {
        FloatRepr::Number(value)
    } else if value.is_nan() {
        FloatRepr::Text("nan".to_owned())
    } else if value > 0.0 {
        FloatRepr::Text("inf".to_owned())
    } else {
        FloatRepr::Text("-inf".to_owned())
    }
}

fn from_repr<E: serde::de::Error>(repr: FloatRepr) -> Result<f64, E> {
    match repr {
        FloatRepr::Number(value) => Ok(value),
        FloatRepr::Text(text) => match text.as_str() {
            "inf" | "+inf" => Ok(f64::INFINITY),
            "-inf" => Ok(f64::NEG_INFINITY),
            "nan" => Ok(f64::NAN),
            other => Err(E::custom(format!("unrecognized float literal `{other}`"))),
        },
    }
}

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    to_repr(*value).serialize(serializer)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    from_repr(FloatRepr::deserialize(deserializer)?)
}

/// Same representation for optional floats; `None` stays `null`.
pub mod option {
    use super::{FloatRepr, from_repr, to_repr};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        value.map(to_repr).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        Option::<FloatRepr>::deserialize(deserializer)?
            .map(from_repr::<D::Error>)
            .transpose()
    }
}
