use anyhow::Result;
use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{to_string, to_value, Map, Value};
use std::io::{Read, Write};

pub fn dejsonify<'a, T>(json_str: &'a str) -> serde_json::Result<T>
where
    T: Deserialize<'a>,
{
    serde_json::from_str::<T>(json_str)
}

/// Serializes `obj` with object keys sorted at every depth, so equal values
/// always produce identical strings.
pub fn jsonify<T>(obj: &T) -> String
where
    T: Serialize,
{
    to_string(&sort_keys(
        &to_value(obj).expect("to_value failed on serializable object"),
    ))
    .expect("to_string failed on serializable object")
}

pub fn sort_keys(json_value: &Value) -> Value {
    match json_value {
        Value::Object(obj) => {
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort();
            let mut sorted_map = Map::new();
            for key in keys {
                sorted_map.insert(key.clone(), sort_keys(&obj[key]));
            }
            Value::Object(sorted_map)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        _ => json_value.clone(),
    }
}

pub fn compress_obj<T>(input: &T) -> Result<Vec<u8>>
where
    T: Serialize,
{
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(jsonify(input).as_bytes())?;
    Ok(encoder.finish()?)
}

pub fn decompress_obj<T>(input: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let mut decoder = ZlibDecoder::new(input);
    let mut decompressed = String::new();
    decoder.read_to_string(&mut decompressed)?;
    Ok(dejsonify(&decompressed)?)
}
