use serde_json::{Map, Value};

use crate::error::AppError;
use crate::modules::image::schema::GenerateImageResponse;

/// Reshapes a txt2img body. The WebUI sends `info` as a JSON document
/// encoded in a string; it is decoded here and a malformed one fails the call.
pub fn normalize_txt2img(mut raw: Value) -> Result<GenerateImageResponse, AppError> {
    let images = match raw.get_mut("images").map(Value::take) {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => serde_json::from_value(value).map_err(|e| protocol_error(format!(
            "images is not a list of strings: {}",
            e
        )))?,
    };

    let parameters = match raw.get_mut("parameters").map(Value::take) {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(value) => value,
    };

    let info = match raw.get_mut("info").map(Value::take) {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(Value::String(encoded)) => match serde_json::from_str(&encoded) {
            Ok(value @ Value::Object(_)) => value,
            Ok(other) => {
                return Err(protocol_error(format!(
                    "info does not decode to an object: {}",
                    other
                )))
            }
            Err(e) => return Err(protocol_error(format!("info is not valid JSON: {}", e))),
        },
        Some(value @ Value::Object(_)) => value,
        Some(other) => {
            return Err(protocol_error(format!(
                "info has unexpected type: {}",
                other
            )))
        }
    };

    Ok(GenerateImageResponse {
        images,
        parameters,
        info,
    })
}

fn protocol_error(message: String) -> AppError {
    AppError::UpstreamProtocol {
        status: None,
        message: format!("Stable Diffusion WebUI returned an invalid response: {}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn info_string_is_decoded() {
        let raw = json!({
            "images": ["iVBORw0KGgo="],
            "parameters": { "steps": 20 },
            "info": "{\"seed\": 1234, \"sampler_name\": \"Euler a\"}"
        });

        let normalized = normalize_txt2img(raw).unwrap();
        assert_eq!(normalized.images, vec!["iVBORw0KGgo=".to_string()]);
        assert_eq!(normalized.parameters["steps"], 20);
        assert_eq!(normalized.info, json!({ "seed": 1234, "sampler_name": "Euler a" }));
    }

    #[test]
    fn malformed_info_is_a_protocol_error() {
        let raw = json!({ "images": [], "info": "{not json" });

        let err = normalize_txt2img(raw).unwrap_err();
        assert!(matches!(err, AppError::UpstreamProtocol { status: None, .. }));
    }

    #[test]
    fn info_string_must_decode_to_an_object() {
        for encoded in ["null", "[1]", "42", "\"text\""] {
            let err = normalize_txt2img(json!({ "images": [], "info": encoded })).unwrap_err();
            assert!(
                matches!(err, AppError::UpstreamProtocol { status: None, .. }),
                "{encoded} should be rejected"
            );
        }
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let normalized = normalize_txt2img(json!({})).unwrap();
        assert!(normalized.images.is_empty());
        assert_eq!(normalized.parameters, json!({}));
        assert_eq!(normalized.info, json!({}));
    }

    #[test]
    fn non_string_images_are_rejected() {
        let err = normalize_txt2img(json!({ "images": [1, 2] })).unwrap_err();
        assert!(matches!(err, AppError::UpstreamProtocol { .. }));
    }
}
