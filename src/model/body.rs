use serde::{Deserialize, Serialize};

use super::field::KVField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RawType {
    #[default]
    Json,
    Text,
    Xml,
    Html,
}

impl RawType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RawType::Json => "json",
            RawType::Text => "text",
            RawType::Xml => "xml",
            RawType::Html => "html",
        }
    }

    /// Content-Type sent for an outbound raw body of this kind.
    pub fn mime(&self) -> &'static str {
        match self {
            RawType::Json => "application/json",
            RawType::Text => "text/plain",
            RawType::Xml => "application/xml",
            RawType::Html => "text/html",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FormType {
    #[default]
    #[serde(rename = "urlencoded")]
    UrlEncoded,
    // "data" is the legacy wire spelling for multipart form bodies
    #[serde(rename = "multipart", alias = "data")]
    Multipart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    #[default]
    Remote,
    Native,
}

/// Reference to an uploadable file known to the persistence service.
/// `url` is derived client-side and never round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FileRef {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub format: String,
}

impl FileRef {
    /// Fill `url` with the static-serving path for this file.
    pub fn with_static_url(mut self) -> Self {
        self.url = format!("/static/{}", self.name);
        self
    }
}

/// An HTTP message body. Only the active variant's payload exists; the wire
/// form (a flat struct with one field group per variant) is transcoded on the
/// serde boundary so stale sibling fields never reach the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireBody", into = "WireBody")]
pub enum HttpBody {
    None,
    Raw { raw_type: RawType, value: String },
    Form { form_type: FormType, fields: Vec<KVField> },
    File { file_type: FileType, file: Option<FileRef> },
    Binary { mime: String, bytes: Vec<u8> },
}

impl Default for HttpBody {
    fn default() -> Self {
        HttpBody::Raw {
            raw_type: RawType::Json,
            value: "{}".to_string(),
        }
    }
}

impl HttpBody {
    pub fn data_type(&self) -> &'static str {
        match self {
            HttpBody::None => "none",
            HttpBody::Raw { .. } => "raw",
            HttpBody::Form { .. } => "form",
            HttpBody::File { .. } => "file",
            HttpBody::Binary { .. } => "binary",
        }
    }
}

/// Flat wire representation shared with the persistence service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct WireBody {
    #[serde(rename = "dataType", default)]
    data_type: String,
    #[serde(rename = "fileType", default)]
    file_type: FileType,
    #[serde(rename = "fileValue", default, skip_serializing_if = "Option::is_none")]
    file_value: Option<FileRef>,
    #[serde(rename = "rawType", default)]
    raw_type: RawType,
    #[serde(rename = "rawValue", default)]
    raw_value: String,
    #[serde(rename = "formType", default)]
    form_type: FormType,
    #[serde(rename = "formValue", default)]
    form_value: Vec<KVField>,
    #[serde(rename = "binaryType", default, skip_serializing_if = "Option::is_none")]
    binary_type: Option<String>,
    #[serde(rename = "binaryValue", default, skip_serializing_if = "Option::is_none")]
    binary_value: Option<Vec<u8>>,
}

impl From<WireBody> for HttpBody {
    fn from(wire: WireBody) -> Self {
        match wire.data_type.as_str() {
            "none" => HttpBody::None,
            "form" => HttpBody::Form {
                form_type: wire.form_type,
                fields: wire.form_value,
            },
            "file" => HttpBody::File {
                file_type: wire.file_type,
                file: wire.file_value,
            },
            "binary" => HttpBody::Binary {
                mime: wire.binary_type.unwrap_or_default(),
                bytes: wire.binary_value.unwrap_or_default(),
            },
            // "raw", or anything unrecognized, reads as raw text
            _ => HttpBody::Raw {
                raw_type: wire.raw_type,
                value: wire.raw_value,
            },
        }
    }
}

impl From<HttpBody> for WireBody {
    fn from(body: HttpBody) -> Self {
        let data_type = body.data_type().to_string();
        let mut wire = WireBody {
            data_type,
            ..WireBody::default()
        };
        match body {
            HttpBody::None => {}
            HttpBody::Raw { raw_type, value } => {
                wire.raw_type = raw_type;
                wire.raw_value = value;
            }
            HttpBody::Form { form_type, fields } => {
                wire.form_type = form_type;
                wire.form_value = fields;
            }
            HttpBody::File { file_type, file } => {
                wire.file_type = file_type;
                wire.file_value = file;
            }
            HttpBody::Binary { mime, bytes } => {
                wire.binary_type = Some(mime);
                wire.binary_value = Some(bytes);
            }
        }
        wire
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_body_is_raw_json() {
        match HttpBody::default() {
            HttpBody::Raw { raw_type, value } => {
                assert_eq!(raw_type, RawType::Json);
                assert_eq!(value, "{}");
            }
            other => panic!("unexpected default body: {other:?}"),
        }
    }

    #[test]
    fn test_wire_decode_picks_active_variant_only() {
        // Stale raw fields alongside an active form discriminant
        let json = r#"{
            "dataType": "form",
            "rawType": "json",
            "rawValue": "{\"stale\": true}",
            "formType": "urlencoded",
            "formValue": [{"index": 0, "key": "a", "value": "1"}]
        }"#;
        let body: HttpBody = serde_json::from_str(json).unwrap();
        match body {
            HttpBody::Form { form_type, fields } => {
                assert_eq!(form_type, FormType::UrlEncoded);
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].key, "a");
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_wire_accepts_legacy_multipart_spelling() {
        let json = r#"{"dataType": "form", "formType": "data", "formValue": []}"#;
        let body: HttpBody = serde_json::from_str(json).unwrap();
        assert!(matches!(
            body,
            HttpBody::Form { form_type: FormType::Multipart, .. }
        ));
    }

    #[test]
    fn test_wire_round_trip_binary() {
        let body = HttpBody::Binary {
            mime: "application/octet-stream".to_string(),
            bytes: vec![0, 159, 146, 150],
        };
        let json = serde_json::to_string(&body).unwrap();
        let back: HttpBody = serde_json::from_str(&json).unwrap();
        assert_eq!(back, body);
    }

    #[test]
    fn test_missing_body_fields_default_to_raw_json() {
        let body: HttpBody = serde_json::from_str(r#"{"dataType": "raw"}"#).unwrap();
        match body {
            HttpBody::Raw { raw_type, value } => {
                assert_eq!(raw_type, RawType::Json);
                assert_eq!(value, "");
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }
}
