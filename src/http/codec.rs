use crate::model::body::{FormType, HttpBody, RawType};
use crate::model::definition::ResponseDefinition;
use crate::model::field::{self, KVField};

/// Wire payload produced for an outbound request body. `none`, `file` and
/// `binary` variants produce no payload at all — callers must not fall back
/// to a stale raw string for them.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundBody {
    Raw { raw_type: RawType, value: String },
    Form { form_type: FormType, pairs: Vec<(String, String)> },
}

/// Encode a structured body for sending. Returns `None` when no body should
/// be sent.
pub fn encode_body(body: &HttpBody) -> Option<OutboundBody> {
    match body {
        HttpBody::Raw { raw_type, value } => Some(OutboundBody::Raw {
            raw_type: *raw_type,
            value: value.clone(),
        }),
        HttpBody::Form { form_type, fields } => Some(OutboundBody::Form {
            form_type: *form_type,
            pairs: field::flatten(fields),
        }),
        HttpBody::None | HttpBody::File { .. } | HttpBody::Binary { .. } => None,
    }
}

/// Content-Type probes, in fixed order. The first substring match decides
/// the raw type, so `text/html` reads as text, not html.
const RAW_PROBES: [(&str, RawType); 4] = [
    ("text", RawType::Text),
    ("xml", RawType::Xml),
    ("json", RawType::Json),
    ("html", RawType::Html),
];

/// Decode an inbound raw response into a response artifact.
///
/// Headers flatten into rows indexed by iteration position. The Content-Type
/// header (case-insensitive) is probed for a known raw type; a miss
/// classifies the payload as binary with the bytes kept untouched.
pub fn decode_response(
    status: u16,
    status_text: &str,
    headers: &[(String, String)],
    bytes: &[u8],
) -> ResponseDefinition {
    let header_fields: Vec<KVField> = headers
        .iter()
        .enumerate()
        .map(|(idx, (key, value))| KVField::new(idx as u32, key, value))
        .collect();

    let content_type = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-type"))
        .map(|(_, value)| value.as_str())
        .unwrap_or("");

    let sniffed = RAW_PROBES
        .iter()
        .find(|(probe, _)| content_type.contains(probe))
        .map(|(_, raw_type)| *raw_type);

    let body = match sniffed {
        Some(raw_type) => HttpBody::Raw {
            raw_type,
            value: String::from_utf8_lossy(bytes).into_owned(),
        },
        None => HttpBody::Binary {
            mime: content_type.to_string(),
            bytes: bytes.to_vec(),
        },
    };

    ResponseDefinition::new(status, status_text, header_fields, body)
}
