use crate::envelope::{Envelope, ErrorBody, FailBody, Status, SuccessBody};
use crate::error::{DecodeError, Error, JsonKind, Violation};
use crate::schema::{PayloadSchema, field_path};

const ROOT: &str = "$";
const ALL_STATUSES: &str = r#""success", "fail", or "error""#;
const SUCCESS_ONLY: &str = r#""success""#;

fn require_object(
    input: &serde_json::Value,
) -> Result<&serde_json::Map<String, serde_json::Value>, DecodeError> {
    input.as_object().ok_or_else(|| {
        DecodeError::single(Violation::WrongType {
            path: ROOT.to_string(),
            expected: "a JSON object",
            found: JsonKind::of(input),
        })
    })
}

fn status_literal(obj: &serde_json::Map<String, serde_json::Value>) -> Result<&str, DecodeError> {
    let value = obj.get("status").ok_or_else(|| {
        DecodeError::single(Violation::MissingField {
            path: ROOT.to_string(),
            field: "status",
        })
    })?;
    value.as_str().ok_or_else(|| {
        DecodeError::single(Violation::WrongType {
            path: field_path(ROOT, "status"),
            expected: "a string",
            found: JsonKind::of(value),
        })
    })
}

fn decode_data<P: PayloadSchema>(
    obj: &serde_json::Map<String, serde_json::Value>,
    schema: &P,
) -> Result<P::Value, DecodeError> {
    let value = obj.get("data").ok_or_else(|| {
        DecodeError::single(Violation::MissingField {
            path: ROOT.to_string(),
            field: "data",
        })
    })?;
    schema
        .decode(value, &field_path(ROOT, "data"))
        .map_err(DecodeError::new)
}

/// Codec for the full three-variant envelope, composed from three
/// independent payload schemas.
///
/// Stateless and immutable once built; a single codec can decode and encode
/// any number of envelopes from any number of call sites.
#[derive(Debug, Clone)]
pub struct EnvelopeCodec<PS, PF, PE> {
    success: PS,
    fail: PF,
    error: PE,
}

impl<PS, PF, PE> EnvelopeCodec<PS, PF, PE>
where
    PS: PayloadSchema,
    PF: PayloadSchema,
    PE: PayloadSchema,
{
    pub fn new(success: PS, fail: PF, error: PE) -> Self {
        Self {
            success,
            fail,
            error,
        }
    }

    /// Validates untrusted input into a typed envelope.
    ///
    /// The input must be a JSON object whose `status` is one of the three
    /// literals; the remaining checks follow the variant that `status`
    /// selects. Fields the selected variant does not define are ignored.
    /// Failures carry every relevant path-qualified mismatch.
    pub fn decode(
        &self,
        input: &serde_json::Value,
    ) -> Result<Envelope<PS::Value, PF::Value, PE::Value>, DecodeError> {
        let result = self.decode_inner(input);
        if let Err(err) = &result {
            tracing::debug!(%err, "envelope decode rejected");
        }
        result
    }

    fn decode_inner(
        &self,
        input: &serde_json::Value,
    ) -> Result<Envelope<PS::Value, PF::Value, PE::Value>, DecodeError> {
        let obj = require_object(input)?;
        let literal = status_literal(obj)?;
        let status = literal.parse::<Status>().map_err(|_| {
            DecodeError::single(Violation::UnknownStatus {
                path: field_path(ROOT, "status"),
                expected: ALL_STATUSES,
                found: literal.to_string(),
            })
        })?;

        // The discriminant is exact, so at most one variant can match; no
        // backtracking across branches is ever needed.
        match status {
            Status::Success => {
                decode_data(obj, &self.success).map(|data| Envelope::Success(SuccessBody { data }))
            }
            Status::Fail => {
                decode_data(obj, &self.fail).map(|data| Envelope::Fail(FailBody { data }))
            }
            Status::Error => self.decode_error_body(obj).map(Envelope::Error),
        }
    }

    fn decode_error_body(
        &self,
        obj: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<ErrorBody<PE::Value>, DecodeError> {
        let mut violations = Vec::new();

        let message = match obj.get("message") {
            None => {
                violations.push(Violation::MissingField {
                    path: ROOT.to_string(),
                    field: "message",
                });
                None
            }
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => {
                violations.push(Violation::WrongType {
                    path: field_path(ROOT, "message"),
                    expected: "a string",
                    found: JsonKind::of(other),
                });
                None
            }
        };

        // `code` and `data` are independently optional. An explicit `null`
        // is a present value with the wrong type, not absence.
        let code = match obj.get("code") {
            None => None,
            Some(serde_json::Value::Number(n)) => Some(n.clone()),
            Some(other) => {
                violations.push(Violation::WrongType {
                    path: field_path(ROOT, "code"),
                    expected: "a number",
                    found: JsonKind::of(other),
                });
                None
            }
        };

        let data = match obj.get("data") {
            None => None,
            Some(value) => match self.error.decode(value, &field_path(ROOT, "data")) {
                Ok(decoded) => Some(decoded),
                Err(mut found) => {
                    violations.append(&mut found);
                    None
                }
            },
        };

        match (violations.is_empty(), message) {
            (true, Some(message)) => Ok(ErrorBody {
                message,
                code,
                data,
            }),
            _ => Err(DecodeError::new(violations)),
        }
    }

    /// Reproduces the minimal wire object for a well-typed envelope.
    ///
    /// Total: only the fields the variant defines are emitted, and absent
    /// `code`/`data` produce no key at all.
    pub fn encode(
        &self,
        envelope: &Envelope<PS::Value, PF::Value, PE::Value>,
    ) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        obj.insert(
            "status".to_string(),
            serde_json::Value::String(envelope.status().to_string()),
        );
        match envelope {
            Envelope::Success(body) => {
                obj.insert("data".to_string(), self.success.encode(&body.data));
            }
            Envelope::Fail(body) => {
                obj.insert("data".to_string(), self.fail.encode(&body.data));
            }
            Envelope::Error(body) => {
                obj.insert(
                    "message".to_string(),
                    serde_json::Value::String(body.message.clone()),
                );
                if let Some(code) = &body.code {
                    obj.insert("code".to_string(), serde_json::Value::Number(code.clone()));
                }
                if let Some(data) = &body.data {
                    obj.insert("data".to_string(), self.error.encode(data));
                }
            }
        }
        serde_json::Value::Object(obj)
    }

    /// Type-guard form of [`decode`](Self::decode).
    pub fn is(&self, input: &serde_json::Value) -> bool {
        self.decode_inner(input).is_ok()
    }

    /// Parses JSON text and decodes it in one step. Syntax errors surface as
    /// [`Error::Json`], structural failures as [`Error::Decode`].
    pub fn decode_str(
        &self,
        text: &str,
    ) -> Result<Envelope<PS::Value, PF::Value, PE::Value>, Error> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Ok(self.decode(&value)?)
    }
}

/// Success-only convenience codec.
///
/// For APIs that guarantee they never emit `fail` or `error`: any `status`
/// other than `"success"` is rejected outright.
#[derive(Debug, Clone)]
pub struct SuccessCodec<P> {
    payload: P,
}

impl<P: PayloadSchema> SuccessCodec<P> {
    pub fn new(payload: P) -> Self {
        Self { payload }
    }

    pub fn decode(&self, input: &serde_json::Value) -> Result<SuccessBody<P::Value>, DecodeError> {
        let result = self.decode_inner(input);
        if let Err(err) = &result {
            tracing::debug!(%err, "success envelope decode rejected");
        }
        result
    }

    fn decode_inner(
        &self,
        input: &serde_json::Value,
    ) -> Result<SuccessBody<P::Value>, DecodeError> {
        let obj = require_object(input)?;
        let literal = status_literal(obj)?;
        if literal != Status::Success.as_ref() {
            return Err(DecodeError::single(Violation::UnknownStatus {
                path: field_path(ROOT, "status"),
                expected: SUCCESS_ONLY,
                found: literal.to_string(),
            }));
        }
        decode_data(obj, &self.payload).map(|data| SuccessBody { data })
    }

    pub fn encode(&self, body: &SuccessBody<P::Value>) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        obj.insert(
            "status".to_string(),
            serde_json::Value::String(Status::Success.to_string()),
        );
        obj.insert("data".to_string(), self.payload.encode(&body.data));
        serde_json::Value::Object(obj)
    }

    pub fn is(&self, input: &serde_json::Value) -> bool {
        self.decode_inner(input).is_ok()
    }

    pub fn decode_str(&self, text: &str) -> Result<SuccessBody<P::Value>, Error> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Ok(self.decode(&value)?)
    }
}
