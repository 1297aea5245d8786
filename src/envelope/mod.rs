pub mod codec;

/// The JSend discriminant. Wire literals are exactly `"success"`, `"fail"`,
/// and `"error"`; nothing else is valid.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
    Error,
}

/// Body of a `success` envelope. `data` is never optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessBody<S> {
    pub data: S,
}

/// Body of a `fail` envelope. `data` is never optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailBody<F> {
    pub data: F,
}

/// Body of an `error` envelope.
///
/// `code` and `data` are independently optional on the wire; absence is
/// modeled as `None`, never as a sentinel value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody<E> {
    pub message: String,
    pub code: Option<serde_json::Number>,
    pub data: Option<E>,
}

/// A JSend response envelope: a closed sum over three unrelated payload
/// types, discriminated by [`Status`].
///
/// Values are immutable once constructed and come from exactly two places:
/// a successful [`codec::EnvelopeCodec::decode`], or application code
/// producing a response via the constructors below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope<S, F, E> {
    Success(SuccessBody<S>),
    Fail(FailBody<F>),
    Error(ErrorBody<E>),
}

impl<S, F, E> Envelope<S, F, E> {
    pub fn success(data: S) -> Self {
        Self::Success(SuccessBody { data })
    }

    pub fn fail(data: F) -> Self {
        Self::Fail(FailBody { data })
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorBody {
            message: message.into(),
            code: None,
            data: None,
        })
    }

    pub fn error_detailed(
        message: impl Into<String>,
        code: Option<serde_json::Number>,
        data: Option<E>,
    ) -> Self {
        Self::Error(ErrorBody {
            message: message.into(),
            code,
            data,
        })
    }

    pub fn status(&self) -> Status {
        match self {
            Self::Success(_) => Status::Success,
            Self::Fail(_) => Status::Fail,
            Self::Error(_) => Status::Error,
        }
    }

    /// Consumes the envelope by dispatching to the one handler whose variant
    /// matches, passing the full variant body.
    ///
    /// The discriminant is inspected exactly once; all three handlers are
    /// required parameters, so omitting one is a compile error rather than a
    /// runtime default branch.
    pub fn fold<R>(
        self,
        on_success: impl FnOnce(SuccessBody<S>) -> R,
        on_fail: impl FnOnce(FailBody<F>) -> R,
        on_error: impl FnOnce(ErrorBody<E>) -> R,
    ) -> R {
        match self {
            Self::Success(body) => on_success(body),
            Self::Fail(body) => on_fail(body),
            Self::Error(body) => on_error(body),
        }
    }
}

/// Binds three handlers once and returns a reusable consuming function.
///
/// Equivalent to calling [`Envelope::fold`] per envelope; useful when the
/// same handler triple is applied at many call sites.
pub fn matcher<S, F, E, R>(
    on_success: impl Fn(SuccessBody<S>) -> R,
    on_fail: impl Fn(FailBody<F>) -> R,
    on_error: impl Fn(ErrorBody<E>) -> R,
) -> impl Fn(Envelope<S, F, E>) -> R {
    move |envelope| envelope.fold(&on_success, &on_fail, &on_error)
}
