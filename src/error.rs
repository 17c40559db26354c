#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum JSErrorKind {
    #[error("TypeError: {message}")]
    TypeError { message: String },

    #[error("RangeError: {message}")]
    RangeError { message: String },

    #[error("InternalError: {message}")]
    InternalError { message: String },
}

#[derive(Debug, Clone)]
pub struct JSErrorInner {
    pub kind: JSErrorKind,
    pub file: String,
    pub line: usize,
    pub method: String,
}

/// Host-level error. Never observable as a value inside a realm.
#[derive(thiserror::Error, Debug, Clone)]
#[error("{} at {} {}:{}", .inner.kind, .inner.method, .inner.file, .inner.line)]
pub struct JSError {
    pub inner: Box<JSErrorInner>,
}

impl JSError {
    pub fn new(kind: JSErrorKind, file: &str, line: usize, method: &str) -> Self {
        JSError {
            inner: Box::new(JSErrorInner {
                kind,
                file: file.to_string(),
                line,
                method: method.to_string(),
            }),
        }
    }

    pub fn kind(&self) -> &JSErrorKind {
        &self.inner.kind
    }

    pub fn message(&self) -> String {
        match &self.inner.kind {
            JSErrorKind::TypeError { message } | JSErrorKind::RangeError { message } | JSErrorKind::InternalError { message } => {
                message.clone()
            }
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self.inner.kind, JSErrorKind::InternalError { .. })
    }
}

/// Failure of a realm-boundary operation.
///
/// Deliberately free of the `'gc` lifetime: it cannot hold a value from
/// either side of the boundary, only descriptions.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("{type_name} is not a function")]
    NotCallable { type_name: &'static str },

    #[error("Maximum call stack size exceeded (depth {depth}, limit {limit})")]
    ResourceExhausted { depth: usize, limit: usize },

    #[error("{description}")]
    BoundaryCallFailed { description: String },

    #[error("Cannot resolve function realm: {reason}")]
    RealmResolutionFailed { reason: String },

    #[error("Internal invariant violated: {message}")]
    Defect { message: String },
}

// Builds a JSError stamped with the invocation site. A macro (not a
// function) so that `file!()` and `line!()` expand where it is used.
#[macro_export]
macro_rules! make_js_error {
    ($kind:expr) => {
        $crate::JSError::new($kind, file!(), line!() as usize, $crate::function_name!())
    };
}

#[macro_export]
macro_rules! raise_type_error {
    ($msg:expr) => {
        $crate::make_js_error!($crate::JSErrorKind::TypeError { message: $msg.to_string() })
    };
}

#[macro_export]
macro_rules! raise_range_error {
    ($msg:expr) => {
        $crate::make_js_error!($crate::JSErrorKind::RangeError { message: $msg.to_string() })
    };
}

#[macro_export]
macro_rules! raise_internal_error {
    ($msg:expr) => {
        $crate::make_js_error!($crate::JSErrorKind::InternalError { message: $msg.to_string() })
    };
}

#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        // remove the trailing "::f"
        &name[..name.len() - 3]
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_macros_record_call_site() {
        let err = crate::raise_type_error!("boom");
        assert_eq!(err.kind(), &JSErrorKind::TypeError { message: "boom".to_string() });
        assert!(err.inner.file.ends_with("error.rs"));
        assert!(err.inner.method.ends_with("raise_macros_record_call_site"));
        assert!(!err.is_internal());
        assert!(crate::raise_internal_error!("bad").is_internal());
    }

    #[test]
    fn message_is_the_bare_text() {
        assert_eq!(crate::raise_range_error!("too deep").message(), "too deep");
        let err = crate::raise_internal_error!("corrupt");
        assert_eq!(err.message(), "corrupt");
        assert!(err.to_string().starts_with("InternalError: corrupt at "));
    }

    #[test]
    fn bridge_error_messages() {
        let e = BridgeError::NotCallable { type_name: "object" };
        assert_eq!(e.to_string(), "object is not a function");
        let e = BridgeError::ResourceExhausted { depth: 4, limit: 4 };
        assert!(e.to_string().starts_with("Maximum call stack size exceeded"));
    }
}
