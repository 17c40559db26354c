use crate::{
    BridgeError, JSError,
    core::{JSObjectDataPtr, MutationContext, ObjectKind, Realm, Value, define_property_internal, new_js_object_with_kind, value_to_string},
    raise_internal_error,
};

/// Abrupt completion of a call.
#[derive(Debug)]
pub enum EvalError<'gc> {
    /// Host-level failure; has no representation inside any realm.
    Js(JSError),
    /// A value thrown inside a realm.
    Throw(Value<'gc>),
}

impl<'gc> From<JSError> for EvalError<'gc> {
    fn from(e: JSError) -> Self {
        EvalError::Js(e)
    }
}

impl<'gc> EvalError<'gc> {
    pub fn message(&self) -> String {
        match self {
            EvalError::Js(e) => e.message(),
            EvalError::Throw(v) => value_to_string(v),
        }
    }

    /// The thrown value, if this completion is a realm-level throw.
    pub fn thrown_value(&self) -> Option<&Value<'gc>> {
        match self {
            EvalError::Throw(v) => Some(v),
            EvalError::Js(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorType {
    Error,
    TypeError,
    RangeError,
}

impl ErrorType {
    fn prototype<'gc>(self, realm: Realm<'gc>) -> JSObjectDataPtr<'gc> {
        let intrinsics = realm.intrinsics();
        match self {
            ErrorType::Error => intrinsics.error_prototype,
            ErrorType::TypeError => intrinsics.type_error_prototype,
            ErrorType::RangeError => intrinsics.range_error_prototype,
        }
    }
}

/// Create an error object whose prototype chain belongs to `realm`, so the
/// realm's own `instanceof TypeError` holds for it.
pub fn create_error<'gc>(mc: &MutationContext<'gc>, realm: Realm<'gc>, error_type: ErrorType, message: &str) -> Value<'gc> {
    let error_obj = new_js_object_with_kind(mc, Some(error_type.prototype(realm)), ObjectKind::Error);
    define_property_internal(mc, &error_obj, "message", Value::from(message), true, false);
    Value::Object(error_obj)
}

pub fn throw_realm_error<'gc>(mc: &MutationContext<'gc>, realm: Realm<'gc>, error_type: ErrorType, message: &str) -> EvalError<'gc> {
    EvalError::Throw(create_error(mc, realm, error_type, message))
}

/// True when `value` is an error object created from `realm`'s
/// `%<error_type>.prototype%`.
pub fn is_realm_error<'gc>(value: &Value<'gc>, realm: Realm<'gc>, error_type: ErrorType) -> bool {
    let Value::Object(obj) = value else {
        return false;
    };
    let data = obj.borrow();
    matches!(data.kind(), ObjectKind::Error) && data.prototype.is_some_and(|p| crate::core::Gc::ptr_eq(p, error_type.prototype(realm)))
}

impl BridgeError {
    /// Materialise the failure for code running in `realm`.
    ///
    /// Invariant defects do not become realm values; they abort as host
    /// errors.
    pub fn into_eval_error<'gc>(self, mc: &MutationContext<'gc>, realm: Realm<'gc>) -> EvalError<'gc> {
        match self {
            BridgeError::NotCallable { .. } | BridgeError::BoundaryCallFailed { .. } | BridgeError::RealmResolutionFailed { .. } => {
                throw_realm_error(mc, realm, ErrorType::TypeError, &self.to_string())
            }
            BridgeError::ResourceExhausted { .. } => {
                throw_realm_error(mc, realm, ErrorType::RangeError, "Maximum call stack size exceeded")
            }
            BridgeError::Defect { message } => EvalError::Js(raise_internal_error!(message)),
        }
    }
}
