use crate::BridgeError;
use crate::core::{
    BoundFunction, ErrorType, EvalError, Gc, JSObjectDataPtr, MutationContext, NativeCall, NativeFn, NativeFnPtr, NativeFunction,
    ObjectKind, Realm, Value, define_property_internal, enter_call_frame, is_callable_object, new_js_object_with_kind, throw_realm_error,
    value_type_name,
};
use crate::js_proxy::{get_own_property_through_proxy, proxy_target};
use crate::js_wrapped_function::call_wrapped_function;
use crate::unicode::utf16_to_utf8;

pub fn new_native_function<'gc>(mc: &MutationContext<'gc>, realm: Realm<'gc>, name: &str, length: u32, func: NativeFnPtr) -> Value<'gc> {
    new_native_function_with_data(mc, realm, name, length, func, Value::Undefined)
}

/// Native function carrying an extra `data` value, handed back to the body
/// on every call through `NativeCall::data`.
pub fn new_native_function_with_data<'gc>(
    mc: &MutationContext<'gc>,
    realm: Realm<'gc>,
    name: &str,
    length: u32,
    func: NativeFnPtr,
    data: Value<'gc>,
) -> Value<'gc> {
    let native = Gc::new(
        mc,
        NativeFunction {
            name: name.to_string(),
            length,
            func: NativeFn(func),
            realm,
            data,
        },
    );
    let func_obj = new_js_object_with_kind(mc, Some(realm.intrinsics().function_prototype), ObjectKind::Native(native));
    define_property_internal(mc, &func_obj, "length", Value::Number(length as f64), false, false);
    define_property_internal(mc, &func_obj, "name", Value::from(name), false, false);
    Value::Object(func_obj)
}

/// ToIntegerOrInfinity applied to a `length` value, floored at +0.
fn clamp_function_length(value: Option<Value<'_>>) -> f64 {
    match value {
        Some(Value::Number(n)) => {
            let t = n.trunc();
            // NaN, -0 and negatives all land on +0.
            if t > 0.0 { t } else { 0.0 }
        }
        _ => 0.0,
    }
}

/// `name` and `length` as observed on a function object's own properties.
/// Non-string names read as `""`; non-numeric lengths read as 0.
pub(crate) fn function_name_and_length<'gc>(func_obj: &JSObjectDataPtr<'gc>) -> (String, f64) {
    let name = match get_own_property_through_proxy(func_obj, "name") {
        Some(Value::String(s)) => utf16_to_utf8(&s),
        _ => String::new(),
    };
    let length = clamp_function_length(get_own_property_through_proxy(func_obj, "length"));
    (name, length)
}

/// Function.prototype.bind equivalent.
pub fn bind_function<'gc>(
    mc: &MutationContext<'gc>,
    realm: Realm<'gc>,
    target: &Value<'gc>,
    bound_this: Value<'gc>,
    bound_args: Vec<Value<'gc>>,
) -> Result<Value<'gc>, EvalError<'gc>> {
    let target_obj = match target {
        Value::Object(obj) if is_callable_object(obj) => *obj,
        _ => return Err(throw_realm_error(mc, realm, ErrorType::TypeError, "Bind must be called on a function")),
    };

    let (target_name, target_len) = function_name_and_length(&target_obj);
    let bound_len = if target_len.is_infinite() {
        f64::INFINITY
    } else {
        (target_len - bound_args.len() as f64).max(0.0)
    };

    let prototype = target_obj.borrow().prototype;
    let bound = Gc::new(
        mc,
        BoundFunction {
            target: target_obj,
            bound_this,
            bound_args,
        },
    );
    let func_obj = new_js_object_with_kind(mc, prototype, ObjectKind::Bound(bound));
    define_property_internal(mc, &func_obj, "length", Value::Number(bound_len), false, false);
    define_property_internal(mc, &func_obj, "name", Value::from(format!("bound {target_name}").as_str()), false, false);
    Ok(Value::Object(func_obj))
}

/// GetFunctionRealm: the realm a callable runs in.
pub fn get_function_realm<'gc>(func_obj: &JSObjectDataPtr<'gc>) -> Result<Realm<'gc>, BridgeError> {
    let kind = *func_obj.borrow().kind();
    match kind {
        ObjectKind::Wrapped(wrapped) => Ok(wrapped.creation_realm()),
        ObjectKind::Native(native) => Ok(native.realm),
        ObjectKind::Bound(bound) => get_function_realm(&bound.target),
        ObjectKind::Proxy(proxy) => match proxy_target(&proxy.borrow()) {
            Some(target) => get_function_realm(&target),
            None => Err(BridgeError::RealmResolutionFailed {
                reason: "proxy has been revoked".to_string(),
            }),
        },
        ObjectKind::Ordinary | ObjectKind::Error => Err(BridgeError::Defect {
            message: format!("{} has no function realm", kind.name()),
        }),
    }
}

/// Call `callee` on behalf of code running in `caller_realm`. Errors raised
/// here are objects of `caller_realm`.
pub fn evaluate_call_dispatch<'gc>(
    mc: &MutationContext<'gc>,
    caller_realm: Realm<'gc>,
    callee: &Value<'gc>,
    this_arg: &Value<'gc>,
    args: &[Value<'gc>],
) -> Result<Value<'gc>, EvalError<'gc>> {
    let func_obj = match callee {
        Value::Object(obj) if is_callable_object(obj) => *obj,
        other => {
            return Err(throw_realm_error(
                mc,
                caller_realm,
                ErrorType::TypeError,
                &format!("{} is not a function", value_type_name(other)),
            ));
        }
    };

    let kind = *func_obj.borrow().kind();

    // Wrapper invocation does its own stack accounting.
    if let ObjectKind::Wrapped(_) = kind {
        return call_wrapped_function(mc, &func_obj, this_arg, args, caller_realm).map_err(|e| e.into_eval_error(mc, caller_realm));
    }

    let _frame = enter_call_frame(caller_realm.agent())
        .map_err(|_| throw_realm_error(mc, caller_realm, ErrorType::RangeError, "Maximum call stack size exceeded"))?;

    match kind {
        ObjectKind::Native(native) => {
            let call = NativeCall {
                callee: func_obj,
                realm: native.realm,
                data: native.data.clone(),
            };
            log::trace!("native call: {} in {:?}", native.name, *native.realm);
            (native.func.0)(mc, &call, this_arg, args)
        }
        ObjectKind::Bound(bound) => {
            let mut full_args = bound.bound_args.clone();
            full_args.extend_from_slice(args);
            evaluate_call_dispatch(mc, caller_realm, &Value::Object(bound.target), &bound.bound_this, &full_args)
        }
        ObjectKind::Proxy(proxy) => {
            let target = proxy_target(&proxy.borrow());
            match target {
                Some(target) => evaluate_call_dispatch(mc, caller_realm, &Value::Object(target), this_arg, args),
                None => Err(throw_realm_error(
                    mc,
                    caller_realm,
                    ErrorType::TypeError,
                    "Cannot perform 'apply' on a proxy that has been revoked",
                )),
            }
        }
        ObjectKind::Wrapped(_) | ObjectKind::Ordinary | ObjectKind::Error => Err(EvalError::Js(crate::raise_internal_error!(format!(
            "{} reached native dispatch",
            kind.name()
        )))),
    }
}
