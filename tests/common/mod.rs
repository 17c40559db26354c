#![allow(dead_code)]

use realm_bridge::*;

pub fn number_arg(args: &[Value<'_>], index: usize) -> f64 {
    match args.get(index) {
        Some(Value::Number(n)) => *n,
        _ => f64::NAN,
    }
}

pub fn add<'gc>(
    mc: &MutationContext<'gc>,
    call: &NativeCall<'gc>,
    _this: &Value<'gc>,
    args: &[Value<'gc>],
) -> Result<Value<'gc>, EvalError<'gc>> {
    match (args.first(), args.get(1)) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => Ok(Value::Number(x + y)),
        _ => Err(throw_realm_error(mc, call.realm, ErrorType::TypeError, "add expects two numbers")),
    }
}

pub fn identity<'gc>(
    _mc: &MutationContext<'gc>,
    _call: &NativeCall<'gc>,
    _this: &Value<'gc>,
    args: &[Value<'gc>],
) -> Result<Value<'gc>, EvalError<'gc>> {
    Ok(args.first().cloned().unwrap_or(Value::Undefined))
}

pub fn return_this<'gc>(
    _mc: &MutationContext<'gc>,
    _call: &NativeCall<'gc>,
    this: &Value<'gc>,
    _args: &[Value<'gc>],
) -> Result<Value<'gc>, EvalError<'gc>> {
    Ok(this.clone())
}

/// Returns the function's `data` value.
pub fn return_data<'gc>(
    _mc: &MutationContext<'gc>,
    call: &NativeCall<'gc>,
    _this: &Value<'gc>,
    _args: &[Value<'gc>],
) -> Result<Value<'gc>, EvalError<'gc>> {
    Ok(call.data.clone())
}

/// Throws the function's `data` value.
pub fn throw_data<'gc>(
    _mc: &MutationContext<'gc>,
    call: &NativeCall<'gc>,
    _this: &Value<'gc>,
    _args: &[Value<'gc>],
) -> Result<Value<'gc>, EvalError<'gc>> {
    Err(EvalError::Throw(call.data.clone()))
}

/// Fails with a host-level internal error.
pub fn internal_failure<'gc>(
    _mc: &MutationContext<'gc>,
    _call: &NativeCall<'gc>,
    _this: &Value<'gc>,
    _args: &[Value<'gc>],
) -> Result<Value<'gc>, EvalError<'gc>> {
    Err(EvalError::Js(realm_bridge::raise_internal_error!("engine state corrupted")))
}

/// Records `this`, every argument and the call count on the `data` object.
pub fn record_call<'gc>(
    mc: &MutationContext<'gc>,
    call: &NativeCall<'gc>,
    this: &Value<'gc>,
    args: &[Value<'gc>],
) -> Result<Value<'gc>, EvalError<'gc>> {
    let Value::Object(log) = &call.data else {
        return Err(throw_realm_error(mc, call.realm, ErrorType::TypeError, "record_call needs a log object"));
    };
    let calls = match get_own_property(log, "calls") {
        Some(Value::Number(n)) => n,
        _ => 0.0,
    };
    object_set_key_value(mc, log, "calls", Value::Number(calls + 1.0))?;
    object_set_key_value(mc, log, "this", this.clone())?;
    object_set_key_value(mc, log, "argc", Value::Number(args.len() as f64))?;
    for (i, arg) in args.iter().enumerate() {
        object_set_key_value(mc, log, &format!("arg{i}"), arg.clone())?;
    }
    Ok(Value::Undefined)
}

pub fn recorded_calls(log: &JSObjectDataPtr<'_>) -> f64 {
    match get_own_property(log, "calls") {
        Some(Value::Number(n)) => n,
        _ => 0.0,
    }
}

/// Calls its first argument with the remaining arguments, from its own realm.
pub fn call_first_arg<'gc>(
    mc: &MutationContext<'gc>,
    call: &NativeCall<'gc>,
    _this: &Value<'gc>,
    args: &[Value<'gc>],
) -> Result<Value<'gc>, EvalError<'gc>> {
    let callee = args.first().cloned().unwrap_or(Value::Undefined);
    let rest = args.get(1..).unwrap_or(&[]);
    evaluate_call_dispatch(mc, call.realm, &callee, &Value::Undefined, rest)
}

/// Like `call_first_arg`, but returns whatever the callee threw.
pub fn catch_first_arg<'gc>(
    mc: &MutationContext<'gc>,
    call: &NativeCall<'gc>,
    this: &Value<'gc>,
    args: &[Value<'gc>],
) -> Result<Value<'gc>, EvalError<'gc>> {
    match call_first_arg(mc, call, this, args) {
        Err(EvalError::Throw(thrown)) => Ok(thrown),
        other => other,
    }
}

/// `f => f(f)`: unbounded self-application.
pub fn bounce<'gc>(
    mc: &MutationContext<'gc>,
    call: &NativeCall<'gc>,
    _this: &Value<'gc>,
    args: &[Value<'gc>],
) -> Result<Value<'gc>, EvalError<'gc>> {
    let f = args.first().cloned().unwrap_or(Value::Undefined);
    evaluate_call_dispatch(mc, call.realm, &f, &Value::Undefined, &[f.clone()])
}

/// Calls itself until the engine gives up.
pub fn recurse<'gc>(
    mc: &MutationContext<'gc>,
    call: &NativeCall<'gc>,
    _this: &Value<'gc>,
    _args: &[Value<'gc>],
) -> Result<Value<'gc>, EvalError<'gc>> {
    evaluate_call_dispatch(mc, call.realm, &Value::Object(call.callee), &Value::Undefined, &[])
}

pub fn object_of<'gc>(value: &Value<'gc>) -> JSObjectDataPtr<'gc> {
    match value {
        Value::Object(obj) => *obj,
        other => panic!("expected an object, got {other:?}"),
    }
}

pub fn wrapper_record<'gc>(value: &Value<'gc>) -> Gc<'gc, WrappedFunction<'gc>> {
    as_wrapped_function(&object_of(value)).expect("expected a wrapped function")
}

pub fn same_object<'gc>(a: &Value<'gc>, b: &Value<'gc>) -> bool {
    matches!((a, b), (Value::Object(_), Value::Object(_))) && same_value(a, b)
}
