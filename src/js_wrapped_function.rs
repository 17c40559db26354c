use crate::BridgeError;
use crate::core::{
    EvalError, Gc, JSObjectDataPtr, MetadataPolicy, MutationContext, ObjectKind, Realm, StackOverflow, Value, ValueKind, WrappedFunction,
    as_wrapped_function, classify_value, define_property_internal, enter_call_frame, is_callable_object, new_js_object_with_kind,
    value_type_name,
};
use crate::js_function::{evaluate_call_dispatch, function_name_and_length, get_function_realm};

const WRAPPED_CALL_THREW: &str = "WrappedFunction call threw an exception";

// ---------------------------------------------------------------------------
//  GetWrappedValue(targetRealm, value)
// ---------------------------------------------------------------------------

/// Make `value` observable from `target_realm`.
///
/// Primitives pass through untouched. Callables (wrappers included) come back
/// as a fresh wrapper created in `target_realm`. Any other object is
/// rejected.
pub fn get_wrapped_value<'gc>(mc: &MutationContext<'gc>, value: &Value<'gc>, target_realm: Realm<'gc>) -> Result<Value<'gc>, BridgeError> {
    match classify_value(value) {
        ValueKind::Primitive => Ok(value.clone()),
        ValueKind::Callable(callable) | ValueKind::Wrapper(callable, _) => {
            Ok(Value::Object(wrapped_function_create(mc, &callable, target_realm)))
        }
        ValueKind::OtherObject(_) => {
            log::trace!("get_wrapped_value: rejecting non-callable object for {:?}", *target_realm);
            Err(BridgeError::NotCallable {
                type_name: value_type_name(value),
            })
        }
    }
}

// ---------------------------------------------------------------------------
//  WrappedFunctionCreate(creationRealm, callable)
// ---------------------------------------------------------------------------

/// Allocate one wrapper over `callable`. A wrapper argument is unwrapped
/// first, so no wrapper ever targets another wrapper.
pub(crate) fn wrapped_function_create<'gc>(
    mc: &MutationContext<'gc>,
    callable: &JSObjectDataPtr<'gc>,
    creation_realm: Realm<'gc>,
) -> JSObjectDataPtr<'gc> {
    debug_assert!(is_callable_object(callable));

    // Intermediate wrappers are not observable from any realm.
    let target = match as_wrapped_function(callable) {
        Some(inner) => inner.target(),
        None => *callable,
    };
    debug_assert!(as_wrapped_function(&target).is_none());

    let agent = creation_realm.agent();
    let record = Gc::new(mc, WrappedFunction::new(target, creation_realm, agent.next_wrapper_serial()));
    let wrapped = new_js_object_with_kind(
        mc,
        Some(creation_realm.intrinsics().function_prototype),
        ObjectKind::Wrapped(record),
    );

    if agent.options().metadata_policy == MetadataPolicy::CopyNameAndLength {
        copy_name_and_length(mc, &wrapped, &target);
    }

    log::trace!("wrapped function #{} created in {:?}", record.serial(), *creation_realm);
    wrapped
}

/// CopyNameAndLength(wrapped, target). Reads own properties only, so it
/// cannot fail.
fn copy_name_and_length<'gc>(mc: &MutationContext<'gc>, wrapped: &JSObjectDataPtr<'gc>, target: &JSObjectDataPtr<'gc>) {
    let (name, length) = function_name_and_length(target);
    define_property_internal(mc, wrapped, "length", Value::Number(length), false, false);
    define_property_internal(mc, wrapped, "name", Value::from(name.as_str()), false, false);
}

// ---------------------------------------------------------------------------
//  WrappedFunction [[Call]](thisArgument, argumentsList)
// ---------------------------------------------------------------------------

/// Call a wrapper from code running in `caller_realm`.
///
/// The receiver and arguments are bridged into the target's realm, the
/// result into `caller_realm`. Anything the target throws is replaced by
/// `BoundaryCallFailed`.
pub fn call_wrapped_function<'gc>(
    mc: &MutationContext<'gc>,
    wrapped_obj: &JSObjectDataPtr<'gc>,
    this_arg: &Value<'gc>,
    args: &[Value<'gc>],
    caller_realm: Realm<'gc>,
) -> Result<Value<'gc>, BridgeError> {
    let _frame = enter_call_frame(caller_realm.agent())
        .map_err(|StackOverflow { depth, limit }| BridgeError::ResourceExhausted { depth, limit })?;

    let Some(record) = as_wrapped_function(wrapped_obj) else {
        return Err(defect(format!("{} is not a wrapped function", wrapped_obj.borrow().kind().name())));
    };
    let target = record.target();
    if !is_callable_object(&target) {
        return Err(defect(format!("wrapped function #{} has a non-callable target", record.serial())));
    }

    let target_realm = get_function_realm(&target)?;
    log::trace!(
        "call_wrapped_function #{}: {:?} -> {:?}, {} args",
        record.serial(),
        *caller_realm,
        *target_realm,
        args.len()
    );

    let wrapped_this = get_wrapped_value(mc, this_arg, target_realm)?;
    let wrapped_args = args
        .iter()
        .map(|arg| get_wrapped_value(mc, arg, target_realm))
        .collect::<Result<Vec<_>, _>>()?;

    match evaluate_call_dispatch(mc, target_realm, &Value::Object(target), &wrapped_this, &wrapped_args) {
        Ok(result) => get_wrapped_value(mc, &result, caller_realm),
        Err(EvalError::Js(err)) if err.is_internal() => Err(defect(err.message())),
        Err(err) => {
            // Host-side diagnostics only; the thrown value stays behind.
            log::debug!("wrapped function #{} threw in {:?}: {}", record.serial(), *target_realm, err.message());
            Err(BridgeError::BoundaryCallFailed {
                description: WRAPPED_CALL_THREW.to_string(),
            })
        }
    }
}

fn defect(message: String) -> BridgeError {
    log::error!("realm boundary invariant violated: {message}");
    BridgeError::Defect { message }
}
