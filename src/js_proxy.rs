use crate::core::{
    ErrorType, EvalError, JSObjectDataPtr, JSProxy, MutationContext, ObjectKind, Realm, Value, get_own_property, is_callable,
    new_gc_cell_ptr, new_js_object_with_kind, throw_realm_error,
};

/// Create a revocable proxy that forwards calls and property reads to
/// `target`.
pub fn new_function_proxy<'gc>(mc: &MutationContext<'gc>, realm: Realm<'gc>, target: &Value<'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let Value::Object(target_obj) = target else {
        return Err(throw_realm_error(
            mc,
            realm,
            ErrorType::TypeError,
            "Cannot create proxy with a non-object as target",
        ));
    };
    let proxy = new_gc_cell_ptr(
        mc,
        JSProxy {
            target: target.clone(),
            revoked: false,
            callable: is_callable(target),
        },
    );
    let prototype = target_obj.borrow().prototype;
    Ok(Value::Object(new_js_object_with_kind(mc, prototype, ObjectKind::Proxy(proxy))))
}

/// Revoke a proxy. Returns false when `value` is not a live proxy.
pub fn revoke_proxy<'gc>(mc: &MutationContext<'gc>, value: &Value<'gc>) -> bool {
    let Value::Object(obj) = value else {
        return false;
    };
    let ObjectKind::Proxy(proxy) = *obj.borrow().kind() else {
        return false;
    };
    if proxy.borrow().revoked {
        return false;
    }
    let mut data = proxy.borrow_mut(mc);
    data.revoked = true;
    data.target = Value::Null;
    log::trace!("proxy revoked");
    true
}

/// The proxy target, or `None` once revoked.
pub(crate) fn proxy_target<'gc>(proxy: &JSProxy<'gc>) -> Option<JSObjectDataPtr<'gc>> {
    match (&proxy.target, proxy.revoked) {
        (Value::Object(obj), false) => Some(*obj),
        _ => None,
    }
}

/// Own property read that follows live proxies to their target. A revoked
/// proxy has no readable properties.
pub(crate) fn get_own_property_through_proxy<'gc>(obj: &JSObjectDataPtr<'gc>, key: &str) -> Option<Value<'gc>> {
    let kind = *obj.borrow().kind();
    match kind {
        ObjectKind::Proxy(proxy) => {
            let target = proxy_target(&proxy.borrow())?;
            get_own_property_through_proxy(&target, key)
        }
        _ => get_own_property(obj, key),
    }
}
