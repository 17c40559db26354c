use crate::core::{
    ErrorType, EvalError, MutationContext, Realm, Value, create_realm, get_own_property, object_set_key_value, throw_realm_error,
};
use crate::js_wrapped_function::get_wrapped_value;

/// A child realm paired with the realm that created it.
///
/// Values leave the child only through `import_value`, which applies the
/// same bridging rules as wrapped-function calls.
#[derive(Clone, Copy)]
pub struct ShadowRealm<'gc> {
    caller_realm: Realm<'gc>,
    realm: Realm<'gc>,
}

impl<'gc> ShadowRealm<'gc> {
    pub fn new(mc: &MutationContext<'gc>, caller_realm: Realm<'gc>, name: &str) -> Self {
        let realm = create_realm(mc, caller_realm.agent(), name);
        log::debug!("ShadowRealm {:?} created by {:?}", *realm, *caller_realm);
        ShadowRealm { caller_realm, realm }
    }

    /// The isolated realm.
    pub fn realm(&self) -> Realm<'gc> {
        self.realm
    }

    pub fn caller_realm(&self) -> Realm<'gc> {
        self.caller_realm
    }

    /// Publish a binding on the shadow realm's global object. `value` must
    /// already belong to the shadow realm.
    pub fn export_value(&self, mc: &MutationContext<'gc>, export_name: &str, value: Value<'gc>) -> Result<(), EvalError<'gc>> {
        object_set_key_value(mc, &self.realm.global(), export_name, value)?;
        Ok(())
    }

    /// ShadowRealm.prototype.importValue without the module loader: look the
    /// export up on the shadow realm's global and bridge it into the caller
    /// realm. Failures are TypeErrors of the caller realm.
    pub fn import_value(&self, mc: &MutationContext<'gc>, export_name: &str) -> Result<Value<'gc>, EvalError<'gc>> {
        let Some(export_val) = get_own_property(&self.realm.global(), export_name) else {
            return Err(throw_realm_error(
                mc,
                self.caller_realm,
                ErrorType::TypeError,
                &format!("importValue: export '{export_name}' not found"),
            ));
        };
        get_wrapped_value(mc, &export_val, self.caller_realm).map_err(|e| e.into_eval_error(mc, self.caller_realm))
    }
}
