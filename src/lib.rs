pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod js_function;
pub(crate) mod js_proxy;
pub(crate) mod js_shadow_realm;
pub(crate) mod js_wrapped_function;
pub(crate) mod unicode;

pub use core::{
    Agent, AgentData, ErrorType, EvalError, Gc, GcCell, GcPtr, HostOptions, Intrinsics, JSObjectData, JSObjectDataPtr, JSProxy, JsArena,
    JsRoot, MetadataPolicy, MutationContext, NativeCall, NativeFnPtr, ObjectKind, Realm, RealmData, SymbolData, Value, ValueKind,
    WrappedFunction, as_wrapped_function, classify_value, create_error, create_realm, define_property_internal, get_own_property,
    is_callable, is_callable_object, is_realm_error, new_arena, new_js_object_data, new_symbol, object_get_key_value, object_set_key_value,
    same_realm, same_value, throw_realm_error, value_to_string, value_type_name,
};
pub use error::{BridgeError, JSError, JSErrorKind};
pub use js_function::{bind_function, evaluate_call_dispatch, get_function_realm, new_native_function, new_native_function_with_data};
pub use js_proxy::{new_function_proxy, revoke_proxy};
pub use js_shadow_realm::ShadowRealm;
pub use js_wrapped_function::{call_wrapped_function, get_wrapped_value};
pub use unicode::{utf8_to_utf16, utf16_to_utf8};
