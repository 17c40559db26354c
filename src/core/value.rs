use crate::core::{Collect, EvalError, Gc, GcPtr, GcTrace, MutationContext, Realm, new_gc_cell_ptr};
use crate::unicode::{utf8_to_utf16, utf16_to_utf8};
use crate::{JSError, raise_type_error};
use num_bigint::BigInt;
use std::collections::HashSet;

pub type JSObjectDataPtr<'gc> = GcPtr<'gc, JSObjectData<'gc>>;

/// Signature of a host-provided function body.
pub type NativeFnPtr =
    for<'gc> fn(&MutationContext<'gc>, &NativeCall<'gc>, &Value<'gc>, &[Value<'gc>]) -> Result<Value<'gc>, EvalError<'gc>>;

#[derive(Clone, Copy, Collect)]
#[collect(require_static)]
pub struct NativeFn(pub NativeFnPtr);

/// What a native function body sees about its own invocation.
pub struct NativeCall<'gc> {
    pub callee: JSObjectDataPtr<'gc>,
    /// The function's own `[[Realm]]`.
    pub realm: Realm<'gc>,
    pub data: Value<'gc>,
}

#[derive(Collect)]
#[collect(no_drop)]
pub struct NativeFunction<'gc> {
    pub name: String,
    pub length: u32,
    pub func: NativeFn,
    pub realm: Realm<'gc>,
    pub data: Value<'gc>,
}

#[derive(Collect)]
#[collect(no_drop)]
pub struct BoundFunction<'gc> {
    pub target: JSObjectDataPtr<'gc>,
    pub bound_this: Value<'gc>,
    pub bound_args: Vec<Value<'gc>>,
}

#[derive(Clone, Collect)]
#[collect(no_drop)]
pub struct JSProxy<'gc> {
    pub target: Value<'gc>,
    pub revoked: bool,
    /// Fixed at creation: a revoked proxy over a function stays callable.
    pub callable: bool,
}

/// Internal record of a wrapped function exotic object.
///
/// Both fields are written once, by `wrapped_function_create`. `target` is
/// never itself a wrapper.
#[derive(Collect)]
#[collect(no_drop)]
pub struct WrappedFunction<'gc> {
    target: JSObjectDataPtr<'gc>,
    creation_realm: Realm<'gc>,
    serial: u64,
}

impl<'gc> WrappedFunction<'gc> {
    pub(crate) fn new(target: JSObjectDataPtr<'gc>, creation_realm: Realm<'gc>, serial: u64) -> Self {
        WrappedFunction {
            target,
            creation_realm,
            serial,
        }
    }

    pub fn target(&self) -> JSObjectDataPtr<'gc> {
        self.target
    }

    pub fn creation_realm(&self) -> Realm<'gc> {
        self.creation_realm
    }

    /// Agent-wide allocation order of this wrapper.
    pub fn serial(&self) -> u64 {
        self.serial
    }
}

#[derive(Clone, Copy, Collect)]
#[collect(no_drop)]
pub enum ObjectKind<'gc> {
    Ordinary,
    Error,
    Native(Gc<'gc, NativeFunction<'gc>>),
    Bound(Gc<'gc, BoundFunction<'gc>>),
    Wrapped(Gc<'gc, WrappedFunction<'gc>>),
    Proxy(GcPtr<'gc, JSProxy<'gc>>),
}

impl ObjectKind<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Ordinary => "Object",
            ObjectKind::Error => "Error",
            ObjectKind::Native(_) => "NativeFunction",
            ObjectKind::Bound(_) => "BoundFunction",
            ObjectKind::Wrapped(_) => "WrappedFunction",
            ObjectKind::Proxy(_) => "Proxy",
        }
    }
}

pub struct JSObjectData<'gc> {
    pub properties: indexmap::IndexMap<String, Value<'gc>>,
    pub non_enumerable: HashSet<String>,
    pub non_writable: HashSet<String>,
    pub prototype: Option<JSObjectDataPtr<'gc>>,
    kind: ObjectKind<'gc>,
}

unsafe impl<'gc> Collect<'gc> for JSObjectData<'gc> {
    fn trace<T: GcTrace<'gc>>(&self, cc: &mut T) {
        for v in self.properties.values() {
            v.trace(cc);
        }
        if let Some(p) = &self.prototype {
            p.trace(cc);
        }
        self.kind.trace(cc);
    }
}

impl<'gc> JSObjectData<'gc> {
    pub fn new(prototype: Option<JSObjectDataPtr<'gc>>, kind: ObjectKind<'gc>) -> Self {
        JSObjectData {
            properties: indexmap::IndexMap::new(),
            non_enumerable: HashSet::new(),
            non_writable: HashSet::new(),
            prototype,
            kind,
        }
    }

    /// The kind is fixed when the object is allocated.
    pub fn kind(&self) -> &ObjectKind<'gc> {
        &self.kind
    }

    pub fn set_non_enumerable(&mut self, key: &str) {
        self.non_enumerable.insert(key.to_string());
    }

    pub fn set_non_writable(&mut self, key: &str) {
        self.non_writable.insert(key.to_string());
    }

    pub fn is_enumerable(&self, key: &str) -> bool {
        self.properties.contains_key(key) && !self.non_enumerable.contains(key)
    }

    pub fn is_writable(&self, key: &str) -> bool {
        self.properties.contains_key(key) && !self.non_writable.contains(key)
    }
}

pub fn new_js_object_data<'gc>(mc: &MutationContext<'gc>) -> JSObjectDataPtr<'gc> {
    new_gc_cell_ptr(mc, JSObjectData::new(None, ObjectKind::Ordinary))
}

pub fn new_js_object_with_kind<'gc>(
    mc: &MutationContext<'gc>,
    prototype: Option<JSObjectDataPtr<'gc>>,
    kind: ObjectKind<'gc>,
) -> JSObjectDataPtr<'gc> {
    new_gc_cell_ptr(mc, JSObjectData::new(prototype, kind))
}

#[derive(Clone, Debug, Collect)]
#[collect(require_static)]
pub struct SymbolData {
    pub description: Option<String>,
}

pub fn new_symbol<'gc>(mc: &MutationContext<'gc>, description: Option<&str>) -> Value<'gc> {
    Value::Symbol(Gc::new(
        mc,
        SymbolData {
            description: description.map(str::to_string),
        },
    ))
}

#[derive(Clone)]
pub enum Value<'gc> {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    BigInt(BigInt),
    String(Vec<u16>),
    Symbol(Gc<'gc, SymbolData>),
    Object(JSObjectDataPtr<'gc>),
}

unsafe impl<'gc> Collect<'gc> for Value<'gc> {
    fn trace<T: GcTrace<'gc>>(&self, cc: &mut T) {
        match self {
            Value::Object(obj) => obj.trace(cc),
            Value::Symbol(sym) => sym.trace(cc),
            Value::Undefined | Value::Null | Value::Boolean(_) | Value::Number(_) | Value::BigInt(_) | Value::String(_) => {}
        }
    }
}

impl std::fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::BigInt(b) => write!(f, "{b}n"),
            Value::String(s) => write!(f, "{:?}", utf16_to_utf8(s)),
            Value::Symbol(sym) => write!(f, "Symbol({})", sym.description.as_deref().unwrap_or("")),
            Value::Object(obj) => write!(f, "[object {:p}]", Gc::as_ptr(*obj)),
        }
    }
}

impl Value<'_> {
    pub fn is_null_or_undefined(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Object(_))
    }
}

impl From<f64> for Value<'_> {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value<'_> {
    fn from(s: &str) -> Self {
        Value::String(utf8_to_utf16(s))
    }
}

impl From<BigInt> for Value<'_> {
    fn from(b: BigInt) -> Self {
        Value::BigInt(b)
    }
}

/// SameValue: identity for objects and symbols, NaN equals NaN.
pub fn same_value<'gc>(a: &Value<'gc>, b: &Value<'gc>) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => {
            if x.is_nan() && y.is_nan() {
                true
            } else {
                x == y && x.is_sign_negative() == y.is_sign_negative()
            }
        }
        (Value::BigInt(x), Value::BigInt(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => Gc::ptr_eq(*x, *y),
        (Value::Object(x), Value::Object(y)) => Gc::ptr_eq(*x, *y),
        _ => false,
    }
}

/// `typeof`-style name used in diagnostics.
pub fn value_type_name(value: &Value<'_>) -> &'static str {
    match value {
        Value::Undefined => "undefined",
        Value::Null => "null",
        Value::Boolean(_) => "boolean",
        Value::Number(_) => "number",
        Value::BigInt(_) => "bigint",
        Value::String(_) => "string",
        Value::Symbol(_) => "symbol",
        Value::Object(obj) => {
            if is_callable_object(obj) {
                "function"
            } else {
                "object"
            }
        }
    }
}

pub fn value_to_string(value: &Value<'_>) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_nan() {
                "NaN".to_string()
            } else if n.is_infinite() {
                if n.is_sign_positive() { "Infinity" } else { "-Infinity" }.to_string()
            } else {
                n.to_string()
            }
        }
        Value::BigInt(b) => b.to_string(),
        Value::String(s) => utf16_to_utf8(s),
        Value::Symbol(sym) => format!("Symbol({})", sym.description.as_deref().unwrap_or("")),
        Value::Object(obj) => {
            if matches!(obj.borrow().kind(), ObjectKind::Error) {
                let name = object_get_key_value(obj, "name").map(|v| value_to_string(&v)).unwrap_or_default();
                let message = object_get_key_value(obj, "message").map(|v| value_to_string(&v)).unwrap_or_default();
                if message.is_empty() { name } else { format!("{name}: {message}") }
            } else if is_callable_object(obj) {
                let name = get_own_property(obj, "name").map(|v| value_to_string(&v)).unwrap_or_default();
                format!("[Function: {}]", if name.is_empty() { "(anonymous)" } else { name.as_str() })
            } else {
                "[object Object]".to_string()
            }
        }
    }
}

pub fn is_callable_object<'gc>(obj: &JSObjectDataPtr<'gc>) -> bool {
    match obj.borrow().kind() {
        ObjectKind::Native(_) | ObjectKind::Bound(_) | ObjectKind::Wrapped(_) => true,
        ObjectKind::Proxy(proxy) => proxy.borrow().callable,
        ObjectKind::Ordinary | ObjectKind::Error => false,
    }
}

pub fn is_callable<'gc>(value: &Value<'gc>) -> bool {
    match value {
        Value::Object(obj) => is_callable_object(obj),
        _ => false,
    }
}

pub fn as_wrapped_function<'gc>(obj: &JSObjectDataPtr<'gc>) -> Option<Gc<'gc, WrappedFunction<'gc>>> {
    match obj.borrow().kind() {
        ObjectKind::Wrapped(w) => Some(*w),
        _ => None,
    }
}

/// What a value looks like to the realm boundary.
pub enum ValueKind<'gc> {
    Primitive,
    Callable(JSObjectDataPtr<'gc>),
    Wrapper(JSObjectDataPtr<'gc>, Gc<'gc, WrappedFunction<'gc>>),
    OtherObject(JSObjectDataPtr<'gc>),
}

pub fn classify_value<'gc>(value: &Value<'gc>) -> ValueKind<'gc> {
    let obj = match value {
        Value::Undefined | Value::Null | Value::Boolean(_) | Value::Number(_) | Value::BigInt(_) | Value::String(_) | Value::Symbol(_) => {
            return ValueKind::Primitive;
        }
        Value::Object(obj) => *obj,
    };
    if let Some(wrapped) = as_wrapped_function(&obj) {
        ValueKind::Wrapper(obj, wrapped)
    } else if is_callable_object(&obj) {
        ValueKind::Callable(obj)
    } else {
        ValueKind::OtherObject(obj)
    }
}

pub fn get_own_property<'gc>(obj: &JSObjectDataPtr<'gc>, key: &str) -> Option<Value<'gc>> {
    obj.borrow().properties.get(key).cloned()
}

/// Property lookup along the prototype chain.
pub fn object_get_key_value<'gc>(obj: &JSObjectDataPtr<'gc>, key: &str) -> Option<Value<'gc>> {
    let mut current = Some(*obj);
    while let Some(cur) = current {
        let data = cur.borrow();
        if let Some(val) = data.properties.get(key) {
            return Some(val.clone());
        }
        current = data.prototype;
    }
    None
}

pub fn object_set_key_value<'gc>(
    mc: &MutationContext<'gc>,
    obj: &JSObjectDataPtr<'gc>,
    key: &str,
    value: Value<'gc>,
) -> Result<(), JSError> {
    if obj.borrow().non_writable.contains(key) {
        return Err(raise_type_error!(format!("Cannot assign to read only property '{key}'")));
    }
    obj.borrow_mut(mc).properties.insert(key.to_string(), value);
    Ok(())
}

/// Defines (or redefines) an own data property with the given attributes.
pub fn define_property_internal<'gc>(
    mc: &MutationContext<'gc>,
    obj: &JSObjectDataPtr<'gc>,
    key: &str,
    value: Value<'gc>,
    writable: bool,
    enumerable: bool,
) {
    let mut data = obj.borrow_mut(mc);
    data.properties.insert(key.to_string(), value);
    if writable {
        data.non_writable.remove(key);
    } else {
        data.non_writable.insert(key.to_string());
    }
    if enumerable {
        data.non_enumerable.remove(key);
    } else {
        data.non_enumerable.insert(key.to_string());
    }
}
