use crate::core::{
    Agent, Collect, Gc, JSObjectDataPtr, MutationContext, ObjectKind, Value, define_property_internal, new_js_object_data,
    new_js_object_with_kind,
};

/// Per-realm intrinsic objects.
#[derive(Collect)]
#[collect(no_drop)]
pub struct Intrinsics<'gc> {
    pub object_prototype: JSObjectDataPtr<'gc>,
    pub function_prototype: JSObjectDataPtr<'gc>,
    pub error_prototype: JSObjectDataPtr<'gc>,
    pub type_error_prototype: JSObjectDataPtr<'gc>,
    pub range_error_prototype: JSObjectDataPtr<'gc>,
}

#[derive(Collect)]
#[collect(no_drop)]
pub struct RealmData<'gc> {
    id: u32,
    name: String,
    agent: Agent<'gc>,
    global: JSObjectDataPtr<'gc>,
    intrinsics: Intrinsics<'gc>,
}

/// Opaque realm handle. Two handles denote the same realm iff they point to
/// the same allocation.
pub type Realm<'gc> = Gc<'gc, RealmData<'gc>>;

impl<'gc> RealmData<'gc> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn agent(&self) -> Agent<'gc> {
        self.agent
    }

    pub fn global(&self) -> JSObjectDataPtr<'gc> {
        self.global
    }

    pub fn intrinsics(&self) -> &Intrinsics<'gc> {
        &self.intrinsics
    }
}

impl std::fmt::Debug for RealmData<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Realm#{}({})", self.id, self.name)
    }
}

pub fn same_realm<'gc>(a: Realm<'gc>, b: Realm<'gc>) -> bool {
    Gc::ptr_eq(a, b)
}

fn new_error_prototype<'gc>(mc: &MutationContext<'gc>, parent: JSObjectDataPtr<'gc>, name: &str) -> JSObjectDataPtr<'gc> {
    let proto = new_js_object_with_kind(mc, Some(parent), ObjectKind::Ordinary);
    define_property_internal(mc, &proto, "name", Value::from(name), true, false);
    define_property_internal(mc, &proto, "message", Value::from(""), true, false);
    proto
}

/// Builds a fresh realm with its own intrinsics and global object.
pub fn create_realm<'gc>(mc: &MutationContext<'gc>, agent: Agent<'gc>, name: &str) -> Realm<'gc> {
    let object_prototype = new_js_object_data(mc);
    let function_prototype = new_js_object_with_kind(mc, Some(object_prototype), ObjectKind::Ordinary);
    let error_prototype = new_error_prototype(mc, object_prototype, "Error");
    let type_error_prototype = new_error_prototype(mc, error_prototype, "TypeError");
    let range_error_prototype = new_error_prototype(mc, error_prototype, "RangeError");

    let global = new_js_object_with_kind(mc, Some(object_prototype), ObjectKind::Ordinary);
    define_property_internal(mc, &global, "globalThis", Value::Object(global), true, false);

    let realm = Gc::new(
        mc,
        RealmData {
            id: agent.next_realm_id(),
            name: name.to_string(),
            agent,
            global,
            intrinsics: Intrinsics {
                object_prototype,
                function_prototype,
                error_prototype,
                type_error_prototype,
                range_error_prototype,
            },
        },
    );
    log::debug!("created {:?}", *realm);
    realm
}
