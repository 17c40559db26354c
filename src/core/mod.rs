pub use gc_arena::Mutation as MutationContext;
pub use gc_arena::collect::Trace as GcTrace;
pub use gc_arena::lock::RefLock as GcCell;
pub use gc_arena::{Collect, Gc};
pub type GcPtr<'gc, T> = Gc<'gc, GcCell<T>>;

#[inline]
pub fn new_gc_cell_ptr<'gc, T: 'gc + Collect<'gc>>(mc: &MutationContext<'gc>, value: T) -> GcPtr<'gc, T> {
    Gc::new(mc, GcCell::new(value))
}

mod agent;
pub use agent::*;

mod realm;
pub use realm::*;

mod value;
pub use value::*;

pub mod js_error;
pub use js_error::*;

#[derive(Collect)]
#[collect(no_drop)]
pub struct JsRoot<'gc> {
    pub agent: Agent<'gc>,
    pub realms: Vec<Realm<'gc>>,
}

impl<'gc> JsRoot<'gc> {
    /// Create a realm and keep it rooted for the arena's lifetime.
    pub fn create_realm(&mut self, mc: &MutationContext<'gc>, name: &str) -> Realm<'gc> {
        let realm = create_realm(mc, self.agent, name);
        self.realms.push(realm);
        realm
    }

    pub fn realm_by_name(&self, name: &str) -> Option<Realm<'gc>> {
        self.realms.iter().copied().find(|r| r.name() == name)
    }
}

pub type JsArena = gc_arena::Arena<gc_arena::Rootable!['gc => JsRoot<'gc>]>;

pub fn new_arena(options: HostOptions) -> JsArena {
    JsArena::new(|mc| JsRoot {
        agent: new_agent(mc, options),
        realms: Vec::new(),
    })
}
