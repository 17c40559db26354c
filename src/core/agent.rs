use crate::core::{Collect, Gc, MutationContext};
use std::cell::Cell;

/// How a wrapper mirrors its target's `name` / `length`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MetadataPolicy {
    #[default]
    CopyNameAndLength,
    Omit,
}

#[derive(Clone, Debug)]
pub struct HostOptions {
    pub max_call_depth: usize,
    pub metadata_policy: MetadataPolicy,
}

impl Default for HostOptions {
    fn default() -> Self {
        HostOptions {
            max_call_depth: 128,
            metadata_policy: MetadataPolicy::default(),
        }
    }
}

impl HostOptions {
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn with_metadata_policy(mut self, policy: MetadataPolicy) -> Self {
        self.metadata_policy = policy;
        self
    }
}

/// State shared by every realm of one arena: the call stack and the id
/// counters.
#[derive(Collect)]
#[collect(require_static)]
pub struct AgentData {
    options: HostOptions,
    call_depth: Cell<usize>,
    next_realm_id: Cell<u32>,
    next_wrapper_serial: Cell<u64>,
}

pub type Agent<'gc> = Gc<'gc, AgentData>;

pub fn new_agent<'gc>(mc: &MutationContext<'gc>, options: HostOptions) -> Agent<'gc> {
    log::debug!("new agent: {:?}", options);
    Gc::new(
        mc,
        AgentData {
            options,
            call_depth: Cell::new(0),
            next_realm_id: Cell::new(1),
            next_wrapper_serial: Cell::new(1),
        },
    )
}

impl AgentData {
    pub fn options(&self) -> &HostOptions {
        &self.options
    }

    pub fn call_depth(&self) -> usize {
        self.call_depth.get()
    }

    pub(crate) fn next_realm_id(&self) -> u32 {
        let id = self.next_realm_id.get();
        self.next_realm_id.set(id + 1);
        id
    }

    pub(crate) fn next_wrapper_serial(&self) -> u64 {
        let serial = self.next_wrapper_serial.get();
        self.next_wrapper_serial.set(serial + 1);
        serial
    }
}

/// Stack-depth overflow, reported as `(depth, limit)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackOverflow {
    pub depth: usize,
    pub limit: usize,
}

/// One counted frame on the agent call stack. Popped on drop, so early
/// returns through `?` keep the depth balanced.
pub struct CallFrameGuard<'gc> {
    agent: Agent<'gc>,
}

impl Drop for CallFrameGuard<'_> {
    fn drop(&mut self) {
        let depth = self.agent.call_depth.get();
        self.agent.call_depth.set(depth.saturating_sub(1));
    }
}

/// Checks the depth limit and pushes a frame.
pub fn enter_call_frame<'gc>(agent: Agent<'gc>) -> Result<CallFrameGuard<'gc>, StackOverflow> {
    let depth = agent.call_depth.get();
    let limit = agent.options.max_call_depth;
    if depth >= limit {
        log::trace!("call stack limit reached: depth={depth} limit={limit}");
        return Err(StackOverflow { depth, limit });
    }
    agent.call_depth.set(depth + 1);
    Ok(CallFrameGuard { agent })
}
