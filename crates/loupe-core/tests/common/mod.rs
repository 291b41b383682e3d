//! Shared mock collaborators for the integration tests.
//!
//! `MockEngine` hands out a fresh handle every time a frame is enumerated,
//! the way a real engine mints a new wrapper per access, and records every
//! dispose so tests can assert nothing leaks.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use loupe_core::engine::{DebugEngine, Evaluation, FrameSelection};
use loupe_core::error::{CoreResult, EngineError};
use loupe_core::names::{MethodMetadataSource, MethodNameSource, MethodNames, MethodSignature, SymbolFileSource};
use loupe_core::settings::InspectorSettings;
use loupe_core::slot::{SlotId, SlotKind};
use loupe_core::tree::LocalsTree;
use loupe_core::types::{
    FrameHandle, FrameIdentity, MethodKey, MethodToken, ModuleId, ProcessState, RawValue, ThreadId, TypeSig,
};
use loupe_core::LocalsCoordinator;

pub const THREAD: ThreadId = ThreadId::from_raw(1);
pub const FRAME: FrameHandle = FrameHandle::from_raw(100);

#[must_use]
pub fn method_key(module: u64, token: u32) -> MethodKey
{
    MethodKey::new(ModuleId::from_raw(module), MethodToken::from_raw(token))
}

#[must_use]
pub fn default_key() -> MethodKey
{
    method_key(1, 0x0600_0001)
}

/// Per-frame configuration the mock engine answers queries from.
pub struct FrameConfig
{
    pub identity: FrameIdentity,
    pub valid: bool,
    pub arg_count: usize,
    pub local_count: usize,
    pub arg_types: Vec<TypeSig>,
    pub local_types: Vec<TypeSig>,
    pub generic_count: usize,
    pub generics: Vec<TypeSig>,
}

impl FrameConfig
{
    #[must_use]
    pub fn new(identity: FrameIdentity) -> Self
    {
        Self {
            identity,
            valid: true,
            arg_count: 0,
            local_count: 0,
            arg_types: Vec::new(),
            local_types: Vec::new(),
            generic_count: 0,
            generics: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_counts(identity: FrameIdentity, arg_count: usize, local_count: usize) -> Self
    {
        let mut config = Self::new(identity);
        config.arg_count = arg_count;
        config.local_count = local_count;
        config
    }
}

pub struct EngineState
{
    pub process_state: ProcessState,
    pub debugging: bool,
    pub can_evaluate: bool,
    pub eval_disabled: bool,
    pub first_thread: Option<ThreadId>,
    pub exception_present: bool,
    pub frames: HashMap<FrameHandle, FrameConfig>,
    pub valid: HashSet<RawValue>,
    pub issued: Vec<RawValue>,
    pub disposed: Vec<RawValue>,
    pub fail_dispose: bool,
    pub evals: usize,
    next_handle: u64,
}

/// Scriptable debug engine; clones share one state.
#[derive(Clone)]
pub struct MockEngine
{
    pub state: Rc<RefCell<EngineState>>,
}

impl MockEngine
{
    #[must_use]
    pub fn new() -> Self
    {
        Self {
            state: Rc::new(RefCell::new(EngineState {
                process_state: ProcessState::Running,
                debugging: true,
                can_evaluate: true,
                eval_disabled: false,
                first_thread: None,
                exception_present: false,
                frames: HashMap::new(),
                valid: HashSet::new(),
                issued: Vec::new(),
                disposed: Vec::new(),
                fail_dispose: false,
                evals: 0,
                next_handle: 0,
            })),
        }
    }

    /// Mint a fresh valid handle, recording it as issued.
    pub fn alloc(&self) -> RawValue
    {
        let mut state = self.state.borrow_mut();
        state.next_handle += 1;
        let value = RawValue::from_raw(state.next_handle);
        state.valid.insert(value);
        state.issued.push(value);
        value
    }

    pub fn install_frame(&self, frame: FrameHandle, config: FrameConfig)
    {
        self.state.borrow_mut().frames.insert(frame, config);
    }

    pub fn set_process_state(&self, process_state: ProcessState)
    {
        self.state.borrow_mut().process_state = process_state;
    }

    pub fn set_exception_present(&self, present: bool)
    {
        self.state.borrow_mut().exception_present = present;
    }

    /// Neuter a handle without disposing it, as a resume would.
    pub fn neuter(&self, value: RawValue)
    {
        self.state.borrow_mut().valid.remove(&value);
    }

    #[must_use]
    pub fn disposed(&self) -> Vec<RawValue>
    {
        self.state.borrow().disposed.clone()
    }

    #[must_use]
    pub fn issued(&self) -> Vec<RawValue>
    {
        self.state.borrow().issued.clone()
    }

    #[must_use]
    pub fn evals(&self) -> usize
    {
        self.state.borrow().evals
    }
}

impl Default for MockEngine
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl DebugEngine for MockEngine
{
    fn process_state(&self) -> ProcessState
    {
        self.state.borrow().process_state
    }

    fn is_debugging(&self) -> bool
    {
        self.state.borrow().debugging
    }

    fn can_evaluate(&self) -> bool
    {
        self.state.borrow().can_evaluate
    }

    fn eval_disabled(&self) -> bool
    {
        self.state.borrow().eval_disabled
    }

    fn first_thread(&self) -> Option<ThreadId>
    {
        self.state.borrow().first_thread
    }

    fn is_frame_valid(&self, frame: FrameHandle) -> bool
    {
        self.state.borrow().frames.get(&frame).is_some_and(|config| config.valid)
    }

    fn frame_identity(&self, frame: FrameHandle) -> FrameIdentity
    {
        self.state
            .borrow()
            .frames
            .get(&frame)
            .map_or(FrameIdentity::Unknown, |config| config.identity)
    }

    fn argument_handles(&mut self, frame: FrameHandle) -> Vec<RawValue>
    {
        let count = self.state.borrow().frames.get(&frame).map_or(0, |config| config.arg_count);
        (0..count).map(|_| self.alloc()).collect()
    }

    fn local_handles(&mut self, frame: FrameHandle) -> Vec<RawValue>
    {
        let count = self.state.borrow().frames.get(&frame).map_or(0, |config| config.local_count);
        (0..count).map(|_| self.alloc()).collect()
    }

    fn argument_handle(&mut self, frame: FrameHandle, index: u32) -> Option<RawValue>
    {
        let available = self
            .state
            .borrow()
            .frames
            .get(&frame)
            .is_some_and(|config| config.valid && (index as usize) < config.arg_count);
        available.then(|| self.alloc())
    }

    fn local_handle(&mut self, frame: FrameHandle, index: u32) -> Option<RawValue>
    {
        let available = self
            .state
            .borrow()
            .frames
            .get(&frame)
            .is_some_and(|config| config.valid && (index as usize) < config.local_count);
        available.then(|| self.alloc())
    }

    fn current_exception(&mut self, _thread: ThreadId) -> Option<RawValue>
    {
        let present = self.state.borrow().exception_present;
        present.then(|| self.alloc())
    }

    fn declared_types(&self, frame: FrameHandle) -> (Vec<TypeSig>, Vec<TypeSig>)
    {
        self.state
            .borrow()
            .frames
            .get(&frame)
            .map_or_else(|| (Vec::new(), Vec::new()), |config| (config.arg_types.clone(), config.local_types.clone()))
    }

    fn generic_argument_count(&self, frame: FrameHandle) -> usize
    {
        self.state.borrow().frames.get(&frame).map_or(0, |config| config.generic_count)
    }

    fn generic_arguments(&self, frame: FrameHandle) -> Vec<TypeSig>
    {
        self.state
            .borrow()
            .frames
            .get(&frame)
            .map_or_else(Vec::new, |config| config.generics.clone())
    }

    fn is_handle_valid(&self, value: RawValue) -> bool
    {
        self.state.borrow().valid.contains(&value)
    }

    fn dispose_handle(&mut self, value: RawValue) -> CoreResult<()>
    {
        let mut state = self.state.borrow_mut();
        state.disposed.push(value);
        state.valid.remove(&value);
        if state.fail_dispose {
            return Err(EngineError::DisposeFailed {
                handle: value,
                details: "engine refused".to_string(),
            });
        }
        Ok(())
    }

    fn create_eval(&mut self, thread: ThreadId) -> Option<Evaluation>
    {
        self.state.borrow_mut().evals += 1;
        Some(Evaluation::new(thread))
    }
}

#[derive(Default)]
pub struct SelectionState
{
    pub thread: Option<ThreadId>,
    pub frame: Option<FrameHandle>,
    pub index: usize,
}

#[derive(Clone, Default)]
pub struct MockSelection
{
    pub state: Rc<RefCell<SelectionState>>,
}

impl MockSelection
{
    pub fn select(&self, thread: Option<ThreadId>, frame: Option<FrameHandle>)
    {
        let mut state = self.state.borrow_mut();
        state.thread = thread;
        state.frame = frame;
    }
}

impl FrameSelection for MockSelection
{
    fn selected_thread(&self) -> Option<ThreadId>
    {
        self.state.borrow().thread
    }

    fn selected_frame(&self) -> Option<FrameHandle>
    {
        self.state.borrow().frame
    }

    fn selected_frame_index(&self) -> usize
    {
        self.state.borrow().index
    }
}

#[derive(Default)]
pub struct NamesState
{
    pub map: HashMap<MethodKey, MethodNames>,
    pub lookups: usize,
}

#[derive(Clone, Default)]
pub struct MockNames
{
    pub state: Rc<RefCell<NamesState>>,
}

impl MockNames
{
    pub fn set(&self, key: MethodKey, names: MethodNames)
    {
        self.state.borrow_mut().map.insert(key, names);
    }

    #[must_use]
    pub fn lookups(&self) -> usize
    {
        self.state.borrow().lookups
    }
}

impl MethodNameSource for MockNames
{
    fn method_names(&self, key: MethodKey) -> MethodNames
    {
        let mut state = self.state.borrow_mut();
        state.lookups += 1;
        state.map.get(&key).cloned().unwrap_or_default()
    }
}

#[derive(Default)]
pub struct MetadataState
{
    pub map: HashMap<MethodKey, MethodSignature>,
    pub lookups: usize,
}

#[derive(Clone, Default)]
pub struct MockMetadata
{
    pub state: Rc<RefCell<MetadataState>>,
}

impl MockMetadata
{
    pub fn set(&self, key: MethodKey, signature: MethodSignature)
    {
        self.state.borrow_mut().map.insert(key, signature);
    }

    #[must_use]
    pub fn lookups(&self) -> usize
    {
        self.state.borrow().lookups
    }
}

impl MethodMetadataSource for MockMetadata
{
    fn method_signature(&self, key: MethodKey) -> Option<MethodSignature>
    {
        let mut state = self.state.borrow_mut();
        state.lookups += 1;
        state.map.get(&key).cloned()
    }
}

#[derive(Default)]
pub struct SymbolsState
{
    pub map: HashMap<MethodKey, Vec<Option<String>>>,
    pub lookups: usize,
}

#[derive(Clone, Default)]
pub struct MockSymbols
{
    pub state: Rc<RefCell<SymbolsState>>,
}

impl MockSymbols
{
    pub fn set(&self, key: MethodKey, names: Vec<Option<String>>)
    {
        self.state.borrow_mut().map.insert(key, names);
    }

    #[must_use]
    pub fn lookups(&self) -> usize
    {
        self.state.borrow().lookups
    }
}

impl SymbolFileSource for MockSymbols
{
    fn local_names(&self, key: MethodKey) -> Option<Vec<Option<String>>>
    {
        let mut state = self.state.borrow_mut();
        state.lookups += 1;
        state.map.get(&key).cloned()
    }
}

/// A coordinator wired to scriptable mocks, plus handles to script them.
pub struct Fixture
{
    pub coordinator: LocalsCoordinator,
    pub engine: MockEngine,
    pub selection: MockSelection,
    pub metadata: MockMetadata,
    pub names: MockNames,
    pub symbols: MockSymbols,
}

#[must_use]
pub fn fixture() -> Fixture
{
    fixture_with(InspectorSettings::default())
}

#[must_use]
pub fn fixture_with(settings: InspectorSettings) -> Fixture
{
    let engine = MockEngine::new();
    let selection = MockSelection::default();
    let metadata = MockMetadata::default();
    let names = MockNames::default();
    let symbols = MockSymbols::default();
    let coordinator = LocalsCoordinator::new(
        Box::new(engine.clone()),
        Box::new(selection.clone()),
        Box::new(metadata.clone()),
        Box::new(names.clone()),
        Box::new(symbols.clone()),
        settings,
    );
    Fixture {
        coordinator,
        engine,
        selection,
        metadata,
        names,
        symbols,
    }
}

impl Fixture
{
    /// Install `config` behind [`FRAME`], select it, and pause the debuggee.
    pub fn pause_on(&self, config: FrameConfig)
    {
        self.engine.install_frame(FRAME, config);
        self.selection.select(Some(THREAD), Some(FRAME));
        self.engine.set_process_state(ProcessState::Paused);
    }

    /// Deliver a paused notification, triggering a full synchronize.
    pub fn notify_paused(&mut self)
    {
        self.coordinator
            .handle_event(loupe_core::InspectorEvent::ProcessStateChanged(ProcessState::Paused));
    }
}

#[must_use]
pub fn kinds(tree: &LocalsTree) -> Vec<SlotKind>
{
    tree.slots().iter().map(|slot| slot.kind()).collect()
}

#[must_use]
pub fn ids(tree: &LocalsTree) -> Vec<SlotId>
{
    tree.slots().iter().map(|slot| slot.id()).collect()
}
