//! Host event hub and mounted sliders.
//!
//! A host (terminal, window, headless replay) owns one [`EventHub`] and
//! dispatches window-level events into it: resizes, pointer moves, pointer
//! releases and display frames. A [`MountedSlider`] subscribes to those while
//! mounted, the way a DOM control would attach window/document listeners.
//!
//! Subscriptions are RAII: dropping one removes its handler, so an unmounted
//! slider can never receive another event or call its owner back.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::control::SliderControl;
use crate::geometry::{GeometryCache, GeometryProvider};
use crate::props::SliderSpec;
use crate::view::SliderView;

/// A window-level event, observed by every mounted slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    Resize,
    PointerMove { x: f64 },
    PointerUp,
    Frame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    PointerMove,
    PointerUp,
    Frame,
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::Resize => EventKind::Resize,
            HostEvent::PointerMove { .. } => EventKind::PointerMove,
            HostEvent::PointerUp => EventKind::PointerUp,
            HostEvent::Frame => EventKind::Frame,
        }
    }
}

type Handler = Rc<RefCell<dyn FnMut(&HostEvent)>>;

struct Entry {
    id: u64,
    kind: EventKind,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Registry {
    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }
}

/// Single-threaded listener registry. Cloning shares the same registry.
#[derive(Clone, Default)]
pub struct EventHub {
    registry: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of `kind`. It stays registered until the
    /// returned [`Subscription`] is dropped.
    #[must_use = "dropping the subscription detaches the handler immediately"]
    pub fn subscribe(
        &self,
        kind: EventKind,
        handler: impl FnMut(&HostEvent) + 'static,
    ) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push(Entry {
            id,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver `event` to every handler registered for its kind, in
    /// registration order. Returns how many handlers ran.
    ///
    /// Handlers may subscribe or unsubscribe while this runs. A handler removed
    /// by an earlier one in the same dispatch is skipped; one added is not
    /// called until the next dispatch. A handler that re-enters dispatch for
    /// an event it is already handling is skipped for the nested call.
    pub fn dispatch(&self, event: &HostEvent) -> usize {
        let kind = event.kind();
        let snapshot: Vec<(u64, Handler)> = self
            .registry
            .borrow()
            .entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| (e.id, Rc::clone(&e.handler)))
            .collect();

        let mut delivered = 0;
        for (id, handler) in snapshot {
            if !self.registry.borrow().contains(id) {
                continue;
            }
            let Ok(mut guard) = handler.try_borrow_mut() else {
                continue;
            };
            (&mut *guard)(event);
            delivered += 1;
        }
        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }
}

/// Handle to a registered handler. Dropping it unregisters the handler.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().entries.retain(|e| e.id != self.id);
        }
    }
}

/// Per-instance state reachable from the hub handlers.
struct Instance<P> {
    control: SliderControl,
    props: SliderSpec,
    provider: P,
}

impl<P: GeometryProvider> Instance<P> {
    /// Run one hub event through the control. Returns the value to report.
    fn handle(&mut self, event: &HostEvent) -> Option<f64> {
        match *event {
            HostEvent::Resize => {
                self.control.resize(&self.props, &self.provider);
                None
            }
            HostEvent::PointerMove { x } => {
                self.control.pointer_move(x);
                None
            }
            HostEvent::PointerUp => self.control.pointer_up(&self.props),
            HostEvent::Frame => self.control.frame(&self.props),
        }
    }
}

type ChangeCallback = Rc<RefCell<dyn FnMut(f64)>>;

/// The owner's change callback plus the values waiting to reach it.
///
/// A value reported while the callback is already running (the owner
/// re-rendered from inside it and that produced a correction) is queued and
/// delivered, in order, once the running call returns.
struct Reporter {
    callback: ChangeCallback,
    queued: RefCell<VecDeque<f64>>,
}

impl Reporter {
    fn new(callback: impl FnMut(f64) + 'static) -> Self {
        Self {
            callback: Rc::new(RefCell::new(callback)),
            queued: RefCell::new(VecDeque::new()),
        }
    }

    fn report(&self, value: f64) {
        self.queued.borrow_mut().push_back(value);
        let Ok(mut callback) = self.callback.try_borrow_mut() else {
            tracing::trace!(value, "owner callback busy, change queued");
            return;
        };
        loop {
            let next = self.queued.borrow_mut().pop_front();
            let Some(value) = next else {
                break;
            };
            (&mut *callback)(value);
        }
    }
}

/// A slider attached to a host: its control, its latest props, its geometry
/// provider, the owner's change callback, and its hub subscriptions.
///
/// Listeners are acquired in [`MountedSlider::mount`] and released when the
/// value is dropped (or [`MountedSlider::unmount`] is called). Any pointer
/// update still pending at that point is cancelled, never delivered.
pub struct MountedSlider<P: GeometryProvider + 'static> {
    instance: Rc<RefCell<Instance<P>>>,
    reporter: Rc<Reporter>,
    listeners: Vec<Subscription>,
}

impl<P: GeometryProvider + 'static> MountedSlider<P> {
    const LISTENED: [EventKind; 4] = [
        EventKind::Resize,
        EventKind::PointerMove,
        EventKind::PointerUp,
        EventKind::Frame,
    ];

    /// Measure, position, and attach to `hub`. If the initial value is not
    /// allowable, `on_change` receives the correction before this returns.
    pub fn mount(
        hub: &EventHub,
        provider: P,
        props: SliderSpec,
        on_change: impl FnMut(f64) + 'static,
    ) -> Self {
        let mut control = SliderControl::new();
        let reconciled = control.mount(&props, &provider);

        let instance = Rc::new(RefCell::new(Instance {
            control,
            props,
            provider,
        }));
        let reporter = Rc::new(Reporter::new(on_change));

        let listeners = Self::LISTENED
            .iter()
            .map(|&kind| {
                let instance = Rc::downgrade(&instance);
                let reporter = Rc::downgrade(&reporter);
                hub.subscribe(kind, move |event| {
                    let Some(instance) = instance.upgrade() else {
                        return;
                    };
                    // Release the instance before calling out, so the owner may
                    // re-render this slider from inside its callback.
                    let emitted = instance.borrow_mut().handle(event);
                    if let (Some(value), Some(reporter)) = (emitted, reporter.upgrade()) {
                        reporter.report(value);
                    }
                })
            })
            .collect();

        let mounted = Self {
            instance,
            reporter,
            listeners,
        };
        if let Some(value) = reconciled.correction {
            mounted.emit(value);
        }
        mounted
    }

    /// Pointer pressed on this slider's handle (the host does the hit test).
    /// Returns true if a drag started and the host should suppress the
    /// event's default action.
    pub fn pointer_down(&self, pointer_x: f64) -> bool {
        self.instance.borrow_mut().control.pointer_down(pointer_x)
    }

    /// Owner render cycle: take the new props and reconcile. A correction, if
    /// any, is reported through the change callback.
    pub fn render(&self, props: SliderSpec) -> bool {
        let reconciled = {
            let mut instance = self.instance.borrow_mut();
            let Instance {
                control,
                props: current,
                provider,
            } = &mut *instance;
            *current = props;
            control.render(current, provider)
        };
        if let Some(value) = reconciled.correction {
            self.emit(value);
        }
        reconciled.offset_changed
    }

    pub fn view(&self) -> SliderView {
        let instance = self.instance.borrow();
        instance.control.view(&instance.props)
    }

    pub fn offset(&self) -> f64 {
        self.instance.borrow().control.offset()
    }

    pub fn handle_left(&self) -> f64 {
        self.instance.borrow().control.handle_left()
    }

    pub fn geometry(&self) -> GeometryCache {
        self.instance.borrow().control.geometry()
    }

    pub fn is_dragging(&self) -> bool {
        self.instance.borrow().control.is_dragging()
    }

    /// Explicit teardown; equivalent to dropping the slider.
    pub fn unmount(self) {
        drop(self);
    }

    fn emit(&self, value: f64) {
        self.reporter.report(value);
    }
}

impl<P: GeometryProvider + 'static> Drop for MountedSlider<P> {
    fn drop(&mut self) {
        // Detach first: nothing dispatched after this point may reach us.
        self.listeners.clear();
        if let Ok(mut instance) = self.instance.try_borrow_mut() {
            instance.control.unmount();
        }
        self.reporter.queued.borrow_mut().clear();
    }
}
