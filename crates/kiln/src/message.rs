//! # Messages — Typed Requests and Notifications
//!
//! Systems sometimes need to ask for something they don't own: change the
//! simulation speed, stop the game, clear the debug overlay. Rather than
//! reaching into the host, they queue a message on the context's [`Outbox`]
//! and the [`MessageHub`] delivers it once the system returns.
//!
//! Two kinds of message, both keyed by their Rust type:
//!
//! - **Requests** (`send`) have exactly one handler. Sending a request nobody
//!   handles is a bug and panics on dispatch.
//! - **Notifications** (`publish`) have any number of subscribers, including
//!   none; an unobserved notification is dropped.
//!
//! ## Flow
//!
//! ```text
//! system ──send(SetSimulationSpeed)──▶ ctx.outbox ──dispatch(ctx)──▶ handler(&mut ctx, msg)
//! ```
//!
//! Delivery is FIFO. Handlers receive the same `&mut C` the systems do, so they
//! may queue further messages; `dispatch` keeps draining until the outbox is
//! empty. A handler that unconditionally re-sends its own request never
//! terminates.

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};

use crate::ecs::component::short_type_name;

/// Access to the outbox a context carries.
///
/// The [`Simulation`](crate::simulation::Simulation) and [`MessageHub`] need
/// this to find queued messages on a game-defined context type.
pub trait MessageContext {
    fn outbox(&mut self) -> &mut Outbox;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Request,
    Notification,
}

struct Envelope {
    kind: Kind,
    type_id: TypeId,
    name: &'static str,
    payload: Box<dyn Any>,
}

/// Messages queued by systems, waiting for the next dispatch.
#[derive(Default)]
pub struct Outbox {
    queue: VecDeque<Envelope>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a request for its single handler.
    pub fn send<R: 'static>(&mut self, request: R) {
        self.push(Kind::Request, request);
    }

    /// Queue a notification for every subscriber.
    pub fn publish<N: 'static>(&mut self, notification: N) {
        self.push(Kind::Notification, notification);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn push<T: 'static>(&mut self, kind: Kind, payload: T) {
        self.queue.push_back(Envelope {
            kind,
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            payload: Box::new(payload),
        });
    }

    fn pop(&mut self) -> Option<Envelope> {
        self.queue.pop_front()
    }
}

type RequestHandler<C> = Box<dyn FnMut(&mut C, Box<dyn Any>)>;
type Subscriber<C> = Box<dyn FnMut(&mut C, &dyn Any)>;

/// Routes queued messages to their handlers and subscribers.
pub struct MessageHub<C> {
    handlers: HashMap<TypeId, RequestHandler<C>>,
    subscribers: HashMap<TypeId, Vec<Subscriber<C>>>,
}

impl<C: MessageContext> MessageHub<C> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            subscribers: HashMap::new(),
        }
    }

    /// Register the handler for request type `R`.
    ///
    /// # Panics
    ///
    /// Panics if `R` already has a handler.
    pub fn handle<R: 'static>(&mut self, mut handler: impl FnMut(&mut C, R) + 'static) {
        let type_id = TypeId::of::<R>();
        if self.handlers.contains_key(&type_id) {
            panic!(
                "A handler for request `{}` is already registered",
                std::any::type_name::<R>()
            );
        }
        self.handlers.insert(
            type_id,
            Box::new(move |ctx, payload| {
                if let Ok(request) = payload.downcast::<R>() {
                    handler(ctx, *request);
                }
            }),
        );
    }

    /// Add a subscriber for notification type `N`.
    pub fn subscribe<N: 'static>(&mut self, mut subscriber: impl FnMut(&mut C, &N) + 'static) {
        self.subscribers
            .entry(TypeId::of::<N>())
            .or_default()
            .push(Box::new(move |ctx, payload| {
                if let Some(notification) = payload.downcast_ref::<N>() {
                    subscriber(ctx, notification);
                }
            }));
    }

    /// Whether request type `R` has a handler.
    pub fn handles<R: 'static>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<R>())
    }

    /// Deliver everything in `ctx`'s outbox, including messages queued by the
    /// handlers themselves. Returns the number of messages processed.
    ///
    /// # Panics
    ///
    /// Panics on a request with no registered handler.
    pub fn dispatch(&mut self, ctx: &mut C) -> usize {
        let mut processed = 0;
        while let Some(envelope) = ctx.outbox().pop() {
            processed += 1;
            match envelope.kind {
                Kind::Request => {
                    let handler = self.handlers.get_mut(&envelope.type_id).unwrap_or_else(|| {
                        panic!("No handler registered for request `{}`", envelope.name)
                    });
                    handler(ctx, envelope.payload);
                }
                Kind::Notification => match self.subscribers.get_mut(&envelope.type_id) {
                    Some(subscribers) => {
                        for subscriber in subscribers.iter_mut() {
                            subscriber(ctx, envelope.payload.as_ref());
                        }
                    }
                    None => log::trace!("no subscribers for {}", short_type_name(envelope.name)),
                },
            }
        }
        processed
    }
}

impl<C: MessageContext> Default for MessageHub<C> {
    fn default() -> Self {
        Self::new()
    }
}
