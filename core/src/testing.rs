//! In-memory host doubles
//!
//! [`ManualScheduler`] is a fake clock: time only moves when the test calls
//! [`ManualScheduler::advance`], and due tasks fire in time order.
//! [`MemoryDocument`] stores elements in a map and records every mutation a
//! widget makes, so tests can assert on text, color, visibility and enabled
//! state without a browser.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::{Rc, Weak};

use crate::bootstrap::MarkupSource;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::target::{Document, RenderTarget, Target};

// ─────────────────────────────────────────────────────────────────────────────
// Manual clock
// ─────────────────────────────────────────────────────────────────────────────

enum TaskKind {
    Once(Box<dyn FnOnce()>),
    Every { interval_ms: u32, task: Box<dyn FnMut()> },
}

struct Scheduled {
    due_ms: u64,
    kind: TaskKind,
}

#[derive(Default)]
struct ClockState {
    now_ms: u64,
    next_id: u64,
    tasks: BTreeMap<u64, Scheduled>,
    /// Task currently executing (removed from `tasks` while it runs)
    running: Option<u64>,
    /// Set when the running task cancels itself
    running_cancelled: bool,
}

/// Deterministic scheduler driven by the test.
#[derive(Default)]
pub struct ManualScheduler {
    state: RefCell<ClockState>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at an arbitrary wall-clock time
    pub fn starting_at(now_ms: u64) -> Self {
        let scheduler = Self::default();
        scheduler.state.borrow_mut().now_ms = now_ms;
        scheduler
    }

    pub fn now(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// Number of tasks still armed
    pub fn pending(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance(secs * 1000);
    }

    /// Move the clock forward by `ms`, running every task that falls due on
    /// the way, earliest first. Ties run in scheduling order.
    pub fn advance(&self, ms: u64) {
        let target = self.state.borrow().now_ms + ms;

        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .tasks
                    .iter()
                    .filter(|(_, scheduled)| scheduled.due_ms <= target)
                    .min_by_key(|(id, scheduled)| (scheduled.due_ms, **id))
                    .map(|(id, _)| *id);

                match due {
                    Some(id) => {
                        let scheduled = state.tasks.remove(&id);
                        if let Some(scheduled) = &scheduled {
                            state.now_ms = state.now_ms.max(scheduled.due_ms);
                        }
                        state.running = Some(id);
                        state.running_cancelled = false;
                        scheduled.map(|scheduled| (id, scheduled))
                    }
                    None => None,
                }
            };

            let Some((id, scheduled)) = next else {
                break;
            };

            match scheduled.kind {
                TaskKind::Once(task) => {
                    task();
                    self.state.borrow_mut().running = None;
                }
                TaskKind::Every {
                    interval_ms,
                    mut task,
                } => {
                    task();
                    let mut state = self.state.borrow_mut();
                    state.running = None;
                    if !state.running_cancelled {
                        let due_ms = scheduled.due_ms + u64::from(interval_ms.max(1));
                        state.tasks.insert(
                            id,
                            Scheduled {
                                due_ms,
                                kind: TaskKind::Every { interval_ms, task },
                            },
                        );
                    }
                }
            }
        }

        let mut state = self.state.borrow_mut();
        state.now_ms = state.now_ms.max(target);
    }

    /// Jump the clock forward without running anything, like a host whose
    /// timers were throttled (a backgrounded tab). Every overdue task fires
    /// once on the next [`advance`](Self::advance), including `advance(0)`.
    pub fn suspend(&self, ms: u64) {
        let mut state = self.state.borrow_mut();
        state.now_ms += ms;
        let now = state.now_ms;
        for scheduled in state.tasks.values_mut() {
            if scheduled.due_ms < now {
                scheduled.due_ms = now;
            }
        }
    }

    fn insert(&self, delay_ms: u32, kind: TaskKind) -> TaskHandle {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let due_ms = state.now_ms + u64::from(delay_ms);
        state.tasks.insert(id, Scheduled { due_ms, kind });
        TaskHandle::from_raw(id)
    }
}

impl Scheduler for ManualScheduler {
    fn now_ms(&self) -> u64 {
        self.now()
    }

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle {
        self.insert(delay_ms, TaskKind::Once(task))
    }

    fn every(&self, interval_ms: u32, task: Box<dyn FnMut()>) -> TaskHandle {
        self.insert(interval_ms.max(1), TaskKind::Every { interval_ms, task })
    }

    fn cancel(&self, handle: TaskHandle) {
        let removed = {
            let mut state = self.state.borrow_mut();
            if state.running == Some(handle.raw()) {
                state.running_cancelled = true;
            }
            state.tasks.remove(&handle.raw())
        };
        // Dropped outside the borrow: a task's captures may hold widgets that
        // call back into the scheduler when released.
        drop(removed);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory document
// ─────────────────────────────────────────────────────────────────────────────

/// Everything a widget has written into an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementState {
    pub text: String,
    pub markup: String,
    pub color: Option<String>,
    /// `None` until a widget sets the display
    pub visible: Option<bool>,
    pub enabled: bool,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            text: String::new(),
            markup: String::new(),
            color: None,
            visible: None,
            enabled: true,
        }
    }
}

#[derive(Default)]
struct Registry {
    elements: HashMap<String, Rc<MemoryElement>>,
    /// Top-level elements in insertion order, including ones without an id
    order: Vec<Rc<MemoryElement>>,
    /// Ids inserted at the top of the body, most recent first
    body_prefix: Vec<String>,
}

/// Element stored in a [`MemoryDocument`].
pub struct MemoryElement {
    id: String,
    state: RefCell<ElementState>,
    attributes: RefCell<BTreeMap<String, String>>,
    registry: Weak<RefCell<Registry>>,
}

impl MemoryElement {
    fn new(id: &str, registry: Weak<RefCell<Registry>>) -> Rc<Self> {
        Rc::new(Self {
            id: id.to_string(),
            state: RefCell::new(ElementState::default()),
            attributes: RefCell::new(BTreeMap::new()),
            registry,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> ElementState {
        self.state.borrow().clone()
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    /// Unregister every element nested in the current content. Their ids stop
    /// resolving, as they would once a DOM subtree is replaced.
    fn detach_nested(&self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut nested = markup_ids(&self.state.borrow().markup);
        while let Some(id) = nested.pop() {
            if id == self.id {
                continue;
            }
            let removed = registry.borrow_mut().elements.remove(&id);
            if let Some(child) = removed {
                nested.extend(markup_ids(&child.state.borrow().markup));
            }
        }
    }
}

impl RenderTarget for MemoryElement {
    fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    fn markup(&self) -> String {
        self.state.borrow().markup.clone()
    }

    fn set_text(&self, text: &str) {
        self.detach_nested();
        let mut state = self.state.borrow_mut();
        state.text = text.to_string();
        state.markup = text.to_string();
    }

    fn set_markup(&self, markup: &str) {
        self.detach_nested();
        {
            let mut state = self.state.borrow_mut();
            state.text = strip_tags(markup);
            state.markup = markup.to_string();
        }

        // Replacing markup replaces the nested elements, as a DOM would.
        if let Some(registry) = self.registry.upgrade() {
            for id in markup_ids(markup) {
                let element = MemoryElement::new(&id, Rc::downgrade(&registry));
                element.set_text(&strip_tags(&inner_markup_of(markup, &id)));
                registry.borrow_mut().elements.insert(id, element);
            }
        }
    }

    fn set_color(&self, color: &str) {
        self.state.borrow_mut().color = Some(color.to_string());
    }

    fn set_visible(&self, visible: bool) {
        self.state.borrow_mut().visible = Some(visible);
    }

    fn set_enabled(&self, enabled: bool) {
        self.state.borrow_mut().enabled = enabled;
    }
}

/// Document backed by a map of elements.
#[derive(Clone, Default)]
pub struct MemoryDocument {
    registry: Rc<RefCell<Registry>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an element with the given text content
    pub fn insert(&self, id: &str, text: &str) -> Rc<MemoryElement> {
        if let Some(previous) = self.get(id) {
            previous.detach_nested();
        }

        let element = MemoryElement::new(id, Rc::downgrade(&self.registry));
        element.set_text(text);

        let mut registry = self.registry.borrow_mut();
        registry.order.retain(|existing| existing.id != id);
        registry.order.push(Rc::clone(&element));
        registry.elements.insert(id.to_string(), Rc::clone(&element));
        element
    }

    /// Add an element with no id. It can only be found through its attributes.
    pub fn insert_anonymous(&self, text: &str) -> Rc<MemoryElement> {
        let element = MemoryElement::new("", Rc::downgrade(&self.registry));
        element.set_text(text);
        self.registry.borrow_mut().order.push(Rc::clone(&element));
        element
    }

    /// Add an element whose inner content is markup
    pub fn insert_markup(&self, id: &str, markup: &str) -> Rc<MemoryElement> {
        let element = self.insert(id, "");
        element.set_markup(markup);
        element
    }

    pub fn get(&self, id: &str) -> Option<Rc<MemoryElement>> {
        self.registry.borrow().elements.get(id).cloned()
    }

    /// Ids of elements inserted at the top of the body, first child first
    pub fn body_prefix(&self) -> Vec<String> {
        self.registry.borrow().body_prefix.clone()
    }
}

impl Document for MemoryDocument {
    fn element(&self, id: &str) -> Option<Target> {
        self.get(id).map(|element| element as Target)
    }

    fn prepend_to_body(&self, id: &str) -> Option<Target> {
        let element = self.insert(id, "");
        self.registry.borrow_mut().body_prefix.insert(0, id.to_string());
        Some(element)
    }
}

impl MarkupSource for MemoryDocument {
    type Element = Rc<MemoryElement>;

    fn elements_with_attribute(&self, attribute: &str) -> Vec<Rc<MemoryElement>> {
        self.registry
            .borrow()
            .order
            .iter()
            .filter(|element| element.attributes.borrow().contains_key(attribute))
            .cloned()
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<Rc<MemoryElement>> {
        self.get(id)
    }

    fn id_of(&self, element: &Rc<MemoryElement>) -> String {
        element.id.clone()
    }

    fn attribute(&self, element: &Rc<MemoryElement>, name: &str) -> Option<String> {
        element.attribute(name)
    }
}

/// Text content of a markup fragment (tags dropped, entities left alone)
fn strip_tags(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

/// Every `id="..."` attribute value in a markup fragment
fn markup_ids(markup: &str) -> Vec<String> {
    let mut ids = Vec::new();
    let mut rest = markup;
    while let Some(start) = rest.find("id=\"") {
        // Skip attributes that merely end in "id", like data-id
        let preceded_by_space = rest[..start]
            .chars()
            .last()
            .is_some_and(char::is_whitespace);
        rest = &rest[start + 4..];
        let Some(end) = rest.find('"') else {
            break;
        };
        if preceded_by_space {
            ids.push(rest[..end].to_string());
        }
        rest = &rest[end..];
    }
    ids
}

/// Content between the opening tag carrying `id` and the next closing tag.
/// Good enough for the flat leaf elements widgets write into.
fn inner_markup_of(markup: &str, id: &str) -> String {
    let needle = format!("id=\"{id}\"");
    let Some(start) = markup.find(&needle) else {
        return String::new();
    };
    let after_attr = &markup[start + needle.len()..];
    let Some(open_end) = after_attr.find('>') else {
        return String::new();
    };
    let content = &after_attr[open_end + 1..];
    let end = content.find("</").unwrap_or(content.len());
    content[..end].to_string()
}
