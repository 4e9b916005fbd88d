//! Handle side table for page elements. Identity is the element object
//! itself; nothing is written onto the page.

use std::collections::HashMap;

use super::dom::ElementHandle;

/// Element -> id lookup keyed by object identity, not by content.
pub trait IdentityMap<E> {
    fn get(&self, element: &E) -> Option<u32>;
    fn set(&mut self, element: &E, id: u32);
}

/// Elements the agent acts on are retained for the page's lifetime.
/// Elements only seen by a query stay reachable until the next query.
pub struct ElementRegistry<E, I> {
    ids: I,
    retained: HashMap<ElementHandle, E>,
    transient: HashMap<ElementHandle, E>,
    next_id: u32,
}

impl<E: Clone, I: IdentityMap<E>> ElementRegistry<E, I> {
    pub fn new(ids: I) -> Self {
        Self {
            ids,
            retained: HashMap::new(),
            transient: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn get(&self, handle: ElementHandle) -> Option<&E> {
        self.retained
            .get(&handle)
            .or_else(|| self.transient.get(&handle))
    }

    /// Handle for an element the agent is about to select or drag.
    pub fn retain(&mut self, element: &E) -> ElementHandle {
        let handle = self.identify(element);
        self.transient.remove(&handle);
        self.retained
            .entry(handle)
            .or_insert_with(|| element.clone());
        handle
    }

    /// Handles for a query result, replacing the previous result.
    pub fn observe(&mut self, elements: impl IntoIterator<Item = E>) -> Vec<ElementHandle> {
        let mut transient = HashMap::new();
        let mut handles = Vec::new();
        for element in elements {
            let handle = self.identify(&element);
            if !self.retained.contains_key(&handle) {
                transient.insert(handle, element);
            }
            handles.push(handle);
        }
        self.transient = transient;
        handles
    }

    pub fn retained_len(&self) -> usize {
        self.retained.len()
    }

    pub fn transient_len(&self) -> usize {
        self.transient.len()
    }

    fn identify(&mut self, element: &E) -> ElementHandle {
        if let Some(id) = self.ids.get(element) {
            return ElementHandle(id);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.ids.set(element, id);
        ElementHandle(id)
    }
}
