//! In-memory page used by the agent tests.

use std::collections::BTreeMap;

use super::dom::{ElementHandle, PageDom, Rect, StyleInspector};
use crate::error::DomError;

#[derive(Clone, Debug, Default)]
pub struct FakeElement {
    pub tag: String,
    pub classes: Vec<String>,
    /// css name -> (value, important)
    pub inline: BTreeMap<String, (String, bool)>,
    pub rect: Rect,
    pub html: String,
    pub attached: bool,
    /// Make every inspector call on this element fail.
    pub broken: bool,
}

/// A stylesheet rule matching one element.
#[derive(Clone, Debug)]
pub struct SheetRule {
    pub element: ElementHandle,
    pub property: String,
    pub value: String,
    pub important: bool,
}

#[derive(Debug, Default)]
pub struct FakeDom {
    pub elements: BTreeMap<ElementHandle, FakeElement>,
    pub sheet: Vec<SheetRule>,
    pub body_classes: Vec<String>,
    pub body_cursor: String,
}

impl FakeDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: u32, tag: &str) -> ElementHandle {
        let handle = ElementHandle(id);
        self.elements.insert(
            handle,
            FakeElement {
                tag: tag.to_uppercase(),
                attached: true,
                rect: Rect::new(0.0, 0.0, 100.0, 20.0),
                ..FakeElement::default()
            },
        );
        handle
    }

    pub fn element(&self, handle: ElementHandle) -> &FakeElement {
        &self.elements[&handle]
    }

    pub fn element_mut(&mut self, handle: ElementHandle) -> &mut FakeElement {
        self.elements.get_mut(&handle).expect("fake element")
    }

    pub fn detach(&mut self, handle: ElementHandle) {
        self.element_mut(handle).attached = false;
    }

    pub fn add_rule(&mut self, element: ElementHandle, property: &str, value: &str, important: bool) {
        self.sheet.push(SheetRule {
            element,
            property: property.to_string(),
            value: value.to_string(),
            important,
        });
    }

    /// Inline value without priority, empty when unset.
    pub fn inline(&self, handle: ElementHandle, css_property: &str) -> String {
        self.element(handle)
            .inline
            .get(css_property)
            .map(|(v, _)| v.clone())
            .unwrap_or_default()
    }

    pub fn has_class(&self, handle: ElementHandle, class: &str) -> bool {
        self.element(handle).classes.iter().any(|c| c == class)
    }

    /// Cascade: inline !important, sheet !important, inline, sheet.
    pub fn effective(&self, handle: ElementHandle, css_property: &str) -> String {
        let inline = self.element(handle).inline.get(css_property);
        let rule = self
            .sheet
            .iter()
            .rev()
            .find(|r| r.element == handle && r.property == css_property);
        match (inline, rule) {
            (Some((v, true)), _) => v.clone(),
            (_, Some(r)) if r.important => r.value.clone(),
            (Some((v, false)), _) => v.clone(),
            (None, Some(r)) => r.value.clone(),
            (None, None) => String::new(),
        }
    }

    fn get(&self, handle: ElementHandle) -> Result<&FakeElement, DomError> {
        match self.elements.get(&handle) {
            Some(el) if el.broken => Err(DomError::Js("element access threw".into())),
            Some(el) => Ok(el),
            None => Err(DomError::UnknownElement(handle)),
        }
    }

    fn get_mut(&mut self, handle: ElementHandle) -> Result<&mut FakeElement, DomError> {
        self.elements.get_mut(&handle).ok_or(DomError::UnknownElement(handle))
    }
}

impl StyleInspector for FakeDom {
    fn tag_name(&self, element: ElementHandle) -> Result<String, DomError> {
        Ok(self.get(element)?.tag.clone())
    }

    fn class_list(&self, element: ElementHandle) -> Result<Vec<String>, DomError> {
        Ok(self.get(element)?.classes.clone())
    }

    fn computed_style(&self, element: ElementHandle, css_property: &str) -> Result<String, DomError> {
        self.get(element)?;
        Ok(self.effective(element, css_property))
    }

    fn bounding_rect(&self, element: ElementHandle) -> Result<Rect, DomError> {
        Ok(self.get(element)?.rect)
    }

    fn inner_html(&self, element: ElementHandle) -> Result<String, DomError> {
        Ok(self.get(element)?.html.clone())
    }

    fn is_attached(&self, element: ElementHandle) -> bool {
        self.elements.get(&element).is_some_and(|e| e.attached)
    }
}

impl PageDom for FakeDom {
    fn inline_style(&self, element: ElementHandle, css_property: &str) -> Result<String, DomError> {
        self.get(element)?;
        Ok(self.inline(element, css_property))
    }

    fn set_inline_style(
        &mut self,
        element: ElementHandle,
        css_property: &str,
        value: &str,
        important: bool,
    ) -> Result<(), DomError> {
        let el = self.get_mut(element)?;
        if value.is_empty() {
            el.inline.remove(css_property);
        } else {
            el.inline
                .insert(css_property.to_string(), (value.to_string(), important));
        }
        Ok(())
    }

    fn add_class(&mut self, element: ElementHandle, class: &str) -> Result<(), DomError> {
        let el = self.get_mut(element)?;
        if !el.classes.iter().any(|c| c == class) {
            el.classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&mut self, element: ElementHandle, class: &str) -> Result<(), DomError> {
        self.get_mut(element)?.classes.retain(|c| c != class);
        Ok(())
    }

    fn set_body_class(&mut self, class: &str, on: bool) -> Result<(), DomError> {
        self.body_classes.retain(|c| c != class);
        if on {
            self.body_classes.push(class.to_string());
        }
        Ok(())
    }

    fn set_body_cursor(&mut self, cursor: &str) -> Result<(), DomError> {
        self.body_cursor = cursor.to_string();
        Ok(())
    }

    fn query_all(&mut self, _selector: &str) -> Result<Vec<ElementHandle>, DomError> {
        Ok(self
            .elements
            .iter()
            .filter(|(_, e)| e.attached)
            .map(|(h, _)| *h)
            .collect())
    }
}
