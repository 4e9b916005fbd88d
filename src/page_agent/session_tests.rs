use serde_json::json;

use super::*;
use crate::page_agent::fake_dom::FakeDom;
use crate::page_agent::storage::MemoryStore;
use crate::style::StyleMap;

fn session() -> (EditorSession<FakeDom, MemoryStore>, ElementHandle, ElementHandle) {
    let mut dom = FakeDom::new();
    let a = dom.add(1, "div");
    let b = dom.add(2, "p");
    let mut session = EditorSession::new(dom, MemoryStore::default(), EditorConfig::default());
    session.set_edit_mode(true).unwrap();
    (session, a, b)
}

fn alt_click(target: ElementHandle) -> MouseInput {
    MouseInput {
        target: Some(target),
        pointer: Pointer::new(1, 1),
        alt_key: true,
    }
}

fn press(target: ElementHandle, x: i32, y: i32) -> MouseInput {
    MouseInput {
        target: Some(target),
        pointer: Pointer::new(x, y),
        alt_key: false,
    }
}

fn update(session: &mut EditorSession<FakeDom, MemoryStore>, property: &str, value: &str) {
    let reply = session.handle(AgentRequest::UpdateStyle {
        property: property.into(),
        value: value.into(),
    });
    assert_eq!(reply, AgentReply::Silent);
}

fn styles(pairs: &[(&str, &str)]) -> Option<StylesReply> {
    Some(StylesReply {
        styles: pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<StyleMap>(),
    })
}

#[test]
fn test_edit_mode_toggles_body_state_and_reports_it() {
    let mut dom = FakeDom::new();
    dom.add(1, "div");
    let mut session = EditorSession::new(dom, MemoryStore::default(), EditorConfig::default());
    assert_eq!(
        session.handle(AgentRequest::GetDragModeState),
        AgentReply::DragMode(DragModeState { enabled: false })
    );
    assert!(!session.on_click());

    session.handle(AgentRequest::ToggleDragMode { enabled: true });
    assert!(session.on_click());
    assert_eq!(session.dom().body_classes, vec!["drag-mode-enabled"]);
    assert_eq!(session.dom().body_cursor, "grab");
    assert_eq!(
        session.handle(AgentRequest::GetDragModeState),
        AgentReply::DragMode(DragModeState { enabled: true })
    );

    session.handle(AgentRequest::ToggleDragMode { enabled: false });
    assert!(session.dom().body_classes.is_empty());
    assert_eq!(session.dom().body_cursor, "default");
}

#[test]
fn test_mouse_is_ignored_outside_edit_mode() {
    let (mut session, a, _) = session();
    session.set_edit_mode(false).unwrap();
    let outcome = session.on_mouse_down(alt_click(a)).unwrap();
    assert_eq!(outcome, MouseDownOutcome::default());
    assert_eq!(session.selected(), None);

    session.on_mouse_down(press(a, 0, 0)).unwrap();
    assert!(!session.drag().is_dragging());
}

#[test]
fn test_alt_click_selects_and_pushes_snapshot() {
    let (mut session, a, b) = session();
    let outcome = session.on_mouse_down(alt_click(a)).unwrap();
    assert!(outcome.prevent_default);
    let Some(PanelNotice::ElementSelected { details: Some(details) }) = outcome.notice else {
        panic!("expected a snapshot push");
    };
    assert_eq!(details.tag_name, "DIV");
    assert_eq!(details.classes, vec!["editor-selected"]);

    let outcome = session.on_mouse_down(alt_click(b)).unwrap();
    assert!(matches!(
        outcome.notice,
        Some(PanelNotice::ElementSelected { details: Some(ref d) }) if d.tag_name == "P"
    ));
    assert!(!session.dom().has_class(a, "editor-selected"));
    assert!(session.dom().has_class(b, "editor-selected"));

    let outcome = session.on_mouse_down(alt_click(b)).unwrap();
    assert_eq!(outcome.notice, Some(PanelNotice::ElementSelected { details: None }));
    assert_eq!(session.handle(AgentRequest::GetSelectedElementDetails), AgentReply::Details(None));
    assert!(!session.dom().has_class(b, "editor-selected"));
}

#[test]
fn test_update_without_selection_is_silent_noop() {
    let (mut session, a, _) = session();
    update(&mut session, "color", "red");
    assert!(session.history().is_empty());
    assert_eq!(session.dom().inline(a, "color"), "");
    assert_eq!(session.store().saves, 0);
}

#[test]
fn test_color_then_font_size_undo_redo() {
    let (mut session, a, _) = session();
    session
        .dom_mut()
        .set_inline_style(a, "font-size", "12px", false)
        .unwrap();
    session.on_mouse_down(alt_click(a)).unwrap();

    update(&mut session, "color", "red");
    update(&mut session, "fontSize", "20px");
    assert_eq!(session.dom().inline(a, "font-size"), "20px");
    assert_eq!(session.dom().element(a).inline["color"], ("red".to_string(), true));

    assert_eq!(
        session.handle(AgentRequest::Undo),
        AgentReply::Styles(styles(&[("fontSize", "12px")]))
    );
    assert_eq!(session.dom().inline(a, "font-size"), "12px");
    assert_eq!(session.dom().inline(a, "color"), "red");

    assert_eq!(
        session.handle(AgentRequest::Redo),
        AgentReply::Styles(styles(&[("fontSize", "20px")]))
    );
    assert_eq!(session.handle(AgentRequest::Redo), AgentReply::Styles(None));

    session.handle(AgentRequest::Undo);
    session.handle(AgentRequest::Undo);
    assert_eq!(session.dom().inline(a, "color"), "");
    assert_eq!(session.handle(AgentRequest::Undo), AgentReply::Styles(None));
    assert_eq!(session.history().index(), -1);
}

#[test]
fn test_every_mutation_is_persisted() {
    let (mut session, a, _) = session();
    session.on_mouse_down(alt_click(a)).unwrap();
    update(&mut session, "margin", "8px");
    assert_eq!(session.store().saves, 1);
    session.handle(AgentRequest::Undo);
    assert_eq!(session.store().saves, 2);
    // no-op undo writes nothing
    session.handle(AgentRequest::Undo);
    assert_eq!(session.store().saves, 2);

    let last = serde_json::Value::Object(session.store().last.clone().unwrap());
    assert_eq!(
        last,
        json!({
            "history": [{"element": 1, "oldStyles": {"margin": ""}, "newStyles": {"margin": "8px"}}],
            "historyIndex": -1
        })
    );
}

#[test]
fn test_drag_by_delta_records_one_entry() {
    let (mut session, a, _) = session();
    session.on_mouse_down(press(a, 40, 40)).unwrap();
    session.on_mouse_move(Pointer::new(55, 32), 0.0).unwrap();
    session.on_mouse_up().unwrap();

    assert_eq!(session.history().len(), 1);
    let entry = &session.history().entries()[0];
    assert_eq!(entry.old_styles["left"], "");
    assert_eq!(entry.new_styles["left"], "15px");
    assert_eq!(entry.new_styles["top"], "-8px");

    assert_eq!(
        session.handle(AgentRequest::Undo),
        AgentReply::Styles(styles(&[("left", ""), ("top", "")]))
    );
    assert_eq!(session.dom().inline(a, "left"), "");
}

#[test]
fn test_zero_delta_drag_records_nothing() {
    let (mut session, a, _) = session();
    session.on_mouse_down(press(a, 40, 40)).unwrap();
    session.on_mouse_up().unwrap();
    assert!(session.history().is_empty());
    assert_eq!(session.store().saves, 0);
}

#[test]
fn test_undo_on_removed_element_answers_null_and_moves_on() {
    let (mut session, a, b) = session();
    session.on_mouse_down(alt_click(a)).unwrap();
    update(&mut session, "padding", "4px");
    session.on_mouse_down(alt_click(b)).unwrap();
    update(&mut session, "padding", "6px");
    session.dom_mut().detach(b);

    assert_eq!(session.handle(AgentRequest::Undo), AgentReply::Styles(None));
    assert_eq!(session.history().index(), 0);
    assert_eq!(session.store().saves, 3);
    assert_eq!(
        session.handle(AgentRequest::Undo),
        AgentReply::Styles(styles(&[("padding", "")]))
    );
}

#[test]
fn test_disabling_edit_mode_clears_affordances() {
    let (mut session, a, _) = session();
    session.on_mouse_move(Pointer::new(10, 10), 0.0).unwrap();
    assert!(session.dom().has_class(a, "near-pointer"));
    session.on_mouse_down(press(a, 10, 10)).unwrap();
    assert!(session.dom().has_class(a, "dragging"));

    session.set_edit_mode(false).unwrap();
    assert!(!session.dom().has_class(a, "near-pointer"));
    assert!(!session.dom().has_class(a, "dragging"));
    assert!(!session.drag().is_dragging());
    session.on_mouse_up().unwrap();
    assert!(session.history().is_empty());
}

#[test]
fn test_proximity_does_not_touch_selection_or_history() {
    let (mut session, a, _) = session();
    for t in 0..10 {
        session
            .on_mouse_move(Pointer::new(t, t), f64::from(t) * 5.0)
            .unwrap();
    }
    assert!(session.dom().has_class(a, "near-pointer"));
    assert_eq!(session.selected(), None);
    assert!(session.history().is_empty());
}

#[test]
fn test_press_after_lost_mouseup_records_the_first_drag() {
    let (mut session, a, b) = session();
    session.on_mouse_down(press(a, 0, 0)).unwrap();
    session.on_mouse_move(Pointer::new(25, 10), 0.0).unwrap();

    // The page swallowed the mouseup; the next press starts over on b.
    session.on_mouse_down(press(b, 100, 100)).unwrap();
    assert!(!session.dom().has_class(a, "dragging"));
    assert_eq!(session.drag().dragged(), Some(b));
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history().entries()[0].element, a);
    assert_eq!(session.store().saves, 1);

    assert_eq!(
        session.handle(AgentRequest::Undo),
        AgentReply::Styles(styles(&[("left", ""), ("top", "")]))
    );
    assert_eq!(session.dom().inline(a, "left"), "");
}

#[test]
fn test_alt_click_during_stuck_drag_closes_it() {
    let (mut session, a, _) = session();
    session.on_mouse_down(press(a, 0, 0)).unwrap();
    session.on_mouse_move(Pointer::new(5, 5), 0.0).unwrap();

    let outcome = session.on_mouse_down(alt_click(a)).unwrap();
    assert!(!session.drag().is_dragging());
    assert_eq!(session.history().len(), 1);
    let Some(PanelNotice::ElementSelected { details: Some(details) }) = outcome.notice else {
        panic!("expected a snapshot push");
    };
    assert_eq!(details.classes, vec!["editor-selected"]);
}

#[test]
fn test_snapshot_hides_agent_marker_classes() {
    let (mut session, a, _) = session();
    session.dom_mut().element_mut(a).classes = vec!["card".into()];
    session.on_mouse_move(Pointer::new(10, 10), 0.0).unwrap();
    session.on_mouse_down(press(a, 10, 10)).unwrap();
    assert!(session.dom().has_class(a, "near-pointer"));
    assert!(session.dom().has_class(a, "dragging"));
    session.on_mouse_up().unwrap();
    session.on_mouse_down(alt_click(a)).unwrap();

    let AgentReply::Details(Some(details)) = session.handle(AgentRequest::GetSelectedElementDetails) else {
        panic!("expected details");
    };
    assert_eq!(details.classes, vec!["card", "editor-selected"]);
}
