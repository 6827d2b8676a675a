#![allow(clippy::float_cmp)]

use std::cell::Cell;

use super::*;
use crate::consts::SVG_NS;

fn text_node(dom: &MemoryDom, text: &str) -> MemoryNode {
    let node = dom.create_element_ns(SVG_NS, "text").unwrap();
    dom.set_text_content(&node, text);
    node
}

// =============================================================
// MemoryDom: tree
// =============================================================

#[test]
fn new_dom_has_only_a_body() {
    let dom = MemoryDom::new();
    assert_eq!(dom.node_count(), 1);
    assert_eq!(dom.tag_name(&dom.body()), "body");
    assert!(dom.is_attached(&dom.body()));
}

#[test]
fn created_element_is_detached_and_namespaced() {
    let dom = MemoryDom::new();
    let node = dom.create_element_ns(SVG_NS, "rect").unwrap();
    assert_eq!(dom.tag_name(&node), "rect");
    assert_eq!(dom.namespace(node), SVG_NS);
    assert!(!dom.is_attached(&node));
    assert!(dom.parent(node).is_none());
}

#[test]
fn create_rejects_empty_kind() {
    let dom = MemoryDom::new();
    assert!(matches!(dom.create_element_ns(SVG_NS, ""), Err(DomError::Host(_))));
    assert!(matches!(dom.create_element_ns(SVG_NS, "two words"), Err(DomError::Host(_))));
}

#[test]
fn append_moves_between_parents() {
    let dom = MemoryDom::new();
    let a = dom.create_element_ns(SVG_NS, "g").unwrap();
    let b = dom.create_element_ns(SVG_NS, "g").unwrap();
    let leaf = dom.create_element_ns(SVG_NS, "rect").unwrap();
    dom.append_child(&a, &leaf).unwrap();
    dom.append_child(&b, &leaf).unwrap();
    assert!(dom.children(a).is_empty());
    assert_eq!(dom.children(b), vec![leaf]);
    assert_eq!(dom.parent(leaf), Some(b));
}

#[test]
fn append_into_own_descendant_fails() {
    let dom = MemoryDom::new();
    let outer = dom.create_element_ns(SVG_NS, "g").unwrap();
    let inner = dom.create_element_ns(SVG_NS, "g").unwrap();
    dom.append_child(&outer, &inner).unwrap();
    assert!(dom.append_child(&inner, &outer).is_err());
    assert!(dom.append_child(&outer, &outer).is_err());
}

#[test]
fn attachment_follows_ancestors() {
    let dom = MemoryDom::new();
    let group = dom.create_element_ns(SVG_NS, "g").unwrap();
    let leaf = dom.create_element_ns(SVG_NS, "rect").unwrap();
    dom.append_child(&group, &leaf).unwrap();
    assert!(!dom.is_attached(&leaf));
    dom.append_to_body(&group).unwrap();
    assert!(dom.is_attached(&leaf));
    dom.remove(&group);
    assert!(!dom.is_attached(&leaf));
}

#[test]
fn remove_detached_is_noop() {
    let dom = MemoryDom::new();
    let node = dom.create_element_ns(SVG_NS, "g").unwrap();
    dom.remove(&node);
    assert!(dom.parent(node).is_none());
}

#[test]
fn set_text_content_replaces_children() {
    let dom = MemoryDom::new();
    let group = dom.create_element_ns(SVG_NS, "text").unwrap();
    let span = text_node(&dom, "old");
    dom.append_child(&group, &span).unwrap();
    assert_eq!(dom.text_content(group), "old");

    dom.set_text_content(&group, "new");
    assert!(dom.children(group).is_empty());
    assert!(dom.parent(span).is_none());
    assert_eq!(dom.text_content(group), "new");
}

#[test]
fn clone_deep_copies_subtree_detached() {
    let dom = MemoryDom::new();
    let group = dom.create_element_ns(SVG_NS, "g").unwrap();
    dom.set_attribute(&group, "x", "4").unwrap();
    dom.add_class(&group, "axis").unwrap();
    let label = text_node(&dom, "tick");
    dom.append_child(&group, &label).unwrap();
    dom.append_to_body(&group).unwrap();

    let copy = dom.clone_deep(&group).unwrap();
    assert_ne!(copy, group);
    assert!(!dom.is_attached(&copy));
    assert_eq!(dom.attribute(&copy, "x").as_deref(), Some("4"));
    assert_eq!(dom.classes(copy), vec!["axis".to_owned()]);
    assert_eq!(dom.text_content(copy), "tick");

    let copied_children = dom.children(copy);
    assert_eq!(copied_children.len(), 1);
    assert_ne!(copied_children[0], label);
    assert_eq!(dom.children(group), vec![label]);
}

#[test]
fn clone_is_independent_of_original() {
    let dom = MemoryDom::new();
    let node = text_node(&dom, "a");
    let copy = dom.clone_deep(&node).unwrap();
    dom.set_attribute(&copy, "x", "0").unwrap();
    assert!(dom.attribute(&node, "x").is_none());
}

#[test]
fn parent_node_matches_tree() {
    let dom = MemoryDom::new();
    let group = dom.create_element_ns(SVG_NS, "g").unwrap();
    let leaf = dom.create_element_ns(SVG_NS, "rect").unwrap();
    assert!(dom.parent_node(&leaf).is_none());
    dom.append_child(&group, &leaf).unwrap();
    assert_eq!(dom.parent_node(&leaf), Some(group));
}

#[test]
fn discard_detaches_and_frees_slot() {
    let dom = MemoryDom::new();
    let group = dom.create_element_ns(SVG_NS, "g").unwrap();
    dom.append_to_body(&group).unwrap();
    let before = dom.node_count();

    dom.discard(&group);
    assert!(dom.children(dom.body()).is_empty());
    assert_eq!(dom.node_count(), before - 1);

    let reused = dom.create_element_ns(SVG_NS, "rect").unwrap();
    assert_eq!(reused, group);
    assert_eq!(dom.tag_name(&reused), "rect");
    assert!(dom.parent(reused).is_none());
    assert!(dom.classes(reused).is_empty());
}

#[test]
fn discard_frees_whole_subtree() {
    let dom = MemoryDom::new();
    let group = dom.create_element_ns(SVG_NS, "g").unwrap();
    for _ in 0..3 {
        let leaf = dom.create_element_ns(SVG_NS, "rect").unwrap();
        dom.append_child(&group, &leaf).unwrap();
    }
    let capacity = dom.capacity();
    dom.discard(&group);
    assert_eq!(dom.node_count(), 1);

    for _ in 0..4 {
        dom.create_element_ns(SVG_NS, "line").unwrap();
    }
    assert_eq!(dom.capacity(), capacity);
}

#[test]
fn discard_twice_and_discard_body_are_noops() {
    let dom = MemoryDom::new();
    let node = dom.create_element_ns(SVG_NS, "g").unwrap();
    dom.discard(&node);
    dom.discard(&node);
    dom.discard(&dom.body());
    assert_eq!(dom.node_count(), 1);
    assert!(dom.is_attached(&dom.body()));
    let a = dom.create_element_ns(SVG_NS, "g").unwrap();
    let b = dom.create_element_ns(SVG_NS, "g").unwrap();
    assert_ne!(a, b);
}

// =============================================================
// MemoryDom: classes, styles, attributes
// =============================================================

#[test]
fn add_class_is_set_union() {
    let dom = MemoryDom::new();
    let node = dom.create_element_ns(SVG_NS, "g").unwrap();
    dom.add_class(&node, "a").unwrap();
    dom.add_class(&node, "a").unwrap();
    dom.add_class(&node, "b").unwrap();
    assert_eq!(dom.classes(node), vec!["a".to_owned(), "b".to_owned()]);
}

#[test]
fn add_class_rejects_whitespace() {
    let dom = MemoryDom::new();
    let node = dom.create_element_ns(SVG_NS, "g").unwrap();
    assert!(dom.add_class(&node, "a b").is_err());
}

#[test]
fn empty_style_value_removes_property() {
    let dom = MemoryDom::new();
    let node = dom.create_element_ns(SVG_NS, "text").unwrap();
    dom.set_style(&node, "fill", "red").unwrap();
    assert_eq!(dom.style(&node, "fill").unwrap(), "red");
    dom.set_style(&node, "fill", "").unwrap();
    assert_eq!(dom.style(&node, "fill").unwrap(), "");
    assert!(dom.styles(node).is_empty());
}

#[test]
fn attribute_round_trip_and_invalid_name() {
    let dom = MemoryDom::new();
    let node = dom.create_element_ns(SVG_NS, "rect").unwrap();
    dom.set_attribute(&node, "data-id", "7").unwrap();
    assert_eq!(dom.attribute(&node, "data-id").as_deref(), Some("7"));
    assert!(dom.attribute(&node, "missing").is_none());
    assert!(dom.set_attribute(&node, "", "x").is_err());
}

// =============================================================
// MemoryDom: layout
// =============================================================

#[test]
fn bbox_requires_attachment() {
    let dom = MemoryDom::new();
    let node = text_node(&dom, "abc");
    assert!(matches!(dom.bbox(&node), Err(DomError::Layout(_))));
}

#[test]
fn bbox_uses_fixed_advance() {
    let dom = MemoryDom::new();
    let node = text_node(&dom, "abcd");
    dom.append_to_body(&node).unwrap();
    let bbox = dom.bbox(&node).unwrap();
    assert_eq!(bbox.width, 4.0 * DEFAULT_FONT_SIZE_PX * GLYPH_ADVANCE_EM);
    assert_eq!(bbox.height, DEFAULT_FONT_SIZE_PX * LINE_HEIGHT_EM);
}

#[test]
fn bbox_honors_font_size_style_then_attribute() {
    let dom = MemoryDom::new();
    let node = text_node(&dom, "ab");
    dom.append_to_body(&node).unwrap();

    dom.set_attribute(&node, "font-size", "10").unwrap();
    assert_eq!(dom.bbox(&node).unwrap().width, 2.0 * 10.0 * GLYPH_ADVANCE_EM);

    dom.set_style(&node, "font-size", "20px").unwrap();
    assert_eq!(dom.bbox(&node).unwrap().width, 2.0 * 20.0 * GLYPH_ADVANCE_EM);
}

#[test]
fn bbox_counts_chars_not_bytes() {
    let dom = MemoryDom::new();
    let node = text_node(&dom, "héllo");
    dom.append_to_body(&node).unwrap();
    assert_eq!(dom.bbox(&node).unwrap().width, 5.0 * DEFAULT_FONT_SIZE_PX * GLYPH_ADVANCE_EM);
}

#[test]
fn bbox_shadow_adds_bleed_unless_neutral() {
    let dom = MemoryDom::new();
    let node = text_node(&dom, "a");
    dom.append_to_body(&node).unwrap();
    let base = dom.bbox(&node).unwrap().width;

    dom.set_style(&node, TEXT_SHADOW, "2px 2px 4px black").unwrap();
    assert_eq!(dom.bbox(&node).unwrap().width, base + SHADOW_BLEED_PX);

    dom.set_style(&node, TEXT_SHADOW, NEUTRAL_TEXT_SHADOW).unwrap();
    assert_eq!(dom.bbox(&node).unwrap().width, base);
}

#[test]
fn bbox_of_shape_reads_dimensions() {
    let dom = MemoryDom::new();
    let rect = dom.create_element_ns(SVG_NS, "rect").unwrap();
    dom.set_attribute(&rect, "width", "30").unwrap();
    dom.set_attribute(&rect, "height", "12.5").unwrap();
    dom.append_to_body(&rect).unwrap();
    assert_eq!(dom.bbox(&rect).unwrap(), BBox { width: 30.0, height: 12.5 });
}

// =============================================================
// ManualTimers
// =============================================================

#[test]
fn timer_fires_only_after_delay() {
    let timers = ManualTimers::new();
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    timers.schedule(100, Box::new(move || flag.set(true)));

    timers.advance(99);
    assert!(!fired.get());
    assert_eq!(timers.pending(), 1);

    timers.advance(1);
    assert!(fired.get());
    assert_eq!(timers.pending(), 0);
    assert_eq!(timers.now_ms(), 100);
}

#[test]
fn cancelled_timer_never_fires() {
    let timers = ManualTimers::new();
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    let id = timers.schedule(10, Box::new(move || flag.set(true)));
    timers.cancel(id);
    timers.advance(1_000);
    assert!(!fired.get());
}

#[test]
fn cancel_after_fire_is_noop() {
    let timers = ManualTimers::new();
    let id = timers.schedule(0, Box::new(|| {}));
    timers.advance(0);
    timers.cancel(id);
    assert_eq!(timers.pending(), 0);
}

#[test]
fn timers_fire_in_due_order() {
    let timers = ManualTimers::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    for (delay, tag) in [(30, "c"), (10, "a"), (20, "b")] {
        let log = Rc::clone(&log);
        timers.schedule(delay, Box::new(move || log.borrow_mut().push(tag)));
    }
    timers.advance(50);
    assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
}

#[test]
fn callback_can_schedule_follow_up() {
    let timers = ManualTimers::new();
    let count = Rc::new(Cell::new(0));
    let inner_timers = timers.clone();
    let outer_count = Rc::clone(&count);
    timers.schedule(
        10,
        Box::new(move || {
            outer_count.set(outer_count.get() + 1);
            let inner_count = Rc::clone(&outer_count);
            inner_timers.schedule(10, Box::new(move || inner_count.set(inner_count.get() + 1)));
        }),
    );
    timers.advance(15);
    assert_eq!(count.get(), 1);
    timers.advance(5);
    assert_eq!(count.get(), 2);
}
