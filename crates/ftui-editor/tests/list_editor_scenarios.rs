//! Scenario tests for list editor synchronization.
//!
//! Each test drives the wrapper or the list editor through the recording
//! harness and checks the exact callback sequence it produced.

use ftui_editor::{BackingList, Identity, InvariantCheck, ListEditorConfig, ListEditorWrapper};
use ftui_editor_harness::{
    Event, Item, Journal, Probe, RecordingChain, RecordingSource, assert_aligned, item, items,
    labels, recording_editor,
};

fn strict() -> ListEditorConfig {
    ListEditorConfig::default().invariant_check(InvariantCheck::Always)
}

struct Rig {
    journal: Journal,
    source: RecordingSource,
    chain: RecordingChain,
    wrapper: ListEditorWrapper<Item, Probe>,
}

fn attached_rig(values: &[&str]) -> Rig {
    let journal = Journal::default();
    let mut source = RecordingSource::new(journal.clone());
    let mut chain = RecordingChain::new(journal.clone());
    let mut wrapper =
        ListEditorWrapper::with_check(BackingList::new(items(values)), InvariantCheck::Always);
    wrapper.attach(&mut source, &mut chain);
    Rig {
        journal,
        source,
        chain,
        wrapper,
    }
}

// --- Scenario A: attach ------------------------------------------------------

#[test]
fn attach_creates_one_editor_per_element_in_order() {
    let rig = attached_rig(&["A", "B", "C"]);
    assert_eq!(rig.wrapper.editors().len(), 3);
    assert_eq!(
        rig.journal.events(),
        vec![
            Event::Create { serial: 0, index: 0 },
            Event::Create { serial: 1, index: 1 },
            Event::Create { serial: 2, index: 2 },
            Event::Attach {
                serial: 0,
                value: item("A")
            },
            Event::Attach {
                serial: 1,
                value: item("B")
            },
            Event::Attach {
                serial: 2,
                value: item("C")
            },
        ]
    );
}

#[test]
fn attach_on_empty_list_creates_nothing() {
    let rig = attached_rig(&[]);
    assert!(rig.wrapper.editors().is_empty());
    assert!(rig.journal.events().is_empty());
}

// --- Scenario B: insert ------------------------------------------------------

#[test]
fn add_creates_renumbers_then_attaches() {
    let mut rig = attached_rig(&["A", "B", "C"]);
    rig.journal.take();

    rig.wrapper.add(&mut rig.source, &mut rig.chain, 1, item("X"));

    assert_eq!(labels(rig.wrapper.as_slice()), ["A", "X", "B", "C"]);
    assert_eq!(rig.wrapper.editors()[1].serial(), 3);
    assert_eq!(rig.source.created(), 4);
    assert_eq!(
        rig.journal.events(),
        vec![
            Event::Create { serial: 3, index: 1 },
            Event::SetIndex { serial: 1, index: 2 },
            Event::SetIndex { serial: 2, index: 3 },
            Event::Attach {
                serial: 3,
                value: item("X")
            },
        ]
    );
    let positions: Vec<usize> = rig.wrapper.editors().iter().map(|p| p.index()).collect();
    assert_eq!(positions, [0, 1, 2, 3]);
}

// --- Scenario C: remove ------------------------------------------------------

#[test]
fn remove_disposes_renumbers_then_detaches() {
    let mut rig = attached_rig(&["A", "B", "C"]);
    rig.wrapper.add(&mut rig.source, &mut rig.chain, 1, item("X"));
    let removed_probe = Probe::clone(&rig.wrapper.editors()[0]);
    rig.journal.take();

    let removed = rig.wrapper.remove(&mut rig.source, &mut rig.chain, 0);

    assert_eq!(removed.label(), "A");
    assert_eq!(labels(rig.wrapper.as_slice()), ["X", "B", "C"]);
    assert_eq!(removed_probe.disposals(), 1);
    assert!(!removed_probe.is_attached());
    assert_eq!(
        rig.journal.events(),
        vec![
            Event::Dispose { serial: 0 },
            Event::SetIndex { serial: 3, index: 0 },
            Event::SetIndex { serial: 1, index: 1 },
            Event::SetIndex { serial: 2, index: 2 },
            Event::Detach { serial: 0 },
        ]
    );
}

#[test]
fn set_reuses_the_existing_editor() {
    let mut rig = attached_rig(&["A", "B"]);
    rig.journal.take();

    let previous = rig.wrapper.set(&mut rig.chain, 1, item("Q"));

    assert_eq!(previous.label(), "B");
    assert_eq!(
        rig.journal.events(),
        vec![Event::Attach {
            serial: 1,
            value: item("Q")
        }]
    );
}

#[test]
fn detach_unwires_each_editor_before_disposing_it() {
    let rig = attached_rig(&["A", "B"]);
    let Rig {
        journal,
        mut source,
        mut chain,
        wrapper,
    } = rig;
    journal.take();

    wrapper.detach(&mut source, &mut chain);

    assert_eq!(
        journal.events(),
        vec![
            Event::Detach { serial: 0 },
            Event::Dispose { serial: 0 },
            Event::Detach { serial: 1 },
            Event::Dispose { serial: 1 },
        ]
    );
}

// --- Flush -------------------------------------------------------------------

#[test]
fn attach_then_flush_leaves_backing_unchanged() {
    let rig = attached_rig(&["A", "B", "C"]);
    let mut wrapper = rig.wrapper;
    let before = wrapper.backing().snapshot();

    wrapper.flush(&rig.chain);

    let after = wrapper.backing().snapshot();
    assert_eq!(after, before);
    assert!(after.iter().zip(&before).all(|(a, b)| a.is_same(b)));
}

#[test]
fn flush_picks_up_edits_by_identity() {
    let mut rig = attached_rig(&["A", "B"]);
    let lookalike = item("A");
    rig.wrapper.editors()[0].edit(lookalike.clone());
    rig.wrapper.add(&mut rig.source, &mut rig.chain, 2, item("C"));

    rig.wrapper.flush(&rig.chain);

    let backing = rig.wrapper.backing().snapshot();
    assert_eq!(labels(&backing), ["A", "B", "C"]);
    assert!(backing[0].is_same(&lookalike));
}

// --- Scenario D: same list again ---------------------------------------------

#[test]
fn same_list_refreshes_in_place() {
    let (mut editor, journal) = recording_editor(strict());
    let list = BackingList::new(items(&["A", "B", "C"]));
    editor.set_value(Some(list.clone()));
    let probes: Vec<Probe> = editor.editors().to_vec();
    journal.take();

    editor.set_value(Some(list.clone()));

    assert!(editor.value().is_some_and(|bound| bound.is_same(&list)));
    assert!(
        editor
            .editors()
            .iter()
            .zip(&probes)
            .all(|(now, before)| now.is_same(before))
    );
    assert_eq!(journal.count(|e| matches!(e, Event::Detach { .. })), 0);
    assert_eq!(journal.count(|e| matches!(e, Event::Create { .. })), 0);
    assert_eq!(journal.count(|e| matches!(e, Event::Attach { .. })), 3);
    assert_aligned(&editor);
}

#[test]
fn same_list_refresh_follows_out_of_band_changes() {
    let (mut editor, journal) = recording_editor(strict());
    let list = BackingList::new(items(&["A", "B", "C"]));
    editor.set_value(Some(list.clone()));
    journal.take();

    list.update(|values| {
        values.remove(0);
        values.push(item("D"));
        values.push(item("E"));
    });
    editor.set_value(Some(list.clone()));

    assert_eq!(labels(editor.list().unwrap_or_default()), ["B", "C", "D", "E"]);
    assert_eq!(
        journal.events(),
        vec![
            Event::Attach {
                serial: 0,
                value: item("B")
            },
            Event::Attach {
                serial: 1,
                value: item("C")
            },
            Event::Attach {
                serial: 2,
                value: item("D")
            },
            Event::Create { serial: 3, index: 3 },
            Event::Attach {
                serial: 3,
                value: item("E")
            },
        ]
    );
    assert_aligned(&editor);
}

// --- Scenario E: a different list --------------------------------------------

#[test]
fn different_list_detaches_everything_before_creating() {
    let (mut editor, journal) = recording_editor(strict());
    let first = BackingList::new(items(&["A", "B", "C"]));
    let twin = BackingList::new(first.snapshot());
    editor.set_value(Some(first));
    let old: Vec<Probe> = editor.editors().to_vec();
    journal.take();

    editor.set_value(Some(twin.clone()));

    let last_teardown = journal
        .last_position(|e| {
            matches!(e, Event::Detach { serial } | Event::Dispose { serial } if *serial < 3)
        })
        .expect("old editors torn down");
    let first_create = journal
        .position(|e| matches!(e, Event::Create { .. }))
        .expect("new editors created");
    assert!(last_teardown < first_create);
    for probe in &old {
        assert_eq!(probe.disposals(), 1);
        assert!(!probe.is_attached());
    }
    assert!(editor.value().is_some_and(|bound| bound.is_same(&twin)));
    assert!(editor.editors().iter().all(|p| p.serial() >= 3));
    assert_aligned(&editor);
}

#[test]
fn clearing_detaches_and_empties() {
    let (mut editor, journal) = recording_editor(strict());
    editor.set_value(Some(BackingList::new(items(&["A", "B"]))));
    journal.take();

    editor.set_value(None);

    assert!(editor.editors().is_empty());
    assert!(editor.list().is_none());
    assert_eq!(journal.count(|e| matches!(e, Event::Dispose { .. })), 2);

    journal.take();
    editor.set_value(None);
    assert!(journal.events().is_empty());
}

// --- Owner surface -----------------------------------------------------------

#[test]
fn list_mut_edits_flush_back_to_the_caller() {
    let (mut editor, _journal) = recording_editor(strict());
    let list = BackingList::new(items(&["A", "B", "C"]));
    editor.set_value(Some(list.clone()));

    let mut edit = editor.list_mut().expect("bound");
    edit.add(0, item("Z"));
    edit.remove(2);
    edit.push(item("D"));
    assert_eq!(labels(&list.snapshot()), ["A", "B", "C"]);

    editor.flush();
    assert_eq!(labels(&list.snapshot()), ["Z", "A", "C", "D"]);
    assert_aligned(&editor);
}

#[test]
fn path_elements_track_positions() {
    let (mut editor, _journal) = recording_editor(strict());
    editor.set_value(Some(BackingList::new(items(&["A", "B", "C"]))));
    let c = Probe::clone(&editor.editors()[2]);
    assert_eq!(editor.path_element(&c).as_deref(), Some("[2]"));

    editor.list_mut().expect("bound").remove(0);
    assert_eq!(editor.path_element(&c).as_deref(), Some("[1]"));
}

#[test]
fn traversal_editor_is_created_and_disposed_off_list() {
    let (mut editor, journal) = recording_editor(strict());
    let probe = editor.create_editor_for_traversal();
    assert_eq!(
        journal.events(),
        vec![
            Event::Create { serial: 0, index: 0 },
            Event::Dispose { serial: 0 },
        ]
    );
    assert!(!editor.is_bound());
    assert_eq!(editor.path_element(&probe), None);
}
