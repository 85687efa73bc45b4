#![no_main]

use arbitrary::Arbitrary;
use ftui_editor::{BackingList, InvariantCheck, ListEditorConfig};
use ftui_editor_harness::{Event, assert_aligned, item, recording_editor};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Add(u8, u8),
    Remove(u8),
    Set(u8, u8),
    Edit(u8, u8),
    Flush,
    Refresh,
    Rebind,
    Unbind,
}

fn label(byte: u8) -> String {
    format!("v{}", byte % 16)
}

fuzz_target!(|input: (Vec<u8>, Vec<Op>)| {
    let (initial, ops) = input;
    if initial.len() > 64 || ops.len() > 256 {
        return;
    }

    let config = ListEditorConfig::default().invariant_check(InvariantCheck::Always);
    let (mut editor, journal) = recording_editor(config);
    let mut list = BackingList::new(initial.iter().map(|b| item(&label(*b))).collect());
    editor.set_value(Some(list.clone()));

    for op in ops {
        let len = editor.editors().len();
        match op {
            Op::Add(at, v) => {
                if let Some(mut edit) = editor.list_mut() {
                    edit.add(usize::from(at) % (len + 1), item(&label(v)));
                }
            }
            Op::Remove(at) if len > 0 => {
                if let Some(mut edit) = editor.list_mut() {
                    edit.remove(usize::from(at) % len);
                }
            }
            Op::Set(at, v) if len > 0 => {
                if let Some(mut edit) = editor.list_mut() {
                    edit.set(usize::from(at) % len, item(&label(v)));
                }
            }
            Op::Edit(at, v) if len > 0 => {
                editor.editors()[usize::from(at) % len].edit(item(&label(v)));
            }
            Op::Flush => {
                editor.flush();
                if editor.is_bound() {
                    assert_eq!(list.len(), editor.editors().len());
                }
            }
            Op::Refresh => editor.set_value(Some(list.clone())),
            Op::Rebind => {
                list = BackingList::new(list.snapshot());
                editor.set_value(Some(list.clone()));
            }
            Op::Unbind => editor.set_value(None),
            _ => {}
        }

        // Post-conditions that must always hold:
        assert_aligned(&editor);
        if editor.is_bound() {
            assert_eq!(
                editor.list().map(<[_]>::len),
                Some(editor.editors().len()),
                "working copy and sub-editors diverged"
            );
        }
    }

    editor.set_value(None);
    let created = journal.count(|e| matches!(e, Event::Create { .. }));
    let disposed = journal.count(|e| matches!(e, Event::Dispose { .. }));
    assert_eq!(created, disposed, "sub-editor leaked");
});
