#![forbid(unsafe_code)]

//! Test harness for `ftui-editor`.
//!
//! Provides a journaling [`EditorSource`](ftui_editor::EditorSource) and
//! [`EditorChain`](ftui_editor::EditorChain) pair plus probe sub-editors, so
//! integration tests, property tests, and fuzz targets can check exactly
//! which callbacks a list editor made and in what order.

pub mod recorder;

pub use recorder::{
    Event, Item, Journal, Probe, ProbeState, RecordingChain, RecordingEditor, RecordingSource,
    assert_aligned, item, items, labels, recording_editor,
};
