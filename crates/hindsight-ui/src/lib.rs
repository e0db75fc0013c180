#![allow(non_snake_case)]
//! Widgets and text layout.

mod layout;
pub use layout::layout_and_paint;

use std::rc::Rc;

use hindsight_core::*;

pub fn Box() -> View {
    View::new(0, ViewKind::Box)
}

pub fn Row() -> View {
    View::new(0, ViewKind::Row)
}

pub fn Column() -> View {
    View::new(0, ViewKind::Column)
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(0, ViewKind::Text { text: text.into() }).semantics(Semantics::new(Role::Text))
}

pub fn Button(text: impl Into<String>, on_click: impl Fn() + 'static) -> View {
    View::new(
        0,
        ViewKind::Button {
            text: text.into(),
            on_click: Some(Rc::new(on_click)),
        },
    )
    .semantics(Semantics::new(Role::Button))
}

/// A button that renders but ignores clicks.
pub fn DisabledButton(text: impl Into<String>) -> View {
    View::new(
        0,
        ViewKind::Button {
            text: text.into(),
            on_click: None,
        },
    )
    .semantics(Semantics {
        role: Role::Button,
        label: None,
        enabled: false,
    })
}
