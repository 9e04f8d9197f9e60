use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::row::Row;

pub struct AppState {
    pub rows: Signal<Vec<Row>>,
    pub selected_row: Signal<Option<Row>>,
    pub read_only: Signal<bool>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new(initial_rows: fn() -> Vec<Row>) -> Self {
        Self {
            rows: use_signal(initial_rows),
            selected_row: use_signal(|| None::<Row>),
            read_only: use_signal(|| false),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
        }
    }
}
