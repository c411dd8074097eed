//! GPA Calculator Page
//!
//! Local-only tool: rows of (course, marks, credit hours) fed through
//! the grading table. Nothing here touches the API.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::grading::{compute_gpa, grade_for_marks, CourseEntry};

#[derive(Clone, Debug, PartialEq)]
struct Row {
    id: u32,
    name: String,
    marks: String,
    credits: String,
}

impl Row {
    fn new(id: u32) -> Self {
        Self { id, name: String::new(), marks: String::new(), credits: "3".to_string() }
    }

    /// Parse into a calculator entry; blank rows are skipped, junk is
    /// reported by field.
    fn parse(&self, index: usize) -> Result<Option<CourseEntry>, String> {
        if self.marks.trim().is_empty() {
            return Ok(None);
        }
        let marks: f64 = self
            .marks
            .trim()
            .parse()
            .map_err(|_| format!("Row {}: marks must be a number", index + 1))?;
        let credit_hours: u8 = self
            .credits
            .trim()
            .parse()
            .map_err(|_| format!("Row {}: credit hours must be a whole number", index + 1))?;
        Ok(Some(CourseEntry { name: self.name.clone(), marks, credit_hours }))
    }
}

#[component]
pub fn GpaPage() -> impl IntoView {
    let ctx = use_app_context();
    let (rows, set_rows) = signal(vec![Row::new(0), Row::new(1), Row::new(2)]);
    let (next_id, set_next_id) = signal(3u32);
    let (gpa, set_gpa) = signal::<Option<f64>>(None);

    let add_row = move |_| {
        let id = next_id.get_untracked();
        set_next_id.set(id + 1);
        set_rows.update(|rows| rows.push(Row::new(id)));
        set_gpa.set(None);
    };

    let remove_row = move |id: u32| {
        set_rows.update(|rows| rows.retain(|row| row.id != id));
        set_gpa.set(None);
    };

    let update_row = move |id: u32, apply: fn(&mut Row, String), value: String| {
        set_rows.update(|rows| {
            if let Some(row) = rows.iter_mut().find(|row| row.id == id) {
                apply(row, value);
            }
        });
        set_gpa.set(None);
    };

    let calculate = move |_| {
        let mut entries = Vec::new();
        for (index, row) in rows.get_untracked().iter().enumerate() {
            match row.parse(index) {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => {}
                Err(message) => {
                    ctx.toast_error(message);
                    return;
                }
            }
        }
        match compute_gpa(&entries) {
            Ok(value) => set_gpa.set(Some(value)),
            Err(message) => ctx.toast_error(message),
        }
    };

    view! {
        <section class="page gpa-page">
            <h1>"GPA Calculator"</h1>
            <p class="gpa-hint">
                "Enter your marks (0–100) and credit hours per course. "
                "Blank rows are ignored."
            </p>

            <div class="gpa-rows">
                <For
                    each=move || rows.get()
                    key=|row| row.id
                    children=move |row| {
                        let id = row.id;
                        let letter = move || {
                            rows.get()
                                .iter()
                                .find(|r| r.id == id)
                                .and_then(|r| r.marks.trim().parse::<f64>().ok())
                                .and_then(|marks| grade_for_marks(marks).ok())
                                .map(|(letter, _)| letter.to_string())
                                .unwrap_or_default()
                        };
                        view! {
                            <div class="gpa-row">
                                <input
                                    type="text"
                                    placeholder="Course name"
                                    prop:value=row.name.clone()
                                    on:input=move |ev| update_row(
                                        id,
                                        |row, v| row.name = v,
                                        event_target_value(&ev),
                                    )
                                />
                                <input
                                    type="number"
                                    placeholder="Marks"
                                    min="0"
                                    max="100"
                                    prop:value=row.marks.clone()
                                    on:input=move |ev| update_row(
                                        id,
                                        |row, v| row.marks = v,
                                        event_target_value(&ev),
                                    )
                                />
                                <input
                                    type="number"
                                    placeholder="Credits"
                                    min="1"
                                    max="6"
                                    prop:value=row.credits.clone()
                                    on:input=move |ev| update_row(
                                        id,
                                        |row, v| row.credits = v,
                                        event_target_value(&ev),
                                    )
                                />
                                <span class="gpa-letter">{letter}</span>
                                <button class="remove-row-btn" on:click=move |_| remove_row(id)>
                                    "×"
                                </button>
                            </div>
                        }
                    }
                />
            </div>

            <div class="gpa-actions">
                <button class="add-row-btn" on:click=add_row>"Add course"</button>
                <button class="calculate-btn" on:click=calculate>"Calculate GPA"</button>
            </div>

            {move || gpa.get().map(|value| view! {
                <div class="gpa-result">
                    <span class="gpa-value">{format!("{value:.2}")}</span>
                    <span class="gpa-scale">" / 4.00"</span>
                </div>
            })}
        </section>
    }
}
